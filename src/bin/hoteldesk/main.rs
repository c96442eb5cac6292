use anyhow::Result;
use env_logger::{Builder, Env};

mod cli;
mod cmd_doctor;
mod cmd_init;
mod cmd_menu;
mod cmd_rooms;
mod cmd_status;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе дефолт: warn (чтобы не мешать меню).
    // Пример: RUST_LOG=debug hoteldesk --path ./data
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    let cfg = cli.config();
    match cli.cmd.unwrap_or(cli::Cmd::Menu) {
        cli::Cmd::Menu => cmd_menu::exec(cfg),

        cli::Cmd::Init => cmd_init::exec(cfg),

        cli::Cmd::Rooms { all, json } => cmd_rooms::exec(cfg, all, json),

        cli::Cmd::Status { json } => cmd_status::exec(cfg, json),

        cli::Cmd::Doctor { json } => cmd_doctor::exec(cfg, json),
    }
}
