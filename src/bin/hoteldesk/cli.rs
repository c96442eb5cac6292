use clap::{Parser, Subcommand};
use std::path::PathBuf;

use hoteldesk::HotelConfig;

/// Hotel booking desk (single session, JSON files)
#[derive(Parser, Debug)]
#[command(name = "hoteldesk", version, about = "Hotel booking desk CLI")]
pub struct Cli {
    /// Data directory (overrides HOTEL_DATA_DIR)
    #[arg(long, global = true)]
    pub path: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Interactive menu (default when no subcommand is given)
    Menu,
    /// Create missing documents (users/rooms/bookings) in the data directory
    Init,
    /// List rooms (available only unless --all)
    ///
    /// Пример:
    ///   hoteldesk rooms --path ./data --all --json
    Rooms {
        #[arg(long, default_value_t = false)]
        all: bool,
        /// JSON output (array of {room_no, type, price, status})
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print collection counts and the next booking id
    Status {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Check that room statuses agree with confirmed bookings (exit 1 if not)
    Doctor {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Cli as Parser>::parse()
    }

    pub fn config(&self) -> HotelConfig {
        let cfg = HotelConfig::from_env();
        match &self.path {
            Some(p) => cfg.with_data_dir(p),
            None => cfg,
        }
    }
}
