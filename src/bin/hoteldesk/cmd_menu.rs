use anyhow::Result;
use std::io;

use hoteldesk::{Hotel, HotelConfig, Menu};

pub fn exec(cfg: HotelConfig) -> Result<()> {
    let mut hotel = Hotel::open_with_config(cfg)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(&mut hotel, stdin.lock(), stdout.lock()).run()
}
