use anyhow::Result;

use hoteldesk::{Hotel, HotelConfig};

pub fn exec(cfg: HotelConfig) -> Result<()> {
    let hotel = Hotel::open_with_config(cfg)?;
    let root = hotel
        .root()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let report = hotel.bootstrap_report();
    if report.created.is_empty() {
        println!("Data directory already initialized at {}", root);
    } else {
        let names: Vec<_> = report.created.iter().map(|k| k.file_name()).collect();
        println!("Initialized {} at {}", names.join(", "), root);
    }
    Ok(())
}
