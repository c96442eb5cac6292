use anyhow::{anyhow, Result};

use hoteldesk::{Hotel, HotelConfig};

pub fn exec(cfg: HotelConfig, json: bool) -> Result<()> {
    let mut hotel = Hotel::open_with_config(cfg)?;
    let report = hotel.doctor();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "doctor: rooms={} bookings={}",
            report.rooms_checked, report.bookings_checked
        );
        for no in &report.booked_without_active {
            println!("  room {no}: booked, but no confirmed booking references it");
        }
        for no in &report.available_with_active {
            println!("  room {no}: available, but a confirmed booking references it");
        }
        for (no, ids) in &report.multiple_active {
            println!("  room {no}: {} confirmed bookings ({})", ids.len(), ids.join(", "));
        }
        for id in &report.dangling_bookings {
            println!("  booking {id}: room does not exist");
        }
        if report.is_clean() {
            println!("OK");
        }
    }

    if report.is_clean() {
        Ok(())
    } else {
        Err(anyhow!("doctor: {} problem(s) found", report.problems()))
    }
}
