use anyhow::Result;
use serde::Serialize;

use hoteldesk::{Hotel, HotelConfig, Room};

#[derive(Serialize)]
struct RoomRow<'a> {
    room_no: &'a str,
    #[serde(flatten)]
    room: &'a Room,
}

pub fn exec(cfg: HotelConfig, all: bool, json: bool) -> Result<()> {
    let mut hotel = Hotel::open_with_config(cfg)?;
    let rooms: Vec<(String, Room)> = if all {
        hotel.rooms().list_all().into_iter().collect()
    } else {
        hotel.rooms().list_available()
    };

    if json {
        let rows: Vec<_> = rooms
            .iter()
            .map(|(no, room)| RoomRow { room_no: no, room })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rooms.is_empty() {
        println!("No rooms to show.");
        return Ok(());
    }
    println!("{:<10} {:<15} {:<12} {:<10}", "Room No.", "Type", "Price", "Status");
    for (no, r) in &rooms {
        println!(
            "{:<10} {:<15} {:<12} {:<10}",
            no,
            r.room_type.as_str(),
            r.price,
            r.status.to_string()
        );
    }
    Ok(())
}
