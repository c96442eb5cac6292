use anyhow::Result;
use serde_json::json;

use hoteldesk::{metrics, Hotel, HotelConfig};

pub fn exec(cfg: HotelConfig, json: bool) -> Result<()> {
    let mut hotel = Hotel::open_with_config(cfg)?;
    let st = hotel.status();
    let root = hotel
        .root()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    if json {
        let out = json!({
            "path": root,
            "status": st,
            "metrics": metrics::snapshot(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("hoteldesk status");
    println!("  path:        {}", root);
    println!("  accounts:    {}", st.accounts);
    println!(
        "  rooms:       {} (available={}, booked={})",
        st.rooms_total, st.rooms_available, st.rooms_booked
    );
    println!(
        "  bookings:    {} (confirmed={}, cancelled={})",
        st.bookings_total, st.bookings_confirmed, st.bookings_cancelled
    );
    println!("  next id:     {}", st.next_booking_id);
    Ok(())
}
