//! The bookings and rooms documents are written one after the other with no
//! atomicity between them. These tests pin down what a failure in between
//! leaves behind, and that the doctor reports it.

use anyhow::Result;

use hoteldesk::consts::{BOOKINGS_FILE, META_FILE, ROOMS_FILE};
use hoteldesk::{BookingStatus, Hotel, HotelError, MemoryBackend, RoomStatus, Session};

fn setup() -> Result<(Hotel<MemoryBackend>, Session)> {
    let mut hotel = Hotel::in_memory()?;
    hotel.accounts().signup("alice", "pw", "Alice A", "a@x.com", "555")?;
    let s = hotel.accounts().login("alice", "pw")?;
    Ok((hotel, s))
}

#[test]
fn rooms_write_fails_after_booking_saved() -> Result<()> {
    let (mut hotel, s) = setup()?;
    hotel.store_mut().backend_mut().fail_writes_to(ROOMS_FILE);

    let err = hotel.ledger().book(&s, "105", "2024-01-01", "2024-01-03", "2").unwrap_err();
    assert!(matches!(err, HotelError::Storage(_)));
    assert!(!err.is_domain());

    // booking landed, room flip did not
    let b = hotel.ledger().get("BK0001").expect("bookings document was written");
    assert_eq!(b.status, BookingStatus::Confirmed);
    assert_eq!(hotel.rooms().get_room("105")?.status, RoomStatus::Available);

    let report = hotel.doctor();
    assert!(!report.is_clean());
    assert_eq!(report.available_with_active, vec!["105".to_string()]);

    // nothing repairs it: the room can be booked a second time
    hotel.store_mut().backend_mut().clear_failures();
    let c = hotel.ledger().book(&s, "105", "", "", "")?;
    assert_eq!(c.id, "BK0002");
    let report = hotel.doctor();
    assert_eq!(
        report.multiple_active,
        vec![("105".to_string(), vec!["BK0001".to_string(), "BK0002".to_string()])]
    );
    Ok(())
}

#[test]
fn rooms_write_fails_during_cancel() -> Result<()> {
    let (mut hotel, s) = setup()?;
    hotel.ledger().book(&s, "102", "", "", "")?;
    hotel.store_mut().backend_mut().fail_writes_to(ROOMS_FILE);

    assert!(matches!(
        hotel.ledger().cancel(&s, "BK0001"),
        Err(HotelError::Storage(_))
    ));
    assert_eq!(
        hotel.ledger().get("BK0001").map(|b| b.status),
        Some(BookingStatus::Cancelled)
    );
    assert_eq!(hotel.rooms().get_room("102")?.status, RoomStatus::Booked);
    assert_eq!(hotel.doctor().booked_without_active, vec!["102".to_string()]);
    Ok(())
}

#[test]
fn bookings_write_failure_changes_nothing_visible() -> Result<()> {
    let (mut hotel, s) = setup()?;
    hotel.store_mut().backend_mut().fail_writes_to(BOOKINGS_FILE);

    assert!(hotel.ledger().book(&s, "101", "", "", "").is_err());
    assert!(hotel.ledger().list_all().is_empty());
    assert!(hotel.rooms().get_room("101")?.is_available());
    assert!(hotel.doctor().is_clean());

    // the sequence counter was already advanced, so the next id skips ahead;
    // ids stay unique, they are not required to be dense
    hotel.store_mut().backend_mut().clear_failures();
    assert_eq!(hotel.ledger().book(&s, "101", "", "", "")?.id, "BK0002");
    Ok(())
}

#[test]
fn meta_write_failure_aborts_before_any_collection_write() -> Result<()> {
    let (mut hotel, s) = setup()?;
    hotel.store_mut().backend_mut().fail_writes_to(META_FILE);

    assert!(matches!(
        hotel.ledger().book(&s, "101", "", "", ""),
        Err(HotelError::Storage(_))
    ));
    assert!(hotel.ledger().list_all().is_empty());
    assert!(hotel.rooms().get_room("101")?.is_available());
    Ok(())
}
