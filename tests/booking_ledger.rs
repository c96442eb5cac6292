use anyhow::Result;

use hoteldesk::consts::{BOOKINGS_FILE, ROOMS_FILE};
use hoteldesk::{
    BookingStatus, Hotel, HotelError, MemoryBackend, Price, RoomStatus, Session,
};

fn hotel_with(users: &[&str]) -> Result<(Hotel<MemoryBackend>, Vec<Session>)> {
    let mut hotel = Hotel::in_memory()?;
    let mut sessions = Vec::new();
    for u in users {
        hotel.accounts().signup(u, "pw", u, "", "")?;
        sessions.push(hotel.accounts().login(u, "pw")?);
    }
    Ok((hotel, sessions))
}

fn raw_docs(hotel: &Hotel<MemoryBackend>) -> (Vec<u8>, Vec<u8>) {
    let b = hotel.store().backend();
    (
        b.raw(BOOKINGS_FILE).unwrap_or_default().to_vec(),
        b.raw(ROOMS_FILE).unwrap_or_default().to_vec(),
    )
}

#[test]
fn book_flips_room_and_denormalizes_price() -> Result<()> {
    let (mut hotel, s) = hotel_with(&["alice"])?;
    let price_before = hotel.rooms().get_room("101")?.price;

    let c = hotel
        .ledger()
        .book(&s[0], "101", "2024-05-01", "2024-05-04", "3")?;
    assert_eq!(c.id, "BK0001");
    assert_eq!(hotel.rooms().get_room("101")?.status, RoomStatus::Booked);

    let b = hotel.ledger().get("BK0001").expect("stored");
    assert_eq!(b.status, BookingStatus::Confirmed);
    assert_eq!(b.room_no, "101");
    assert_eq!(b.username, "alice");
    assert_eq!(b.price, price_before);
    assert_eq!(b.room_type.as_str(), "Single");
    assert_eq!((b.check_in.as_str(), b.check_out.as_str(), b.guests.as_str()),
               ("2024-05-01", "2024-05-04", "3"));
    Ok(())
}

#[test]
fn later_price_change_does_not_touch_old_booking() -> Result<()> {
    let (mut hotel, s) = hotel_with(&["alice"])?;
    hotel.ledger().book(&s[0], "107", "", "", "")?;

    let mut rooms = hotel.rooms().list_all();
    if let Some(r) = rooms.get_mut("107") {
        r.price = Price::from(9999);
    }
    hotel.store_mut().save(&rooms)?;

    assert_eq!(hotel.ledger().get("BK0001").map(|b| b.price), Some(Price::from(2000)));
    Ok(())
}

#[test]
fn ids_are_sequential_on_fresh_collection() -> Result<()> {
    let (mut hotel, s) = hotel_with(&["alice", "bob"])?;
    let mut ids = Vec::new();
    for (i, room) in ["101", "102", "103", "104", "105"].iter().enumerate() {
        ids.push(hotel.ledger().book(&s[i % 2], room, "", "", "")?.id);
    }
    assert_eq!(ids, vec!["BK0001", "BK0002", "BK0003", "BK0004", "BK0005"]);

    // cancellation keeps the record, so numbering continues
    hotel.ledger().cancel(&s[0], "BK0001")?;
    assert_eq!(hotel.ledger().book(&s[0], "101", "", "", "")?.id, "BK0006");
    Ok(())
}

#[test]
fn unknown_room_and_booked_room_change_nothing() -> Result<()> {
    let (mut hotel, s) = hotel_with(&["alice", "bob"])?;
    hotel.ledger().book(&s[0], "103", "", "", "")?;
    let before = raw_docs(&hotel);

    let err = hotel.ledger().book(&s[1], "103", "x", "y", "1").unwrap_err();
    assert!(matches!(err, HotelError::RoomUnavailable(ref n) if n == "103"));
    let err = hotel.ledger().book(&s[1], "404", "x", "y", "1").unwrap_err();
    assert!(matches!(err, HotelError::RoomNotFound(ref n) if n == "404"));

    assert_eq!(raw_docs(&hotel), before);
    Ok(())
}

#[test]
fn no_validation_of_dates_or_guests() -> Result<()> {
    let (mut hotel, s) = hotel_with(&["alice"])?;
    let c = hotel
        .ledger()
        .book(&s[0], "104", "next tuesday", "2020-01-01", "-3")?;
    assert_eq!(c.booking.check_in, "next tuesday");
    assert_eq!(c.booking.guests, "-3");
    Ok(())
}

#[test]
fn list_mine_includes_cancelled_in_order() -> Result<()> {
    let (mut hotel, s) = hotel_with(&["alice", "bob"])?;
    hotel.ledger().book(&s[0], "101", "", "", "")?;
    hotel.ledger().book(&s[1], "102", "", "", "")?;
    hotel.ledger().book(&s[0], "103", "", "", "")?;
    hotel.ledger().cancel(&s[0], "BK0001")?;

    let mine = hotel.ledger().list_mine(&s[0]);
    let view: Vec<_> = mine.iter().map(|(id, b)| (id.as_str(), b.status)).collect();
    assert_eq!(
        view,
        vec![("BK0001", BookingStatus::Cancelled), ("BK0003", BookingStatus::Confirmed)]
    );
    assert_eq!(hotel.ledger().list_mine(&s[1]).len(), 1);
    Ok(())
}

#[test]
fn cancel_then_cancel_again() -> Result<()> {
    let (mut hotel, s) = hotel_with(&["alice"])?;
    hotel.ledger().book(&s[0], "106", "", "", "")?;

    let b = hotel.ledger().cancel(&s[0], "BK0001")?;
    assert_eq!(b.status, BookingStatus::Cancelled);
    assert_eq!(hotel.rooms().get_room("106")?.status, RoomStatus::Available);
    let after_first = raw_docs(&hotel);

    let err = hotel.ledger().cancel(&s[0], "BK0001").unwrap_err();
    assert!(matches!(err, HotelError::AlreadyCancelled(_)));
    assert_eq!(raw_docs(&hotel), after_first);

    // the record is kept, not deleted
    assert!(hotel.ledger().get("BK0001").is_some());
    Ok(())
}

#[test]
fn non_owner_gets_not_owner_whatever_the_status() -> Result<()> {
    let (mut hotel, s) = hotel_with(&["alice", "bob"])?;
    hotel.ledger().book(&s[0], "108", "", "", "")?;
    let before = raw_docs(&hotel);

    let err = hotel.ledger().cancel(&s[1], "BK0001").unwrap_err();
    assert!(matches!(err, HotelError::NotOwner(_)));
    assert_eq!(raw_docs(&hotel), before);

    hotel.ledger().cancel(&s[0], "BK0001")?;
    let before = raw_docs(&hotel);
    let err = hotel.ledger().cancel(&s[1], "BK0001").unwrap_err();
    assert!(
        matches!(err, HotelError::NotOwner(_)),
        "ownership is checked before cancelled state, got {err:?}"
    );
    assert_eq!(raw_docs(&hotel), before);
    Ok(())
}

#[test]
fn cancel_unknown_booking() -> Result<()> {
    let (mut hotel, s) = hotel_with(&["alice"])?;
    assert!(matches!(
        hotel.ledger().cancel(&s[0], "BK0042"),
        Err(HotelError::BookingNotFound(_))
    ));
    Ok(())
}

#[test]
fn at_most_one_active_booking_per_room() -> Result<()> {
    let (mut hotel, s) = hotel_with(&["alice", "bob"])?;
    // book / cancel churn on the same rooms, alternating owners
    for round in 0..6 {
        let (owner, other) = (&s[round % 2], &s[(round + 1) % 2]);
        for room in ["101", "105"] {
            let c = hotel.ledger().book(owner, room, "", "", "")?;
            assert!(matches!(
                hotel.ledger().book(other, room, "", "", ""),
                Err(HotelError::RoomUnavailable(_))
            ));
            assert!(hotel.doctor().is_clean(), "round {round}, room {room} booked");
            hotel.ledger().cancel(owner, &c.id)?;
        }
        let report = hotel.doctor();
        assert!(report.is_clean(), "round {round}: {report:?}");
    }
    assert_eq!(hotel.ledger().list_all().len(), 12);
    Ok(())
}

#[test]
fn removed_booking_does_not_cause_id_collision() -> Result<()> {
    let (mut hotel, s) = hotel_with(&["alice"])?;
    hotel.ledger().book(&s[0], "101", "", "", "")?;
    hotel.ledger().book(&s[0], "102", "", "", "")?;

    // someone deletes BK0001 from bookings.json by hand
    let mut all = hotel.ledger().list_all();
    all.shift_remove("BK0001");
    hotel.store_mut().save(&all)?;

    let c = hotel.ledger().book(&s[0], "103", "", "", "")?;
    assert_eq!(c.id, "BK0003");
    assert_eq!(hotel.ledger().get("BK0002").map(|b| b.room_no), Some("102".into()));
    Ok(())
}

#[test]
fn decimal_priced_room_books_and_survives_rewrites() -> Result<()> {
    let (mut hotel, s) = hotel_with(&["alice"])?;
    hotel.store_mut().backend_mut().put_raw(
        ROOMS_FILE,
        br#"{
    "101": {"type": "Single", "price": 1000, "status": "available"},
    "109": {"type": "Deluxe", "price": 1250.5, "status": "available"}
}"#,
    );
    let half = Price::from_f64(1250.5).expect("finite");
    assert_eq!(hotel.rooms().get_room("109")?.price, half);

    // booking another room rewrites rooms.json; 109 must still be there
    hotel.ledger().book(&s[0], "101", "", "", "")?;
    assert_eq!(hotel.rooms().get_room("109")?.price, half);

    let c = hotel.ledger().book(&s[0], "109", "", "", "")?;
    assert_eq!(c.booking.price, half);
    assert_eq!(hotel.ledger().get(&c.id).map(|b| b.price), Some(half.clone()));

    let (bookings, rooms) = raw_docs(&hotel);
    let rooms: serde_json::Value = serde_json::from_slice(&rooms)?;
    assert_eq!(rooms["109"]["price"], 1250.5);
    assert_eq!(rooms["109"]["status"], "booked");
    // integer prices are not turned into 1000.0
    assert!(rooms["101"]["price"].is_u64());
    let bookings: serde_json::Value = serde_json::from_slice(&bookings)?;
    assert_eq!(bookings[c.id.as_str()]["price"], 1250.5);
    Ok(())
}
