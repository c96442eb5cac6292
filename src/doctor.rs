//! doctor: read-only consistency scan over rooms vs. bookings.
//!
//! Invariant under check: a room is `booked` iff exactly one confirmed booking
//! references it. Violations appear after a partial dual write (bookings saved,
//! rooms not) or after hand edits. Nothing is repaired here.

use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{Booking, Room, RoomStatus};
use crate::store::{Backend, Store};

#[derive(Debug, Clone, Default, Serialize)]
pub struct DoctorReport {
    pub rooms_checked: usize,
    pub bookings_checked: usize,
    /// Rooms marked booked with no confirmed booking.
    pub booked_without_active: Vec<String>,
    /// Rooms marked available while a confirmed booking references them.
    pub available_with_active: Vec<String>,
    /// Rooms referenced by more than one confirmed booking (room -> booking ids).
    pub multiple_active: Vec<(String, Vec<String>)>,
    /// Confirmed bookings whose room is missing from the catalog.
    pub dangling_bookings: Vec<String>,
}

impl DoctorReport {
    pub fn is_clean(&self) -> bool {
        self.booked_without_active.is_empty()
            && self.available_with_active.is_empty()
            && self.multiple_active.is_empty()
            && self.dangling_bookings.is_empty()
    }

    pub fn problems(&self) -> usize {
        self.booked_without_active.len()
            + self.available_with_active.len()
            + self.multiple_active.len()
            + self.dangling_bookings.len()
    }
}

pub fn check<B: Backend>(store: &mut Store<B>) -> DoctorReport {
    let rooms = store.load::<Room>();
    let bookings = store.load::<Booking>();

    let mut active: IndexMap<&str, Vec<&str>> = IndexMap::new();
    let mut report = DoctorReport {
        rooms_checked: rooms.len(),
        bookings_checked: bookings.len(),
        ..DoctorReport::default()
    };

    for (id, b) in bookings.iter().filter(|(_, b)| b.is_active()) {
        if rooms.contains_key(&b.room_no) {
            active.entry(b.room_no.as_str()).or_default().push(id.as_str());
        } else {
            report.dangling_bookings.push(id.clone());
        }
    }

    for (no, room) in &rooms {
        let refs = active.get(no.as_str()).map(Vec::len).unwrap_or(0);
        match (room.status, refs) {
            (RoomStatus::Booked, 0) => report.booked_without_active.push(no.clone()),
            (RoomStatus::Available, n) if n > 0 => report.available_with_active.push(no.clone()),
            _ => {}
        }
        if refs > 1 {
            let ids = active[no.as_str()].iter().map(|s| s.to_string()).collect();
            report.multiple_active.push((no.clone(), ids));
        }
    }

    report
}
