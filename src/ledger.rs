//! ledger (Booking Ledger): бронирование, список, отмена.
//!
//! book():   документы пишутся в порядке meta -> bookings -> rooms;
//! cancel(): bookings -> rooms.
//! Между bookings и rooms атомарности нет: сбой второй записи оставляет
//! номер в старом статусе. Такое расхождение находит только doctor.
//!
//! Id брони: "BK" + порядковый номер. Порядковый номер =
//! max(last_booking_seq из meta, число броней) + 1, дальше пропускаем занятые id.
//! Занятым считается и id записи, ушедшей в карантин (bookings.json.rejected.json):
//! после ручного восстановления она не должна столкнуться с новой бронью.
//! На свежей коллекции это BK0001, BK0002, ...

use log::{info, warn};
use std::collections::HashSet;

use crate::error::{HotelError, HotelResult};
use crate::metrics;
use crate::model::booking::format_booking_id;
use crate::model::{Booking, BookingStatus, Collection, CollectionKind, RoomStatus};
use crate::rooms::RoomInventory;
use crate::session::Session;
use crate::store::{Backend, Store, StoreMeta};
use crate::util::now_local;

/// Successful `book` outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub id: String,
    pub booking: Booking,
}

pub struct BookingLedger<'a, B: Backend> {
    store: &'a mut Store<B>,
}

impl<'a, B: Backend> BookingLedger<'a, B> {
    pub fn new(store: &'a mut Store<B>) -> Self {
        Self { store }
    }

    fn rooms(&mut self) -> RoomInventory<'_, B> {
        RoomInventory::new(&mut *self.store)
    }

    pub fn book(
        &mut self,
        session: &Session,
        room_no: &str,
        check_in: &str,
        check_out: &str,
        guests: &str,
    ) -> HotelResult<Confirmation> {
        let room = self.rooms().get_room(room_no)?;
        if !room.is_available() {
            return Err(HotelError::RoomUnavailable(room_no.to_string()));
        }

        let mut bookings = self.store.load::<Booking>();
        let mut meta = self.store.load_meta();
        let reserved = self.store.reserved_keys(CollectionKind::Bookings);
        let (ordinal, id) = allocate_id(&meta, &bookings, &reserved);

        let booking = Booking {
            username: session.username().to_string(),
            room_no: room_no.to_string(),
            room_type: room.room_type.clone(),
            price: room.price,
            check_in: check_in.to_string(),
            check_out: check_out.to_string(),
            guests: guests.to_string(),
            booking_date: now_local(),
            status: BookingStatus::Confirmed,
        };
        bookings.insert(id.clone(), booking.clone());

        meta.last_booking_seq = ordinal;
        self.store.save_meta(&meta)?;
        self.store.save(&bookings)?;
        self.rooms().set_status(room_no, RoomStatus::Booked)?;

        metrics::record_booking_created();
        info!(
            "booked {} for '{}': room {} ({}, {}/night)",
            id,
            session.username(),
            room_no,
            booking.room_type,
            booking.price
        );
        Ok(Confirmation { id, booking })
    }

    /// Every booking of the session's user, cancelled ones included.
    pub fn list_mine(&mut self, session: &Session) -> Vec<(String, Booking)> {
        self.store
            .load::<Booking>()
            .into_iter()
            .filter(|(_, b)| b.username == session.username())
            .collect()
    }

    pub fn get(&mut self, booking_id: &str) -> Option<Booking> {
        self.store.load::<Booking>().shift_remove(booking_id)
    }

    pub fn list_all(&mut self) -> Collection<Booking> {
        self.store.load::<Booking>()
    }

    /// Cancel a booking. Ownership is checked before the cancelled state, so a
    /// stranger always gets `NotOwner`.
    pub fn cancel(&mut self, session: &Session, booking_id: &str) -> HotelResult<Booking> {
        let mut bookings = self.store.load::<Booking>();
        let booking = bookings
            .get_mut(booking_id)
            .ok_or_else(|| HotelError::BookingNotFound(booking_id.to_string()))?;
        if booking.username != session.username() {
            return Err(HotelError::NotOwner(booking_id.to_string()));
        }
        if booking.status == BookingStatus::Cancelled {
            return Err(HotelError::AlreadyCancelled(booking_id.to_string()));
        }

        booking.status = BookingStatus::Cancelled;
        let cancelled = booking.clone();
        self.store.save(&bookings)?;

        // Номер освобождаем безусловно: при одной активной брони на номер
        // других ссылок на него быть не может.
        match self.rooms().set_status(&cancelled.room_no, RoomStatus::Available) {
            Ok(()) => {}
            Err(HotelError::RoomNotFound(no)) => {
                warn!("cancel {}: room {} no longer exists", booking_id, no);
            }
            Err(e) => return Err(e),
        }

        metrics::record_booking_cancelled();
        info!(
            "cancelled {} for '{}', room {} available",
            booking_id,
            session.username(),
            cancelled.room_no
        );
        Ok(cancelled)
    }

    /// Id the next successful `book` would get.
    pub fn peek_next_id(&mut self) -> String {
        let bookings = self.store.load::<Booking>();
        let meta = self.store.load_meta();
        let reserved = self.store.reserved_keys(CollectionKind::Bookings);
        allocate_id(&meta, &bookings, &reserved).1
    }
}

fn allocate_id(
    meta: &StoreMeta,
    bookings: &Collection<Booking>,
    reserved: &HashSet<String>,
) -> (u64, String) {
    let mut ordinal = meta.last_booking_seq.max(bookings.len() as u64) + 1;
    loop {
        let id = format_booking_id(ordinal);
        if !bookings.contains_key(&id) && !reserved.contains(&id) {
            return (ordinal, id);
        }
        ordinal += 1;
    }
}
