//! rooms (Room Inventory): каталог номеров и флаг доступности.
//!
//! Менять статус может только ledger (set_status: pub(crate)).

use log::debug;

use crate::error::{HotelError, HotelResult};
use crate::model::{Collection, Room, RoomStatus};
use crate::store::{Backend, Store};

pub struct RoomInventory<'a, B: Backend> {
    store: &'a mut Store<B>,
}

impl<'a, B: Backend> RoomInventory<'a, B> {
    pub fn new(store: &'a mut Store<B>) -> Self {
        Self { store }
    }

    /// Available rooms in catalog order. A snapshot, not a live view.
    pub fn list_available(&mut self) -> Vec<(String, Room)> {
        self.store
            .load::<Room>()
            .into_iter()
            .filter(|(_, r)| r.is_available())
            .collect()
    }

    pub fn list_all(&mut self) -> Collection<Room> {
        self.store.load::<Room>()
    }

    pub fn get_room(&mut self, room_no: &str) -> HotelResult<Room> {
        self.store
            .load::<Room>()
            .shift_remove(room_no)
            .ok_or_else(|| HotelError::RoomNotFound(room_no.to_string()))
    }

    pub(crate) fn set_status(&mut self, room_no: &str, status: RoomStatus) -> HotelResult<()> {
        let mut rooms = self.store.load::<Room>();
        let room = rooms
            .get_mut(room_no)
            .ok_or_else(|| HotelError::RoomNotFound(room_no.to_string()))?;
        room.status = status;
        self.store.save(&rooms)?;
        debug!("room {} -> {}", room_no, status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Price;
    use crate::store::{bootstrap::bootstrap, MemoryBackend, StoreOptions};

    fn seeded() -> Store<MemoryBackend> {
        let mut s = Store::new(MemoryBackend::new(), StoreOptions::default());
        bootstrap(&mut s).unwrap();
        s
    }

    #[test]
    fn available_filter_follows_catalog_order() {
        let mut s = seeded();
        let mut inv = RoomInventory::new(&mut s);
        inv.set_status("103", RoomStatus::Booked).unwrap();
        let nos: Vec<_> = inv.list_available().into_iter().map(|(n, _)| n).collect();
        assert_eq!(nos, vec!["101", "102", "104", "105", "106", "107", "108"]);
    }

    #[test]
    fn list_is_a_snapshot() {
        let mut s = seeded();
        let mut inv = RoomInventory::new(&mut s);
        let before = inv.list_available();
        inv.set_status("101", RoomStatus::Booked).unwrap();
        assert_eq!(before.len(), 8);
        assert!(before[0].1.is_available());
        assert_eq!(inv.list_available().len(), 7);
    }

    #[test]
    fn unknown_room() {
        let mut s = seeded();
        let mut inv = RoomInventory::new(&mut s);
        assert!(matches!(inv.get_room("999"), Err(HotelError::RoomNotFound(n)) if n == "999"));
        assert!(matches!(
            inv.set_status("999", RoomStatus::Booked),
            Err(HotelError::RoomNotFound(_))
        ));
        assert_eq!(inv.get_room("105").unwrap().price, Price::from(3000));
    }
}
