//! store/bootstrap: первый запуск: создать недостающие документы.
//!
//! accounts/bookings создаются пустыми, rooms: с seed-каталогом
//! (8 номеров, 101..108). Существующие документы не трогаем, даже если они
//! пустые или битые.
//!
//! Новый пустой bookings.json всегда идёт вместе со сброшенным meta.json:
//! иначе счётчик от удалённой коллекции продолжил бы нумерацию.

use anyhow::Result;
use log::info;

use super::{Backend, Store, StoreMeta};
use crate::consts::SEED_ROOMS;
use crate::model::{Account, Booking, Collection, CollectionKind, Room};

/// Which documents were created by [`bootstrap`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub created: Vec<CollectionKind>,
}

impl BootstrapReport {
    pub fn is_fresh(&self) -> bool {
        self.created.len() == CollectionKind::ALL.len()
    }
}

/// The fixed first-run room catalog, in room-number order.
pub fn seed_rooms() -> Collection<Room> {
    SEED_ROOMS
        .iter()
        .map(|&(no, ty, price)| (no.to_string(), Room::new(ty, price)))
        .collect()
}

pub fn bootstrap<B: Backend>(store: &mut Store<B>) -> Result<BootstrapReport> {
    let mut report = BootstrapReport::default();

    if !store.exists(CollectionKind::Accounts) {
        store.save(&Collection::<Account>::new())?;
        report.created.push(CollectionKind::Accounts);
    }
    if !store.exists(CollectionKind::Rooms) {
        store.save(&seed_rooms())?;
        report.created.push(CollectionKind::Rooms);
    }
    if !store.exists(CollectionKind::Bookings) {
        store.save_meta(&StoreMeta::default())?;
        store.save(&Collection::<Booking>::new())?;
        report.created.push(CollectionKind::Bookings);
    }

    if !report.created.is_empty() {
        info!(
            "bootstrap: created {}",
            report
                .created
                .iter()
                .map(|k| k.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    Ok(report)
}
