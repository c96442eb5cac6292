//! model: типизированные записи трёх коллекций (accounts, rooms, bookings).
//!
//! Каждая запись реализует [`Record`]: к какой коллекции она относится и какие
//! поля обязаны быть валидными после загрузки. Невалидные записи не попадают в
//! рабочую коллекцию (см. store::io, карантин).

use anyhow::Result;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

use crate::consts::{ACCOUNTS_FILE, BOOKINGS_FILE, ROOMS_FILE};

pub mod account;
pub mod booking;
pub mod room;

pub use account::Account;
pub use booking::{Booking, BookingStatus};
pub use room::{Price, Room, RoomStatus, RoomType};

/// Keyed, insertion-ordered collection as stored in one document.
pub type Collection<T> = IndexMap<String, T>;

/// One of the three persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Accounts,
    Rooms,
    Bookings,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 3] = [Self::Accounts, Self::Rooms, Self::Bookings];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Accounts => ACCOUNTS_FILE,
            Self::Rooms => ROOMS_FILE,
            Self::Bookings => BOOKINGS_FILE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::Rooms => "rooms",
            Self::Bookings => "bookings",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A record type stored in exactly one collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    const KIND: CollectionKind;

    /// Semantic checks beyond what serde enforces. Called per record on load.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}
