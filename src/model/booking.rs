use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::room::{Price, RoomType};
use super::{CollectionKind, Record};
use crate::consts::{BOOKING_ID_PREFIX, BOOKING_ID_WIDTH};
use crate::util::timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        })
    }
}

/// Бронь. Тип и цена номера копируются на момент бронирования: последующая
/// смена цены в rooms.json на старые брони не влияет.
///
/// check_in / check_out / guests хранятся как введены, без валидации.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub username: String,
    pub room_no: String,
    pub room_type: RoomType,
    pub price: Price,
    pub check_in: String,
    pub check_out: String,
    pub guests: String,
    #[serde(with = "timestamp")]
    pub booking_date: NaiveDateTime,
    pub status: BookingStatus,
}

impl Booking {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }
}

impl Record for Booking {
    const KIND: CollectionKind = CollectionKind::Bookings;

    fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(anyhow!("booking has empty username"));
        }
        if self.room_no.is_empty() {
            return Err(anyhow!("booking has empty room_no"));
        }
        Ok(())
    }
}

/// "BK" + zero-padded ordinal. Ordinals past the pad width simply widen.
pub fn format_booking_id(ordinal: u64) -> String {
    format!(
        "{}{:0width$}",
        BOOKING_ID_PREFIX,
        ordinal,
        width = BOOKING_ID_WIDTH
    )
}
