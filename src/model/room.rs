use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

use super::{CollectionKind, Record};

/// Room category. Known names map to dedicated variants; any other name is
/// kept verbatim so new categories can be added to rooms.json by hand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoomType {
    Single,
    Double,
    Suite,
    Deluxe,
    Other(String),
}

impl RoomType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Single => "Single",
            Self::Double => "Double",
            Self::Suite => "Suite",
            Self::Deluxe => "Deluxe",
            Self::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for RoomType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Single" => Self::Single,
            "Double" => Self::Double,
            "Suite" => Self::Suite,
            "Deluxe" => Self::Deluxe,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for RoomType {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<RoomType> for String {
    fn from(t: RoomType) -> Self {
        match t {
            RoomType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Available,
    Booked,
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Available => "available",
            Self::Booked => "booked",
        })
    }
}

/// Цена за ночь в том виде, в каком она записана в документе: целые остаются
/// целыми (1000), дробные сохраняются как есть (1250.5).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Number);

impl Price {
    /// None for NaN/infinite values, which JSON cannot carry.
    pub fn from_f64(v: f64) -> Option<Self> {
        Number::from_f64(v).map(Self)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.0.as_f64()
    }

    pub fn is_positive(&self) -> bool {
        self.0.as_f64().map_or(false, |p| p > 0.0)
    }
}

impl From<u64> for Price {
    fn from(v: u64) -> Self {
        Self(Number::from(v))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad: column width in room tables
        f.pad(&self.0.to_string())
    }
}

/// Номер в каталоге. Ключ коллекции: номер комнаты ("101").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    #[serde(rename = "type")]
    pub room_type: RoomType,
    /// Price per night.
    pub price: Price,
    pub status: RoomStatus,
}

impl Room {
    pub fn new(room_type: impl Into<RoomType>, price: u64) -> Self {
        Self {
            room_type: room_type.into(),
            price: Price::from(price),
            status: RoomStatus::Available,
        }
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.status == RoomStatus::Available
    }
}

impl Record for Room {
    const KIND: CollectionKind = CollectionKind::Rooms;

    fn validate(&self) -> Result<()> {
        if !self.price.is_positive() {
            return Err(anyhow!("room price must be > 0"));
        }
        if self.room_type.as_str().trim().is_empty() {
            return Err(anyhow!("room type must not be empty"));
        }
        Ok(())
    }
}
