//! util: общие мелкие хелперы.
//!
//! Содержит:
//! - now_local(): текущее локальное время, обрезанное до секунд.
//! - timestamp: serde-формат "%Y-%m-%d %H:%M:%S" для полей created_at/booking_date.

use chrono::{Local, NaiveDateTime, Timelike};

/// Текущее локальное время без долей секунды (так оно и попадёт в JSON).
#[inline]
pub fn now_local() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// serde adapter: NaiveDateTime <-> "YYYY-MM-DD HH:MM:SS".
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::consts::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).map_err(de::Error::custom)
    }
}
