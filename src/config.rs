//! Centralized configuration for hoteldesk.
//!
//! Goals:
//! - One place for tunables instead of scattering env lookups.
//! - `HotelConfig::from_env()` reads HOTEL_* variables; CLI flags override on top.
//!
//! Defaults:
//! - data_dir = "." (users.json/rooms.json/bookings.json next to the binary's cwd)
//! - pretty_json = true (documents stay human-readable and diffable)
//! - quarantine_rejected = true (malformed records are moved aside, not lost)

use std::fmt;
use std::path::PathBuf;

/// Top-level configuration for a [`crate::Hotel`].
#[derive(Clone, Debug)]
pub struct HotelConfig {
    /// Directory holding the collection documents.
    /// Env: HOTEL_DATA_DIR (default ".")
    pub data_dir: PathBuf,

    /// Pretty-print documents on save (4-space indent is not configurable).
    /// Env: HOTEL_PRETTY_JSON (default true; "0|false|off|no" => false)
    pub pretty_json: bool,

    /// Write malformed records to <collection>.rejected.json on load.
    /// Env: HOTEL_QUARANTINE (default true)
    pub quarantine_rejected: bool,
}

impl Default for HotelConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            pretty_json: true,
            quarantine_rejected: true,
        }
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

impl HotelConfig {
    /// Load configuration from environment variables on top of defaults.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("HOTEL_DATA_DIR") {
            let s = v.trim();
            if !s.is_empty() {
                cfg.data_dir = PathBuf::from(s);
            }
        }

        if let Ok(v) = std::env::var("HOTEL_PRETTY_JSON") {
            if let Some(on) = parse_flag(&v) {
                cfg.pretty_json = on;
            }
        }

        if let Ok(v) = std::env::var("HOTEL_QUARANTINE") {
            if let Some(on) = parse_flag(&v) {
                cfg.quarantine_rejected = on;
            }
        }

        cfg
    }

    pub fn with_data_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_pretty_json(mut self, on: bool) -> Self {
        self.pretty_json = on;
        self
    }

    pub fn with_quarantine_rejected(mut self, on: bool) -> Self {
        self.quarantine_rejected = on;
        self
    }
}

impl fmt::Display for HotelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HotelConfig {{ data_dir: {}, pretty_json: {}, quarantine_rejected: {} }}",
            self.data_dir.display(),
            self.pretty_json,
            self.quarantine_rejected,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_parsing() {
        assert_eq!(parse_flag(" YES "), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn setters_override_defaults() {
        let cfg = HotelConfig::default()
            .with_data_dir("/tmp/hotel")
            .with_pretty_json(false)
            .with_quarantine_rejected(false);
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/hotel"));
        assert!(!cfg.pretty_json);
        assert!(!cfg.quarantine_rejected);
        assert!(cfg.to_string().contains("/tmp/hotel"));
    }
}
