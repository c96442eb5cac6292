//! Общие константы: имена документов в каталоге данных, формат id брони, seed-каталог.

// -------- Documents --------
pub const ACCOUNTS_FILE: &str = "users.json";
pub const ROOMS_FILE: &str = "rooms.json";
pub const BOOKINGS_FILE: &str = "bookings.json";
pub const META_FILE: &str = "meta.json";
pub const LOCK_FILE: &str = "LOCK";

// Suffixes for recovered data (see store::io)
pub const REJECTED_SUFFIX: &str = ".rejected.json";
pub const CORRUPT_SUFFIX: &str = ".corrupt";
pub const TMP_EXT: &str = "tmp";

// -------- Booking ids --------
pub const BOOKING_ID_PREFIX: &str = "BK";
pub const BOOKING_ID_WIDTH: usize = 4;

// -------- Timestamps --------
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// -------- Seed catalog --------
// (room_no, type, price per night)
pub const SEED_ROOMS: [(&str, &str, u64); 8] = [
    ("101", "Single", 1000),
    ("102", "Single", 1000),
    ("103", "Double", 1500),
    ("104", "Double", 1500),
    ("105", "Suite", 3000),
    ("106", "Suite", 3000),
    ("107", "Deluxe", 2000),
    ("108", "Deluxe", 2000),
];
