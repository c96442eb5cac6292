// Базовые модули
pub mod config;
pub mod consts;
pub mod error;
pub mod lock;
pub mod metrics;
pub mod util;

// Данные и хранилище
pub mod model;  // src/model/{mod,account,room,booking}.rs
pub mod store;  // src/store/{mod,backend,io,bootstrap}.rs

// Компоненты
pub mod accounts;
pub mod doctor;
pub mod ledger;
pub mod rooms;
pub mod session;

// Фасад и интерфейс
pub mod hotel;
pub mod menu;

// Удобные реэкспорты
pub use accounts::AccountDirectory;
pub use config::HotelConfig;
pub use doctor::DoctorReport;
pub use error::{HotelError, HotelResult};
pub use hotel::{Hotel, HotelStatus};
pub use ledger::{BookingLedger, Confirmation};
pub use menu::Menu;
pub use model::{
    Account, Booking, BookingStatus, Collection, CollectionKind, Price, Room, RoomStatus, RoomType,
};
pub use rooms::RoomInventory;
pub use session::Session;
pub use store::{Backend, FileBackend, MemoryBackend, Store};
