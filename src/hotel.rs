//! hotel (фасад): открыть каталог данных и выдать компоненты.
//!
//! Hotel::open():
//! - создаёт каталог при необходимости;
//! - берёт эксклюзивный <root>/LOCK (одна сессия на каталог);
//! - bootstrap документов (пустые accounts/bookings, seed rooms).
//!
//! Компоненты (accounts/rooms/ledger): короткоживущие view поверх общего Store.

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::accounts::AccountDirectory;
use crate::config::HotelConfig;
use crate::doctor::{self, DoctorReport};
use crate::ledger::BookingLedger;
use crate::lock::{try_acquire_session_lock, LockGuard};
use crate::model::{Booking, BookingStatus, Room, RoomStatus};
use crate::rooms::RoomInventory;
use crate::store::bootstrap::bootstrap;
use crate::store::{Backend, BootstrapReport, FileBackend, MemoryBackend, Store, StoreOptions};

pub struct Hotel<B: Backend = FileBackend> {
    store: Store<B>,
    root: Option<PathBuf>,
    bootstrap: BootstrapReport,
    _lock: Option<LockGuard>,
}

/// Counts shown by `hoteldesk status`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HotelStatus {
    pub accounts: usize,
    pub rooms_total: usize,
    pub rooms_available: usize,
    pub rooms_booked: usize,
    pub bookings_total: usize,
    pub bookings_confirmed: usize,
    pub bookings_cancelled: usize,
    pub next_booking_id: String,
}

impl Hotel<FileBackend> {
    pub fn open(root: &Path) -> Result<Self> {
        let cfg = HotelConfig::from_env().with_data_dir(root);
        Self::open_with_config(cfg)
    }

    pub fn open_with_config(cfg: HotelConfig) -> Result<Self> {
        let root = cfg.data_dir.clone();
        if !root.exists() {
            fs::create_dir_all(&root)
                .with_context(|| format!("create data dir {}", root.display()))?;
        }
        let lock = try_acquire_session_lock(&root)?;

        let mut store = Store::new(FileBackend::new(&root), StoreOptions::from(&cfg));
        let report = bootstrap(&mut store)
            .with_context(|| format!("bootstrap data dir {}", root.display()))?;
        debug!("opened {} ({})", root.display(), cfg);

        Ok(Self {
            store,
            root: Some(root),
            bootstrap: report,
            _lock: Some(lock),
        })
    }
}

impl Hotel<MemoryBackend> {
    /// Bootstrapped hotel over an in-memory backend (no files, no lock).
    pub fn in_memory() -> Result<Self> {
        Self::with_backend(MemoryBackend::new())
    }
}

impl<B: Backend> Hotel<B> {
    pub fn with_backend(backend: B) -> Result<Self> {
        let mut store = Store::new(backend, StoreOptions::default());
        let report = bootstrap(&mut store)?;
        Ok(Self {
            store,
            root: None,
            bootstrap: report,
            _lock: None,
        })
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn bootstrap_report(&self) -> &BootstrapReport {
        &self.bootstrap
    }

    pub fn accounts(&mut self) -> AccountDirectory<'_, B> {
        AccountDirectory::new(&mut self.store)
    }

    pub fn rooms(&mut self) -> RoomInventory<'_, B> {
        RoomInventory::new(&mut self.store)
    }

    pub fn ledger(&mut self) -> BookingLedger<'_, B> {
        BookingLedger::new(&mut self.store)
    }

    pub fn doctor(&mut self) -> DoctorReport {
        doctor::check(&mut self.store)
    }

    pub fn store(&self) -> &Store<B> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store<B> {
        &mut self.store
    }

    pub fn status(&mut self) -> HotelStatus {
        let rooms = self.store.load::<Room>();
        let bookings = self.store.load::<Booking>();
        let count_rooms = |s: RoomStatus| rooms.values().filter(|r| r.status == s).count();
        let count_bookings = |s: BookingStatus| bookings.values().filter(|b| b.status == s).count();
        HotelStatus {
            accounts: self.accounts().count(),
            rooms_total: rooms.len(),
            rooms_available: count_rooms(RoomStatus::Available),
            rooms_booked: count_rooms(RoomStatus::Booked),
            bookings_total: bookings.len(),
            bookings_confirmed: count_bookings(BookingStatus::Confirmed),
            bookings_cancelled: count_bookings(BookingStatus::Cancelled),
            next_booking_id: self.ledger().peek_next_id(),
        }
    }
}
