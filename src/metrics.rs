//! Lightweight global metrics for hoteldesk.
//!
//! Атомарные счётчики процесса:
//! - Store (загрузки/сохранения документов, восстановления, карантин)
//! - Ledger (созданные/отменённые брони)

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

// ----- Store -----
static DOCS_LOADED: AtomicU64 = AtomicU64::new(0);
static DOCS_SAVED: AtomicU64 = AtomicU64::new(0);
static LOAD_RECOVERIES: AtomicU64 = AtomicU64::new(0);
static RECORDS_QUARANTINED: AtomicU64 = AtomicU64::new(0);

// ----- Ledger -----
static BOOKINGS_CREATED: AtomicU64 = AtomicU64::new(0);
static BOOKINGS_CANCELLED: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSnapshot {
    pub docs_loaded: u64,
    pub docs_saved: u64,
    /// Documents that were absent-but-expected, unreadable or not JSON.
    pub load_recoveries: u64,
    pub records_quarantined: u64,
    pub bookings_created: u64,
    pub bookings_cancelled: u64,
}

pub fn record_doc_loaded() {
    DOCS_LOADED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_doc_saved() {
    DOCS_SAVED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_load_recovery() {
    LOAD_RECOVERIES.fetch_add(1, Ordering::Relaxed);
}

pub fn record_quarantined(n: usize) {
    RECORDS_QUARANTINED.fetch_add(n as u64, Ordering::Relaxed);
}

pub fn record_booking_created() {
    BOOKINGS_CREATED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_booking_cancelled() {
    BOOKINGS_CANCELLED.fetch_add(1, Ordering::Relaxed);
}

pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        docs_loaded: DOCS_LOADED.load(Ordering::Relaxed),
        docs_saved: DOCS_SAVED.load(Ordering::Relaxed),
        load_recoveries: LOAD_RECOVERIES.load(Ordering::Relaxed),
        records_quarantined: RECORDS_QUARANTINED.load(Ordering::Relaxed),
        bookings_created: BOOKINGS_CREATED.load(Ordering::Relaxed),
        bookings_cancelled: BOOKINGS_CANCELLED.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    DOCS_LOADED.store(0, Ordering::Relaxed);
    DOCS_SAVED.store(0, Ordering::Relaxed);
    LOAD_RECOVERIES.store(0, Ordering::Relaxed);
    RECORDS_QUARANTINED.store(0, Ordering::Relaxed);
    BOOKINGS_CREATED.store(0, Ordering::Relaxed);
    BOOKINGS_CANCELLED.store(0, Ordering::Relaxed);
}
