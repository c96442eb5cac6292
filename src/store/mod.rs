//! store (Persistence Store): три независимые коллекции целыми документами.
//!
//! Подмодули:
//! - backend.rs  : Backend trait, FileBackend (каталог), MemoryBackend (тесты)
//! - io.rs       : разбор/сборка документа, по-записная валидация
//! - bootstrap.rs: первый запуск: пустые accounts/bookings, seed-каталог rooms
//!
//! Контракт:
//! - load() никогда не падает: отсутствующий/нечитаемый/не-JSON документ даёт
//!   пустую коллекцию (с warn в лог и копией байт в <file>.corrupt);
//! - save() полностью заменяет документ; атомарности между документами нет.

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::config::HotelConfig;
use crate::consts::{CORRUPT_SUFFIX, META_FILE, REJECTED_SUFFIX};
use crate::metrics;
use crate::model::{Collection, CollectionKind, Record};

pub mod backend;
pub mod bootstrap;
pub mod io;

pub use backend::{Backend, FileBackend, MemoryBackend};
pub use bootstrap::{seed_rooms, BootstrapReport};
use io::{decode_document, encode_document, Decoded, Rejected};

/// Small side document next to the collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreMeta {
    /// Highest booking ordinal ever handed out (0 = none yet).
    #[serde(default)]
    pub last_booking_seq: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct StoreOptions {
    pub pretty_json: bool,
    pub quarantine_rejected: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            pretty_json: true,
            quarantine_rejected: true,
        }
    }
}

impl From<&HotelConfig> for StoreOptions {
    fn from(cfg: &HotelConfig) -> Self {
        Self {
            pretty_json: cfg.pretty_json,
            quarantine_rejected: cfg.quarantine_rejected,
        }
    }
}

pub struct Store<B: Backend = FileBackend> {
    backend: B,
    opts: StoreOptions,
    // rejected keys already reported by this process
    reported: HashSet<(CollectionKind, String)>,
}

impl<B: Backend> Store<B> {
    pub fn new(backend: B, opts: StoreOptions) -> Self {
        Self {
            backend,
            opts,
            reported: HashSet::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Load a whole collection. Never fails; see module docs.
    pub fn load<T: Record>(&mut self) -> Collection<T> {
        let kind = T::KIND;
        let name = kind.file_name();
        let bytes = match self.backend.read(name) {
            Ok(Some(b)) => b,
            Ok(None) => {
                debug!("load {}: {} absent, empty", kind, self.backend.locate(name));
                metrics::record_load_recovery();
                return Collection::new();
            }
            Err(e) => {
                warn!("load {}: unreadable, treating as empty: {:#}", kind, e);
                metrics::record_load_recovery();
                return Collection::new();
            }
        };
        metrics::record_doc_loaded();

        match decode_document::<T>(&bytes) {
            Decoded::Ok { records, rejected } => {
                if !rejected.is_empty() {
                    self.quarantine(kind, &rejected);
                }
                debug!("load {}: {} record(s)", kind, records.len());
                records
            }
            Decoded::Unreadable(reason) => {
                warn!(
                    "load {}: {} is not a valid document ({}), treating as empty",
                    kind,
                    self.backend.locate(name),
                    reason
                );
                metrics::record_load_recovery();
                self.preserve_corrupt(name, &bytes);
                Collection::new()
            }
        }
    }

    /// Replace a whole collection document.
    pub fn save<T: Record>(&mut self, records: &Collection<T>) -> Result<()> {
        let kind = T::KIND;
        let name = kind.file_name();
        let bytes = encode_document(records, self.opts.pretty_json)
            .with_context(|| format!("encode {kind}"))?;
        self.backend
            .write(name, &bytes)
            .with_context(|| format!("save {} to {}", kind, self.backend.locate(name)))?;
        metrics::record_doc_saved();
        debug!("save {}: {} record(s)", kind, records.len());
        Ok(())
    }

    pub fn exists(&self, kind: CollectionKind) -> bool {
        self.backend.exists(kind.file_name())
    }

    /// Keys taken in a collection even if `load` does not return them: every
    /// key of the raw document (rejected records included) plus the keys
    /// already moved to `<file>.rejected.json`.
    pub fn reserved_keys(&self, kind: CollectionKind) -> HashSet<String> {
        let mut keys = self.object_keys(kind.file_name());
        keys.extend(self.object_keys(&rejected_name(kind)));
        keys
    }

    fn object_keys(&self, name: &str) -> HashSet<String> {
        match self.backend.read(name) {
            Ok(Some(b)) => serde_json::from_slice::<Map<String, Value>>(&b)
                .map(|m| m.into_iter().map(|(k, _)| k).collect())
                .unwrap_or_default(),
            _ => HashSet::new(),
        }
    }

    // ---------- meta ----------

    pub fn load_meta(&mut self) -> StoreMeta {
        match self.backend.read(META_FILE) {
            Ok(Some(b)) => match serde_json::from_slice::<StoreMeta>(&b) {
                Ok(m) => m,
                Err(e) => {
                    warn!("meta: unreadable ({}), falling back to defaults", e);
                    StoreMeta::default()
                }
            },
            Ok(None) => StoreMeta::default(),
            Err(e) => {
                warn!("meta: {:#}, falling back to defaults", e);
                StoreMeta::default()
            }
        }
    }

    pub fn save_meta(&mut self, meta: &StoreMeta) -> Result<()> {
        let bytes = encode_document(meta, self.opts.pretty_json)?;
        self.backend
            .write(META_FILE, &bytes)
            .with_context(|| format!("save meta to {}", self.backend.locate(META_FILE)))
    }

    // ---------- recovery side files ----------

    // Отбракованные записи дописываются в <collection>.rejected.json (по ключу).
    // Ключ, который уже есть в side-файле или уже был отброшен в этом процессе,
    // не пишется и не считается повторно. Возвращает число новых записей.
    fn quarantine(&mut self, kind: CollectionKind, rejected: &[Rejected]) -> usize {
        let name = rejected_name(kind);
        let mut doc: Map<String, Value> = match self.backend.read(&name) {
            Ok(Some(b)) => serde_json::from_slice(&b).unwrap_or_default(),
            _ => Map::new(),
        };

        let mut fresh = Vec::new();
        for r in rejected {
            let first_time = self.reported.insert((kind, r.key.clone()));
            if first_time && !doc.contains_key(&r.key) {
                warn!("load {}: record '{}' rejected: {}", kind, r.key, r.reason);
                fresh.push(r);
            } else {
                debug!("load {}: record '{}' already quarantined", kind, r.key);
            }
        }
        if fresh.is_empty() {
            return 0;
        }
        metrics::record_quarantined(fresh.len());
        if !self.opts.quarantine_rejected {
            return fresh.len();
        }

        for r in &fresh {
            let mut entry = Map::new();
            entry.insert("reason".into(), Value::String(r.reason.clone()));
            entry.insert("record".into(), r.raw.clone());
            doc.insert(r.key.clone(), Value::Object(entry));
        }
        let res = encode_document(&doc, self.opts.pretty_json)
            .and_then(|bytes| self.backend.write(&name, &bytes));
        if let Err(e) = res {
            warn!("quarantine {}: could not write {}: {:#}", kind, name, e);
        }
        fresh.len()
    }

    fn preserve_corrupt(&mut self, name: &str, bytes: &[u8]) {
        if !self.opts.quarantine_rejected {
            return;
        }
        let target = format!("{name}{CORRUPT_SUFFIX}");
        if let Err(e) = self.backend.write(&target, bytes) {
            warn!("could not preserve {} as {}: {:#}", name, target, e);
        }
    }
}

fn rejected_name(kind: CollectionKind) -> String {
    format!("{}{}", kind.file_name(), REJECTED_SUFFIX)
}
