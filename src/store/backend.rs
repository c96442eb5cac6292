//! store/backend: куда физически пишутся документы.
//!
//! Backend оперирует целыми документами (имя -> байты): ни частичных
//! обновлений, ни append. FileBackend кладёт документы в каталог данных,
//! MemoryBackend держит их в памяти и умеет имитировать сбой записи.

use anyhow::{anyhow, Context, Result};
use std::collections::{HashMap, HashSet};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::consts::TMP_EXT;

/// Whole-document storage. Single-threaded by contract.
pub trait Backend {
    /// Read a document. Ok(None) if it does not exist.
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>>;
    /// Replace a document entirely.
    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<()>;
    fn exists(&self, name: &str) -> bool;
    /// Human-readable location of a document, for logs and messages.
    fn locate(&self, name: &str) -> String;
}

// -------------------- files --------------------

#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl Backend for FileBackend {
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(name);
        match fs::read(&path) {
            Ok(buf) => Ok(Some(buf)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
        }
    }

    // tmp + rename: документ либо старый, либо новый целиком.
    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(name);
        let tmp = path.with_extension(TMP_EXT);
        {
            let mut f = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&tmp)
                .with_context(|| format!("open tmp {}", tmp.display()))?;
            f.write_all(bytes)
                .with_context(|| format!("write tmp {}", tmp.display()))?;
            f.sync_all()?;
        }
        fs::rename(&tmp, &path)
            .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
        Ok(())
    }

    fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }

    fn locate(&self, name: &str) -> String {
        self.path(name).display().to_string()
    }
}

// -------------------- memory --------------------

/// In-memory backend. `fail_writes_to` makes every later write of that
/// document fail, which is how the dual-write window is exercised in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    docs: HashMap<String, Vec<u8>>,
    failing: HashSet<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes_to(&mut self, name: &str) {
        self.failing.insert(name.to_string());
    }

    pub fn clear_failures(&mut self) {
        self.failing.clear();
    }

    /// Place raw bytes as a document, bypassing serialization.
    pub fn put_raw(&mut self, name: &str, bytes: &[u8]) {
        self.docs.insert(name.to_string(), bytes.to_vec());
    }

    pub fn raw(&self, name: &str) -> Option<&[u8]> {
        self.docs.get(name).map(|v| v.as_slice())
    }
}

impl Backend for MemoryBackend {
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.docs.get(name).cloned())
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        if self.failing.contains(name) {
            return Err(anyhow!("injected write failure for {}", name));
        }
        self.docs.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn exists(&self, name: &str) -> bool {
        self.docs.contains_key(name)
    }

    fn locate(&self, name: &str) -> String {
        format!("mem:{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_write_failure_is_sticky_until_cleared() {
        let mut b = MemoryBackend::new();
        b.write("a.json", b"{}").unwrap();
        b.fail_writes_to("a.json");
        assert!(b.write("a.json", b"[]").is_err());
        assert_eq!(b.raw("a.json"), Some(&b"{}"[..]));
        b.clear_failures();
        b.write("a.json", b"[]").unwrap();
        assert_eq!(b.raw("a.json"), Some(&b"[]"[..]));
    }

    #[test]
    fn file_backend_replaces_whole_document() {
        let root = std::env::temp_dir().join(format!(
            "hoteldesk-backend-{}-{}",
            std::process::id(),
            line!()
        ));
        fs::create_dir_all(&root).unwrap();
        let mut b = FileBackend::new(&root);
        assert_eq!(b.read("x.json").unwrap(), None);
        b.write("x.json", b"{\"long\": 1234567890}").unwrap();
        b.write("x.json", b"{}").unwrap();
        assert_eq!(b.read("x.json").unwrap().as_deref(), Some(&b"{}"[..]));
        assert!(!root.join("x.tmp").exists());
        let _ = fs::remove_dir_all(&root);
    }
}
