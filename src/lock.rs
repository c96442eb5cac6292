//! File-based locking for the single-session guarantee.
//!
//! Cross-platform (fs2) advisory lock on <data_dir>/LOCK:
//! - one process owns a data directory at a time;
//! - a second `Hotel::open` fails fast instead of racing whole-document writes.
//!
//! Lock is released on Drop.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::consts::LOCK_FILE;

pub struct LockGuard {
    file: std::fs::File,
    path: PathBuf,
}

impl std::fmt::Debug for LockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockGuard").field("path", &self.path).finish()
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        // fs2 unlock errors on drop are ignored deliberately.
        let _ = self.file.unlock();
    }
}

fn lock_file_path(root: &Path) -> PathBuf {
    root.join(LOCK_FILE)
}

/// Try to take the exclusive session lock. Returns Err if another process holds it.
pub fn try_acquire_session_lock(root: &Path) -> Result<LockGuard> {
    let path = lock_file_path(root);
    let file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .open(&path)
        .with_context(|| format!("open lock file {}", path.display()))?;
    file.try_lock_exclusive().with_context(|| {
        format!(
            "data directory is in use by another session ({})",
            path.display()
        )
    })?;
    Ok(LockGuard { file, path })
}
