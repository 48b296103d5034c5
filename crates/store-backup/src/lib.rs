//! Backup and restore for a single state-store file
//!
//! The store is opaque: backups are timestamped copies in a sibling backup
//! directory, and restoring copies a chosen backup over the live file after
//! snapshotting the current state first. Nothing here parses the store.
//!
//! Naming: `<stem>_backup_<TS>.<ext>` for backups taken before a write,
//! `<stem>_pre_restore_<TS>.<ext>` for the safety snapshot taken before a
//! restore, with `TS` = `YYYYMMDD_HHMMSS` local time.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Backup timestamp format, second resolution, local time
const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Result type alias for backup operations
pub type BackupResult<T> = Result<T, BackupError>;

/// Errors that can occur while backing up or restoring the store
#[derive(Error, Debug)]
pub enum BackupError {
    /// The live store file does not exist
    #[error("store file not found at {path}")]
    MissingStore { path: PathBuf },

    /// The requested backup does not exist
    #[error("backup not found at {path}")]
    MissingBackup { path: PathBuf },

    /// No backups exist to restore from
    #[error("no backups found in {dir}")]
    NoBackups { dir: PathBuf },

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One backup file, as listed
#[derive(Debug, Clone, Serialize)]
pub struct BackupEntry {
    /// File name inside the backup directory
    pub file_name: String,
    /// Full path
    pub path: PathBuf,
    /// Size in bytes
    pub size_bytes: u64,
    /// Last modification time
    pub modified: DateTime<Local>,
}

impl BackupEntry {
    /// Size in megabytes, for listings
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// What a restore did
#[derive(Debug, Clone, Serialize)]
pub struct RestoreReceipt {
    /// Backup that was restored
    pub restored_from: PathBuf,
    /// Safety snapshot of the pre-restore state, if one was taken
    pub pre_restore_snapshot: Option<PathBuf>,
}

/// A live store file together with its backup directory
pub struct BackupSet {
    store_path: PathBuf,
    backup_dir: PathBuf,
}

impl BackupSet {
    pub fn new(store_path: impl Into<PathBuf>, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
            backup_dir: backup_dir.into(),
        }
    }

    /// The live store file
    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// The backup directory
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    fn stamped_name(&self, tag: &str) -> String {
        let stem = self
            .store_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "store".to_string());
        let stamp = Local::now().format(STAMP_FORMAT);
        match self.store_path.extension() {
            Some(ext) => format!("{}_{}_{}.{}", stem, tag, stamp, ext.to_string_lossy()),
            None => format!("{}_{}_{}", stem, tag, stamp),
        }
    }

    /// Copy the live store into the backup directory, creating the
    /// directory on demand. Fails if the store file does not exist.
    pub fn create_backup(&self) -> BackupResult<PathBuf> {
        if !self.store_path.is_file() {
            return Err(BackupError::MissingStore {
                path: self.store_path.clone(),
            });
        }

        fs::create_dir_all(&self.backup_dir)?;
        let dest = self.backup_dir.join(self.stamped_name("backup"));
        fs::copy(&self.store_path, &dest)?;
        debug!(backup = %dest.display(), "created backup");
        Ok(dest)
    }

    /// All backups and snapshots in the backup directory, newest first.
    /// Only files sharing the store's extension are considered.
    pub fn list(&self) -> BackupResult<Vec<BackupEntry>> {
        if !self.backup_dir.is_dir() {
            return Ok(Vec::new());
        }

        let store_ext = self.store_path.extension().map(|e| e.to_os_string());
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backup_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || path.extension().map(|e| e.to_os_string()) != store_ext {
                continue;
            }
            let meta = entry.metadata()?;
            entries.push(BackupEntry {
                file_name: entry.file_name().to_string_lossy().into_owned(),
                path,
                size_bytes: meta.len(),
                modified: meta.modified()?.into(),
            });
        }

        // Newest first; names embed the timestamp, so they break ties from
        // same-second backups.
        entries.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| b.file_name.cmp(&a.file_name))
        });
        Ok(entries)
    }

    /// The most recent backup, if any
    pub fn latest(&self) -> BackupResult<Option<BackupEntry>> {
        Ok(self.list()?.into_iter().next())
    }

    /// Copy a backup over the live store. The current store state, if any,
    /// is first snapshotted into the backup directory so the restore itself
    /// can be undone.
    pub fn restore(&self, backup_path: &Path) -> BackupResult<RestoreReceipt> {
        if !backup_path.is_file() {
            return Err(BackupError::MissingBackup {
                path: backup_path.to_path_buf(),
            });
        }

        let snapshot = if self.store_path.is_file() {
            fs::create_dir_all(&self.backup_dir)?;
            let dest = self.backup_dir.join(self.stamped_name("pre_restore"));
            fs::copy(&self.store_path, &dest)?;
            debug!(snapshot = %dest.display(), "snapshotted pre-restore state");
            Some(dest)
        } else {
            None
        };

        if let Some(parent) = self.store_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(backup_path, &self.store_path)?;
        debug!(backup = %backup_path.display(), "restored store");

        Ok(RestoreReceipt {
            restored_from: backup_path.to_path_buf(),
            pre_restore_snapshot: snapshot,
        })
    }

    /// Restore the most recent backup
    pub fn restore_latest(&self) -> BackupResult<RestoreReceipt> {
        let latest = self.latest()?.ok_or_else(|| BackupError::NoBackups {
            dir: self.backup_dir.clone(),
        })?;
        self.restore(&latest.path)
    }
}
