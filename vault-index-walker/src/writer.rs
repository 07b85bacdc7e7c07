//! Atomic index file writes.
//!
//! Content goes to `<index>.tmp` first and is then renamed over the
//! target, so a reader never sees a half-written index. A failed write
//! never leaves the `.tmp` file behind.

use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use vault_index_core::{IndexError, Result};

/// Suffix of the temporary sibling written before the rename.
const TEMP_SUFFIX: &str = ".tmp";

/// Timestamp layout for backup names, e.g. `20250114_093012`.
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// How an index should be written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteMode {
    /// Log what would be written and touch nothing.
    pub dry_run: bool,

    /// Rename an existing file at the target aside before writing.
    pub backup: bool,
}

/// What `write_index` did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WriteOutcome {
    /// The index now exists on disk.
    Written {
        path: PathBuf,
        entries: usize,
        backup: Option<PathBuf>,
    },
    /// Dry run: nothing was touched.
    Planned { path: PathBuf, entries: usize },
}

impl WriteOutcome {
    pub fn entries(&self) -> usize {
        match self {
            Self::Written { entries, .. } | Self::Planned { entries, .. } => *entries,
        }
    }
}

/// Writes `content` (holding `entries` links) to `path` according to `mode`.
pub fn write_index(path: &Path, content: &str, entries: usize, mode: WriteMode) -> Result<WriteOutcome> {
    write_index_at(path, content, entries, mode, &backup_timestamp())
}

/// Like [`write_index`], naming any backup with the given `timestamp`.
pub fn write_index_at(
    path: &Path,
    content: &str,
    entries: usize,
    mode: WriteMode,
    timestamp: &str,
) -> Result<WriteOutcome> {
    if mode.dry_run {
        info!(entries, "DRY RUN: would create index {}", path.display());
        return Ok(WriteOutcome::Planned {
            path: path.to_path_buf(),
            entries,
        });
    }

    let backup = if mode.backup {
        match backup_existing_file_at(path, timestamp) {
            Ok(backup) => backup,
            Err(e) => {
                warn!("Failed to back up {}: {}", path.display(), e);
                None
            }
        }
    } else {
        None
    };

    write_file_atomic(path, content.as_bytes())?;
    info!(entries, "Created index {}", path.display());

    Ok(WriteOutcome::Written {
        path: path.to_path_buf(),
        entries,
        backup,
    })
}

/// Writes `content` to `path` via a temporary sibling and a rename.
pub fn write_file_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let temp = temp_path_for(path);

    if let Err(source) = fs::write(&temp, content) {
        let _ = fs::remove_file(&temp);
        error!("Failed to write temporary file {}: {}", temp.display(), source);
        return Err(IndexError::WriteTemp { path: temp, source });
    }

    if let Err(source) = fs::rename(&temp, path) {
        let _ = fs::remove_file(&temp);
        error!(
            "Failed to rename {} to {}: {}",
            temp.display(),
            path.display(),
            source
        );
        return Err(IndexError::Rename {
            temp,
            target: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

/// Backs up an existing file at `path`, stamped with the current local time.
///
/// Returns `Ok(None)` when there is nothing to back up.
pub fn backup_existing_file(path: &Path) -> Result<Option<PathBuf>> {
    backup_existing_file_at(path, &backup_timestamp())
}

/// Moves an existing file at `path` to `<path>.backup_<timestamp>`.
pub fn backup_existing_file_at(path: &Path, timestamp: &str) -> Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }

    let backup = backup_path_for(path, timestamp);

    fs::rename(path, &backup).map_err(|source| IndexError::Backup {
        backup: backup.clone(),
        source,
    })?;

    info!("Created backup {} of {}", backup.display(), path.display());
    Ok(Some(backup))
}

/// Local time formatted for backup names.
fn backup_timestamp() -> String {
    chrono::Local::now().format(BACKUP_TIMESTAMP_FORMAT).to_string()
}

/// `<path>.tmp`
pub fn temp_path_for(path: &Path) -> PathBuf {
    with_suffix(path, TEMP_SUFFIX)
}

/// `<path>.backup_<timestamp>`
pub fn backup_path_for(path: &Path, timestamp: &str) -> PathBuf {
    with_suffix(path, &format!(".backup_{}", timestamp))
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
