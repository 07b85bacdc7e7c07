//! Error types for vault indexing.
//!
//! Every variant carries the path it failed on. The run is all-or-nothing,
//! so whatever reaches the caller is the first fatal failure.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience type for functions that can fail while indexing a vault.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Things that can go wrong while collecting or indexing directories.
#[derive(Error, Debug)]
pub enum IndexError {
    /// Walking the vault hit something other than a permission error.
    #[error("failed to walk '{path}': {source}")]
    Traverse {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Couldn't list the entries of a directory being indexed.
    #[error("failed to read directory '{path}': {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing `<index>.tmp` failed. Nothing exists at the target yet.
    #[error("failed to write temporary file '{path}': {source}")]
    WriteTemp {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Moving the temporary file onto the index path failed.
    #[error("failed to rename temporary file '{temp}' to '{target}': {source}")]
    Rename {
        temp: PathBuf,
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Renaming an existing index aside failed. Only ever logged.
    #[error("failed to create backup '{backup}': {source}")]
    Backup {
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory failed; wraps the underlying cause.
    #[error("failed to index directory '{directory}': {source}")]
    Directory {
        directory: String,
        #[source]
        source: Box<IndexError>,
    },
}

impl IndexError {
    /// Creates a traversal error with the path for context.
    pub fn traverse(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Traverse {
            path: path.into(),
            source,
        }
    }

    /// Creates a directory-listing error with the path for context.
    pub fn read_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadDir {
            path: path.into(),
            source,
        }
    }

    /// Wraps `self` with the relative directory that was being indexed.
    pub fn in_directory(self, directory: impl Into<String>) -> Self {
        Self::Directory {
            directory: directory.into(),
            source: Box::new(self),
        }
    }

    /// True if the underlying I/O failure was a permission problem.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::Traverse { source, .. }
            | Self::ReadDir { source, .. }
            | Self::WriteTemp { source, .. }
            | Self::Rename { source, .. }
            | Self::Backup { source, .. } => {
                source.kind() == std::io::ErrorKind::PermissionDenied
            }
            Self::Directory { source, .. } => source.is_permission_denied(),
        }
    }
}
