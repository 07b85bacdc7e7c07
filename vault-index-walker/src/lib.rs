//! Vault Index Walker - directory collection and index generation
//!
//! This crate handles the file system side of things:
//! - Walking the vault to find directories worth indexing
//! - Writing one markdown index per directory, leaves first
//! - Atomic writes with optional backups and dry runs
//!
//! Hidden directories and user exclusions are never entered.

mod collector;
mod indexer;
mod writer;

pub use collector::{collect_directories, sort_by_depth};
pub use indexer::{
    index_vault, DirectoryEntry, DirectoryOutcome, IndexOptions, IndexReport, VaultIndexer,
};
pub use writer::{
    backup_existing_file, backup_existing_file_at, backup_path_for, temp_path_for,
    write_file_atomic, write_index, write_index_at, WriteMode, WriteOutcome,
};
