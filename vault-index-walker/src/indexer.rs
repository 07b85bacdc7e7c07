//! Bottom-up vault indexing.
//!
//! Directories are processed deepest first. A parent links to a child
//! directory only when the child's index file is already on disk, so
//! the processing order is what makes the links come out right.

use crate::collector::{collect_directories, is_indexable_directory, sort_by_depth};
use crate::writer::{write_index, WriteMode, WriteOutcome};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use vault_index_core::{
    index_file_name_for, render_links, DirectoryPath, ExclusionSet, IndexError, LinkReference,
    Result,
};

/// Options for indexing a vault.
#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    /// Decide everything, write nothing.
    pub dry_run: bool,

    /// Rename an existing index aside before writing.
    pub backup: bool,

    /// Directories to leave out entirely.
    pub exclude: ExclusionSet,
}

impl IndexOptions {
    fn write_mode(&self) -> WriteMode {
        WriteMode {
            dry_run: self.dry_run,
            backup: self.backup,
        }
    }
}

/// One child of a directory being indexed.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub name: String,
    pub is_dir: bool,
    pub path: PathBuf,
}

/// What happened to a single directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryOutcome {
    /// Nothing to link; no index file and nothing for the parent.
    Empty,

    /// An index file was already there and was left alone.
    AlreadyIndexed(PathBuf),

    /// A new index was written (or planned, in a dry run).
    Created(WriteOutcome),
}

/// Result of indexing a vault.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexReport {
    /// The vault that was indexed.
    pub vault: PathBuf,

    pub dry_run: bool,

    /// Directories in the order they were processed, deepest first.
    pub processed: Vec<DirectoryPath>,

    /// Index files written this run.
    pub created: Vec<PathBuf>,

    /// Index files a dry run would have written.
    pub planned: Vec<PathBuf>,

    /// Index files that already existed and were skipped.
    pub already_indexed: Vec<PathBuf>,

    /// Directories with nothing to link.
    pub empty: Vec<DirectoryPath>,

    /// Backups made of files sitting at an index path.
    pub backups: Vec<PathBuf>,

    /// Links across all created (or planned) index files.
    pub links: usize,

    /// Time taken in milliseconds.
    pub duration_ms: u64,
}

impl IndexReport {
    fn record(&mut self, dir: &DirectoryPath, outcome: DirectoryOutcome) {
        self.processed.push(dir.clone());
        match outcome {
            DirectoryOutcome::Empty => self.empty.push(dir.clone()),
            DirectoryOutcome::AlreadyIndexed(path) => self.already_indexed.push(path),
            DirectoryOutcome::Created(outcome) => {
                self.links += outcome.entries();
                match outcome {
                    WriteOutcome::Planned { path, .. } => self.planned.push(path),
                    WriteOutcome::Written { path, backup, .. } => {
                        self.created.push(path);
                        self.backups.extend(backup);
                    }
                }
            }
        }
    }
}

/// Generates index files for every directory of one vault.
pub struct VaultIndexer {
    root: PathBuf,
    options: IndexOptions,
}

impl VaultIndexer {
    /// `root` must be an absolute path to an existing directory.
    pub fn new(root: impl Into<PathBuf>, options: IndexOptions) -> Self {
        Self {
            root: root.into(),
            options,
        }
    }

    /// Collects the vault's directories and indexes them leaves first.
    pub fn start(&self) -> Result<IndexReport> {
        let directories = collect_directories(&self.root, &self.options.exclude).map_err(|e| {
            error!("Failed to collect directories: {}", e);
            e
        })?;
        self.run(directories)
    }

    /// Indexes `directories`, deepest first. Stops at the first failure.
    pub fn run(&self, mut directories: Vec<DirectoryPath>) -> Result<IndexReport> {
        let start = Instant::now();
        sort_by_depth(&mut directories);

        info!("Indexing {} directories in {}", directories.len(), self.root.display());

        let mut report = IndexReport {
            vault: self.root.clone(),
            dry_run: self.options.dry_run,
            ..IndexReport::default()
        };

        for dir in &directories {
            let outcome = self.index_directory(dir).map_err(|e| {
                error!("Failed to index directory {}: {}", dir, e);
                e.in_directory(dir.to_string())
            })?;
            report.record(dir, outcome);
        }

        let duration = start.elapsed();
        report.duration_ms = duration.as_millis() as u64;

        info!(
            "Indexed {} directories: {} created, {} planned, {} already indexed, {} empty in {:?}",
            report.processed.len(),
            report.created.len(),
            report.planned.len(),
            report.already_indexed.len(),
            report.empty.len(),
            duration
        );

        Ok(report)
    }

    /// Builds the index for one directory if it has anything to link and
    /// doesn't have an index yet.
    pub fn index_directory(&self, dir: &DirectoryPath) -> Result<DirectoryOutcome> {
        let full_path = dir.to_full(&self.root);
        let entries = read_entries(&full_path)?;
        let own_index = dir.index_file_name();

        let mut links = Vec::new();
        for entry in &entries {
            if entry.name == own_index {
                continue;
            }

            if entry.is_dir {
                if !is_indexable_directory(&dir.join(&entry.name), &self.options.exclude) {
                    continue;
                }
                let child_index = entry.path.join(index_file_name_for(&entry.name));
                if child_index.exists() {
                    links.push(LinkReference::to_path(&self.root, &child_index));
                } else {
                    debug!("No index in {}, not linking it", entry.path.display());
                }
            } else {
                links.push(LinkReference::to_path(&self.root, &entry.path));
            }
        }

        if links.is_empty() {
            debug!("Nothing to index in {}", dir);
            return Ok(DirectoryOutcome::Empty);
        }

        let index_path = full_path.join(&own_index);
        if index_path.exists() {
            debug!("Index {} already exists, skipping", index_path.display());
            return Ok(DirectoryOutcome::AlreadyIndexed(index_path));
        }

        let content = render_links(&links);
        let outcome = write_index(&index_path, &content, links.len(), self.options.write_mode())?;
        Ok(DirectoryOutcome::Created(outcome))
    }
}

/// Collects a vault's directories and indexes them leaves first.
///
/// # Example
///
/// ```no_run
/// use vault_index_walker::{index_vault, IndexOptions};
/// use std::path::Path;
///
/// let report = index_vault(Path::new("/home/me/vault"), IndexOptions::default()).unwrap();
/// println!("Created {} index files", report.created.len());
/// ```
pub fn index_vault(root: &Path, options: IndexOptions) -> Result<IndexReport> {
    VaultIndexer::new(root, options).start()
}

/// Lists the immediate children of `dir`, sorted by name.
///
/// Names that aren't valid UTF-8 are skipped: a lossy rendering would link
/// to a file that doesn't exist.
fn read_entries(dir: &Path) -> Result<Vec<DirectoryEntry>> {
    let read = |e: std::io::Error| {
        error!("Failed to read directory {}: {}", dir.display(), e);
        IndexError::read_dir(dir, e)
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(read)? {
        let entry = entry.map_err(read)?;
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                warn!("Skipping non UTF-8 name {:?} in {}", raw, dir.display());
                continue;
            }
        };
        let file_type = entry.file_type().map_err(read)?;
        entries.push(DirectoryEntry {
            name,
            is_dir: file_type.is_dir(),
            path: entry.path(),
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
