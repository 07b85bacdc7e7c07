//! Vault-relative paths.
//!
//! Everything the indexer hands around is relative to the vault root and
//! uses `/` as the separator, whatever the host platform does. The root
//! itself is the empty path.

use serde::Serialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// File name used for the vault root's index.
pub const ROOT_INDEX_NAME: &str = "index.md";

/// Extension of every generated index file.
pub const INDEX_EXTENSION: &str = "md";

/// A directory relative to the vault root.
///
/// The root is represented by the empty string and displays as `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Default)]
#[serde(transparent)]
pub struct DirectoryPath(String);

impl DirectoryPath {
    /// The vault root.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Builds a directory path from a path relative to the vault root.
    ///
    /// `.` components are dropped and separators normalized to `/`, so
    /// `Path::new(".")` and `Path::new("")` both give the root.
    pub fn from_relative(path: &Path) -> Self {
        let parts: Vec<String> = path
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        Self(parts.join("/"))
    }

    /// Builds a directory path for `full`, which must live under `root`.
    pub fn from_full(root: &Path, full: &Path) -> Option<Self> {
        full.strip_prefix(root).ok().map(Self::from_relative)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The `/`-separated relative path; empty for the root.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of components below the root. The root is 0, `notes` is 1,
    /// `notes/sub` is 2.
    pub fn depth(&self) -> usize {
        if self.is_root() {
            0
        } else {
            self.0.matches('/').count() + 1
        }
    }

    /// Last component, or `None` for the root.
    pub fn base_name(&self) -> Option<&str> {
        if self.is_root() {
            None
        } else {
            self.0.rsplit('/').next()
        }
    }

    /// Name of this directory's own index file: `<base>.md`, or
    /// `index.md` for the root.
    pub fn index_file_name(&self) -> String {
        match self.base_name() {
            Some(base) => index_file_name_for(base),
            None => ROOT_INDEX_NAME.to_string(),
        }
    }

    /// Joins a child name onto this path.
    pub fn join(&self, name: &str) -> Self {
        if self.is_root() {
            Self(name.to_string())
        } else {
            Self(format!("{}/{}", self.0, name))
        }
    }

    /// Absolute location of this directory under `root`.
    pub fn to_full(&self, root: &Path) -> PathBuf {
        self.0
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(root.to_path_buf(), |acc, part| acc.join(part))
    }
}

impl fmt::Display for DirectoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, ".")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Index file name for a non-root directory called `dir_name`.
pub fn index_file_name_for(dir_name: &str) -> String {
    format!("{}.{}", dir_name, INDEX_EXTENSION)
}

/// Renders `path` relative to `root` with `/` separators.
///
/// Falls back to the path as given if it is not under `root`.
pub fn relative_slash_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.to_string_lossy().replace(std::path::MAIN_SEPARATOR, "/"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_token() {
        let root = DirectoryPath::from_relative(Path::new("."));
        assert!(root.is_root());
        assert_eq!(root, DirectoryPath::root());
        assert_eq!(root.to_string(), ".");
        assert_eq!(root.depth(), 0);
        assert_eq!(root.base_name(), None);
        assert_eq!(root.index_file_name(), "index.md");
    }

    #[test]
    fn test_depth_counts_components() {
        assert_eq!(DirectoryPath::from_relative(Path::new("notes")).depth(), 1);
        assert_eq!(
            DirectoryPath::from_relative(Path::new("notes/sub/deep")).depth(),
            3
        );
    }

    #[test]
    fn test_index_file_name_uses_base_name() {
        let dir = DirectoryPath::from_relative(Path::new("notes/subfolder"));
        assert_eq!(dir.base_name(), Some("subfolder"));
        assert_eq!(dir.index_file_name(), "subfolder.md");
    }

    #[test]
    fn test_join_and_to_full() {
        let root = Path::new("/vault");
        let dir = DirectoryPath::root().join("notes").join("sub");
        assert_eq!(dir.as_str(), "notes/sub");
        assert_eq!(dir.to_full(root), root.join("notes").join("sub"));
        assert_eq!(DirectoryPath::root().to_full(root), root.to_path_buf());
    }

    #[test]
    fn test_from_full() {
        let root = Path::new("/vault");
        let dir = DirectoryPath::from_full(root, &root.join("a").join("b")).unwrap();
        assert_eq!(dir.as_str(), "a/b");
        assert!(DirectoryPath::from_full(root, Path::new("/elsewhere")).is_none());
    }

    #[test]
    fn test_relative_slash_path() {
        let root = Path::new("/vault");
        let file = root.join("notes").join("file1.md");
        assert_eq!(relative_slash_path(root, &file), "notes/file1.md");
    }
}
