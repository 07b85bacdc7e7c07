//! Directory collection.
//!
//! One depth-first walk over the vault that yields every directory worth
//! indexing. Hidden and excluded directories are pruned, so nothing below
//! them is ever visited.

use std::collections::HashSet;
use std::io;
use std::path::Path;
use tracing::{debug, error, warn};
use vault_index_core::{DirectoryPath, ExclusionSet, IndexError, Result};
use walkdir::WalkDir;

/// Walks `root` and returns every directory to index, in traversal order.
///
/// The root itself is always included as [`DirectoryPath::root`]. A
/// directory that can't be listed because of permissions is logged and
/// left out; any other walk error aborts the collection.
pub fn collect_directories(root: &Path, exclusions: &ExclusionSet) -> Result<Vec<DirectoryPath>> {
    let mut directories = Vec::new();
    let mut unreadable: HashSet<DirectoryPath> = HashSet::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            if !entry.file_type().is_dir() {
                return false;
            }
            keep_directory(root, entry.path(), exclusions)
        });

    for entry in walker {
        match entry {
            Ok(entry) => {
                if !entry.file_type().is_dir() {
                    continue;
                }
                if let Some(dir) = DirectoryPath::from_full(root, entry.path()) {
                    directories.push(dir);
                }
            }
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                let message = err.to_string();
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other(message));
                let err = IndexError::traverse(path.clone(), source);

                if err.is_permission_denied() {
                    warn!("Permission denied, skipping {}: {}", path.display(), err);
                    if let Some(dir) = DirectoryPath::from_full(root, &path) {
                        unreadable.insert(dir);
                    }
                    continue;
                }

                error!("Error walking {}: {}", path.display(), err);
                return Err(err);
            }
        }
    }

    if !unreadable.is_empty() {
        directories.retain(|dir| !unreadable.contains(dir));
    }

    debug!("Collected {} directories under {}", directories.len(), root.display());
    Ok(directories)
}

/// Sorts directories deepest first. Equal depths keep their order.
pub fn sort_by_depth(directories: &mut [DirectoryPath]) {
    directories.sort_by(|a, b| b.depth().cmp(&a.depth()));
}

fn keep_directory(root: &Path, path: &Path, exclusions: &ExclusionSet) -> bool {
    match DirectoryPath::from_full(root, path) {
        Some(dir) => is_indexable_directory(&dir, exclusions),
        None => false,
    }
}

/// False for hidden directories and directories matched by `exclusions`.
///
/// Shared by the walk and by link assembly, so a skipped directory is
/// neither traversed nor linked from its parent. The root always passes.
pub(crate) fn is_indexable_directory(dir: &DirectoryPath, exclusions: &ExclusionSet) -> bool {
    if dir.base_name().is_some_and(|name| name.starts_with('.')) {
        debug!("Skipping hidden directory {}", dir);
        return false;
    }

    if let Some(pattern) = exclusions.matching_pattern(dir) {
        debug!("Excluding {} (matches '{}')", dir, pattern);
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn names(dirs: &[DirectoryPath]) -> Vec<&str> {
        dirs.iter().map(DirectoryPath::as_str).collect()
    }

    #[test]
    fn test_collect_includes_root() {
        let dir = tempdir().unwrap();
        let dirs = collect_directories(dir.path(), &ExclusionSet::default()).unwrap();
        assert_eq!(dirs, vec![DirectoryPath::root()]);
    }

    #[test]
    fn test_collect_skips_hidden_and_files() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".obsidian").join("plugins")).unwrap();
        fs::create_dir_all(dir.path().join("notes").join(".trash")).unwrap();
        fs::write(dir.path().join("notes").join("a.md"), "a").unwrap();

        let dirs = collect_directories(dir.path(), &ExclusionSet::default()).unwrap();

        let mut got = names(&dirs);
        got.sort();
        assert_eq!(got, vec!["", "notes"]);
    }

    #[test]
    fn test_collect_prunes_excluded_subtrees() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("templates").join("inner")).unwrap();
        fs::create_dir_all(dir.path().join("projects").join("archive-2023")).unwrap();
        fs::create_dir_all(dir.path().join("projects").join("live")).unwrap();

        let exclusions = ExclusionSet::new(["templates", "archive"]);
        let dirs = collect_directories(dir.path(), &exclusions).unwrap();

        let mut got = names(&dirs);
        got.sort();
        assert_eq!(got, vec!["", "projects", "projects/live"]);
    }

    #[test]
    fn test_collect_missing_root_is_fatal() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = collect_directories(&missing, &ExclusionSet::default()).unwrap_err();
        assert!(matches!(err, IndexError::Traverse { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_skips_unreadable_directory() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir_all(locked.join("inner")).unwrap();
        fs::create_dir(dir.path().join("open")).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores permission bits; nothing to observe in that case.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = collect_directories(dir.path(), &ExclusionSet::default());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let mut got = names(&result.unwrap()).into_iter().map(String::from).collect::<Vec<_>>();
        got.sort();
        assert_eq!(got, vec!["".to_string(), "open".to_string()]);
    }

    #[test]
    fn test_indexable_directory_filter() {
        let exclusions = ExclusionSet::new(["archive"]);
        let dir = |p: &str| DirectoryPath::from_relative(Path::new(p));

        assert!(is_indexable_directory(&DirectoryPath::root(), &exclusions));
        assert!(is_indexable_directory(&dir("notes"), &exclusions));
        assert!(!is_indexable_directory(&dir(".obsidian"), &exclusions));
        assert!(!is_indexable_directory(&dir("notes/.trash"), &exclusions));
        assert!(!is_indexable_directory(&dir("notes/archive"), &exclusions));
    }

    #[test]
    fn test_sort_by_depth_is_deepest_first_and_stable() {
        let mut dirs: Vec<DirectoryPath> = ["", "a", "a/b", "c", "a/b/c", "c/d"]
            .iter()
            .map(|p| DirectoryPath::from_relative(Path::new(p)))
            .collect();

        sort_by_depth(&mut dirs);

        assert_eq!(names(&dirs), vec!["a/b/c", "a/b", "c/d", "a", "c", ""]);
    }
}
