//! Run configuration and its validation.

use std::path::{Path, PathBuf};
use thiserror::Error;
use vault_index_core::ExclusionSet;
use vault_index_walker::IndexOptions;

/// Why a configuration was rejected.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("vault directory is required")]
    MissingVault,

    #[error("vault directory does not exist: {0}")]
    NotFound(PathBuf),

    #[error("cannot access vault directory '{path}': {source}")]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("vault path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("vault directory must be an absolute path: {0}")]
    NotAbsolute(PathBuf),

    #[error("exclude directory cannot be empty")]
    EmptyExclude,
}

/// Everything `init` needs to run.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub vault_dir: PathBuf,
    pub verbose: bool,
    pub dry_run: bool,
    pub backup: bool,
    pub exclude_dirs: Vec<String>,
}

impl Config {
    /// Checks the vault exists, is an absolute directory, and that no
    /// exclusion pattern is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vault_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingVault);
        }

        let metadata = std::fs::metadata(&self.vault_dir).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(self.vault_dir.clone())
            } else {
                ConfigError::Inaccessible {
                    path: self.vault_dir.clone(),
                    source,
                }
            }
        })?;

        if !metadata.is_dir() {
            return Err(ConfigError::NotADirectory(self.vault_dir.clone()));
        }

        if !self.vault_dir.is_absolute() {
            return Err(ConfigError::NotAbsolute(self.vault_dir.clone()));
        }

        if self.exclude_dirs.iter().any(|d| d.trim().is_empty()) {
            return Err(ConfigError::EmptyExclude);
        }

        Ok(())
    }

    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            dry_run: self.dry_run,
            backup: self.backup,
            exclude: ExclusionSet::new(self.exclude_dirs.iter().cloned()),
        }
    }
}

/// Resolves the `--dir` argument: the working directory when absent,
/// made absolute either way.
pub fn resolve_vault_dir(dir: Option<&Path>) -> std::io::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match dir {
        None => cwd,
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => cwd.join(dir),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config_for(path: &Path) -> Config {
        Config {
            vault_dir: path.to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn test_valid_config() {
        let dir = tempdir().unwrap();
        assert!(config_for(dir.path()).validate().is_ok());
    }

    #[test]
    fn test_missing_vault() {
        let err = Config::default().validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingVault));
    }

    #[test]
    fn test_nonexistent_vault() {
        let dir = tempdir().unwrap();
        let err = config_for(&dir.path().join("nope")).validate().unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_file_is_not_a_vault() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("note.md");
        std::fs::write(&file, "x").unwrap();
        let err = config_for(&file).validate().unwrap_err();
        assert!(matches!(err, ConfigError::NotADirectory(_)));
    }

    #[test]
    fn test_relative_vault_rejected() {
        // "." exists and is a directory, so only the absolute check fails.
        let err = config_for(Path::new(".")).validate().unwrap_err();
        assert!(matches!(err, ConfigError::NotAbsolute(_)));
    }

    #[test]
    fn test_blank_exclude_rejected() {
        let dir = tempdir().unwrap();
        let config = Config {
            exclude_dirs: vec!["templates".into(), "   ".into()],
            ..config_for(dir.path())
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyExclude)));
    }

    #[test]
    fn test_index_options_carry_flags() {
        let config = Config {
            vault_dir: PathBuf::from("/vault"),
            dry_run: true,
            backup: true,
            exclude_dirs: vec!["a".into(), "b".into()],
            ..Config::default()
        };
        let options = config.index_options();
        assert!(options.dry_run);
        assert!(options.backup);
        assert_eq!(options.exclude.patterns(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_resolve_defaults_to_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolve_vault_dir(None).unwrap(), cwd);
        assert_eq!(resolve_vault_dir(Some(Path::new("vault"))).unwrap(), cwd.join("vault"));
    }
}
