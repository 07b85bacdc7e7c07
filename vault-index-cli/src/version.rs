//! Build information.
//!
//! Release builds set `OBSIDIAN_INDEX_GIT_COMMIT` and
//! `OBSIDIAN_INDEX_BUILD_DATE` at compile time.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub version: &'static str,
    pub git_commit: &'static str,
    pub build_date: &'static str,
}

impl VersionInfo {
    pub fn get() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            git_commit: option_env!("OBSIDIAN_INDEX_GIT_COMMIT").unwrap_or("unknown"),
            build_date: option_env!("OBSIDIAN_INDEX_BUILD_DATE").unwrap_or("unknown"),
        }
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "obsidian-index version {}\n  Git commit: {}\n  Build date: {}",
            self.version, self.git_commit, self.build_date
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lists_all_fields() {
        let text = VersionInfo::get().to_string();
        assert!(text.starts_with(&format!("obsidian-index version {}", env!("CARGO_PKG_VERSION"))));
        assert!(text.contains("Git commit:"));
        assert!(text.contains("Build date:"));
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = serde_json::to_value(VersionInfo::get()).unwrap();
        assert!(json.get("gitCommit").is_some());
        assert!(json.get("buildDate").is_some());
    }
}
