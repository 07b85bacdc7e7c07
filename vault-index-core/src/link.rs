//! Wiki-style link references.

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::path::relative_slash_path;

/// A `[[relative/path]]` link, stored without the brackets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LinkReference(String);

impl LinkReference {
    /// Links to `target`, rendered relative to the vault `root`.
    pub fn to_path(root: &Path, target: &Path) -> Self {
        Self(relative_slash_path(root, target))
    }

    /// The vault-relative target, e.g. `notes/file1.md`.
    pub fn target(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[[{}]]", self.0)
    }
}

/// Renders index file content: one link per line, trailing newline.
pub fn render_links(links: &[LinkReference]) -> String {
    let mut out = String::new();
    for link in links {
        out.push_str(&link.to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_renders_with_brackets() {
        let root = Path::new("/vault");
        let link = LinkReference::to_path(root, &root.join("notes").join("file1.md"));
        assert_eq!(link.target(), "notes/file1.md");
        assert_eq!(link.to_string(), "[[notes/file1.md]]");
    }

    #[test]
    fn test_render_links_has_trailing_newline() {
        let root = Path::new("/vault");
        let links = vec![
            LinkReference::to_path(root, &root.join("a.md")),
            LinkReference::to_path(root, &root.join("sub").join("sub.md")),
        ];
        assert_eq!(render_links(&links), "[[a.md]]\n[[sub/sub.md]]\n");
    }

    #[test]
    fn test_render_no_links_is_empty() {
        assert_eq!(render_links(&[]), "");
    }
}
