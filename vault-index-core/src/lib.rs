//! Vault Index Core - paths, links and errors
//!
//! The shared vocabulary of obsidian-index. Nothing here touches the
//! filesystem beyond path arithmetic; walking and writing live in
//! `vault-index-walker`.
//!
//! # Example
//!
//! ```
//! use vault_index_core::{DirectoryPath, LinkReference};
//! use std::path::Path;
//!
//! let dir = DirectoryPath::from_relative(Path::new("notes/subfolder"));
//! assert_eq!(dir.index_file_name(), "subfolder.md");
//!
//! let root = Path::new("/vault");
//! let link = LinkReference::to_path(root, &root.join("notes/file1.md"));
//! assert_eq!(link.to_string(), "[[notes/file1.md]]");
//! ```

pub mod error;
pub mod exclusion;
pub mod link;
pub mod path;

pub use error::{IndexError, Result};
pub use exclusion::ExclusionSet;
pub use link::{render_links, LinkReference};
pub use path::{index_file_name_for, relative_slash_path, DirectoryPath, ROOT_INDEX_NAME};
