//! Tab management for multi-document editing
//!
//! This module provides the core tab infrastructure including:
//! - `Tab`: one open editing buffer with its own content and save state
//! - `TabCollection`: the ordered set of tabs plus the active selection
//! - `TabId`: unique identifier for each tab
//! - `TabPath`: where a tab is stored, or that it never has been

mod id;
mod manager;

pub use id::TabId;
pub use manager::{ClosedTab, TabCollection};

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Storage location of a tab.
///
/// `Untitled` is the explicit "never saved" state, so saved and unsaved
/// buffers are distinguished by type rather than by an empty path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TabPath {
    #[default]
    Untitled,
    File(PathBuf),
}

impl TabPath {
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            TabPath::Untitled => None,
            TabPath::File(path) => Some(path),
        }
    }

    pub fn is_untitled(&self) -> bool {
        matches!(self, TabPath::Untitled)
    }
}

impl From<Option<PathBuf>> for TabPath {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(TabPath::Untitled, TabPath::File)
    }
}

/// Final path segment: everything after the last `/` or `\`, or the whole
/// input when it contains neither.
///
/// Both separators are honoured on every platform so that paths reported by a
/// gateway on another OS still produce sensible titles.
pub fn basename(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// [`basename`] of a filesystem path (lossy for non-UTF-8 names).
pub fn basename_of(path: &Path) -> String {
    basename(&path.to_string_lossy()).to_string()
}

/// A single open editing buffer
///
/// Owned exclusively by [`TabCollection`]. Fields are readable by anyone but
/// only the synchronization engine and save coordinator mutate them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub(crate) id: TabId,
    pub(crate) title: String,
    pub(crate) path: TabPath,
    pub(crate) content: String,
    /// Buffer text as of the most recent successful save (or initial load)
    pub(crate) last_saved_content: String,
    /// Unsaved-change flag; see [`Tab::content_differs`] for the computed form
    pub(crate) dirty: bool,
    pub(crate) saved_at: Option<DateTime<Utc>>,
}

impl Tab {
    /// New tab whose saved baseline is its initial content.
    pub(crate) fn new(title: String, path: TabPath, content: String) -> Self {
        Self {
            id: TabId::new(),
            title,
            path,
            last_saved_content: content.clone(),
            content,
            dirty: false,
            saved_at: None,
        }
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn path(&self) -> &TabPath {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn last_saved_content(&self) -> &str {
        &self.last_saved_content
    }

    /// Whether the tab has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        self.saved_at
    }

    /// `content != last_saved_content`, ignoring any sticky dirty state
    pub fn content_differs(&self) -> bool {
        self.content != self.last_saved_content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basename_unix_and_windows_separators() {
        assert_eq!(basename("/tmp/a.md"), "a.md");
        assert_eq!(basename("C:\\Users\\me\\notes.txt"), "notes.txt");
        assert_eq!(basename("mixed/dir\\file.rs"), "file.rs");
    }

    #[test]
    fn test_basename_without_separator_is_whole_input() {
        assert_eq!(basename("a.md"), "a.md");
        assert_eq!(basename(""), "");
    }

    #[test]
    fn test_basename_trailing_separator_is_empty() {
        assert_eq!(basename("/tmp/dir/"), "");
    }

    #[test]
    fn test_basename_of_path() {
        assert_eq!(basename_of(Path::new("/tmp/x/y.txt")), "y.txt");
    }

    #[test]
    fn test_tab_path_from_option() {
        assert_eq!(TabPath::from(None), TabPath::Untitled);
        let path = PathBuf::from("/tmp/a.md");
        assert_eq!(
            TabPath::from(Some(path.clone())).as_path(),
            Some(path.as_path())
        );
        assert!(TabPath::default().is_untitled());
    }

    #[test]
    fn test_new_tab_is_clean() {
        let tab = Tab::new("a.md".to_string(), TabPath::Untitled, "hello".to_string());
        assert_eq!(tab.content(), "hello");
        assert_eq!(tab.last_saved_content(), "hello");
        assert!(!tab.is_dirty());
        assert!(!tab.content_differs());
        assert!(tab.saved_at().is_none());
    }
}
