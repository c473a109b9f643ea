//! Active-document projection
//!
//! A single slot mirroring the active tab's `{id, title, content, path}` for
//! the editing surface. The surface reads the slot and writes back through
//! [`DocumentEdit`]s; it can change title and content but never the `id`,
//! which only the synchronization engine assigns.

use crate::tab::{Tab, TabId, TabPath};

/// Live mirror of the active tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDocument {
    pub id: TabId,
    pub title: String,
    pub content: String,
    pub path: TabPath,
}

impl ActiveDocument {
    pub fn from_tab(tab: &Tab) -> Self {
        Self {
            id: tab.id,
            title: tab.title.clone(),
            content: tab.content.clone(),
            path: tab.path.clone(),
        }
    }

    /// Equality on `(id, title, content)`, the fields the surface edits
    pub fn same_view(&self, other: &Self) -> bool {
        self.id == other.id && self.title == other.title && self.content == other.content
    }
}

/// A change made by the editing surface to the document it is showing
///
/// `id` is the tab the surface believes it is editing; an edit whose `id`
/// no longer matches the slot is stale and is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEdit {
    pub id: TabId,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl DocumentEdit {
    /// Replace the buffer text
    pub fn content(id: TabId, content: impl Into<String>) -> Self {
        Self {
            id,
            title: None,
            content: Some(content.into()),
        }
    }

    /// Rename the document
    pub fn title(id: TabId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: Some(title.into()),
            content: None,
        }
    }
}

/// Result of applying a [`DocumentEdit`] to the slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditApplied {
    /// Slot changed; reverse sync should run
    Changed,
    /// Edit carried the values already shown
    Unchanged,
    /// Edit targets a different document (or the slot is empty)
    Stale { found: Option<TabId> },
}

/// The single-slot projection store
#[derive(Debug, Clone, Default)]
pub struct DocumentSlot {
    value: Option<ActiveDocument>,
    /// Bumped on every write that changes the slot
    version: u64,
}

impl DocumentSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&ActiveDocument> {
        self.value.as_ref()
    }

    /// ID of the tab currently mirrored
    pub fn id(&self) -> Option<TabId> {
        self.value.as_ref().map(|doc| doc.id)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Overwrite the slot; no-op when the value is identical
    pub(crate) fn set(&mut self, doc: ActiveDocument) -> bool {
        if self.value.as_ref() == Some(&doc) {
            return false;
        }
        self.value = Some(doc);
        self.version += 1;
        true
    }

    pub(crate) fn clear(&mut self) -> bool {
        if self.value.take().is_some() {
            self.version += 1;
            return true;
        }
        false
    }

    /// Apply a surface edit without touching `id` or `path`
    pub(crate) fn apply(&mut self, edit: DocumentEdit) -> EditApplied {
        let found = self.id();
        let Some(doc) = self.value.as_mut().filter(|doc| doc.id == edit.id) else {
            return EditApplied::Stale { found };
        };

        let mut changed = false;
        if let Some(title) = edit.title
            && title != doc.title
        {
            doc.title = title;
            changed = true;
        }
        if let Some(content) = edit.content
            && content != doc.content
        {
            doc.content = content;
            changed = true;
        }

        if changed {
            self.version += 1;
            EditApplied::Changed
        } else {
            EditApplied::Unchanged
        }
    }
}
