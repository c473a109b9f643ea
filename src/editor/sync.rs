//! Directional sync between the tab collection and the active document.
//!
//! Propagation happens only at explicit transition points:
//! - activation: commit the outgoing tab, then forward sync the incoming one
//! - surface edit: reverse sync into the active tab
//! - completed save: reconcile the tab back into the document
//!
//! Every step is a no-op on unchanged input, so no step can trigger another.

use super::Editor;
use crate::document::{ActiveDocument, DocumentEdit, EditApplied};
use crate::error::EditorError;
use crate::events::EditorEvent;
use crate::tab::TabId;

impl Editor {
    /// Make `id` the active tab
    ///
    /// Commits the document into the previously active tab first, then
    /// mirrors the new tab into the document. Unknown IDs are ignored.
    pub(crate) fn activate(&mut self, id: TabId) -> bool {
        if !self.tabs.contains(id) {
            log::debug!("activate: tab {} not open", id.short());
            return false;
        }

        let previous = self.tabs.active_id();
        if let Some(prev) = previous
            && prev != id
            && self.tabs.contains(prev)
            && let Err(err) = self.commit_outgoing(prev)
        {
            self.report(err);
        }

        self.tabs.set_active(id);
        if previous != Some(id) {
            self.emit(EditorEvent::ActiveChanged(Some(id)));
        }

        if let Err(err) = self.forward_sync(id) {
            self.report(err);
        }
        true
    }

    /// Write the document's content into the tab being switched away from
    ///
    /// Dirty is sticky here: a tab already dirty stays dirty. Skipped with a
    /// mismatch when the document does not mirror `outgoing`.
    pub(crate) fn commit_outgoing(&mut self, outgoing: TabId) -> Result<bool, EditorError> {
        let doc = match self.document.get() {
            Some(doc) if doc.id == outgoing => doc,
            other => {
                return Err(EditorError::SyncMismatch {
                    expected: outgoing,
                    found: other.map(|doc| doc.id),
                });
            }
        };

        let changed = self
            .tabs
            .update(outgoing, |tab| {
                let dirty = tab.dirty || doc.content != tab.last_saved_content;
                if tab.content == doc.content && tab.dirty == dirty {
                    return false;
                }
                tab.content.clone_from(&doc.content);
                tab.dirty = dirty;
                true
            })
            .ok_or(EditorError::TabNotFound(outgoing))?;

        if changed {
            log::debug!("Committed document into tab {}", outgoing.short());
            self.emit(EditorEvent::TabUpdated(outgoing));
        }
        Ok(changed)
    }

    /// Mirror a tab into the document slot
    pub(crate) fn forward_sync(&mut self, id: TabId) -> Result<bool, EditorError> {
        let tab = self.tabs.get(id).ok_or(EditorError::TabNotFound(id))?;
        let changed = self.document.set(ActiveDocument::from_tab(tab));
        if changed {
            log::debug!("Forward sync: document now shows tab {}", id.short());
            self.emit(EditorEvent::DocumentChanged(id));
        }
        Ok(changed)
    }

    /// Apply the document's title and content to the active tab
    ///
    /// Dirty is recomputed exactly against the last saved content. No-op
    /// without an active tab or document.
    pub(crate) fn reverse_sync(&mut self) -> Result<bool, EditorError> {
        let Some(active) = self.tabs.active_id() else {
            return Ok(false);
        };
        let Some(doc) = self.document.get() else {
            return Ok(false);
        };
        if doc.id != active {
            return Err(EditorError::SyncMismatch {
                expected: active,
                found: Some(doc.id),
            });
        }

        let changed = self
            .tabs
            .update(active, |tab| {
                let dirty = doc.content != tab.last_saved_content;
                if tab.content == doc.content && tab.title == doc.title && tab.dirty == dirty {
                    return false;
                }
                tab.title.clone_from(&doc.title);
                tab.content.clone_from(&doc.content);
                tab.dirty = dirty;
                true
            })
            .ok_or(EditorError::TabNotFound(active))?;

        if changed {
            log::debug!("Reverse sync: updated tab {}", active.short());
            self.emit(EditorEvent::TabUpdated(active));
        }
        Ok(changed)
    }

    /// Push a tab's title, content and path into the document
    ///
    /// Only applies when the document mirrors `id`; a tab that is not shown
    /// has nothing to reconcile.
    pub(crate) fn reconcile(&mut self, id: TabId) -> Result<bool, EditorError> {
        if self.document.id() != Some(id) {
            return Ok(false);
        }
        let tab = self.tabs.get(id).ok_or(EditorError::TabNotFound(id))?;
        let changed = self.document.set(ActiveDocument::from_tab(tab));
        if changed {
            log::debug!("Reconciled document with tab {}", id.short());
            self.emit(EditorEvent::DocumentChanged(id));
        }
        Ok(changed)
    }

    /// Apply an edit from the editing surface
    ///
    /// Writes the document and runs reverse sync. Edits addressed to a tab
    /// the document no longer shows are dropped and reported. Returns
    /// whether the active tab changed.
    pub fn edit_document(&mut self, edit: DocumentEdit) -> bool {
        let target = edit.id;
        match self.document.apply(edit) {
            EditApplied::Changed => {
                self.emit(EditorEvent::DocumentChanged(target));
                match self.reverse_sync() {
                    Ok(changed) => changed,
                    Err(err) => {
                        self.report(err);
                        false
                    }
                }
            }
            EditApplied::Unchanged => false,
            EditApplied::Stale { found } => {
                self.report(EditorError::SyncMismatch {
                    expected: target,
                    found,
                });
                false
            }
        }
    }

    /// Replace the active document's content
    pub fn set_content(&mut self, content: impl Into<String>) -> bool {
        match self.document.id() {
            Some(id) => self.edit_document(DocumentEdit::content(id, content)),
            None => false,
        }
    }

    /// Append text to the active document
    pub fn append_content(&mut self, text: &str) -> bool {
        let Some(doc) = self.document.get() else {
            return false;
        };
        let content = format!("{}{}", doc.content, text);
        let id = doc.id;
        self.edit_document(DocumentEdit::content(id, content))
    }

    /// Rename the active document
    pub fn set_title(&mut self, title: impl Into<String>) -> bool {
        match self.document.id() {
            Some(id) => self.edit_document(DocumentEdit::title(id, title)),
            None => false,
        }
    }

    /// Log a non-fatal engine error and notify observers of mismatches
    pub(crate) fn report(&self, err: EditorError) {
        match err {
            EditorError::SyncMismatch { expected, found } => {
                log::warn!("{}", err);
                self.emit(EditorEvent::SyncMismatch { expected, found });
            }
            EditorError::TabNotFound(_) => log::debug!("{}", err),
            EditorError::Gateway(_) => log::warn!("{}", err),
        }
    }
}
