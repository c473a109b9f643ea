//! Change notification for code outside the engine.
//!
//! The engine never relies on subscriptions for its own propagation; these
//! events exist so a UI (or a test) can observe what happened. Register an
//! `Arc<dyn EditorObserver>` with [`crate::editor::Editor::add_observer`].

use crate::tab::TabId;
use parking_lot::Mutex;
use std::path::PathBuf;

/// Something observable happened to the tab collection or active document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    TabCreated(TabId),
    TabClosed(TabId),
    /// Selection moved; `None` only transiently while the collection is empty
    ActiveChanged(Option<TabId>),
    /// The active document slot was rewritten
    DocumentChanged(TabId),
    /// Title/content/dirty of a tab changed through reverse sync or commit
    TabUpdated(TabId),
    Saved { id: TabId, path: PathBuf },
    /// A commit or reverse-sync step was skipped because the document
    /// belonged to a different tab
    SyncMismatch {
        expected: TabId,
        found: Option<TabId>,
    },
}

/// Receives editor events synchronously, in the order they occur
pub trait EditorObserver: Send + Sync {
    fn on_event(&self, event: &EditorEvent);
}

/// Observer that buffers events until drained
#[derive(Debug, Default)]
pub struct EventBuffer {
    events: Mutex<Vec<EditorEvent>>,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain all buffered events, returning them and clearing the buffer.
    pub fn drain_events(&self) -> Vec<EditorEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EditorObserver for EventBuffer {
    fn on_event(&self, event: &EditorEvent) {
        self.events.lock().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_returns_in_order_and_clears() {
        let buffer = EventBuffer::new();
        let a = TabId::new();
        buffer.on_event(&EditorEvent::TabCreated(a));
        buffer.on_event(&EditorEvent::ActiveChanged(Some(a)));

        assert_eq!(buffer.len(), 2);
        assert_eq!(
            buffer.drain_events(),
            vec![
                EditorEvent::TabCreated(a),
                EditorEvent::ActiveChanged(Some(a))
            ]
        );
        assert!(buffer.is_empty());
    }
}
