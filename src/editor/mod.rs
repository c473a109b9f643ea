//! Editor state container
//!
//! [`Editor`] owns the tab collection and the active-document slot and is the
//! only path between them. Tab lifecycle operations live here; the
//! directional sync functions are in [`sync`], the save protocol in [`save`],
//! and the lock-sharing wrapper used across gateway awaits in [`shared`].

mod save;
mod shared;
mod sync;

pub use save::{SaveKind, SaveOutcome, SaveRequest};
pub use shared::SharedEditor;

use std::path::PathBuf;
use std::sync::Arc;

use notetab_config::Config;
use notetab_fs::PickedFile;

use crate::document::{ActiveDocument, DocumentSlot};
use crate::events::{EditorEvent, EditorObserver};
use crate::tab::{ClosedTab, Tab, TabCollection, TabId, TabPath, basename_of};

/// The tab/document synchronization engine
pub struct Editor {
    tabs: TabCollection,
    document: DocumentSlot,
    config: Config,
    observers: Vec<Arc<dyn EditorObserver>>,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("tabs", &self.tabs)
            .field("document", &self.document)
            .field("config", &self.config)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Empty editor with default configuration
    ///
    /// Holds no tabs until [`Editor::ensure_active_tab`] or a create/open.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            tabs: TabCollection::new(),
            document: DocumentSlot::new(),
            config,
            observers: Vec::new(),
        }
    }

    pub fn tabs(&self) -> &TabCollection {
        &self.tabs
    }

    /// The active-document projection, as the editing surface sees it
    pub fn document(&self) -> Option<&ActiveDocument> {
        self.document.get()
    }

    /// Change counter of the active-document slot
    pub fn document_version(&self) -> u64 {
        self.document.version()
    }

    pub fn active_id(&self) -> Option<TabId> {
        self.tabs.active_id()
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.active_tab()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn add_observer(&mut self, observer: Arc<dyn EditorObserver>) {
        self.observers.push(observer);
    }

    fn emit(&self, event: EditorEvent) {
        for observer in &self.observers {
            observer.on_event(&event);
        }
    }

    /// Create an empty tab and make it active
    ///
    /// `title` defaults to the configured default title.
    pub fn create(&mut self, title: Option<String>) -> TabId {
        let title = title.unwrap_or_else(|| self.config.default_title.clone());
        self.insert(Tab::new(title, TabPath::Untitled, String::new()))
    }

    /// Open a buffer with initial content and make it active
    ///
    /// The title defaults to the path's basename. With neither a path nor a
    /// title this is [`Editor::create`] with the default title.
    pub fn open(
        &mut self,
        content: impl Into<String>,
        path: Option<PathBuf>,
        title: Option<String>,
    ) -> TabId {
        let title = match (title, &path) {
            (Some(title), _) => title,
            (None, Some(path)) => basename_of(path),
            (None, None) => return self.create(None),
        };
        self.insert(Tab::new(title, TabPath::from(path), content.into()))
    }

    /// Open a file returned by the gateway's picker
    ///
    /// When `dedupe_open` is configured and the path is already open, the
    /// existing tab is activated instead of creating a duplicate.
    pub fn open_picked(&mut self, picked: PickedFile) -> TabId {
        if self.config.dedupe_open
            && let Some(existing) = self.tabs.find_by_path(&picked.path)
        {
            log::info!(
                "{} already open in tab {}, switching",
                picked.path.display(),
                existing.short()
            );
            self.activate(existing);
            return existing;
        }
        self.open(picked.content, Some(picked.path), None)
    }

    fn insert(&mut self, tab: Tab) -> TabId {
        let id = self.tabs.push(tab);
        self.emit(EditorEvent::TabCreated(id));
        self.activate(id);
        id
    }

    /// Close a tab
    ///
    /// Unknown IDs are a silent no-op. Closing the active tab activates its
    /// predecessor; closing the last tab creates a fresh one.
    pub fn close(&mut self, id: TabId) -> Option<ClosedTab> {
        let Some(closed) = self.tabs.close(id) else {
            log::debug!("close: tab {} not open", id.short());
            return None;
        };
        self.emit(EditorEvent::TabClosed(id));

        if let Some(next) = closed.next_active {
            self.emit(EditorEvent::ActiveChanged(Some(next)));
            if let Err(err) = self.forward_sync(next) {
                self.report(err);
            }
        } else if self.tabs.is_empty() {
            self.document.clear();
            self.emit(EditorEvent::ActiveChanged(None));
            self.ensure_active_tab();
        }
        Some(closed)
    }

    /// Create a default tab if none are open
    pub fn ensure_active_tab(&mut self) -> Option<TabId> {
        if !self.tabs.is_empty() {
            return None;
        }
        Some(self.create(None))
    }

    /// Activate a tab by ID (no-op for unknown IDs)
    pub fn switch_to(&mut self, id: TabId) -> bool {
        self.activate(id)
    }

    /// Activate the next tab, wrapping around
    pub fn next_tab(&mut self) -> Option<TabId> {
        let id = self.tabs.next_id()?;
        self.activate(id);
        Some(id)
    }

    /// Activate the previous tab, wrapping around
    pub fn prev_tab(&mut self) -> Option<TabId> {
        let id = self.tabs.prev_id()?;
        self.activate(id);
        Some(id)
    }

    /// Activate the tab at a 1-based position
    pub fn switch_to_index(&mut self, index: usize) -> Option<TabId> {
        let id = self.tabs.id_at(index)?;
        self.activate(id);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventBuffer;

    fn editor_with_events() -> (Editor, Arc<EventBuffer>) {
        let mut editor = Editor::new();
        let events = Arc::new(EventBuffer::new());
        editor.add_observer(events.clone());
        (editor, events)
    }

    #[test]
    fn test_create_uses_default_title_and_activates() {
        let mut editor = Editor::new();
        let id = editor.create(None);

        assert_eq!(editor.active_id(), Some(id));
        let doc = editor.document().unwrap();
        assert_eq!(doc.id, id);
        assert_eq!(doc.title, "note.txt");
        assert_eq!(doc.content, "");
    }

    #[test]
    fn test_create_respects_configured_title() {
        let config = Config {
            default_title: "scratch.md".to_string(),
            ..Config::default()
        };
        let mut editor = Editor::with_config(config);
        editor.create(None);
        assert_eq!(editor.active_tab().unwrap().title(), "scratch.md");
    }

    #[test]
    fn test_open_title_precedence() {
        let mut editor = Editor::new();
        let by_path = editor.open("x", Some(PathBuf::from("/tmp/a.md")), None);
        let by_title = editor.open("y", Some(PathBuf::from("/tmp/b.md")), Some("B".into()));
        let untitled = editor.open("z", None, Some("draft".into()));

        assert_eq!(editor.tabs().get(by_path).unwrap().title(), "a.md");
        assert_eq!(editor.tabs().get(by_title).unwrap().title(), "B");
        let draft = editor.tabs().get(untitled).unwrap();
        assert_eq!(draft.title(), "draft");
        assert_eq!(draft.content(), "z");
        assert!(draft.path().is_untitled());
    }

    #[test]
    fn test_open_without_path_or_title_creates_empty_tab() {
        let mut editor = Editor::new();
        let id = editor.open("ignored", None, None);
        let tab = editor.tabs().get(id).unwrap();
        assert_eq!(tab.title(), "note.txt");
        assert_eq!(tab.content(), "");
    }

    #[test]
    fn test_open_picked_dedupes_existing_path() {
        let mut editor = Editor::new();
        let path = PathBuf::from("/tmp/a.md");
        let first = editor.open("x", Some(path.clone()), None);
        editor.create(None);

        let again = editor.open_picked(PickedFile {
            content: "x".into(),
            path: path.clone(),
        });
        assert_eq!(again, first);
        assert_eq!(editor.tabs().len(), 2);
        assert_eq!(editor.active_id(), Some(first));
    }

    #[test]
    fn test_open_picked_without_dedupe_opens_second_tab() {
        let config = Config {
            dedupe_open: false,
            ..Config::default()
        };
        let mut editor = Editor::with_config(config);
        let path = PathBuf::from("/tmp/a.md");
        editor.open("x", Some(path.clone()), None);
        let second = editor.open_picked(PickedFile {
            content: "x".into(),
            path,
        });
        assert_eq!(editor.tabs().len(), 2);
        assert_eq!(editor.active_id(), Some(second));
    }

    #[test]
    fn test_close_active_forward_syncs_predecessor() {
        let mut editor = Editor::new();
        let a = editor.open("alpha", None, Some("a".into()));
        let b = editor.open("beta", None, Some("b".into()));

        editor.close(b);
        assert_eq!(editor.active_id(), Some(a));
        assert_eq!(editor.document().unwrap().id, a);
        assert_eq!(editor.document().unwrap().content, "alpha");
    }

    #[test]
    fn test_close_inactive_keeps_document() {
        let mut editor = Editor::new();
        let a = editor.open("alpha", None, Some("a".into()));
        let b = editor.open("beta", None, Some("b".into()));
        let version = editor.document_version();

        editor.close(a);
        assert_eq!(editor.active_id(), Some(b));
        assert_eq!(editor.document_version(), version);
    }

    #[test]
    fn test_close_last_tab_recreates_one() {
        let (mut editor, events) = editor_with_events();
        let only = editor.create(None);
        events.drain_events();

        editor.close(only);
        assert_eq!(editor.tabs().len(), 1);
        let fresh = editor.active_id().unwrap();
        assert_ne!(fresh, only);
        assert_eq!(editor.document().unwrap().id, fresh);

        let events = events.drain_events();
        assert_eq!(events[0], EditorEvent::TabClosed(only));
        assert_eq!(events[1], EditorEvent::ActiveChanged(None));
        assert!(events.contains(&EditorEvent::TabCreated(fresh)));
    }

    #[test]
    fn test_close_unknown_id_is_silent() {
        let (mut editor, events) = editor_with_events();
        editor.create(None);
        events.drain_events();

        assert!(editor.close(TabId::new()).is_none());
        assert!(events.is_empty());
    }

    #[test]
    fn test_ensure_active_tab_only_when_empty() {
        let mut editor = Editor::new();
        let created = editor.ensure_active_tab();
        assert!(created.is_some());
        assert_eq!(editor.ensure_active_tab(), None);
        assert_eq!(editor.tabs().len(), 1);
    }

    #[test]
    fn test_navigation() {
        let mut editor = Editor::new();
        let a = editor.create(Some("a".into()));
        let b = editor.create(Some("b".into()));
        let c = editor.create(Some("c".into()));

        assert_eq!(editor.next_tab(), Some(a));
        assert_eq!(editor.prev_tab(), Some(c));
        assert_eq!(editor.switch_to_index(2), Some(b));
        assert_eq!(editor.document().unwrap().id, b);
        assert_eq!(editor.switch_to_index(9), None);
        assert!(!editor.switch_to(TabId::new()));
        assert_eq!(editor.active_id(), Some(b));
    }
}
