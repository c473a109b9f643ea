//! Ordered tab collection with active-tab selection

use super::{Tab, TabId};

/// A tab removed by [`TabCollection::close`]
#[derive(Debug)]
pub struct ClosedTab {
    /// ID of the removed tab
    pub id: TabId,
    /// Position the tab occupied before removal
    pub index: usize,
    /// Whether the removed tab was the active one
    pub was_active: bool,
    /// Tab that became active as a consequence (predecessor, or new first)
    pub next_active: Option<TabId>,
}

/// Manages every open tab, in display order
///
/// The collection owns all buffer state. It never touches the active
/// document; activation transitions are reported back to the editor, which
/// runs commit / forward sync around them.
#[derive(Debug, Clone, Default)]
pub struct TabCollection {
    /// All tabs, in insertion order
    tabs: Vec<Tab>,
    /// Currently active tab ID
    active_tab_id: Option<TabId>,
    /// Bumped on every observable mutation (tab fields or selection)
    version: u64,
}

impl TabCollection {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tab (does not activate it)
    pub(crate) fn push(&mut self, tab: Tab) -> TabId {
        let id = tab.id;
        self.tabs.push(tab);
        self.version += 1;
        log::info!(
            "Created tab {} '{}' (total: {})",
            id.short(),
            self.tabs.last().map_or("", |t| t.title.as_str()),
            self.tabs.len()
        );
        id
    }

    /// Remove a tab by ID
    ///
    /// Unknown IDs are a silent no-op (`None`). When the active tab is removed
    /// the predecessor in display order becomes active, or the new first tab
    /// when the removed one was first. The collection may be left empty; the
    /// caller is responsible for the ensure-active policy.
    pub(crate) fn close(&mut self, id: TabId) -> Option<ClosedTab> {
        let idx = self.position(id)?;
        log::info!("Closing tab {} (index {})", id.short(), idx);

        self.tabs.remove(idx);
        self.version += 1;

        let was_active = self.active_tab_id == Some(id);
        if was_active {
            self.active_tab_id = if self.tabs.is_empty() {
                None
            } else {
                Some(self.tabs[idx.saturating_sub(1)].id)
            };
        }

        Some(ClosedTab {
            id,
            index: idx,
            was_active,
            next_active: if was_active { self.active_tab_id } else { None },
        })
    }

    /// Mark a tab active
    ///
    /// Returns `false` (and changes nothing) for unknown IDs.
    pub(crate) fn set_active(&mut self, id: TabId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.active_tab_id != Some(id) {
            self.active_tab_id = Some(id);
            self.version += 1;
            log::debug!("Switched to tab {}", id.short());
        }
        true
    }

    /// Mutate one tab in place
    ///
    /// `f` reports whether it changed anything; only then is the version
    /// bumped. Returns `None` for unknown IDs.
    pub(crate) fn update<F>(&mut self, id: TabId, f: F) -> Option<bool>
    where
        F: FnOnce(&mut Tab) -> bool,
    {
        let tab = self.tabs.iter_mut().find(|t| t.id == id)?;
        let changed = f(tab);
        if changed {
            self.version += 1;
        }
        Some(changed)
    }

    /// ID of the tab after the active one (wraps around)
    pub fn next_id(&self) -> Option<TabId> {
        self.neighbour_id(1)
    }

    /// ID of the tab before the active one (wraps around)
    pub fn prev_id(&self) -> Option<TabId> {
        self.neighbour_id(-1)
    }

    fn neighbour_id(&self, step: isize) -> Option<TabId> {
        if self.tabs.len() <= 1 {
            return None;
        }
        let current_idx = self.active_index().unwrap_or(0) as isize;
        let len = self.tabs.len() as isize;
        let idx = (current_idx + step).rem_euclid(len) as usize;
        Some(self.tabs[idx].id)
    }

    /// ID at a 1-based position (as shown in listings)
    pub fn id_at(&self, index: usize) -> Option<TabId> {
        index
            .checked_sub(1)
            .and_then(|i| self.tabs.get(i))
            .map(|t| t.id)
    }

    /// First tab backed by `path`
    pub fn find_by_path(&self, path: &std::path::Path) -> Option<TabId> {
        self.tabs
            .iter()
            .find(|t| t.path.as_path() == Some(path))
            .map(|t| t.id)
    }

    /// Whether any tab has unsaved changes
    pub fn has_unsaved_changes(&self) -> bool {
        self.tabs.iter().any(|t| t.dirty)
    }

    /// Tabs with unsaved changes, in display order
    pub fn dirty_tabs(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter().filter(|t| t.dirty)
    }

    /// Get a reference to the active tab
    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_tab_id.and_then(|id| self.get(id))
    }

    /// Get the active tab ID
    pub fn active_id(&self) -> Option<TabId> {
        self.active_tab_id
    }

    /// Get index of active tab (0-based)
    pub fn active_index(&self) -> Option<usize> {
        self.active_tab_id.and_then(|id| self.position(id))
    }

    /// Get a tab by ID
    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.position(id).is_some()
    }

    /// 0-based position of a tab
    pub fn position(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    /// All tabs in display order
    pub fn iter(&self) -> std::slice::Iter<'_, Tab> {
        self.tabs.iter()
    }

    /// Get all tabs as a slice
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Get the number of tabs
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Mutation counter; unchanged counter means nothing observable changed
    pub fn version(&self) -> u64 {
        self.version
    }
}

impl<'a> IntoIterator for &'a TabCollection {
    type Item = &'a Tab;
    type IntoIter = std::slice::Iter<'a, Tab>;

    fn into_iter(self) -> Self::IntoIter {
        self.tabs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tab::TabPath;
    use std::path::{Path, PathBuf};

    fn stub(title: &str) -> Tab {
        Tab::new(title.to_string(), TabPath::Untitled, String::new())
    }

    /// Collection with `n` tabs titled "t1".."tn", the last one active
    fn collection_with(n: usize) -> (TabCollection, Vec<TabId>) {
        let mut tabs = TabCollection::new();
        let ids: Vec<TabId> = (1..=n)
            .map(|i| {
                let id = tabs.push(stub(&format!("t{i}")));
                tabs.set_active(id);
                id
            })
            .collect();
        (tabs, ids)
    }

    #[test]
    fn test_push_preserves_insertion_order() {
        let (tabs, ids) = collection_with(3);
        let order: Vec<TabId> = tabs.iter().map(|t| t.id()).collect();
        assert_eq!(order, ids);
        assert_eq!(tabs.active_id(), Some(ids[2]));
    }

    #[test]
    fn test_close_active_selects_predecessor() {
        let (mut tabs, ids) = collection_with(3);
        tabs.set_active(ids[1]);

        let closed = tabs.close(ids[1]).unwrap();
        assert!(closed.was_active);
        assert_eq!(closed.index, 1);
        assert_eq!(closed.next_active, Some(ids[0]));
        assert_eq!(tabs.active_id(), Some(ids[0]));
    }

    #[test]
    fn test_close_first_active_selects_new_first() {
        let (mut tabs, ids) = collection_with(3);
        tabs.set_active(ids[0]);

        tabs.close(ids[0]);
        assert_eq!(tabs.active_id(), Some(ids[1]));
    }

    #[test]
    fn test_close_inactive_keeps_selection_and_order() {
        let (mut tabs, ids) = collection_with(4);
        tabs.set_active(ids[3]);

        let closed = tabs.close(ids[1]).unwrap();
        assert!(!closed.was_active);
        assert_eq!(closed.next_active, None);
        assert_eq!(tabs.active_id(), Some(ids[3]));
        let order: Vec<TabId> = tabs.iter().map(|t| t.id()).collect();
        assert_eq!(order, vec![ids[0], ids[2], ids[3]]);
    }

    #[test]
    fn test_close_last_tab_leaves_empty() {
        let (mut tabs, ids) = collection_with(1);
        let closed = tabs.close(ids[0]).unwrap();
        assert!(closed.was_active);
        assert!(tabs.is_empty());
        assert_eq!(tabs.active_id(), None);
    }

    #[test]
    fn test_close_unknown_is_noop() {
        let (mut tabs, _) = collection_with(2);
        let version = tabs.version();
        assert!(tabs.close(TabId::new()).is_none());
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs.version(), version);
    }

    #[test]
    fn test_set_active_unknown_is_rejected() {
        let (mut tabs, ids) = collection_with(2);
        assert!(!tabs.set_active(TabId::new()));
        assert_eq!(tabs.active_id(), Some(ids[1]));
    }

    #[test]
    fn test_set_active_same_tab_does_not_bump_version() {
        let (mut tabs, ids) = collection_with(2);
        let version = tabs.version();
        assert!(tabs.set_active(ids[1]));
        assert_eq!(tabs.version(), version);
    }

    #[test]
    fn test_update_bumps_version_only_on_change() {
        let (mut tabs, ids) = collection_with(1);
        let version = tabs.version();

        assert_eq!(tabs.update(ids[0], |_| false), Some(false));
        assert_eq!(tabs.version(), version);

        assert_eq!(
            tabs.update(ids[0], |t| {
                t.content.push('x');
                true
            }),
            Some(true)
        );
        assert_eq!(tabs.version(), version + 1);
        assert_eq!(tabs.update(TabId::new(), |_| true), None);
    }

    #[test]
    fn test_next_and_prev_wrap_around() {
        let (mut tabs, ids) = collection_with(3);
        tabs.set_active(ids[2]);
        assert_eq!(tabs.next_id(), Some(ids[0]));
        assert_eq!(tabs.prev_id(), Some(ids[1]));

        tabs.set_active(ids[0]);
        assert_eq!(tabs.prev_id(), Some(ids[2]));
    }

    #[test]
    fn test_next_with_single_tab_is_none() {
        let (tabs, _) = collection_with(1);
        assert_eq!(tabs.next_id(), None);
        assert_eq!(tabs.prev_id(), None);
    }

    #[test]
    fn test_id_at_is_one_based() {
        let (tabs, ids) = collection_with(2);
        assert_eq!(tabs.id_at(0), None);
        assert_eq!(tabs.id_at(1), Some(ids[0]));
        assert_eq!(tabs.id_at(2), Some(ids[1]));
        assert_eq!(tabs.id_at(3), None);
    }

    #[test]
    fn test_find_by_path_and_dirty_tracking() {
        let mut tabs = TabCollection::new();
        let path = PathBuf::from("/tmp/a.md");
        let file = tabs.push(Tab::new(
            "a.md".to_string(),
            TabPath::File(path.clone()),
            "x".to_string(),
        ));
        tabs.push(stub("scratch"));

        assert_eq!(tabs.find_by_path(&path), Some(file));
        assert_eq!(tabs.find_by_path(Path::new("/tmp/b.md")), None);

        assert!(!tabs.has_unsaved_changes());
        tabs.update(file, |t| {
            t.dirty = true;
            true
        });
        assert!(tabs.has_unsaved_changes());
        assert_eq!(tabs.dirty_tabs().map(|t| t.id()).collect::<Vec<_>>(), vec![file]);
    }
}
