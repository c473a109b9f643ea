//! Save coordinator
//!
//! Saving is split in two so the gateway await never holds engine state:
//! [`Editor::begin_save`] snapshots what to write, the caller awaits the
//! gateway, and [`Editor::complete_save`] applies the result to the tab the
//! snapshot was taken from, whichever tab is active by then.

use std::path::{Path, PathBuf};

use chrono::Utc;
use notetab_fs::PersistenceGateway;

use super::Editor;
use crate::error::EditorError;
use crate::events::EditorEvent;
use crate::tab::{TabId, TabPath, basename_of};

/// Which save operation produced a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    /// Save to the tab's path, prompting when it has none
    Save,
    /// Save to an explicit path; the title is left alone
    SaveAs,
}

/// Snapshot of a tab taken when a save starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    id: TabId,
    content: String,
    /// Path before the save
    prior_path: TabPath,
    /// Destination handed to the gateway
    target: Option<PathBuf>,
    kind: SaveKind,
}

impl SaveRequest {
    pub fn id(&self) -> TabId {
        self.id
    }

    /// Exact text to write
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Destination for the gateway (`None` prompts)
    pub fn target(&self) -> Option<&Path> {
        self.target.as_deref()
    }

    pub fn kind(&self) -> SaveKind {
        self.kind
    }
}

/// Result of a save that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { id: TabId, path: PathBuf },
    /// The gateway's prompt was dismissed; nothing changed
    Cancelled,
    NoActiveTab,
    /// The file was written but the tab was closed while the save was pending
    TabClosed { id: TabId, path: PathBuf },
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved { .. })
    }
}

impl Editor {
    /// Snapshot the active tab for a plain save
    pub fn begin_save(&self) -> Option<SaveRequest> {
        let tab = self.tabs.active_tab()?;
        Some(SaveRequest {
            id: tab.id,
            content: tab.content.clone(),
            prior_path: tab.path.clone(),
            target: tab.path.as_path().map(Path::to_path_buf),
            kind: SaveKind::Save,
        })
    }

    /// Snapshot the active tab for a save to an explicit path
    pub fn begin_save_to(&self, path: impl Into<PathBuf>) -> Option<SaveRequest> {
        let tab = self.tabs.active_tab()?;
        Some(SaveRequest {
            id: tab.id,
            content: tab.content.clone(),
            prior_path: tab.path.clone(),
            target: Some(path.into()),
            kind: SaveKind::SaveAs,
        })
    }

    /// Apply the gateway's answer to the tab the request was taken from
    ///
    /// `written` is the path the gateway reported, `None` for a cancelled
    /// prompt. The saved baseline becomes the snapshot that was written, so
    /// edits made while the save was pending keep the tab dirty.
    pub fn complete_save(
        &mut self,
        request: SaveRequest,
        written: Option<PathBuf>,
    ) -> SaveOutcome {
        let Some(path) = written else {
            log::info!("Save of tab {} cancelled", request.id.short());
            return SaveOutcome::Cancelled;
        };

        let id = request.id;
        if !self.tabs.contains(id) {
            log::warn!(
                "Tab {} closed before its save to {} completed",
                id.short(),
                path.display()
            );
            return SaveOutcome::TabClosed { id, path };
        }

        let retitle =
            request.kind == SaveKind::Save && request.prior_path.as_path() != Some(path.as_path());
        let saved_at = Utc::now();
        self.tabs.update(id, |tab| {
            if retitle {
                tab.title = basename_of(&path);
            }
            tab.path = TabPath::File(path.clone());
            tab.dirty = tab.content != request.content;
            tab.last_saved_content = request.content;
            tab.saved_at = Some(saved_at);
            true
        });
        log::info!("Saved tab {} to {}", id.short(), path.display());

        self.emit(EditorEvent::TabUpdated(id));
        self.emit(EditorEvent::Saved {
            id,
            path: path.clone(),
        });
        if let Err(err) = self.reconcile(id) {
            self.report(err);
        }
        SaveOutcome::Saved { id, path }
    }

    /// Save the active tab, prompting for a path if it has none
    ///
    /// Gateway failures are returned and leave the tab untouched.
    pub async fn save_active<G: PersistenceGateway>(
        &mut self,
        gateway: &G,
    ) -> Result<SaveOutcome, EditorError> {
        let Some(request) = self.begin_save() else {
            return Ok(SaveOutcome::NoActiveTab);
        };
        self.finish_save(request, gateway).await
    }

    /// Save the active tab to `path` without changing its title
    pub async fn save_active_to_path<G: PersistenceGateway>(
        &mut self,
        path: impl Into<PathBuf>,
        gateway: &G,
    ) -> Result<SaveOutcome, EditorError> {
        let Some(request) = self.begin_save_to(path) else {
            return Ok(SaveOutcome::NoActiveTab);
        };
        self.finish_save(request, gateway).await
    }

    async fn finish_save<G: PersistenceGateway>(
        &mut self,
        request: SaveRequest,
        gateway: &G,
    ) -> Result<SaveOutcome, EditorError> {
        let written = write_request(&request, gateway).await?;
        Ok(self.complete_save(request, written))
    }
}

/// Hand a request to the gateway, logging failures
pub(crate) async fn write_request<G: PersistenceGateway>(
    request: &SaveRequest,
    gateway: &G,
) -> Result<Option<PathBuf>, EditorError> {
    gateway
        .write_text(request.content(), request.target())
        .await
        .map_err(|err| {
            log::warn!("Save of tab {} failed: {}", request.id().short(), err);
            EditorError::Gateway(err)
        })
}
