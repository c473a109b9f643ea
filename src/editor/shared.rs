//! Editor handle shared between tasks
//!
//! The lock is only ever held for synchronous engine steps. Gateway calls run
//! with the lock released, so switches and edits can complete while a save or
//! open prompt is pending.

use std::path::PathBuf;
use std::sync::Arc;

use notetab_fs::PersistenceGateway;
use parking_lot::{Mutex, MutexGuard};

use super::save::write_request;
use super::{Editor, SaveOutcome, SaveRequest};
use crate::error::EditorError;
use crate::tab::TabId;

/// Cloneable, thread-safe handle to one [`Editor`]
#[derive(Debug, Clone)]
pub struct SharedEditor {
    inner: Arc<Mutex<Editor>>,
}

impl SharedEditor {
    pub fn new(editor: Editor) -> Self {
        Self {
            inner: Arc::new(Mutex::new(editor)),
        }
    }

    /// Lock for synchronous operations; never hold the guard across an await
    pub fn lock(&self) -> MutexGuard<'_, Editor> {
        self.inner.lock()
    }

    /// Save the active tab, prompting for a path if it has none
    pub async fn save_active<G: PersistenceGateway>(
        &self,
        gateway: &G,
    ) -> Result<SaveOutcome, EditorError> {
        let request = self.lock().begin_save();
        self.run_save(request, gateway).await
    }

    /// Save the active tab to `path` without changing its title
    pub async fn save_active_to_path<G: PersistenceGateway>(
        &self,
        path: impl Into<PathBuf>,
        gateway: &G,
    ) -> Result<SaveOutcome, EditorError> {
        let path = path.into();
        let request = self.lock().begin_save_to(path);
        self.run_save(request, gateway).await
    }

    async fn run_save<G: PersistenceGateway>(
        &self,
        request: Option<SaveRequest>,
        gateway: &G,
    ) -> Result<SaveOutcome, EditorError> {
        let Some(request) = request else {
            return Ok(SaveOutcome::NoActiveTab);
        };
        let written = write_request(&request, gateway).await?;
        Ok(self.lock().complete_save(request, written))
    }

    /// Let the user pick a file and open it in a tab
    ///
    /// Returns `Ok(None)` when the prompt was cancelled.
    pub async fn open_from_gateway<G: PersistenceGateway>(
        &self,
        gateway: &G,
    ) -> Result<Option<TabId>, EditorError> {
        let picked = gateway.pick_and_read_text().await.map_err(|err| {
            log::warn!("Open failed: {}", err);
            EditorError::Gateway(err)
        })?;
        match picked {
            Some(picked) => Ok(Some(self.lock().open_picked(picked))),
            None => {
                log::info!("Open cancelled");
                Ok(None)
            }
        }
    }
}
