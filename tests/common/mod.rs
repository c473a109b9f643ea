//! Shared integration test helpers for notetab.
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::{MockGateway, WriteReply};
//! ```
//!
//! Rust integration tests use `mod common;` (not `use`) to bring in helpers
//! from `tests/common/mod.rs`. The `#[allow(dead_code)]` attribute suppresses
//! warnings when only a subset of helpers are used per file.

#![allow(dead_code)]

use notetab::{Editor, EventBuffer};
use notetab_fs::{GatewayError, PersistenceGateway, PickedFile};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Notify;

/// How [`MockGateway`] answers the next `write_text`
#[derive(Debug, Clone)]
pub enum WriteReply {
    /// Report the requested path as written (cancel if none was given)
    Echo,
    /// Report this path as written
    Path(PathBuf),
    /// User dismissed the dialog
    Cancel,
    /// I/O failure
    Fail,
}

/// One recorded `write_text` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteCall {
    pub content: String,
    pub path: Option<PathBuf>,
}

/// Gateway with scripted replies that records every write
#[derive(Default)]
pub struct MockGateway {
    writes: Mutex<VecDeque<WriteReply>>,
    picks: Mutex<VecDeque<Option<PickedFile>>>,
    calls: Mutex<Vec<WriteCall>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply; with an empty queue writes behave as [`WriteReply::Echo`]
    pub fn reply(&self, reply: WriteReply) -> &Self {
        self.writes.lock().push_back(reply);
        self
    }

    /// Queue a pick result (`None` = cancelled)
    pub fn pick(&self, picked: Option<PickedFile>) -> &Self {
        self.picks.lock().push_back(picked);
        self
    }

    pub fn calls(&self) -> Vec<WriteCall> {
        self.calls.lock().clone()
    }
}

impl PersistenceGateway for MockGateway {
    async fn pick_and_read_text(&self) -> Result<Option<PickedFile>, GatewayError> {
        Ok(self.picks.lock().pop_front().flatten())
    }

    async fn write_text(
        &self,
        content: &str,
        path: Option<&Path>,
    ) -> Result<Option<PathBuf>, GatewayError> {
        self.calls.lock().push(WriteCall {
            content: content.to_string(),
            path: path.map(Path::to_path_buf),
        });
        let reply = self.writes.lock().pop_front().unwrap_or(WriteReply::Echo);
        match reply {
            WriteReply::Echo => Ok(path.map(Path::to_path_buf)),
            WriteReply::Path(path) => Ok(Some(path)),
            WriteReply::Cancel => Ok(None),
            WriteReply::Fail => Err(GatewayError::Write {
                path: path.map_or_else(|| PathBuf::from("/unknown"), Path::to_path_buf),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only volume"),
            }),
        }
    }
}

/// Gateway whose writes suspend until the test releases them
///
/// `started` is notified when a write begins; the write then waits for
/// `release` before reporting `path` as written.
pub struct GatedGateway {
    pub started: Notify,
    pub release: Notify,
    pub path: PathBuf,
}

impl GatedGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            started: Notify::new(),
            release: Notify::new(),
            path: path.into(),
        }
    }
}

impl PersistenceGateway for GatedGateway {
    async fn pick_and_read_text(&self) -> Result<Option<PickedFile>, GatewayError> {
        Ok(None)
    }

    async fn write_text(
        &self,
        _content: &str,
        _path: Option<&Path>,
    ) -> Result<Option<PathBuf>, GatewayError> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(Some(self.path.clone()))
    }
}

/// Editor with an attached event buffer
pub fn editor_with_events() -> (Editor, Arc<EventBuffer>) {
    let mut editor = Editor::new();
    let events = Arc::new(EventBuffer::new());
    editor.add_observer(events.clone());
    (editor, events)
}
