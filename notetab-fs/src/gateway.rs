//! The persistence contract the editor core depends on.

use crate::error::GatewayError;
use std::future::Future;
use std::path::{Path, PathBuf};

/// Text chosen by the user in an open prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub content: String,
    pub path: PathBuf,
}

/// External collaborator performing file picking, reading and writing.
///
/// Both operations are suspension points for the editor: while a returned
/// future is pending, other editor operations may run to completion.
/// `Ok(None)` is a user cancellation and must be treated as a normal outcome.
pub trait PersistenceGateway {
    /// Let the user select a source file and return its text and location.
    fn pick_and_read_text(
        &self,
    ) -> impl Future<Output = Result<Option<PickedFile>, GatewayError>> + Send;

    /// Write `content` to `path`.
    ///
    /// When `path` is `None` the gateway prompts for a destination. Returns
    /// the path actually written.
    fn write_text(
        &self,
        content: &str,
        path: Option<&Path>,
    ) -> impl Future<Output = Result<Option<PathBuf>, GatewayError>> + Send;
}
