//! Typed error types for the editor core.
//!
//! Only [`EditorError::Gateway`] ever reaches callers of the public save/open
//! operations. Unknown tab IDs and projection mismatches are handled inside the
//! engine (silent no-op and logged diagnostic respectively) and are typed here
//! so the internal sync steps can report them precisely.

use crate::tab::TabId;
use notetab_fs::GatewayError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    /// An operation referenced a tab that is not (or no longer) open.
    #[error("Tab {0} not found")]
    TabNotFound(TabId),

    /// The active document belongs to a different tab than the engine expected.
    #[error("Active document out of sync: expected tab {expected}, document shows {}", display_found(.found))]
    SyncMismatch {
        /// Tab the engine was about to read from or write to.
        expected: TabId,
        /// Tab the active document actually mirrors (`None` when empty).
        found: Option<TabId>,
    },

    /// Reading or writing through the persistence gateway failed.
    ///
    /// The target tab is left untouched so the operation can be retried.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

fn display_found(found: &Option<TabId>) -> String {
    found.map_or_else(|| "nothing".to_string(), |id| id.to_string())
}
