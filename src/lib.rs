// Library exports for testing and potential library use
//
// # Mutex Usage Policy
//
// notetab uses two mutex types:
//
//   - `parking_lot::Mutex`    — editor state (`SharedEditor`) and event buffers.
//                               Guards are held only for synchronous engine
//                               steps and are never held across an `.await`;
//                               gateway calls always run with the lock released.
//
//   - `std::sync::Mutex`      — acceptable in test doubles. Prefer parking_lot
//                               for new code.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod debug;

pub mod cli;
pub mod document;
pub mod editor;
pub mod error;
pub mod events;
pub mod shell;
pub mod tab;

pub use document::{ActiveDocument, DocumentEdit, DocumentSlot};
pub use editor::{Editor, SaveKind, SaveOutcome, SaveRequest, SharedEditor};
pub use error::EditorError;
pub use events::{EditorEvent, EditorObserver, EventBuffer};
pub use tab::{ClosedTab, Tab, TabCollection, TabId, TabPath, basename};
