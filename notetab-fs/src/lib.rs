//! Persistence gateway for the notetab editor.
//!
//! The editor core never touches the filesystem directly. Everything it needs
//! from storage goes through the [`PersistenceGateway`] contract:
//!
//! - [`PersistenceGateway::pick_and_read_text`]: let the user choose a file and
//!   return its text, or `None` when the choice was cancelled
//! - [`PersistenceGateway::write_text`]: write text to a known path, or ask the
//!   user for a destination first; `None` again means cancelled
//!
//! [`FsGateway`] is the production implementation. It runs blocking file I/O
//! on tokio's blocking pool and delegates the "dialog" part to a [`PathPrompt`].

pub mod error;
pub mod filters;
pub mod fs_gateway;
pub mod fs_ops;
pub mod gateway;

pub use error::GatewayError;
pub use filters::{CODE_EXTS, FileFilter, TEXT_EXTS, default_filters, is_supported};
pub use fs_gateway::{FsGateway, PathPrompt};
pub use fs_ops::{read_text_file, write_text_file};
pub use gateway::{PersistenceGateway, PickedFile};
