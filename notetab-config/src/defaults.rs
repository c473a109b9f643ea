//! Default value functions for configuration.
//!
//! Each function is used as a `#[serde(default = "crate::defaults::...")]`
//! attribute on a `Config` field.

/// Title given to tabs created without an explicit title.
pub fn default_title() -> String {
    "note.txt".to_string()
}

/// File name suggested by the save dialog for never-saved tabs.
pub fn default_save_name() -> String {
    "note.txt".to_string()
}

pub fn confirm_close_dirty() -> bool {
    true
}

pub fn dedupe_open() -> bool {
    true
}
