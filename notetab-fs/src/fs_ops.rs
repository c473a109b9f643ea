//! Blocking filesystem operations behind the gateway.
//!
//! These run on tokio's blocking pool (see [`crate::FsGateway`]) so they never
//! stall the editor's event loop.

use crate::error::GatewayError;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Read a whole text file.
///
/// Requires an absolute path.
pub fn read_text_file(path: &Path) -> Result<String, GatewayError> {
    if !path.is_absolute() {
        return Err(GatewayError::NotAbsolute(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| GatewayError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write text to a file, creating parent directories as needed.
///
/// Requires an absolute path. The content goes to a uniquely named temp file
/// in the same directory and is renamed into place, so a failed write never
/// truncates the target and concurrent writes to one path never share a temp
/// file.
pub fn write_text_file(path: &Path, content: &str) -> Result<(), GatewayError> {
    if !path.is_absolute() {
        return Err(GatewayError::NotAbsolute(path.to_path_buf()));
    }
    let write_err = |source| GatewayError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = path.parent().ok_or_else(|| {
        write_err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path has no parent directory",
        ))
    })?;
    fs::create_dir_all(dir).map_err(write_err)?;

    // Dropping the temp file on any error path removes it
    let mut temp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(write_err)?;
    temp.write_all(content.as_bytes()).map_err(write_err)?;
    temp.flush().map_err(write_err)?;
    temp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

const TEMP_PREFIX: &str = ".notetab-";
