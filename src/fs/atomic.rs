//! Atomic file writes.
//!
//! Content is written to a uniquely named temporary file next to the target,
//! synced, and renamed over the target. `std::fs::rename` replaces an
//! existing destination on every supported platform, so no platform-specific
//! replace path is needed.
//!
//! On crash a `.{filename}.{uuid}.tmp` file may remain in the target directory.

use crate::error::{Result, SwarmError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Atomically write bytes to a file, creating parent directories as needed.
///
/// # Errors
///
/// `SwarmError::UserError` on any create, write, sync, or rename failure.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            SwarmError::UserError(format!(
                "failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;
    if let Err(err) = write_synced(&temp_path, content.as_ref()) {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        SwarmError::UserError(format!("failed to replace '{}': {}", path.display(), e))
    })?;

    sync_parent_dir(path);
    Ok(())
}

/// Persist the directory entry of a freshly renamed file.
#[cfg(unix)]
fn sync_parent_dir(path: &Path) {
    if let Some(parent) = path.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) {}

fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            SwarmError::UserError(format!("invalid file path '{}'", target.display()))
        })?;

    let temp_name = format!(".{}.{}.tmp", filename, Uuid::new_v4().simple());
    Ok(target.with_file_name(temp_name))
}

fn write_synced(path: &Path, content: &[u8]) -> Result<()> {
    let io_error = |e: std::io::Error| {
        SwarmError::UserError(format!(
            "failed to write temporary file '{}': {}",
            path.display(),
            e
        ))
    };

    let mut file = File::create(path).map_err(io_error)?;
    file.write_all(content).map_err(io_error)?;
    file.sync_all().map_err(io_error)
}
