//! Timestamped backups of files about to be replaced
//!
//! A backup sits next to the original as `<file>.<YYYYmmdd-HHMMSS>.bak`.
//! Two backups of the same file within one second share a name; the later
//! one wins.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};

use crate::{Result, io};

/// Extension appended to every backup file
pub const BACKUP_EXTENSION: &str = "bak";

const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Backup file name for `path` taken at `at`.
pub fn backup_path_for<Tz: TimeZone>(path: &Path, at: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(
        ".{}.{}",
        at.format(TIMESTAMP_FORMAT),
        BACKUP_EXTENSION
    ));
    path.with_file_name(name)
}

/// Copy `path` to a timestamped backup beside it.
///
/// Returns `Ok(None)` when there is nothing to back up.
pub fn create_backup(path: &Path) -> Result<Option<PathBuf>> {
    if !path.is_file() {
        return Ok(None);
    }
    let backup = backup_path_for(path, &Local::now());
    io::copy_file(path, &backup)?;
    tracing::debug!(original = %path.display(), backup = %backup.display(), "created backup");
    Ok(Some(backup))
}
