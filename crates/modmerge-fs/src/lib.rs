//! Filesystem helpers for the mod installer
//!
//! Provides forward-slash path handling, atomic writes, and timestamped
//! backups of files about to be replaced.

pub mod backup;
pub mod checksum;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use backup::{BACKUP_EXTENSION, backup_path_for, create_backup};
pub use checksum::compute_content_checksum;
pub use constants::{CONFIG_FILE_NAMES, EXCLUDED_DIRS, MISSION_PREFIX};
pub use error::{Error, Result};
pub use path::{NormalizedPath, relative_path};
