//! Well-known names used when scanning a mod package.

/// Directories never treated as mission data.
pub const EXCLUDED_DIRS: &[&str] = &[".git", ".github", "__pycache__", ".idea", ".vscode"];

/// Prefix of the mission data folders shipped by vanilla-style missions.
pub const MISSION_PREFIX: &str = "dayzOffline";

/// Rule configuration files looked up in the working directory, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["install_config.json", "install_config.toml"];
