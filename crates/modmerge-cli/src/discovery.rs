//! Locating the mod's mission folder and cleaning up typed paths

use std::path::{Path, PathBuf};

use modmerge_fs::{EXCLUDED_DIRS, MISSION_PREFIX};

use crate::error::{CliError, Result};

/// Find the mission data folder inside `dir`.
///
/// Candidates are the direct subdirectories of `dir`, minus tooling folders
/// such as `.git`. A folder named `dayzOffline*` wins; otherwise the first
/// candidate in name order is used.
pub fn find_mission_folder(dir: &Path) -> Result<Option<PathBuf>> {
    let mut candidates: Vec<(String, PathBuf)> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if EXCLUDED_DIRS.contains(&name.as_str()) {
            continue;
        }
        candidates.push((name, entry.path()));
    }
    candidates.sort();

    let preferred = candidates
        .iter()
        .position(|(name, _)| name.starts_with(MISSION_PREFIX))
        .unwrap_or(0);

    let found = (!candidates.is_empty()).then(|| candidates.swap_remove(preferred).1);
    tracing::debug!(dir = %dir.display(), found = ?found, "mission folder discovery");
    Ok(found)
}

/// Like [`find_mission_folder`], but a missing folder is a user error.
pub fn require_mission_folder(dir: &Path) -> Result<PathBuf> {
    find_mission_folder(dir)?.ok_or_else(|| {
        CliError::user(format!(
            "No mission folder found in {}. Pass --source <dir>.",
            dir.display()
        ))
    })
}

/// Strip whitespace and one pair of surrounding quotes from a typed path.
///
/// Dragging a folder into a terminal often pastes it quoted.
pub fn clean_path_input(input: &str) -> &str {
    let trimmed = input.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.trim();
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    #[test]
    fn prefers_mission_prefix() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["aaa", "dayzOffline.chernarusplus", "zzz", ".git"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        let found = find_mission_folder(dir.path()).unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), "dayzOffline.chernarusplus");
    }

    #[test]
    fn falls_back_to_first_sorted_directory() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["mission_b", "mission_a", ".vscode", "__pycache__"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        fs::write(dir.path().join("README.md"), "readme").unwrap();
        let found = find_mission_folder(dir.path()).unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), "mission_a");
    }

    #[test]
    fn only_excluded_directories_means_none() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        assert!(find_mission_folder(dir.path()).unwrap().is_none());
        assert!(matches!(
            require_mission_folder(dir.path()),
            Err(CliError::User { .. })
        ));
    }

    #[rstest]
    #[case("/srv/mission", "/srv/mission")]
    #[case("  /srv/mission \n", "/srv/mission")]
    #[case("\"C:\\DayZ Server\\mpmissions\"", "C:\\DayZ Server\\mpmissions")]
    #[case("'/srv/my mission'", "/srv/my mission")]
    #[case("\"unbalanced", "\"unbalanced")]
    fn cleans_typed_paths(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(clean_path_input(input), expected);
    }
}
