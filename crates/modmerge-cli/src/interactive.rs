//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based input.

use std::path::PathBuf;

use dialoguer::Input;

use crate::discovery::clean_path_input;
use crate::error::Result;

/// Ask for the server's mission folder until an existing directory is given.
pub fn prompt_target_dir() -> Result<PathBuf> {
    let input: String = Input::new()
        .with_prompt("Server mission folder")
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            let path = clean_path_input(input);
            if path.is_empty() {
                Err("Please enter a path".to_string())
            } else if !std::path::Path::new(path).is_dir() {
                Err(format!("{path} is not a directory"))
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    Ok(PathBuf::from(clean_path_input(&input)))
}
