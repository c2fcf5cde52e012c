//! Command implementations

mod install;
mod merge;
mod resolve;

use std::path::Path;

use modmerge_meta::{RuleConfig, discover_config, load_config};

use crate::error::Result;

pub use install::run_install;
pub use merge::run_merge;
pub use resolve::run_resolve;

/// Load the rule configuration for a command.
///
/// An explicit path must load; otherwise the working directory is searched
/// and the built-in rules are used when nothing is found.
pub(crate) fn load_rules(cwd: &Path, explicit: Option<&Path>) -> Result<RuleConfig> {
    match explicit {
        Some(path) => Ok(load_config(&cwd.join(path))?),
        None => {
            let (found, config) = discover_config(cwd)?;
            match found {
                Some(path) => tracing::debug!(path = %path.display(), "using configuration file"),
                None => tracing::debug!("using built-in rules"),
            }
            Ok(config)
        }
    }
}
