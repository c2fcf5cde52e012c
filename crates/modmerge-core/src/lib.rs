//! Install engine for mod packages
//!
//! `modmerge-core` sits between the leaf crates and the CLI:
//!
//! ```text
//!                 modmerge-cli
//!                      |
//!                modmerge-core
//!                      |
//!     +----------------+-----------------+
//!     |                |                 |
//! modmerge-fs    modmerge-meta    modmerge-content
//! ```
//!
//! An [`Installer`] walks a package's mission folder and reconciles every
//! file with its counterpart in the server's mission folder. Each file gets
//! exactly one [`FileOutcome`]; a failure on one file never stops the run.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use modmerge_core::{InstallOptions, Installer};
//! use modmerge_meta::RuleConfig;
//!
//! fn example() -> modmerge_core::Result<()> {
//!     let installer = Installer::new(RuleConfig::builtin(), InstallOptions::default());
//!     let report = installer.install(Path::new("dayzOffline.chernarusplus"), Path::new("/srv/mission"))?;
//!     println!("{} merged", report.summary.merged);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod install;

pub use error::{Error, FailureKind, Result};
pub use install::{FileOutcome, FileReport, InstallOptions, InstallReport, Installer, OutcomeCounts};
