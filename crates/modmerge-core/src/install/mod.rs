//! Installing a package's mission folder over a server's mission folder
//!
//! - **engine**: walks the source tree and decides what happens to each file
//! - **report**: per-file outcomes and the run summary

mod engine;
mod report;

pub use engine::{InstallOptions, Installer};
pub use report::{FileOutcome, FileReport, InstallReport, OutcomeCounts};
