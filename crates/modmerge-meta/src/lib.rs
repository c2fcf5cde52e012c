//! Merge rules and install configuration.
//!
//! A [`RuleSet`] maps path patterns to [`Rule`]s; [`RuleSet::resolve`] picks
//! the single rule that applies to one document. [`RuleConfig`] groups one
//! rule set per [`DocumentFormat`] and is what the configuration file holds.

pub mod config;
pub mod error;
pub mod format;
pub mod resolver;
pub mod rule;

pub use config::{RuleConfig, discover_config, load_config};
pub use error::{Error, Result};
pub use format::DocumentFormat;
pub use resolver::{MatchKind, RuleMatch, RuleSet};
pub use rule::{Rule, Strategy};
