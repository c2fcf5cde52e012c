//! Install configuration: one rule set per document format.
//!
//! The configuration file is either JSON or TOML, picked by extension:
//!
//! ```json
//! {
//!   "json": { "*": { "append_keys": ["objectSpawnersArr"] } },
//!   "xml":  { "db/*.xml": { "id_attributes": ["name"] },
//!             "cfgweather.xml": { "strategy": "settings" } },
//!   "other": { "*.bin": { "strategy": "overwrite" } }
//! }
//! ```
//!
//! A configuration file replaces the built-in defaults entirely; the two are
//! never overlaid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use modmerge_fs::{CONFIG_FILE_NAMES, NormalizedPath, io};

use crate::format::DocumentFormat;
use crate::resolver::RuleSet;
use crate::rule::{Rule, Strategy};
use crate::{Error, Result};

/// Append keys of the built-in key/value rule
const DEFAULT_APPEND_KEYS: &[&str] = &["objectSpawnersArr", "playerRestrictedAreaFiles"];

/// Identity attributes of the built-in node-tree rule
const DEFAULT_ID_ATTRIBUTES: &[&str] = &["name", "pos"];

/// Rule sets for every document format
///
/// Unknown top-level keys are rejected so that a misspelled section or a
/// flat pattern map does not load as an empty configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConfig {
    /// Rules for key/value (`.json`) documents
    pub json: RuleSet,
    /// Rules for node-tree (`.xml`) documents
    pub xml: RuleSet,
    /// Rules for every other file; only `overwrite` has an effect
    pub other: RuleSet,
}

impl RuleConfig {
    /// Configuration used when no configuration file is present.
    pub fn builtin() -> Self {
        Self {
            json: RuleSet::new().with_rule(
                "*",
                Rule::default().with_append_keys(DEFAULT_APPEND_KEYS.iter().copied()),
            ),
            xml: RuleSet::new().with_rule(
                "*",
                Rule::new(Strategy::Collection)
                    .with_id_attributes(DEFAULT_ID_ATTRIBUTES.iter().copied()),
            ),
            other: RuleSet::new(),
        }
    }

    /// Rule set that applies to documents of `format`.
    pub fn rule_set(&self, format: DocumentFormat) -> &RuleSet {
        match format {
            DocumentFormat::KeyValue => &self.json,
            DocumentFormat::NodeTree => &self.xml,
            DocumentFormat::Opaque => &self.other,
        }
    }

    /// Resolve the effective rule for a relative document path.
    pub fn resolve(&self, path: &str) -> &Rule {
        self.rule_set(DocumentFormat::from_path(path)).resolve(path)
    }

    /// Parse configuration text in the given format (`"json"` or `"toml"`).
    pub fn from_str_as(content: &str, extension: &str, origin: &Path) -> Result<Self> {
        match extension.to_lowercase().as_str() {
            "json" => serde_json::from_str(content).map_err(|e| Error::InvalidConfig {
                path: origin.to_path_buf(),
                format: "JSON".into(),
                message: e.to_string(),
            }),
            "toml" => toml::from_str(content).map_err(|e| Error::InvalidConfig {
                path: origin.to_path_buf(),
                format: "TOML".into(),
                message: e.to_string(),
            }),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }
}

/// Load a configuration file. Format is detected from the extension.
pub fn load_config(path: &Path) -> Result<RuleConfig> {
    let extension = NormalizedPath::new(path)
        .extension()
        .unwrap_or("")
        .to_string();
    let bytes = io::read_bytes(path)?;
    let content = String::from_utf8(bytes).map_err(|e| Error::InvalidConfig {
        path: path.to_path_buf(),
        format: extension.to_uppercase(),
        message: e.to_string(),
    })?;
    let config = RuleConfig::from_str_as(&content, &extension, path)?;
    tracing::info!(
        path = %path.display(),
        json_rules = config.json.len(),
        xml_rules = config.xml.len(),
        other_rules = config.other.len(),
        "loaded install configuration"
    );
    Ok(config)
}

/// Find and load the configuration file in `dir`.
///
/// Returns the built-in configuration when none of the known file names
/// exist. A file that exists but does not parse is an error.
pub fn discover_config(dir: &Path) -> Result<(Option<PathBuf>, RuleConfig)> {
    for name in CONFIG_FILE_NAMES {
        let candidate = dir.join(name);
        if candidate.is_file() {
            let config = load_config(&candidate)?;
            return Ok((Some(candidate), config));
        }
    }
    tracing::debug!(dir = %dir.display(), "no configuration file, using built-in rules");
    Ok((None, RuleConfig::builtin()))
}
