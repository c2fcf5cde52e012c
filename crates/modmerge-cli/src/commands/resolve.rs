//! Resolve command implementation

use std::path::Path;

use serde_json::json;

use modmerge_content::JsonHandler;
use modmerge_meta::DocumentFormat;

use super::load_rules;
use crate::error::Result;

/// Print the rule that applies to `path` as JSON.
pub fn run_resolve(cwd: &Path, path: &str, config: Option<&Path>) -> Result<()> {
    let config = load_rules(cwd, config)?;
    let format = DocumentFormat::from_path(path);
    let rules = config.rule_set(format);

    let output = match rules.lookup(path) {
        Some(found) => json!({
            "path": path,
            "format": format,
            "pattern": found.pattern,
            "match": found.kind,
            "rule": found.rule,
        }),
        None => json!({
            "path": path,
            "format": format,
            "pattern": null,
            "match": null,
            "rule": rules.resolve(path),
        }),
    };

    println!("{}", JsonHandler::to_pretty_string(&output)?);
    Ok(())
}
