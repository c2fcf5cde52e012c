//! Merge command implementation

use std::io::Write;
use std::path::Path;

use modmerge_content::merge_document;
use modmerge_fs::io;
use modmerge_meta::DocumentFormat;

use super::load_rules;
use crate::error::{CliError, Result};

/// Merge `source` into `target` and write the result to `output` or stdout.
///
/// The rule is resolved from `rule_path` when given, otherwise from the
/// source file name. Only the former can match directory patterns.
pub fn run_merge(
    cwd: &Path,
    target: &Path,
    source: &Path,
    config: Option<&Path>,
    output: Option<&Path>,
    rule_path: Option<&str>,
) -> Result<()> {
    let config = load_rules(cwd, config)?;

    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::user(format!("{} is not a file", source.display())))?;
    let format = DocumentFormat::from_path(name.as_str());
    if format == DocumentFormat::Opaque {
        return Err(CliError::user(format!(
            "{name} is neither JSON nor XML and cannot be merged"
        )));
    }
    let rule = config.rule_set(format).resolve(rule_path.unwrap_or(&name));

    let target_bytes = io::read_bytes(&cwd.join(target))?;
    let source_bytes = io::read_bytes(&cwd.join(source))?;
    let merged = merge_document(format, &target_bytes, &source_bytes, rule)?;

    match output {
        Some(path) => io::write_atomic(&cwd.join(path), &merged)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&merged)?;
            if !merged.ends_with(b"\n") {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}
