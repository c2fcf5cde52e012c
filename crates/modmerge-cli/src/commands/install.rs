//! Install command implementation

use std::path::Path;

use colored::{ColoredString, Colorize};

use modmerge_core::{FileOutcome, InstallOptions, InstallReport, Installer};

use super::load_rules;
use crate::cli::InstallArgs;
use crate::discovery::require_mission_folder;
use crate::error::{CliError, Result};
use crate::interactive::prompt_target_dir;

/// Run the install command
///
/// Per-file failures are printed but do not change the exit status.
pub fn run_install(cwd: &Path, args: &InstallArgs) -> Result<()> {
    let config = load_rules(cwd, args.config.as_deref())?;

    let source = match &args.source {
        Some(source) => cwd.join(source),
        None => require_mission_folder(cwd)?,
    };
    let target = match &args.target {
        Some(target) => cwd.join(target),
        None => prompt_target_dir()?,
    };
    if !target.is_dir() {
        return Err(CliError::user(format!(
            "Target folder {} does not exist",
            target.display()
        )));
    }

    if !args.json {
        let verb = if args.dry_run { "Previewing" } else { "Installing" };
        println!(
            "{} {} {} into {}",
            "=>".blue().bold(),
            verb,
            source.display().to_string().cyan(),
            target.display().to_string().cyan()
        );
    }

    let options = InstallOptions {
        dry_run: args.dry_run,
        backups: !args.no_backup,
    };
    let report = Installer::new(config, options).install(&source, &target)?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn status_tag(outcome: &FileOutcome) -> ColoredString {
    let tag = format!("[{}]", outcome.label());
    match outcome {
        FileOutcome::Overwritten => tag.magenta().bold(),
        FileOutcome::New => tag.green().bold(),
        FileOutcome::Merged => tag.cyan().bold(),
        FileOutcome::Updated => tag.yellow().bold(),
        FileOutcome::Failed { .. } => tag.red().bold(),
    }
}

fn print_report(report: &InstallReport) {
    for entry in &report.entries {
        match &entry.outcome {
            FileOutcome::Failed { reason, .. } => {
                println!("{} {}: {}", status_tag(&entry.outcome), entry.path, reason);
            }
            outcome => println!("{} {}", status_tag(outcome), entry.path),
        }
    }

    let summary = &report.summary;
    println!();
    if report.dry_run {
        println!("{}", "Dry run: no files were written.".yellow());
    }
    println!(
        "{} {} files: {} merged, {} new, {} updated, {} overwritten, {} failed",
        if report.has_failures() {
            "!!".red().bold()
        } else {
            "OK".green().bold()
        },
        summary.total(),
        summary.merged,
        summary.new,
        summary.updated,
        summary.overwritten,
        summary.failed
    );
}
