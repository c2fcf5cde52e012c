//! Installer implementation
//!
//! The installer walks the source tree in sorted order and, for every file,
//! decides in this order:
//!
//! 1. the rule's strategy is `overwrite`: replace the target
//! 2. the target does not exist: copy the source
//! 3. JSON or XML: reconcile source into target
//! 4. anything else: replace the target
//!
//! Existing targets are backed up before they are replaced. A failure is
//! recorded against its file and the walk continues.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use modmerge_content::merge_document;
use modmerge_fs::{compute_content_checksum, create_backup, io, relative_path};
use modmerge_meta::{DocumentFormat, Rule, RuleConfig};

use super::report::{FileOutcome, FileReport, InstallReport};
use crate::{Error, Result};

/// Options for an install run
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// If true, compute every outcome (merges included) without writing
    /// files, directories or backups.
    pub dry_run: bool,
    /// Back up existing targets before replacing them.
    pub backups: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            backups: true,
        }
    }
}

/// What `apply` did to one file
struct Applied {
    outcome: FileOutcome,
    backup: Option<PathBuf>,
    checksum: String,
}

/// Reconciles a package's mission folder into a server's mission folder
pub struct Installer {
    config: RuleConfig,
    options: InstallOptions,
}

impl Installer {
    pub fn new(config: RuleConfig, options: InstallOptions) -> Self {
        Self { config, options }
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    pub fn options(&self) -> &InstallOptions {
        &self.options
    }

    /// Install every file under `source_root` into `target_root`.
    ///
    /// # Errors
    ///
    /// Returns an error only if either root is not a directory. Per-file
    /// problems are recorded in the report.
    pub fn install(&self, source_root: &Path, target_root: &Path) -> Result<InstallReport> {
        if !source_root.is_dir() {
            return Err(Error::SourceNotFound {
                path: source_root.to_path_buf(),
            });
        }
        if !target_root.is_dir() {
            return Err(Error::TargetNotFound {
                path: target_root.to_path_buf(),
            });
        }

        tracing::info!(
            source = %source_root.display(),
            target = %target_root.display(),
            dry_run = self.options.dry_run,
            "starting install"
        );

        let mut report = InstallReport::new(source_root, target_root, self.options.dry_run);

        for entry in WalkDir::new(source_root).min_depth(1).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(source_root).to_path_buf();
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                    let relative = relative_path(source_root, &path).unwrap_or_default();
                    report.record(self.failure(&relative, Error::Walk {
                        path,
                        message: e.to_string(),
                    }));
                    continue;
                }
            };

            let relative = relative_path(source_root, entry.path())?;
            let target = target_root.join(&relative);

            if entry.file_type().is_dir() {
                if !self.options.dry_run
                    && !target.is_dir()
                    && let Err(e) = io::ensure_dir(&target)
                {
                    tracing::warn!(path = %relative, error = %e, "could not create directory");
                }
                continue;
            }

            report.record(self.install_file(entry.path(), &target, &relative));
        }

        tracing::info!(
            files = report.summary.total(),
            merged = report.summary.merged,
            new = report.summary.new,
            failed = report.summary.failed,
            "install finished"
        );
        Ok(report)
    }

    /// Reconcile one source file with its target.
    ///
    /// `relative` is the `/`-separated path used for rule resolution.
    pub fn install_file(&self, source: &Path, target: &Path, relative: &str) -> FileReport {
        let format = DocumentFormat::from_path(relative);
        let rule = self.config.rule_set(format).resolve(relative);
        tracing::debug!(
            path = relative,
            format = format.label(),
            strategy = %rule.strategy,
            "resolved rule"
        );

        match self.apply(format, rule, source, target) {
            Ok(applied) => {
                tracing::info!(path = relative, outcome = applied.outcome.label(), "installed file");
                FileReport {
                    path: relative.to_string(),
                    format,
                    strategy: rule.strategy,
                    outcome: applied.outcome,
                    backup: applied.backup,
                    checksum: Some(applied.checksum),
                }
            }
            Err(e) => self.failure(relative, e),
        }
    }

    fn apply(
        &self,
        format: DocumentFormat,
        rule: &Rule,
        source: &Path,
        target: &Path,
    ) -> Result<Applied> {
        let source_bytes = io::read_bytes(source)?;

        if rule.is_overwrite() {
            return self.replace(target, source_bytes, FileOutcome::Overwritten);
        }
        if !target.exists() {
            return self.replace(target, source_bytes, FileOutcome::New);
        }
        if format == DocumentFormat::Opaque {
            return self.replace(target, source_bytes, FileOutcome::Updated);
        }

        let target_bytes = io::read_bytes(target)?;
        let merged = merge_document(format, &target_bytes, &source_bytes, rule)?;
        let checksum = compute_content_checksum(&merged);
        let backup = self.backup(target);
        if !self.options.dry_run {
            io::write_atomic(target, &merged)?;
        }
        Ok(Applied {
            outcome: FileOutcome::Merged,
            backup,
            checksum,
        })
    }

    /// Write `content` over `target`, backing up what was there.
    fn replace(&self, target: &Path, content: Vec<u8>, outcome: FileOutcome) -> Result<Applied> {
        let checksum = compute_content_checksum(&content);
        let backup = self.backup(target);
        if !self.options.dry_run {
            io::write_atomic(target, &content)?;
        }
        Ok(Applied {
            outcome,
            backup,
            checksum,
        })
    }

    /// Back up an existing target. Failure is logged and does not stop the
    /// write that follows.
    fn backup(&self, target: &Path) -> Option<PathBuf> {
        if !self.options.backups || self.options.dry_run {
            return None;
        }
        match create_backup(target) {
            Ok(backup) => backup,
            Err(e) => {
                tracing::warn!(path = %target.display(), error = %e, "backup failed");
                None
            }
        }
    }

    fn failure(&self, relative: &str, error: Error) -> FileReport {
        let format = DocumentFormat::from_path(relative);
        let rule = self.config.rule_set(format).resolve(relative);
        tracing::warn!(path = relative, error = %error, "file failed");
        FileReport {
            path: relative.to_string(),
            format,
            strategy: rule.strategy,
            outcome: FileOutcome::Failed {
                reason: error.to_string(),
                kind: error.failure_kind(),
            },
            backup: None,
            checksum: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modmerge_meta::{RuleSet, Strategy};
    use std::fs;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn overwrite_rule_applies_even_when_target_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("src/db/types.xml");
        let target = dir.path().join("dst/db/types.xml");
        write(&source, "<types/>");

        let config = RuleConfig {
            xml: RuleSet::new().with_rule("db/types.xml", Rule::new(Strategy::Overwrite)),
            ..RuleConfig::builtin()
        };
        let installer = Installer::new(config, InstallOptions::default());
        let report = installer.install_file(&source, &target, "db/types.xml");

        assert_eq!(report.outcome, FileOutcome::Overwritten);
        assert_eq!(fs::read_to_string(&target).unwrap(), "<types/>");
    }

    #[test]
    fn disabled_backups_leave_no_backup_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("src/mapgroupproto.bin");
        let target = dir.path().join("dst/mapgroupproto.bin");
        write(&source, "new");
        write(&target, "old");

        let options = InstallOptions {
            backups: false,
            ..InstallOptions::default()
        };
        let report = Installer::new(RuleConfig::builtin(), options).install_file(
            &source,
            &target,
            "mapgroupproto.bin",
        );

        assert_eq!(report.outcome, FileOutcome::Updated);
        assert!(report.backup.is_none());
        let names: Vec<_> = fs::read_dir(dir.path().join("dst")).unwrap().collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn unreadable_source_is_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let installer = Installer::new(RuleConfig::builtin(), InstallOptions::default());
        let report = installer.install_file(
            &dir.path().join("missing.json"),
            &dir.path().join("target.json"),
            "missing.json",
        );

        assert!(matches!(
            report.outcome,
            FileOutcome::Failed {
                kind: crate::FailureKind::Io,
                ..
            }
        ));
    }
}
