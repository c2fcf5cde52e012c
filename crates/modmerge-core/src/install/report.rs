//! Install reports

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use modmerge_content::JsonHandler;
use modmerge_meta::{DocumentFormat, Strategy};

use crate::error::FailureKind;

/// What happened to one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Rule strategy is `overwrite`; the source replaced the target.
    Overwritten,
    /// The target did not exist; the source was copied.
    New,
    /// Source and target were reconciled into a new target.
    Merged,
    /// Opaque file; the source replaced the existing target.
    Updated,
    /// Nothing was written for this file.
    Failed { reason: String, kind: FailureKind },
}

impl FileOutcome {
    /// Status tag printed in front of the file path.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Overwritten => "OVERWRITTEN",
            Self::New => "NEW",
            Self::Merged => "MERGED",
            Self::Updated => "UPDATED",
            Self::Failed { .. } => "ERROR",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Report for one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    /// Path relative to the source root, `/`-separated
    pub path: String,
    pub format: DocumentFormat,
    /// Strategy of the rule that applied
    pub strategy: Strategy,
    #[serde(flatten)]
    pub outcome: FileOutcome,
    /// Backup taken of the previous target, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup: Option<PathBuf>,
    /// Checksum of the content written (or that would be written)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

/// Number of files per outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub overwritten: usize,
    pub new: usize,
    pub merged: usize,
    pub updated: usize,
    pub failed: usize,
}

impl OutcomeCounts {
    fn count(&mut self, outcome: &FileOutcome) {
        let slot = match outcome {
            FileOutcome::Overwritten => &mut self.overwritten,
            FileOutcome::New => &mut self.new,
            FileOutcome::Merged => &mut self.merged,
            FileOutcome::Updated => &mut self.updated,
            FileOutcome::Failed { .. } => &mut self.failed,
        };
        *slot += 1;
    }

    pub fn total(&self) -> usize {
        self.overwritten + self.new + self.merged + self.updated + self.failed
    }
}

/// Report of a whole install run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallReport {
    pub source_root: PathBuf,
    pub target_root: PathBuf,
    /// Outcomes are what would have happened; nothing was written.
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    /// One entry per source file, in walk order
    pub entries: Vec<FileReport>,
    pub summary: OutcomeCounts,
}

impl InstallReport {
    pub fn new(source_root: impl Into<PathBuf>, target_root: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            source_root: source_root.into(),
            target_root: target_root.into(),
            dry_run,
            started_at: Utc::now(),
            entries: Vec::new(),
            summary: OutcomeCounts::default(),
        }
    }

    /// Append an entry and update the summary.
    pub fn record(&mut self, entry: FileReport) {
        self.summary.count(&entry.outcome);
        self.entries.push(entry);
    }

    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.entries.iter().filter(|e| e.outcome.is_failure())
    }

    /// Find the entry for a relative path.
    pub fn entry(&self, path: &str) -> Option<&FileReport> {
        self.entries.iter().find(|e| e.path == path)
    }

    /// Render the report as JSON with the same layout as merged documents.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(JsonHandler::to_pretty_string(self)?)
    }
}
