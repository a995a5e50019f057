use std::path::PathBuf;

use super::super::exit_status::ExitStatus;
use crate::issues::{Issue, Severity};

#[derive(Debug)]
pub enum CommandSummary {
    Generate(GenerateSummary),
    Inspect(InspectSummary),
    Init(InitSummary),
}

/// One client, written or (in a dry run) to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedEntry {
    pub path: PathBuf,
    pub service: String,
    pub source: String,
}

#[derive(Debug)]
pub struct GenerateSummary {
    pub files_scanned: usize,
    pub generated: Vec<GeneratedEntry>,
    pub is_dry_run: bool,
    /// Paths that could not be accessed while scanning.
    pub skipped_paths: usize,
}

#[derive(Debug)]
pub struct InspectSummary {
    /// Pretty JSON of the extracted file, `None` if it did not parse.
    pub json: Option<String>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
}

/// Result of running a stubgen command
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Parse errors and rejected declarations.
    pub issues: Vec<Issue>,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        Self {
            summary,
            issues: Vec::new(),
        }
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .count()
    }

    pub fn parse_error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, Issue::ParseError(_)))
            .count()
    }

    pub fn exit_status(&self) -> ExitStatus {
        if self.error_count() > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
