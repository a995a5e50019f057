use std::fs;

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, InspectSummary};
use crate::{
    cli::args::InspectCommand,
    core::extract_source,
    issues::{Issue, ParseErrorIssue},
};

/// Extract one file and render the result as JSON.
///
/// A file that does not parse is reported as an issue. A file that cannot
/// be read is an error.
pub fn inspect(cmd: InspectCommand) -> Result<CommandResult> {
    let path = cmd.file.to_string_lossy().into_owned();
    let code = fs::read_to_string(&cmd.file).with_context(|| format!("Failed to read {}", path))?;

    match extract_source(&path, code) {
        Ok(file) => {
            let json = serde_json::to_string_pretty(&file)
                .context("Failed to serialize extracted annotations")?;
            Ok(CommandResult::new(CommandSummary::Inspect(InspectSummary {
                json: Some(json),
            })))
        }
        Err(e) => Ok(CommandResult {
            summary: CommandSummary::Inspect(InspectSummary { json: None }),
            issues: vec![Issue::ParseError(ParseErrorIssue {
                file_path: path,
                error: e.to_string(),
            })],
        }),
    }
}
