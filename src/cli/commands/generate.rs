use std::{collections::HashMap, fs, path::PathBuf};

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, GenerateSummary, GeneratedEntry};
use crate::{
    cli::args::GenerateCommand,
    core::{ExtractContext, ExtractedFile, TypeInfo},
    generator::{
        self, AnnotationKeys, GenerateError, GeneratedFile, ServiceCandidate, find_services,
    },
    issues::{InvalidServiceIssue, Issue},
};

pub fn generate(cmd: GenerateCommand) -> Result<CommandResult> {
    let ctx = ExtractContext::new(&cmd.common)?;
    // CLI paths are relative to the working directory, config paths to the source root
    let output_dir = cmd.output_dir.clone().or_else(|| ctx.output_dir());
    let keys = AnnotationKeys::from_config(&ctx.config);

    let (files, parse_errors) = ctx.extract_all();
    let mut issues: Vec<Issue> = parse_errors.into_iter().map(Issue::ParseError).collect();

    let mut outputs: Vec<GeneratedFile> = Vec::new();
    let mut claimed: HashMap<PathBuf, String> = HashMap::new();

    for extracted in &files {
        for ServiceCandidate { typ, result } in find_services(&extracted.file, &keys) {
            let def = match result {
                Ok(def) => def,
                Err(error) => {
                    issues.push(invalid_service(extracted, typ, error));
                    continue;
                }
            };

            let file = generator::generate(&def, &extracted.path, output_dir.as_deref())?;
            if let Some(other) = claimed.get(&file.path) {
                let error = GenerateError::DuplicateOutput {
                    path: file.path.display().to_string(),
                    other: other.clone(),
                };
                issues.push(invalid_service(extracted, typ, error));
                continue;
            }
            claimed.insert(file.path.clone(), def.name.clone());
            outputs.push(file);
        }
    }

    if !cmd.dry_run {
        for file in &outputs {
            write_generated(file)?;
        }
    }

    let generated = outputs
        .into_iter()
        .map(|f| GeneratedEntry {
            path: f.path,
            service: f.service,
            source: f.source,
        })
        .collect();

    Ok(CommandResult {
        summary: CommandSummary::Generate(GenerateSummary {
            files_scanned: ctx.files.len(),
            generated,
            is_dry_run: cmd.dry_run,
            skipped_paths: ctx.skipped_count,
        }),
        issues,
    })
}

fn invalid_service(extracted: &ExtractedFile, typ: &TypeInfo, error: GenerateError) -> Issue {
    tracing::debug!(path = %extracted.path, name = %typ.node().name, %error, "rejected declaration");
    Issue::InvalidService(InvalidServiceIssue {
        file_path: extracted.path.clone(),
        line: typ.node().line,
        type_name: typ.node().name.clone(),
        error,
    })
}

fn write_generated(file: &GeneratedFile) -> Result<()> {
    if let Some(parent) = file.path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(&file.path, &file.contents)
        .with_context(|| format!("Failed to write {}", file.path.display()))?;
    tracing::info!(path = %file.path.display(), service = %file.service, "wrote client");
    Ok(())
}
