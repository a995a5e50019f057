use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context as _, Result};
use rayon::prelude::*;
use swc_common::SourceMap;

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        annotation::FileInfo,
        extract::extract_file,
        file_scanner::{ScanOptions, scan_files},
        parsers::typescript::parse_ts_source,
    },
    issues::ParseErrorIssue,
};

/// Annotations of one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    pub path: String,
    pub file: FileInfo,
}

/// Read, parse and extract a single file.
pub fn extract_path(path: &str) -> Result<FileInfo> {
    let code = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    extract_source(path, code)
}

/// Parse and extract source text that was read from `path`.
pub fn extract_source(path: &str, code: String) -> Result<FileInfo> {
    let source_map = Arc::new(SourceMap::default());
    let parsed = parse_ts_source(code, path, source_map)?;
    Ok(extract_file(&parsed, path))
}

/// Project-wide extraction.
///
/// Configuration priority, highest first:
/// 1. CLI arguments
/// 2. `.stubgenrc.json`, searched upward from the source root
/// 3. Built-in defaults
pub struct ExtractContext {
    /// Merged configuration.
    pub config: Config,

    /// Directory scanned for sources.
    pub root_dir: PathBuf,

    /// Config file in use, `None` for defaults.
    pub config_path: Option<PathBuf>,

    /// Source files in path order.
    pub files: BTreeSet<String>,

    /// Paths that could not be accessed while scanning.
    pub skipped_count: usize,
}

impl ExtractContext {
    /// Load config and scan the source root.
    ///
    /// # Errors
    ///
    /// Returns error if the config file cannot be read, parsed or validated.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        Self::from_root(root_dir)
    }

    pub fn from_root(root_dir: PathBuf) -> Result<Self> {
        let loaded = load_config(&root_dir)?;
        if loaded.path.is_none() {
            tracing::debug!("no config file found, using default configuration");
        }
        let config = loaded.config;

        let scan_result = scan_files(
            &root_dir,
            ScanOptions {
                includes: &config.includes,
                ignores: &config.ignores,
                ignore_test_files: config.ignore_test_files,
            },
        );

        Ok(Self {
            config,
            root_dir,
            config_path: loaded.path,
            files: scan_result.files,
            skipped_count: scan_result.skipped_count,
        })
    }

    /// Output directory for generated files, resolved against the source root.
    pub fn output_dir(&self) -> Option<PathBuf> {
        self.config.output_dir.as_ref().map(|dir| {
            let dir = Path::new(dir);
            if dir.is_absolute() {
                dir.to_path_buf()
            } else {
                self.root_dir.join(dir)
            }
        })
    }

    /// Extract every scanned file.
    ///
    /// Files are read and parsed in parallel, each with its own `SourceMap`.
    /// Results come back in path order. A file that cannot be read or parsed
    /// becomes a [`ParseErrorIssue`] and is left out.
    pub fn extract_all(&self) -> (Vec<ExtractedFile>, Vec<ParseErrorIssue>) {
        let results: Vec<(String, Result<FileInfo>)> = self
            .files
            .par_iter()
            .map(|path| (path.clone(), extract_path(path)))
            .collect();

        let mut extracted = Vec::with_capacity(results.len());
        let mut errors = Vec::new();

        // par_iter over a BTreeSet keeps the set's order on collect
        for (path, result) in results {
            match result {
                Ok(file) => {
                    tracing::debug!(path = %path, types = file.types.len(), "extracted");
                    extracted.push(ExtractedFile { path, file });
                }
                Err(e) => {
                    tracing::debug!(path = %path, error = %e, "skipping file");
                    errors.push(ParseErrorIssue {
                        file_path: path,
                        error: e.to_string(),
                    });
                }
            }
        }

        (extracted, errors)
    }
}
