//! HTTP client generation.
//!
//! Types carrying the marker annotation become a [`ServiceDefinition`],
//! which is rendered into a TypeScript class implementing the declaration.
//! Output goes to `<snake_case(name)>_gen.ts`, next to the source file or
//! under the configured output directory.

pub mod service;
pub mod template;

use std::path::{Component, Path, PathBuf};

use anyhow::Result;

pub use service::{
    AnnotationKeys, GenerateError, ServiceCandidate, ServiceDefinition, ServiceMethod,
    find_services,
};

use crate::{config::GENERATED_FILE_SUFFIX, utils::underscore_name};

/// One rendered client, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    /// Source file the service was declared in.
    pub source: String,
    pub service: String,
    pub contents: String,
}

/// Where the client of `service_name` declared in `source` is written.
pub fn output_path(source: &Path, service_name: &str, output_dir: Option<&Path>) -> PathBuf {
    let file_name = format!("{}{}", underscore_name(service_name), GENERATED_FILE_SUFFIX);
    match output_dir {
        Some(dir) => dir.join(file_name),
        None => source
            .parent()
            .map(|p| p.join(&file_name))
            .unwrap_or_else(|| PathBuf::from(&file_name)),
    }
}

/// Module specifier that imports `source` from a file in `from_dir`.
///
/// Both paths are taken as-is, so they must be relative to the same base.
pub fn import_path(from_dir: &Path, source: &Path) -> String {
    let module_dir = source.parent().unwrap_or(Path::new(""));
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let from: Vec<Component> = normal_components(from_dir);
    let to: Vec<Component> = normal_components(module_dir);
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut parts: Vec<String> = vec!["..".to_string(); from.len() - common];
    parts.extend(
        to[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    parts.push(stem);

    let joined = parts.join("/");
    if joined.starts_with("..") {
        joined
    } else {
        format!("./{}", joined)
    }
}

fn normal_components(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Module specifier for `source` as seen from `from_dir`, with either path
/// relative to the working directory or absolute.
pub fn resolve_import(from_dir: &Path, source: &Path) -> Result<String> {
    let has_parent = |p: &Path| p.components().any(|c| c == Component::ParentDir);
    let needs_absolute = from_dir.is_absolute() != source.is_absolute()
        || has_parent(from_dir)
        || has_parent(source);
    if !needs_absolute {
        return Ok(import_path(from_dir, source));
    }
    Ok(import_path(&lexical_absolute(from_dir)?, &lexical_absolute(source)?))
}

/// Absolute form of `path` with `.` and `..` folded away.
fn lexical_absolute(path: &Path) -> Result<PathBuf> {
    let mut out = PathBuf::new();
    for component in std::path::absolute(path)?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

/// Render the client of `def`, declared in `source`.
pub fn generate(
    def: &ServiceDefinition,
    source: &str,
    output_dir: Option<&Path>,
) -> Result<GeneratedFile> {
    let source_path = Path::new(source);
    let path = output_path(source_path, &def.name, output_dir);
    let from_dir = path.parent().unwrap_or(Path::new(""));
    let import = resolve_import(from_dir, source_path)?;
    let contents = template::render(def, source, &import)?;

    tracing::debug!(service = %def.name, path = %path.display(), "rendered client");
    Ok(GeneratedFile {
        path,
        source: source.to_string(),
        service: def.name.clone(),
        contents,
    })
}
