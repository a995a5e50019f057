//! Annotation extraction.
//!
//! Walks one parsed TypeScript module and builds its [`FileInfo`]: the file's
//! own annotations, then every type declaration in source order with its
//! annotated members.
//!
//! ## Module Structure
//!
//! - `doc_block`: Selecting the doc comment block of a node
//! - `visitor`: Entry, file and type visitors

mod doc_block;
mod visitor;


use swc_ecma_visit::VisitWith;

use crate::core::{annotation::FileInfo, parsers::typescript::ParsedSource};

pub use visitor::{EntryVisitor, SourceView};

/// Extract the annotation hierarchy of one parsed file.
///
/// Never fails: comments that are not annotations are skipped. Running it
/// twice on the same tree gives equal results.
pub fn extract_file(parsed: &ParsedSource, path: &str) -> FileInfo {
    let view = SourceView {
        source_map: &parsed.source_map,
        comments: &parsed.comments,
    };
    let mut entry = EntryVisitor::new(view, path);
    parsed.module.visit_with(&mut entry);
    let file = entry.finish();

    tracing::debug!(
        path,
        annotations = file.group.len(),
        types = file.types.len(),
        "extracted annotations"
    );
    file
}
