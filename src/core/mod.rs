//! Core extraction engine.
//!
//! ## Module Structure
//!
//! - `annotation`: Annotation model (`Annotation`, `Group<N>`, file/type/field infos)
//! - `nodes`: Owned node descriptors used as the `N` of each group
//! - `parsers`: TypeScript parser adapter (swc)
//! - `extract`: Visitors building a `FileInfo` from one parsed file
//! - `file_scanner`: Source file discovery
//! - `context`: Config + scan + parallel parse/extract for a project

pub mod annotation;
pub mod context;
pub mod extract;
pub mod file_scanner;
pub mod nodes;
pub mod parsers;

pub use annotation::{Annotation, FieldInfo, FileInfo, Group, TypeInfo};
pub use context::{ExtractContext, ExtractedFile, extract_path, extract_source};
pub use extract::extract_file;
