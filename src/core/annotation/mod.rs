//! Annotation model.
//!
//! An annotation is a `@key value` line inside a doc comment. Annotations are
//! grouped per syntax node and the groups nest as file → type → field.
//!
//! ## Module Structure
//!
//! - `single`: `Annotation` and the one-comment parser
//! - `group`: `Group<N>` and the `FileInfo`/`TypeInfo`/`FieldInfo` hierarchy

mod group;
mod single;

pub use group::{FieldInfo, FileInfo, Group, TypeInfo};
pub use single::Annotation;
