use std::ops::Deref;

use serde::Serialize;

use super::single::Annotation;
use crate::core::nodes::{FileNode, MemberNode, TypeNode};

/// A syntax node together with the annotations found in its doc comments.
///
/// The node is fixed at construction. Annotations keep comment order, so a
/// repeated key (e.g. `parameter`) can be matched positionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group<N> {
    node: N,
    annotations: Vec<Annotation>,
}

impl<N> Group<N> {
    pub fn new(node: N, annotations: Vec<Annotation>) -> Self {
        Self { node, annotations }
    }

    /// Build a group from a doc comment block.
    ///
    /// Each comment literal is run through [`Annotation::from_comment`];
    /// comments that are not annotations are dropped. An empty block gives
    /// an empty group.
    pub fn from_comments<I, S>(node: N, comments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let annotations = comments
            .into_iter()
            .filter_map(|c| Annotation::from_comment(c.as_ref()))
            .collect();
        Self::new(node, annotations)
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// First annotation with the given key. Later duplicates are ignored;
    /// use [`Group::get_all`] to see them.
    pub fn get(&self, key: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.key == key)
    }

    /// Every annotation with the given key, in comment order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Annotation> + 'a {
        self.annotations.iter().filter(move |a| a.key == key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }
}

/// Annotations of a property or method. Leaf of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    #[serde(flatten)]
    pub group: Group<MemberNode>,
}

/// Annotations of a type declaration and of its annotated members.
///
/// Only members carrying at least one annotation appear in `fields`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeInfo {
    #[serde(flatten)]
    pub group: Group<TypeNode>,
    pub fields: Vec<FieldInfo>,
}

/// Annotations of a whole source file.
///
/// Every type declaration of the file appears in `types`, annotated or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    #[serde(flatten)]
    pub group: Group<FileNode>,
    pub types: Vec<TypeInfo>,
}

impl Deref for FieldInfo {
    type Target = Group<MemberNode>;

    fn deref(&self) -> &Self::Target {
        &self.group
    }
}

impl Deref for TypeInfo {
    type Target = Group<TypeNode>;

    fn deref(&self) -> &Self::Target {
        &self.group
    }
}

impl Deref for FileInfo {
    type Target = Group<FileNode>;

    fn deref(&self) -> &Self::Target {
        &self.group
    }
}
