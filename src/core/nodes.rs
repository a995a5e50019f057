//! Owned descriptions of the syntax nodes that carry annotations.
//!
//! The extractor copies what downstream consumers need out of the swc AST
//! into these values, so the annotation model never borrows parser types.

use std::fmt;

use serde::Serialize;

/// The source file itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileNode {
    /// Path the file was read from.
    pub path: String,
    /// File stem, used as the import specifier of generated code.
    pub module: String,
}

impl FileNode {
    pub fn new(path: &str) -> Self {
        let module = std::path::Path::new(path)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path: path.to_string(),
            module,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeKind {
    Interface,
    TypeAlias,
    Class,
}

/// A type declaration: interface, type alias or class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeNode {
    pub name: String,
    pub kind: TypeKind,
    /// 1-based line of the declaration.
    pub line: usize,
}

/// A property or method of a type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberNode {
    /// Member name as written in source.
    pub name: String,
    #[serde(flatten)]
    pub kind: MemberKind,
    /// Declared with `?`.
    pub optional: bool,
    /// 1-based line of the member.
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MemberKind {
    Property {
        type_expr: Option<TypeExpr>,
    },
    Method {
        params: Vec<Param>,
        returns: Option<TypeExpr>,
    },
}

impl MemberNode {
    pub fn is_method(&self) -> bool {
        matches!(self.kind, MemberKind::Method { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    pub type_expr: Option<TypeExpr>,
}

/// A type annotation.
///
/// Plain and generic type references (`User`, `Promise<User>`) are kept
/// structured; everything else is kept as source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeExpr {
    Named { name: String, args: Vec<TypeExpr> },
    Other(String),
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Name of a non-generic type reference.
    pub fn as_plain_name(&self) -> Option<&str> {
        match self {
            TypeExpr::Named { name, args } if args.is_empty() => Some(name),
            _ => None,
        }
    }

    /// The single type argument of `wrapper<T>`, e.g. `T` of `Promise<T>`.
    pub fn unwrap_generic(&self, wrapper: &str) -> Option<&TypeExpr> {
        match self {
            TypeExpr::Named { name, args } if name == wrapper && args.len() == 1 => args.first(),
            _ => None,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named { name, args } if args.is_empty() => write!(f, "{}", name),
            TypeExpr::Named { name, args } => {
                write!(f, "{}<", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ">")
            }
            TypeExpr::Other(text) => write!(f, "{}", text),
        }
    }
}
