use serde::Serialize;

/// A single `@key value` annotation parsed from one comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    /// Text between `@` and the first space.
    pub key: String,
    /// Remainder of the comment after the first space. Empty when the
    /// annotation has no value.
    pub value: String,
}

impl Annotation {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Parse one comment literal (marker included) into an annotation.
    ///
    /// Accepts `// ...` and `/* ... */` comments. Returns `None` when the
    /// comment uses another marker or contains no `@`. Only the first `@`
    /// is considered; a block comment keeps its inner newlines verbatim.
    ///
    /// ```
    /// use stubgen::core::annotation::Annotation;
    ///
    /// let a = Annotation::from_comment("// @Path /users").unwrap();
    /// assert_eq!(a.key, "Path");
    /// assert_eq!(a.value, "/users");
    ///
    /// assert!(Annotation::from_comment("// plain comment").is_none());
    /// assert!(Annotation::from_comment("/// @doc style").is_none());
    /// ```
    pub fn from_comment(text: &str) -> Option<Self> {
        let body = if let Some(rest) = text.strip_prefix("// ") {
            rest
        } else if let Some(rest) = text.strip_prefix("/* ") {
            rest.strip_suffix("*/").unwrap_or(rest)
        } else {
            return None;
        };

        let (_, annotation) = body.split_once('@')?;
        let (key, value) = annotation.split_once(' ').unwrap_or((annotation, ""));

        Some(Self::new(key, value))
    }
}
