//! Issue types reported by `generate`.
//!
//! Each issue is self-contained: the reporter prints it without looking
//! anything else up.

use enum_dispatch::enum_dispatch;

use crate::generator::GenerateError;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    ParseError,
    InvalidService,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ParseError => write!(f, "parse-error"),
            Rule::InvalidService => write!(f, "invalid-service"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// A source file that could not be read or parsed. The file is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

/// A marked declaration that cannot become a client. No file is written for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidServiceIssue {
    pub file_path: String,
    /// 1-based line of the declaration.
    pub line: usize,
    /// Declared type name.
    pub type_name: String,
    pub error: GenerateError,
}

impl InvalidServiceIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::InvalidService
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ParseError(ParseErrorIssue),
    InvalidService(InvalidServiceIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location of an issue. Line is `None` for file-level issues.
pub struct ReportLocation<'a> {
    pub path: &'a str,
    pub line: Option<usize>,
}

/// Trait for types that can be reported to CLI.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation {
            path: &self.file_path,
            line: None,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for InvalidServiceIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation {
            path: &self.file_path,
            line: Some(self.line),
        }
    }

    fn message(&self) -> String {
        self.error.to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("in declaration of {}", self.type_name))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_rule_display() {
        assert_eq!(Rule::ParseError.to_string(), "parse-error");
        assert_eq!(Rule::InvalidService.to_string(), "invalid-service");
    }

    #[test]
    fn test_invalid_service_report() {
        let issue: Issue = InvalidServiceIssue {
            file_path: "src/user.ts".to_string(),
            line: 3,
            type_name: "UserService".to_string(),
            error: GenerateError::InvalidReturn {
                method: "get".to_string(),
            },
        }
        .into();

        assert_eq!(issue.severity(), Severity::Error);
        assert_eq!(issue.rule(), Rule::InvalidService);
        assert_eq!(issue.location().line, Some(3));
        assert!(issue.message().contains("'get'"));
        assert_eq!(
            issue.details().as_deref(),
            Some("in declaration of UserService")
        );
    }

    #[test]
    fn test_parse_error_has_no_line() {
        let issue: Issue = ParseErrorIssue {
            file_path: "bad.ts".to_string(),
            error: "Failed to parse at line 1: Unexpected token".to_string(),
        }
        .into();
        assert_eq!(issue.location().path, "bad.ts");
        assert!(issue.location().line.is_none());
        assert!(issue.details().is_none());
    }
}
