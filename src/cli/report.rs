//! Report formatting and printing utilities.
//!
//! Issues are printed in cargo style. Separate from core logic so the
//! extractor and generator can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{
    CommandResult, CommandSummary, GenerateSummary, InitSummary, InspectSummary,
};
use crate::issues::{Issue, Report, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(
        result,
        verbose,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
}

/// Print a command result to custom writers.
pub fn print_to<O: Write, E: Write>(
    result: &CommandResult,
    verbose: bool,
    out: &mut O,
    err: &mut E,
) {
    match &result.summary {
        CommandSummary::Generate(summary) => {
            report_to(&result.issues, out);
            print_generate_to(summary, out);
            if summary.skipped_paths > 0 {
                print_skipped_warning_to(summary.skipped_paths, verbose, err);
            }
        }
        CommandSummary::Inspect(summary) => {
            report_to(&result.issues, out);
            print_inspect_to(summary, out);
        }
        CommandSummary::Init(summary) => print_init_to(summary, out),
    }

    print_parse_warning_to(result.parse_error_count(), verbose, err);
}

/// Print issues to a custom writer, sorted by location.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort_by(compare_issues);

    for issue in &sorted {
        print_issue(issue, writer);
    }

    print_summary(&sorted, writer);
}

/// Print a parse warning to a custom writer.
pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

fn print_skipped_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {} path(s) skipped due to access errors{}",
        "warning:".bold().yellow(),
        count,
        if verbose { "" } else { " (use -v for details)" }
    );
}

// ============================================================
// Command Output
// ============================================================

fn print_generate_to<W: Write>(summary: &GenerateSummary, writer: &mut W) {
    let verb = if summary.is_dry_run {
        "Would generate".yellow().bold()
    } else {
        "Generated".green().bold()
    };

    for entry in &summary.generated {
        let _ = writeln!(
            writer,
            "{} {} {} {}",
            verb,
            entry.path.display(),
            "from".dimmed(),
            format!("{} ({})", entry.source, entry.service).dimmed()
        );
    }

    let count = summary.generated.len();
    let files = format!(
        "{} source {}",
        summary.files_scanned,
        if summary.files_scanned == 1 { "file" } else { "files" }
    );
    let clients = format!(
        "{} {}",
        count,
        if count == 1 { "client" } else { "clients" }
    );

    let msg = if summary.is_dry_run {
        format!(
            "Scanned {} - {} would be generated (dry run, nothing written)",
            files, clients
        )
    } else {
        format!("Scanned {} - generated {}", files, clients)
    };
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

fn print_inspect_to<W: Write>(summary: &InspectSummary, writer: &mut W) {
    if let Some(json) = &summary.json {
        let _ = writeln!(writer, "{}", json);
    }
}

fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.path.display()).green()
    );
}

// ============================================================
// Issues
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let loc = issue.location();

    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Clickable location: --> path:line
    match loc.line {
        Some(line) => {
            let _ = writeln!(writer, "  {} {}:{}", "-->".blue(), loc.path, line);
        }
        None => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), loc.path);
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "note:".bold(), details);
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

fn compare_issues(a: &Issue, b: &Issue) -> std::cmp::Ordering {
    let a_loc = a.location();
    let b_loc = b.location();

    a_loc
        .path
        .cmp(b_loc.path)
        .then_with(|| a_loc.line.cmp(&b_loc.line))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        cli::commands::GeneratedEntry,
        generator::GenerateError,
        issues::{InvalidServiceIssue, ParseErrorIssue},
    };

    fn render<F: FnOnce(&mut Vec<u8>)>(f: F) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        f(&mut buf);
        String::from_utf8(buf).unwrap()
    }

    fn summary(is_dry_run: bool) -> GenerateSummary {
        GenerateSummary {
            files_scanned: 2,
            generated: vec![GeneratedEntry {
                path: PathBuf::from("src/user_service_gen.ts"),
                service: "UserService".to_string(),
                source: "src/user.ts".to_string(),
            }],
            is_dry_run,
            skipped_paths: 0,
        }
    }

    #[test]
    fn test_print_generate() {
        let out = render(|w| print_generate_to(&summary(false), w));
        assert_eq!(
            out,
            "Generated src/user_service_gen.ts from src/user.ts (UserService)\n\
             \u{2713} Scanned 2 source files - generated 1 client\n"
        );
    }

    #[test]
    fn test_print_generate_dry_run() {
        let out = render(|w| print_generate_to(&summary(true), w));
        assert!(out.starts_with("Would generate src/user_service_gen.ts"));
        assert!(out.contains("1 client would be generated (dry run, nothing written)"));
    }

    #[test]
    fn test_report_issues_sorted_by_location() {
        let issues = vec![
            Issue::InvalidService(InvalidServiceIssue {
                file_path: "src/b.ts".to_string(),
                line: 7,
                type_name: "B".to_string(),
                error: GenerateError::InvalidServiceName("b-c".to_string()),
            }),
            Issue::ParseError(ParseErrorIssue {
                file_path: "src/a.ts".to_string(),
                error: "Failed to parse at line 1: Expected ident".to_string(),
            }),
        ];

        let out = render(|w| report_to(&issues, w));
        assert_eq!(
            out,
            "error: Failed to parse at line 1: Expected ident  parse-error\n\
             \x20 --> src/a.ts\n\
             \n\
             error: invalid service name \"b-c\": expected an identifier  invalid-service\n\
             \x20 --> src/b.ts:7\n\
             \x20  = note: in declaration of B\n\
             \n\
             \u{2718} 2 problems (2 errors, 0 warnings)\n"
        );
    }

    #[test]
    fn test_parse_warning_hidden_when_verbose() {
        assert!(render(|w| print_parse_warning_to(1, true, w)).is_empty());
        assert!(render(|w| print_parse_warning_to(1, false, w)).contains("1 file(s)"));
    }
}
