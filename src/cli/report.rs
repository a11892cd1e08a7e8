//! Report formatting and printing utilities.
//!
//! Findings are displayed in cargo-style format.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::context::Finding;
use crate::provider::Severity;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print findings in cargo-style format to stdout.
pub fn report(findings: &[Finding]) {
    report_to(findings, &mut io::stdout().lock());
}

/// Print findings to a custom writer.
pub fn report_to<W: Write>(findings: &[Finding], writer: &mut W) {
    if findings.is_empty() {
        return;
    }

    let max_line_width = findings
        .iter()
        .map(|f| f.line.to_string().len())
        .max()
        .unwrap_or(1);

    for finding in findings {
        print_finding(finding, writer, max_line_width);
    }

    print_summary(findings, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(source_files: usize) {
    print_success_to(source_files, &mut io::stdout().lock());
}

pub fn print_success_to<W: Write>(source_files: usize, writer: &mut W) {
    let msg = format!(
        "Checked {} source {} - no issues found",
        source_files,
        plural(source_files, "file", "files")
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

/// Print a warning about files that could not be parsed.
pub fn print_parse_warning(count: usize, verbose: bool) {
    print_parse_warning_to(count, verbose, &mut io::stderr().lock());
}

pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

fn print_finding<W: Write>(finding: &Finding, writer: &mut W, max_line_width: usize) {
    let diagnostic = &finding.diagnostic;
    let (severity, caret) = match diagnostic.severity {
        Severity::Error => ("error".bold().red(), "^".red()),
    };

    let _ = writeln!(
        writer,
        "{}: {} \"{}\"",
        severity,
        diagnostic.message,
        diagnostic.key.bold()
    );
    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        finding.file_path,
        finding.line,
        finding.col
    );

    let _ = writeln!(
        writer,
        "{:>width$} {}",
        "",
        "|".blue(),
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        finding.line.to_string().blue(),
        "|".blue(),
        finding.source_line,
        width = max_line_width
    );

    let prefix: String = finding
        .source_line
        .chars()
        .take(finding.col.saturating_sub(1))
        .collect();
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        caret,
        width = max_line_width,
        padding = UnicodeWidthStr::width(prefix.as_str())
    );
    let _ = writeln!(writer);
}

fn print_summary<W: Write>(findings: &[Finding], writer: &mut W) {
    let errors = findings
        .iter()
        .filter(|f| f.diagnostic.severity == Severity::Error)
        .count();

    let _ = writeln!(
        writer,
        "{} {} {} ({} {})",
        FAILURE_MARK.red(),
        findings.len(),
        plural(findings.len(), "problem", "problems"),
        errors,
        plural(errors, "error", "errors").red()
    );
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
