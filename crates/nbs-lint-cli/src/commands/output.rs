//! Shared output formatting for lint results.

use anyhow::Result;
use miette::NamedSource;
use nbs_lint_core::{Category, LintResult, ViolationDiagnostic};
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `root` is the analyzed directory or file; violation paths are relative to
/// it.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => print_pretty(result, root),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    for violation in &result.violations {
        println!("{}", violation.format());
    }

    print_failures(result);
    print_summary(result);
}

fn print_failures(result: &LintResult) {
    for failure in &result.failures {
        println!(
            "\x1b[31mfailed\x1b[0m {}: {}",
            failure.path.display(),
            failure.message
        );
    }
}

fn print_summary(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();
    let summary_color = if errors > 0 || result.has_failures() {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s), {} failed\x1b[0m",
        summary_color,
        errors,
        warnings,
        infos,
        result.files_checked,
        result.failures.len()
    );
    if !result.violations.is_empty() {
        println!(
            "  {}: {}, {}: {}",
            Category::LineBreaks,
            result.by_category(Category::LineBreaks).len(),
            Category::Separator,
            result.by_category(Category::Separator).len()
        );
    }
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
    for failure in &result.failures {
        println!("{}: failed: {}", failure.path.display(), failure.message);
    }
}

fn print_pretty(result: &LintResult, root: &Path) {
    let base = source_dir(root);
    for violation in &result.violations {
        let file = &violation.location.file;
        let report = miette::Report::new(ViolationDiagnostic::from(violation));
        match std::fs::read_to_string(base.join(file)) {
            Ok(content) => {
                let source = NamedSource::new(file.display().to_string(), content);
                println!("{:?}", report.with_source_code(source));
            }
            Err(e) => {
                tracing::debug!("Cannot re-read {} for rendering: {}", file.display(), e);
                println!("{}:{}:{}", file.display(), violation.location.line, violation.location.column);
                println!("{report:?}");
            }
        }
    }

    print_failures(result);
    print_summary(result);
}

/// Directory the violation paths resolve against.
fn source_dir(root: &Path) -> &Path {
    if root.is_file() {
        root.parent().unwrap_or(root)
    } else {
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_root_resolves_against_its_directory() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("main.go");
        std::fs::write(&file, "package main\n").unwrap();

        assert_eq!(source_dir(&file), tmp.path());
        assert_eq!(source_dir(tmp.path()), tmp.path());
        assert!(source_dir(&file).join("main.go").is_file());
    }
}
