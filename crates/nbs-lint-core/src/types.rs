//! Core types for lint violations and results.

use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Diagnostic category, shared by all rules checking the same convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Line breaks around braces, `defer` and function signatures.
    LineBreaks,
    /// Separator comments and declaration grouping.
    Separator,
}

impl Category {
    /// Tag used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LineBreaks => "line_breaks",
            Self::Separator => "separator",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to project root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in bytes).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    pub offset: usize,
    /// Length of the reported range in bytes; 0 for a point.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A suggested fix for a violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A lint violation found during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "NBS001").
    pub code: String,
    /// Rule name (e.g., "brace-line-breaks").
    pub rule: String,
    /// Category tag.
    pub category: Category,
    /// Severity of this violation.
    pub severity: Severity,
    /// Primary location of the violation.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        category: Category,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            category,
            severity,
            location,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Adds a suggestion to this violation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}:{}\n",
            self.code,
            self.rule,
            self.location.file.display(),
            self.location.line,
            self.location.column,
        );
        let _ = writeln!(
            output,
            "  {} ({}): {}",
            self.severity, self.category, self.message
        );
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(output, "  = help: {}", suggestion.message);
        }
        output
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}: {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.category,
            self.message
        )
    }
}

/// Converts a Violation to a miette Diagnostic for rich error display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        Self {
            message: format!("[{}] {}", v.code, v.message),
            help: v.suggestion.as_ref().map(|s| s.message.clone()),
            span: SourceSpan::from((v.location.offset, v.location.length)),
            label_message: format!("{} ({})", v.rule, v.category),
        }
    }
}

/// A file that could not be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    /// Path of the file.
    pub path: PathBuf,
    /// Why analysis failed.
    pub message: String,
}

/// Result of running lint analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of files checked.
    pub files_checked: usize,
    /// Files that could not be read or parsed.
    #[serde(default)]
    pub failures: Vec<FileFailure>,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    }

    /// Returns true if any file failed to be analyzed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Returns violations filtered by category.
    #[must_use]
    pub fn by_category(&self, category: Category) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.category == category)
            .collect()
    }

    /// Counts violations by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let errors = self
            .violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
            .count();
        let warnings = self
            .violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
            .count();
        let infos = self
            .violations
            .iter()
            .filter(|v| v.severity == Severity::Info)
            .count();
        (errors, warnings, infos)
    }

    /// Sorts violations by file, then line, then column.
    ///
    /// The sort is stable, so violations at the same position keep the order
    /// in which the rules reported them.
    pub fn sort(&mut self) {
        self.violations.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
        });
    }

    /// Adds violations and failures from another result.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.failures.extend(other.failures);
        self.files_checked += other.files_checked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(severity: Severity, category: Category) -> Violation {
        Violation::new(
            "NBS001",
            "brace-line-breaks",
            category,
            severity,
            Location::new(PathBuf::from("pkg/server.go"), 42, 2),
            "Line break after closing } is required.",
        )
    }

    #[test]
    fn category_tags() {
        assert_eq!(Category::LineBreaks.as_str(), "line_breaks");
        assert_eq!(Category::Separator.to_string(), "separator");
    }

    #[test]
    fn violation_format_includes_category_and_help() {
        let v = make_violation(Severity::Error, Category::LineBreaks)
            .with_suggestion(Suggestion::new("Insert an empty line"));
        let formatted = v.format();
        assert!(formatted.contains("NBS001 brace-line-breaks at pkg/server.go:42:2"));
        assert!(formatted.contains("error (line_breaks)"));
        assert!(formatted.contains("= help: Insert an empty line"));
    }

    #[test]
    fn violation_display_is_single_line() {
        let v = make_violation(Severity::Warning, Category::Separator);
        assert_eq!(
            v.to_string(),
            "pkg/server.go:42:2: warning [NBS001] separator: Line break after closing } is required."
        );
    }

    #[test]
    fn counts_and_filters() {
        let mut result = LintResult::new();
        result
            .violations
            .push(make_violation(Severity::Error, Category::LineBreaks));
        result
            .violations
            .push(make_violation(Severity::Warning, Category::Separator));
        assert!(result.has_errors());
        assert_eq!(result.count_by_severity(), (1, 1, 0));
        assert_eq!(result.by_category(Category::Separator).len(), 1);
    }

    #[test]
    fn extend_merges_failures() {
        let mut a = LintResult::new();
        a.files_checked = 2;
        let mut b = LintResult::new();
        b.files_checked = 1;
        b.failures.push(FileFailure {
            path: PathBuf::from("broken.go"),
            message: "permission denied".into(),
        });
        a.extend(b);
        assert_eq!(a.files_checked, 3);
        assert!(a.has_failures());
    }

    #[test]
    fn sort_orders_by_position() {
        let mut result = LintResult::new();
        let mut late = make_violation(Severity::Error, Category::LineBreaks);
        late.location.line = 50;
        let early = make_violation(Severity::Error, Category::LineBreaks);
        result.violations.push(late);
        result.violations.push(early);
        result.sort();
        assert_eq!(result.violations[0].location.line, 42);
    }
}
