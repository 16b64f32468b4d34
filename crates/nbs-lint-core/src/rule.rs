//! Rule and parser traits.

use crate::context::FileContext;
use crate::syntax::GoFile;
use crate::types::{Category, Location, Severity, Violation};

/// A per-file lint rule over the [`GoFile`] syntax model.
///
/// Rules are pure: they read the syntax model and the raw text exposed by
/// [`FileContext`] and return the violations they find, without sharing state
/// with other rules.
///
/// # Example
///
/// ```ignore
/// use nbs_lint_core::{Category, FileContext, GoFile, Rule, Violation};
///
/// pub struct NoDefer;
///
/// impl Rule for NoDefer {
///     fn name(&self) -> &'static str { "no-defer" }
///     fn code(&self) -> &'static str { "X001" }
///     fn category(&self) -> Category { Category::LineBreaks }
///
///     fn check(&self, ctx: &FileContext, file: &GoFile) -> Vec<Violation> {
///         file.defers
///             .iter()
///             .map(|span| self.report(ctx.location(*span), "defer found"))
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "brace-line-breaks").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "NBS001").
    fn code(&self) -> &'static str;

    /// Returns the category tag of this rule's violations.
    fn category(&self) -> Category;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks a single file and returns any violations found.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Context about the file being checked
    /// * `file` - The parsed syntax model of the file
    fn check(&self, ctx: &FileContext, file: &GoFile) -> Vec<Violation>;

    /// Builds a violation carrying this rule's code, name, category and
    /// default severity.
    fn report(&self, location: Location, message: impl Into<String>) -> Violation
    where
        Self: Sized,
    {
        Violation::new(
            self.code(),
            self.name(),
            self.category(),
            self.default_severity(),
            location,
            message,
        )
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Error returned when a parser produced no syntax tree at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    /// What went wrong.
    pub message: String,
}

impl ParseError {
    /// Creates a parse error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Turns source text into the [`GoFile`] model.
///
/// Syntax errors inside a file do not fail parsing: the parser recovers, sets
/// [`GoFile::has_syntax_errors`], and reports what it could not interpret as
/// [`Decl::Unrecognized`](crate::Decl::Unrecognized).
pub trait SourceParser: Send + Sync {
    /// Language identifier (e.g., `"go"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this parser handles (e.g., `&[".go"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses `source`.
    ///
    /// # Errors
    ///
    /// Returns an error only if no syntax tree could be produced.
    fn parse(&self, source: &str) -> Result<GoFile, ParseError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn category(&self) -> Category {
            Category::Separator
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(&self, ctx: &FileContext, file: &GoFile) -> Vec<Violation> {
            vec![self.report(ctx.location(file.package), "Test violation")]
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.default_severity(), Severity::Error);
    }

    #[test]
    fn report_stamps_rule_identity() {
        let ctx = FileContext::new(Path::new("a.go"), "package a\n", Path::new("/"));
        let violations = TestRule.check(&ctx, &GoFile::default());
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.code, "TEST001");
        assert_eq!(v.rule, "test-rule");
        assert_eq!(v.category, Category::Separator);
        assert_eq!(v.severity, Severity::Error);
        assert_eq!((v.location.line, v.location.column), (1, 1));
    }
}
