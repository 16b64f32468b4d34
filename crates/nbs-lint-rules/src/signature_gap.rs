//! Rule requiring exactly one empty line after a multi-line signature.
//!
//! When a parameter list wraps over several lines, the body's first statement
//! (or first comment, or the closing brace of an empty body) must start two
//! lines below the opening brace.

use nbs_lint_core::{
    Category, FileContext, FuncDecl, GoFile, Rule, Severity, Span, Suggestion, Violation,
};

/// Rule code for signature-gap.
pub const CODE: &str = "NBS003";

/// Rule name for signature-gap.
pub const NAME: &str = "signature-gap";

/// Message for a body starting right after the signature.
pub const GAP_REQUIRED: &str = "Line break after multiline function signature is required";

/// Enforces the empty line after multi-line function signatures.
#[derive(Debug, Clone)]
pub struct SignatureGap {
    severity: Severity,
}

impl Default for SignatureGap {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureGap {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn check_function(
        &self,
        ctx: &FileContext,
        file: &GoFile,
        func: &FuncDecl,
    ) -> Option<Violation> {
        let body = func.body.as_ref()?;
        if func.params.is_empty()
            || ctx.line_of(func.params.start) == ctx.line_of(func.params.end - 1)
        {
            return None;
        }

        let lbrace_line = ctx.line_of(body.lbrace);
        let first = body.first_stmt.unwrap_or(body.rbrace);
        let mut first_line = ctx.line_of(first);

        if let Some(comment_line) = file
            .comments
            .iter()
            .map(|c| ctx.line_of(c.span.start))
            .find(|&line| line > lbrace_line && line < first_line)
        {
            first_line = comment_line;
        }

        let gap = first_line.saturating_sub(lbrace_line);
        if gap == 2 {
            return None;
        }

        let message = if gap < 2 {
            GAP_REQUIRED.to_string()
        } else {
            format!(
                "Too many line breaks after the multiline function signature: {}",
                gap - 1
            )
        };

        Some(
            self.report(ctx.location(Span::new(body.lbrace, first)), message)
                .with_suggestion(Suggestion::new(
                    "Leave exactly one empty line between `{` and the body",
                )),
        )
    }
}

impl Rule for SignatureGap {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn category(&self) -> Category {
        Category::LineBreaks
    }

    fn description(&self) -> &'static str {
        "Requires one empty line after a multi-line function signature"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, file: &GoFile) -> Vec<Violation> {
        file.functions()
            .filter_map(|func| self.check_function(ctx, file, func))
            .collect()
    }
}
