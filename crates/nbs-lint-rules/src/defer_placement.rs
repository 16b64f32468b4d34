//! Rule forbidding an empty line before `defer`.
//!
//! A `defer` belongs to the statement that acquired the resource it releases,
//! so it must follow that statement directly. The one exception is a `defer`
//! that opens a function body after the single empty line a multi-line
//! signature requires.

use std::collections::BTreeSet;

use nbs_lint_core::{BlockKind, Category, FileContext, GoFile, Rule, Severity, Suggestion, Violation};

/// Rule code for defer-placement.
pub const CODE: &str = "NBS002";

/// Rule name for defer-placement.
pub const NAME: &str = "defer-placement";

/// Message for an empty line before a `defer` statement.
pub const BLANK_BEFORE_DEFER: &str = "Line break before 'defer' statement is not allowed.";

/// Lines holding the `{` of a function, method, or function-literal body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionBodyIndex {
    lines: BTreeSet<usize>,
}

impl FunctionBodyIndex {
    /// Collects the opening lines of every function body in `file`.
    #[must_use]
    pub fn build(ctx: &FileContext, file: &GoFile) -> Self {
        let lines = file
            .blocks
            .iter()
            .filter(|block| block.kind == BlockKind::FunctionBody)
            .map(|block| ctx.line_of(block.lbrace))
            .collect();
        Self { lines }
    }

    /// Returns true if a function body opens on `line`.
    #[must_use]
    pub fn contains(&self, line: usize) -> bool {
        self.lines.contains(&line)
    }
}

/// Forbids empty lines before `defer` statements.
#[derive(Debug, Clone)]
pub struct DeferPlacement {
    severity: Severity,
}

impl Default for DeferPlacement {
    fn default() -> Self {
        Self::new()
    }
}

impl DeferPlacement {
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

    /// Checks every `defer` against a prebuilt body index.
    #[must_use]
    pub fn check_with_index(
        &self,
        ctx: &FileContext,
        file: &GoFile,
        bodies: &FunctionBodyIndex,
    ) -> Vec<Violation> {
        file.defers
            .iter()
            .filter(|defer| {
                let line = ctx.line_of(defer.start);
                line >= 1
                    && ctx.source.is_blank(line - 1)
                    && !(line >= 2 && bodies.contains(line - 2))
            })
            .map(|defer| {
                self.report(ctx.location(*defer), BLANK_BEFORE_DEFER)
                    .with_suggestion(Suggestion::new(
                        "Remove the empty line so `defer` follows the statement it cleans up after",
                    ))
            })
            .collect()
    }
}

impl Rule for DeferPlacement {
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
        "Forbids an empty line before a defer statement"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, file: &GoFile) -> Vec<Violation> {
        let bodies = FunctionBodyIndex::build(ctx, file);
        self.check_with_index(ctx, file, &bodies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{context, lines_and_messages, parse, run};

    fn check(src: &str) -> Vec<(usize, String)> {
        lines_and_messages(&run(&DeferPlacement::new(), src))
    }

    #[test]
    fn defer_after_statement_passes() {
        let src = r#"package demo

func f() {
	mu.Lock()
	defer mu.Unlock()
}
"#;
        assert!(check(src).is_empty());
    }

    #[test]
    fn blank_line_before_defer() {
        let src = r#"package demo

func f() {
	mu.Lock()

	defer mu.Unlock()
}
"#;
        assert_eq!(check(src), vec![(6, BLANK_BEFORE_DEFER.to_string())]);
    }

    #[test]
    fn defer_opening_a_body_after_one_blank_line_passes() {
        let src = r#"package demo

func f(
	a int,
) {

	defer done()
}
"#;
        assert!(check(src).is_empty());
    }

    #[test]
    fn function_literal_bodies_count() {
        let src = r#"package demo

func f() {
	go func() {

		defer done()
	}()
}
"#;
        assert!(check(src).is_empty());
    }

    #[test]
    fn statement_blocks_do_not_count() {
        let src = r#"package demo

func f(x int) {
	if x > 0 {

		defer done()
	}
}
"#;
        assert_eq!(check(src), vec![(6, BLANK_BEFORE_DEFER.to_string())]);
    }

    #[test]
    fn index_holds_body_lines_only() {
        let src = "package demo\n\nfunc f(x int) {\n\tif x > 0 {\n\t}\n\t_ = func() {}\n}\n";
        let file = parse(src);
        let ctx = context(src);
        let index = FunctionBodyIndex::build(&ctx, &file);

        assert!(index.contains(2));
        assert!(!index.contains(3));
        assert!(index.contains(5));
    }
}
