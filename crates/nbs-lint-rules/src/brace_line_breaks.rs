//! Rule enforcing line-break placement around closing braces.
//!
//! # Rationale
//!
//! A closing brace ends a visual unit. The body should end right at the
//! brace, and the code that follows should be set apart by an empty line so
//! that consecutive blocks do not read as one.
//!
//! # Detected Patterns
//!
//! - An empty line right before a `}` (blocks spanning at least three lines)
//! - A `}` followed directly by another statement on the next line
//! - Two or more blocks closing on the same line
//!
//! # Exemptions after `}`
//!
//! No empty line is needed when the next line is missing, empty, a `defer`
//! statement, or starts with `}`; nor when the code after the brace continues
//! the expression (`}()`, `},`, `})`) or opens another block (`} else {`).

use std::collections::BTreeMap;

use nbs_lint_core::{
    Block, Category, FileContext, GoFile, Location, Rule, Severity, Span, Suggestion, Violation,
};

/// Rule code for brace-line-breaks.
pub const CODE: &str = "NBS001";

/// Rule name for brace-line-breaks.
pub const NAME: &str = "brace-line-breaks";

/// Message for an empty line before a closing brace.
pub const BLANK_BEFORE_CLOSE: &str = "Line break before closing } is not allowed.";

/// Message for a missing empty line after a closing brace.
pub const MISSING_AFTER_CLOSE: &str = "Line break after closing } is required.";

/// Message for several blocks closing on one line.
pub const MULTIPLE_CLOSES: &str = "Multiple closing } brackets on the same line are not allowed.";

/// Enforces line breaks around closing braces.
#[derive(Debug, Clone)]
pub struct BraceLineBreaks {
    severity: Severity,
}

impl Default for BraceLineBreaks {
    fn default() -> Self {
        Self::new()
    }
}

impl BraceLineBreaks {
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

    fn blank_before_close(&self, ctx: &FileContext, block: &Block) -> Option<Violation> {
        let open = ctx.line_of(block.lbrace);
        let close = ctx.line_of(block.rbrace);
        if close < open + 2 || !ctx.source.is_blank(close - 1) {
            return None;
        }

        Some(
            self.report(brace_location(ctx, block.rbrace), BLANK_BEFORE_CLOSE)
                .with_suggestion(Suggestion::new("Remove the empty line before `}`")),
        )
    }

    fn missing_after_close(&self, ctx: &FileContext, block: &Block) -> Option<Violation> {
        let close = ctx.line_of(block.rbrace);
        let next = ctx.source.trimmed(close + 1)?;
        if next.is_empty() || next.starts_with("defer") || next.starts_with('}') {
            return None;
        }

        let column = ctx.position(block.rbrace).column;
        let tail = ctx
            .source
            .line(close)
            .and_then(|line| line.get(column + 1..))
            .unwrap_or("");
        if continues_after_brace(tail) {
            return None;
        }

        Some(
            self.report(brace_location(ctx, block.rbrace), MISSING_AFTER_CLOSE)
                .with_suggestion(Suggestion::new("Insert an empty line after `}`")),
        )
    }
}

impl Rule for BraceLineBreaks {
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
        "Requires a line break after and forbids one before a closing brace"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, file: &GoFile) -> Vec<Violation> {
        let mut violations = Vec::new();
        // line -> (offset of the first `}` closing there, blocks closing there)
        let mut closes: BTreeMap<usize, (usize, usize)> = BTreeMap::new();

        for block in &file.blocks {
            violations.extend(self.blank_before_close(ctx, block));
            violations.extend(self.missing_after_close(ctx, block));

            let entry = closes
                .entry(ctx.line_of(block.rbrace))
                .or_insert((block.rbrace, 0));
            entry.0 = entry.0.min(block.rbrace);
            entry.1 += 1;
        }

        for (first, count) in closes.into_values() {
            if count > 1 {
                violations.push(
                    self.report(brace_location(ctx, first), MULTIPLE_CLOSES)
                        .with_suggestion(Suggestion::new("Put each `}` on its own line")),
                );
            }
        }

        violations
    }
}

fn brace_location(ctx: &FileContext, offset: usize) -> Location {
    ctx.location(Span::new(offset, offset + 1))
}

/// Returns true if the code after a `}` continues the surrounding
/// expression or opens the next block on the same line.
fn continues_after_brace(tail: &str) -> bool {
    let code = strip_comments(tail);
    code.trim_end()
        .ends_with(|c| matches!(c, ',' | ')' | '}' | '{'))
}

/// Drops `/* */` comments and everything from a `//` comment on.
fn strip_comments(text: &str) -> String {
    let mut code = String::new();
    let mut rest = text;
    loop {
        let line_comment = rest.find("//");
        match rest.find("/*") {
            Some(start) if line_comment.map_or(true, |l| start < l) => {
                code.push_str(&rest[..start]);
                let after = &rest[start + 2..];
                match after.find("*/") {
                    Some(end) => rest = &after[end + 2..],
                    None => return code,
                }
            }
            _ => {
                code.push_str(&rest[..line_comment.unwrap_or(rest.len())]);
                return code;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lines_and_messages, run};

    fn check(src: &str) -> Vec<(usize, String)> {
        lines_and_messages(&run(&BraceLineBreaks::new(), src))
    }

    #[test]
    fn compliant_blocks_pass() {
        let src = r#"package demo

func f(x int) int {
	if x > 0 {
		return 1
	}

	for i := 0; i < x; i++ {
		x--
	}

	return x
}
"#;
        assert!(check(src).is_empty());
    }

    #[test]
    fn blank_line_before_close() {
        let src = "package demo\n\nfunc f() {\n\tx := 1\n\t_ = x\n\n}\n";
        assert_eq!(check(src), vec![(7, BLANK_BEFORE_CLOSE.to_string())]);
    }

    #[test]
    fn adjacent_braces_are_exempt_from_blank_before() {
        let src = "package demo\n\nfunc f() {\n}\n\nfunc g() {}\n";
        assert!(check(src).is_empty());
    }

    #[test]
    fn missing_line_after_close() {
        let src = r#"package demo

func f(x int) int {
	if x > 0 {
		x++
	}
	return x
}
"#;
        assert_eq!(check(src), vec![(6, MISSING_AFTER_CLOSE.to_string())]);
    }

    #[test]
    fn defer_and_closing_lines_follow_freely() {
        let src = r#"package demo

func f(x int) {
	if x > 0 {
		x++
	}
	defer g()
	if x > 1 {
		x--
	}
}
"#;
        assert!(check(src).is_empty());
    }

    #[test]
    fn continuations_are_exempt() {
        let src = r#"package demo

func f(x int) error {
	go func() {
		x++
	}()
	run(func() {
		x--
	})
	handlers := []func(){
		func() {
			x++
		},
	}
	if x > 0 {
		x++
	} else {
		x--
	} // done
	return call(handlers)
}
"#;
        let found = check(src);
        assert_eq!(found, vec![(19, MISSING_AFTER_CLOSE.to_string())]);
    }

    #[test]
    fn block_comments_after_brace_are_ignored() {
        assert!(continues_after_brace(") /* trailing */"));
        assert!(continues_after_brace(" else { // comment"));
        assert!(!continues_after_brace(" /* a */ // b"));
        assert!(!continues_after_brace(""));
        assert_eq!(strip_comments("a /* b */ c // d"), "a  c ");
    }

    #[test]
    fn multiple_closes_on_one_line() {
        let src = "package demo\n\nfunc f(x int) {\n\tif x > 0 {\n\t\tx++\n\t}}\n";
        let found = check(src);
        assert!(found.contains(&(6, MULTIPLE_CLOSES.to_string())));
        let multiple: Vec<_> = found.iter().filter(|(_, m)| m == MULTIPLE_CLOSES).collect();
        assert_eq!(multiple.len(), 1);
    }

    #[test]
    fn switch_braces_are_checked() {
        let src = r#"package demo

func f(x int) int {
	switch x {
	case 1:
		x++

	}
	return x
}
"#;
        assert_eq!(
            check(src),
            vec![
                (8, BLANK_BEFORE_CLOSE.to_string()),
                (8, MISSING_AFTER_CLOSE.to_string()),
            ]
        );
    }

    #[test]
    fn location_points_at_brace() {
        let src = "package demo\n\nfunc f() {\n\tx := 1\n\t_ = x\n\n}\n";
        let violations = run(&BraceLineBreaks::new(), src);
        let loc = &violations[0].location;
        assert_eq!((loc.line, loc.column, loc.length), (7, 1, 1));
        assert_eq!(loc.offset, src.rfind('}').unwrap());
    }
}
