//! # nbs-lint-rules
//!
//! Built-in formatting rules for nbs-lint.
//!
//! The rules check the layout of Go sources: where line breaks go around
//! braces, `defer` statements and multi-line signatures, and how separator
//! comments split a file into declaration groups.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | NBS001 | `brace-line-breaks` | Line breaks around closing braces |
//! | NBS002 | `defer-placement` | No empty line before `defer` |
//! | NBS003 | `signature-gap` | One empty line after a multi-line signature |
//! | NBS004 | `separator-groups` | Separator comments and declaration groups |
//!
//! ## Usage
//!
//! ```ignore
//! use nbs_lint_core::Analyzer;
//! use nbs_lint_go::GoParser;
//! use nbs_lint_rules::{BraceLineBreaks, SeparatorGroups};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./pkg")
//!     .parser(GoParser::new())
//!     .rule(BraceLineBreaks::new())
//!     .rule(SeparatorGroups::new().width(40))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod brace_line_breaks;
pub mod constructor;
pub mod declaration;
pub mod defer_placement;
mod presets;
pub mod separator_groups;
pub mod signature_gap;

pub use brace_line_breaks::BraceLineBreaks;
pub use constructor::is_constructor_of;
pub use declaration::{classify, Classification, DeclKind, FunctionTraits};
pub use defer_placement::{DeferPlacement, FunctionBodyIndex};
pub use presets::{
    all_rules, configured_rules, line_break_rules, recommended_rules, separator_rules, Preset,
};
pub use separator_groups::{SeparatorConfig, SeparatorGroups};
pub use signature_gap::SignatureGap;

/// Re-export core types for convenience.
pub use nbs_lint_core::{Rule, Severity, Violation};

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use nbs_lint_core::{FileContext, GoFile, Rule, SourceParser, Violation};
    use nbs_lint_go::GoParser;

    pub(crate) fn parse(src: &str) -> GoFile {
        GoParser::new().parse(src).expect("tree-sitter produced a tree")
    }

    pub(crate) fn context(src: &str) -> FileContext<'_> {
        FileContext::new(Path::new("demo.go"), src, Path::new(""))
    }

    /// Runs `rule` over `src`, ordered by position.
    pub(crate) fn run(rule: &dyn Rule, src: &str) -> Vec<Violation> {
        let file = parse(src);
        let ctx = context(src);
        let mut violations = rule.check(&ctx, &file);
        violations.sort_by_key(|v| (v.location.line, v.location.column));
        violations
    }

    pub(crate) fn lines_and_messages(violations: &[Violation]) -> Vec<(usize, String)> {
        violations
            .iter()
            .map(|v| (v.location.line, v.message.clone()))
            .collect()
    }
}
