//! # nbs-lint-go
//!
//! Tree-sitter based Go front end for nbs-lint.
//!
//! This crate turns `.go` source text into the `nbs-lint-core` syntax model
//! ([`GoFile`](nbs_lint_core::GoFile)) that the rules inspect:
//!
//! - [`GoParser`] implements [`SourceParser`](nbs_lint_core::SourceParser)
//!   on top of `tree-sitter-go`
//! - lowering keeps only the shapes the rules need (blocks, `defer`
//!   statements, comments, top-level declarations, constructor-relevant
//!   statements) and records byte offsets into the original text

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod lower;
pub mod parser;

pub use parser::GoParser;
