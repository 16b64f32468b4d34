//! # nbs-lint-core
//!
//! Core framework for linting Go source layout conventions.
//!
//! This crate provides the foundational traits and types the rules and the
//! Go front end share:
//!
//! - [`GoFile`] and friends, the syntax model rules inspect
//! - [`SourceParser`] trait for turning source text into that model
//! - [`Rule`] trait for per-file rules
//! - [`Analyzer`] for discovering files and running rules in parallel
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use nbs_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./pkg")
//!     .parser(GoParser::new())
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod rule;
mod source;
mod syntax;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use rule::{ParseError, Rule, RuleBox, SourceParser};
pub use source::{Position, PositionMapper, SourceIndex};
pub use syntax::{
    Block, BlockKind, Comment, Decl, Expr, FuncBody, FuncDecl, GenDecl, GenKeyword, GoFile, Span,
    Stmt, TypeRef, TypeShape, TypeSpec,
};
pub use types::{
    Category, FileFailure, LintResult, Location, Severity, Suggestion, Violation,
    ViolationDiagnostic,
};
