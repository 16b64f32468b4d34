//! Go source parser using Tree-sitter.

use nbs_lint_core::{GoFile, ParseError, SourceParser};
use tracing::debug;
use tree_sitter::{Language, Parser};

use crate::lower::lower_file;

/// Parses Go source into the [`GoFile`] model.
pub struct GoParser {
    language: Language,
}

impl GoParser {
    /// Creates a new Go parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }
}

impl Default for GoParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for GoParser {
    fn language_id(&self) -> &'static str {
        "go"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".go"]
    }

    fn parse(&self, source: &str) -> Result<GoFile, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::new(format!("failed to load Go grammar: {e}")))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::new("parser returned no syntax tree"))?;

        let file = lower_file(&tree.root_node(), source.as_bytes());
        debug!(
            "Lowered {} declarations, {} blocks, {} comments",
            file.decls.len(),
            file.blocks.len(),
            file.comments.len()
        );
        Ok(file)
    }
}
