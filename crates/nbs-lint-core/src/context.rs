//! Context types for rule execution.

use std::path::{Path, PathBuf};

use crate::source::{Position, PositionMapper, SourceIndex};
use crate::syntax::Span;
use crate::types::Location;

/// Context provided to per-file rules.
///
/// Owns the line index and position table of exactly one file, so every
/// location a rule builds through it refers to that file.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
    /// Lines of `content`.
    pub source: SourceIndex<'a>,
    /// Offset to line/column table for `content`.
    pub positions: PositionMapper,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        Self {
            path,
            content,
            relative_path: relative_to(path, root),
            source: SourceIndex::new(content),
            positions: PositionMapper::new(content),
        }
    }

    /// 0-based position of `offset`.
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        self.positions.position(offset)
    }

    /// 0-based line of `offset`.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        self.positions.line(offset)
    }

    /// Location covering `span`, with 1-based line and column.
    #[must_use]
    pub fn location(&self, span: Span) -> Location {
        let start = self.position(span.start);
        Location::new(self.relative_path.clone(), start.line + 1, start.column + 1)
            .with_span(span.start, span.len())
    }
}

/// Path of `path` relative to `root`.
///
/// A root that is the file itself yields the file name.
pub(crate) fn relative_to(path: &Path, root: &Path) -> PathBuf {
    match path.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => path
            .file_name()
            .map_or_else(|| path.to_path_buf(), PathBuf::from),
        Ok(rel) => rel.to_path_buf(),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_strips_root() {
        let ctx = FileContext::new(
            Path::new("/repo/pkg/a.go"),
            "package a\n",
            Path::new("/repo"),
        );
        assert_eq!(ctx.relative_path, PathBuf::from("pkg/a.go"));
    }

    #[test]
    fn file_root_keeps_the_file_name() {
        let path = Path::new("/repo/pkg/a.go");
        let ctx = FileContext::new(path, "package a\n", path);
        assert_eq!(ctx.relative_path, PathBuf::from("a.go"));
        assert_eq!(
            relative_to(Path::new("/elsewhere/b.go"), path),
            PathBuf::from("/elsewhere/b.go")
        );
    }

    #[test]
    fn location_is_one_based() {
        let content = "package a\n\nfunc f() {\n}\n";
        let ctx = FileContext::new(Path::new("a.go"), content, Path::new("/"));
        let rbrace = content.rfind('}').unwrap();
        let loc = ctx.location(Span::new(rbrace, rbrace));
        assert_eq!((loc.line, loc.column), (4, 1));
        assert_eq!(loc.offset, rbrace);
        assert_eq!(loc.length, 0);

        let func = content.find("func").unwrap();
        let loc = ctx.location(Span::new(func, rbrace + 1));
        assert_eq!((loc.line, loc.column), (3, 1));
        assert_eq!(loc.length, rbrace + 1 - func);
    }
}
