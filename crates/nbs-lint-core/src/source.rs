//! Line and position lookups over a file's raw text.
//!
//! Every rule works with 0-based lines and 0-based byte columns. The
//! conversion to the 1-based numbers shown to users happens only when a
//! [`Location`](crate::Location) is built.

/// A 0-based line/column pair derived from a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line index (0 is the first physical line).
    pub line: usize,
    /// Byte column within the line.
    pub column: usize,
}

/// The raw text of one file as an ordered sequence of lines.
///
/// Lines are split on `\n` only, so a file ending with a newline has a final
/// empty line. A trailing `\r` stays part of the line and disappears when the
/// line is trimmed.
#[derive(Debug, Clone)]
pub struct SourceIndex<'a> {
    lines: Vec<&'a str>,
}

impl<'a> SourceIndex<'a> {
    /// Splits `content` into lines.
    #[must_use]
    pub fn new(content: &'a str) -> Self {
        Self {
            lines: content.split('\n').collect(),
        }
    }

    /// Number of physical lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the index holds no lines. Never true for a split of
    /// any string, kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Index of the last physical line.
    #[must_use]
    pub fn last_line(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    /// Raw text of line `index`.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&'a str> {
        self.lines.get(index).copied()
    }

    /// Text of line `index` with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed(&self, index: usize) -> Option<&'a str> {
        self.line(index).map(str::trim)
    }

    /// Returns true if line `index` exists and contains only whitespace.
    #[must_use]
    pub fn is_blank(&self, index: usize) -> bool {
        self.trimmed(index).is_some_and(str::is_empty)
    }

    /// Counts consecutive blank lines going upward from `line - 1`.
    #[must_use]
    pub fn blank_lines_before(&self, line: usize) -> usize {
        (0..line).rev().take_while(|&i| self.is_blank(i)).count()
    }

    /// Counts consecutive blank lines going downward from `line + 1`.
    #[must_use]
    pub fn blank_lines_after(&self, line: usize) -> usize {
        (line + 1..self.lines.len())
            .take_while(|&i| self.is_blank(i))
            .count()
    }
}

/// Maps byte offsets to 0-based [`Position`]s.
#[derive(Debug, Clone)]
pub struct PositionMapper {
    line_starts: Vec<usize>,
    len: usize,
}

impl PositionMapper {
    /// Builds the line-start table for `content`.
    #[must_use]
    pub fn new(content: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            content
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            line_starts,
            len: content.len(),
        }
    }

    /// Position of `offset`. Offsets past the end clamp to the end of text.
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.len);
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        Position {
            line,
            column: offset - self.line_starts[line],
        }
    }

    /// Line of `offset`.
    #[must_use]
    pub fn line(&self, offset: usize) -> usize {
        self.position(offset).line
    }

    /// Byte offset where `line` starts, if the line exists.
    #[must_use]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }
}
