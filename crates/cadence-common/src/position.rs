//! Line/column position utilities, used to present `Span`s to humans.
//!
//! The checker and interpreter work exclusively in byte offsets (`Span`);
//! this module converts those offsets to line/column positions for
//! diagnostics and host tooling.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// 0-indexed line number.
    pub line: u32,
    /// 0-indexed column, in bytes.
    pub character: u32,
}

impl Position {
    #[must_use]
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file_path: String,
    pub range: Range,
}

impl Location {
    #[must_use]
    pub fn new(file_path: String, range: Range) -> Self {
        Self { file_path, range }
    }
}

/// Maps byte offsets to line/column positions for a single source file.
///
/// Built once per file; line boundaries are the byte offsets right after
/// each `\n`.
#[derive(Debug, Clone)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        LineMap { line_starts }
    }

    #[must_use]
    pub fn position(&self, offset: u32) -> Position {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => Position::new(line as u32, 0),
            Err(0) => Position::new(0, offset),
            Err(next) => {
                let line = next - 1;
                Position::new(line as u32, offset - self.line_starts[line])
            }
        }
    }

    #[must_use]
    pub fn range(&self, span: crate::span::Span) -> Range {
        Range::new(self.position(span.start), self.position(span.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    #[test]
    fn single_line_offsets() {
        let map = LineMap::new("let x = 1");
        assert_eq!(map.position(0), Position::new(0, 0));
        assert_eq!(map.position(4), Position::new(0, 4));
    }

    #[test]
    fn multi_line_offsets() {
        let map = LineMap::new("let a = 1\nlet b = 2\n");
        // "let b" starts right after the first newline, at byte 10.
        assert_eq!(map.position(10), Position::new(1, 0));
        assert_eq!(map.range(Span::new(10, 15)).start, Position::new(1, 0));
    }
}
