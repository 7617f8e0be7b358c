// Chunk: docs/chunks/text_buffer - Line-indexed text buffer behind each merge pane

//! TextBuffer is the public API of this crate.
//!
//! It combines a gap buffer (char storage) with a line index (line access) and
//! exposes the operations a merge pane needs: whole-text reads for diffing,
//! line and line-range reads for rendering and chunk copies, and range
//! replacement for edits. Every mutation returns `DirtyLines` and bumps the
//! buffer's revision counter.

use crate::gap_buffer::GapBuffer;
use crate::line_index::LineIndex;
use crate::types::{DirtyLines, Position};

/// A line-indexed text buffer.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    buffer: GapBuffer,
    line_index: LineIndex,
    /// Incremented on every mutation that changes content.
    revision: u64,
}

impl TextBuffer {
    /// Creates a new empty text buffer.
    pub fn new() -> Self {
        Self::from_str("")
    }

    /// Creates a text buffer initialized with the given content.
    ///
    /// Not `FromStr`: building a buffer from text cannot fail.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Self {
        let mut line_index = LineIndex::new();
        line_index.rebuild(content.chars());
        Self {
            buffer: GapBuffer::from_str(content),
            line_index,
            revision: 0,
        }
    }

    // ==================== Accessors ====================

    /// Number of lines; always at least 1.
    pub fn line_count(&self) -> usize {
        self.line_index.line_count()
    }

    /// Content of `line` without its trailing newline. Empty past the end.
    pub fn line_content(&self, line: usize) -> String {
        let total = self.buffer.len();
        match (
            self.line_index.line_start(line),
            self.line_index.line_end(line, total),
        ) {
            (Some(start), Some(end)) => self.buffer.slice(start, end),
            _ => String::new(),
        }
    }

    /// Length of `line` in chars, excluding the newline.
    pub fn line_len(&self, line: usize) -> usize {
        self.line_index
            .line_len(line, self.buffer.len())
            .unwrap_or(0)
    }

    /// Total char count.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The entire content as a String.
    pub fn content(&self) -> String {
        self.buffer.to_string()
    }

    /// Mutation counter. Two reads with the same revision saw the same text.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ==================== Coordinates ====================

    /// Char offset of the start of `line`; the buffer end for lines past the
    /// last one.
    ///
    /// This is what makes half-open line ranges like `[from, line_count)`
    /// cover the tail of the buffer.
    pub fn line_offset(&self, line: usize) -> usize {
        self.line_index
            .line_start(line)
            .unwrap_or_else(|| self.buffer.len())
    }

    /// Char offset of `pos`, clamped to the buffer and to the line's length.
    pub fn offset_of(&self, pos: Position) -> usize {
        if pos.line >= self.line_count() {
            return self.buffer.len();
        }
        self.line_offset(pos.line) + pos.col.min(self.line_len(pos.line))
    }

    /// Position of the char at `offset` (clamped to the buffer end).
    pub fn position_of(&self, offset: usize) -> Position {
        let offset = offset.min(self.buffer.len());
        let line = self.line_index.line_at_offset(offset);
        Position::new(line, offset - self.line_offset(line))
    }

    /// Text of the half-open line range `[from, to)`, newlines included.
    ///
    /// A range ending past the last line runs to the end of the buffer, so the
    /// final line is included even without a trailing newline.
    pub fn text_in_lines(&self, from: usize, to: usize) -> String {
        self.buffer
            .slice(self.line_offset(from), self.line_offset(to))
    }

    // ==================== Mutations ====================

    /// Replaces the text between `start` and `end` with `text`.
    ///
    /// Positions are clamped the same way `offset_of` clamps them; a reversed
    /// pair is normalised.
    pub fn replace_range(&mut self, start: Position, end: Position, text: &str) -> DirtyLines {
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        let start_offset = self.offset_of(start);
        let end_offset = self.offset_of(end);
        self.splice(start_offset, end_offset, text)
    }

    /// Replaces the half-open line range `[from, to)` with `text`.
    ///
    /// This is the primitive chunk copies are built on: `text` normally comes
    /// from `text_in_lines` of the other buffer.
    pub fn replace_lines(&mut self, from: usize, to: usize, text: &str) -> DirtyLines {
        let start = self.line_offset(from);
        let end = self.line_offset(to.max(from));
        self.splice(start, end, text)
    }

    /// Inserts `text` at `pos`.
    pub fn insert_str_at(&mut self, pos: Position, text: &str) -> DirtyLines {
        self.replace_range(pos, pos, text)
    }

    /// Replaces the whole content.
    pub fn set_content(&mut self, text: &str) -> DirtyLines {
        let len = self.buffer.len();
        self.splice(0, len, text)
    }

    fn splice(&mut self, start: usize, end: usize, text: &str) -> DirtyLines {
        let end = end.max(start);
        if start == end && text.is_empty() {
            return DirtyLines::None;
        }

        let first_line = self.line_index.line_at_offset(start);
        let removed_newlines = self.line_index.line_at_offset(end) - first_line;
        let inserted_newlines = text.matches('\n').count();

        let removed = self.buffer.splice(start, end, text);
        self.line_index.splice(start, removed, text);
        self.revision += 1;
        self.assert_line_index_consistent();

        match (removed_newlines, inserted_newlines) {
            (0, 0) => DirtyLines::Single(first_line),
            // Same line structure: only the touched lines changed
            (r, i) if r == i => DirtyLines::Range {
                from: first_line,
                to: first_line + r + 1,
            },
            _ => DirtyLines::FromLineToEnd(first_line),
        }
    }

    /// Debug check that the incrementally patched line index matches a full
    /// rebuild. Samples every 64th mutation; compiled out in release builds.
    #[cfg(debug_assertions)]
    fn assert_line_index_consistent(&self) {
        if self.revision % 64 != 0 {
            return;
        }
        let mut expected = LineIndex::new();
        expected.rebuild(self.buffer.chars());
        assert_eq!(
            self.line_index.line_starts(),
            expected.line_starts(),
            "line index drift after {} mutations",
            self.revision
        );
    }

    #[cfg(not(debug_assertions))]
    fn assert_line_index_consistent(&self) {}
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}
