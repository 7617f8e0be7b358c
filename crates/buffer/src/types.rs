// Chunk: docs/chunks/text_buffer - Line-indexed text buffer behind each merge pane

use std::cmp::Ordering;

/// Position in the buffer as (line, column) where both are 0-indexed.
///
/// Columns count `char`s, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// Position at the start of `line`.
    pub fn line_start(line: usize) -> Self {
        Self { line, col: 0 }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.col.cmp(&other.col))
    }
}

/// Which lines were dirtied by a mutation.
///
/// Panes accumulate these between repaints with [`DirtyLines::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirtyLines {
    /// No lines changed.
    #[default]
    None,
    /// A single line changed in place.
    Single(usize),
    /// A range of lines changed [from, to).
    Range { from: usize, to: usize },
    /// Everything from a line to the end of the buffer changed, because
    /// lines were inserted or removed at that point.
    FromLineToEnd(usize),
}

impl DirtyLines {
    /// Returns true if no lines were dirtied.
    pub fn is_none(&self) -> bool {
        matches!(self, DirtyLines::None)
    }

    /// Returns the first dirty line, if any.
    pub fn start_line(&self) -> Option<usize> {
        match *self {
            DirtyLines::None => None,
            DirtyLines::Single(line) | DirtyLines::FromLineToEnd(line) => Some(line),
            DirtyLines::Range { from, .. } => Some(from),
        }
    }

    /// Returns true if `line` falls inside the dirty region.
    pub fn contains(&self, line: usize) -> bool {
        match *self {
            DirtyLines::None => false,
            DirtyLines::Single(l) => l == line,
            DirtyLines::Range { from, to } => (from..to).contains(&line),
            DirtyLines::FromLineToEnd(from) => line >= from,
        }
    }

    /// Widens this region to the smallest region covering both.
    pub fn merge(&mut self, other: DirtyLines) {
        *self = match (*self, other) {
            (DirtyLines::None, o) => o,
            (s, DirtyLines::None) => s,
            (DirtyLines::FromLineToEnd(a), o) | (o, DirtyLines::FromLineToEnd(a)) => {
                DirtyLines::FromLineToEnd(o.start_line().map_or(a, |b| a.min(b)))
            }
            (DirtyLines::Single(a), DirtyLines::Single(b)) if a == b => DirtyLines::Single(a),
            (a, b) => {
                let (a_from, a_to) = a.bounds();
                let (b_from, b_to) = b.bounds();
                DirtyLines::Range {
                    from: a_from.min(b_from),
                    to: a_to.max(b_to),
                }
            }
        };
    }

    /// Half-open bounds of a bounded region. Only called for `Single`/`Range`.
    fn bounds(self) -> (usize, usize) {
        match self {
            DirtyLines::Single(l) => (l, l + 1),
            DirtyLines::Range { from, to } => (from, to),
            DirtyLines::None => (0, 0),
            DirtyLines::FromLineToEnd(l) => (l, usize::MAX),
        }
    }
}
