// Chunk: docs/chunks/merge_session - Paired-view session: freshness, scroll sync, chunk copying

//! Which original a diff view pairs with the edit pane, and the style roles
//! that go with it.
//!
//! Left and right views differ only in data: class names and the copy
//! glyph. Everything that renders a view looks its strings up through
//! [`Side::style`] instead of branching on the side.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of an original pane relative to the edit pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Both sides, left first.
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    /// Style roles for this side.
    pub fn style(self) -> &'static SideStyle {
        match self {
            Side::Left => &LEFT_STYLE,
            Side::Right => &RIGHT_STYLE,
        }
    }

    /// True when the original sits to the left of the edit pane, so the
    /// original is the left column of the gap between them.
    pub fn original_is_leftmost(self) -> bool {
        self == Side::Left
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Left => "left",
            Side::Right => "right",
        })
    }
}

/// Role of a whole-line mark inside a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkRole {
    /// Interior line of a chunk.
    Chunk,
    /// First line of a multi-line chunk.
    Start,
    /// Last line of a multi-line chunk.
    End,
    /// The only line of a one-line chunk.
    StartEnd,
    /// Empty range at the top of the buffer, marked on line 0.
    EmptyStart,
    /// Empty range anywhere else, marked on the line above it.
    EmptyEnd,
}

/// Class names and glyphs for one side.
#[derive(Debug, PartialEq, Eq)]
pub struct SideStyle {
    pub chunk: &'static str,
    pub chunk_start: &'static str,
    pub chunk_end: &'static str,
    pub chunk_startend: &'static str,
    pub chunk_emptystart: &'static str,
    pub chunk_emptyend: &'static str,
    /// Text present only in the edit pane.
    pub inserted: &'static str,
    /// Text present only in the original.
    pub deleted: &'static str,
    pub connect: &'static str,
    /// Glyph on the copy button, pointing from the original toward the edit pane.
    pub copy_glyph: &'static str,
}

impl SideStyle {
    /// Class for a line mark with the given role.
    pub fn class_for(&self, role: MarkRole) -> &'static str {
        match role {
            MarkRole::Chunk => self.chunk,
            MarkRole::Start => self.chunk_start,
            MarkRole::End => self.chunk_end,
            MarkRole::StartEnd => self.chunk_startend,
            MarkRole::EmptyStart => self.chunk_emptystart,
            MarkRole::EmptyEnd => self.chunk_emptyend,
        }
    }
}

static LEFT_STYLE: SideStyle = SideStyle {
    chunk: "lm-l-chunk",
    chunk_start: "lm-l-chunk-start",
    chunk_end: "lm-l-chunk-end",
    chunk_startend: "lm-l-chunk-startend",
    chunk_emptystart: "lm-l-chunk-emptystart",
    chunk_emptyend: "lm-l-chunk-emptyend",
    inserted: "lm-l-inserted",
    deleted: "lm-l-deleted",
    connect: "lm-l-connect",
    copy_glyph: "\u{21dd}",
};

static RIGHT_STYLE: SideStyle = SideStyle {
    chunk: "lm-r-chunk",
    chunk_start: "lm-r-chunk-start",
    chunk_end: "lm-r-chunk-end",
    chunk_startend: "lm-r-chunk-startend",
    chunk_emptystart: "lm-r-chunk-emptystart",
    chunk_emptyend: "lm-r-chunk-emptyend",
    inserted: "lm-r-inserted",
    deleted: "lm-r-deleted",
    connect: "lm-r-connect",
    copy_glyph: "\u{21dc}",
};
