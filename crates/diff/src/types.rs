// Chunk: docs/chunks/diff_chunks - Diff computation, line chunking and position mapping

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// What a diff segment does to the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Present in both texts.
    Equal,
    /// Present only in the edit text.
    Insert,
    /// Present only in the original text.
    Delete,
}

/// A run of text with a single [`SegmentKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub kind: SegmentKind,
    pub text: String,
}

impl DiffSegment {
    pub fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn equal(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Equal, text)
    }

    pub fn insert(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Insert, text)
    }

    pub fn delete(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Delete, text)
    }

    /// True if the segment's text is part of the original buffer.
    pub fn in_orig(&self) -> bool {
        self.kind != SegmentKind::Insert
    }

    /// True if the segment's text is part of the edit buffer.
    pub fn in_edit(&self) -> bool {
        self.kind != SegmentKind::Delete
    }
}

/// One of the two line-numbering systems being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Space {
    /// The original (reference) buffer.
    Orig,
    /// The edited buffer.
    Edit,
}

impl Space {
    /// The opposite coordinate space.
    pub fn other(self) -> Self {
        match self {
            Space::Orig => Space::Edit,
            Space::Edit => Space::Orig,
        }
    }
}

/// A region that differs between the two buffers, as half-open line ranges
/// in both coordinate spaces.
///
/// A zero-width range on one side is a pure insertion or deletion anchored at
/// that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chunk {
    pub orig_from: usize,
    pub orig_to: usize,
    pub edit_from: usize,
    pub edit_to: usize,
}

impl Chunk {
    pub fn new(orig_from: usize, orig_to: usize, edit_from: usize, edit_to: usize) -> Self {
        debug_assert!(orig_to >= orig_from && edit_to >= edit_from);
        Self {
            orig_from,
            orig_to,
            edit_from,
            edit_to,
        }
    }

    pub fn orig_range(&self) -> Range<usize> {
        self.orig_from..self.orig_to
    }

    pub fn edit_range(&self) -> Range<usize> {
        self.edit_from..self.edit_to
    }

    /// Line range in the given space.
    pub fn range(&self, space: Space) -> Range<usize> {
        match space {
            Space::Orig => self.orig_range(),
            Space::Edit => self.edit_range(),
        }
    }

    /// Both ranges are empty. Never true for a chunk produced by [`crate::Chunks`].
    pub fn is_empty(&self) -> bool {
        self.orig_range().is_empty() && self.edit_range().is_empty()
    }

    /// Lines were added in the edit buffer and nothing was removed.
    pub fn is_insertion(&self) -> bool {
        self.orig_range().is_empty() && !self.edit_range().is_empty()
    }

    /// Lines were removed from the original and nothing was added.
    pub fn is_deletion(&self) -> bool {
        self.edit_range().is_empty() && !self.orig_range().is_empty()
    }
}
