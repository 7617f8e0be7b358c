// Chunk: docs/chunks/diff_chunks - Diff computation, line chunking and position mapping

//! Chunk boundary queries.
//!
//! Given a line in one coordinate space, find the chunk edges around it and
//! the matching edges in the other space. Between two such edge pairs the
//! texts correspond linearly, which is what both scroll alignment and line
//! mapping interpolate over.

use serde::{Deserialize, Serialize};

use crate::engine::Diff;
use crate::types::{Chunk, Space};

/// Nearest chunk edges around a queried line, in one space.
///
/// `before` is `None` when the line precedes the first chunk; `after` is
/// `None` when it is past the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Boundary {
    pub before: Option<usize>,
    pub after: Option<usize>,
}

/// The same pair of chunk edges expressed in both spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Boundaries {
    pub orig: Boundary,
    pub edit: Boundary,
}

impl Boundaries {
    /// Brackets `line` (in `space`) using an ordered chunk sequence.
    ///
    /// `after` comes from the first chunk that starts past the line, or that
    /// contains it (then its end is used); it is never replaced afterwards.
    /// `before` tracks the last chunk that ends at or before the line, or that
    /// contains it (then its start is used).
    pub fn around<I>(chunks: I, line: usize, space: Space) -> Self
    where
        I: IntoIterator<Item = Chunk>,
    {
        let mut out = Boundaries::default();
        for chunk in chunks {
            let local = chunk.range(space);

            if out.edit.after.is_none() {
                if local.start > line {
                    out.set_after(chunk.orig_from, chunk.edit_from);
                } else if local.end > line {
                    out.set_after(chunk.orig_to, chunk.edit_to);
                }
            }

            if local.end <= line {
                out.set_before(chunk.orig_to, chunk.edit_to);
            } else if local.start <= line {
                out.set_before(chunk.orig_from, chunk.edit_from);
            } else {
                // Chunks are ordered: nothing later can move `before`
                break;
            }
        }
        out
    }

    /// The boundary in the given space.
    pub fn in_space(&self, space: Space) -> Boundary {
        match space {
            Space::Orig => self.orig,
            Space::Edit => self.edit,
        }
    }

    fn set_before(&mut self, orig: usize, edit: usize) {
        self.orig.before = Some(orig);
        self.edit.before = Some(edit);
    }

    fn set_after(&mut self, orig: usize, edit: usize) {
        self.orig.after = Some(orig);
        self.edit.after = Some(edit);
    }
}

/// Chunk edges bracketing `line` in `space`, in both spaces.
pub fn chunk_boundaries_around(diff: &Diff, line: usize, space: Space) -> Boundaries {
    Boundaries::around(diff.chunks(), line, space)
}

/// Maps `line` from `space` into the other space.
///
/// Inside a chunk the position is scaled proportionally across the chunk;
/// in unchanged context it moves one to one.
///
/// # Panics
///
/// Panics if `line` is past the last line of `space`.
pub fn map_line(diff: &Diff, line: usize, space: Space) -> usize {
    let line_count = diff.line_count(space);
    assert!(
        line < line_count,
        "line {line} is past the end of the {space:?} text ({line_count} lines)"
    );
    let around = chunk_boundaries_around(diff, line, space);
    let src = around.in_space(space);
    let dst = around.in_space(space.other());

    let src_before = src.before.unwrap_or(0);
    let dst_before = dst.before.unwrap_or(0);
    let offset = line - src_before;

    match (src.after, dst.after) {
        (Some(src_after), Some(dst_after)) if src_after > src_before => {
            let src_span = src_after - src_before;
            let dst_span = dst_after.saturating_sub(dst_before);
            dst_before + offset * dst_span / src_span
        }
        (Some(_), Some(_)) => dst_before,
        _ => dst_before + offset,
    }
}
