// Chunk: docs/chunks/diff_chunks - Diff computation, line chunking and position mapping

//! lite-merge-diff: the algorithmic core of the merge view.
//!
//! Three layers, each built on the one before:
//!
//! 1. [`compute_diff`] runs a token-level diff (via `similar`), folds short
//!    shared runs between edits into them, and normalises the result into a
//!    [`Diff`]: an ordered list of non-empty [`DiffSegment`]s where
//!    no two neighbours share a [`SegmentKind`].
//! 2. [`Diff::chunks`] walks that list and groups every non-equal region into
//!    a line-aligned [`Chunk`], expressed in both the original and the edit
//!    coordinate spaces. Chunk edges only ever land on lines that are clean
//!    line boundaries in both texts.
//! 3. [`chunk_boundaries_around`] brackets a line in one space with the
//!    nearest chunk edges and reports the matching lines in the other space,
//!    which is what proportional scroll alignment and [`map_line`] need.
//!
//! # Example
//!
//! ```
//! use lite_merge_diff::{compute_diff, Chunk};
//!
//! let diff = compute_diff("a\nb\nc\n", "a\nX\nc\n");
//! let chunks: Vec<Chunk> = diff.chunks().collect();
//! assert_eq!(chunks, vec![Chunk::new(1, 2, 1, 2)]);
//! ```

mod boundaries;
mod chunks;
mod engine;
mod types;

pub use boundaries::{chunk_boundaries_around, map_line, Boundaries, Boundary};
pub use chunks::{iterate_chunks, Chunks};
pub use engine::{
    cleanup, cleanup_semantic, compute_diff, compute_diff_with, Diff, DiffAlgorithm, DiffOptions,
    Granularity,
};
pub use types::{Chunk, DiffSegment, SegmentKind, Space};
