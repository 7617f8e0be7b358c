// Chunk: docs/chunks/merge_session - Paired-view session: freshness, scroll sync, chunk copying
//!
//! Copying a chunk's lines from one side of a diff view to the other.

use lite_merge_buffer::{DirtyLines, TextBuffer};
use lite_merge_diff::Chunk;
use serde::{Deserialize, Serialize};

use crate::error::MergeError;

/// Which way a chunk is copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyDirection {
    /// Revert: the edit pane takes the original's lines.
    OrigToEdit,
    /// Apply: the original takes the edit pane's lines.
    EditToOrig,
}

fn check_start(pane: &'static str, line: usize, buffer: &TextBuffer) -> Result<(), MergeError> {
    let line_count = buffer.line_count();
    if line > line_count {
        return Err(MergeError::ChunkOutOfRange {
            pane,
            line,
            line_count,
        });
    }
    Ok(())
}

/// Replaces the chunk's range in the target buffer with the source buffer's
/// lines for the same chunk. Returns the target's dirty lines.
///
/// A range ending past the last line runs to the buffer end; one starting
/// past the line count is rejected and neither buffer is touched.
pub fn copy_chunk(
    orig: &mut TextBuffer,
    edit: &mut TextBuffer,
    chunk: Chunk,
    direction: CopyDirection,
) -> Result<DirtyLines, MergeError> {
    check_start("original", chunk.orig_from, orig)?;
    check_start("edit", chunk.edit_from, edit)?;

    let dirty = match direction {
        CopyDirection::OrigToEdit => {
            let text = orig.text_in_lines(chunk.orig_from, chunk.orig_to);
            edit.replace_lines(chunk.edit_from, chunk.edit_to, &text)
        }
        CopyDirection::EditToOrig => {
            let text = edit.text_in_lines(chunk.edit_from, chunk.edit_to);
            orig.replace_lines(chunk.orig_from, chunk.orig_to, &text)
        }
    };
    Ok(dirty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lite_merge_diff::compute_diff;

    fn only_chunk(orig: &TextBuffer, edit: &TextBuffer) -> Chunk {
        let chunks: Vec<Chunk> = compute_diff(&orig.content(), &edit.content())
            .chunks()
            .collect();
        assert_eq!(chunks.len(), 1, "{chunks:?}");
        chunks[0]
    }

    #[test]
    fn test_revert_modified_line() {
        let mut orig = TextBuffer::from_str("a\nb\nc\n");
        let mut edit = TextBuffer::from_str("a\nX\nc\n");
        let chunk = only_chunk(&orig, &edit);

        copy_chunk(&mut orig, &mut edit, chunk, CopyDirection::OrigToEdit).unwrap();
        assert_eq!(edit.content(), "a\nb\nc\n");
        assert_eq!(orig.content(), "a\nb\nc\n");
    }

    #[test]
    fn test_apply_modified_line() {
        let mut orig = TextBuffer::from_str("a\nb\nc\n");
        let mut edit = TextBuffer::from_str("a\nX\nc\n");
        let chunk = only_chunk(&orig, &edit);

        copy_chunk(&mut orig, &mut edit, chunk, CopyDirection::EditToOrig).unwrap();
        assert_eq!(orig.content(), "a\nX\nc\n");
        assert_eq!(edit.content(), "a\nX\nc\n");
    }

    #[test]
    fn test_revert_and_apply_appended_line() {
        let mut orig = TextBuffer::from_str("a\nb\n");
        let mut edit = TextBuffer::from_str("a\nb\nc\n");
        let chunk = only_chunk(&orig, &edit);

        copy_chunk(&mut orig, &mut edit, chunk, CopyDirection::EditToOrig).unwrap();
        assert_eq!(orig.content(), "a\nb\nc\n");

        let mut orig = TextBuffer::from_str("a\nb\n");
        copy_chunk(&mut orig, &mut edit, chunk, CopyDirection::OrigToEdit).unwrap();
        assert_eq!(edit.content(), "a\nb\n");
    }

    #[test]
    fn test_apply_prepended_line() {
        let mut orig = TextBuffer::from_str("a\nb\n");
        let mut edit = TextBuffer::from_str("x\na\nb\n");
        let chunk = only_chunk(&orig, &edit);

        copy_chunk(&mut orig, &mut edit, chunk, CopyDirection::EditToOrig).unwrap();
        assert_eq!(orig.content(), "x\na\nb\n");
    }

    #[test]
    fn test_start_past_end_is_rejected() {
        let mut orig = TextBuffer::from_str("a\n");
        let mut edit = TextBuffer::from_str("a\n");
        let err = copy_chunk(
            &mut orig,
            &mut edit,
            Chunk::new(0, 1, 5, 6),
            CopyDirection::OrigToEdit,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            MergeError::ChunkOutOfRange { pane: "edit", line: 5, line_count: 2 }
        ));
        assert_eq!(edit.content(), "a\n");
    }

    #[test]
    fn test_start_at_line_count_appends() {
        let mut orig = TextBuffer::from_str("a\nb");
        let mut edit = TextBuffer::from_str("a\n");
        // Line 2 of edit is past its last line: the copy lands at the end
        copy_chunk(&mut orig, &mut edit, Chunk::new(1, 2, 2, 2), CopyDirection::OrigToEdit)
            .unwrap();
        assert_eq!(edit.content(), "a\nb");
    }
}
