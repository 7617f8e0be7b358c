// Chunk: docs/chunks/diff_chunks - Diff computation, line chunking and position mapping

//! Line chunking.
//!
//! Walks a normalised segment list and groups every non-equal region into a
//! [`Chunk`]. An equal segment separates two chunks only if it supplies at
//! least one whole line of context that starts and ends on a clean line
//! boundary in *both* texts. A mid-line edit therefore never gets split
//! around a shared word, and chunk edges always fall on real line starts.

use crate::types::{Chunk, DiffSegment, SegmentKind};

/// Line/column cursor in one coordinate space.
#[derive(Debug, Clone, Copy, Default)]
struct LineCursor {
    line: usize,
    col: usize,
}

impl LineCursor {
    fn advance(&mut self, text: &str) {
        match text.rfind('\n') {
            Some(last_newline) => {
                self.line += text.matches('\n').count();
                self.col = text[last_newline + 1..].chars().count();
            }
            None => self.col += text.chars().count(),
        }
    }

    /// First line past everything seen so far; a partial last line counts.
    fn end_line(&self) -> usize {
        self.line + usize::from(self.col > 0)
    }
}

/// True if the equal segment at `i` begins at a line start in both texts.
///
/// The segment before it ends one text; when it is a change, the segment
/// before that ends the other text, so both must end in a newline.
fn is_clean_start(segments: &[DiffSegment], i: usize) -> bool {
    if i == 0 {
        return true;
    }
    if !segments[i - 1].text.ends_with('\n') {
        return false;
    }
    i == 1 || segments[i - 2].text.ends_with('\n')
}

/// True if the equal segment at `i` is followed by a newline in both texts.
///
/// A lone `"\n"` change never counts: it joins or splits lines rather than
/// ending one, and a trailing-newline difference must stay inside a chunk.
fn is_clean_end(segments: &[DiffSegment], i: usize) -> bool {
    let last = segments.len() - 1;
    if i == last {
        return true;
    }
    let next = &segments[i + 1].text;
    if next.len() == 1 || !next.starts_with('\n') {
        return false;
    }
    if i + 1 == last {
        return true;
    }
    let after = &segments[i + 2].text;
    after.len() > 1 && after.starts_with('\n')
}

/// Iterator over the chunks of a segment list, in order.
///
/// Created by [`crate::Diff::chunks`].
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    segments: &'a [DiffSegment],
    index: usize,
    orig: LineCursor,
    edit: LineCursor,
    /// Start of the chunk that is still open.
    start_orig: usize,
    start_edit: usize,
    done: bool,
}

impl<'a> Chunks<'a> {
    pub(crate) fn new(segments: &'a [DiffSegment]) -> Self {
        Self {
            segments,
            index: 0,
            orig: LineCursor::default(),
            edit: LineCursor::default(),
            start_orig: 0,
            start_edit: 0,
            done: false,
        }
    }

    /// Consumes the equal segment at `i`. Returns the chunk it closes, if any.
    fn close_at_equal(&mut self, i: usize) -> Option<Chunk> {
        let text = &self.segments[i].text;
        let start_off = usize::from(!is_clean_start(self.segments, i));
        let clean_from_orig = self.orig.line + start_off;
        let clean_from_edit = self.edit.line + start_off;

        self.orig.advance(text);
        self.edit.advance(text);

        let end_off = usize::from(is_clean_end(self.segments, i));
        let clean_to_orig = self.orig.line + end_off;
        let clean_to_edit = self.edit.line + end_off;

        // Not a single whole line of clean context: the segment is absorbed
        // into the open chunk.
        if clean_to_edit <= clean_from_edit {
            return None;
        }

        let closed = Chunk::new(
            self.start_orig,
            clean_from_orig.max(self.start_orig),
            self.start_edit,
            clean_from_edit.max(self.start_edit),
        );
        self.start_orig = clean_to_orig;
        self.start_edit = clean_to_edit;

        // Nothing is open before the first segment.
        (i > 0 && !closed.is_empty()).then_some(closed)
    }

    /// The chunk still open after the last segment, if it covers anything.
    fn trailing(&self) -> Option<Chunk> {
        let end_orig = self.orig.end_line();
        let end_edit = self.edit.end_line();
        if end_orig <= self.start_orig && end_edit <= self.start_edit {
            return None;
        }
        Some(Chunk::new(
            self.start_orig,
            end_orig.max(self.start_orig),
            self.start_edit,
            end_edit.max(self.start_edit),
        ))
    }
}

impl Iterator for Chunks<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        while self.index < self.segments.len() {
            let i = self.index;
            self.index += 1;
            let segment = &self.segments[i];
            match segment.kind {
                SegmentKind::Insert => self.edit.advance(&segment.text),
                SegmentKind::Delete => self.orig.advance(&segment.text),
                SegmentKind::Equal => {
                    if let Some(chunk) = self.close_at_equal(i) {
                        return Some(chunk);
                    }
                }
            }
        }

        if self.done {
            return None;
        }
        self.done = true;
        self.trailing()
    }
}

impl std::iter::FusedIterator for Chunks<'_> {}

/// Calls `f` with every chunk of `diff`, in order.
pub fn iterate_chunks<F>(diff: &crate::Diff, f: F)
where
    F: FnMut(Chunk),
{
    diff.chunks().for_each(f);
}
