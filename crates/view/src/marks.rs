// Chunk: docs/chunks/merge_session - Paired-view session: freshness, scroll sync, chunk copying
//!
//! Render data derived from chunks: whole-line marks, intra-line change
//! spans and the connector shapes drawn in the gap between two panes.
//!
//! Nothing here draws. Hosts turn these values into whatever their
//! rendering layer uses.

use lite_merge_buffer::Position;
use lite_merge_diff::{Chunk, Diff, SegmentKind, Space};

use crate::pane::Pane;
use crate::side::{MarkRole, Side, SideStyle};

/// A whole-line decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMark {
    pub line: usize,
    pub role: MarkRole,
    pub class: &'static str,
}

/// Text that exists on only one side of the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeSpan {
    pub from: Position,
    pub to: Position,
    pub class: &'static str,
}

/// Visible window of one pane, as connectors need it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleLines {
    /// First visible line.
    pub first: usize,
    /// Last visible line, inclusive.
    pub last: usize,
    pub scroll_top: f32,
}

impl VisibleLines {
    pub fn of(pane: &Pane) -> Self {
        Self {
            first: pane.first_visible_line(),
            last: pane.last_visible_line(),
            scroll_top: pane.scroll_top(),
        }
    }

    fn touches(&self, from: usize, to: usize) -> bool {
        from <= self.last && to >= self.first
    }
}

/// Shape joining a chunk's range in the original to its range in the edit
/// pane, in pixels relative to each pane's viewport top.
///
/// `left_*` is the gap edge next to the pane on the left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    pub chunk: Chunk,
    pub left_top: f32,
    pub left_bottom: f32,
    pub right_top: f32,
    pub right_bottom: f32,
    /// Where the copy button for this chunk sits, aligned with the original.
    pub copy_top: f32,
    pub class: &'static str,
    pub copy_glyph: &'static str,
}

/// Whole-line marks for every chunk, in one space.
///
/// Lines of a chunk get start / end / interior roles. A chunk that is empty in
/// this space marks the line above it, or line 0 when it sits at the top.
pub fn chunk_line_marks<I>(chunks: I, space: Space, line_count: usize, style: &SideStyle) -> Vec<LineMark>
where
    I: IntoIterator<Item = Chunk>,
{
    let mut marks = Vec::new();
    let mut push = |line, role| {
        marks.push(LineMark {
            line,
            role,
            class: style.class_for(role),
        })
    };

    for chunk in chunks {
        let range = chunk.range(space);
        let (start, end) = (range.start, range.end);

        for line in start..end.min(line_count) {
            let role = match (line == start, line + 1 == end) {
                (true, true) => MarkRole::StartEnd,
                (true, false) => MarkRole::Start,
                (false, true) => MarkRole::End,
                (false, false) => MarkRole::Chunk,
            };
            push(line, role);
        }

        if start == end && start <= line_count {
            if start > 0 {
                push(start - 1, MarkRole::EmptyEnd);
            } else {
                push(0, MarkRole::EmptyStart);
            }
        }
    }
    marks
}

/// Spans of text present only in `space`: insertions in the edit pane,
/// deletions in the original.
pub fn change_spans(diff: &Diff, space: Space, style: &SideStyle) -> Vec<ChangeSpan> {
    let (own_kind, class) = match space {
        Space::Edit => (SegmentKind::Insert, style.inserted),
        Space::Orig => (SegmentKind::Delete, style.deleted),
    };

    let mut pos = Position::new(0, 0);
    let mut spans = Vec::new();
    for segment in diff.segments() {
        if segment.kind == SegmentKind::Equal {
            pos = advance(pos, &segment.text);
        } else if segment.kind == own_kind {
            let end = advance(pos, &segment.text);
            spans.push(ChangeSpan {
                from: pos,
                to: end,
                class,
            });
            pos = end;
        }
    }
    spans
}

fn advance(pos: Position, text: &str) -> Position {
    match text.rfind('\n') {
        Some(last_newline) => Position::new(
            pos.line + text.matches('\n').count(),
            text[last_newline + 1..].chars().count(),
        ),
        None => Position::new(pos.line, pos.col + text.chars().count()),
    }
}

/// Connectors for the chunks visible in both panes of a diff view.
pub fn connectors<I>(
    chunks: I,
    orig: VisibleLines,
    edit: VisibleLines,
    line_height: f32,
    side: Side,
) -> Vec<Connector>
where
    I: IntoIterator<Item = Chunk>,
{
    let style = side.style();
    chunks
        .into_iter()
        .filter(|c| edit.touches(c.edit_from, c.edit_to) && orig.touches(c.orig_from, c.orig_to))
        .map(|chunk| {
            let orig_top = line_height * chunk.orig_from as f32 - orig.scroll_top;
            let orig_bottom = line_height * chunk.orig_to as f32 - orig.scroll_top;
            let edit_top = line_height * chunk.edit_from as f32 - edit.scroll_top;
            let edit_bottom = line_height * chunk.edit_to as f32 - edit.scroll_top;

            let ((left_top, left_bottom), (right_top, right_bottom)) =
                if side.original_is_leftmost() {
                    ((orig_top, orig_bottom), (edit_top, edit_bottom))
                } else {
                    ((edit_top, edit_bottom), (orig_top, orig_bottom))
                };

            Connector {
                chunk,
                left_top,
                left_bottom,
                right_top,
                right_bottom,
                copy_top: orig_top,
                class: style.connect,
                copy_glyph: style.copy_glyph,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lite_merge_diff::compute_diff;

    fn roles(marks: &[LineMark]) -> Vec<(usize, MarkRole)> {
        marks.iter().map(|m| (m.line, m.role)).collect()
    }

    #[test]
    fn test_multi_line_chunk_roles() {
        let marks = chunk_line_marks([Chunk::new(1, 4, 1, 2)], Space::Orig, 10, Side::Left.style());
        assert_eq!(
            roles(&marks),
            vec![(1, MarkRole::Start), (2, MarkRole::Chunk), (3, MarkRole::End)]
        );
        assert_eq!(marks[0].class, "lm-l-chunk-start");

        let marks = chunk_line_marks([Chunk::new(1, 4, 1, 2)], Space::Edit, 10, Side::Left.style());
        assert_eq!(roles(&marks), vec![(1, MarkRole::StartEnd)]);
    }

    #[test]
    fn test_empty_range_marks_neighbour() {
        let style = Side::Right.style();
        let marks = chunk_line_marks([Chunk::new(2, 2, 2, 3)], Space::Orig, 3, style);
        assert_eq!(roles(&marks), vec![(1, MarkRole::EmptyEnd)]);
        assert_eq!(marks[0].class, "lm-r-chunk-emptyend");

        let marks = chunk_line_marks([Chunk::new(0, 0, 0, 1)], Space::Orig, 3, style);
        assert_eq!(roles(&marks), vec![(0, MarkRole::EmptyStart)]);
    }

    #[test]
    fn test_marks_stop_at_line_count() {
        let marks = chunk_line_marks([Chunk::new(1, 5, 1, 5)], Space::Edit, 3, Side::Left.style());
        assert_eq!(roles(&marks), vec![(1, MarkRole::Start), (2, MarkRole::Chunk)]);
    }

    #[test]
    fn test_change_spans_per_space() {
        let diff = compute_diff("a\nb\nc\n", "a\nX\nc\n");
        let style = Side::Right.style();

        let edit = change_spans(&diff, Space::Edit, style);
        assert_eq!(edit.len(), 1);
        assert_eq!((edit[0].from, edit[0].to), (Position::new(1, 0), Position::new(1, 1)));
        assert_eq!(edit[0].class, "lm-r-inserted");

        let orig = change_spans(&diff, Space::Orig, style);
        assert_eq!(orig.len(), 1);
        assert_eq!((orig[0].from, orig[0].to), (Position::new(1, 0), Position::new(1, 1)));
        assert_eq!(orig[0].class, "lm-r-deleted");
    }

    #[test]
    fn test_connectors_flip_for_left_side() {
        let view = VisibleLines { first: 0, last: 20, scroll_top: 0.0 };
        let chunk = Chunk::new(2, 3, 4, 6);

        let right = connectors([chunk], view, view, 10.0, Side::Right);
        assert_eq!((right[0].left_top, right[0].left_bottom), (40.0, 60.0));
        assert_eq!((right[0].right_top, right[0].right_bottom), (20.0, 30.0));

        let left = connectors([chunk], view, view, 10.0, Side::Left);
        assert_eq!((left[0].left_top, left[0].left_bottom), (20.0, 30.0));
        assert_eq!((left[0].right_top, left[0].right_bottom), (40.0, 60.0));
        assert_eq!(left[0].copy_top, 20.0);
        assert_eq!(left[0].copy_glyph, "⇝");
    }

    #[test]
    fn test_connectors_skip_offscreen_chunks_and_apply_scroll() {
        let orig = VisibleLines { first: 10, last: 20, scroll_top: 100.0 };
        let edit = VisibleLines { first: 12, last: 22, scroll_top: 120.0 };
        let chunks = [Chunk::new(2, 3, 2, 3), Chunk::new(15, 16, 17, 18)];

        let out = connectors(chunks, orig, edit, 10.0, Side::Right);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].chunk, chunks[1]);
        assert_eq!(out[0].right_top, 50.0);
        assert_eq!(out[0].left_top, 50.0);
    }
}
