// Chunk: docs/chunks/merge_session - Paired-view session: freshness, scroll sync, chunk copying
//!
//! Scroll alignment between the two panes of a diff view.
//!
//! The pane being scrolled is the source. Its vertical midpoint is located
//! relative to the nearest chunk edges, and the other pane is positioned so
//! that its matching span sits at the same relative height. Near the top and
//! bottom of the source the target is blended toward the source offset so
//! that the first and last lines of both panes come into view together.
//!
//! Every offset this module writes is stamped with the diff view that wrote
//! it. A pane reports its own scroll changes back to every diff view it
//! belongs to, and a view ignores reports of offsets it wrote itself within
//! the echo window, which breaks the feedback loop.

use std::time::{Duration, Instant};

use lite_merge_diff::{Boundary, Diff, Space};

use crate::side::Side;

/// Default echo window in milliseconds.
pub const DEFAULT_ECHO_WINDOW_MS: u64 = 50;

/// Scroll direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// Which diff view last wrote a pane's scroll offset, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastSyncStamp {
    pub by: Side,
    pub at: Instant,
}

impl LastSyncStamp {
    pub fn new(by: Side, at: Instant) -> Self {
        Self { by, at }
    }

    /// True if a scroll report reaching the `by` view at `now` is the echo
    /// of this write.
    pub fn suppresses(&self, by: Side, now: Instant, window: Duration) -> bool {
        self.by == by && now < self.at + window
    }
}

/// True if a pane carrying `stamp` should be ignored by the `by` view.
pub fn is_echo(stamp: Option<LastSyncStamp>, by: Side, now: Instant, window: Duration) -> bool {
    stamp.is_some_and(|stamp| stamp.suppresses(by, now, window))
}

/// Vertical scroll state of one pane, in pixels and lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollGeometry {
    pub scroll_top: f32,
    pub client_height: f32,
    pub line_count: usize,
}

impl ScrollGeometry {
    pub fn content_height(&self, line_height: f32) -> f32 {
        self.line_count as f32 * line_height
    }
}

/// Everything [`scroll_target`] needs: both panes' geometry plus the chunk
/// edges around the source midpoint in each space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub line_height: f32,
    pub source: ScrollGeometry,
    pub target: ScrollGeometry,
    pub source_span: Boundary,
    pub target_span: Boundary,
}

/// Line under the vertical midpoint of the source viewport.
pub fn mid_line(line_height: f32, source: &ScrollGeometry) -> usize {
    assert!(line_height > 0.0, "line height must be positive");
    let mid_y = source.scroll_top + source.client_height / 2.0;
    (mid_y / line_height).floor().max(0.0) as usize
}

/// Pixel offsets of a span's edges, with open ends at the buffer edges.
fn span_px(span: Boundary, line_height: f32, line_count: usize) -> (f32, f32) {
    let top = span.before.unwrap_or(0) as f32 * line_height;
    let bot = span.after.unwrap_or(line_count) as f32 * line_height;
    (top, bot)
}

/// Unclamped scroll-top for the target pane.
pub fn scroll_target(m: &ScrollMetrics) -> f32 {
    assert!(m.line_height > 0.0, "line height must be positive");
    let lh = m.line_height;
    let top = m.source.scroll_top;
    let client = m.source.client_height;
    let half = client / 2.0;
    let mid_y = top + half;

    let (src_top, src_bot) = span_px(m.source_span, lh, m.source.line_count);
    let (dst_top, dst_bot) = span_px(m.target_span, lh, m.target.line_count);

    let ratio = if src_bot > src_top {
        (mid_y - src_top) / (src_bot - src_top)
    } else {
        0.0
    };
    let mut target = dst_top - half + ratio * (dst_bot - dst_top);

    if half <= 0.0 {
        return target;
    }

    let top_mix = top / half;
    if target > top && top_mix < 1.0 {
        // Approaching the top: settle on the source offset
        target = target * top_mix + top * (1.0 - top_mix);
    } else {
        let bot_dist = m.source.content_height(lh) - client - top;
        if bot_dist < half {
            let other_height = m.target.content_height(lh);
            let bot_dist_other = other_height - m.target.client_height - target;
            let bot_mix = bot_dist / half;
            if bot_dist_other > bot_dist && bot_mix < 1.0 {
                // Approaching the bottom: keep the same distance to the end
                target = target * bot_mix
                    + (other_height - m.target.client_height - bot_dist) * (1.0 - bot_mix);
            }
        }
    }
    target
}

/// Scroll-top for the target pane given the current diff.
///
/// `source_space` is the coordinate space of the pane being scrolled.
pub fn sync_target(
    diff: &Diff,
    source_space: Space,
    line_height: f32,
    source: ScrollGeometry,
    target: ScrollGeometry,
) -> f32 {
    let mid = mid_line(line_height, &source);
    let around = diff.boundaries_around(mid, source_space);
    scroll_target(&ScrollMetrics {
        line_height,
        source,
        target,
        source_span: around.in_space(source_space),
        target_span: around.in_space(source_space.other()),
    })
}
