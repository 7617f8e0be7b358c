// Chunk: docs/chunks/merge_session - Paired-view session: freshness, scroll sync, chunk copying
//!
//! One editor pane of a merge view: a text buffer plus its scroll state.
//!
//! Scroll offsets are kept in pixels and clamped to the content, the same
//! way a uniform-height row scroller does it. Lines are all `line_height`
//! tall; content width is the longest line times a fixed character width.

use std::ops::Range;

use lite_merge_buffer::{DirtyLines, TextBuffer};

use crate::scroll_sync::{Axis, LastSyncStamp, ScrollGeometry};

/// Fixed metrics of a pane's viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneGeometry {
    pub line_height: f32,
    pub char_width: f32,
    pub viewport_height: f32,
    pub viewport_width: f32,
}

/// Identifies a pane within a merge view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneId {
    Edit,
    Original(crate::side::Side),
}

#[derive(Debug)]
pub struct Pane {
    buffer: TextBuffer,
    geometry: PaneGeometry,
    scroll_top: f32,
    scroll_left: f32,
    vertical_stamp: Option<LastSyncStamp>,
    horizontal_stamp: Option<LastSyncStamp>,
    dirty: DirtyLines,
}

impl Pane {
    /// Creates a pane scrolled to the top.
    ///
    /// # Panics
    ///
    /// Panics if the line height or character width is not positive.
    pub fn new(text: &str, geometry: PaneGeometry) -> Self {
        assert!(geometry.line_height > 0.0, "line height must be positive");
        assert!(geometry.char_width > 0.0, "char width must be positive");
        Self {
            buffer: TextBuffer::from_str(text),
            geometry,
            scroll_top: 0.0,
            scroll_left: 0.0,
            vertical_stamp: None,
            horizontal_stamp: None,
            dirty: DirtyLines::None,
        }
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn geometry(&self) -> PaneGeometry {
        self.geometry
    }

    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    /// Applies an edit to the buffer, records its dirty lines and re-clamps
    /// the scroll offsets to the new content.
    pub(crate) fn edit<F>(&mut self, f: F) -> DirtyLines
    where
        F: FnOnce(&mut TextBuffer) -> DirtyLines,
    {
        let dirty = f(&mut self.buffer);
        self.record_edit(dirty);
        dirty
    }

    /// Raw buffer access for edits spanning two panes. Callers must pass the
    /// result to `record_edit`.
    pub(crate) fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    pub(crate) fn record_edit(&mut self, dirty: DirtyLines) {
        if dirty.is_none() {
            return;
        }
        self.dirty.merge(dirty);
        self.set_scroll(Axis::Vertical, self.scroll_top);
        self.set_scroll(Axis::Horizontal, self.scroll_left);
    }

    /// Lines changed since the last call.
    pub fn take_dirty(&mut self) -> DirtyLines {
        std::mem::take(&mut self.dirty)
    }

    // ==================== Scrolling ====================

    pub fn content_height(&self) -> f32 {
        self.line_count() as f32 * self.geometry.line_height
    }

    pub fn content_width(&self) -> f32 {
        let longest = (0..self.line_count())
            .map(|line| self.buffer.line_len(line))
            .max()
            .unwrap_or(0);
        longest as f32 * self.geometry.char_width
    }

    /// Largest valid offset along `axis`.
    pub fn max_scroll(&self, axis: Axis) -> f32 {
        let overflow = match axis {
            Axis::Vertical => self.content_height() - self.geometry.viewport_height,
            Axis::Horizontal => self.content_width() - self.geometry.viewport_width,
        };
        overflow.max(0.0)
    }

    /// True if the content overflows the viewport along `axis`.
    pub fn is_scrollable(&self, axis: Axis) -> bool {
        self.max_scroll(axis) > 0.0
    }

    pub fn scroll(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.scroll_top,
            Axis::Horizontal => self.scroll_left,
        }
    }

    pub fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    pub fn scroll_left(&self) -> f32 {
        self.scroll_left
    }

    /// Sets the offset along `axis`, clamped to `[0, max_scroll]`. Returns
    /// the offset actually applied.
    pub fn set_scroll(&mut self, axis: Axis, px: f32) -> f32 {
        let clamped = px.clamp(0.0, self.max_scroll(axis));
        match axis {
            Axis::Vertical => self.scroll_top = clamped,
            Axis::Horizontal => self.scroll_left = clamped,
        }
        clamped
    }

    /// Changes the viewport size and re-clamps both offsets.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        self.geometry.viewport_width = viewport_width;
        self.geometry.viewport_height = viewport_height;
        self.set_scroll(Axis::Vertical, self.scroll_top);
        self.set_scroll(Axis::Horizontal, self.scroll_left);
    }

    /// Vertical state in the form scroll alignment consumes.
    pub fn scroll_geometry(&self) -> ScrollGeometry {
        ScrollGeometry {
            scroll_top: self.scroll_top,
            client_height: self.geometry.viewport_height,
            line_count: self.line_count(),
        }
    }

    // ==================== Visible lines ====================

    pub fn first_visible_line(&self) -> usize {
        (self.scroll_top / self.geometry.line_height).floor() as usize
    }

    /// Last line with any part inside the viewport.
    pub fn last_visible_line(&self) -> usize {
        let bottom = self.scroll_top + self.geometry.viewport_height;
        let last = (bottom / self.geometry.line_height).ceil() as usize;
        last.saturating_sub(1)
            .min(self.line_count().saturating_sub(1))
            .max(self.first_visible_line())
    }

    /// Visible lines as a half-open range.
    pub fn visible_lines(&self) -> Range<usize> {
        self.first_visible_line()..self.last_visible_line() + 1
    }

    // ==================== Sync stamps ====================

    pub fn stamp(&self, axis: Axis) -> Option<LastSyncStamp> {
        match axis {
            Axis::Vertical => self.vertical_stamp,
            Axis::Horizontal => self.horizontal_stamp,
        }
    }

    pub(crate) fn set_stamp(&mut self, axis: Axis, stamp: LastSyncStamp) {
        match axis {
            Axis::Vertical => self.vertical_stamp = Some(stamp),
            Axis::Horizontal => self.horizontal_stamp = Some(stamp),
        }
    }
}
