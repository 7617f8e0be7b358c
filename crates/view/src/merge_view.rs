// Chunk: docs/chunks/merge_session - Paired-view session: freshness, scroll sync, chunk copying
//!
//! A merge view: one edit pane flanked by up to two read-mostly originals.
//!
//! Each original pairs with the edit pane in a [`DiffView`] that owns the
//! cached diff for that pair. The session is driven entirely by its host:
//! edits and scrolls come in through methods, `tick` is called from the
//! host's event loop, and every method that depends on time takes `now`.

use std::time::{Duration, Instant};

use lite_merge_buffer::{DirtyLines, Position};
use lite_merge_diff::{map_line, Boundaries, Chunk, Space};
use log::{debug, trace};

use crate::config::MergeConfig;
use crate::error::MergeError;
use crate::freshness::{Freshness, FreshnessController};
use crate::marks::{self, ChangeSpan, Connector, LineMark, VisibleLines};
use crate::merge_ops::{self, CopyDirection};
use crate::pane::{Pane, PaneId};
use crate::scroll_sync::{is_echo, sync_target, Axis, LastSyncStamp};
use crate::side::Side;

/// One original paired with the edit pane.
#[derive(Debug)]
pub struct DiffView {
    side: Side,
    orig: Pane,
    freshness: FreshnessController,
    lock_scroll: bool,
}

impl DiffView {
    fn new(side: Side, text: &str, edit: &Pane, config: &MergeConfig) -> Self {
        let mut view = Self {
            side,
            orig: Pane::new(text, config.pane_geometry()),
            freshness: FreshnessController::new(
                config.diff.clone(),
                config.debounce(),
                config.slow_debounce(),
            ),
            lock_scroll: config.lock_scroll,
        };
        view.freshness.ensure_fresh(view.orig.buffer(), edit.buffer());
        view
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn original(&self) -> &Pane {
        &self.orig
    }

    pub fn freshness(&self) -> Freshness {
        self.freshness.state()
    }

    pub fn recompute_count(&self) -> u64 {
        self.freshness.recompute_count()
    }

    pub fn scroll_lock(&self) -> bool {
        self.lock_scroll
    }

    fn tick(&mut self, now: Instant, edit: &Pane) -> bool {
        self.freshness.tick(now, self.orig.buffer(), edit.buffer())
    }

    /// Moves the pane opposite `source` to line up with it. Returns true if
    /// an offset was written.
    ///
    /// A stale diff defers the sync: the pending recompute is not forced
    /// just to answer a scroll event.
    fn sync(
        &mut self,
        edit: &mut Pane,
        source: Space,
        axis: Axis,
        now: Instant,
        echo_window: Duration,
    ) -> bool {
        if !self.lock_scroll {
            return false;
        }
        let Some(diff) = self.freshness.diff() else {
            trace!("{} view: scroll sync skipped, diff is stale", self.side);
            return false;
        };
        let (src, dst): (&Pane, &mut Pane) = match source {
            Space::Edit => (&*edit, &mut self.orig),
            Space::Orig => (&self.orig, &mut *edit),
        };
        if is_echo(src.stamp(axis), self.side, now, echo_window) {
            trace!("{} view: ignoring echo of its own {axis:?} scroll", self.side);
            return false;
        }
        if !dst.is_scrollable(axis) {
            return false;
        }

        let px = match axis {
            Axis::Vertical => sync_target(
                diff,
                source,
                src.geometry().line_height,
                src.scroll_geometry(),
                dst.scroll_geometry(),
            ),
            Axis::Horizontal => src.scroll_left(),
        };
        dst.set_scroll(axis, px);
        dst.set_stamp(axis, LastSyncStamp::new(self.side, now));
        true
    }
}

/// Line marks and change spans for both panes of a diff view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewMarks {
    pub orig_lines: Vec<LineMark>,
    pub edit_lines: Vec<LineMark>,
    pub orig_spans: Vec<ChangeSpan>,
    pub edit_spans: Vec<ChangeSpan>,
}

#[derive(Debug)]
pub struct MergeView {
    config: MergeConfig,
    edit: Pane,
    views: [Option<DiffView>; 2],
}

fn slot(side: Side) -> usize {
    match side {
        Side::Left => 0,
        Side::Right => 1,
    }
}

fn view_mut(views: &mut [Option<DiffView>; 2], side: Side) -> Result<&mut DiffView, MergeError> {
    views[slot(side)]
        .as_mut()
        .ok_or(MergeError::MissingSide(side))
}

/// Changes spanning several lines take the slow debounce.
fn is_bulk(text: &str, replaced_lines: usize) -> bool {
    replaced_lines > 1 || text.matches('\n').count() > 1
}

impl MergeView {
    /// Creates a session and computes the initial diff of each pair.
    pub fn new(
        edit_text: &str,
        left: Option<&str>,
        right: Option<&str>,
        config: MergeConfig,
    ) -> Self {
        let edit = Pane::new(edit_text, config.pane_geometry());
        let views = [
            left.map(|text| DiffView::new(Side::Left, text, &edit, &config)),
            right.map(|text| DiffView::new(Side::Right, text, &edit, &config)),
        ];
        debug!(
            "merge view created: left={} right={}",
            views[0].is_some(),
            views[1].is_some()
        );
        Self {
            config,
            edit,
            views,
        }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    pub fn edit_pane(&self) -> &Pane {
        &self.edit
    }

    pub fn view(&self, side: Side) -> Result<&DiffView, MergeError> {
        self.views[slot(side)]
            .as_ref()
            .ok_or(MergeError::MissingSide(side))
    }

    /// Sides that have an original.
    pub fn sides(&self) -> impl Iterator<Item = Side> + '_ {
        Side::ALL
            .into_iter()
            .filter(|&side| self.views[slot(side)].is_some())
    }

    pub fn pane(&self, id: PaneId) -> Result<&Pane, MergeError> {
        match id {
            PaneId::Edit => Ok(&self.edit),
            PaneId::Original(side) => Ok(&self.view(side)?.orig),
        }
    }

    fn pane_mut(&mut self, id: PaneId) -> Result<&mut Pane, MergeError> {
        match id {
            PaneId::Edit => Ok(&mut self.edit),
            PaneId::Original(side) => Ok(&mut view_mut(&mut self.views, side)?.orig),
        }
    }

    pub fn freshness(&self, side: Side) -> Result<Freshness, MergeError> {
        Ok(self.view(side)?.freshness())
    }

    // ==================== Edits ====================

    /// Replaces text between two positions in a pane.
    pub fn replace_range(
        &mut self,
        pane: PaneId,
        start: Position,
        end: Position,
        text: &str,
        now: Instant,
    ) -> Result<DirtyLines, MergeError> {
        let bulk = is_bulk(text, start.line.abs_diff(end.line));
        let dirty = self
            .pane_mut(pane)?
            .edit(|buffer| buffer.replace_range(start, end, text));
        self.after_edit(pane, dirty, bulk, now);
        Ok(dirty)
    }

    /// Replaces the half-open line range `[from, to)` in a pane.
    pub fn replace_lines(
        &mut self,
        pane: PaneId,
        from: usize,
        to: usize,
        text: &str,
        now: Instant,
    ) -> Result<DirtyLines, MergeError> {
        let bulk = is_bulk(text, to.saturating_sub(from));
        let dirty = self
            .pane_mut(pane)?
            .edit(|buffer| buffer.replace_lines(from, to, text));
        self.after_edit(pane, dirty, bulk, now);
        Ok(dirty)
    }

    /// Replaces a pane's whole content.
    pub fn set_text(&mut self, pane: PaneId, text: &str, now: Instant) -> Result<DirtyLines, MergeError> {
        let dirty = self.pane_mut(pane)?.edit(|buffer| buffer.set_content(text));
        self.after_edit(pane, dirty, true, now);
        Ok(dirty)
    }

    fn after_edit(&mut self, pane: PaneId, dirty: DirtyLines, bulk: bool, now: Instant) {
        if !dirty.is_none() {
            self.notify_change(pane, bulk, now);
        }
    }

    /// Marks every diff view that shows `pane` as stale.
    fn notify_change(&mut self, pane: PaneId, bulk: bool, now: Instant) {
        match pane {
            PaneId::Edit => {
                for view in self.views.iter_mut().flatten() {
                    view.freshness.on_change(now, bulk);
                }
            }
            PaneId::Original(side) => {
                if let Some(view) = self.views[slot(side)].as_mut() {
                    view.freshness.on_change(now, bulk);
                }
            }
        }
    }

    // ==================== Scrolling ====================

    /// Scrolls a pane vertically and lets the diff views follow. Returns the
    /// offset applied after clamping.
    pub fn scroll_vertical(&mut self, pane: PaneId, px: f32, now: Instant) -> Result<f32, MergeError> {
        self.scroll(pane, Axis::Vertical, px, now)
    }

    /// Scrolls a pane horizontally and lets the diff views follow.
    pub fn scroll_horizontal(&mut self, pane: PaneId, px: f32, now: Instant) -> Result<f32, MergeError> {
        self.scroll(pane, Axis::Horizontal, px, now)
    }

    fn scroll(&mut self, pane: PaneId, axis: Axis, px: f32, now: Instant) -> Result<f32, MergeError> {
        let applied = self.pane_mut(pane)?.set_scroll(axis, px);
        self.on_scroll(pane, axis, now)?;
        Ok(applied)
    }

    /// Reacts to a pane's offset having changed, whoever changed it.
    ///
    /// Each diff view showing the pane aligns its other pane. A pane moved
    /// that way is itself reported onward, so scrolling one original also
    /// moves the other one through the edit pane. Each view writes at most
    /// once per call. Returns the number of panes moved.
    pub fn on_scroll(&mut self, pane: PaneId, axis: Axis, now: Instant) -> Result<usize, MergeError> {
        self.pane(pane)?;
        let echo_window = self.config.echo_window();
        let mut pending = vec![pane];
        let mut synced = [false; 2];
        let mut moved = 0;

        while let Some(source) = pending.pop() {
            for side in Side::ALL {
                let i = slot(side);
                if synced[i] {
                    continue;
                }
                let Some(view) = self.views[i].as_mut() else {
                    continue;
                };
                let space = match source {
                    PaneId::Edit => Space::Edit,
                    PaneId::Original(s) if s == side => Space::Orig,
                    PaneId::Original(_) => continue,
                };
                if view.sync(&mut self.edit, space, axis, now, echo_window) {
                    synced[i] = true;
                    moved += 1;
                    pending.push(match space {
                        Space::Edit => PaneId::Original(side),
                        Space::Orig => PaneId::Edit,
                    });
                }
            }
        }
        Ok(moved)
    }

    pub fn scroll_lock(&self, side: Side) -> Result<bool, MergeError> {
        Ok(self.view(side)?.lock_scroll)
    }

    /// Turns scroll lock on or off. Turning it on lines the original up with
    /// the edit pane straight away.
    pub fn set_scroll_lock(&mut self, side: Side, on: bool, now: Instant) -> Result<(), MergeError> {
        let echo_window = self.config.echo_window();
        let view = view_mut(&mut self.views, side)?;
        view.lock_scroll = on;
        if on {
            view.sync(&mut self.edit, Space::Edit, Axis::Vertical, now, echo_window);
        }
        Ok(())
    }

    /// Resizes every pane's viewport.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        self.edit.resize(viewport_width, viewport_height);
        for view in self.views.iter_mut().flatten() {
            view.orig.resize(viewport_width, viewport_height);
        }
    }

    // ==================== Freshness ====================

    /// Runs every recompute that has come due. Returns how many ran.
    pub fn tick(&mut self, now: Instant) -> usize {
        let edit = &self.edit;
        self.views
            .iter_mut()
            .flatten()
            .map(|view| view.tick(now, edit))
            .filter(|&fired| fired)
            .count()
    }

    /// Earliest pending recompute, for sizing the host's wait.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.views
            .iter()
            .flatten()
            .filter_map(|view| view.freshness.deadline())
            .min()
    }

    /// Cancels pending recomputes and drops every cached diff. Queries
    /// afterwards see no chunks; edits and scrolls still work on the panes.
    pub fn dispose(&mut self) {
        for view in self.views.iter_mut().flatten() {
            view.freshness.dispose();
        }
        debug!("merge view disposed");
    }

    // ==================== Queries ====================

    /// Chunks between `side`'s original and the edit pane, recomputing the
    /// diff first if it is stale.
    pub fn chunks(&mut self, side: Side) -> Result<Vec<Chunk>, MergeError> {
        let edit = &self.edit;
        let view = view_mut(&mut self.views, side)?;
        Ok(view
            .freshness
            .ensure_fresh(view.orig.buffer(), edit.buffer())
            .map(|diff| diff.chunks().collect())
            .unwrap_or_default())
    }

    /// Chunk edges around `line` of `space`, in both spaces.
    pub fn boundaries_around(
        &mut self,
        side: Side,
        line: usize,
        space: Space,
    ) -> Result<Boundaries, MergeError> {
        let edit = &self.edit;
        let view = view_mut(&mut self.views, side)?;
        Ok(view
            .freshness
            .ensure_fresh(view.orig.buffer(), edit.buffer())
            .map(|diff| diff.boundaries_around(line, space))
            .unwrap_or_default())
    }

    /// Translates `line` of `space` into the other space.
    ///
    /// A line past the end of its pane is rejected.
    pub fn map_line(&mut self, side: Side, line: usize, space: Space) -> Result<usize, MergeError> {
        let edit = &self.edit;
        let view = view_mut(&mut self.views, side)?;
        let (pane, line_count) = match space {
            Space::Orig => ("original", view.orig.line_count()),
            Space::Edit => ("edit", edit.line_count()),
        };
        if line >= line_count {
            return Err(MergeError::LineOutOfRange {
                pane,
                line,
                line_count,
            });
        }
        Ok(view
            .freshness
            .ensure_fresh(view.orig.buffer(), edit.buffer())
            .map_or(line, |diff| map_line(diff, line, space)))
    }

    /// Copies `chunk` between `side`'s original and the edit pane.
    ///
    /// Returns `Ok(None)` without touching either buffer while the diff is
    /// stale, since the chunk may no longer describe the buffers. The copy
    /// itself is an edit and leaves the diff stale.
    pub fn copy_chunk(
        &mut self,
        side: Side,
        direction: CopyDirection,
        chunk: Chunk,
        now: Instant,
    ) -> Result<Option<DirtyLines>, MergeError> {
        let view = view_mut(&mut self.views, side)?;
        if view.freshness.is_stale() {
            debug!("{side} view: copy of {chunk:?} ignored, diff is stale");
            return Ok(None);
        }

        let dirty =
            merge_ops::copy_chunk(view.orig.buffer_mut(), self.edit.buffer_mut(), chunk, direction)?;
        let target = match direction {
            CopyDirection::OrigToEdit => {
                self.edit.record_edit(dirty);
                PaneId::Edit
            }
            CopyDirection::EditToOrig => {
                view.orig.record_edit(dirty);
                PaneId::Original(side)
            }
        };
        self.after_edit(target, dirty, true, now);
        Ok(Some(dirty))
    }

    /// Line marks and change spans for both panes of `side`'s view.
    pub fn marks(&mut self, side: Side) -> Result<ViewMarks, MergeError> {
        let edit = &self.edit;
        let view = view_mut(&mut self.views, side)?;
        let style = side.style();
        let Some(diff) = view.freshness.ensure_fresh(view.orig.buffer(), edit.buffer()) else {
            return Ok(ViewMarks::default());
        };
        Ok(ViewMarks {
            orig_lines: marks::chunk_line_marks(diff.chunks(), Space::Orig, view.orig.line_count(), style),
            edit_lines: marks::chunk_line_marks(diff.chunks(), Space::Edit, edit.line_count(), style),
            orig_spans: marks::change_spans(diff, Space::Orig, style),
            edit_spans: marks::change_spans(diff, Space::Edit, style),
        })
    }

    /// Connector shapes for the chunks visible in both panes of `side`'s view.
    pub fn connectors(&mut self, side: Side) -> Result<Vec<Connector>, MergeError> {
        let edit = &self.edit;
        let view = view_mut(&mut self.views, side)?;
        let Some(diff) = view.freshness.ensure_fresh(view.orig.buffer(), edit.buffer()) else {
            return Ok(Vec::new());
        };
        Ok(marks::connectors(
            diff.chunks(),
            VisibleLines::of(&view.orig),
            VisibleLines::of(edit),
            edit.geometry().line_height,
            side,
        ))
    }
}
