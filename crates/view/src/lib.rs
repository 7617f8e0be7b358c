// Chunk: docs/chunks/merge_session - Paired-view session: freshness, scroll sync, chunk copying

//! lite-merge-view: the session layer of a side-by-side merge view.
//!
//! A [`MergeView`] holds one edit pane and up to two originals, each paired
//! with the edit pane in a diff view. The session keeps each pair's diff
//! fresh on a debounce, keeps the panes' scroll positions aligned through
//! changed regions, copies chunks between panes on request, and derives the
//! line marks and connector shapes a renderer needs.
//!
//! The host owns the clock and the event loop:
//!
//! ```
//! use std::time::{Duration, Instant};
//! use lite_merge_view::{CopyDirection, MergeConfig, MergeView, Side};
//!
//! let mut mv = MergeView::new("a\nX\nc\n", None, Some("a\nb\nc\n"), MergeConfig::default());
//! let chunk = mv.chunks(Side::Right).unwrap()[0];
//!
//! let t0 = Instant::now();
//! mv.copy_chunk(Side::Right, CopyDirection::OrigToEdit, chunk, t0).unwrap();
//! assert_eq!(mv.edit_pane().buffer().content(), "a\nb\nc\n");
//!
//! // The copy is an edit; the diff catches up once the debounce expires
//! let later = t0 + Duration::from_millis(250);
//! assert_eq!(mv.tick(later), 1);
//! assert!(mv.chunks(Side::Right).unwrap().is_empty());
//! ```

mod config;
mod debounce;
mod error;
mod freshness;
mod marks;
mod merge_ops;
mod merge_view;
mod pane;
mod scroll_sync;
mod side;

pub use config::{default_config_path, MergeConfig};
pub use debounce::{DebounceTimer, DEFAULT_DEBOUNCE_MS, DEFAULT_SLOW_DEBOUNCE_MS};
pub use error::MergeError;
pub use freshness::{Freshness, FreshnessController};
pub use marks::{change_spans, chunk_line_marks, connectors, ChangeSpan, Connector, LineMark, VisibleLines};
pub use merge_ops::{copy_chunk, CopyDirection};
pub use merge_view::{DiffView, MergeView, ViewMarks};
pub use pane::{Pane, PaneGeometry, PaneId};
pub use scroll_sync::{
    is_echo, mid_line, scroll_target, sync_target, Axis, LastSyncStamp, ScrollGeometry, ScrollMetrics,
    DEFAULT_ECHO_WINDOW_MS,
};
pub use side::{MarkRole, Side, SideStyle};
