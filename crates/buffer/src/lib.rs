// Chunk: docs/chunks/text_buffer - Line-indexed text buffer behind each merge pane

//! lite-merge-buffer: the text buffer that backs every pane of a merge view.
//!
//! The diff machinery only ever needs a handful of things from a buffer: its
//! full text, its line count, the text of a line or a run of lines, and a way
//! to replace a range of text. [`TextBuffer`] provides exactly that on top of a
//! gap buffer and an incrementally maintained line index.
//!
//! # Example
//!
//! ```
//! use lite_merge_buffer::{DirtyLines, Position, TextBuffer};
//!
//! let mut buffer = TextBuffer::from_str("alpha\nbeta\ngamma\n");
//! assert_eq!(buffer.line_count(), 4);
//! assert_eq!(buffer.line_content(1), "beta");
//!
//! // Replace a whole line range, the way a merge copy does
//! let dirty = buffer.replace_lines(1, 2, "BETA\n");
//! assert_eq!(dirty, DirtyLines::Range { from: 1, to: 3 });
//! assert_eq!(buffer.content(), "alpha\nBETA\ngamma\n");
//!
//! // Character-level edits go through positions
//! buffer.insert_str_at(Position::new(0, 5), "!");
//! assert_eq!(buffer.line_content(0), "alpha!");
//! ```
//!
//! # Dirty Line Tracking
//!
//! Every mutation returns a [`DirtyLines`] value describing which lines were
//! affected, so a view can repaint only what changed:
//!
//! - `DirtyLines::None` - Nothing changed
//! - `DirtyLines::Single(line)` - Only one line changed
//! - `DirtyLines::Range { from, to }` - Lines changed in place, line count unchanged
//! - `DirtyLines::FromLineToEnd(line)` - Line structure changed from `line` on

mod gap_buffer;
mod line_index;
mod text_buffer;
mod types;

pub use text_buffer::TextBuffer;
pub use types::{DirtyLines, Position};
