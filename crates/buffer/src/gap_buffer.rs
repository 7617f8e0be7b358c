// Chunk: docs/chunks/text_buffer - Line-indexed text buffer behind each merge pane

//! Gap buffer storage.
//!
//! Characters live in a single vector with a movable hole ("gap") in it.
//! Replacing a range moves the gap to the range, swallows the removed
//! characters into the gap and writes the replacement into it. Edits that land
//! near the previous edit are cheap, which is the common case for both typing
//! and chunk copies.

const MIN_GAP: usize = 64;

/// A `char` gap buffer with range-splice semantics.
#[derive(Debug, Clone)]
pub struct GapBuffer {
    /// Storage laid out as [before gap | gap | after gap].
    data: Vec<char>,
    /// First slot of the gap.
    gap_start: usize,
    /// First slot after the gap.
    gap_end: usize,
}

impl GapBuffer {
    pub fn new() -> Self {
        Self::from_str("")
    }

    /// Creates a gap buffer holding `text`, with the gap at the end.
    pub fn from_str(text: &str) -> Self {
        let mut data: Vec<char> = text.chars().collect();
        let len = data.len();
        data.resize(len + MIN_GAP, '\0');
        Self {
            gap_start: len,
            gap_end: data.len(),
            data,
        }
    }

    /// Logical length in chars.
    pub fn len(&self) -> usize {
        self.data.len() - (self.gap_end - self.gap_start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the logical range `[start, end)` with `text`.
    ///
    /// Out-of-range bounds are clamped to the buffer. Returns the number of
    /// chars removed.
    pub fn splice(&mut self, start: usize, end: usize, text: &str) -> usize {
        let len = self.len();
        let start = start.min(len);
        let end = end.clamp(start, len);

        self.move_gap_to(start);
        // Removed chars sit right after the gap; widening the gap drops them.
        let removed = end - start;
        self.gap_end += removed;

        let inserted: Vec<char> = text.chars().collect();
        self.reserve_gap(inserted.len());
        self.data[self.gap_start..self.gap_start + inserted.len()].copy_from_slice(&inserted);
        self.gap_start += inserted.len();

        removed
    }

    /// Returns the chars in the logical range `[start, end)` as a String.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let len = self.len();
        let start = start.min(len);
        let end = end.clamp(start, len);
        self.chars().skip(start).take(end - start).collect()
    }

    /// Iterates over the logical content.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.data[..self.gap_start]
            .iter()
            .chain(&self.data[self.gap_end..])
            .copied()
    }

    fn move_gap_to(&mut self, pos: usize) {
        if pos < self.gap_start {
            let shift = self.gap_start - pos;
            self.data
                .copy_within(pos..self.gap_start, self.gap_end - shift);
            self.gap_start -= shift;
            self.gap_end -= shift;
        } else if pos > self.gap_start {
            let shift = pos - self.gap_start;
            self.data
                .copy_within(self.gap_end..self.gap_end + shift, self.gap_start);
            self.gap_start += shift;
            self.gap_end += shift;
        }
    }

    /// Grows the gap in place until it can hold `needed` chars.
    fn reserve_gap(&mut self, needed: usize) {
        let gap = self.gap_end - self.gap_start;
        if gap >= needed {
            return;
        }
        let grow = (needed - gap).max(self.data.len()).max(MIN_GAP);
        let old_len = self.data.len();
        let tail = old_len - self.gap_end;
        self.data.resize(old_len + grow, '\0');
        self.data
            .copy_within(self.gap_end..old_len, old_len + grow - tail);
        self.gap_end += grow;
    }
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GapBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use std::fmt::Write;
        self.chars().try_for_each(|ch| f.write_char(ch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_round_trips() {
        let buf = GapBuffer::from_str("héllo\nwörld");
        assert_eq!(buf.len(), 11);
        assert_eq!(buf.to_string(), "héllo\nwörld");
    }

    #[test]
    fn test_empty() {
        let buf = GapBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.to_string(), "");
    }

    #[test]
    fn test_splice_insert_at_front_middle_end() {
        let mut buf = GapBuffer::from_str("bd");
        buf.splice(0, 0, "a");
        buf.splice(2, 2, "c");
        buf.splice(4, 4, "e");
        assert_eq!(buf.to_string(), "abcde");
    }

    #[test]
    fn test_splice_replace_returns_removed_count() {
        let mut buf = GapBuffer::from_str("one two three");
        let removed = buf.splice(4, 7, "2");
        assert_eq!(removed, 3);
        assert_eq!(buf.to_string(), "one 2 three");
    }

    #[test]
    fn test_splice_clamps_out_of_range() {
        let mut buf = GapBuffer::from_str("abc");
        let removed = buf.splice(2, 99, "Z");
        assert_eq!(removed, 1);
        assert_eq!(buf.to_string(), "abZ");

        buf.splice(50, 60, "!");
        assert_eq!(buf.to_string(), "abZ!");
    }

    #[test]
    fn test_splice_grows_past_initial_gap() {
        let mut buf = GapBuffer::from_str("xy");
        let long = "0123456789".repeat(30);
        buf.splice(1, 1, &long);
        assert_eq!(buf.len(), 302);
        assert_eq!(buf.slice(0, 3), "x01");
        assert_eq!(buf.slice(300, 302), "9y");
    }

    #[test]
    fn test_alternating_edits_keep_content_consistent() {
        let mut buf = GapBuffer::from_str("aaaa\nbbbb\ncccc\n");
        buf.splice(10, 14, "CC");
        buf.splice(0, 4, "A");
        buf.splice(2, 7, "");
        assert_eq!(buf.to_string(), "A\nCC\n");
    }

    #[test]
    fn test_slice() {
        let buf = GapBuffer::from_str("hello world");
        assert_eq!(buf.slice(6, 11), "world");
        assert_eq!(buf.slice(8, 3), "");
    }
}
