// Chunk: docs/chunks/text_buffer - Line-indexed text buffer behind each merge pane

//! Line index for tracking line boundaries in the text buffer.
//!
//! Keeps the char offset of every line start so line count, line lookup and
//! line-to-offset conversion never rescan the text. Range replacements patch
//! the index in place.

/// Sorted char offsets of each line start. `line_starts[0]` is always 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates an index for an empty buffer (one empty line).
    pub fn new() -> Self {
        Self {
            line_starts: vec![0],
        }
    }

    /// Rebuilds the index from scratch.
    pub fn rebuild<I>(&mut self, content: I)
    where
        I: IntoIterator<Item = char>,
    {
        self.line_starts.clear();
        self.line_starts.push(0);
        self.line_starts.extend(
            content
                .into_iter()
                .enumerate()
                .filter(|&(_, ch)| ch == '\n')
                .map(|(i, _)| i + 1),
        );
    }

    /// Number of lines. Text ending in `\n` has a trailing empty line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Offset of the first char of `line`, or None past the last line.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Offset just past the last char of `line` (the newline, if any, is excluded).
    pub fn line_end(&self, line: usize, total_len: usize) -> Option<usize> {
        if line >= self.line_count() {
            return None;
        }
        Some(match self.line_starts.get(line + 1) {
            Some(next) => next - 1,
            None => total_len,
        })
    }

    /// Length of `line` in chars, excluding the newline.
    pub fn line_len(&self, line: usize, total_len: usize) -> Option<usize> {
        Some(self.line_end(line, total_len)? - self.line_start(line)?)
    }

    /// Line containing the char at `offset`.
    pub fn line_at_offset(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        }
    }

    /// Patches the index after `removed` chars at `start` were replaced by
    /// `inserted`.
    ///
    /// Line starts inside the removed span disappear, starts after it shift by
    /// the length delta, and every newline in `inserted` adds a start.
    pub fn splice(&mut self, start: usize, removed: usize, inserted: &str) {
        let end = start + removed;
        // A start `s` belongs to the newline at `s - 1`; that newline was
        // removed exactly when `start < s <= end`.
        let lo = self.line_starts.partition_point(|&s| s <= start);
        let hi = self.line_starts.partition_point(|&s| s <= end);

        let mut inserted_len = 0;
        let mut new_starts = Vec::new();
        for (i, ch) in inserted.chars().enumerate() {
            inserted_len = i + 1;
            if ch == '\n' {
                new_starts.push(start + i + 1);
            }
        }

        for s in &mut self.line_starts[hi..] {
            *s = *s - removed + inserted_len;
        }
        self.line_starts.splice(lo..hi, new_starts);
    }

    /// Raw line starts, for consistency checks.
    #[cfg(any(debug_assertions, test))]
    pub fn line_starts(&self) -> &[usize] {
        &self.line_starts
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}
