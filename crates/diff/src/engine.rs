// Chunk: docs/chunks/diff_chunks - Diff computation, line chunking and position mapping

//! Diff computation and cleanup.
//!
//! Token-level differencing is delegated to `similar`. Its output then goes
//! through [`cleanup_semantic`] (unless disabled), which folds short equal
//! runs stranded between edits into those edits, and finally [`cleanup`]:
//! empty segments are dropped and neighbours of the same kind are
//! concatenated. The chunker relies on that shape, since it inspects the
//! segments on either side of an equal run to decide whether the run starts
//! and ends on a line boundary.

use std::time::{Duration, Instant};

use log::debug;
use serde::{Deserialize, Serialize};
use similar::{Algorithm, ChangeTag, TextDiff};

use crate::boundaries::{chunk_boundaries_around, Boundaries};
use crate::chunks::Chunks;
use crate::types::{DiffSegment, SegmentKind, Space};

/// Default deadline handed to the diff primitive.
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Token size the primitive diffs at.
///
/// Word and line granularity trade minimality for more readable chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Chars,
    Words,
    Lines,
}

/// Diff algorithm used by the primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithm {
    #[default]
    Myers,
    Patience,
}

impl From<DiffAlgorithm> for Algorithm {
    fn from(alg: DiffAlgorithm) -> Self {
        match alg {
            DiffAlgorithm::Myers => Algorithm::Myers,
            DiffAlgorithm::Patience => Algorithm::Patience,
        }
    }
}

/// Options for [`compute_diff_with`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    pub granularity: Granularity,
    pub algorithm: DiffAlgorithm,
    /// Deadline for the primitive. Past it the result is still lossless, just
    /// less minimal. `None` disables the deadline.
    pub timeout_ms: Option<u64>,
    /// Run [`cleanup_semantic`] on the primitive's output.
    pub semantic_cleanup: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            granularity: Granularity::default(),
            algorithm: DiffAlgorithm::default(),
            timeout_ms: Some(DEFAULT_TIMEOUT_MS),
            semantic_cleanup: true,
        }
    }
}

/// A normalised diff between an original and an edit text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diff {
    segments: Vec<DiffSegment>,
}

impl Diff {
    /// Builds a diff from raw segments, running [`cleanup`] on them.
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = DiffSegment>,
    {
        Self {
            segments: cleanup(segments),
        }
    }

    pub fn segments(&self) -> &[DiffSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True if the two texts are identical.
    pub fn is_identity(&self) -> bool {
        self.segments
            .iter()
            .all(|s| s.kind == SegmentKind::Equal)
    }

    /// Reconstructs the original text (equal + deleted segments).
    pub fn orig_text(&self) -> String {
        self.segments
            .iter()
            .filter(|s| s.in_orig())
            .map(|s| s.text.as_str())
            .collect()
    }

    /// Reconstructs the edit text (equal + inserted segments).
    pub fn edit_text(&self) -> String {
        self.segments
            .iter()
            .filter(|s| s.in_edit())
            .map(|s| s.text.as_str())
            .collect()
    }

    /// Lines in the text of `space`; a trailing newline opens one more.
    pub fn line_count(&self, space: Space) -> usize {
        let newlines: usize = self
            .segments
            .iter()
            .filter(|s| match space {
                Space::Orig => s.in_orig(),
                Space::Edit => s.in_edit(),
            })
            .map(|s| s.text.matches('\n').count())
            .sum();
        newlines + 1
    }

    /// Iterates over the line-aligned chunks of this diff.
    pub fn chunks(&self) -> Chunks<'_> {
        Chunks::new(&self.segments)
    }

    /// Chunk edges bracketing `line` in `space`.
    pub fn boundaries_around(&self, line: usize, space: Space) -> Boundaries {
        chunk_boundaries_around(self, line, space)
    }
}

/// Diffs `orig` against `edit` with default options.
pub fn compute_diff(orig: &str, edit: &str) -> Diff {
    compute_diff_with(orig, edit, &DiffOptions::default())
}

/// Diffs `orig` against `edit`.
///
/// Deterministic for a given input and options, and lossless: see
/// [`Diff::orig_text`] and [`Diff::edit_text`].
pub fn compute_diff_with(orig: &str, edit: &str, options: &DiffOptions) -> Diff {
    let started = Instant::now();

    let mut config = TextDiff::configure();
    config.algorithm(options.algorithm.into());
    if let Some(ms) = options.timeout_ms {
        config.timeout(Duration::from_millis(ms));
    }
    let text_diff = match options.granularity {
        Granularity::Chars => config.diff_chars(orig, edit),
        Granularity::Words => config.diff_words(orig, edit),
        Granularity::Lines => config.diff_lines(orig, edit),
    };

    let raw = text_diff.iter_all_changes().map(|change| {
        let kind = match change.tag() {
            ChangeTag::Equal => SegmentKind::Equal,
            ChangeTag::Insert => SegmentKind::Insert,
            ChangeTag::Delete => SegmentKind::Delete,
        };
        DiffSegment::new(kind, change.value())
    });
    let diff = if options.semantic_cleanup {
        Diff::from_segments(cleanup_semantic(raw))
    } else {
        Diff::from_segments(raw)
    };

    debug!(
        "diff of {}/{} chars: {} segments in {:?}",
        orig.len(),
        edit.len(),
        diff.len(),
        started.elapsed()
    );
    diff
}

/// Normalises a segment list: drops empty segments and concatenates
/// neighbours of the same kind.
///
/// Empty segments are removed before merging, so a single pass reaches the
/// fixed point and running it again is a no-op.
pub fn cleanup<I>(segments: I) -> Vec<DiffSegment>
where
    I: IntoIterator<Item = DiffSegment>,
{
    let mut out: Vec<DiffSegment> = Vec::new();
    for segment in segments {
        if segment.text.is_empty() {
            continue;
        }
        match out.last_mut() {
            Some(last) if last.kind == segment.kind => last.text.push_str(&segment.text),
            _ => out.push(segment),
        }
    }
    out
}

/// Folds equal runs that are no longer than the edits around them.
///
/// An equal run whose length (in chars) is at most the larger side of the
/// edit run before it, and at most the larger side of the edit run after it,
/// is rewritten as a deletion plus an insertion of the same text. Every edit
/// run is then regrouped as one deletion followed by one insertion. Grouping
/// lengthens the edits around the remaining equal runs, so the two steps
/// repeat until nothing folds. A character diff of two unrelated words thus
/// becomes one replacement instead of a spray of single shared letters.
///
/// The result is lossless and already normalised.
pub fn cleanup_semantic<I>(segments: I) -> Vec<DiffSegment>
where
    I: IntoIterator<Item = DiffSegment>,
{
    let mut segments = group_edits(cleanup(segments));
    while let Some(folded) = fold_short_equalities(&segments) {
        segments = group_edits(folded);
    }
    segments
}

/// Larger side (deleted or inserted chars) of an edit run.
fn edit_weight(run: &[DiffSegment]) -> usize {
    let (mut deleted, mut inserted) = (0, 0);
    for segment in run {
        match segment.kind {
            SegmentKind::Delete => deleted += segment.text.chars().count(),
            SegmentKind::Insert => inserted += segment.text.chars().count(),
            SegmentKind::Equal => {}
        }
    }
    deleted.max(inserted)
}

/// One folding pass over a normalised list; `None` if nothing qualified.
fn fold_short_equalities(segments: &[DiffSegment]) -> Option<Vec<DiffSegment>> {
    let equal_at: Vec<usize> = segments
        .iter()
        .enumerate()
        .filter(|(_, s)| s.kind == SegmentKind::Equal)
        .map(|(i, _)| i)
        .collect();

    let mut fold = vec![false; segments.len()];
    for (n, &i) in equal_at.iter().enumerate() {
        let run_start = if n == 0 { 0 } else { equal_at[n - 1] + 1 };
        let run_end = equal_at.get(n + 1).copied().unwrap_or(segments.len());
        let len = segments[i].text.chars().count();
        fold[i] = len <= edit_weight(&segments[run_start..i])
            && len <= edit_weight(&segments[i + 1..run_end]);
    }
    if !fold.contains(&true) {
        return None;
    }

    let mut out = Vec::with_capacity(segments.len() + equal_at.len());
    for (segment, fold) in segments.iter().zip(fold) {
        if fold {
            out.push(DiffSegment::delete(segment.text.clone()));
            out.push(DiffSegment::insert(segment.text.clone()));
        } else {
            out.push(segment.clone());
        }
    }
    Some(out)
}

/// Regroups each run of edits as its deletions followed by its insertions.
fn group_edits(segments: Vec<DiffSegment>) -> Vec<DiffSegment> {
    let mut out = Vec::with_capacity(segments.len());
    let mut deleted = String::new();
    let mut inserted = String::new();
    for segment in segments {
        match segment.kind {
            SegmentKind::Delete => deleted.push_str(&segment.text),
            SegmentKind::Insert => inserted.push_str(&segment.text),
            SegmentKind::Equal => {
                flush_edits(&mut out, &mut deleted, &mut inserted);
                out.push(segment);
            }
        }
    }
    flush_edits(&mut out, &mut deleted, &mut inserted);
    cleanup(out)
}

fn flush_edits(out: &mut Vec<DiffSegment>, deleted: &mut String, inserted: &mut String) {
    out.push(DiffSegment::delete(std::mem::take(deleted)));
    out.push(DiffSegment::insert(std::mem::take(inserted)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_drops_empty_and_merges_neighbours() {
        let raw = vec![
            DiffSegment::equal("a"),
            DiffSegment::equal(""),
            DiffSegment::equal("b\n"),
            DiffSegment::delete(""),
            DiffSegment::insert("x"),
            DiffSegment::delete("y"),
            DiffSegment::insert(""),
            DiffSegment::delete("z"),
        ];
        assert_eq!(
            cleanup(raw),
            vec![
                DiffSegment::equal("ab\n"),
                DiffSegment::insert("x"),
                DiffSegment::delete("yz"),
            ]
        );
    }

    #[test]
    fn test_cleanup_merges_across_removed_empty_segment() {
        // The empty insert between two equals must not keep them apart
        let raw = vec![
            DiffSegment::equal("a"),
            DiffSegment::insert(""),
            DiffSegment::equal("b"),
        ];
        assert_eq!(cleanup(raw), vec![DiffSegment::equal("ab")]);
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let raw = vec![
            DiffSegment::delete("p"),
            DiffSegment::delete("q"),
            DiffSegment::equal(""),
            DiffSegment::insert("r"),
            DiffSegment::equal("s"),
        ];
        let once = cleanup(raw);
        let twice = cleanup(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_identical_inputs_give_single_equal_segment() {
        let diff = compute_diff("same\ntext\n", "same\ntext\n");
        assert_eq!(diff.segments(), &[DiffSegment::equal("same\ntext\n")]);
        assert!(diff.is_identity());
    }

    #[test]
    fn test_line_count_per_space() {
        let diff = compute_diff("a\nb", "a\nb\nc\n");
        assert_eq!(diff.line_count(Space::Orig), 2);
        assert_eq!(diff.line_count(Space::Edit), 4);
        assert_eq!(compute_diff("", "").line_count(Space::Edit), 1);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(compute_diff("", "").is_empty());
        assert_eq!(compute_diff("", "abc").segments(), &[DiffSegment::insert("abc")]);
        assert_eq!(compute_diff("abc", "").segments(), &[DiffSegment::delete("abc")]);
    }

    #[test]
    fn test_single_line_replacement_segments() {
        let diff = compute_diff("a\nb\nc\n", "a\nX\nc\n");
        assert_eq!(
            diff.segments(),
            &[
                DiffSegment::equal("a\n"),
                DiffSegment::delete("b"),
                DiffSegment::insert("X"),
                DiffSegment::equal("\nc\n"),
            ]
        );
    }

    #[test]
    fn test_every_granularity_is_lossless() {
        let orig = "fn main() {\n    println!(\"hi\");\n}\n";
        let edit = "fn main() {\n    let x = 1;\n    println!(\"{x}\");\n}\n";
        for granularity in [Granularity::Chars, Granularity::Words, Granularity::Lines] {
            for algorithm in [DiffAlgorithm::Myers, DiffAlgorithm::Patience] {
                let options = DiffOptions {
                    granularity,
                    algorithm,
                    timeout_ms: None,
                    semantic_cleanup: true,
                };
                let diff = compute_diff_with(orig, edit, &options);
                assert_eq!(diff.orig_text(), orig, "{options:?}");
                assert_eq!(diff.edit_text(), edit, "{options:?}");
            }
        }
    }

    #[test]
    fn test_line_granularity_keeps_whole_lines() {
        let options = DiffOptions {
            granularity: Granularity::Lines,
            ..DiffOptions::default()
        };
        let diff = compute_diff_with("a\nb\nc\n", "a\nbb\nc\n", &options);
        assert_eq!(
            diff.segments(),
            &[
                DiffSegment::equal("a\n"),
                DiffSegment::delete("b\n"),
                DiffSegment::insert("bb\n"),
                DiffSegment::equal("c\n"),
            ]
        );
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: DiffOptions = serde_json::from_str(r#"{"granularity":"words"}"#).unwrap();
        assert_eq!(options.granularity, Granularity::Words);
        assert_eq!(options.algorithm, DiffAlgorithm::Myers);
        assert_eq!(options.timeout_ms, Some(DEFAULT_TIMEOUT_MS));
        assert!(options.semantic_cleanup);
    }

    #[test]
    fn test_semantic_cleanup_folds_short_shared_run() {
        let raw = vec![
            DiffSegment::equal("the "),
            DiffSegment::delete("cat"),
            DiffSegment::insert("dog"),
            DiffSegment::equal(" "),
            DiffSegment::delete("sat"),
            DiffSegment::insert("ran"),
            DiffSegment::equal("\n"),
        ];
        assert_eq!(
            cleanup_semantic(raw),
            vec![
                DiffSegment::equal("the "),
                DiffSegment::delete("cat sat"),
                DiffSegment::insert("dog ran"),
                DiffSegment::equal("\n"),
            ]
        );
    }

    #[test]
    fn test_semantic_cleanup_keeps_long_shared_run() {
        let raw = vec![
            DiffSegment::insert("b"),
            DiffSegment::delete("a"),
            DiffSegment::equal(" shared words "),
            DiffSegment::delete("c"),
            DiffSegment::insert("d"),
        ];
        // Only the edit order changes
        assert_eq!(
            cleanup_semantic(raw),
            vec![
                DiffSegment::delete("a"),
                DiffSegment::insert("b"),
                DiffSegment::equal(" shared words "),
                DiffSegment::delete("c"),
                DiffSegment::insert("d"),
            ]
        );
    }

    #[test]
    fn test_semantic_cleanup_never_folds_outer_runs() {
        let raw = vec![DiffSegment::equal("x"), DiffSegment::insert("long insertion")];
        assert_eq!(cleanup_semantic(raw.clone()), raw);
    }

    #[test]
    fn test_unrelated_words_become_one_replacement() {
        let orig = "the quick brown fox jumps\n";
        let edit = "a slow red dog sleeps\n";
        let diff = compute_diff(orig, edit);
        assert_eq!(diff.orig_text(), orig);
        assert_eq!(diff.edit_text(), edit);

        // No shared run between two edits is shorter than both of them
        let segments = diff.segments();
        for i in 1..segments.len().saturating_sub(1) {
            if segments[i].kind != SegmentKind::Equal {
                continue;
            }
            let len = segments[i].text.chars().count();
            let before = segments[..i]
                .iter()
                .rev()
                .take_while(|s| s.kind != SegmentKind::Equal);
            let after = segments[i + 1..]
                .iter()
                .take_while(|s| s.kind != SegmentKind::Equal);
            let weight = |run: Vec<&DiffSegment>| {
                let count = |kind| {
                    run.iter()
                        .filter(|s| s.kind == kind)
                        .map(|s| s.text.chars().count())
                        .sum::<usize>()
                };
                count(SegmentKind::Delete).max(count(SegmentKind::Insert))
            };
            let (before, after) = (weight(before.collect()), weight(after.collect()));
            assert!(len > before || len > after, "{segments:?}");
        }
    }

    #[test]
    fn test_semantic_cleanup_can_be_disabled() {
        let options = DiffOptions {
            semantic_cleanup: false,
            ..DiffOptions::default()
        };
        let raw = compute_diff_with("abcd\n", "xbyd\n", &options);
        let folded = compute_diff("abcd\n", "xbyd\n");
        assert!(raw.len() > folded.len(), "{raw:?} vs {folded:?}");
        assert_eq!(folded.orig_text(), "abcd\n");
        assert_eq!(folded.edit_text(), "xbyd\n");
    }
}
