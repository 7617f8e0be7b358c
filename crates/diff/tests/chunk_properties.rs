// Chunk: docs/chunks/diff_chunks - Diff computation, line chunking and position mapping

//! Property checks for diffing and chunking over a corpus of text pairs.
//!
//! The corpus mixes the shapes that stress line-boundary handling: edits at
//! the start and end, missing trailing newlines, blank-line churn, mid-line
//! edits and wholesale rewrites.

use lite_merge_diff::{
    cleanup, compute_diff, compute_diff_with, Chunk, DiffOptions, Granularity, SegmentKind,
};

const CORPUS: &[(&str, &str)] = &[
    ("", ""),
    ("", "abc"),
    ("abc", ""),
    ("a", "a"),
    ("a\nb\nc\n", "a\nX\nc\n"),
    ("a\nb\n", "a\nb\nc\n"),
    ("a\nb\n", "x\na\nb\n"),
    ("a\nb", "a\nb\n"),
    ("a\nb\n", "a\nb"),
    ("a", "a\n"),
    ("x\n", "x"),
    ("a", "a\nb"),
    ("a\nb", "a\n"),
    ("\n\n\n", "\n"),
    ("\n", "\n\n\n"),
    ("one two three\n", "one 2 three\n"),
    ("x\ny\nz\n", "z\ny\nx\n"),
    ("keep\nremove me\nkeep\n", "keep\nkeep\n"),
    ("alpha\nbeta\ngamma\ndelta\n", "alpha\nBETA\ngamma\ndelta\nepsilon\n"),
    (
        "fn main() {\n    let a = 1;\n    let b = 2;\n    println!(\"{}\", a + b);\n}\n",
        "fn main() {\n    let a = 10;\n    let b = 2;\n\n    println!(\"{}\", a * b);\n}\n",
    ),
    ("same line\nsame line\nsame line\n", "same line\nsame\nsame line\n"),
    ("héllo wörld\n日本\n", "hello world\n日本語\n"),
    ("completely\ndifferent\n", "nothing\nin\ncommon\n"),
];

/// Lines of `text` without terminators. A trailing newline does not start a
/// new line here, so chunk ranges can be checked against real content.
fn content_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n')
        .map(|line| line.strip_suffix('\n').unwrap_or(line))
        .collect()
}

fn clamped<'a>(lines: &'a [&'a str], from: usize, to: usize) -> &'a [&'a str] {
    let to = to.min(lines.len());
    &lines[from.min(to)..to]
}

fn all_options() -> Vec<DiffOptions> {
    [Granularity::Chars, Granularity::Words, Granularity::Lines]
        .into_iter()
        .map(|granularity| DiffOptions {
            granularity,
            ..DiffOptions::default()
        })
        .collect()
}

#[test]
fn test_round_trip_reconstructs_both_texts() {
    for options in all_options() {
        for &(orig, edit) in CORPUS {
            let diff = compute_diff_with(orig, edit, &options);
            assert_eq!(diff.orig_text(), orig, "{options:?} {orig:?} -> {edit:?}");
            assert_eq!(diff.edit_text(), edit, "{options:?} {orig:?} -> {edit:?}");
        }
    }
}

#[test]
fn test_segments_are_normalised() {
    for &(orig, edit) in CORPUS {
        let diff = compute_diff(orig, edit);
        let segments = diff.segments();
        assert!(segments.iter().all(|s| !s.text.is_empty()));
        assert!(segments.windows(2).all(|w| w[0].kind != w[1].kind));
        assert_eq!(cleanup(segments.to_vec()), segments);
    }
}

#[test]
fn test_identity_has_no_chunks() {
    for &(text, _) in CORPUS {
        let diff = compute_diff(text, text);
        assert!(diff.len() <= 1);
        assert!(diff.segments().iter().all(|s| s.kind == SegmentKind::Equal));
        assert_eq!(diff.chunks().count(), 0, "{text:?}");
    }
}

#[test]
fn test_chunks_are_valid_and_strictly_ordered() {
    for options in all_options() {
        for &(orig, edit) in CORPUS {
            let chunks: Vec<Chunk> = compute_diff_with(orig, edit, &options).chunks().collect();
            for chunk in &chunks {
                assert!(chunk.orig_to >= chunk.orig_from);
                assert!(chunk.edit_to >= chunk.edit_from);
                assert!(!chunk.is_empty(), "{chunk:?} in {orig:?} -> {edit:?}");
            }
            for pair in chunks.windows(2) {
                assert!(pair[0].orig_to < pair[1].orig_from, "{pair:?}");
                assert!(pair[0].edit_to < pair[1].edit_from, "{pair:?}");
            }
            if orig != edit {
                assert!(!chunks.is_empty(), "{options:?} {orig:?} -> {edit:?}");
            }
        }
    }
}

#[test]
fn test_lines_outside_chunks_match() {
    // Every stretch between chunks is clean equal context. A chunk edge may
    // sit one past the last content line, so only lines present on both
    // sides are compared.
    for options in all_options() {
        for &(orig, edit) in CORPUS {
            let chunks: Vec<Chunk> = compute_diff_with(orig, edit, &options).chunks().collect();
            let orig_lines = content_lines(orig);
            let edit_lines = content_lines(edit);

            let mut orig_at = 0;
            let mut edit_at = 0;
            let gaps = chunks
                .iter()
                .map(|c| (c.orig_from, c.edit_from, c.orig_to, c.edit_to))
                .chain(std::iter::once((orig_lines.len(), edit_lines.len(), 0, 0)));
            for (orig_end, edit_end, next_orig, next_edit) in gaps {
                let orig_gap = clamped(&orig_lines, orig_at, orig_end);
                let edit_gap = clamped(&edit_lines, edit_at, edit_end);
                for (o, e) in orig_gap.iter().zip(edit_gap) {
                    assert_eq!(o, e, "{options:?} {orig:?} -> {edit:?} {chunks:?}");
                }
                orig_at = next_orig;
                edit_at = next_edit;
            }
        }
    }
}

#[test]
fn test_scenario_single_line_changed() {
    let chunks: Vec<Chunk> = compute_diff("a\nb\nc\n", "a\nX\nc\n").chunks().collect();
    assert_eq!(chunks, vec![Chunk::new(1, 2, 1, 2)]);
}

#[test]
fn test_scenario_pure_append() {
    let chunks: Vec<Chunk> = compute_diff("a\nb\n", "a\nb\nc\n").chunks().collect();
    assert_eq!(chunks.len(), 1);
    let chunk = chunks[0];
    assert_eq!(chunk.orig_from, 2);
    assert_eq!(chunk.orig_to, 2);
    assert_eq!((chunk.edit_from, chunk.edit_to), (2, 3));
}

#[test]
fn test_scenario_pure_prepend() {
    let chunks: Vec<Chunk> = compute_diff("a\nb\n", "x\na\nb\n").chunks().collect();
    assert_eq!(chunks.len(), 1);
    let chunk = chunks[0];
    assert_eq!((chunk.edit_from, chunk.edit_to), (0, 1));
    assert_eq!(chunk.orig_from, chunk.orig_to);
    assert_eq!(chunk.orig_from, 0);
}

#[test]
fn test_trailing_newline_difference_is_chunked() {
    for (orig, edit) in [("a\nb", "a\nb\n"), ("a\nb\n", "a\nb")] {
        let chunks: Vec<Chunk> = compute_diff(orig, edit).chunks().collect();
        assert_eq!(chunks, vec![Chunk::new(1, 2, 1, 2)], "{orig:?} -> {edit:?}");
    }
    let chunks: Vec<Chunk> = compute_diff("a", "a\n").chunks().collect();
    assert_eq!(chunks, vec![Chunk::new(0, 1, 0, 1)]);
}

#[test]
fn test_chunk_serializes_as_flat_json() {
    let json = serde_json::to_value(Chunk::new(1, 2, 3, 4)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"orig_from": 1, "orig_to": 2, "edit_from": 3, "edit_to": 4})
    );
}
