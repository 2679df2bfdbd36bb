// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pythia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pythia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Highlight rendering.
//!
//! [`segments`] turns a (text, result) pair into an ordered display-segment
//! sequence; [`layout_segments`] word-wraps that sequence into lines and
//! produces cell-accurate spans the TUI uses for highlight painting and
//! mouse hit-testing. Both are pure: identical inputs yield identical
//! output, and neither input is mutated.

use smol_str::SmolStr;

use crate::align::{tokenize, AnnotationIndex};
use crate::model::{AmbiguousWord, AnalysisResult};

/// One display segment: a single token, optionally carrying the annotation
/// that flagged it.
///
/// Tokens are separated by single spaces when laid out, so the segment
/// sequence plus separators reproduces the source text. Highlighted segments
/// carry their annotation so hover wiring never has to re-derive the
/// alignment at interaction time.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    token: SmolStr,
    position: usize,
    annotation: Option<AmbiguousWord>,
}

impl Segment {
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Position of this token in the single-space tokenization.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn annotation(&self) -> Option<&AmbiguousWord> {
        self.annotation.as_ref()
    }

    pub fn is_highlighted(&self) -> bool {
        self.annotation.is_some()
    }
}

/// Builds the display-segment sequence for `text` against `result`.
///
/// With no result every token is plain; with a result the annotation index
/// decides which tokens are highlighted. The alignment runs against `text`
/// as given — if the result was produced for a different text its indices
/// may land on other tokens or on none, and both cases are rendered as-is.
pub fn segments(text: &str, result: Option<&AnalysisResult>) -> Vec<Segment> {
    let tokens = tokenize(text);

    let index = result.map(|result| AnnotationIndex::build(text, &result.ambiguous));

    tokens
        .iter()
        .enumerate()
        .map(|(position, token)| {
            let annotation = match (&index, result) {
                (Some(index), Some(result)) => index
                    .annotation_at(position)
                    .map(|word_idx| result.ambiguous[word_idx].clone()),
                _ => None,
            };
            Segment { token: SmolStr::new(token), position, annotation }
        })
        .collect()
}

/// A contiguous cell range within one laid-out line: `(y, x0, x1)`,
/// inclusive, in character cells relative to the layout's lines.
pub type LineSpan = (usize, usize, usize);

/// One token's placement after word wrap.
///
/// A token longer than the wrap width is hard-broken and occupies one span
/// per line it touches; empty tokens occupy no cells and carry no spans.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedSegment {
    position: usize,
    highlighted: bool,
    spans: Vec<LineSpan>,
}

impl PlacedSegment {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn spans(&self) -> &[LineSpan] {
        &self.spans
    }
}

/// Word-wrapped layout of a segment sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentLayout {
    lines: Vec<String>,
    placed: Vec<PlacedSegment>,
}

impl SegmentLayout {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn placed(&self) -> &[PlacedSegment] {
        &self.placed
    }

    /// Token position of the highlighted segment covering cell `(x, y)`.
    ///
    /// Plain tokens and separator cells are not hover targets and return
    /// `None`.
    pub fn hit_test(&self, x: usize, y: usize) -> Option<usize> {
        self.placed
            .iter()
            .find(|placed| {
                placed.highlighted
                    && placed
                        .spans
                        .iter()
                        .any(|&(span_y, x0, x1)| span_y == y && x >= x0 && x <= x1)
            })
            .map(|placed| placed.position)
    }

    /// Token positions of all highlighted placements, in layout order.
    pub fn highlighted_positions(&self) -> Vec<usize> {
        self.placed
            .iter()
            .filter(|placed| placed.highlighted)
            .map(|placed| placed.position)
            .collect()
    }
}

/// Greedily word-wraps `segments` to `width` character cells.
///
/// Tokens are separated by a single space; a token that does not fit on the
/// current line starts a new one, and a token wider than `width` is
/// hard-broken across lines. A zero `width` produces an empty layout.
pub fn layout_segments(segments: &[Segment], width: usize) -> SegmentLayout {
    if width == 0 {
        return SegmentLayout::default();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut x = 0usize;
    let mut placed = Vec::with_capacity(segments.len());

    for segment in segments {
        let token_len = segment.token().chars().count();

        if x > 0 {
            // A separator precedes every token that is not first on its
            // line; when the token would not fit after it, wrap instead.
            let fits_after_separator =
                x + 1 + token_len <= width || (token_len > width && x + 1 < width);
            if fits_after_separator {
                current.push(' ');
                x += 1;
            } else {
                lines.push(std::mem::take(&mut current));
                x = 0;
            }
        }

        let mut spans = Vec::new();
        let mut remaining = segment.token().chars();
        let mut left = token_len;
        while left > 0 {
            if x >= width {
                lines.push(std::mem::take(&mut current));
                x = 0;
            }
            let take = left.min(width - x);
            current.extend(remaining.by_ref().take(take));
            spans.push((lines.len(), x, x + take - 1));
            x += take;
            left -= take;
        }

        placed.push(PlacedSegment {
            position: segment.position(),
            highlighted: segment.is_highlighted(),
            spans,
        });
    }

    lines.push(current);

    SegmentLayout { lines, placed }
}

#[cfg(test)]
mod tests {
    use super::{layout_segments, segments};
    use crate::model::{AmbiguousWord, AnalysisResult};

    fn word(token: &str, index: i64) -> AmbiguousWord {
        AmbiguousWord {
            word: token.to_owned(),
            index,
            senses: Vec::new(),
            best_sense: format!("sense of {token}"),
            confidence: "High".to_owned(),
            decision_source: "wordnet".to_owned(),
            fallback_similarity: None,
        }
    }

    fn bank_result() -> AnalysisResult {
        AnalysisResult {
            text: "The bank is closed".to_owned(),
            context_keywords: vec!["bank".to_owned()],
            ambiguity_score: 0.8,
            ambiguous: vec![word("bank", 1)],
        }
    }

    #[test]
    fn highlights_flagged_token_and_leaves_rest_plain() {
        let result = bank_result();
        let segs = segments("The bank is closed", Some(&result));

        assert_eq!(segs.len(), 4);
        assert!(!segs[0].is_highlighted());
        assert!(segs[1].is_highlighted());
        assert_eq!(segs[1].token(), "bank");
        assert_eq!(segs[1].annotation().expect("annotation").word, "bank");
        assert!(!segs[2].is_highlighted());
        assert!(!segs[3].is_highlighted());
    }

    #[test]
    fn without_result_every_token_is_plain() {
        let segs = segments("The bank is closed", None);
        assert!(segs.iter().all(|segment| !segment.is_highlighted()));
    }

    #[test]
    fn rendering_is_idempotent() {
        let result = bank_result();
        let first = segments("The bank is closed", Some(&result));
        let second = segments("The bank is closed", Some(&result));
        assert_eq!(first, second);

        let layout_a = layout_segments(&first, 10);
        let layout_b = layout_segments(&second, 10);
        assert_eq!(layout_a, layout_b);
    }

    #[test]
    fn rendering_does_not_mutate_inputs() {
        let result = bank_result();
        let before = result.clone();
        let _ = segments("The bank is closed", Some(&result));
        assert_eq!(result, before);
    }

    #[test]
    fn duplicate_annotations_render_first_only() {
        let mut result = bank_result();
        result.ambiguous = vec![word("x", 2), word("y", 2)];
        let segs = segments("a b c d", Some(&result));

        assert_eq!(segs[2].annotation().expect("annotation").word, "x");
    }

    #[test]
    fn layout_wraps_at_word_boundaries() {
        let segs = segments("aa bb cc", None);
        let layout = layout_segments(&segs, 5);

        assert_eq!(layout.lines(), ["aa bb", "cc"]);
        assert_eq!(layout.placed()[2].spans(), [(1, 0, 1)]);
    }

    #[test]
    fn layout_hard_breaks_oversized_tokens() {
        let segs = segments("abcdefgh", None);
        let layout = layout_segments(&segs, 3);

        assert_eq!(layout.lines(), ["abc", "def", "gh"]);
        assert_eq!(layout.placed()[0].spans(), [(0, 0, 2), (1, 0, 2), (2, 0, 1)]);
    }

    #[test]
    fn layout_lines_rejoin_to_tokens() {
        let segs = segments("one two three four five", None);
        let layout = layout_segments(&segs, 9);

        let rejoined = layout.lines().join(" ").split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(rejoined, "one two three four five");
    }

    #[test]
    fn hit_test_finds_highlighted_cells_only() {
        let result = bank_result();
        let segs = segments("The bank is closed", Some(&result));
        let layout = layout_segments(&segs, 40);

        // "The bank is closed" on one line; "bank" occupies cells 4..=7.
        assert_eq!(layout.lines(), ["The bank is closed"]);
        assert_eq!(layout.hit_test(4, 0), Some(1));
        assert_eq!(layout.hit_test(7, 0), Some(1));
        // The plain token and the separator cells are not targets.
        assert_eq!(layout.hit_test(0, 0), None);
        assert_eq!(layout.hit_test(3, 0), None);
        assert_eq!(layout.hit_test(8, 0), None);
        assert_eq!(layout.hit_test(4, 5), None);
    }

    #[test]
    fn highlighted_positions_follow_layout_order() {
        let mut result = bank_result();
        result.ambiguous = vec![word("closed", 3), word("bank", 1)];
        let segs = segments("The bank is closed", Some(&result));
        let layout = layout_segments(&segs, 40);

        assert_eq!(layout.highlighted_positions(), vec![1, 3]);
    }

    #[test]
    fn zero_width_layout_is_empty() {
        let segs = segments("anything at all", None);
        let layout = layout_segments(&segs, 0);

        assert_eq!(layout.line_count(), 0);
        assert!(layout.placed().is_empty());
    }

    #[test]
    fn empty_tokens_occupy_no_cells() {
        let segs = segments("a  b", None);
        let layout = layout_segments(&segs, 10);

        assert_eq!(layout.lines(), ["a  b"]);
        assert!(layout.placed()[1].spans().is_empty());
    }
}
