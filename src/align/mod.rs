// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pythia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pythia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Token/annotation alignment.
//!
//! Splits text on single-space boundaries and maps each token position to at
//! most one annotation. Duplicate indices keep the first annotation seen;
//! indices that name no token are inert. The mapping is only meaningful for
//! the exact text it was built from — stale annotations against edited text
//! are tolerated, never re-aligned.

use crate::model::AmbiguousWord;

/// Splits `text` on single spaces only.
///
/// Consecutive spaces produce empty tokens, which are valid (unmatchable)
/// positions. `tokens.join(" ")` reconstructs the input exactly.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(' ').collect()
}

/// Per-position annotation lookup for one (text, annotations) pair.
///
/// Slots hold indices into the annotation slice the index was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationIndex {
    slots: Vec<Option<usize>>,
}

impl AnnotationIndex {
    pub fn build(text: &str, words: &[AmbiguousWord]) -> Self {
        let token_count = tokenize(text).len();
        let mut slots = vec![None; token_count];

        for (word_idx, word) in words.iter().enumerate() {
            let Ok(position) = usize::try_from(word.index) else {
                continue;
            };
            let Some(slot) = slots.get_mut(position) else {
                continue;
            };
            // First annotation at a position wins; later duplicates are inert.
            if slot.is_none() {
                *slot = Some(word_idx);
            }
        }

        Self { slots }
    }

    pub fn token_count(&self) -> usize {
        self.slots.len()
    }

    /// Index into the annotation slice for `position`, if any.
    pub fn annotation_at(&self, position: usize) -> Option<usize> {
        self.slots.get(position).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::{tokenize, AnnotationIndex};
    use crate::model::AmbiguousWord;

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

    #[test]
    fn tokenize_splits_on_single_spaces_only() {
        assert_eq!(tokenize("a b  c"), vec!["a", "b", "", "c"]);
        assert_eq!(tokenize(""), vec![""]);
        assert_eq!(tokenize("a\tb"), vec!["a\tb"]);
    }

    #[test]
    fn tokenize_join_reconstructs_input() {
        let text = "  leading and  double  spaces ";
        assert_eq!(tokenize(text).join(" "), text);
    }

    #[test]
    fn matches_annotation_to_its_token_position() {
        let words = vec![word("bank", 1)];
        let index = AnnotationIndex::build("The bank is closed", &words);

        assert_eq!(index.token_count(), 4);
        assert_eq!(index.annotation_at(0), None);
        assert_eq!(index.annotation_at(1), Some(0));
        assert_eq!(index.annotation_at(2), None);
        assert_eq!(index.annotation_at(3), None);
    }

    #[test]
    fn duplicate_index_keeps_first_annotation() {
        let words = vec![word("x", 2), word("y", 2)];
        let index = AnnotationIndex::build("a b c d", &words);

        assert_eq!(index.annotation_at(2), Some(0));
    }

    #[test]
    fn duplicate_resolution_is_deterministic() {
        let words = vec![word("x", 2), word("y", 2)];
        let first = AnnotationIndex::build("a b c d", &words);
        let second = AnnotationIndex::build("a b c d", &words);

        assert_eq!(first, second);
    }

    #[test]
    fn out_of_range_indices_are_inert() {
        let words = vec![word("ghost", 17), word("negative", -3)];
        let index = AnnotationIndex::build("only three tokens", &words);

        assert_eq!(index.token_count(), 3);
        for position in 0..index.token_count() {
            assert_eq!(index.annotation_at(position), None);
        }
    }

    #[test]
    fn empty_tokens_are_valid_unmatched_positions() {
        let words = vec![word("b", 2)];
        let index = AnnotationIndex::build("a  b", &words);

        // "a", "", "b" — the empty token occupies position 1.
        assert_eq!(index.token_count(), 3);
        assert_eq!(index.annotation_at(1), None);
        assert_eq!(index.annotation_at(2), Some(0));
    }

    #[test]
    fn lookup_past_token_count_is_none() {
        let index = AnnotationIndex::build("a b", &[]);
        assert_eq!(index.annotation_at(99), None);
    }
}
