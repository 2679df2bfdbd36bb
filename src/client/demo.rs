// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pythia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pythia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Offline stand-in for the remote service.
//!
//! Flags tokens from a small built-in table of genuinely ambiguous English
//! words, with a short artificial latency so loading states are visible.
//! Deterministic for a given input.

use std::time::Duration;

use crate::align::tokenize;
use crate::model::{AmbiguousWord, AnalysisResult, HistoryEntry};

use super::ServiceError;

const DEMO_LATENCY: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, Default)]
pub struct DemoService;

struct DemoSense {
    word: &'static str,
    best_sense: &'static str,
    senses: &'static [&'static str],
}

const DEMO_SENSES: &[DemoSense] = &[
    DemoSense {
        word: "bank",
        best_sense: "a financial institution that accepts deposits",
        senses: &[
            "a financial institution that accepts deposits",
            "sloping land beside a body of water",
            "a supply or stock held in reserve",
        ],
    },
    DemoSense {
        word: "bat",
        best_sense: "a club used for hitting a ball",
        senses: &[
            "a club used for hitting a ball",
            "a nocturnal flying mammal",
        ],
    },
    DemoSense {
        word: "spring",
        best_sense: "the season of growth",
        senses: &[
            "the season of growth",
            "a metallic elastic device",
            "a natural flow of ground water",
        ],
    },
    DemoSense {
        word: "light",
        best_sense: "electromagnetic radiation that can produce a visual sensation",
        senses: &[
            "electromagnetic radiation that can produce a visual sensation",
            "of comparatively little physical weight",
        ],
    },
    DemoSense {
        word: "bark",
        best_sense: "the sound made by a dog",
        senses: &[
            "the sound made by a dog",
            "tough protective covering of woody plants",
        ],
    },
    DemoSense {
        word: "match",
        best_sense: "a formal contest",
        senses: &[
            "a formal contest",
            "a thin piece of wood tipped with combustible chemical",
            "something that resembles or harmonizes with another",
        ],
    },
    DemoSense {
        word: "rose",
        best_sense: "a flower of the genus Rosa",
        senses: &[
            "a flower of the genus Rosa",
            "moved upward (past tense of rise)",
        ],
    },
    DemoSense {
        word: "crane",
        best_sense: "a lifting machine",
        senses: &[
            "a lifting machine",
            "a large long-necked wading bird",
        ],
    },
];

fn demo_sense(word: &str) -> Option<&'static DemoSense> {
    DEMO_SENSES.iter().find(|sense| sense.word == word)
}

fn normalize(token: &str) -> String {
    token
        .trim_matches(|ch: char| !ch.is_alphanumeric())
        .to_lowercase()
}

impl DemoService {
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, ServiceError> {
        tokio::time::sleep(DEMO_LATENCY).await;
        Ok(analyze_offline(text))
    }

    pub async fn history(&self) -> Result<Vec<HistoryEntry>, ServiceError> {
        tokio::time::sleep(DEMO_LATENCY).await;

        let samples = [
            ("demo-2", "The spring by the bank ran dry", "2026-08-02T14:05:00"),
            ("demo-1", "He swung the bat at the light", "2026-08-01T09:30:00"),
        ];

        Ok(samples
            .iter()
            .map(|&(id, text, created_at)| {
                let result = analyze_offline(text);
                HistoryEntry {
                    id: id.to_owned(),
                    text: text.to_owned(),
                    ambiguity_score: result.ambiguity_score,
                    result,
                    created_at: created_at.to_owned(),
                }
            })
            .collect())
    }
}

fn analyze_offline(text: &str) -> AnalysisResult {
    let tokens = tokenize(text);
    let mut ambiguous = Vec::new();
    let mut context_keywords = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        let key = normalize(token);
        if key.is_empty() {
            continue;
        }
        if let Some(sense) = demo_sense(&key) {
            ambiguous.push(AmbiguousWord {
                word: key.clone(),
                index: index as i64,
                senses: sense.senses.iter().map(|&gloss| gloss.to_owned()).collect(),
                best_sense: sense.best_sense.to_owned(),
                confidence: "High".to_owned(),
                decision_source: "demo".to_owned(),
                fallback_similarity: None,
            });
            context_keywords.push(key);
        }
    }

    let meaningful = tokens.iter().filter(|token| !normalize(token).is_empty()).count();
    let ambiguity_score = if meaningful == 0 {
        0.0
    } else {
        (ambiguous.len() as f64 / meaningful as f64 * 100.0).round() / 100.0
    };

    AnalysisResult { text: text.to_owned(), context_keywords, ambiguity_score, ambiguous }
}

#[cfg(test)]
mod tests {
    use super::{analyze_offline, DemoService};

    #[test]
    fn flags_known_words_at_their_token_positions() {
        let result = analyze_offline("The bank is closed");

        assert_eq!(result.ambiguous.len(), 1);
        assert_eq!(result.ambiguous[0].word, "bank");
        assert_eq!(result.ambiguous[0].index, 1);
        assert!(!result.ambiguous[0].senses.is_empty());
    }

    #[test]
    fn strips_punctuation_and_case_when_matching() {
        let result = analyze_offline("Bank, closed.");
        assert_eq!(result.ambiguous.len(), 1);
        assert_eq!(result.ambiguous[0].index, 0);
    }

    #[test]
    fn empty_text_scores_zero() {
        let result = analyze_offline("");
        assert_eq!(result.ambiguity_score, 0.0);
        assert!(result.ambiguous.is_empty());
    }

    #[test]
    fn is_deterministic() {
        let first = analyze_offline("The spring by the bank ran dry");
        let second = analyze_offline("The spring by the bank ran dry");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn history_returns_canned_entries_newest_first() {
        let service = DemoService;
        let entries = service.history().await.expect("demo history");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "demo-2");
        assert!(!entries[0].result.ambiguous.is_empty());
    }
}
