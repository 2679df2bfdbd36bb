// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pythia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pythia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

/// One flagged token as reported by the analysis service.
///
/// `index` is a position in the whitespace tokenization of the text the
/// service analyzed. It is carried verbatim; the client never validates it,
/// and alignment (`crate::align`) treats unmatchable indices as inert.
/// `confidence` and `decision_source` are opaque service strings rendered
/// as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbiguousWord {
    pub word: String,
    pub index: i64,
    /// Candidate sense glosses, at most a few, possibly empty.
    #[serde(default)]
    pub senses: Vec<String>,
    pub best_sense: String,
    pub confidence: String,
    pub decision_source: String,
    /// Present only when the service took its fallback decision path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_similarity: Option<f64>,
}

/// A full `POST /analyze` response.
///
/// Field names mirror the wire format. `text` is the service's echo of the
/// analyzed input; `ambiguous` keeps the service's order, which is relevant
/// only for deterministic re-rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub context_keywords: Vec<String>,
    #[serde(default)]
    pub ambiguity_score: f64,
    #[serde(default)]
    pub ambiguous: Vec<AmbiguousWord>,
}

#[cfg(test)]
mod tests {
    use super::AnalysisResult;

    #[test]
    fn decodes_full_analyze_response() {
        let raw = r#"{
            "text": "The bank is closed",
            "context_keywords": ["bank", "closed"],
            "ambiguous": [
                {
                    "word": "bank",
                    "index": 1,
                    "senses": ["a financial institution", "sloping land"],
                    "best_sense": "a financial institution that accepts deposits",
                    "confidence": "High",
                    "decision_source": "wordnet"
                }
            ],
            "ambiguity_score": 0.5
        }"#;

        let result: AnalysisResult = serde_json::from_str(raw).expect("decode analyze response");
        assert_eq!(result.text, "The bank is closed");
        assert_eq!(result.ambiguity_score, 0.5);
        assert_eq!(result.ambiguous.len(), 1);
        assert_eq!(result.ambiguous[0].word, "bank");
        assert_eq!(result.ambiguous[0].index, 1);
        assert_eq!(result.ambiguous[0].senses.len(), 2);
        assert_eq!(result.ambiguous[0].fallback_similarity, None);
    }

    #[test]
    fn decodes_fallback_similarity_when_present() {
        let raw = r#"{
            "ambiguity_score": 1.0,
            "ambiguous": [
                {
                    "word": "spring",
                    "index": 0,
                    "best_sense": "the season after winter",
                    "confidence": "Transformer-Medium",
                    "decision_source": "transformer",
                    "fallback_similarity": 0.412
                }
            ]
        }"#;

        let result: AnalysisResult = serde_json::from_str(raw).expect("decode analyze response");
        assert_eq!(result.ambiguous[0].fallback_similarity, Some(0.412));
        assert_eq!(result.ambiguous[0].decision_source, "transformer");
    }

    #[test]
    fn tolerates_missing_and_unknown_fields() {
        let raw = r#"{"ambiguity_score": 0, "extra": {"ignored": true}}"#;

        let result: AnalysisResult = serde_json::from_str(raw).expect("decode analyze response");
        assert_eq!(result.text, "");
        assert!(result.context_keywords.is_empty());
        assert!(result.ambiguous.is_empty());
        assert_eq!(result.ambiguity_score, 0.0);
    }

    #[test]
    fn integer_score_decodes_as_float() {
        let raw = r#"{"ambiguity_score": 1}"#;

        let result: AnalysisResult = serde_json::from_str(raw).expect("decode analyze response");
        assert_eq!(result.ambiguity_score, 1.0);
    }
}
