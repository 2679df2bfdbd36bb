// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pythia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pythia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::analysis::AnalysisResult;

/// One persisted prior analysis as returned by `GET /history`.
///
/// The service stores the complete analysis under `result`; the top-level
/// `text` and `ambiguity_score` are denormalized copies used for list
/// display. Selecting an entry must project the nested `result` out — the
/// raw document is not an `AnalysisResult`. `created_at` is an opaque
/// service-formatted timestamp rendered verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default, rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub ambiguity_score: f64,
    #[serde(default)]
    pub result: AnalysisResult,
    #[serde(default)]
    pub created_at: String,
}
