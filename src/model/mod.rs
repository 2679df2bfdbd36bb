// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pythia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pythia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wire-exact data model for the ambiguity-analysis service.

pub mod analysis;
pub mod history;

pub use analysis::{AmbiguousWord, AnalysisResult};
pub use history::HistoryEntry;
