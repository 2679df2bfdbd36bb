// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pythia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pythia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Analyze-session state machines.
//!
//! [`AnalysisSession`] owns the working text, the current result, the
//! request status, and the hover controller. Every state transition funnels
//! through it so the single-active-result, forced-idle-on-replace, and
//! last-write-wins rules hold in one place and are testable without a UI
//! harness.

pub mod history;
pub mod hover;

pub use history::HistoryStore;
pub use hover::HoverController;

use crate::model::{AmbiguousWord, AnalysisResult, HistoryEntry};

/// Identifies one analyze request.
///
/// Tickets are issued in initiation order; a later ticket supersedes every
/// earlier one, regardless of network completion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AnalyzeTicket(u64);

/// Request status of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Idle,
    Loading,
    Error(String),
}

/// The current (text, result, hover) state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisSession {
    working_text: String,
    current_result: Option<AnalysisResult>,
    status: SessionStatus,
    hover: HoverController,
    issued: u64,
    pending: Option<AnalyzeTicket>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn working_text(&self) -> &str {
        &self.working_text
    }

    pub fn current_result(&self) -> Option<&AnalysisResult> {
        self.current_result.as_ref()
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == SessionStatus::Loading
    }

    pub fn hover(&self) -> &HoverController {
        &self.hover
    }

    /// Replaces the working text.
    ///
    /// Editing never touches the current result; annotations whose indices
    /// stop matching the edited text simply go inert at render time.
    pub fn set_working_text(&mut self, text: impl Into<String>) {
        self.working_text = text.into();
    }

    /// Starts an analyze call for the current working text and returns the
    /// ticket its completion must present.
    ///
    /// Issuing a new ticket supersedes any outstanding one: of overlapping
    /// calls, only the last-initiated may update the session.
    pub fn begin_analyze(&mut self) -> AnalyzeTicket {
        self.issued += 1;
        let ticket = AnalyzeTicket(self.issued);
        self.pending = Some(ticket);
        self.status = SessionStatus::Loading;
        ticket
    }

    /// Applies an analyze completion.
    ///
    /// Returns `false` when `ticket` is not the outstanding one (superseded
    /// by a later call or by a history selection, or already resolved); the
    /// outcome is discarded and nothing changes. On success the result is
    /// replaced wholesale and hover is forced idle; on failure the previous
    /// result is kept and the error is held for display.
    pub fn complete_analyze(
        &mut self,
        ticket: AnalyzeTicket,
        outcome: Result<AnalysisResult, String>,
    ) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.pending = None;

        match outcome {
            Ok(result) => {
                self.current_result = Some(result);
                self.status = SessionStatus::Idle;
                self.hover.clear();
            }
            Err(message) => {
                self.status = SessionStatus::Error(message);
            }
        }

        true
    }

    /// Re-seeds the session from a history entry in one transition.
    ///
    /// Working text and current result change together, hover is forced
    /// idle, and any in-flight analyze call is superseded — the selection is
    /// the newest result-replacing event.
    pub fn select_entry(&mut self, entry: &HistoryEntry) {
        self.working_text = entry.text.clone();
        self.current_result = Some(entry.result.clone());
        self.status = SessionStatus::Idle;
        self.pending = None;
        self.hover.clear();
    }

    pub fn hover_enter(&mut self, annotation: AmbiguousWord) {
        self.hover.enter(annotation);
    }

    pub fn hover_leave(&mut self, annotation: &AmbiguousWord) {
        self.hover.leave(annotation);
    }

    pub fn hover_clear(&mut self) {
        self.hover.clear();
    }
}
