// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pythia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pythia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Hover detail state machine.

use crate::model::AmbiguousWord;

/// Tracks the at-most-one annotation whose detail panel is showing.
///
/// Hover state is ephemeral: it is never persisted, and the owning session
/// forces it back to idle whenever the result it refers to is replaced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoverController {
    active: Option<AmbiguousWord>,
}

impl HoverController {
    pub fn active(&self) -> Option<&AmbiguousWord> {
        self.active.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// Pointer entered a highlighted segment.
    ///
    /// Entering while another annotation is active replaces it; there is
    /// never more than one active annotation.
    pub fn enter(&mut self, annotation: AmbiguousWord) {
        self.active = Some(annotation);
    }

    /// Pointer left a highlighted segment.
    ///
    /// Only a leave for the currently active annotation clears the state; a
    /// stale leave (the pointer already entered a different segment) is
    /// ignored.
    pub fn leave(&mut self, annotation: &AmbiguousWord) {
        if self.active.as_ref() == Some(annotation) {
            self.active = None;
        }
    }

    /// Forced reset, used whenever the owning result is replaced.
    pub fn clear(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::HoverController;
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
    fn enter_activates_and_leave_clears() {
        let mut hover = HoverController::default();
        assert!(hover.is_idle());

        let bank = word("bank", 1);
        hover.enter(bank.clone());
        assert_eq!(hover.active(), Some(&bank));

        hover.leave(&bank);
        assert!(hover.is_idle());
    }

    #[test]
    fn direct_transition_between_segments_keeps_one_active() {
        let mut hover = HoverController::default();
        let bank = word("bank", 1);
        let spring = word("spring", 3);

        hover.enter(bank.clone());
        hover.enter(spring.clone());
        assert_eq!(hover.active(), Some(&spring));

        // The stale leave for the first segment must not clear the second.
        hover.leave(&bank);
        assert_eq!(hover.active(), Some(&spring));
    }

    #[test]
    fn leave_when_idle_is_a_no_op() {
        let mut hover = HoverController::default();
        hover.leave(&word("bank", 1));
        assert!(hover.is_idle());
    }

    #[test]
    fn clear_resets_from_any_state() {
        let mut hover = HoverController::default();
        hover.enter(word("bank", 1));
        hover.clear();
        assert!(hover.is_idle());

        hover.clear();
        assert!(hover.is_idle());
    }
}
