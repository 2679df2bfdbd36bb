// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pythia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pythia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Session-scoped history list.

use crate::model::HistoryEntry;

/// Ordered list of past analyses, exactly as the service returned them.
///
/// The list is replaced wholesale on every successful fetch; the store never
/// re-sorts and never deduplicates. A failed fetch leaves the previous
/// contents in place (empty before the first successful load) — that
/// fail-soft handling lives at the call boundary, not here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn replace(&mut self, entries: Vec<HistoryEntry>) {
        self.entries = entries;
    }
}

#[cfg(test)]
mod tests {
    use super::HistoryStore;
    use crate::model::HistoryEntry;

    fn entry(text: &str) -> HistoryEntry {
        HistoryEntry { text: text.to_owned(), ..HistoryEntry::default() }
    }

    #[test]
    fn replace_swaps_contents_wholesale() {
        let mut store = HistoryStore::default();
        assert!(store.is_empty());

        store.replace(vec![entry("first"), entry("second")]);
        assert_eq!(store.len(), 2);

        store.replace(vec![entry("third")]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).expect("entry").text, "third");
    }

    #[test]
    fn preserves_service_order_and_duplicates() {
        let mut store = HistoryStore::default();
        store.replace(vec![entry("b"), entry("a"), entry("b")]);

        let texts = store.entries().iter().map(|e| e.text.as_str()).collect::<Vec<_>>();
        assert_eq!(texts, ["b", "a", "b"]);
    }
}
