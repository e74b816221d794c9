//! Follow-up detector - fast path for pronoun-style continuation queries.
//!
//! A heuristic, not a parser: the query must contain one of a fixed phrase
//! set AND a pending selection must exist for the caller. False negatives
//! simply fall through to the full oracle protocol; the detector never
//! consults the oracle. Kept behind this one contract so a stricter intent
//! classifier could replace it without touching the dispatcher.

use std::sync::Arc;

use super::selection::{SelectionKey, SelectionStore};

/// Phrases that mark a query as referring to the previous selection.
const TRIGGER_PHRASES: &[&str] = &[
    "total value",
    "their value",
    "their total",
    "combined value",
    "how much are they worth",
    "worth",
];

/// Detects follow-up queries against the selection memory.
#[derive(Debug, Clone)]
pub struct FollowUpDetector {
    selections: Arc<SelectionStore>,
}

impl FollowUpDetector {
    pub fn new(selections: Arc<SelectionStore>) -> Self {
        Self { selections }
    }

    /// True only if a pending selection exists for the key and the
    /// lower-cased query contains a trigger phrase.
    pub fn is_followup(&self, key: &SelectionKey, query_text: &str) -> bool {
        if !self.selections.has_pending(key) {
            return false;
        }
        let lowered = query_text.to_lowercase();
        TRIGGER_PHRASES.iter().any(|phrase| lowered.contains(phrase))
    }
}
