//! Selection memory - the remembered item selection behind follow-up queries.
//!
//! A ranked top-N query leaves its returned item names here; the follow-up
//! aggregation tool consumes them. Slots are keyed per session so one
//! caller's pending selection can neither leak into another's follow-up nor
//! be cleared by an unrelated request. The consume path is a single `take`
//! under the lock, so read-then-clear is atomic.

use std::collections::HashMap;
use std::sync::Mutex;

/// Key partitioning selection memory between callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectionKey(String);

impl SelectionKey {
    /// Key for callers that do not identify a session.
    pub const ANONYMOUS: &'static str = "anonymous";

    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        if key.is_empty() {
            Self::anonymous()
        } else {
            Self(key)
        }
    }

    /// Shared fallback key for unidentified callers.
    pub fn anonymous() -> Self {
        Self(Self::ANONYMOUS.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Keyed store of pending item selections.
///
/// At most one pending selection exists per key; a new ranking overwrites the
/// previous one unconditionally.
#[derive(Debug, Default)]
pub struct SelectionStore {
    slots: Mutex<HashMap<SelectionKey, Vec<String>>>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remembers a ranked selection, replacing any previous one for the key.
    pub fn remember(&self, key: &SelectionKey, names: Vec<String>) {
        let mut slots = self.slots.lock().expect("selection lock poisoned");
        slots.insert(key.clone(), names);
    }

    /// Consumes the pending selection: returns it and clears the slot.
    ///
    /// The slot is cleared even when the caller subsequently fails to resolve
    /// any of the names; clearing is part of this read.
    pub fn take(&self, key: &SelectionKey) -> Option<Vec<String>> {
        let mut slots = self.slots.lock().expect("selection lock poisoned");
        slots.remove(key)
    }

    /// True if a pending selection exists for the key.
    pub fn has_pending(&self, key: &SelectionKey) -> bool {
        let slots = self.slots.lock().expect("selection lock poisoned");
        slots.get(key).is_some_and(|names| !names.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn remember_then_take_returns_selection_in_order() {
        let store = SelectionStore::new();
        let key = SelectionKey::anonymous();

        store.remember(&key, names(&["B", "A"]));
        assert_eq!(store.take(&key), Some(names(&["B", "A"])));
    }

    #[test]
    fn take_clears_the_slot() {
        let store = SelectionStore::new();
        let key = SelectionKey::anonymous();

        store.remember(&key, names(&["B", "A"]));
        store.take(&key);
        assert_eq!(store.take(&key), None);
        assert!(!store.has_pending(&key));
    }

    #[test]
    fn remember_overwrites_previous_selection() {
        let store = SelectionStore::new();
        let key = SelectionKey::anonymous();

        store.remember(&key, names(&["X"]));
        store.remember(&key, names(&["B", "A"]));
        assert_eq!(store.take(&key), Some(names(&["B", "A"])));
    }

    #[test]
    fn keys_partition_the_store() {
        let store = SelectionStore::new();
        let alice = SelectionKey::new("alice");
        let bob = SelectionKey::new("bob");

        store.remember(&alice, names(&["A"]));
        store.remember(&bob, names(&["B"]));

        assert_eq!(store.take(&alice), Some(names(&["A"])));
        // Taking alice's selection leaves bob's untouched.
        assert!(store.has_pending(&bob));
        assert_eq!(store.take(&bob), Some(names(&["B"])));
    }

    #[test]
    fn empty_session_id_maps_to_anonymous() {
        assert_eq!(SelectionKey::new(""), SelectionKey::anonymous());
        assert_eq!(SelectionKey::new("s1").as_str(), "s1");
    }

    #[test]
    fn has_pending_is_false_for_empty_selection() {
        let store = SelectionStore::new();
        let key = SelectionKey::anonymous();

        store.remember(&key, Vec::new());
        assert!(!store.has_pending(&key));
    }
}
