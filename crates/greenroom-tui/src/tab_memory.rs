//! Last-active sub-tab per overlay instance, for the lifetime of the session.

use std::collections::{BTreeMap, HashMap};

use crate::nav_entry::OverlayKey;

#[derive(Debug, Clone, Default)]
pub struct TabMemory {
    active: HashMap<OverlayKey, String>,
}

impl TabMemory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remembered tab for `key`, or `fallback` if none was ever selected.
    #[must_use]
    pub fn get_active<'a>(&'a self, key: &OverlayKey, fallback: &'a str) -> &'a str {
        self.active.get(key).map_or(fallback, String::as_str)
    }

    pub fn set_active(&mut self, key: &OverlayKey, tab: impl Into<String>) {
        let tab = tab.into();
        tracing::debug!(key = %key, tab = %tab, "active tab set");
        self.active.insert(key.clone(), tab);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Sorted copy for state dumps.
    #[must_use]
    pub fn to_sorted_map(&self) -> BTreeMap<String, String> {
        self.active
            .iter()
            .map(|(key, tab)| (key.to_string(), tab.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::TabMemory;
    use crate::nav_entry::OverlayKey;

    #[test]
    fn missing_key_returns_fallback() {
        let memory = TabMemory::new();
        assert_eq!(memory.get_active(&"creative:1".into(), "profile"), "profile");
    }

    #[test]
    fn keys_are_isolated() {
        let mut memory = TabMemory::new();
        memory.set_active(&OverlayKey::from("kind:1"), "profile");
        assert_eq!(memory.get_active(&"kind:2".into(), "overview"), "overview");
        assert_eq!(memory.get_active(&"kind:1".into(), "overview"), "profile");
    }

    #[test]
    fn last_write_wins() {
        let mut memory = TabMemory::new();
        let key = OverlayKey::from("project:7");
        memory.set_active(&key, "needs");
        memory.set_active(&key, "notes");
        assert_eq!(memory.get_active(&key, "overview"), "notes");
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn sorted_map_orders_by_key() {
        let mut memory = TabMemory::new();
        memory.set_active(&"sub:2".into(), "feedback");
        memory.set_active(&"creative:9".into(), "subs");
        let keys: Vec<String> = memory.to_sorted_map().into_keys().collect();
        assert_eq!(keys, ["creative:9", "sub:2"]);
    }
}
