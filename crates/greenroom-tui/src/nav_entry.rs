//! Navigation entries: the immutable "what is shown" value.
//!
//! Two entries denote the same overlay iff `kind` and `id` match; `extra`
//! carries advisory hints only and is ignored by equality, hashing and the
//! overlay key.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use greenroom_core::entity::EntityKind;
use serde::Serialize;

/// Advisory hints attached to an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntryExtra {
    /// Sub-tab the caller would like preselected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_tab: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
}

impl EntryExtra {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.initial_tab.is_none() && self.context.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavigationEntry {
    /// `None` is the "none" discriminant; such entries dispatch to nothing.
    pub kind: Option<EntityKind>,
    pub id: String,
    #[serde(skip_serializing_if = "EntryExtra::is_empty")]
    pub extra: EntryExtra,
}

impl NavigationEntry {
    #[must_use]
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            id: id.into(),
            extra: EntryExtra::default(),
        }
    }

    /// Build from an untrusted kind slug; unknown slugs become the "none"
    /// discriminant rather than an error.
    #[must_use]
    pub fn from_raw(kind: &str, id: impl Into<String>) -> Self {
        Self {
            kind: kind.parse().ok(),
            id: id.into(),
            extra: EntryExtra::default(),
        }
    }

    #[must_use]
    pub fn with_initial_tab(mut self, tab: impl Into<String>) -> Self {
        self.extra.initial_tab = Some(tab.into());
        self
    }

    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.context.insert(key.into(), value.into());
        self
    }

    /// True when both entries address the same overlay instance.
    #[must_use]
    pub fn same_overlay(&self, other: &Self) -> bool {
        self.kind == other.kind && self.id == other.id
    }

    #[must_use]
    pub fn key(&self) -> OverlayKey {
        OverlayKey::for_entry(self)
    }
}

impl PartialEq for NavigationEntry {
    fn eq(&self, other: &Self) -> bool {
        self.same_overlay(other)
    }
}

impl Eq for NavigationEntry {}

impl Hash for NavigationEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.id.hash(state);
    }
}

impl fmt::Display for NavigationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Stable identity of an overlay instance, rendered as `kind:id`.
///
/// Tab memory and the focus registry are keyed by this. Surfaces that are not
/// entity overlays use [`OverlayKey::named`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct OverlayKey(String);

impl OverlayKey {
    #[must_use]
    pub fn new(kind: EntityKind, id: &str) -> Self {
        Self(format!("{}:{id}", kind.slug()))
    }

    #[must_use]
    pub fn for_entry(entry: &NavigationEntry) -> Self {
        let kind = entry.kind.map_or("none", EntityKind::slug);
        Self(format!("{kind}:{}", entry.id))
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OverlayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OverlayKey {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use greenroom_core::entity::EntityKind;

    use super::{NavigationEntry, OverlayKey};

    #[test]
    fn extra_does_not_affect_identity() {
        let plain = NavigationEntry::new(EntityKind::Creative, "42");
        let hinted = NavigationEntry::new(EntityKind::Creative, "42")
            .with_initial_tab("subs")
            .with_context("from", "project:7");
        assert_eq!(plain, hinted);
        assert_eq!(plain.key(), hinted.key());

        let mut set = HashSet::new();
        set.insert(plain);
        assert!(!set.insert(hinted));
    }

    #[test]
    fn kind_and_id_both_participate() {
        let creative = NavigationEntry::new(EntityKind::Creative, "1");
        assert_ne!(creative, NavigationEntry::new(EntityKind::Project, "1"));
        assert_ne!(creative, NavigationEntry::new(EntityKind::Creative, "2"));
    }

    #[test]
    fn keys_render_as_kind_colon_id() {
        let entry = NavigationEntry::new(EntityKind::WritingSample, "ws-9");
        assert_eq!(entry.key().as_str(), "writing_sample:ws-9");
        assert_eq!(
            OverlayKey::new(EntityKind::Submission, "3").to_string(),
            "sub:3"
        );
    }

    #[test]
    fn unknown_raw_kind_becomes_none_discriminant() {
        let entry = NavigationEntry::from_raw("spaceship", "1");
        assert_eq!(entry.kind, None);
        assert_eq!(entry.key().as_str(), "none:1");
        let parsed = NavigationEntry::from_raw("person", "1");
        assert_eq!(parsed.kind, Some(EntityKind::Creative));
    }
}
