//! Entity kinds the overlay system can display.
//!
//! The set is closed: adding a kind means adding a variant here, and every
//! exhaustive `match` downstream (renderer tables, tab catalogs) fails to
//! compile until the new kind is handled.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::GreenroomError;

/// Discriminant of a CRM entity that can be drilled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Creative,
    Executive,
    Project,
    Company,
    Submission,
    Mandate,
    Manager,
    WritingSample,
    ExternalRep,
}

/// Descriptor for one sub-tab inside an entity overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabDescriptor {
    pub key: &'static str,
    pub label: &'static str,
}

const fn tab(key: &'static str, label: &'static str) -> TabDescriptor {
    TabDescriptor { key, label }
}

const CREATIVE_TABS: &[TabDescriptor] = &[
    tab("profile", "Profile"),
    tab("projects", "Projects"),
    tab("subs", "Subs"),
    tab("writing_samples", "Samples"),
    tab("survey", "Survey"),
    tab("notes", "Notes"),
];

const EXECUTIVE_TABS: &[TabDescriptor] = &[
    tab("profile", "Profile"),
    tab("companies", "Companies"),
    tab("feedback", "Sub Feedback"),
    tab("notes", "Notes"),
];

const PROJECT_TABS: &[TabDescriptor] = &[
    tab("overview", "Overview"),
    tab("needs", "Needs"),
    tab("creatives", "Creatives"),
    tab("executives", "Executives"),
    tab("subs", "Subs"),
    tab("notes", "Notes"),
];

const COMPANY_TABS: &[TabDescriptor] = &[
    tab("overview", "Overview"),
    tab("executives", "Executives"),
    tab("projects", "Projects"),
    tab("notes", "Notes"),
];

const SUBMISSION_TABS: &[TabDescriptor] = &[
    tab("overview", "Overview"),
    tab("recipients", "Recipients"),
    tab("feedback", "Feedback"),
];

const MANDATE_TABS: &[TabDescriptor] = &[tab("overview", "Overview"), tab("subs", "Subs")];

const MANAGER_TABS: &[TabDescriptor] = &[
    tab("profile", "Profile"),
    tab("clients", "Clients"),
    tab("subs", "Subs"),
];

const WRITING_SAMPLE_TABS: &[TabDescriptor] = &[
    tab("overview", "Overview"),
    tab("creatives", "Creatives"),
    tab("subs", "Subs"),
];

const EXTERNAL_REP_TABS: &[TabDescriptor] = &[
    tab("profile", "Profile"),
    tab("clients", "Clients"),
];

impl EntityKind {
    pub const ALL: [EntityKind; 9] = [
        EntityKind::Creative,
        EntityKind::Executive,
        EntityKind::Project,
        EntityKind::Company,
        EntityKind::Submission,
        EntityKind::Mandate,
        EntityKind::Manager,
        EntityKind::WritingSample,
        EntityKind::ExternalRep,
    ];

    /// Stable slug used in overlay keys and serialized forms.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Creative => "creative",
            Self::Executive => "executive",
            Self::Project => "project",
            Self::Company => "company",
            Self::Submission => "sub",
            Self::Mandate => "mandate",
            Self::Manager => "manager",
            Self::WritingSample => "writing_sample",
            Self::ExternalRep => "external_rep",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Creative => "Creative",
            Self::Executive => "Executive",
            Self::Project => "Project",
            Self::Company => "Company",
            Self::Submission => "Submission",
            Self::Mandate => "Mandate",
            Self::Manager => "Manager",
            Self::WritingSample => "Writing Sample",
            Self::ExternalRep => "External Rep",
        }
    }

    /// Position inside [`EntityKind::ALL`]; lookup tables index by this.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Creative => 0,
            Self::Executive => 1,
            Self::Project => 2,
            Self::Company => 3,
            Self::Submission => 4,
            Self::Mandate => 5,
            Self::Manager => 6,
            Self::WritingSample => 7,
            Self::ExternalRep => 8,
        }
    }

    /// Ordered sub-tabs offered by this kind's detail overlay.
    #[must_use]
    pub fn tab_catalog(self) -> &'static [TabDescriptor] {
        match self {
            Self::Creative => CREATIVE_TABS,
            Self::Executive => EXECUTIVE_TABS,
            Self::Project => PROJECT_TABS,
            Self::Company => COMPANY_TABS,
            Self::Submission => SUBMISSION_TABS,
            Self::Mandate => MANDATE_TABS,
            Self::Manager => MANAGER_TABS,
            Self::WritingSample => WRITING_SAMPLE_TABS,
            Self::ExternalRep => EXTERNAL_REP_TABS,
        }
    }

    /// Tab shown when no tab has been remembered for an instance yet.
    #[must_use]
    pub fn default_tab(self) -> &'static str {
        self.tab_catalog()
            .first()
            .map_or("overview", |descriptor| descriptor.key)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for EntityKind {
    type Err = GreenroomError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        let kind = match normalized.as_str() {
            "creative" | "person" | "client" => Self::Creative,
            "executive" | "exec" => Self::Executive,
            "project" => Self::Project,
            "company" | "organization" | "org" => Self::Company,
            "sub" | "submission" => Self::Submission,
            "mandate" => Self::Mandate,
            "manager" => Self::Manager,
            "writing_sample" | "document" | "sample" => Self::WritingSample,
            "external_rep" | "external_contact" | "rep" => Self::ExternalRep,
            _ => return Err(GreenroomError::UnknownEntityKind(raw.to_owned())),
        };
        Ok(kind)
    }
}

impl Serialize for EntityKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.slug())
    }
}

impl<'de> Deserialize<'de> for EntityKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::EntityKind;

    #[test]
    fn index_matches_all_order() {
        for (position, kind) in EntityKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), position, "{kind}");
        }
    }

    #[test]
    fn slugs_round_trip_through_from_str() {
        for kind in EntityKind::ALL {
            let parsed: EntityKind = match kind.slug().parse() {
                Ok(parsed) => parsed,
                Err(err) => panic!("slug {} should parse: {err}", kind.slug()),
            };
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn aliases_map_to_canonical_kinds() {
        assert_eq!("person".parse::<EntityKind>().ok(), Some(EntityKind::Creative));
        assert_eq!(
            "Organization".parse::<EntityKind>().ok(),
            Some(EntityKind::Company)
        );
        assert_eq!(
            "external-contact".parse::<EntityKind>().ok(),
            Some(EntityKind::ExternalRep)
        );
        assert_eq!(
            "document".parse::<EntityKind>().ok(),
            Some(EntityKind::WritingSample)
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = match "spaceship".parse::<EntityKind>() {
            Ok(kind) => panic!("expected error, got {kind}"),
            Err(err) => err,
        };
        assert!(err.to_string().contains("spaceship"), "err={err}");
    }

    #[test]
    fn every_kind_has_tabs_and_default_is_first() {
        for kind in EntityKind::ALL {
            let tabs = kind.tab_catalog();
            assert!(!tabs.is_empty(), "{kind} has no tabs");
            assert_eq!(kind.default_tab(), tabs[0].key);
        }
        assert_eq!(EntityKind::Creative.default_tab(), "profile");
        assert_eq!(EntityKind::Project.default_tab(), "overview");
    }

    #[test]
    fn serde_uses_slug() {
        let encoded = match serde_json::to_string(&EntityKind::WritingSample) {
            Ok(encoded) => encoded,
            Err(err) => panic!("encode: {err}"),
        };
        assert_eq!(encoded, "\"writing_sample\"");
        let decoded: EntityKind = match serde_json::from_str("\"sub\"") {
            Ok(decoded) => decoded,
            Err(err) => panic!("decode: {err}"),
        };
        assert_eq!(decoded, EntityKind::Submission);
    }
}
