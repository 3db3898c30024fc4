//! In-memory demo catalog and the renderers that serve it.
//!
//! Stands in for the CRM data layer so the binary and integration tests have
//! something to drill into.

use std::rc::Rc;

use greenroom_core::entity::EntityKind;

use crate::entity_list::ListRow;
use crate::nav_entry::NavigationEntry;
use crate::presentation::{ContentError, ContentRenderer, RenderedContent, RendererTable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoRecord {
    pub kind: EntityKind,
    pub id: &'static str,
    pub name: &'static str,
    /// `(tab, line)` pairs; a tab with no lines renders a placeholder.
    pub fields: Vec<(&'static str, &'static str)>,
    pub links: Vec<(EntityKind, &'static str)>,
    /// Simulates a backend outage for this record.
    pub unavailable: bool,
}

impl DemoRecord {
    fn new(kind: EntityKind, id: &'static str, name: &'static str) -> Self {
        Self {
            kind,
            id,
            name,
            fields: Vec::new(),
            links: Vec::new(),
            unavailable: false,
        }
    }

    fn field(mut self, tab: &'static str, line: &'static str) -> Self {
        self.fields.push((tab, line));
        self
    }

    fn link(mut self, kind: EntityKind, id: &'static str) -> Self {
        self.links.push((kind, id));
        self
    }

    fn offline(mut self) -> Self {
        self.unavailable = true;
        self
    }

    #[must_use]
    pub fn entry(&self) -> NavigationEntry {
        NavigationEntry::new(self.kind, self.id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DemoCatalog {
    records: Vec<DemoRecord>,
}

impl DemoCatalog {
    #[must_use]
    pub fn new(records: Vec<DemoRecord>) -> Self {
        Self { records }
    }

    /// A small agency roster covering every entity kind.
    #[must_use]
    pub fn seeded() -> Self {
        use EntityKind as K;
        Self::new(vec![
            DemoRecord::new(K::Creative, "c-ada", "Ada Park")
                .field("profile", "Writer / showrunner")
                .field("profile", "Represented since 2019")
                .field("subs", "Nightjar: pending")
                .field("survey", "Prefers grounded genre")
                .link(K::Project, "p-night")
                .link(K::Submission, "s-1")
                .link(K::WritingSample, "ws-1")
                .link(K::Manager, "m-jo"),
            DemoRecord::new(K::Creative, "c-ben", "Ben Ortiz")
                .field("profile", "Director")
                .link(K::ExternalRep, "r-1")
                .link(K::Project, "p-tide"),
            DemoRecord::new(K::Project, "p-night", "Nightjar")
                .field("overview", "Limited series, 8 x 60")
                .field("overview", "Status: in development")
                .field("needs", "Staff writers, genre-fluent")
                .link(K::Company, "co-lumen")
                .link(K::Executive, "e-rivera")
                .link(K::Creative, "c-ada")
                .link(K::Submission, "s-1"),
            DemoRecord::new(K::Project, "p-tide", "Tidewater")
                .field("overview", "Feature, coastal thriller")
                .link(K::Creative, "c-ben"),
            DemoRecord::new(K::Company, "co-lumen", "Lumen Pictures")
                .field("overview", "Studio, premium TV")
                .link(K::Executive, "e-rivera")
                .link(K::Project, "p-night")
                .link(K::Mandate, "md-1"),
            DemoRecord::new(K::Executive, "e-rivera", "Dana Rivera")
                .field("profile", "VP Drama, Lumen Pictures")
                .link(K::Company, "co-lumen"),
            DemoRecord::new(K::Submission, "s-1", "Ada Park to Nightjar")
                .field("overview", "Sent with Ferry Lights pilot")
                .field("feedback", "Strong voice, wants a second sample")
                .link(K::Creative, "c-ada")
                .link(K::Project, "p-night")
                .link(K::WritingSample, "ws-1"),
            DemoRecord::new(K::Mandate, "md-1", "Grounded sci-fi")
                .field("overview", "Lumen wants near-future limited series")
                .link(K::Company, "co-lumen"),
            DemoRecord::new(K::Manager, "m-jo", "Jo Reyes")
                .field("profile", "Literary manager")
                .link(K::Creative, "c-ada"),
            DemoRecord::new(K::WritingSample, "ws-1", "Ferry Lights (pilot)")
                .field("overview", "60-page drama pilot")
                .link(K::Creative, "c-ada"),
            DemoRecord::new(K::ExternalRep, "r-1", "Sam Cole")
                .field("profile", "Agent, Northside Talent")
                .link(K::Creative, "c-ben"),
            DemoRecord::new(K::ExternalRep, "r-offline", "Rep directory").offline(),
        ])
    }

    #[must_use]
    pub fn get(&self, kind: EntityKind, id: &str) -> Option<&DemoRecord> {
        self.records
            .iter()
            .find(|record| record.kind == kind && record.id == id)
    }

    #[must_use]
    pub fn records(&self) -> &[DemoRecord] {
        &self.records
    }

    /// Rows for the list view, in catalog order.
    #[must_use]
    pub fn roster(&self) -> Vec<ListRow> {
        self.records
            .iter()
            .map(|record| ListRow::new(record.name, record.entry()))
            .collect()
    }

    /// Render `kind`/`id` on `tab`.
    pub fn render(
        &self,
        kind: EntityKind,
        id: &str,
        tab: &str,
    ) -> Result<RenderedContent, ContentError> {
        let record = self.get(kind, id).ok_or_else(|| ContentError::NotFound {
            kind,
            id: id.to_owned(),
        })?;
        if record.unavailable {
            return Err(ContentError::Unavailable(format!(
                "{} service is offline",
                kind.label()
            )));
        }

        let mut content = RenderedContent::titled(record.name);
        content.lines = record
            .fields
            .iter()
            .filter(|(field_tab, _)| *field_tab == tab)
            .map(|(_, line)| (*line).to_owned())
            .collect();
        if content.lines.is_empty() {
            let label = kind
                .tab_catalog()
                .iter()
                .find(|descriptor| descriptor.key == tab)
                .map_or(tab, |descriptor| descriptor.label);
            content.lines.push(format!("No {label} recorded yet."));
        }
        for (link_kind, link_id) in &record.links {
            let label = self
                .get(*link_kind, link_id)
                .map_or_else(|| (*link_id).to_owned(), |linked| linked.name.to_owned());
            content = content.link(
                format!("{}: {label}", link_kind.label()),
                NavigationEntry::new(*link_kind, *link_id),
            );
        }
        Ok(content)
    }

    /// Renderer table backed by this catalog.
    #[must_use]
    pub fn renderer_table(self: Rc<Self>) -> RendererTable {
        RendererTable::build(|kind| {
            Box::new(CatalogRenderer {
                catalog: Rc::clone(&self),
                kind,
            }) as Box<dyn ContentRenderer>
        })
    }
}

struct CatalogRenderer {
    catalog: Rc<DemoCatalog>,
    kind: EntityKind,
}

impl ContentRenderer for CatalogRenderer {
    fn render(&self, id: &str, tab: &str) -> Result<RenderedContent, ContentError> {
        self.catalog.render(self.kind, id, tab)
    }
}
