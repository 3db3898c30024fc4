//! Kind-to-renderer dispatch for the drill-down overlay.
//!
//! Renderers are the boundary to the data layer: each one receives an entity
//! id and the active tab and returns displayable content, or a
//! [`ContentError`]. The table is built once at wiring time and indexed by
//! [`EntityKind::index`]; entries without a kind render nothing.

use std::fmt;

use greenroom_core::entity::EntityKind;
use thiserror::Error;

use crate::nav_entry::NavigationEntry;

/// Failure reported by a content renderer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: String },
    #[error("content unavailable: {0}")]
    Unavailable(String),
}

/// A drill-down target shown inside rendered content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLink {
    pub label: String,
    pub target: NavigationEntry,
}

impl ContentLink {
    #[must_use]
    pub fn new(label: impl Into<String>, target: NavigationEntry) -> Self {
        Self {
            label: label.into(),
            target,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedContent {
    /// Display name of the entity; the frame falls back to `kind id`.
    pub title: Option<String>,
    pub lines: Vec<String>,
    pub links: Vec<ContentLink>,
}

impl RenderedContent {
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    #[must_use]
    pub fn link(mut self, label: impl Into<String>, target: NavigationEntry) -> Self {
        self.links.push(ContentLink::new(label, target));
        self
    }
}

pub trait ContentRenderer {
    fn render(&self, id: &str, tab: &str) -> Result<RenderedContent, ContentError>;
}

impl<F> ContentRenderer for F
where
    F: Fn(&str, &str) -> Result<RenderedContent, ContentError>,
{
    fn render(&self, id: &str, tab: &str) -> Result<RenderedContent, ContentError> {
        self(id, tab)
    }
}

/// One renderer per [`EntityKind`], fixed after construction.
pub struct RendererTable {
    renderers: Vec<Box<dyn ContentRenderer>>,
}

impl RendererTable {
    /// Build the table by asking `factory` for every kind in
    /// [`EntityKind::ALL`] order.
    pub fn build<F>(mut factory: F) -> Self
    where
        F: FnMut(EntityKind) -> Box<dyn ContentRenderer>,
    {
        Self {
            renderers: EntityKind::ALL.into_iter().map(&mut factory).collect(),
        }
    }

    #[must_use]
    pub fn renderer(&self, kind: EntityKind) -> Option<&dyn ContentRenderer> {
        self.renderers.get(kind.index()).map(Box::as_ref)
    }

    /// Render `entry` on `tab`. `None` when the entry has no kind.
    pub fn dispatch(
        &self,
        entry: &NavigationEntry,
        tab: &str,
    ) -> Option<Result<RenderedContent, ContentError>> {
        let kind = entry.kind?;
        let renderer = self.renderer(kind)?;
        Some(renderer.render(&entry.id, tab))
    }
}

impl fmt::Debug for RendererTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererTable")
            .field("kinds", &self.renderers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use greenroom_core::entity::EntityKind;

    use super::{ContentError, ContentRenderer, RenderedContent, RendererTable};
    use crate::nav_entry::NavigationEntry;

    fn echo_table() -> RendererTable {
        RendererTable::build(|kind| {
            Box::new(move |id: &str, tab: &str| -> Result<RenderedContent, ContentError> {
                Ok(RenderedContent::titled(format!("{kind}/{id}")).line(tab.to_owned()))
            }) as Box<dyn ContentRenderer>
        })
    }

    #[test]
    fn every_kind_dispatches_to_its_own_renderer() {
        let table = echo_table();
        for kind in EntityKind::ALL {
            let entry = NavigationEntry::new(kind, "7");
            let content = table.dispatch(&entry, "overview");
            let expected = format!("{}/7", kind.slug());
            assert!(matches!(
                content,
                Some(Ok(RenderedContent { title: Some(ref title), .. })) if *title == expected
            ));
        }
    }

    #[test]
    fn kindless_entry_renders_nothing() {
        let table = echo_table();
        let entry = NavigationEntry::from_raw("spaceship", "1");
        assert!(table.dispatch(&entry, "overview").is_none());
    }

    #[test]
    fn renderer_receives_active_tab() {
        let table = echo_table();
        let entry = NavigationEntry::new(EntityKind::Project, "3");
        let lines = table
            .dispatch(&entry, "needs")
            .and_then(Result::ok)
            .map(|content| content.lines)
            .unwrap_or_default();
        assert_eq!(lines, ["needs"]);
    }

    #[test]
    fn not_found_message_names_kind_and_id() {
        let err = ContentError::NotFound {
            kind: EntityKind::Submission,
            id: "12".into(),
        };
        assert_eq!(err.to_string(), "sub 12 not found");
    }
}
