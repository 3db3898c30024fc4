//! Session-local drill-down history with browser-style back/forward.
//!
//! Invariants:
//! - `cursor` is `Some(i)` with `i < entries.len()` while an overlay is shown,
//!   `None` while nothing is shown.
//! - `open` truncates everything after the cursor before appending; with no
//!   cursor that is the whole history, so reopening after a close starts a
//!   fresh branch.
//!
//! Every operation is total; boundary calls are silent no-ops.

use serde::Serialize;

use crate::nav_entry::NavigationEntry;

/// What an `open` call ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The entry was appended and is now current.
    Opened,
    /// The entry was already current, so the overlay was closed instead.
    ToggledClosed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistoryStack {
    entries: Vec<NavigationEntry>,
    cursor: Option<usize>,
}

impl HistoryStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `entry`, or close if it is already the one shown.
    pub fn open(&mut self, entry: NavigationEntry) -> OpenOutcome {
        if self.current().is_some_and(|shown| shown.same_overlay(&entry)) {
            tracing::debug!(entry = %entry, "open on shown entry toggles closed");
            self.close();
            return OpenOutcome::ToggledClosed;
        }

        let keep = self.cursor.map_or(0, |cursor| cursor + 1);
        self.entries.truncate(keep);
        self.entries.push(entry);
        let cursor = self.entries.len() - 1;
        self.cursor = Some(cursor);
        tracing::debug!(
            entry = %self.entries[cursor],
            cursor,
            len = self.entries.len(),
            "history open"
        );
        OpenOutcome::Opened
    }

    /// Hide the overlay. Entries stay until the next `open` truncates them.
    pub fn close(&mut self) {
        if self.cursor.take().is_some() {
            tracing::debug!(len = self.entries.len(), "history close");
        }
    }

    pub fn back(&mut self) {
        if let Some(cursor) = self.cursor.filter(|cursor| *cursor > 0) {
            self.cursor = Some(cursor - 1);
            tracing::debug!(cursor = cursor - 1, "history back");
        }
    }

    pub fn forward(&mut self) {
        if self.can_forward() {
            let next = self.cursor.map_or(0, |cursor| cursor + 1);
            self.cursor = Some(next);
            tracing::debug!(cursor = next, "history forward");
        }
    }

    #[must_use]
    pub fn can_back(&self) -> bool {
        self.cursor.is_some_and(|cursor| cursor > 0)
    }

    #[must_use]
    pub fn can_forward(&self) -> bool {
        self.cursor
            .is_some_and(|cursor| cursor + 1 < self.entries.len())
    }

    #[must_use]
    pub fn current(&self) -> Option<&NavigationEntry> {
        self.cursor.and_then(|cursor| self.entries.get(cursor))
    }

    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub fn entries(&self) -> &[NavigationEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_showing(&self) -> bool {
        self.cursor.is_some()
    }
}
