//! The browsable list behind the overlay. Activating a row calls `open`.

use greenroom_tui_adapter::render::{Rect, RenderFrame, TextRole};
use greenroom_tui_adapter::widgets::BorderStyle;

use crate::nav_entry::NavigationEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub label: String,
    pub entry: NavigationEntry,
}

impl ListRow {
    #[must_use]
    pub fn new(label: impl Into<String>, entry: NavigationEntry) -> Self {
        Self {
            label: label.into(),
            entry,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EntityList {
    rows: Vec<ListRow>,
    selected: usize,
}

impl EntityList {
    #[must_use]
    pub fn new(rows: Vec<ListRow>) -> Self {
        Self { rows, selected: 0 }
    }

    #[must_use]
    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_entry(&self) -> Option<&NavigationEntry> {
        self.rows.get(self.selected).map(|row| &row.entry)
    }

    pub fn move_next(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    pub fn move_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Draw the list; the row matching `shown` is marked.
    pub fn render(&self, frame: &mut RenderFrame, area: Rect, shown: Option<&NavigationEntry>) {
        let inner = frame.draw_panel(area, "Roster", BorderStyle::Plain, TextRole::Muted);
        if inner.is_empty() {
            return;
        }
        let scroll = (self.selected + 1).saturating_sub(inner.height);
        for (offset, (index, row)) in self
            .rows
            .iter()
            .enumerate()
            .skip(scroll)
            .take(inner.height)
            .enumerate()
        {
            let cursor = if index == self.selected { '▸' } else { ' ' };
            let mark = if shown == Some(&row.entry) { '●' } else { ' ' };
            let kind = row.entry.kind.map_or("?", |kind| kind.label());
            let text = format!("{cursor}{mark} {:<14} {}", kind, row.label);
            let role = if index == self.selected {
                TextRole::Focus
            } else {
                TextRole::Primary
            };
            frame.draw_text_in_rect(inner, 0, offset, &text, role);
        }
    }
}
