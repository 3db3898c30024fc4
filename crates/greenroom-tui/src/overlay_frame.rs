//! Tabbed overlay container.
//!
//! A frame is built per mounted overlay. It owns no navigation state: tab
//! selection goes through [`TabMemory`] under the frame's key and the
//! back/close/forward controls act on the [`HistoryStack`] directly. The busy
//! flag only changes rendering and blocks content interaction; history
//! controls stay live.

use greenroom_core::entity::TabDescriptor;
use greenroom_tui_adapter::render::{Rect, RenderFrame, TextRole};
use greenroom_tui_adapter::widgets::BorderStyle;

use crate::history_stack::HistoryStack;
use crate::nav_entry::{NavigationEntry, OverlayKey};
use crate::presentation::RenderedContent;
use crate::tab_memory::TabMemory;

/// Header rows above content: controls, tab strip, rule.
const HEADER_ROWS: usize = 3;
const CONTROL_GAP: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavControl {
    Back,
    Close,
    Forward,
}

impl NavControl {
    fn label(self) -> &'static str {
        match self {
            Self::Back => "← back",
            Self::Close => "× close",
            Self::Forward => "forward →",
        }
    }
}

/// Enabled state of the nav controls, derived from history bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavControls {
    pub back: bool,
    pub close: bool,
    pub forward: bool,
}

impl NavControls {
    #[must_use]
    pub fn from_history(history: &HistoryStack) -> Self {
        Self {
            back: history.can_back(),
            close: history.is_showing(),
            forward: history.can_forward(),
        }
    }

    #[must_use]
    pub fn is_enabled(self, control: NavControl) -> bool {
        match control {
            NavControl::Back => self.back,
            NavControl::Close => self.close,
            NavControl::Forward => self.forward,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayFrame {
    key: OverlayKey,
    title: String,
    tabs: Vec<TabDescriptor>,
    default_tab: String,
    busy: bool,
}

impl OverlayFrame {
    #[must_use]
    pub fn new(key: OverlayKey, title: impl Into<String>, tabs: Vec<TabDescriptor>) -> Self {
        let default_tab = tabs
            .first()
            .map(|tab| tab.key.to_owned())
            .unwrap_or_default();
        Self {
            key,
            title: title.into(),
            tabs,
            default_tab,
            busy: false,
        }
    }

    /// Frame for an entity entry using its kind's tab catalog. `None` for
    /// entries without a kind.
    #[must_use]
    pub fn for_entry(entry: &NavigationEntry) -> Option<Self> {
        let kind = entry.kind?;
        let title = format!("{} {}", kind.label(), entry.id);
        Some(
            Self::new(entry.key(), title, kind.tab_catalog().to_vec())
                .with_default_tab(kind.default_tab()),
        )
    }

    #[must_use]
    pub fn with_default_tab(mut self, tab: impl Into<String>) -> Self {
        self.default_tab = tab.into();
        self
    }

    #[must_use]
    pub fn with_busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    #[must_use]
    pub fn key(&self) -> &OverlayKey {
        &self.key
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn tabs(&self) -> &[TabDescriptor] {
        &self.tabs
    }

    #[must_use]
    pub fn active_tab(&self, memory: &TabMemory) -> String {
        memory.get_active(&self.key, &self.default_tab).to_owned()
    }

    fn active_index(&self, memory: &TabMemory) -> usize {
        let active = self.active_tab(memory);
        self.tabs
            .iter()
            .position(|tab| tab.key == active)
            .unwrap_or(0)
    }

    /// Activate `tab`. Returns false when busy or when the tab is not offered.
    pub fn activate_tab(&self, memory: &mut TabMemory, tab: &str) -> bool {
        if self.busy {
            tracing::debug!(key = %self.key, tab, "tab change blocked while busy");
            return false;
        }
        if !self.tabs.iter().any(|descriptor| descriptor.key == tab) {
            return false;
        }
        memory.set_active(&self.key, tab);
        true
    }

    /// Activate the tab at `index` (0-based).
    pub fn activate_index(&self, memory: &mut TabMemory, index: usize) -> bool {
        match self.tabs.get(index) {
            Some(tab) => self.activate_tab(memory, tab.key),
            None => false,
        }
    }

    pub fn next_tab(&self, memory: &mut TabMemory) -> bool {
        self.step_tab(memory, 1)
    }

    pub fn prev_tab(&self, memory: &mut TabMemory) -> bool {
        let back = self.tabs.len().saturating_sub(1);
        self.step_tab(memory, back)
    }

    fn step_tab(&self, memory: &mut TabMemory, step: usize) -> bool {
        if self.tabs.is_empty() {
            return false;
        }
        let next = (self.active_index(memory) + step) % self.tabs.len();
        self.activate_index(memory, next)
    }

    /// Run a nav control against history. Disabled controls are no-ops.
    pub fn apply_control(&self, history: &mut HistoryStack, control: NavControl) {
        if !NavControls::from_history(history).is_enabled(control) {
            return;
        }
        match control {
            NavControl::Back => history.back(),
            NavControl::Close => history.close(),
            NavControl::Forward => history.forward(),
        }
    }

    /// Draw the frame into `area`. `selected_link` highlights one of the
    /// content's links.
    pub fn render(
        &self,
        frame: &mut RenderFrame,
        area: Rect,
        memory: &TabMemory,
        history: &HistoryStack,
        content: Option<&RenderedContent>,
        selected_link: Option<usize>,
    ) {
        if area.is_empty() {
            return;
        }
        let title = content
            .and_then(|content| content.title.as_deref())
            .unwrap_or(self.title.as_str());
        let inner = frame.draw_panel(area, title, BorderStyle::Rounded, TextRole::Accent);
        if inner.is_empty() {
            return;
        }

        self.render_controls(frame, inner, NavControls::from_history(history));
        self.render_tab_strip(frame, inner, memory);
        frame.draw_horizontal_rule(inner, 2);

        let (_, body) = inner.split_vertical(HEADER_ROWS);
        if let Some(content) = content {
            render_body(frame, body, content, selected_link);
        }
        if self.busy {
            frame.dim_rect(body);
        }
    }

    fn render_controls(&self, frame: &mut RenderFrame, inner: Rect, controls: NavControls) {
        let mut x = 0;
        for control in [NavControl::Back, NavControl::Close, NavControl::Forward] {
            let role = if controls.is_enabled(control) {
                TextRole::Accent
            } else {
                TextRole::Muted
            };
            let label = control.label();
            frame.draw_text_in_rect(inner, x, 0, label, role);
            x += label.chars().count() + CONTROL_GAP;
        }
        if self.busy {
            let badge = "working…";
            let width = badge.chars().count();
            if inner.width > x + width {
                frame.draw_text_in_rect(inner, inner.width - width, 0, badge, TextRole::Warning);
            }
        }
    }

    fn render_tab_strip(&self, frame: &mut RenderFrame, inner: Rect, memory: &TabMemory) {
        let active = self.active_index(memory);
        let mut x = 0;
        for (index, tab) in self.tabs.iter().enumerate() {
            if index > 0 {
                frame.draw_text_in_rect(inner, x, 1, " │ ", TextRole::Muted);
                x += 3;
            }
            let role = if index == active {
                TextRole::Focus
            } else {
                TextRole::Primary
            };
            frame.draw_text_in_rect(inner, x, 1, tab.label, role);
            x += tab.label.chars().count();
        }
    }
}

fn render_body(
    frame: &mut RenderFrame,
    body: Rect,
    content: &RenderedContent,
    selected_link: Option<usize>,
) {
    if body.is_empty() {
        return;
    }
    let mut rows: Vec<(String, TextRole)> = content
        .lines
        .iter()
        .map(|line| (line.clone(), TextRole::Primary))
        .collect();
    let mut selected_row = None;
    if !content.links.is_empty() {
        rows.push((String::new(), TextRole::Primary));
        for (index, link) in content.links.iter().enumerate() {
            if selected_link == Some(index) {
                selected_row = Some(rows.len());
                rows.push((format!("▸ {}", link.label), TextRole::Focus));
            } else {
                rows.push((format!("  {}", link.label), TextRole::Accent));
            }
        }
    }

    let scroll = selected_row.map_or(0, |row| (row + 1).saturating_sub(body.height));
    for (offset, (text, role)) in rows.iter().skip(scroll).take(body.height).enumerate() {
        frame.draw_text_in_rect(body, 1, offset, text, *role);
    }
}

#[cfg(test)]
mod tests {
    use greenroom_core::entity::{EntityKind, TabDescriptor};
    use greenroom_tui_adapter::render::{FrameSize, Rect, RenderFrame};
    use greenroom_tui_adapter::snapshot::{assert_render_frame_snapshot, assert_row_contains};
    use greenroom_tui_adapter::style::ThemeSpec;

    use super::{NavControl, NavControls, OverlayFrame};
    use crate::history_stack::HistoryStack;
    use crate::nav_entry::{NavigationEntry, OverlayKey};
    use crate::presentation::RenderedContent;
    use crate::tab_memory::TabMemory;

    fn small_frame() -> OverlayFrame {
        OverlayFrame::new(
            OverlayKey::from("creative:1"),
            "Ada",
            vec![
                TabDescriptor { key: "profile", label: "Profile" },
                TabDescriptor { key: "subs", label: "Subs" },
            ],
        )
    }

    #[test]
    fn initial_tab_comes_from_memory_or_default() {
        let frame = small_frame();
        let mut memory = TabMemory::new();
        assert_eq!(frame.active_tab(&memory), "profile");
        memory.set_active(&"creative:1".into(), "subs");
        assert_eq!(frame.active_tab(&memory), "subs");
    }

    #[test]
    fn activation_writes_memory_under_frame_key() {
        let frame = small_frame();
        let mut memory = TabMemory::new();
        assert!(frame.activate_tab(&mut memory, "subs"));
        assert_eq!(memory.get_active(&"creative:1".into(), "x"), "subs");
        assert_eq!(memory.get_active(&"creative:2".into(), "profile"), "profile");
    }

    #[test]
    fn unknown_tab_is_rejected() {
        let frame = small_frame();
        let mut memory = TabMemory::new();
        assert!(!frame.activate_tab(&mut memory, "notes"));
        assert!(memory.is_empty());
    }

    #[test]
    fn tab_cycling_wraps() {
        let frame = small_frame();
        let mut memory = TabMemory::new();
        frame.next_tab(&mut memory);
        assert_eq!(frame.active_tab(&memory), "subs");
        frame.next_tab(&mut memory);
        assert_eq!(frame.active_tab(&memory), "profile");
        frame.prev_tab(&mut memory);
        assert_eq!(frame.active_tab(&memory), "subs");
    }

    #[test]
    fn busy_blocks_tab_changes_but_not_history_controls() {
        let frame = small_frame().with_busy(true);
        let mut memory = TabMemory::new();
        assert!(!frame.activate_tab(&mut memory, "subs"));
        assert!(memory.is_empty());

        let mut history = HistoryStack::new();
        history.open(NavigationEntry::new(EntityKind::Creative, "1"));
        history.open(NavigationEntry::new(EntityKind::Project, "2"));
        frame.apply_control(&mut history, NavControl::Back);
        assert_eq!(history.cursor(), Some(0));
        frame.apply_control(&mut history, NavControl::Close);
        assert!(!history.is_showing());
    }

    #[test]
    fn controls_track_history_bounds() {
        let mut history = HistoryStack::new();
        let hidden = NavControls::from_history(&history);
        assert!(!hidden.back && !hidden.close && !hidden.forward);

        history.open(NavigationEntry::new(EntityKind::Creative, "1"));
        history.open(NavigationEntry::new(EntityKind::Creative, "2"));
        history.back();
        let controls = NavControls::from_history(&history);
        assert!(!controls.back);
        assert!(controls.close);
        assert!(controls.forward);
    }

    #[test]
    fn entity_frames_use_kind_catalog() {
        let entry = NavigationEntry::new(EntityKind::Submission, "4");
        let frame = OverlayFrame::for_entry(&entry);
        assert!(frame.as_ref().is_some_and(|frame| frame.tabs().len() == 3));
        assert!(frame.is_some_and(|frame| frame.title() == "Submission 4"));
        assert!(OverlayFrame::for_entry(&NavigationEntry::from_raw("?", "1")).is_none());
    }

    #[test]
    fn render_snapshot_with_links() {
        let frame = small_frame();
        let memory = TabMemory::new();
        let mut history = HistoryStack::new();
        history.open(NavigationEntry::new(EntityKind::Creative, "1"));
        let content = RenderedContent::default()
            .line("Writer")
            .link("Project 7", NavigationEntry::new(EntityKind::Project, "7"));

        let mut out = RenderFrame::new(FrameSize { width: 30, height: 9 }, ThemeSpec::default());
        let area = out.area();
        frame.render(&mut out, area, &memory, &history, Some(&content), Some(0));
        assert_render_frame_snapshot(
            "overlay_frame_links",
            &out,
            "╭ Ada ───────────────────────╮\n\
             │← back   × close   forward →│\n\
             │Profile │ Subs              │\n\
             │────────────────────────────│\n\
             │ Writer                     │\n\
             │                            │\n\
             │ ▸ Project 7                │\n\
             │                            │\n\
             ╰────────────────────────────╯",
        );
    }

    #[test]
    fn busy_render_dims_content_and_shows_badge() {
        let frame = small_frame().with_busy(true);
        let memory = TabMemory::new();
        let mut history = HistoryStack::new();
        history.open(NavigationEntry::new(EntityKind::Creative, "1"));
        let content = RenderedContent::default().line("Writer");

        let mut out = RenderFrame::new(FrameSize { width: 48, height: 8 }, ThemeSpec::default());
        frame.render(&mut out, Rect::new(0, 0, 48, 8), &memory, &history, Some(&content), None);
        assert_row_contains("busy_badge", &out, 1, "working…");
        assert_row_contains("busy_content", &out, 4, "Writer");
        assert!(out.cell(2, 4).is_some_and(|cell| cell.style.dim));
        assert!(out.cell(10, 1).is_some_and(|cell| !cell.style.dim));
    }
}
