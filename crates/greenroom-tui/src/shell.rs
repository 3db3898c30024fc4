//! Overlay shell: wires history, tab memory, focus registry and the renderer
//! table into one input/render loop participant.
//!
//! The shell is the only place that mutates navigation state in response to
//! input. Renderers never touch it; a failed render closes the overlay.

use std::collections::BTreeMap;

use greenroom_core::config::OverlayConfig;
use greenroom_tui_adapter::input::{InputEvent, KeyEvent};
use greenroom_tui_adapter::render::{FrameSize, Rect, RenderFrame, TextRole};
use serde::Serialize;

use crate::busy::BusyTracker;
use crate::entity_list::EntityList;
use crate::focus_registry::{FocusRegistry, OverlayHandle};
use crate::history_stack::{HistoryStack, OpenOutcome};
use crate::keymap::{KeyScope, Keymap, OverlayCommand};
use crate::nav_entry::{NavigationEntry, OverlayKey};
use crate::overlay_frame::{NavControl, OverlayFrame};
use crate::overlay_layout::{OverlayLayout, SlideTransition};
use crate::presentation::{ContentLink, RenderedContent, RendererTable};
use crate::surface::{
    render_surface, AssistantDialog, SurfaceReply, TransientSurface, ASSISTANT_SURFACE,
};
use crate::tab_memory::TabMemory;

/// Registry name of the drill-down overlay.
pub const DETAIL_OVERLAY: &str = "detail";

/// Screens shorter than this drop the nav bar's hint row.
const COMPACT_SCREEN_ROWS: usize = 12;

struct MountedSurface {
    handle: OverlayHandle,
    surface: Box<dyn TransientSurface>,
}

/// Serializable dump of navigation and focus state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellSnapshot {
    pub history: Vec<String>,
    pub cursor: Option<usize>,
    pub current: Option<String>,
    pub can_back: bool,
    pub can_forward: bool,
    pub active_tab: Option<String>,
    /// Mounted overlays, bottom to top.
    pub focus_order: Vec<String>,
    pub active_tabs: BTreeMap<String, String>,
    pub busy: bool,
    pub overlay_width: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

pub struct OverlayShell {
    history: HistoryStack,
    tabs: TabMemory,
    focus: FocusRegistry,
    renderers: RendererTable,
    keymap: Keymap,
    layout: OverlayLayout,
    nav_bar_rows: usize,
    slide: SlideTransition,
    busy: BusyTracker,
    list: EntityList,
    detail: Option<OverlayHandle>,
    shown: Option<OverlayKey>,
    content: Option<RenderedContent>,
    link_cursor: Option<usize>,
    surfaces: Vec<MountedSurface>,
    notice: Option<String>,
    quit: bool,
}

impl OverlayShell {
    #[must_use]
    pub fn new(
        config: &OverlayConfig,
        focus: FocusRegistry,
        renderers: RendererTable,
        list: EntityList,
    ) -> Self {
        Self {
            history: HistoryStack::new(),
            tabs: TabMemory::new(),
            focus,
            renderers,
            keymap: Keymap::default_greenroom(),
            layout: OverlayLayout::from_config(config),
            nav_bar_rows: config.nav_bar_height,
            slide: SlideTransition::from_config(config),
            busy: BusyTracker::new(),
            list,
            detail: None,
            shown: None,
            content: None,
            link_cursor: None,
            surfaces: Vec::new(),
            notice: None,
            quit: false,
        }
    }

    // -- navigation ----------------------------------------------------------

    /// Open `entry`, or close the overlay if it is the one shown. An
    /// `initial_tab` hint is stored before content loads unless busy.
    /// A newly opened entry brings the detail overlay to the front.
    pub fn open(&mut self, entry: NavigationEntry) -> OpenOutcome {
        self.notice = None;
        let busy = self.busy.is_busy();
        let frame = OverlayFrame::for_entry(&entry).map(|frame| frame.with_busy(busy));
        let initial_tab = entry.extra.initial_tab.clone();
        let outcome = self.history.open(entry);
        if outcome == OpenOutcome::Opened {
            if let (Some(frame), Some(tab)) = (frame, initial_tab) {
                if !frame.activate_tab(&mut self.tabs, &tab) {
                    tracing::debug!(key = %frame.key(), tab = %tab, "initial tab hint ignored");
                }
            }
        }
        self.sync_after_navigation();
        if outcome == OpenOutcome::Opened {
            if let Some(detail) = &self.detail {
                detail.focus();
            }
        }
        outcome
    }

    pub fn close(&mut self) {
        self.apply_control(NavControl::Close);
    }

    pub fn back(&mut self) {
        self.apply_control(NavControl::Back);
    }

    pub fn forward(&mut self) {
        self.apply_control(NavControl::Forward);
    }

    fn apply_control(&mut self, control: NavControl) {
        match self.history.current().and_then(OverlayFrame::for_entry) {
            Some(frame) => frame.apply_control(&mut self.history, control),
            None => match control {
                NavControl::Back => self.history.back(),
                NavControl::Close => self.history.close(),
                NavControl::Forward => self.history.forward(),
            },
        }
        self.sync_after_navigation();
    }

    fn sync_after_navigation(&mut self) {
        let Some(entry) = self.history.current().cloned() else {
            self.unmount_detail();
            return;
        };
        let key = entry.key();
        if self.shown.as_ref() != Some(&key) {
            self.shown = Some(key);
            self.link_cursor = None;
            self.slide.restart();
        }
        if self.detail.is_none() {
            self.detail = Some(self.focus.register(DETAIL_OVERLAY));
        }
        self.reload_content();
    }

    fn unmount_detail(&mut self) {
        self.detail = None;
        self.shown = None;
        self.content = None;
        self.link_cursor = None;
    }

    fn reload_content(&mut self) {
        let Some(entry) = self.history.current().cloned() else {
            return;
        };
        let tab = self.active_tab().unwrap_or_default();
        match self.renderers.dispatch(&entry, &tab) {
            None => self.content = None,
            Some(Ok(content)) => {
                let links = content.links.len();
                self.link_cursor = self.link_cursor.filter(|cursor| *cursor < links);
                self.content = Some(content);
            }
            Some(Err(err)) => {
                tracing::warn!(
                    entry = %entry,
                    tab = %tab,
                    error = %err,
                    "content renderer failed; closing overlay"
                );
                self.notice = Some(err.to_string());
                self.history.close();
                self.unmount_detail();
            }
        }
    }

    #[must_use]
    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    #[must_use]
    pub fn current_entry(&self) -> Option<&NavigationEntry> {
        self.history.current()
    }

    #[must_use]
    pub fn content(&self) -> Option<&RenderedContent> {
        self.content.as_ref()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    // -- tabs ----------------------------------------------------------------

    fn current_frame(&self) -> Option<OverlayFrame> {
        let frame = OverlayFrame::for_entry(self.history.current()?)?;
        Some(frame.with_busy(self.busy.is_busy()))
    }

    #[must_use]
    pub fn tab_memory(&self) -> &TabMemory {
        &self.tabs
    }

    #[must_use]
    pub fn active_tab(&self) -> Option<String> {
        self.current_frame().map(|frame| frame.active_tab(&self.tabs))
    }

    fn change_tab<F>(&mut self, change: F) -> bool
    where
        F: FnOnce(&OverlayFrame, &mut TabMemory) -> bool,
    {
        let Some(frame) = self.current_frame() else {
            return false;
        };
        let changed = change(&frame, &mut self.tabs);
        if changed {
            self.link_cursor = None;
            self.reload_content();
        }
        changed
    }

    pub fn select_tab(&mut self, tab: &str) -> bool {
        self.change_tab(|frame, memory| frame.activate_tab(memory, tab))
    }

    pub fn select_tab_index(&mut self, index: usize) -> bool {
        self.change_tab(|frame, memory| frame.activate_index(memory, index))
    }

    pub fn next_tab(&mut self) -> bool {
        self.change_tab(OverlayFrame::next_tab)
    }

    pub fn prev_tab(&mut self) -> bool {
        self.change_tab(OverlayFrame::prev_tab)
    }

    // -- links ---------------------------------------------------------------

    #[must_use]
    pub fn selected_link(&self) -> Option<&ContentLink> {
        let cursor = self.link_cursor?;
        self.content.as_ref()?.links.get(cursor)
    }

    /// Move the link cursor; the first move selects the first or last link.
    pub fn move_link(&mut self, forward: bool) {
        if self.busy.is_busy() {
            return;
        }
        let count = self.content.as_ref().map_or(0, |content| content.links.len());
        if count == 0 {
            self.link_cursor = None;
            return;
        }
        self.link_cursor = Some(match (self.link_cursor, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(cursor), true) => (cursor + 1).min(count - 1),
            (Some(cursor), false) => cursor.saturating_sub(1),
        });
    }

    /// Drill into the selected link. Blocked while busy.
    pub fn open_selected_link(&mut self) -> Option<OpenOutcome> {
        if self.busy.is_busy() {
            tracing::debug!("link activation blocked while busy");
            return None;
        }
        let target = self.selected_link()?.target.clone();
        Some(self.open(target))
    }

    // -- list ----------------------------------------------------------------

    #[must_use]
    pub fn list(&self) -> &EntityList {
        &self.list
    }

    pub fn open_list_selection(&mut self) -> Option<OpenOutcome> {
        let entry = self.list.selected_entry()?.clone();
        Some(self.open(entry))
    }

    // -- busy ----------------------------------------------------------------

    pub fn begin_request(&mut self) {
        self.busy.begin();
    }

    pub fn end_request(&mut self) {
        self.busy.end();
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    // -- layout --------------------------------------------------------------

    #[must_use]
    pub fn layout(&self) -> &OverlayLayout {
        &self.layout
    }

    pub fn grow_overlay(&mut self) {
        self.layout.grow();
    }

    pub fn shrink_overlay(&mut self) {
        self.layout.shrink();
    }

    /// Re-lay the nav bar for a screen of `size`; the overlay top follows it.
    pub fn fit_screen(&mut self, size: FrameSize) {
        let rows = if size.height < COMPACT_SCREEN_ROWS {
            self.nav_bar_rows.min(1)
        } else {
            self.nav_bar_rows
        };
        self.layout.set_nav_bar_height(rows);
    }

    /// Advance animations; returns whether another frame is needed.
    pub fn tick(&mut self) -> bool {
        self.slide.tick()
    }

    // -- surfaces ------------------------------------------------------------

    #[must_use]
    pub fn focus_registry(&self) -> &FocusRegistry {
        &self.focus
    }

    /// Mount a transient surface on top. Mounting a name that is already
    /// mounted focuses the existing surface instead.
    pub fn mount_surface(&mut self, surface: Box<dyn TransientSurface>) -> bool {
        let name = surface.name().to_owned();
        if let Some(mounted) = self.surfaces.iter().find(|m| m.handle.name() == name) {
            mounted.handle.focus();
            return false;
        }
        if name == DETAIL_OVERLAY {
            return false;
        }
        let handle = self.focus.register(name);
        tracing::debug!(name = handle.name(), rank = ?handle.rank(), "surface mounted");
        self.surfaces.push(MountedSurface { handle, surface });
        true
    }

    pub fn unmount_surface(&mut self, name: &str) -> bool {
        let before = self.surfaces.len();
        self.surfaces.retain(|mounted| mounted.handle.name() != name);
        before != self.surfaces.len()
    }

    #[must_use]
    pub fn is_mounted(&self, name: &str) -> bool {
        self.surfaces.iter().any(|mounted| mounted.handle.name() == name)
    }

    pub fn toggle_assistant(&mut self) {
        if !self.unmount_surface(ASSISTANT_SURFACE) {
            self.mount_surface(Box::new(
                AssistantDialog::new().with_raise_target(DETAIL_OVERLAY),
            ));
        }
    }

    /// Bring the lowest mounted overlay to the front.
    pub fn cycle_focus(&mut self) {
        let order = self.focus.paint_order();
        if order.len() > 1 {
            self.focus.bring_to_front(&order[0]);
        }
    }

    fn surface_index(&self, name: &str) -> Option<usize> {
        self.surfaces
            .iter()
            .position(|mounted| mounted.handle.name() == name)
    }

    // -- input ---------------------------------------------------------------

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Returns whether the event changed anything worth redrawing.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Resize(resize) => {
                self.fit_screen(FrameSize {
                    width: resize.width,
                    height: resize.height,
                });
                true
            }
            InputEvent::Tick => self.tick(),
        }
    }

    /// Route a key to the top-ranked surface, then to the keymap.
    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        if let Some(index) = self
            .focus
            .topmost()
            .and_then(|top| self.surface_index(&top))
        {
            match self.surfaces[index].surface.handle_key(event) {
                SurfaceReply::Consumed => return true,
                SurfaceReply::Dismiss => {
                    let name = self.surfaces[index].handle.name().to_owned();
                    self.unmount_surface(&name);
                    return true;
                }
                SurfaceReply::Raise(other) => {
                    self.surfaces[index].handle.bring_to_front(&other);
                    return true;
                }
                SurfaceReply::Ignored => {}
            }
        }

        match self.keymap.resolve_event(self.history.is_showing(), event) {
            Some(command) => {
                self.apply_command(command);
                true
            }
            None => false,
        }
    }

    pub fn apply_command(&mut self, command: OverlayCommand) {
        if command.targets_overlay() {
            if let Some(detail) = &self.detail {
                detail.focus();
            }
        }
        match command {
            OverlayCommand::Quit => self.quit = true,
            OverlayCommand::Back => self.back(),
            OverlayCommand::Forward => self.forward(),
            OverlayCommand::Close => self.close(),
            OverlayCommand::NextTab => {
                self.next_tab();
            }
            OverlayCommand::PrevTab => {
                self.prev_tab();
            }
            OverlayCommand::SelectTab(index) => {
                self.select_tab_index(index);
            }
            OverlayCommand::LinkNext => self.move_link(true),
            OverlayCommand::LinkPrev => self.move_link(false),
            OverlayCommand::OpenLink => {
                self.open_selected_link();
            }
            OverlayCommand::ListNext => self.list.move_next(),
            OverlayCommand::ListPrev => self.list.move_prev(),
            OverlayCommand::OpenListSelection => {
                self.open_list_selection();
            }
            OverlayCommand::Grow => self.grow_overlay(),
            OverlayCommand::Shrink => self.shrink_overlay(),
            OverlayCommand::CycleFocus => self.cycle_focus(),
            OverlayCommand::ToggleAssistant => self.toggle_assistant(),
        }
    }

    // -- rendering -----------------------------------------------------------

    /// Paint the nav bar, the list, then every mounted overlay in rank order.
    pub fn render(&self, frame: &mut RenderFrame) {
        let screen = frame.area();
        let (nav, body) = screen.split_vertical(self.layout.top_offset());
        self.render_nav_bar(frame, nav);
        self.list.render(frame, body, self.history.current());

        let topmost = self.focus.topmost();
        for name in self.focus.paint_order() {
            if name == DETAIL_OVERLAY {
                self.render_detail(frame, screen);
            } else if let Some(index) = self.surface_index(&name) {
                let focused = topmost.as_deref() == Some(name.as_str());
                render_surface(frame, body, self.surfaces[index].surface.as_ref(), focused);
            }
        }
    }

    fn render_detail(&self, out: &mut RenderFrame, screen: Rect) {
        let Some(frame) = self.current_frame() else {
            return;
        };
        let area = self
            .layout
            .place(screen, self.slide.offset(self.layout.width()));
        frame.render(
            out,
            area,
            &self.tabs,
            &self.history,
            self.content.as_ref(),
            self.link_cursor,
        );
    }

    fn render_nav_bar(&self, frame: &mut RenderFrame, nav: Rect) {
        if nav.is_empty() {
            return;
        }
        frame.draw_text(0, nav.y, "Greenroom", TextRole::Accent);
        let status = match (self.history.current(), &self.notice) {
            (_, Some(notice)) => (format!("! {notice}"), TextRole::Danger),
            (Some(entry), None) => (entry.key().to_string(), TextRole::Primary),
            (None, None) => ("no overlay".to_owned(), TextRole::Muted),
        };
        frame.draw_text(11, nav.y, &status.0, status.1);
        if nav.height > 1 {
            let scope = if self.history.is_showing() {
                KeyScope::Overlay
            } else {
                KeyScope::List
            };
            let hints = self.keymap.hint_line(scope, nav.width);
            frame.draw_text(0, nav.y + 1, &hints, TextRole::Muted);
        }
    }

    // -- state dump ----------------------------------------------------------

    #[must_use]
    pub fn state_snapshot(&self) -> ShellSnapshot {
        ShellSnapshot {
            history: self
                .history
                .entries()
                .iter()
                .map(|entry| entry.key().to_string())
                .collect(),
            cursor: self.history.cursor(),
            current: self.history.current().map(|entry| entry.key().to_string()),
            can_back: self.history.can_back(),
            can_forward: self.history.can_forward(),
            active_tab: self.active_tab(),
            focus_order: self.focus.paint_order(),
            active_tabs: self.tabs.to_sorted_map(),
            busy: self.busy.is_busy(),
            overlay_width: self.layout.width(),
            notice: self.notice.clone(),
        }
    }
}
