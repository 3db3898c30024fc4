//! greenroom-tui: stacked drill-down overlays for the Greenroom roster.
//!
//! The navigation core (history, tab memory, focus registry, frame) is total
//! and never fails; the shell wires it to renderers, input and drawing.

use greenroom_tui_adapter::style::{ThemeKind, ThemeSpec};

pub mod busy;
pub mod cli;
pub mod demo;
pub mod entity_list;
pub mod focus_registry;
pub mod history_stack;
pub mod interactive_runtime;
pub mod keymap;
pub mod logging;
pub mod nav_entry;
pub mod overlay_frame;
pub mod overlay_layout;
pub mod presentation;
pub mod script;
pub mod shell;
pub mod surface;
pub mod tab_memory;

pub use focus_registry::{FocusRegistry, OverlayHandle};
pub use history_stack::{HistoryStack, OpenOutcome};
pub use nav_entry::{EntryExtra, NavigationEntry, OverlayKey};
pub use shell::{OverlayShell, ShellSnapshot};
pub use tab_memory::TabMemory;

#[must_use]
pub fn crate_label() -> &'static str {
    "greenroom-tui"
}

#[must_use]
pub fn default_theme() -> ThemeSpec {
    ThemeSpec::for_kind(ThemeKind::Dark)
}
