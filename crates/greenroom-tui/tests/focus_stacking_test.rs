#![allow(clippy::expect_used, clippy::unwrap_used)]

//! The assistant dialog coexisting with the entity overlay.

use std::rc::Rc;

use greenroom_core::config::OverlayConfig;
use greenroom_tui::demo::DemoCatalog;
use greenroom_tui::entity_list::EntityList;
use greenroom_tui::shell::{OverlayShell, DETAIL_OVERLAY};
use greenroom_tui::surface::ASSISTANT_SURFACE;
use greenroom_tui::FocusRegistry;
use greenroom_tui_adapter::input::{Key, KeyEvent};
use greenroom_tui_adapter::render::{FrameSize, RenderFrame};
use greenroom_tui_adapter::style::ThemeSpec;

fn shell() -> OverlayShell {
    let catalog = Rc::new(DemoCatalog::seeded());
    let list = EntityList::new(catalog.roster());
    let config = OverlayConfig {
        reduced_motion: true,
        ..OverlayConfig::default()
    };
    OverlayShell::new(&config, FocusRegistry::new(), catalog.renderer_table(), list)
}

fn type_text(shell: &mut OverlayShell, text: &str) {
    for ch in text.chars() {
        shell.handle_key(KeyEvent::plain(Key::Char(ch)));
    }
}

fn frame(shell: &OverlayShell) -> String {
    let mut frame = RenderFrame::new(
        FrameSize {
            width: 110,
            height: 30,
        },
        ThemeSpec::default(),
    );
    shell.render(&mut frame);
    frame.snapshot()
}

#[test]
fn assistant_takes_keys_until_focus_cycles_back() {
    let mut shell = shell();
    shell.handle_key(KeyEvent::plain(Key::Char('o')));
    shell.handle_key(KeyEvent::plain(Key::Char('a')));
    assert_eq!(
        shell.focus_registry().paint_order(),
        [DETAIL_OVERLAY, ASSISTANT_SURFACE]
    );

    // Plain characters go to the dialog, not the keymap.
    type_text(&mut shell, "q[");
    assert!(!shell.should_quit());
    assert_eq!(shell.history().cursor(), Some(0));
    shell.handle_key(KeyEvent::plain(Key::Enter));
    assert!(frame(&shell).contains("you: q["));

    shell.handle_key(KeyEvent::ctrl('o'));
    assert_eq!(shell.focus_registry().topmost().as_deref(), Some(DETAIL_OVERLAY));
    shell.handle_key(KeyEvent::plain(Key::Tab));
    assert_eq!(shell.active_tab().as_deref(), Some("projects"));

    shell.handle_key(KeyEvent::ctrl('o'));
    assert_eq!(
        shell.focus_registry().topmost().as_deref(),
        Some(ASSISTANT_SURFACE)
    );
}

#[test]
fn escape_dismisses_surface_before_closing_overlay() {
    let mut shell = shell();
    shell.handle_key(KeyEvent::plain(Key::Char('o')));
    shell.toggle_assistant();

    shell.handle_key(KeyEvent::plain(Key::Escape));
    assert!(!shell.is_mounted(ASSISTANT_SURFACE));
    assert!(shell.history().is_showing());
    assert_eq!(shell.focus_registry().paint_order(), [DETAIL_OVERLAY]);

    shell.handle_key(KeyEvent::plain(Key::Escape));
    assert!(!shell.history().is_showing());
    assert!(shell.focus_registry().is_empty());
}

#[test]
fn ranks_never_repeat_across_remounts() {
    let mut shell = shell();
    shell.toggle_assistant();
    let first = shell.focus_registry().rank(ASSISTANT_SURFACE);
    shell.toggle_assistant();
    assert_eq!(shell.focus_registry().rank(ASSISTANT_SURFACE), None);
    shell.toggle_assistant();
    let second = shell.focus_registry().rank(ASSISTANT_SURFACE);
    assert!(second > first);
}

#[test]
fn raised_overlay_paints_over_focused_dialog() {
    let mut shell = shell();
    shell.handle_key(KeyEvent::plain(Key::Char('o')));
    shell.toggle_assistant();
    shell.handle_key(KeyEvent::ctrl('r'));
    assert_eq!(
        shell.focus_registry().paint_order(),
        [ASSISTANT_SURFACE, DETAIL_OVERLAY]
    );
    // The dialog stays mounted underneath and the overlay title is visible.
    assert!(shell.is_mounted(ASSISTANT_SURFACE));
    assert!(frame(&shell).contains("Ada Park"));
}
