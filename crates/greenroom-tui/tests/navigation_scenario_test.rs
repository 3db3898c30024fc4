#![allow(clippy::expect_used, clippy::unwrap_used)]

//! Drill-down navigation driven entirely through key input.

use std::rc::Rc;

use greenroom_core::config::OverlayConfig;
use greenroom_core::entity::EntityKind;
use greenroom_tui::demo::DemoCatalog;
use greenroom_tui::entity_list::EntityList;
use greenroom_tui::shell::{OverlayShell, DETAIL_OVERLAY};
use greenroom_tui::{FocusRegistry, NavigationEntry};
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

fn press(shell: &mut OverlayShell, key: Key) {
    shell.handle_key(KeyEvent::plain(key));
}

fn history_keys(shell: &OverlayShell) -> Vec<String> {
    shell
        .history()
        .entries()
        .iter()
        .map(|entry| entry.key().to_string())
        .collect()
}

#[test]
fn person_project_back_toggle_then_fresh_open() {
    let mut shell = shell();
    let person = NavigationEntry::new(EntityKind::Creative, "c-ada");
    let first_project = NavigationEntry::new(EntityKind::Project, "p-night");
    let second_project = NavigationEntry::new(EntityKind::Project, "p-tide");

    // Open the person from the roster.
    press(&mut shell, Key::Char('o'));
    assert_eq!(history_keys(&shell), ["creative:c-ada"]);
    assert_eq!(shell.history().cursor(), Some(0));
    assert_eq!(shell.current_entry(), Some(&person));

    // Drill into the first linked project from inside the overlay.
    press(&mut shell, Key::Char('j'));
    assert_eq!(shell.selected_link().map(|link| &link.target), Some(&first_project));
    press(&mut shell, Key::Enter);
    assert_eq!(history_keys(&shell), ["creative:c-ada", "project:p-night"]);
    assert_eq!(shell.history().cursor(), Some(1));
    assert!(shell.history().can_back());

    press(&mut shell, Key::Char('['));
    assert_eq!(shell.history().cursor(), Some(0));
    assert_eq!(shell.current_entry(), Some(&person));
    assert!(shell.history().can_forward());

    // Activating the shown person's row again toggles the overlay closed.
    press(&mut shell, Key::Char('o'));
    assert_eq!(shell.history().cursor(), None);
    assert!(shell.current_entry().is_none());
    assert_eq!(history_keys(&shell), ["creative:c-ada", "project:p-night"]);
    assert!(!shell.focus_registry().is_registered(DETAIL_OVERLAY));

    // A fresh open after closing discards everything before it.
    for _ in 0..3 {
        press(&mut shell, Key::Down);
    }
    assert_eq!(shell.list().selected_entry(), Some(&second_project));
    press(&mut shell, Key::Char('o'));
    assert_eq!(history_keys(&shell), ["project:p-tide"]);
    assert_eq!(shell.history().cursor(), Some(0));
    assert!(!shell.history().can_back());
    assert!(!shell.history().can_forward());
}

#[test]
fn forward_replays_and_truncates_on_new_open() {
    let mut shell = shell();
    press(&mut shell, Key::Char('o'));
    press(&mut shell, Key::Char('j'));
    press(&mut shell, Key::Enter);
    press(&mut shell, Key::Char('['));
    press(&mut shell, Key::Char(']'));
    assert_eq!(
        shell.current_entry(),
        Some(&NavigationEntry::new(EntityKind::Project, "p-night"))
    );

    // Back to the person, then open a different link: the project is dropped.
    press(&mut shell, Key::Char('['));
    press(&mut shell, Key::Char('k'));
    press(&mut shell, Key::Enter);
    assert_eq!(history_keys(&shell), ["creative:c-ada", "manager:m-jo"]);
    assert!(!shell.history().can_forward());
}

#[test]
fn tab_choice_survives_drilling_away_and_back() {
    let mut shell = shell();
    press(&mut shell, Key::Char('o'));
    press(&mut shell, Key::Char('3'));
    assert_eq!(shell.active_tab().as_deref(), Some("subs"));

    press(&mut shell, Key::Char('j'));
    press(&mut shell, Key::Enter);
    assert_eq!(shell.active_tab().as_deref(), Some("overview"));

    press(&mut shell, Key::Char('['));
    assert_eq!(shell.active_tab().as_deref(), Some("subs"));
    assert_eq!(
        shell.content().map(|content| content.lines.clone()),
        Some(vec!["Nightjar: pending".to_owned()])
    );
}

#[test]
fn escape_closes_and_frame_shows_list_only() {
    let mut shell = shell();
    press(&mut shell, Key::Char('o'));
    press(&mut shell, Key::Escape);
    assert!(shell.current_entry().is_none());

    let mut frame = RenderFrame::new(
        FrameSize {
            width: 100,
            height: 20,
        },
        ThemeSpec::default(),
    );
    shell.render(&mut frame);
    let text = frame.snapshot();
    assert!(text.contains("no overlay"));
    assert!(text.contains("Roster"));
    assert!(!text.contains("× close"));
}
