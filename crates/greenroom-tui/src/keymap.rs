//! Scoped keybindings for the overlay shell.
//!
//! Resolution walks scopes in precedence order: overlay bindings shadow list
//! bindings while an overlay is shown, and global bindings apply everywhere.

use std::collections::HashMap;

use greenroom_tui_adapter::input::{Key, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyScope {
    Global,
    /// The entity list behind the overlay.
    List,
    /// The drill-down overlay, active only while it is shown.
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyToken {
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub token: KeyToken,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyChord {
    #[must_use]
    pub const fn plain(token: KeyToken) -> Self {
        Self {
            token,
            shift: false,
            ctrl: false,
            alt: false,
        }
    }

    #[must_use]
    pub const fn ctrl_char(ch: char) -> Self {
        Self {
            token: KeyToken::Char(ch),
            shift: false,
            ctrl: true,
            alt: false,
        }
    }

    #[must_use]
    pub const fn alt(token: KeyToken) -> Self {
        Self {
            token,
            shift: false,
            ctrl: false,
            alt: true,
        }
    }

    #[must_use]
    pub const fn shift_tab() -> Self {
        Self {
            token: KeyToken::Tab,
            shift: true,
            ctrl: false,
            alt: false,
        }
    }

    /// Normalize an input event. `BackTab` becomes Shift+Tab; shift is
    /// dropped for characters since the glyph already encodes it.
    #[must_use]
    pub fn from_event(event: KeyEvent) -> Self {
        let (token, shift) = match event.key {
            Key::Char(ch) => (KeyToken::Char(ch), false),
            Key::Enter => (KeyToken::Enter, event.modifiers.shift),
            Key::Escape => (KeyToken::Escape, event.modifiers.shift),
            Key::Tab => (KeyToken::Tab, event.modifiers.shift),
            Key::BackTab => (KeyToken::Tab, true),
            Key::Backspace => (KeyToken::Backspace, event.modifiers.shift),
            Key::Up => (KeyToken::Up, event.modifiers.shift),
            Key::Down => (KeyToken::Down, event.modifiers.shift),
            Key::Left => (KeyToken::Left, event.modifiers.shift),
            Key::Right => (KeyToken::Right, event.modifiers.shift),
        };
        Self {
            token,
            shift,
            ctrl: event.modifiers.ctrl,
            alt: event.modifiers.alt,
        }
    }

    #[must_use]
    pub fn display(self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl".to_owned());
        }
        if self.alt {
            parts.push("Alt".to_owned());
        }
        if self.shift {
            parts.push("Shift".to_owned());
        }
        let key = match self.token {
            KeyToken::Char(ch) if self.ctrl => ch.to_ascii_uppercase().to_string(),
            KeyToken::Char(ch) => ch.to_string(),
            KeyToken::Enter => "Enter".to_owned(),
            KeyToken::Escape => "Esc".to_owned(),
            KeyToken::Tab => "Tab".to_owned(),
            KeyToken::Backspace => "Backspace".to_owned(),
            KeyToken::Up => "Up".to_owned(),
            KeyToken::Down => "Down".to_owned(),
            KeyToken::Left => "Left".to_owned(),
            KeyToken::Right => "Right".to_owned(),
        };
        parts.push(key);
        parts.join("+")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayCommand {
    Quit,
    Back,
    Forward,
    Close,
    NextTab,
    PrevTab,
    /// Select a tab by 0-based position.
    SelectTab(usize),
    LinkNext,
    LinkPrev,
    OpenLink,
    ListNext,
    ListPrev,
    OpenListSelection,
    Grow,
    Shrink,
    CycleFocus,
    ToggleAssistant,
}

impl OverlayCommand {
    /// Commands that act on the drill-down overlay itself; the overlay claims
    /// focus when one of these reaches it.
    #[must_use]
    pub fn targets_overlay(self) -> bool {
        matches!(
            self,
            Self::Back
                | Self::Forward
                | Self::Close
                | Self::NextTab
                | Self::PrevTab
                | Self::SelectTab(_)
                | Self::LinkNext
                | Self::LinkPrev
                | Self::OpenLink
                | Self::Grow
                | Self::Shrink
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub scope: KeyScope,
    pub chord: KeyChord,
    pub command: OverlayCommand,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyConflict {
    pub scope: KeyScope,
    pub chord: KeyChord,
    pub commands: Vec<OverlayCommand>,
}

#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<KeyBinding>,
}

impl Keymap {
    #[must_use]
    pub fn new(bindings: Vec<KeyBinding>) -> Self {
        Self { bindings }
    }

    #[must_use]
    pub fn default_greenroom() -> Self {
        use KeyScope as Scope;
        use KeyToken as Tok;
        use OverlayCommand as Cmd;

        let mut bindings = vec![
            bind(Scope::Global, KeyChord::ctrl_char('c'), Cmd::Quit, "quit"),
            bind(Scope::Global, KeyChord::plain(Tok::Char('q')), Cmd::Quit, "quit"),
            bind(Scope::Global, KeyChord::ctrl_char('o'), Cmd::CycleFocus, "cycle focus"),
            bind(
                Scope::Global,
                KeyChord::plain(Tok::Char('a')),
                Cmd::ToggleAssistant,
                "assistant",
            ),
            bind(Scope::List, KeyChord::plain(Tok::Down), Cmd::ListNext, "next row"),
            bind(Scope::List, KeyChord::plain(Tok::Up), Cmd::ListPrev, "previous row"),
            bind(Scope::List, KeyChord::plain(Tok::Char('j')), Cmd::ListNext, "next row"),
            bind(Scope::List, KeyChord::plain(Tok::Char('k')), Cmd::ListPrev, "previous row"),
            bind(
                Scope::List,
                KeyChord::plain(Tok::Enter),
                Cmd::OpenListSelection,
                "open row",
            ),
            bind(
                Scope::List,
                KeyChord::plain(Tok::Char('o')),
                Cmd::OpenListSelection,
                "open row",
            ),
            bind(Scope::Overlay, KeyChord::plain(Tok::Char('[')), Cmd::Back, "back"),
            bind(Scope::Overlay, KeyChord::alt(Tok::Left), Cmd::Back, "back"),
            bind(Scope::Overlay, KeyChord::plain(Tok::Char(']')), Cmd::Forward, "forward"),
            bind(Scope::Overlay, KeyChord::alt(Tok::Right), Cmd::Forward, "forward"),
            bind(Scope::Overlay, KeyChord::plain(Tok::Escape), Cmd::Close, "close"),
            bind(Scope::Overlay, KeyChord::plain(Tok::Tab), Cmd::NextTab, "next tab"),
            bind(Scope::Overlay, KeyChord::shift_tab(), Cmd::PrevTab, "previous tab"),
            bind(Scope::Overlay, KeyChord::plain(Tok::Char('j')), Cmd::LinkNext, "next link"),
            bind(Scope::Overlay, KeyChord::plain(Tok::Char('k')), Cmd::LinkPrev, "previous link"),
            bind(Scope::Overlay, KeyChord::plain(Tok::Enter), Cmd::OpenLink, "open link"),
            bind(Scope::Overlay, KeyChord::plain(Tok::Char('+')), Cmd::Grow, "wider"),
            bind(Scope::Overlay, KeyChord::plain(Tok::Char('-')), Cmd::Shrink, "narrower"),
        ];
        for (index, digit) in ('1'..='9').enumerate() {
            bindings.push(bind(
                Scope::Overlay,
                KeyChord::plain(Tok::Char(digit)),
                Cmd::SelectTab(index),
                "select tab",
            ));
        }
        Self { bindings }
    }

    #[must_use]
    pub fn resolve(&self, scopes: &[KeyScope], chord: KeyChord) -> Option<OverlayCommand> {
        for scope in scopes {
            if let Some(binding) = self
                .bindings
                .iter()
                .find(|binding| binding.scope == *scope && binding.chord == chord)
            {
                return Some(binding.command);
            }
        }
        None
    }

    /// Resolve with the scope stack implied by whether an overlay is shown.
    #[must_use]
    pub fn resolve_event(&self, overlay_shown: bool, event: KeyEvent) -> Option<OverlayCommand> {
        let scopes: &[KeyScope] = if overlay_shown {
            &[KeyScope::Overlay, KeyScope::List, KeyScope::Global]
        } else {
            &[KeyScope::List, KeyScope::Global]
        };
        self.resolve(scopes, KeyChord::from_event(event))
    }

    #[must_use]
    pub fn conflicts(&self) -> Vec<KeyConflict> {
        let mut by_scope_chord: HashMap<(KeyScope, KeyChord), Vec<OverlayCommand>> =
            HashMap::new();
        for binding in &self.bindings {
            by_scope_chord
                .entry((binding.scope, binding.chord))
                .or_default()
                .push(binding.command);
        }
        let mut conflicts: Vec<KeyConflict> = by_scope_chord
            .into_iter()
            .filter(|(_, commands)| commands.len() > 1)
            .map(|((scope, chord), commands)| KeyConflict {
                scope,
                chord,
                commands,
            })
            .collect();
        conflicts.sort_by(|a, b| {
            format!("{:?}", a.scope)
                .cmp(&format!("{:?}", b.scope))
                .then(a.chord.display().cmp(&b.chord.display()))
        });
        conflicts
    }

    /// One-line key hints for a scope, first binding per command.
    #[must_use]
    pub fn hint_line(&self, scope: KeyScope, width: usize) -> String {
        let mut seen: Vec<&'static str> = Vec::new();
        let mut parts = Vec::new();
        for binding in self.bindings.iter().filter(|binding| binding.scope == scope) {
            if seen.contains(&binding.description) {
                continue;
            }
            seen.push(binding.description);
            parts.push(format!("{} {}", binding.chord.display(), binding.description));
        }
        parts.join("  ").chars().take(width).collect()
    }
}

fn bind(
    scope: KeyScope,
    chord: KeyChord,
    command: OverlayCommand,
    description: &'static str,
) -> KeyBinding {
    KeyBinding {
        scope,
        chord,
        command,
        description,
    }
}
