//! Transient surfaces that stack alongside the drill-down overlay.
//!
//! A surface is mounted by the shell with an [`crate::focus_registry::OverlayHandle`];
//! it only decides how to react to keys and what to draw. Stacking and
//! focus stay with the registry.

use greenroom_tui_adapter::input::{Key, KeyEvent};
use greenroom_tui_adapter::render::{Rect, RenderFrame, TextRole};
use greenroom_tui_adapter::widgets::BorderStyle;

/// Registry name of the built-in assistant dialog.
pub const ASSISTANT_SURFACE: &str = "assistant";

/// What a surface did with a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceReply {
    Consumed,
    /// Let the shell's keymap handle it.
    Ignored,
    /// Unmount this surface.
    Dismiss,
    /// Raise the named sibling above this surface without taking focus.
    Raise(String),
}

pub trait TransientSurface {
    fn name(&self) -> &str;
    fn title(&self) -> &str;
    fn lines(&self) -> Vec<String>;
    fn handle_key(&mut self, event: KeyEvent) -> SurfaceReply;

    /// Preferred (width, height) in cells.
    fn size_hint(&self) -> (usize, usize) {
        (52, 12)
    }
}

/// Draw `surface` centered on `screen`. Focused surfaces get a heavy border.
pub fn render_surface(
    frame: &mut RenderFrame,
    screen: Rect,
    surface: &dyn TransientSurface,
    focused: bool,
) {
    let (width, height) = surface.size_hint();
    let area = screen.centered(width, height);
    let (border, role) = if focused {
        (BorderStyle::Heavy, TextRole::Focus)
    } else {
        (BorderStyle::Plain, TextRole::Muted)
    };
    let inner = frame.draw_panel(area, surface.title(), border, role);
    let lines = surface.lines();
    let skip = lines.len().saturating_sub(inner.height);
    for (row, line) in lines.iter().skip(skip).enumerate() {
        frame.draw_text_in_rect(inner, 1, row, line, TextRole::Primary);
    }
}

/// Prompt-and-reply dialog that coexists with the entity overlay.
///
/// Replies are canned; the dialog exists to exercise stacking, not to talk
/// to a model.
#[derive(Debug, Clone, Default)]
pub struct AssistantDialog {
    prompt: String,
    transcript: Vec<String>,
    /// Surface raised by Ctrl+R.
    raise_target: Option<String>,
}

impl AssistantDialog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Let Ctrl+R raise `name` above the dialog.
    #[must_use]
    pub fn with_raise_target(mut self, name: impl Into<String>) -> Self {
        self.raise_target = Some(name.into());
        self
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    fn submit(&mut self) {
        let prompt = self.prompt.trim().to_owned();
        self.prompt.clear();
        if prompt.is_empty() {
            return;
        }
        tracing::debug!(len = prompt.len(), "assistant prompt submitted");
        self.transcript.push(format!("you: {prompt}"));
        self.transcript
            .push(format!("assistant: noted \"{prompt}\" for the team"));
    }
}

impl TransientSurface for AssistantDialog {
    fn name(&self) -> &str {
        ASSISTANT_SURFACE
    }

    fn title(&self) -> &str {
        "Assistant"
    }

    fn lines(&self) -> Vec<String> {
        let mut lines = self.transcript.clone();
        lines.push(format!("> {}_", self.prompt));
        lines
    }

    fn handle_key(&mut self, event: KeyEvent) -> SurfaceReply {
        let mods = event.modifiers;
        if mods.ctrl {
            return match (event.key, &self.raise_target) {
                (Key::Char('r'), Some(target)) => SurfaceReply::Raise(target.clone()),
                _ => SurfaceReply::Ignored,
            };
        }
        if mods.alt {
            return SurfaceReply::Ignored;
        }
        match event.key {
            Key::Escape => SurfaceReply::Dismiss,
            Key::Enter => {
                self.submit();
                SurfaceReply::Consumed
            }
            Key::Backspace => {
                self.prompt.pop();
                SurfaceReply::Consumed
            }
            Key::Char(ch) => {
                self.prompt.push(ch);
                SurfaceReply::Consumed
            }
            _ => SurfaceReply::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use greenroom_tui_adapter::input::{Key, KeyEvent};
    use greenroom_tui_adapter::render::{FrameSize, RenderFrame};
    use greenroom_tui_adapter::snapshot::assert_row_contains;
    use greenroom_tui_adapter::style::ThemeSpec;

    use super::{render_surface, AssistantDialog, SurfaceReply, TransientSurface};

    fn type_text(dialog: &mut AssistantDialog, text: &str) {
        for ch in text.chars() {
            assert_eq!(
                dialog.handle_key(KeyEvent::plain(Key::Char(ch))),
                SurfaceReply::Consumed
            );
        }
    }

    #[test]
    fn typing_and_submit_build_transcript() {
        let mut dialog = AssistantDialog::new();
        type_text(&mut dialog, "pitch Ada");
        dialog.handle_key(KeyEvent::plain(Key::Backspace));
        assert_eq!(dialog.prompt(), "pitch Ad");
        dialog.handle_key(KeyEvent::plain(Key::Enter));
        assert_eq!(dialog.prompt(), "");
        assert_eq!(dialog.transcript().len(), 2);
        assert_eq!(dialog.transcript()[0], "you: pitch Ad");
    }

    #[test]
    fn empty_submit_adds_nothing() {
        let mut dialog = AssistantDialog::new();
        dialog.handle_key(KeyEvent::plain(Key::Enter));
        assert!(dialog.transcript().is_empty());
    }

    #[test]
    fn escape_dismisses_and_navigation_keys_pass_through() {
        let mut dialog = AssistantDialog::new();
        assert_eq!(
            dialog.handle_key(KeyEvent::plain(Key::Escape)),
            SurfaceReply::Dismiss
        );
        assert_eq!(
            dialog.handle_key(KeyEvent::plain(Key::Tab)),
            SurfaceReply::Ignored
        );
        assert_eq!(dialog.handle_key(KeyEvent::ctrl('o')), SurfaceReply::Ignored);
        assert_eq!(
            dialog.handle_key(KeyEvent::alt(Key::Left)),
            SurfaceReply::Ignored
        );
    }

    #[test]
    fn ctrl_r_raises_configured_sibling() {
        let mut plain = AssistantDialog::new();
        assert_eq!(plain.handle_key(KeyEvent::ctrl('r')), SurfaceReply::Ignored);

        let mut dialog = AssistantDialog::new().with_raise_target("detail");
        assert_eq!(
            dialog.handle_key(KeyEvent::ctrl('r')),
            SurfaceReply::Raise("detail".into())
        );
    }

    #[test]
    fn renders_prompt_inside_centered_panel() {
        let mut dialog = AssistantDialog::new();
        type_text(&mut dialog, "hi");
        let mut frame = RenderFrame::new(FrameSize { width: 60, height: 14 }, ThemeSpec::default());
        let area = frame.area();
        render_surface(&mut frame, area, &dialog, true);
        assert_row_contains("assistant_title", &frame, 1, "Assistant");
        assert_row_contains("assistant_prompt", &frame, 2, "> hi_");
        assert_row_contains("assistant_border", &frame, 1, "┏");
    }
}
