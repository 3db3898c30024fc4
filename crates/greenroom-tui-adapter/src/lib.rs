//! greenroom-tui-adapter: boundary layer between Greenroom UI crates and the
//! terminal.
//!
//! App crates draw into a [`render::RenderFrame`] cell buffer and consume the
//! canonical [`input::InputEvent`] model; only the runtime that owns the
//! terminal converts these to and from backend types.

/// Stable crate label used by bootstrap smoke tests.
pub fn crate_label() -> &'static str {
    "greenroom-tui-adapter"
}

/// Style and theme primitives.
pub mod style {
    /// Logical theme choices supported by the adapter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ThemeKind {
        Dark,
        Light,
        HighContrast,
    }

    impl ThemeKind {
        /// Parse a config theme name; unknown names yield `None`.
        #[must_use]
        pub fn from_name(name: &str) -> Option<Self> {
            match name.trim().to_ascii_lowercase().as_str() {
                "dark" => Some(Self::Dark),
                "light" => Some(Self::Light),
                "high-contrast" | "high_contrast" => Some(Self::HighContrast),
                _ => None,
            }
        }
    }

    /// Stable style tokens exposed to application crates.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum StyleToken {
        Background,
        Surface,
        Foreground,
        Muted,
        Accent,
        Danger,
        Warning,
        Focus,
    }

    /// Terminal 256-color indexes per token.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Palette {
        pub background: u8,
        pub surface: u8,
        pub foreground: u8,
        pub muted: u8,
        pub accent: u8,
        pub danger: u8,
        pub warning: u8,
        pub focus: u8,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ThemeSpec {
        pub kind: ThemeKind,
        pub palette: Palette,
        /// Whether muted text renders with the dim attribute.
        pub muted_dim: bool,
    }

    impl ThemeSpec {
        #[must_use]
        pub fn color(self, token: StyleToken) -> u8 {
            let p = self.palette;
            match token {
                StyleToken::Background => p.background,
                StyleToken::Surface => p.surface,
                StyleToken::Foreground => p.foreground,
                StyleToken::Muted => p.muted,
                StyleToken::Accent => p.accent,
                StyleToken::Danger => p.danger,
                StyleToken::Warning => p.warning,
                StyleToken::Focus => p.focus,
            }
        }

        #[must_use]
        pub fn for_kind(kind: ThemeKind) -> Self {
            let (palette, muted_dim) = match kind {
                ThemeKind::Dark => (
                    Palette {
                        background: 16,
                        surface: 236,
                        foreground: 252,
                        muted: 244,
                        accent: 79,
                        danger: 197,
                        warning: 214,
                        focus: 117,
                    },
                    true,
                ),
                ThemeKind::Light => (
                    Palette {
                        background: 255,
                        surface: 253,
                        foreground: 235,
                        muted: 245,
                        accent: 30,
                        danger: 160,
                        warning: 166,
                        focus: 25,
                    },
                    false,
                ),
                ThemeKind::HighContrast => (
                    Palette {
                        background: 16,
                        surface: 232,
                        foreground: 231,
                        muted: 250,
                        accent: 51,
                        danger: 203,
                        warning: 226,
                        focus: 229,
                    },
                    false,
                ),
            };
            Self {
                kind,
                palette,
                muted_dim,
            }
        }
    }

    impl Default for ThemeSpec {
        fn default() -> Self {
            Self::for_kind(ThemeKind::Dark)
        }
    }
}

/// Cell buffer and drawing primitives.
pub mod render {
    use super::style::{StyleToken, ThemeSpec};
    use super::widgets::BorderStyle;

    /// Terminal color: ANSI256 index or 24-bit RGB.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TermColor {
        Ansi256(u8),
        Rgb(u8, u8, u8),
    }

    /// Frame dimensions in terminal cells.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FrameSize {
        pub width: usize,
        pub height: usize,
    }

    /// A rectangular region within a frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Rect {
        pub x: usize,
        pub y: usize,
        pub width: usize,
        pub height: usize,
    }

    impl Rect {
        #[must_use]
        pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
            Self {
                x,
                y,
                width,
                height,
            }
        }

        #[must_use]
        pub fn is_empty(self) -> bool {
            self.width == 0 || self.height == 0
        }

        /// Region after removing a one-cell border.
        #[must_use]
        pub fn inner(self) -> Self {
            if self.width < 2 || self.height < 2 {
                return Self::new(self.x, self.y, 0, 0);
            }
            Self::new(self.x + 1, self.y + 1, self.width - 2, self.height - 2)
        }

        /// Split into a top part `top_height` rows tall and the remainder.
        #[must_use]
        pub fn split_vertical(self, top_height: usize) -> (Self, Self) {
            let top = top_height.min(self.height);
            (
                Self::new(self.x, self.y, self.width, top),
                Self::new(self.x, self.y + top, self.width, self.height - top),
            )
        }

        /// A `width`-wide column hugging the right edge of `self`, starting
        /// `top_offset` rows down and shifted right by `slide` cells.
        #[must_use]
        pub fn right_anchored(self, width: usize, top_offset: usize, slide: usize) -> Self {
            let width = width.min(self.width);
            let top = top_offset.min(self.height);
            let x = (self.x + self.width - width).saturating_add(slide);
            let visible = (self.x + self.width).saturating_sub(x);
            Self::new(x, self.y + top, visible.min(width), self.height - top)
        }

        /// A `width` x `height` region centered in `self`.
        #[must_use]
        pub fn centered(self, width: usize, height: usize) -> Self {
            let width = width.min(self.width);
            let height = height.min(self.height);
            Self::new(
                self.x + (self.width - width) / 2,
                self.y + (self.height - height) / 2,
                width,
                height,
            )
        }
    }

    /// Cell style represented as terminal colors and text attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CellStyle {
        pub fg: TermColor,
        pub bg: TermColor,
        pub bold: bool,
        pub dim: bool,
        pub underline: bool,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FrameCell {
        pub glyph: char,
        pub style: CellStyle,
    }

    /// Semantic role for rendered text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TextRole {
        Primary,
        Muted,
        Accent,
        Danger,
        Warning,
        Focus,
    }

    struct BorderGlyphs {
        corners: [char; 4],
        horizontal: char,
        vertical: char,
    }

    fn border_glyphs(style: BorderStyle) -> BorderGlyphs {
        match style {
            BorderStyle::Rounded => BorderGlyphs {
                corners: ['╭', '╮', '╰', '╯'],
                horizontal: '─',
                vertical: '│',
            },
            BorderStyle::Plain => BorderGlyphs {
                corners: ['┌', '┐', '└', '┘'],
                horizontal: '─',
                vertical: '│',
            },
            BorderStyle::Heavy => BorderGlyphs {
                corners: ['┏', '┓', '┗', '┛'],
                horizontal: '━',
                vertical: '┃',
            },
        }
    }

    /// Cell buffer every Greenroom surface draws into.
    ///
    /// Later draws overwrite earlier ones, so painting surfaces in ascending
    /// stacking order composites them correctly.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RenderFrame {
        size: FrameSize,
        cells: Vec<FrameCell>,
        theme: ThemeSpec,
    }

    impl RenderFrame {
        #[must_use]
        pub fn new(size: FrameSize, theme: ThemeSpec) -> Self {
            let blank = FrameCell {
                glyph: ' ',
                style: CellStyle {
                    fg: TermColor::Ansi256(theme.color(StyleToken::Foreground)),
                    bg: TermColor::Ansi256(theme.color(StyleToken::Background)),
                    bold: false,
                    dim: false,
                    underline: false,
                },
            };
            Self {
                size,
                cells: vec![blank; size.width.saturating_mul(size.height)],
                theme,
            }
        }

        #[must_use]
        pub fn theme(&self) -> ThemeSpec {
            self.theme
        }

        #[must_use]
        pub fn size(&self) -> FrameSize {
            self.size
        }

        #[must_use]
        pub fn area(&self) -> Rect {
            Rect::new(0, 0, self.size.width, self.size.height)
        }

        #[must_use]
        pub fn cell(&self, x: usize, y: usize) -> Option<FrameCell> {
            self.index(x, y).map(|idx| self.cells[idx])
        }

        /// Write a single cell, clipped to frame bounds.
        pub fn set_cell(&mut self, x: usize, y: usize, cell: FrameCell) {
            if let Some(idx) = self.index(x, y) {
                self.cells[idx] = cell;
            }
        }

        fn index(&self, x: usize, y: usize) -> Option<usize> {
            (x < self.size.width && y < self.size.height).then(|| y * self.size.width + x)
        }

        /// Style for a semantic role on the given background token.
        #[must_use]
        pub fn role_style(&self, role: TextRole, bg: StyleToken) -> CellStyle {
            let token = match role {
                TextRole::Primary => StyleToken::Foreground,
                TextRole::Muted => StyleToken::Muted,
                TextRole::Accent => StyleToken::Accent,
                TextRole::Danger => StyleToken::Danger,
                TextRole::Warning => StyleToken::Warning,
                TextRole::Focus => StyleToken::Focus,
            };
            CellStyle {
                fg: TermColor::Ansi256(self.theme.color(token)),
                bg: TermColor::Ansi256(self.theme.color(bg)),
                bold: matches!(role, TextRole::Accent | TextRole::Danger | TextRole::Focus),
                dim: role == TextRole::Muted && self.theme.muted_dim,
                underline: role == TextRole::Focus,
            }
        }

        /// Draw text on one row, clipped to the frame.
        pub fn draw_text(&mut self, x: usize, y: usize, text: &str, role: TextRole) {
            let style = self.role_style(role, StyleToken::Background);
            self.paint_run(x, y, self.size.width, text, style);
        }

        /// Draw text inside `rect` at an offset, clipped to the rect.
        pub fn draw_text_in_rect(
            &mut self,
            rect: Rect,
            x_offset: usize,
            y_offset: usize,
            text: &str,
            role: TextRole,
        ) {
            if y_offset >= rect.height || x_offset >= rect.width {
                return;
            }
            let style = self.role_style(role, StyleToken::Surface);
            self.paint_run(
                rect.x + x_offset,
                rect.y + y_offset,
                rect.x + rect.width,
                text,
                style,
            );
        }

        fn paint_run(&mut self, x: usize, y: usize, limit: usize, text: &str, style: CellStyle) {
            let limit = limit.min(self.size.width);
            for (offset, glyph) in text.chars().enumerate() {
                let col = x + offset;
                if col >= limit {
                    break;
                }
                self.set_cell(col, y, FrameCell { glyph, style });
            }
        }

        /// Fill `rect` with blank surface cells.
        pub fn fill_rect(&mut self, rect: Rect, bg: StyleToken) {
            let style = CellStyle {
                fg: TermColor::Ansi256(self.theme.color(StyleToken::Foreground)),
                bg: TermColor::Ansi256(self.theme.color(bg)),
                bold: false,
                dim: false,
                underline: false,
            };
            for row in rect.y..rect.y + rect.height {
                for col in rect.x..rect.x + rect.width {
                    self.set_cell(col, row, FrameCell { glyph: ' ', style });
                }
            }
        }

        /// Switch every cell in `rect` to the dim attribute, keeping glyphs.
        pub fn dim_rect(&mut self, rect: Rect) {
            for row in rect.y..rect.y + rect.height {
                for col in rect.x..rect.x + rect.width {
                    if let Some(idx) = self.index(col, row) {
                        let cell = &mut self.cells[idx];
                        cell.style.dim = true;
                        cell.style.bold = false;
                    }
                }
            }
        }

        /// Draw a bordered panel with a title; returns the content rect.
        pub fn draw_panel(
            &mut self,
            rect: Rect,
            title: &str,
            border: BorderStyle,
            border_role: TextRole,
        ) -> Rect {
            if rect.width < 2 || rect.height < 2 {
                return Rect::new(rect.x, rect.y, 0, 0);
            }
            self.fill_rect(rect, StyleToken::Surface);

            let glyphs = border_glyphs(border);
            let mut style = self.role_style(border_role, StyleToken::Surface);
            style.underline = false;
            style.bold = false;
            let right = rect.x + rect.width - 1;
            let bottom = rect.y + rect.height - 1;

            for col in rect.x + 1..right {
                self.set_cell(col, rect.y, FrameCell { glyph: glyphs.horizontal, style });
                self.set_cell(col, bottom, FrameCell { glyph: glyphs.horizontal, style });
            }
            for row in rect.y + 1..bottom {
                self.set_cell(rect.x, row, FrameCell { glyph: glyphs.vertical, style });
                self.set_cell(right, row, FrameCell { glyph: glyphs.vertical, style });
            }
            let [tl, tr, bl, br] = glyphs.corners;
            self.set_cell(rect.x, rect.y, FrameCell { glyph: tl, style });
            self.set_cell(right, rect.y, FrameCell { glyph: tr, style });
            self.set_cell(rect.x, bottom, FrameCell { glyph: bl, style });
            self.set_cell(right, bottom, FrameCell { glyph: br, style });

            if !title.is_empty() && rect.width > 4 {
                let max = rect.width - 4;
                let label: String = title.chars().take(max).collect();
                let mut title_style = style;
                title_style.bold = true;
                self.paint_run(rect.x + 1, rect.y, right, &format!(" {label} "), title_style);
            }

            rect.inner()
        }

        /// Draw a horizontal rule across one row of `rect`.
        pub fn draw_horizontal_rule(&mut self, rect: Rect, y_offset: usize) {
            if y_offset >= rect.height {
                return;
            }
            let style = self.role_style(TextRole::Muted, StyleToken::Surface);
            for col in rect.x..rect.x + rect.width {
                self.set_cell(col, rect.y + y_offset, FrameCell { glyph: '─', style });
            }
        }

        #[must_use]
        pub fn row_text(&self, y: usize) -> String {
            if y >= self.size.height {
                return String::new();
            }
            let start = y * self.size.width;
            self.cells[start..start + self.size.width]
                .iter()
                .map(|cell| cell.glyph)
                .collect()
        }

        /// Text-only snapshot for regression tests.
        #[must_use]
        pub fn snapshot(&self) -> String {
            (0..self.size.height)
                .map(|row| self.row_text(row))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

/// Widget vocabulary shared by renderers.
pub mod widgets {
    /// Border treatment exposed by the adapter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum BorderStyle {
        Rounded,
        Plain,
        Heavy,
    }
}

pub mod snapshot;

/// Canonical input model; backend events are translated into this by the
/// runtime that owns the terminal.
pub mod input {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Key {
        Char(char),
        Enter,
        Escape,
        Tab,
        BackTab,
        Backspace,
        Up,
        Down,
        Left,
        Right,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers {
        pub shift: bool,
        pub ctrl: bool,
        pub alt: bool,
    }

    impl Modifiers {
        #[must_use]
        pub const fn none() -> Self {
            Self {
                shift: false,
                ctrl: false,
                alt: false,
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KeyEvent {
        pub key: Key,
        pub modifiers: Modifiers,
    }

    impl KeyEvent {
        #[must_use]
        pub const fn plain(key: Key) -> Self {
            Self {
                key,
                modifiers: Modifiers::none(),
            }
        }

        #[must_use]
        pub const fn ctrl(ch: char) -> Self {
            Self {
                key: Key::Char(ch),
                modifiers: Modifiers {
                    shift: false,
                    ctrl: true,
                    alt: false,
                },
            }
        }

        #[must_use]
        pub const fn alt(key: Key) -> Self {
            Self {
                key,
                modifiers: Modifiers {
                    shift: false,
                    ctrl: false,
                    alt: true,
                },
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ResizeEvent {
        pub width: usize,
        pub height: usize,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum InputEvent {
        Key(KeyEvent),
        Resize(ResizeEvent),
        Tick,
    }
}

#[cfg(test)]
mod tests {
    use super::crate_label;
    use super::input::{Key, KeyEvent};
    use super::render::{FrameSize, Rect, RenderFrame, TextRole};
    use super::snapshot::assert_render_frame_snapshot;
    use super::style::{StyleToken, ThemeKind, ThemeSpec};
    use super::widgets::BorderStyle;

    #[test]
    fn crate_label_is_stable() {
        assert_eq!(crate_label(), "greenroom-tui-adapter");
    }

    #[test]
    fn default_theme_is_dark() {
        let theme = ThemeSpec::default();
        assert_eq!(theme.kind, ThemeKind::Dark);
        assert_eq!(theme.color(StyleToken::Accent), 79);
    }

    #[test]
    fn theme_names_parse() {
        assert_eq!(ThemeKind::from_name("Light"), Some(ThemeKind::Light));
        assert_eq!(
            ThemeKind::from_name("high-contrast"),
            Some(ThemeKind::HighContrast)
        );
        assert_eq!(ThemeKind::from_name("neon"), None);
    }

    #[test]
    fn draw_text_clips_to_frame() {
        let mut frame = RenderFrame::new(FrameSize { width: 6, height: 1 }, ThemeSpec::default());
        frame.draw_text(2, 0, "overflowing", TextRole::Primary);
        assert_eq!(frame.snapshot(), "  over");
        frame.draw_text(0, 5, "ignored", TextRole::Primary);
        assert_eq!(frame.snapshot(), "  over");
    }

    #[test]
    fn panel_snapshot_with_title() {
        let mut frame = RenderFrame::new(FrameSize { width: 12, height: 4 }, ThemeSpec::default());
        let inner = frame.draw_panel(
            Rect::new(0, 0, 12, 4),
            "Detail",
            BorderStyle::Rounded,
            TextRole::Accent,
        );
        frame.draw_text_in_rect(inner, 0, 0, "hello world!", TextRole::Primary);
        assert_eq!(inner, Rect::new(1, 1, 10, 2));
        assert_render_frame_snapshot(
            "adapter_panel",
            &frame,
            "╭ Detail ──╮\n│hello worl│\n│          │\n╰──────────╯",
        );
    }

    #[test]
    fn dim_rect_keeps_glyphs() {
        let mut frame = RenderFrame::new(FrameSize { width: 4, height: 1 }, ThemeSpec::default());
        frame.draw_text(0, 0, "busy", TextRole::Accent);
        frame.dim_rect(Rect::new(0, 0, 2, 1));
        assert_eq!(frame.snapshot(), "busy");
        assert!(frame.cell(0, 0).is_some_and(|cell| cell.style.dim && !cell.style.bold));
        assert!(frame.cell(3, 0).is_some_and(|cell| !cell.style.dim));
    }

    #[test]
    fn right_anchored_respects_offset_and_slide() {
        let screen = Rect::new(0, 0, 100, 30);
        assert_eq!(screen.right_anchored(40, 2, 0), Rect::new(60, 2, 40, 28));
        assert_eq!(screen.right_anchored(40, 2, 10), Rect::new(70, 2, 30, 28));
        assert_eq!(screen.right_anchored(400, 0, 0), Rect::new(0, 0, 100, 30));
        assert!(screen.right_anchored(40, 2, 60).is_empty());
    }

    #[test]
    fn centered_rect_fits_inside() {
        let screen = Rect::new(0, 0, 20, 10);
        assert_eq!(screen.centered(10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(screen.centered(50, 50), screen);
    }

    #[test]
    fn key_event_constructors() {
        assert!(KeyEvent::ctrl('o').modifiers.ctrl);
        assert!(KeyEvent::alt(Key::Left).modifiers.alt);
        assert!(!KeyEvent::plain(Key::Tab).modifiers.shift);
    }
}
