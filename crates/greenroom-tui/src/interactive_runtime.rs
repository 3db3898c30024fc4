//! Terminal runtime: raw mode, alternate screen, and the poll/render loop
//! that feeds crossterm events into an [`OverlayShell`].

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, Event as TerminalEvent, KeyCode as TerminalKeyCode, KeyEventKind, KeyModifiers,
};
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use greenroom_core::{GreenroomError, Result};
use greenroom_tui_adapter::input::{InputEvent, Key, KeyEvent, Modifiers, ResizeEvent};
use greenroom_tui_adapter::render::{CellStyle, FrameSize, RenderFrame, TermColor};
use greenroom_tui_adapter::style::ThemeSpec;

use crate::shell::OverlayShell;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const IDLE_INTERVAL: Duration = Duration::from_millis(250);

/// Run until the shell asks to quit or the terminal fails.
pub fn run(shell: &mut OverlayShell, theme: ThemeSpec) -> Result<()> {
    let mut session = TerminalSession::enter().map_err(terminal_error("enter terminal mode"))?;
    let mut size = terminal_size().map_err(terminal_error("read terminal size"))?;
    tracing::info!(width = size.width, height = size.height, "interactive session started");
    shell.fit_screen(size);

    let mut dirty = true;
    let mut animating = shell.tick();
    let mut next_tick = Instant::now() + FRAME_INTERVAL;

    loop {
        if dirty {
            let mut frame = RenderFrame::new(size, theme);
            shell.render(&mut frame);
            render_frame(&mut session.stdout, &frame).map_err(terminal_error("render frame"))?;
            dirty = false;
        }

        if shell.should_quit() {
            break;
        }

        let now = Instant::now();
        if animating && now >= next_tick {
            animating = shell.handle_input(InputEvent::Tick);
            dirty = true;
            next_tick = now + FRAME_INTERVAL;
            continue;
        }

        let timeout = if animating {
            next_tick.saturating_duration_since(now)
        } else {
            IDLE_INTERVAL
        };
        if !event::poll(timeout).map_err(terminal_error("poll terminal event"))? {
            continue;
        }

        let event = event::read().map_err(terminal_error("read terminal event"))?;
        let Some(input) = map_terminal_event(event) else {
            continue;
        };
        if let InputEvent::Resize(resize) = input {
            size = FrameSize {
                width: resize.width,
                height: resize.height,
            };
        }
        dirty |= shell.handle_input(input);
        // Navigation may have restarted the slide; the next tick reports it.
        if !animating {
            animating = true;
            next_tick = Instant::now() + FRAME_INTERVAL;
        }
    }

    tracing::info!("interactive session finished");
    Ok(())
}

fn terminal_error(context: &'static str) -> impl Fn(io::Error) -> GreenroomError {
    move |err| GreenroomError::Terminal(format!("{context}: {err}"))
}

fn terminal_size() -> io::Result<FrameSize> {
    let (width, height) = terminal::size()?;
    Ok(FrameSize {
        width: usize::from(width),
        height: usize::from(height),
    })
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

fn map_terminal_event(event: TerminalEvent) -> Option<InputEvent> {
    match event {
        TerminalEvent::Resize(width, height) => Some(InputEvent::Resize(ResizeEvent {
            width: usize::from(width),
            height: usize::from(height),
        })),
        TerminalEvent::Key(key_event) => {
            if !matches!(key_event.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                return None;
            }
            let key = match key_event.code {
                TerminalKeyCode::Char(ch) => Key::Char(ch),
                TerminalKeyCode::Enter => Key::Enter,
                TerminalKeyCode::Esc => Key::Escape,
                TerminalKeyCode::Tab => Key::Tab,
                TerminalKeyCode::BackTab => Key::BackTab,
                TerminalKeyCode::Backspace => Key::Backspace,
                TerminalKeyCode::Up => Key::Up,
                TerminalKeyCode::Down => Key::Down,
                TerminalKeyCode::Left => Key::Left,
                TerminalKeyCode::Right => Key::Right,
                _ => return None,
            };
            let modifiers = Modifiers {
                shift: key_event.modifiers.contains(KeyModifiers::SHIFT),
                ctrl: key_event.modifiers.contains(KeyModifiers::CONTROL),
                alt: key_event.modifiers.contains(KeyModifiers::ALT),
            };
            Some(InputEvent::Key(KeyEvent { key, modifiers }))
        }
        _ => None,
    }
}

fn render_frame<W: Write>(out: &mut W, frame: &RenderFrame) -> io::Result<()> {
    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
    let size = frame.size();
    for y in 0..size.height {
        queue!(out, MoveTo(0, to_u16(y)))?;
        let mut current = None;
        for x in 0..size.width {
            let Some(cell) = frame.cell(x, y) else {
                continue;
            };
            if current != Some(cell.style) {
                queue_style(out, cell.style)?;
                current = Some(cell.style);
            }
            queue!(out, Print(cell.glyph))?;
        }
    }
    queue!(out, SetAttribute(Attribute::Reset))?;
    out.flush()
}

fn crossterm_color(color: TermColor) -> Color {
    match color {
        TermColor::Ansi256(index) => Color::AnsiValue(index),
        TermColor::Rgb(r, g, b) => Color::Rgb { r, g, b },
    }
}

fn queue_style<W: Write>(out: &mut W, style: CellStyle) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(crossterm_color(style.fg)),
        SetBackgroundColor(crossterm_color(style.bg)),
    )?;
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    } else if style.dim {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if style.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    Ok(())
}

struct TerminalSession {
    stdout: io::Stdout,
}

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            Hide,
            Clear(ClearType::All),
            MoveTo(0, 0)
        )?;
        Ok(Self { stdout })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            SetAttribute(Attribute::Reset),
            LeaveAlternateScreen,
            Show,
            MoveTo(0, 0)
        );
        let _ = terminal::disable_raw_mode();
    }
}
