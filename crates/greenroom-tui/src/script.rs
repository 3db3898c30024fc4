//! Non-interactive command scripts replayed against an [`OverlayShell`].
//!
//! One command per line; blank lines and `#` comments are skipped.
//!
//! ```text
//! open creative c-ada [tab]
//! back | forward | close
//! tab needs
//! mount assistant | unmount assistant | focus detail
//! busy on | busy off
//! grow | shrink
//! ```

use greenroom_core::{GreenroomError, Result};

use crate::nav_entry::NavigationEntry;
use crate::shell::{OverlayShell, ShellSnapshot};
use crate::surface::ASSISTANT_SURFACE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Open {
        kind: String,
        id: String,
        tab: Option<String>,
    },
    Back,
    Forward,
    Close,
    Tab(String),
    Mount(String),
    Unmount(String),
    Focus(String),
    Busy(bool),
    Grow,
    Shrink,
}

/// Parse one line; `Ok(None)` for blanks and comments.
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>> {
    parse_words(line).map_err(GreenroomError::Script)
}

fn parse_words(line: &str) -> std::result::Result<Option<ScriptCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    let command = match words.as_slice() {
        ["open", kind, id] => ScriptCommand::Open {
            kind: (*kind).to_owned(),
            id: (*id).to_owned(),
            tab: None,
        },
        ["open", kind, id, tab] => ScriptCommand::Open {
            kind: (*kind).to_owned(),
            id: (*id).to_owned(),
            tab: Some((*tab).to_owned()),
        },
        ["back"] => ScriptCommand::Back,
        ["forward"] => ScriptCommand::Forward,
        ["close"] => ScriptCommand::Close,
        ["tab", name] => ScriptCommand::Tab((*name).to_owned()),
        ["mount", name] => ScriptCommand::Mount(known_surface(name)?),
        ["unmount", name] => ScriptCommand::Unmount(known_surface(name)?),
        ["focus", name] => ScriptCommand::Focus((*name).to_owned()),
        ["busy", "on"] => ScriptCommand::Busy(true),
        ["busy", "off"] => ScriptCommand::Busy(false),
        ["grow"] => ScriptCommand::Grow,
        ["shrink"] => ScriptCommand::Shrink,
        _ => return Err(format!("unrecognized command {line:?}")),
    };
    Ok(Some(command))
}

fn known_surface(name: &str) -> std::result::Result<String, String> {
    if name == ASSISTANT_SURFACE {
        Ok(name.to_owned())
    } else {
        Err(format!("unknown surface {name:?}"))
    }
}

/// Parse a whole script, reporting the first bad line by number.
pub fn parse_script(text: &str) -> Result<Vec<ScriptCommand>> {
    let mut commands = Vec::new();
    for (index, line) in text.lines().enumerate() {
        match parse_words(line) {
            Ok(Some(command)) => commands.push(command),
            Ok(None) => {}
            Err(message) => {
                return Err(GreenroomError::Script(format!("line {}: {message}", index + 1)));
            }
        }
    }
    Ok(commands)
}

pub fn apply(shell: &mut OverlayShell, command: &ScriptCommand) {
    tracing::debug!(?command, "script command");
    match command {
        ScriptCommand::Open { kind, id, tab } => {
            let mut entry = NavigationEntry::from_raw(kind, id.clone());
            if let Some(tab) = tab {
                entry = entry.with_initial_tab(tab.clone());
            }
            shell.open(entry);
        }
        ScriptCommand::Back => shell.back(),
        ScriptCommand::Forward => shell.forward(),
        ScriptCommand::Close => shell.close(),
        ScriptCommand::Tab(name) => {
            shell.select_tab(name);
        }
        ScriptCommand::Mount(_) => {
            if !shell.is_mounted(ASSISTANT_SURFACE) {
                shell.toggle_assistant();
            }
        }
        ScriptCommand::Unmount(name) => {
            shell.unmount_surface(name);
        }
        ScriptCommand::Focus(name) => shell.focus_registry().bring_to_front(name),
        ScriptCommand::Busy(true) => shell.begin_request(),
        ScriptCommand::Busy(false) => shell.end_request(),
        ScriptCommand::Grow => shell.grow_overlay(),
        ScriptCommand::Shrink => shell.shrink_overlay(),
    }
}

/// Replay `commands` and return the final state.
pub fn run_script(shell: &mut OverlayShell, commands: &[ScriptCommand]) -> ShellSnapshot {
    for command in commands {
        apply(shell, command);
    }
    shell.state_snapshot()
}

#[cfg(test)]
mod tests {
    use super::{parse_line, parse_script, ScriptCommand};

    #[test]
    fn parses_open_with_optional_tab() {
        assert_eq!(
            parse_line("open creative c-ada").ok().flatten(),
            Some(ScriptCommand::Open {
                kind: "creative".into(),
                id: "c-ada".into(),
                tab: None,
            })
        );
        assert_eq!(
            parse_line("  open project p-1 needs ").ok().flatten(),
            Some(ScriptCommand::Open {
                kind: "project".into(),
                id: "p-1".into(),
                tab: Some("needs".into()),
            })
        );
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert!(matches!(parse_line(""), Ok(None)));
        assert!(matches!(parse_line("# setup"), Ok(None)));
    }

    #[test]
    fn rejects_unknown_commands_and_surfaces() {
        assert!(parse_line("teleport").is_err());
        assert!(parse_line("mount spaceship").is_err());
        assert!(parse_line("busy maybe").is_err());
    }

    #[test]
    fn script_errors_carry_line_numbers() {
        let err = parse_script("open creative 1\n\nfly away\n")
            .err()
            .map(|err| err.to_string());
        assert_eq!(
            err.as_deref(),
            Some("script: line 3: unrecognized command \"fly away\"")
        );
    }

    #[test]
    fn parses_full_script() {
        let commands = parse_script("open creative 1\nback\nforward\nclose\nmount assistant\n")
            .unwrap_or_default();
        assert_eq!(commands.len(), 5);
        assert_eq!(commands[4], ScriptCommand::Mount("assistant".into()));
    }
}
