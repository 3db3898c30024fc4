//! Argument handling and top-level dispatch for the `greenroom-tui` binary.

use std::io::{IsTerminal, Read, Write};
use std::path::PathBuf;
use std::rc::Rc;

use greenroom_core::config::{load_config, Config};
use greenroom_core::{GreenroomError, Result};
use greenroom_tui_adapter::render::{FrameSize, RenderFrame};
use greenroom_tui_adapter::style::{ThemeKind, ThemeSpec};

use crate::demo::DemoCatalog;
use crate::entity_list::EntityList;
use crate::focus_registry::FocusRegistry;
use crate::logging;
use crate::script;
use crate::shell::OverlayShell;

pub const HELP_TEXT: &str = "\
Usage: greenroom-tui [options]

Browse the roster and drill into entities in a stacked overlay.

Options:
  -c, --config <path>    read configuration from <path>
  -s, --script <file>    replay a command script ('-' for stdin) and print state as JSON
      --frame <WxH>      with --script, print the final rendered frame instead
  -h, --help             show this help
";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    pub config: Option<PathBuf>,
    pub script: Option<String>,
    pub frame: Option<FrameSize>,
    pub help: bool,
}

fn take_value(args: &[String], index: usize, flag: &str) -> std::result::Result<String, String> {
    args.get(index + 1)
        .filter(|value| !value.starts_with("--"))
        .cloned()
        .ok_or_else(|| format!("error: {flag} requires a value"))
}

fn parse_frame_size(raw: &str) -> std::result::Result<FrameSize, String> {
    let invalid = || format!("error: invalid value '{raw}' for --frame (expected WxH)");
    let (width, height) = raw.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width = width.trim().parse::<usize>().map_err(|_| invalid())?;
    let height = height.trim().parse::<usize>().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok(FrameSize { width, height })
}

pub fn parse_args(args: &[String]) -> std::result::Result<ParsedArgs, String> {
    let mut parsed = ParsedArgs::default();
    let mut index = 0usize;
    while let Some(token) = args.get(index) {
        match token.as_str() {
            "-h" | "--help" => {
                parsed.help = true;
                index += 1;
            }
            "-c" | "--config" => {
                parsed.config = Some(PathBuf::from(take_value(args, index, "--config")?));
                index += 2;
            }
            "-s" | "--script" => {
                parsed.script = Some(take_value(args, index, "--script")?);
                index += 2;
            }
            "--frame" => {
                parsed.frame = Some(parse_frame_size(&take_value(args, index, "--frame")?)?);
                index += 2;
            }
            other => return Err(format!("error: unexpected argument '{other}'")),
        }
    }
    if parsed.frame.is_some() && parsed.script.is_none() {
        return Err("error: --frame requires --script".to_owned());
    }
    Ok(parsed)
}

/// Theme named by config; validation already rejected unknown names.
#[must_use]
pub fn theme_for(config: &Config) -> ThemeSpec {
    ThemeSpec::for_kind(ThemeKind::from_name(&config.tui.theme).unwrap_or(ThemeKind::Dark))
}

/// Shell over the seeded demo catalog.
#[must_use]
pub fn demo_shell(config: &Config) -> OverlayShell {
    let catalog = Rc::new(DemoCatalog::seeded());
    let list = EntityList::new(catalog.roster());
    OverlayShell::new(
        &config.overlay,
        FocusRegistry::new(),
        catalog.renderer_table(),
        list,
    )
}

fn read_script(source: &str, stdin: &mut dyn Read) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        stdin
            .read_to_string(&mut text)
            .map_err(|source| GreenroomError::Io {
                path: PathBuf::from("<stdin>"),
                source,
            })?;
        return Ok(text);
    }
    std::fs::read_to_string(source).map_err(|err| GreenroomError::Io {
        path: PathBuf::from(source),
        source: err,
    })
}

fn write_out(stdout: &mut dyn Write, text: &str) -> Result<()> {
    writeln!(stdout, "{text}").map_err(|err| GreenroomError::Terminal(format!("write output: {err}")))
}

fn execute(parsed: &ParsedArgs, stdin: &mut dyn Read, stdout: &mut dyn Write) -> Result<()> {
    let (config, used) = load_config(parsed.config.as_deref())?;
    let interactive = parsed.script.is_none();
    let sink = logging::init_subscriber(&config.logging, interactive)?;
    tracing::debug!(
        config = ?used.as_deref().map(|path| path.display().to_string()),
        sink = ?sink,
        "greenroom-tui starting"
    );

    let mut shell = demo_shell(&config);
    let theme = theme_for(&config);

    let Some(source) = &parsed.script else {
        if !std::io::stdout().is_terminal() {
            return Err(GreenroomError::Terminal(
                "stdout is not a terminal; use --script for non-interactive runs".to_owned(),
            ));
        }
        return crate::interactive_runtime::run(&mut shell, theme);
    };

    let commands = script::parse_script(&read_script(source, stdin)?)?;
    let snapshot = script::run_script(&mut shell, &commands);
    match parsed.frame {
        Some(size) => {
            shell.fit_screen(size);
            let mut frame = RenderFrame::new(size, theme);
            shell.render(&mut frame);
            write_out(stdout, &frame.snapshot())
        }
        None => {
            let json = serde_json::to_string_pretty(&snapshot)
                .map_err(|err| GreenroomError::Script(format!("encode state: {err}")))?;
            write_out(stdout, &json)
        }
    }
}

/// Run with explicit streams; returns the process exit code.
pub fn run_with_io(
    args: &[String],
    stdin: &mut dyn Read,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> i32 {
    let parsed = match parse_args(args) {
        Ok(parsed) => parsed,
        Err(message) => {
            let _ = writeln!(stderr, "{message}");
            let _ = write!(stderr, "{HELP_TEXT}");
            return 2;
        }
    };
    if parsed.help {
        let _ = write!(stdout, "{HELP_TEXT}");
        return 0;
    }
    match execute(&parsed, stdin, stdout) {
        Ok(()) => 0,
        Err(err) => {
            let _ = writeln!(stderr, "error: {err}");
            err.exit_code()
        }
    }
}

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();
    run_with_io(
        &args,
        &mut std::io::stdin(),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
}
