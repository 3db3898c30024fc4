//! Tracing subscriber initialization for the greenroom-tui binary.
//!
//! # Filter priority (highest to lowest)
//!
//! 1. `GREENROOM_LOG` env var (per-target directives)
//! 2. `RUST_LOG` env var
//! 3. `logging.level` from config
//!
//! Interactive sessions own the terminal, so without a configured log file
//! no writer is installed at all.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use greenroom_core::config::LoggingConfig;
use greenroom_core::{GreenroomError, Result};
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Console,
    Json,
}

impl LogFormat {
    /// Unknown names fall back to console; config validation rejects them
    /// earlier.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Console
        }
    }
}

/// Where log output ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    File(PathBuf),
    Stderr,
    Disabled,
}

/// Pick the sink for a session.
#[must_use]
pub fn choose_sink(config: &LoggingConfig, interactive: bool) -> LogSink {
    match (&config.file, interactive) {
        (Some(path), _) => LogSink::File(PathBuf::from(path)),
        (None, false) => LogSink::Stderr,
        (None, true) => LogSink::Disabled,
    }
}

/// Filter directive after applying the env priority chain.
#[must_use]
pub fn filter_directive(
    project_env: Option<&str>,
    rust_log: Option<&str>,
    config_level: &str,
) -> String {
    [project_env, rust_log]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|directive| !directive.is_empty() && EnvFilter::try_new(directive).is_ok())
        .map_or_else(|| config_level.trim().to_ascii_lowercase(), str::to_owned)
}

fn build_env_filter(config_level: &str) -> EnvFilter {
    let project = std::env::var("GREENROOM_LOG").ok();
    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = filter_directive(project.as_deref(), rust_log.as_deref(), config_level);
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn fmt_layer<W>(format: LogFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true)
        .with_level(true);
    match format {
        LogFormat::Json => layer.json().boxed(),
        LogFormat::Console => layer.without_time().compact().boxed(),
    }
}

/// Install the global subscriber after config is loaded. Only opening the
/// log file can fail; a second call keeps the first subscriber.
pub fn init_subscriber(config: &LoggingConfig, interactive: bool) -> Result<LogSink> {
    let format = LogFormat::parse(&config.format);
    let sink = choose_sink(config, interactive);
    let layer = match &sink {
        LogSink::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| GreenroomError::Io {
                    path: path.clone(),
                    source,
                })?;
            Some(fmt_layer(format, Mutex::new(file), false))
        }
        LogSink::Stderr => {
            let ansi = std::io::IsTerminal::is_terminal(&std::io::stderr());
            Some(fmt_layer(format, std::io::stderr, ansi))
        }
        LogSink::Disabled => None,
    };

    let filter = build_env_filter(&config.level);
    if let Err(err) = tracing_subscriber::registry()
        .with(layer.map(|layer| layer.with_filter(filter)))
        .try_init()
    {
        // A host (or an earlier call) already owns the global dispatcher.
        tracing::debug!(error = %err, "tracing subscriber already installed");
    }
    Ok(sink)
}
