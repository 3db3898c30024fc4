//! Configuration types for the Greenroom client.
//!
//! Root configuration struct and nested sections with full defaults,
//! validation, YAML file loading, environment variable overrides, and tilde
//! path expansion. Precedence: defaults < config file < environment.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{GreenroomError, Result};

// ---------------------------------------------------------------------------
// Root config
// ---------------------------------------------------------------------------

/// Root configuration for the Greenroom client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub global: GlobalConfig,
    pub logging: LoggingConfig,
    pub overlay: OverlayConfig,
    pub tui: TuiConfig,
}

impl Default for Config {
    fn default() -> Self {
        let home = home_dir();
        Self {
            global: GlobalConfig {
                data_dir: home.join(".local/share/greenroom").display().to_string(),
                config_dir: home.join(".config/greenroom").display().to_string(),
            },
            logging: LoggingConfig::default(),
            overlay: OverlayConfig::default(),
            tui: TuiConfig::default(),
        }
    }
}

impl Config {
    /// Validates the entire configuration.
    pub fn validate(&self) -> Result<()> {
        if self.global.data_dir.trim().is_empty() {
            return Err(invalid("global.data_dir is required"));
        }
        if self.global.config_dir.trim().is_empty() {
            return Err(invalid("global.config_dir is required"));
        }

        match self.logging.level.to_lowercase().trim() {
            "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(invalid(
                    "logging.level must be one of debug, info, warn, error",
                ))
            }
        }
        match self.logging.format.to_lowercase().trim() {
            "console" | "json" => {}
            _ => return Err(invalid("logging.format must be one of console, json")),
        }

        let overlay = &self.overlay;
        if overlay.min_width == 0 {
            return Err(invalid("overlay.min_width must be greater than 0"));
        }
        if overlay.min_width > overlay.max_width {
            return Err(invalid("overlay.min_width must not exceed overlay.max_width"));
        }
        if overlay.default_width < overlay.min_width || overlay.default_width > overlay.max_width
        {
            return Err(invalid(
                "overlay.default_width must lie within [overlay.min_width, overlay.max_width]",
            ));
        }
        if overlay.width_step == 0 {
            return Err(invalid("overlay.width_step must be greater than 0"));
        }

        match self.tui.theme.as_str() {
            "dark" | "light" | "high-contrast" => {}
            other => {
                return Err(invalid(&format!(
                    "tui.theme must be dark, light, or high-contrast (got {other:?})"
                )))
            }
        }

        Ok(())
    }

    /// Expands leading `~` in path-valued settings.
    pub fn expand_paths(&mut self) {
        self.global.data_dir = expand_tilde(&self.global.data_dir);
        self.global.config_dir = expand_tilde(&self.global.config_dir);
        if let Some(file) = self.logging.file.as_mut() {
            *file = expand_tilde(file);
        }
    }

    /// Apply `GREENROOM_*` overrides using the supplied variable lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = non_empty(lookup("GREENROOM_LOG_LEVEL")) {
            self.logging.level = level;
        }
        if let Some(format) = non_empty(lookup("GREENROOM_LOG_FORMAT")) {
            self.logging.format = format;
        }
        if let Some(file) = non_empty(lookup("GREENROOM_LOG_FILE")) {
            self.logging.file = Some(file);
        }
        if let Some(theme) = non_empty(lookup("GREENROOM_THEME")) {
            self.tui.theme = theme;
        }
        if let Some(raw) = non_empty(lookup("GREENROOM_REDUCE_MOTION")) {
            self.overlay.reduced_motion = raw == "1" || raw.eq_ignore_ascii_case("true");
        }
        if let Some(raw) = non_empty(lookup("GREENROOM_OVERLAY_WIDTH")) {
            self.overlay.default_width = raw.parse().map_err(|_| {
                GreenroomError::Config(format!(
                    "GREENROOM_OVERLAY_WIDTH must be a positive integer (got {raw:?})"
                ))
            })?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalConfig {
    pub data_dir: String,
    pub config_dir: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    /// Log destination; `None` means stderr in non-interactive mode only.
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "console".into(),
            file: None,
        }
    }
}

/// Visual parameters of the drill-down overlay (cells).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayConfig {
    pub default_width: usize,
    pub min_width: usize,
    pub max_width: usize,
    pub width_step: usize,
    /// Rows occupied by the fixed navigation bar above the overlay.
    pub nav_bar_height: usize,
    pub reduced_motion: bool,
    /// Ticks a slide-in transition lasts.
    pub slide_ticks: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            default_width: 64,
            min_width: 36,
            max_width: 120,
            width_step: 4,
            nav_bar_height: 2,
            reduced_motion: false,
            slide_ticks: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TuiConfig {
    pub theme: String,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    #[serde(default)]
    global: PartialGlobalConfig,
    #[serde(default)]
    logging: PartialLoggingConfig,
    #[serde(default)]
    overlay: PartialOverlayConfig,
    #[serde(default)]
    tui: PartialTuiConfig,
}

#[derive(Debug, Default, Deserialize)]
struct PartialGlobalConfig {
    #[serde(default)]
    data_dir: String,
    #[serde(default)]
    config_dir: String,
}

#[derive(Debug, Default, Deserialize)]
struct PartialLoggingConfig {
    #[serde(default)]
    level: String,
    #[serde(default)]
    format: String,
    #[serde(default)]
    file: String,
}

#[derive(Debug, Default, Deserialize)]
struct PartialOverlayConfig {
    default_width: Option<usize>,
    min_width: Option<usize>,
    max_width: Option<usize>,
    width_step: Option<usize>,
    nav_bar_height: Option<usize>,
    reduced_motion: Option<bool>,
    slide_ticks: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct PartialTuiConfig {
    #[serde(default)]
    theme: String,
}

/// Load config: defaults < config file < `GREENROOM_*` environment.
///
/// An explicit path that cannot be read is a hard error; the default search
/// locations are optional. Returns the file actually used, if any.
pub fn load_config(explicit: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    let mut cfg = Config::default();

    let used = match explicit {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| GreenroomError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            apply_yaml(&mut cfg, &text)?;
            Some(path.to_path_buf())
        }
        None => match find_config_file() {
            Some(path) => match std::fs::read_to_string(&path) {
                Ok(text) => {
                    apply_yaml(&mut cfg, &text)?;
                    Some(path)
                }
                Err(err) => {
                    tracing::debug!(path = %path.display(), error = %err, "skipping unreadable config");
                    None
                }
            },
            None => None,
        },
    };

    cfg.apply_env_overrides(|key| std::env::var(key).ok())?;
    cfg.expand_paths();
    cfg.validate()?;
    Ok((cfg, used))
}

/// Merge a YAML document into `cfg`; absent keys keep their current values.
pub fn apply_yaml(cfg: &mut Config, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Ok(());
    }
    let partial: PartialConfig =
        serde_yaml::from_str(text).map_err(|err| GreenroomError::Parse(err.to_string()))?;
    apply_partial(cfg, partial);
    Ok(())
}

fn apply_partial(cfg: &mut Config, partial: PartialConfig) {
    if let Some(dir) = non_empty(Some(partial.global.data_dir)) {
        cfg.global.data_dir = dir;
    }
    if let Some(dir) = non_empty(Some(partial.global.config_dir)) {
        cfg.global.config_dir = dir;
    }
    if let Some(level) = non_empty(Some(partial.logging.level)) {
        cfg.logging.level = level;
    }
    if let Some(format) = non_empty(Some(partial.logging.format)) {
        cfg.logging.format = format;
    }
    if let Some(file) = non_empty(Some(partial.logging.file)) {
        cfg.logging.file = Some(file);
    }

    let overlay = partial.overlay;
    if let Some(value) = overlay.default_width {
        cfg.overlay.default_width = value;
    }
    if let Some(value) = overlay.min_width {
        cfg.overlay.min_width = value;
    }
    if let Some(value) = overlay.max_width {
        cfg.overlay.max_width = value;
    }
    if let Some(value) = overlay.width_step {
        cfg.overlay.width_step = value;
    }
    if let Some(value) = overlay.nav_bar_height {
        cfg.overlay.nav_bar_height = value;
    }
    if let Some(value) = overlay.reduced_motion {
        cfg.overlay.reduced_motion = value;
    }
    if let Some(value) = overlay.slide_ticks {
        cfg.overlay.slide_ticks = value;
    }

    if let Some(theme) = non_empty(Some(partial.tui.theme)) {
        cfg.tui.theme = theme;
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid(message: &str) -> GreenroomError {
    GreenroomError::Config(message.to_owned())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|raw| !raw.is_empty())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> String {
    if path.is_empty() {
        return path.to_string();
    }
    if path == "~" {
        return home_dir().display().to_string();
    }
    if let Some(rest) = path.strip_prefix("~/") {
        return home_dir().join(rest).display().to_string();
    }
    path.to_string()
}

/// Search for `config.yaml` in the standard locations.
pub fn find_config_file() -> Option<PathBuf> {
    config_search_paths()
        .into_iter()
        .map(|dir| dir.join("config.yaml"))
        .find(|candidate| candidate.is_file())
}

fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.trim().is_empty() {
            paths.push(Path::new(&xdg).join("greenroom"));
        }
    }

    let home = home_dir();
    if home.as_os_str() != "" {
        paths.push(home.join(".config/greenroom"));
    }

    paths
}

/// Get the user's home directory, falling back to `/` on failure.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .filter(|value| !value.is_empty())
        .map_or_else(|| PathBuf::from("/"), PathBuf::from)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
