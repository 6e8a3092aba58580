/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory, the CWD or
/// `~/.config/wopr` (or an explicit `--config` path).
/// Missing files and missing keys fall back to defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_FILE: &str = "config.toml";

// ── Errors ──

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

// ── Public Config Structs ──

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub terminal: TerminalConfig,
    pub gamepad: GamepadConfig,
    pub log: LogConfig,
}

#[derive(Clone, Debug)]
pub struct DisplayConfig {
    pub use_glow: bool,
    pub use_scanlines: bool,
    pub use_vignette: bool,
    pub margin_top: u16,
    pub margin_bottom: u16,
    pub margin_left: u16,
    pub viewport_cols: u16,   // 0 = follow the host terminal
    pub viewport_rows: u16,
    pub fps: u32,
}

#[derive(Clone, Debug)]
pub struct TerminalConfig {
    pub prompt_default: String,
    pub scrollback_limit: usize,
    pub local_echo: bool,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    pub file: PathBuf,
    pub level: String,
}

impl DisplayConfig {
    /// Drawing area for a host terminal of `cols`×`rows`.
    pub fn resolve_viewport(&self, cols: u16, rows: u16) -> (u16, u16) {
        let w = if self.viewport_cols == 0 { cols } else { self.viewport_cols.min(cols) };
        let h = if self.viewport_rows == 0 { rows } else { self.viewport_rows.min(rows) };
        (w, h)
    }

    pub fn frame_period(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.fps.clamp(1, 240)))
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    display: TomlDisplay,
    #[serde(default)]
    terminal: TomlTerminal,
    #[serde(default)]
    gamepad: TomlGamepad,
    #[serde(default)]
    log: TomlLog,
}

#[derive(Deserialize, Debug)]
struct TomlDisplay {
    #[serde(default = "default_true")]
    use_glow: bool,
    #[serde(default = "default_true")]
    use_scanlines: bool,
    #[serde(default = "default_true")]
    use_vignette: bool,
    #[serde(default = "default_margin_top")]
    margin_top: u16,
    #[serde(default = "default_margin_bottom")]
    margin_bottom: u16,
    #[serde(default = "default_margin_left")]
    margin_left: u16,
    #[serde(default)]
    viewport_cols: u16,
    #[serde(default)]
    viewport_rows: u16,
    #[serde(default = "default_fps")]
    fps: u32,
}

#[derive(Deserialize, Debug)]
struct TomlTerminal {
    #[serde(default = "default_prompt")]
    prompt_default: String,
    #[serde(default = "default_scrollback")]
    scrollback_limit: usize,
    #[serde(default)]
    local_echo: bool,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_confirm")]
    confirm: Vec<String>,
    #[serde(default = "default_cancel")]
    cancel: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default)]
    file: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    level: String,
}

// ── Defaults ──

fn default_true() -> bool { true }
fn default_margin_top() -> u16 { 1 }
fn default_margin_bottom() -> u16 { 1 }
fn default_margin_left() -> u16 { 2 }
fn default_fps() -> u32 { 60 }
fn default_prompt() -> String { "LOGON> ".into() }
fn default_scrollback() -> usize { 500 }
fn default_confirm() -> Vec<String> { vec!["A".into(), "Start".into()] }
fn default_cancel() -> Vec<String> { vec!["B".into(), "Select".into()] }
fn default_log_level() -> String { "info".into() }

impl Default for TomlDisplay {
    fn default() -> Self {
        TomlDisplay {
            use_glow: true,
            use_scanlines: true,
            use_vignette: true,
            margin_top: default_margin_top(),
            margin_bottom: default_margin_bottom(),
            margin_left: default_margin_left(),
            viewport_cols: 0,
            viewport_rows: 0,
            fps: default_fps(),
        }
    }
}

impl Default for TomlTerminal {
    fn default() -> Self {
        TomlTerminal {
            prompt_default: default_prompt(),
            scrollback_limit: default_scrollback(),
            local_echo: false,
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            confirm: default_confirm(),
            cancel: default_cancel(),
        }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog {
            file: None,
            level: default_log_level(),
        }
    }
}

// ── Loading ──

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig::from_toml(TomlConfig::default())
    }
}

impl AppConfig {
    /// Load `explicit` if given, otherwise the first `config.toml` found in
    /// the candidate directories. No file at all is not an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => candidate_dirs()
                .into_iter()
                .map(|d| d.join(CONFIG_FILE))
                .find(|p| p.is_file()),
        };
        match path {
            Some(p) => Self::load_file(&p),
            None => Ok(AppConfig::default()),
        }
    }

    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(AppConfig::from_toml)
    }

    fn from_toml(cfg: TomlConfig) -> Self {
        AppConfig {
            display: DisplayConfig {
                use_glow: cfg.display.use_glow,
                use_scanlines: cfg.display.use_scanlines,
                use_vignette: cfg.display.use_vignette,
                margin_top: cfg.display.margin_top,
                margin_bottom: cfg.display.margin_bottom,
                margin_left: cfg.display.margin_left,
                viewport_cols: cfg.display.viewport_cols,
                viewport_rows: cfg.display.viewport_rows,
                fps: cfg.display.fps,
            },
            terminal: TerminalConfig {
                prompt_default: cfg.terminal.prompt_default,
                scrollback_limit: cfg.terminal.scrollback_limit.max(1),
                local_echo: cfg.terminal.local_echo,
            },
            gamepad: GamepadConfig {
                confirm: cfg.gamepad.confirm,
                cancel: cfg.gamepad.cancel,
            },
            log: LogConfig {
                file: cfg.log.file.unwrap_or_else(default_log_file),
                level: cfg.log.level,
            },
        }
    }
}

/// `~/.wopr/wopr.log`, or `wopr.log` in the CWD without a home directory.
fn default_log_file() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(|h| PathBuf::from(h).join(".wopr").join("wopr.log"))
        .unwrap_or_else(|| PathBuf::from("wopr.log"))
}

/// Candidate directories to search: exe dir + CWD + ~/.config/wopr (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".config/wopr");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    dirs
}
