// src/config.rs

//! Defines the configuration structures for `console-graph`.
//!
//! The configuration is read once from a JSON file and exposed through the
//! process-wide [`CONFIG`]. Every section carries `#[serde(default)]`, so a
//! file only needs the keys it wants to change; a missing file yields the
//! defaults and an unreadable or invalid one is logged and ignored.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::color::NamedColor;
use crate::raster::compositor::{DEFAULT_BLANK, DEFAULT_MARK};
use crate::raster::{Symbols, Viewport};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "CONSOLE_GRAPH_CONFIG";
const CONFIG_DIR_NAME: &str = "console-graph";
const CONFIG_FILE_NAME: &str = "config.json";
const DEFAULT_LOG_FILE_NAME: &str = "console-graph.log";

/// Global configuration, loaded on first access.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::load_or_default);

// --- Top-Level Configuration Structure ---

/// Represents the complete configuration of the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Symbols, colors and layout.
    pub appearance: AppearanceConfig,
    /// Initial view and navigation steps of the graph.
    pub viewport: ViewportConfig,
    /// Equations shown at start-up, as `lhs=rhs` text.
    pub equations: EquationsConfig,
    /// Input polling.
    pub performance: PerformanceConfig,
    /// Log destination.
    pub logging: LoggingConfig,
}

impl Config {
    /// Parses a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse configuration JSON")
    }

    /// Reads and parses the file at `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid configuration file {}", path.display()))
    }

    /// Where the configuration is looked up, in order: `$CONSOLE_GRAPH_CONFIG`,
    /// `$XDG_CONFIG_HOME/console-graph/config.json`,
    /// `$HOME/.config/console-graph/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(explicit) = env::var_os(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(explicit));
        }
        let base = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
        Some(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads the configuration file if there is one, falling back to defaults.
    pub fn load_or_default() -> Self {
        let path = match Self::default_path() {
            Some(path) => path,
            None => {
                info!("No configuration directory found, using defaults.");
                return Self::default();
            }
        };
        if !path.exists() {
            info!("No configuration at {}, using defaults.", path.display());
            return Self::default();
        }
        match Self::from_file(&path) {
            Ok(config) => {
                info!("Configuration loaded from {}.", path.display());
                config
            }
            Err(e) => {
                warn!("{:#}. Using defaults.", e);
                Self::default()
            }
        }
    }
}

// --- Appearance Configuration ---

/// Defines settings related to the visual appearance of the program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Title shown in the top bar.
    pub title: String,
    /// Character drawn on curve cells.
    pub mark: char,
    /// Character used for empty canvas cells.
    pub blank: char,
    /// Width in columns of the equation editor panel.
    pub editor_width: usize,
    /// Color scheme.
    pub colors: ColorScheme,
}

impl AppearanceConfig {
    pub fn symbols(&self) -> Symbols {
        Symbols {
            mark: self.mark,
            blank: self.blank,
        }
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            title: "console-graph".to_string(),
            mark: DEFAULT_MARK,
            blank: DEFAULT_BLANK,
            editor_width: 40,
            colors: ColorScheme::default(),
        }
    }
}

/// Foreground/background pairs of each screen region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    pub graph_foreground: NamedColor,
    pub graph_background: NamedColor,
    pub panel_foreground: NamedColor,
    pub panel_background: NamedColor,
    /// Prefix color of equations that failed to parse.
    pub error_foreground: NamedColor,
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme {
            graph_foreground: NamedColor::White,
            graph_background: NamedColor::Black,
            panel_foreground: NamedColor::Black,
            panel_background: NamedColor::White,
            error_foreground: NamedColor::Red,
        }
    }
}

// --- Viewport Configuration ---

/// Initial world rectangle and navigation steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// World rectangle shown at start-up and after a reset.
    pub initial: Viewport,
    /// Fraction of the visible span moved per pan key press.
    pub pan_fraction: f64,
    /// Scale applied per zoom key press.
    pub zoom_factor: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        ViewportConfig {
            initial: Viewport::new(-10.0, 10.0, 10.0, -10.0),
            pan_fraction: 0.1,
            zoom_factor: 2.0,
        }
    }
}

// --- Equations Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquationsConfig(pub Vec<String>);

impl Default for EquationsConfig {
    fn default() -> Self {
        EquationsConfig(vec!["y=x^2".to_string(), "x^2+y^2=25".to_string()])
    }
}

// --- Performance Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Deciseconds the console waits for input before re-checking its size.
    pub input_poll_ds: u8,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        PerformanceConfig { input_poll_ds: 1 }
    }
}

// --- Logging Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file. `None` logs to `console-graph.log` in the temp directory,
    /// since the console itself owns stdout and stderr is shared with it.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn resolved_file(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| env::temp_dir().join(DEFAULT_LOG_FILE_NAME))
    }
}
