//! Configuration file parser for ~/.config/clipdeck/config.toml.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys are ignored by serde but logged as a warning, since they are
//! usually typos. Numeric values outside their usable range are clamped.
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::media::{MediaParams, SimulatedOptions};
use crate::player::SessionOptions;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Struct
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme variant name ("dark" or "light").
    pub theme: String,

    /// Keybinding overrides. Keys are action names, values are key strings.
    pub keybindings: HashMap<String, String>,

    /// Seconds moved by the skip back/forward controls.
    pub skip_seconds: f64,

    /// Fraction added or removed by one volume key press.
    pub volume_step: f64,

    /// Volume a new player session starts at.
    pub initial_volume: f64,

    /// Whether media may start before it has finished loading.
    pub autoplay: bool,

    /// Simulated buffering time before media reports ready.
    pub load_delay_ms: u64,

    /// Duration used for videos whose catalog entry has none.
    pub default_duration_seconds: f64,

    /// Drag distance units per terminal row for drag-to-dismiss.
    pub drag_units_per_row: f64,

    /// Smallest terminal that can enter fullscreen.
    pub fullscreen_min_width: u16,
    pub fullscreen_min_height: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            keybindings: HashMap::new(),
            skip_seconds: 10.0,
            volume_step: 0.1,
            initial_volume: 1.0,
            autoplay: true,
            load_delay_ms: 600,
            default_duration_seconds: 180.0,
            drag_units_per_row: 25.0,
            fullscreen_min_width: 60,
            fullscreen_min_height: 16,
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 11] = [
        "theme",
        "keybindings",
        "skip_seconds",
        "volume_step",
        "initial_volume",
        "autoplay",
        "load_delay_ms",
        "default_duration_seconds",
        "drag_units_per_row",
        "fullscreen_min_width",
        "fullscreen_min_height",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        let config = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), theme = %config.theme, "Loaded configuration");
        Ok(config)
    }

    /// Parse TOML text, warn on unknown keys, and clamp numeric values.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        Ok(config.clamped())
    }

    /// Bring every numeric value into its usable range.
    pub fn clamped(mut self) -> Self {
        let defaults = Self::default();
        self.skip_seconds = finite_or(self.skip_seconds, defaults.skip_seconds).clamp(1.0, 600.0);
        self.volume_step = finite_or(self.volume_step, defaults.volume_step).clamp(0.01, 1.0);
        self.initial_volume =
            finite_or(self.initial_volume, defaults.initial_volume).clamp(0.0, 1.0);
        self.load_delay_ms = self.load_delay_ms.min(30_000);
        self.default_duration_seconds =
            finite_or(self.default_duration_seconds, defaults.default_duration_seconds)
                .clamp(1.0, 86_400.0);
        self.drag_units_per_row =
            finite_or(self.drag_units_per_row, defaults.drag_units_per_row).clamp(1.0, 200.0);
        self.fullscreen_min_width = self.fullscreen_min_width.clamp(20, 1000);
        self.fullscreen_min_height = self.fullscreen_min_height.clamp(8, 1000);
        self
    }

    /// Options for the simulated media backend.
    pub fn simulated_options(&self) -> SimulatedOptions {
        SimulatedOptions {
            load_delay: Duration::from_millis(self.load_delay_ms),
            default_duration: self.default_duration_seconds,
            autoplay: self.autoplay,
        }
    }

    /// Options for new playback sessions.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            initial_volume: self.initial_volume,
            media_params: MediaParams::default(),
        }
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

// ============================================================================
// Tests
// ============================================================================
