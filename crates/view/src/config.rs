// Chunk: docs/chunks/merge_session - Paired-view session: freshness, scroll sync, chunk copying
//!
//! Session configuration and where it is loaded from.
//!
//! The file is optional JSON; every field has a default, so a partial file
//! only overrides what it names. A broken default config must not stop the
//! merge view from starting, so that path degrades to defaults with a
//! warning. A file named explicitly by the caller reports its errors.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lite_merge_diff::DiffOptions;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::debounce::{DEFAULT_DEBOUNCE_MS, DEFAULT_SLOW_DEBOUNCE_MS};
use crate::error::MergeError;
use crate::pane::PaneGeometry;
use crate::scroll_sync::DEFAULT_ECHO_WINDOW_MS;

/// Application directory name under the platform config directory.
const APP_NAME: &str = "lite-merge";

/// Config file name.
const CONFIG_FILENAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Delay before recomputing after an ordinary change.
    pub debounce_ms: u64,
    /// Delay before recomputing after a bulk change.
    pub slow_debounce_ms: u64,
    /// How long a pane ignores scroll reports of offsets a view just wrote.
    pub echo_window_ms: u64,
    pub line_height_px: f32,
    pub char_width_px: f32,
    pub viewport_height_px: f32,
    pub viewport_width_px: f32,
    /// Whether diff views start with scroll lock on.
    pub lock_scroll: bool,
    pub diff: DiffOptions,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            slow_debounce_ms: DEFAULT_SLOW_DEBOUNCE_MS,
            echo_window_ms: DEFAULT_ECHO_WINDOW_MS,
            line_height_px: 16.0,
            char_width_px: 8.0,
            viewport_height_px: 480.0,
            viewport_width_px: 640.0,
            lock_scroll: true,
            diff: DiffOptions::default(),
        }
    }
}

impl MergeConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn slow_debounce(&self) -> Duration {
        Duration::from_millis(self.slow_debounce_ms)
    }

    pub fn echo_window(&self) -> Duration {
        Duration::from_millis(self.echo_window_ms)
    }

    /// Viewport metrics every pane starts with.
    pub fn pane_geometry(&self) -> PaneGeometry {
        PaneGeometry {
            line_height: self.line_height_px,
            char_width: self.char_width_px,
            viewport_height: self.viewport_height_px,
            viewport_width: self.viewport_width_px,
        }
    }

    /// Parses a config from JSON text and checks its pane geometry.
    pub fn from_json(path: &Path, text: &str) -> Result<Self, MergeError> {
        let config: Self = serde_json::from_str(text).map_err(|source| MergeError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate().map_err(|reason| MergeError::ConfigInvalid {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(config)
    }

    /// Checks the geometry panes are built from.
    ///
    /// Line height and char width must be positive; viewport sizes must not be
    /// negative. All must be finite.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("line_height_px", self.line_height_px),
            ("char_width_px", self.char_width_px),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{name} must be positive, got {value}"));
            }
        }
        let non_negative = [
            ("viewport_height_px", self.viewport_height_px),
            ("viewport_width_px", self.viewport_width_px),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("{name} must not be negative, got {value}"));
            }
        }
        Ok(())
    }

    /// Loads the config at `path`. Every failure is an error.
    pub fn load_from(path: &Path) -> Result<Self, MergeError> {
        let text = fs::read_to_string(path).map_err(|source| MergeError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &text)
    }

    /// Loads the config from the default location.
    ///
    /// A missing file, or a platform without a config directory, yields the
    /// defaults. An unreadable or invalid file is logged and also yields the
    /// defaults.
    pub fn load_default() -> Self {
        match default_config_path() {
            Some(path) => Self::load_or_default(&path),
            None => Self::default(),
        }
    }

    /// Loads `path` if it exists, degrading to defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(path).unwrap_or_else(|e| {
            warn!("{e}; using default settings");
            Self::default()
        })
    }
}

/// `<config dir>/lite-merge/config.json`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join(APP_NAME).join(CONFIG_FILENAME))
}
