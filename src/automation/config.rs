//! Configuration for review capture sessions.
//!
//! Loaded from config.json next to the executable (or an explicit path).
//! Every field has a default, so a partial file is fine.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::capture::Corrections;

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Window chrome correction in pixels (x -= offset, y += offset)
    pub chrome_offset: f64,
    /// Border correction for regions nested in a panel
    pub panel_border_offset: f64,
    /// Delay after an export before capturing the window (milliseconds)
    pub settle_delay_ms: u64,
    /// Maximum time to wait for an export file to appear (milliseconds)
    pub export_timeout_ms: u64,
    /// Poll interval while waiting for an export (milliseconds)
    pub poll_interval_ms: u64,
    /// Substring of the host window title
    pub host_window_title: String,
    /// Window class of the view selector control
    pub view_selector_class: String,
    /// Caption of the export button
    pub export_button_text: String,
    /// Directory the host writes its exported tables into
    pub export_dir: Option<PathBuf>,
    /// Short names of the views to capture, in order (defaults to the plot order)
    pub views: Option<Vec<String>>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            chrome_offset: 3.0,
            panel_border_offset: 1.0,
            settle_delay_ms: 500,
            export_timeout_ms: 30000,
            poll_interval_ms: 200,
            host_window_title: "Thermal Model Review".to_string(),
            view_selector_class: "ComboBox".to_string(),
            export_button_text: "Export".to_string(),
            export_dir: None,
            views: None,
        }
    }
}

impl ReviewConfig {
    /// Loads configuration from `path`, or from config.json next to the
    /// executable. Falls back to defaults when the file is missing or invalid.
    pub fn load(path: Option<&Path>) -> Self {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| crate::paths::get_exe_dir().join("config.json"));

        info!("Looking for config at: {}", config_path.display());

        if !config_path.exists() {
            info!("config.json not found. Using default config.");
            return Self::default();
        }

        match fs::read_to_string(&config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    info!("Config loaded from {}", config_path.display());
                    config
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}. Using defaults.", config_path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}. Using defaults.", config_path.display(), e);
                Self::default()
            }
        }
    }

    pub fn corrections(&self) -> Corrections {
        Corrections {
            chrome: self.chrome_offset,
            panel_border: self.panel_border_offset,
        }
    }

    /// Export directory, falling back to the user's documents folder.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(dirs::document_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
