use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::export::ExportFormat;
use crate::label::{clamp_font_size, Label, LabelId};
use crate::util::color;

/// File looked up in the working directory at startup
pub const CONFIG_FILE_NAME: &str = "image-labeler.json";

/// Editor settings. Every field has a default, so a config file only needs
/// the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Share of the window, per axis, the image may take up
    pub viewport_fraction: f32,
    pub label_text: String,
    pub label_font_size: u32,
    /// `#rrggbb`
    pub label_color: String,
    /// `#rrggbb`, or empty for transparent
    pub label_background: String,
    pub export_scale: f32,
    pub export_format: ExportFormat,
    /// Write exports here instead of asking with a save dialog
    pub export_dir: Option<PathBuf>,
    pub notice_seconds: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            viewport_fraction: 0.7,
            label_text: "New Text".to_owned(),
            label_font_size: 24,
            label_color: "#000000".to_owned(),
            label_background: String::new(),
            export_scale: 2.0,
            export_format: ExportFormat::Png,
            export_dir: None,
            notice_seconds: 3.0,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load `path` if it exists. A broken file is logged and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("ignoring {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn viewport_fraction(&self) -> f32 {
        if self.viewport_fraction > 0.0 && self.viewport_fraction <= 1.0 {
            self.viewport_fraction
        } else {
            Self::default().viewport_fraction
        }
    }

    pub fn export_scale(&self) -> f32 {
        if self.export_scale > 0.0 {
            self.export_scale
        } else {
            Self::default().export_scale
        }
    }

    pub fn label_color(&self) -> Color32 {
        color::parse_hex(&self.label_color).unwrap_or(Color32::BLACK)
    }

    pub fn label_background(&self) -> Option<Color32> {
        color::parse_background(&self.label_background).unwrap_or(None)
    }

    /// A label with the configured defaults
    pub fn new_label(&self, id: LabelId, position: egui::Pos2) -> Label {
        Label::new(id, self.label_text.clone(), position)
            .with_font_size(clamp_font_size(self.label_font_size))
            .with_color(self.label_color())
            .with_background(self.label_background())
    }
}
