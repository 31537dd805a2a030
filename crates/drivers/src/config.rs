use std::fs;
use std::path::{Path, PathBuf};

use inkpad_application::PadSettings;
use inkpad_domain::{FilterParams, Rgba};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_ENV: &str = "INKPAD_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "inkpad.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for {name}: {value}")]
    Override { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub export_path: String,
    pub ink: Rgba,
    pub background: Rgba,
    pub stroke_width: f32,
    pub text_size_px: u32,
    pub filter: FilterParams,
    pub min_parallel_pixels: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_width: 600,
            canvas_height: 240,
            export_path: "signature.png".to_string(),
            ink: Rgba::BLACK,
            background: Rgba::WHITE,
            stroke_width: 2.0,
            text_size_px: 48,
            filter: FilterParams::default(),
            min_parallel_pixels: 65_536,
        }
    }
}

impl AppConfig {
    /// Defaults, then the JSON file named by `INKPAD_CONFIG` (or `inkpad.json`
    /// if present), then single-field environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(path) = lookup("INKPAD_EXPORT_PATH") {
            self.export_path = path;
        }
        if let Some(value) = lookup("INKPAD_CANVAS_WIDTH") {
            self.canvas_width = parse_dimension("INKPAD_CANVAS_WIDTH", value)?;
        }
        if let Some(value) = lookup("INKPAD_CANVAS_HEIGHT") {
            self.canvas_height = parse_dimension("INKPAD_CANVAS_HEIGHT", value)?;
        }
        Ok(())
    }

    pub fn pad_settings(&self) -> PadSettings {
        PadSettings {
            width: self.canvas_width,
            height: self.canvas_height,
            stroke_width: self.stroke_width,
            text_size_px: self.text_size_px,
            ink: self.ink,
            background: self.background,
            filter: self.filter,
            export_path: PathBuf::from(&self.export_path),
        }
    }
}

fn parse_dimension(name: &'static str, value: String) -> Result<u32, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(ConfigError::Override { name, value }),
    }
}
