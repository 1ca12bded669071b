use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, TinkerError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub editor: EditorSettings,
    /// Override for the state directory; `~/.tinkerpad` when unset.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorSettings {
    pub theme: String,
    pub font_size: f32,
    pub tab_size: u32,
    pub show_line_numbers: bool,
    pub auto_save: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            editor: EditorSettings {
                theme: "Dark".to_string(),
                font_size: 14.0,
                tab_size: 4,
                show_line_numbers: true,
                auto_save: true,
            },
            storage_dir: None,
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tinkerpad")
            .join("config.toml")
    }

    /// Load settings, falling back to defaults when the file is absent or
    /// unreadable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        if config_path.exists() {
            if let Ok(content) = std::fs::read_to_string(&config_path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| TinkerError::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}
