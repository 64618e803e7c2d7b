//! User settings persistence.
//!
//! Stored as JSON in the per-user config directory (e.g.
//! `~/.config/snapask/settings.json` on Linux).

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Prompt used when the question field is left empty.
pub const DEFAULT_PROMPT: &str = "Describe what is shown in this image.";

/// User-configurable settings persisted between sessions.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Model submitted with each request.
    pub model: String,
    /// Prompt used when the question field is empty.
    #[serde(default = "default_prompt")]
    pub default_prompt: String,
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "snapask").map(|dirs| {
            let config_dir = dirs.config_dir();
            if !config_dir.exists() {
                let _ = fs::create_dir_all(config_dir);
            }
            config_dir.join("settings.json")
        })
    }

    /// Loads settings from disk, falling back to defaults built around
    /// the environment-configured model.
    pub fn load(default_model: &str) -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(&path).ok())
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_else(|| Self::with_defaults(default_model))
    }

    pub fn with_defaults(model: &str) -> Self {
        Self {
            model: model.to_string(),
            default_prompt: default_prompt(),
        }
    }

    /// Persists settings to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(path) = Self::config_path() {
            let json = serde_json::to_string_pretty(self)?;
            fs::write(path, json)?;
        }
        Ok(())
    }
}
