//! Renderer settings
//!
//! Persisted in LocalStorage as JSON. Missing fields fall back to defaults,
//! so older saves keep loading.

use serde::{Deserialize, Serialize};

use crate::error::ConstructionError;
use crate::renderer::paint::{OBSTACLE_COLOUR, TEAM_PALETTE};
use crate::sim::Options;

/// Colours used when painting a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Fill for the frame clear. None clears to transparent.
    pub background: Option<String>,
    pub obstacle_colour: String,
    /// Team `i` is painted with `team_palette[i % len]`
    pub team_palette: Vec<String>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: None,
            obstacle_colour: OBSTACLE_COLOUR.to_string(),
            team_palette: TEAM_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level(self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Everything the entry point needs to start a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// DOM id of the target canvas
    pub canvas_id: String,
    pub log_level: LogLevel,
    pub style: Style,
    /// Simulation options. A seed of 0 means "pick one at startup".
    pub game: Options,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_id: "arena".to_string(),
            log_level: LogLevel::default(),
            style: Style::default(),
            game: Options::default(),
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "graph_fight_settings";

    pub fn validate(&self) -> Result<(), ConstructionError> {
        if self.style.team_palette.is_empty() {
            return Err(ConstructionError::EmptyPalette);
        }
        self.game.validate()?;
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native builds have no LocalStorage
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
