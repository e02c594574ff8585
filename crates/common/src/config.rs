//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Filesystem locations used by the pipeline and its collaborators.
    pub paths: Paths,

    /// Fixed rendering parameters.
    pub rendering: RenderDefaults,

    /// Narration synthesis settings.
    pub narration: NarrationDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Filesystem layout. All intermediate artifacts for one item live in a
/// per-item subdirectory of `work_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paths {
    /// Read-only assets (background images under `backgrounds/`).
    pub assets_dir: PathBuf,

    /// Working directory holding per-item working sets.
    pub work_dir: PathBuf,

    /// TrueType font used for title and description text.
    pub font_path: PathBuf,

    /// Content queue file (JSON array of content items).
    pub queue_path: PathBuf,

    /// Completed-items ledger (newline-delimited ids, append-only).
    pub ledger_path: PathBuf,
}

/// Fixed rendering parameters.
///
/// These are the de-facto contract with downstream collaborators and are
/// not negotiated per item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RenderDefaults {
    /// Canvas width in pixels.
    pub canvas_width: u32,

    /// Canvas height in pixels.
    pub canvas_height: u32,

    /// Title font size in pixels.
    pub title_font_size: f32,

    /// Description font size in pixels.
    pub description_font_size: f32,

    /// Description wrap width in characters per line.
    pub wrap_width: usize,

    /// On-screen duration of each frame in seconds.
    pub seconds_per_frame: u32,
}

/// Narration synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrationDefaults {
    /// Language code passed to the speech service (ISO 639-1).
    pub language: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "reelsmith=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            paths: Paths::default(),
            rendering: RenderDefaults::default(),
            narration: NarrationDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for Paths {
    fn default() -> Self {
        let data = dirs_default_data();
        Self {
            assets_dir: data.join("assets"),
            work_dir: data.join("work"),
            font_path: data.join("assets").join("fonts").join("default.ttf"),
            queue_path: data.join("content.json"),
            ledger_path: data.join("completed.txt"),
        }
    }
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            canvas_width: 1280,
            canvas_height: 720,
            title_font_size: 55.0,
            description_font_size: 25.0,
            wrap_width: 54,
            seconds_per_frame: 5,
        }
    }
}

impl Default for NarrationDefaults {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("reelsmith").join("config.json")
}

/// Default data directory.
fn dirs_default_data() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("reelsmith")
}
