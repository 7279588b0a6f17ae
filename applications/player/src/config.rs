/// Player configuration
use crate::error::{PlayerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default = "default_library")]
    pub library: LibrarySettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,

    #[serde(default = "default_ui")]
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibrarySettings {
    /// Directory tree to enumerate for videos
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    /// mpv binary to spawn
    #[serde(default = "default_mpv_binary")]
    pub mpv_binary: String,

    /// Extra arguments appended to the mpv command line
    #[serde(default = "default_mpv_args")]
    pub mpv_args: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiSettings {
    /// Whether to send desktop notifications on video changes
    #[serde(default = "default_notifications")]
    pub notifications: bool,

    /// Whether to show the splash sequence on startup
    #[serde(default = "default_splash")]
    pub splash: bool,

    /// Frame tick interval in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl PlayerConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match config_path {
            // An explicitly requested file must exist.
            Some(path) => {
                if !path.exists() {
                    return Err(PlayerError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            // The default file is optional.
            None => {
                let default_path = Path::new("matinee.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with MATINEE_)
        settings = settings.add_source(
            config::Environment::with_prefix("MATINEE")
                .separator("_")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| PlayerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| PlayerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.library.root.as_os_str().is_empty() {
            return Err(PlayerError::Config(
                "Library root is required (set MATINEE_LIBRARY_ROOT or library.root)".to_string(),
            ));
        }

        if self.ui.tick_interval_ms == 0 {
            return Err(PlayerError::Config(
                "UI tick interval must be at least 1 ms".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_library() -> LibrarySettings {
    LibrarySettings {
        root: default_root(),
    }
}

fn default_root() -> PathBuf {
    dirs_fallback_videos()
}

/// `~/Videos` when a home directory is resolvable, `./videos` otherwise
fn dirs_fallback_videos() -> PathBuf {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join("Videos"))
        .unwrap_or_else(|| PathBuf::from("./videos"))
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        mpv_binary: default_mpv_binary(),
        mpv_args: default_mpv_args(),
    }
}

fn default_mpv_binary() -> String {
    "mpv".to_string()
}

fn default_mpv_args() -> Vec<String> {
    vec![]
}

fn default_ui() -> UiSettings {
    UiSettings {
        notifications: default_notifications(),
        splash: default_splash(),
        tick_interval_ms: default_tick_interval_ms(),
    }
}

fn default_notifications() -> bool {
    true
}

fn default_splash() -> bool {
    true
}

fn default_tick_interval_ms() -> u64 {
    100
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            library: default_library(),
            playback: default_playback(),
            ui: default_ui(),
        }
    }
}
