use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/blogcast/config.toml` or `~/.config/blogcast/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `BLOGCAST__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub library: LibrarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Where the generation and library services live.
    pub base_url: String,
    /// Path of the library listing endpoint, relative to `base_url`.
    pub library_path: String,
    /// Path of the generation endpoint, relative to `base_url`.
    pub generate_path: String,
    /// Global per-request timeout in seconds. Unset means wait indefinitely,
    /// which suits slow speech synthesis.
    pub timeout_secs: Option<u64>,
    /// Largest media download accepted for playback or probing, in bytes.
    pub max_media_bytes: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            library_path: "/get-audio-library".to_string(),
            generate_path: "/search-view/".to_string(),
            timeout_secs: None,
            max_media_bytes: 256 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// How long transient messages (e.g. input validation) stay visible (milliseconds).
    pub message_timeout_ms: u64,
    /// Render durations of an hour or more as `H:MM:SS` instead of `MM:SS`.
    pub duration_hours: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " Start Listening Now ".to_string(),
            message_timeout_ms: 5000,
            duration_hours: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// What to do with the library listing after audio was generated.
    pub after_generate: AfterGenerate,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AfterGenerate {
    /// Leave the listing untouched.
    #[serde(alias = "none", alias = "nothing")]
    Keep,
    /// Fetch the whole listing again.
    #[default]
    #[serde(alias = "reload", alias = "refresh")]
    Refetch,
    /// Add the new track to the end of the listing.
    Append,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter when `BLOGCAST_LOG` is not set (env_logger syntax).
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/blogcast/blogcast.log`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
