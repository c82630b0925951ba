//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

/// Environment variable consulted when `api.api_key` is not set.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// Selects which correction capability handles a request.
///
/// | Variant | Capability                        | Input limit | Timeout |
/// |---------|-----------------------------------|-------------|---------|
/// | Api     | Hosted chat-completion API        | 500 chars   | 15 s    |
/// | Local   | Locally served correction model   | none        | none    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Backend {
    /// OpenAI-compatible `/v1/chat/completions` endpoint.
    Api,
    /// Local model server (Ollama `/api/generate`).
    Local,
}

impl Default for Backend {
    fn default() -> Self {
        Self::Api
    }
}

impl Backend {
    /// Window title shown for this backend.
    pub fn window_title(&self) -> &'static str {
        match self {
            Backend::Api => "Corretor Avançado",
            Backend::Local => "Corretor Ortográfico",
        }
    }
}

// ---------------------------------------------------------------------------
// ApiConfig
// ---------------------------------------------------------------------------

/// Settings for the remote chat-completion backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the API endpoint, without the `/v1/...` suffix.
    pub base_url: String,
    /// API key.  When `None`, [`AppConfig::resolve_api_key`] falls back to
    /// the `OPENAI_API_KEY` environment variable.
    pub api_key: Option<String>,
    /// Model identifier sent to the API.
    pub model: String,
    /// Sampling temperature (0.0 – 1.0).
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Seconds to wait for a response before giving up.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".into(),
            api_key: None,
            model: "gpt-3.5-turbo".into(),
            temperature: 0.2,
            max_tokens: 300,
            timeout_secs: 15,
        }
    }
}

// ---------------------------------------------------------------------------
// LocalConfig
// ---------------------------------------------------------------------------

/// Settings for the local model backend.  No timeout and no authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    /// Base URL of the local model server.
    pub base_url: String,
    /// Model name as known to the local server.
    pub model: String,
    /// Sampling temperature (0.0 – 1.0).
    pub temperature: f32,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".into(),
            model: "qwen2.5:3b".into(),
            temperature: 0.2,
        }
    }
}

// ---------------------------------------------------------------------------
// InputConfig
// ---------------------------------------------------------------------------

/// Input validation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Maximum number of characters accepted by the `Api` backend.
    pub max_chars: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { max_chars: 500 }
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub window_width: f32,
    pub window_height: f32,
    pub resizable: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_width: 600.0,
            window_height: 400.0,
            resizable: false,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use text_corrector::config::AppConfig;
///
/// // First run writes a default settings.toml for the user to edit.
/// let config = AppConfig::load().unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Selected correction backend.
    pub backend: Backend,
    /// Prompt language code (`"pt"` or `"en"`).
    pub language: String,
    /// Remote API settings.
    pub api: ApiConfig,
    /// Local model settings.
    pub local: LocalConfig,
    /// Input validation settings.
    pub input: InputConfig,
    /// Window settings.
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            language: "pt".into(),
            api: ApiConfig::default(),
            local: LocalConfig::default(),
            input: InputConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`,
    /// writing the defaults there on first run.
    pub fn load() -> Result<Self> {
        Self::load_or_create(&AppPaths::new().settings_file)
    }

    /// Load from `path`; if it does not exist yet, write the defaults to it
    /// so the backend and key can be edited by hand.  A failed write is
    /// logged and the defaults are still returned.
    pub fn load_or_create(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            return Self::load_from(path);
        }

        let config = Self::default();
        match config.save_to(path) {
            Ok(()) => log::info!("Wrote default settings to {}", path.display()),
            Err(e) => log::warn!("Could not write {} ({e})", path.display()),
        }
        Ok(config)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Character limit enforced before submission.  Only the `Api` backend
    /// is bounded.
    pub fn input_limit(&self) -> Option<usize> {
        match self.backend {
            Backend::Api => Some(self.input.max_chars),
            Backend::Local => None,
        }
    }

    /// Fill `api.api_key` from `env_value` when the settings file has none.
    ///
    /// `main` passes `std::env::var(API_KEY_ENV).ok()`; the key is then
    /// handed to the backend constructor explicitly.
    pub fn resolve_api_key(&mut self, env_value: Option<String>) {
        let configured = self
            .api
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty());
        if configured {
            return;
        }
        self.api.api_key = env_value
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
