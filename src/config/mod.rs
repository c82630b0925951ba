//! Configuration module for the text corrector.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for each correction
//! backend and the UI, `AppPaths` for cross-platform directories, and TOML
//! persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    ApiConfig, AppConfig, Backend, InputConfig, LocalConfig, UiConfig, API_KEY_ENV,
};
