//! Where the corrector keeps its files.
//!
//! | File                  | Base directory (`dirs`)  |
//! |-----------------------|--------------------------|
//! | `settings.toml`       | `config_dir()`           |
//! | `corretor_errors.log` | `data_local_dir()`       |
//!
//! Both live in a `text-corrector` subdirectory.  When the platform reports
//! no base directory, the current directory is used instead.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "text-corrector";
const SETTINGS_NAME: &str = "settings.toml";
const ERROR_LOG_NAME: &str = "corretor_errors.log";

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub settings_file: PathBuf,
    pub data_dir: PathBuf,
    /// Append-only diagnostic log, see [`crate::diagnostics::DiagnosticLog`].
    pub error_log_file: PathBuf,
}

impl AppPaths {
    pub fn new() -> Self {
        let base = |dir: Option<PathBuf>| dir.unwrap_or_else(|| PathBuf::from("."));
        Self::from_bases(&base(dirs::config_dir()), &base(dirs::data_local_dir()))
    }

    /// Lay the files out under explicit base directories.
    pub fn from_bases(config_base: &Path, data_base: &Path) -> Self {
        let config_dir = config_base.join(APP_DIR);
        let data_dir = data_base.join(APP_DIR);

        Self {
            settings_file: config_dir.join(SETTINGS_NAME),
            error_log_file: data_dir.join(ERROR_LOG_NAME),
            config_dir,
            data_dir,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
