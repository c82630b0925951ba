//! Application entry point: Text Corrector.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run) and
//!    resolve the API key.
//! 3. Open the append-only diagnostic log.
//! 4. Create the [`tokio`] runtime that runs correction tasks.
//! 5. Build the [`CorrectionGateway`] for the configured backend.
//! 6. Run [`eframe::run_native`], which blocks the main thread until the
//!    window is closed.

use std::sync::Arc;

use eframe::egui;
use text_corrector::{
    app::CorrectorApp,
    config::{AppConfig, AppPaths, Backend, API_KEY_ENV},
    correction::{CorrectionGateway, InputValidator},
    diagnostics::DiagnosticLog,
    session::CorrectionSession,
};

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let vp = egui::ViewportBuilder::default()
        .with_title(config.backend.window_title())
        .with_inner_size([config.ui.window_width, config.ui.window_height])
        .with_resizable(config.ui.resizable);

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Text Corrector starting up");

    // 2. Configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });
    config.resolve_api_key(std::env::var(API_KEY_ENV).ok());

    if config.backend == Backend::Api && config.api.api_key.is_none() {
        log::warn!("No API key in settings.toml or {API_KEY_ENV}; requests will be rejected");
    }

    // 3. Diagnostic log
    let paths = AppPaths::new();
    let diagnostics = match DiagnosticLog::open(&paths.error_log_file) {
        Ok(log) => {
            log::info!("Diagnostic log: {}", paths.error_log_file.display());
            log
        }
        Err(e) => {
            log::warn!(
                "Could not open {} ({e}); failures go to the console only",
                paths.error_log_file.display()
            );
            DiagnosticLog::discard()
        }
    };

    // 4. Tokio runtime (one worker; at most one request is ever in flight)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 5. Gateway + session
    let gateway = Arc::new(CorrectionGateway::from_config(&config, Arc::new(diagnostics)));
    log::info!("Correction backend: {}", gateway.backend_name());

    let session = CorrectionSession::new(
        gateway,
        InputValidator::new(config.input_limit()),
        rt.handle().clone(),
    );

    // 6. Window (blocks until closed)
    let app = CorrectorApp::new(session, &config);
    let options = native_options(&config);

    eframe::run_native(
        config.backend.window_title(),
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
