//! Correction gateway: one backend call per request, failures logged once.

use std::sync::Arc;

use crate::config::{AppConfig, Backend};
use crate::correction::corrector::{ApiCorrector, CorrectionBackend};
use crate::correction::error::{CorrectionError, CorrectionResult};
use crate::correction::local::LocalCorrector;
use crate::diagnostics::DiagnosticLog;

/// Forwards text to a [`CorrectionBackend`] and folds the outcome into a
/// [`CorrectionResult`].
///
/// * Blank input short-circuits to `Failure(EmptyInput)` with no backend
///   call and no log record.
/// * Every backend failure writes exactly one `ERROR` record to the
///   [`DiagnosticLog`].
/// * No retries.
pub struct CorrectionGateway {
    backend: Arc<dyn CorrectionBackend>,
    log: Arc<DiagnosticLog>,
}

impl CorrectionGateway {
    pub fn new(backend: Arc<dyn CorrectionBackend>, log: Arc<DiagnosticLog>) -> Self {
        Self { backend, log }
    }

    /// Build the backend selected by `config.backend`.
    pub fn from_config(config: &AppConfig, log: Arc<DiagnosticLog>) -> Self {
        let backend: Arc<dyn CorrectionBackend> = match config.backend {
            Backend::Api => Arc::new(ApiCorrector::from_config(&config.api, &config.language)),
            Backend::Local => {
                Arc::new(LocalCorrector::from_config(&config.local, &config.language))
            }
        };
        Self::new(backend, log)
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub async fn correct(&self, text: &str) -> CorrectionResult {
        if text.trim().is_empty() {
            return CorrectionError::EmptyInput.into();
        }

        log::debug!(
            "gateway: sending {} chars to {}",
            text.chars().count(),
            self.backend.name()
        );

        match self.backend.correct(text).await {
            Ok(corrected) => CorrectionResult::Success(corrected),
            Err(err) => self.fail(err),
        }
    }

    /// Write `err` to the diagnostic log once and turn it into a failure
    /// result.  Also used by the session when a task dies before the
    /// gateway could report.
    pub fn fail(&self, err: CorrectionError) -> CorrectionResult {
        self.log.error(&err.log_message());
        err.into()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
