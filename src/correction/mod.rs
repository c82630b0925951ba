//! Text correction: validation, backends and the gateway.
//!
//! This module provides:
//! * [`InputValidator`] / [`ValidationError`]: preconditions checked before
//!   any request.
//! * [`CorrectionBackend`]: async trait implemented by every backend.
//! * [`ApiCorrector`]: OpenAI-compatible chat-completion backend.
//! * [`LocalCorrector`]: local model server backend.
//! * [`CorrectionGateway`]: one call per request, typed result, failure log.
//! * [`PromptBuilder`]: correction prompts.
//! * [`CorrectionError`] / [`ErrorKind`] / [`CorrectionResult`].
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use text_corrector::config::AppConfig;
//! use text_corrector::correction::CorrectionGateway;
//! use text_corrector::diagnostics::DiagnosticLog;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let gateway = CorrectionGateway::from_config(&config, Arc::new(DiagnosticLog::discard()));
//!
//!     let result = gateway.correct("Ela fez o trabalho rápido.").await;
//!     println!("{}", result.text());
//! }
//! ```

pub mod corrector;
pub mod error;
pub mod gateway;
pub mod local;
pub mod prompt;
pub mod validator;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use corrector::{classify_status, ApiCorrector, CorrectionBackend};
pub use error::{CorrectionError, CorrectionResult, ErrorKind};
pub use gateway::CorrectionGateway;
pub use local::LocalCorrector;
pub use prompt::PromptBuilder;
pub use validator::{InputValidator, ValidationError, API_MAX_CHARS};

#[cfg(test)]
pub use corrector::StubBackend;
