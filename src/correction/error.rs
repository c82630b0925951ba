//! Error taxonomy and the typed correction result.
//!
//! [`CorrectionError`] is what a [`CorrectionBackend`](super::CorrectionBackend)
//! returns; its `Display` text is the message shown to the user and
//! [`CorrectionError::log_message`] is the text written to the diagnostic log.
//! The gateway folds either outcome into a [`CorrectionResult`].

use thiserror::Error;

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// Closed set of failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyInput,
    TooLong,
    AuthenticationFailure,
    RateLimited,
    Timeout,
    ProviderError,
    UnexpectedError,
}

// ---------------------------------------------------------------------------
// CorrectionError
// ---------------------------------------------------------------------------

/// Failures surfaced by a correction backend or the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorrectionError {
    #[error("Erro: Texto vazio. Por favor, digite algo para corrigir.")]
    EmptyInput,

    /// The provider rejected the credentials (HTTP 401).
    #[error("Erro: Chave de API inválida. Verifique as configurações.")]
    AuthenticationFailure,

    /// The provider throttled the request (HTTP 429).
    #[error("Erro: Limite de requisições excedido. Tente novamente mais tarde.")]
    RateLimited,

    /// No response within the configured client timeout.
    #[error("Erro: Tempo de conexão esgotado. Verifique sua internet.")]
    Timeout,

    /// The provider answered, but with an error status or an unusable body.
    #[error("Erro na API: {0}")]
    ProviderError(String),

    /// Anything else on the API path, e.g. a refused connection.
    #[error("Erro inesperado: {0}")]
    UnexpectedError(String),

    /// The local model failed.  Same kind as `UnexpectedError`, but worded
    /// the way the local corrector reports it.
    #[error("Erro: {0}")]
    ModelError(String),
}

impl CorrectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CorrectionError::EmptyInput => ErrorKind::EmptyInput,
            CorrectionError::AuthenticationFailure => ErrorKind::AuthenticationFailure,
            CorrectionError::RateLimited => ErrorKind::RateLimited,
            CorrectionError::Timeout => ErrorKind::Timeout,
            CorrectionError::ProviderError(_) => ErrorKind::ProviderError,
            CorrectionError::UnexpectedError(_) | CorrectionError::ModelError(_) => {
                ErrorKind::UnexpectedError
            }
        }
    }

    /// Text recorded in the diagnostic log for this failure.
    pub fn log_message(&self) -> String {
        match self {
            // Never written: the gateway returns before logging blank input.
            CorrectionError::EmptyInput => "Texto vazio".into(),
            CorrectionError::AuthenticationFailure => "Falha de autenticação na API".into(),
            CorrectionError::RateLimited => "Limite de taxa excedido".into(),
            CorrectionError::Timeout => "Timeout na requisição".into(),
            CorrectionError::ProviderError(detail) => format!("Erro de API: {detail}"),
            CorrectionError::UnexpectedError(detail) => format!("Erro inesperado: {detail}"),
            CorrectionError::ModelError(detail) => format!("Erro ao corrigir o texto: {detail}"),
        }
    }
}

impl From<reqwest::Error> for CorrectionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CorrectionError::Timeout
        } else if e.is_decode() {
            CorrectionError::ProviderError(e.to_string())
        } else {
            CorrectionError::UnexpectedError(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// CorrectionResult
// ---------------------------------------------------------------------------

/// Outcome of one correction request, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectionResult {
    Success(String),
    Failure { kind: ErrorKind, message: String },
}

impl CorrectionResult {
    pub fn is_failure(&self) -> bool {
        matches!(self, CorrectionResult::Failure { .. })
    }

    /// The text to place in the output region.
    pub fn text(&self) -> &str {
        match self {
            CorrectionResult::Success(text) => text,
            CorrectionResult::Failure { message, .. } => message,
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            CorrectionResult::Success(_) => None,
            CorrectionResult::Failure { kind, .. } => Some(*kind),
        }
    }
}

impl From<CorrectionError> for CorrectionResult {
    fn from(e: CorrectionError) -> Self {
        CorrectionResult::Failure {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
