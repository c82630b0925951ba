//! Session state machine and the rendered view of a result.
//!
//! [`SessionState`] drives the submit cycle:
//!
//! ```text
//! Idle ──submit (valid)──▶ Submitting ──task spawned──▶ AwaitingResult
//!  ▲                                                          │
//!  └────────────────────── result received ───────────────────┘
//! ```
//!
//! Invalid input never leaves `Idle`.

use crate::correction::CorrectionResult;

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Waiting for the user to submit.
    #[default]
    Idle,

    /// Input accepted; the correction task is being scheduled.
    Submitting,

    /// The correction task is running.
    AwaitingResult,
}

impl SessionState {
    /// Returns `true` while a request is in flight.
    ///
    /// The UI disables the input region and submit button while busy.
    ///
    /// ```
    /// use text_corrector::session::SessionState;
    ///
    /// assert!(!SessionState::Idle.is_busy());
    /// assert!(SessionState::Submitting.is_busy());
    /// assert!(SessionState::AwaitingResult.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        !matches!(self, SessionState::Idle)
    }
}

// ---------------------------------------------------------------------------
// RenderedOutput
// ---------------------------------------------------------------------------

/// What the output region shows: the text, and whether it is error-styled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    pub text: String,
    pub is_error: bool,
}

impl From<&CorrectionResult> for RenderedOutput {
    fn from(result: &CorrectionResult) -> Self {
        Self {
            text: result.text().to_string(),
            is_error: result.is_failure(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
