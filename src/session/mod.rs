//! Submit / await / render cycle behind the window.
//!
//! ```text
//! CorrectorApp::update()  (every frame)
//!        │
//!        ├─ button clicked → CorrectionSession::submit(text)
//!        │                     ├─ Rejected → warning dialog
//!        │                     └─ Started  → tokio task: gateway.correct(text)
//!        │                                                   │
//!        └─ CorrectionSession::poll() ◀──── mpsc ────────────┘
//! ```
//!
//! Nothing in here touches egui, so the whole cycle is testable without a
//! window.

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{CorrectionSession, SubmitOutcome};
pub use state::{RenderedOutput, SessionState};
