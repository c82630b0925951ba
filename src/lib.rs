//! Text Corrector: a small desktop form that sends text to a correction
//! backend and shows the corrected result.
//!
//! * [`correction`]: input validation, correction backends and the gateway
//!   that turns backend failures into a typed [`correction::CorrectionResult`].
//! * [`session`]: the GUI-independent submit / await / render state machine.
//! * [`app`]: the eframe window.
//! * [`config`]: TOML settings and platform paths.
//! * [`diagnostics`]: the append-only error log.

pub mod app;
pub mod config;
pub mod correction;
pub mod diagnostics;
pub mod session;
