//! Session controller: validate, spawn one correction task, collect its
//! result.
//!
//! [`CorrectionSession`] owns the [`SessionState`] and is driven by the UI:
//!
//! ```text
//! submit(text)
//!   ├─ busy                 → SubmitOutcome::Busy        (state unchanged)
//!   ├─ validation fails     → SubmitOutcome::Rejected(e) (stays Idle, no task)
//!   └─ ok → Submitting → spawn(gateway.correct) → AwaitingResult
//!
//! poll()  (every frame)
//!   └─ result on channel    → Idle, output rendered
//! ```
//!
//! The correction runs as a task on the tokio runtime, so the window keeps
//! repainting while the request is in flight.  Results travel back over a
//! `tokio::sync::mpsc` channel tagged with a request id; results from an
//! aborted request are discarded.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::task::JoinHandle;

use crate::correction::{
    CorrectionError, CorrectionGateway, CorrectionResult, InputValidator, ValidationError,
};

use super::state::{RenderedOutput, SessionState};

// ---------------------------------------------------------------------------
// SubmitOutcome
// ---------------------------------------------------------------------------

/// What happened to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A correction task was spawned.
    Started,
    /// The input failed validation; the UI should show a warning dialog.
    Rejected(ValidationError),
    /// A request is already in flight.
    Busy,
}

// ---------------------------------------------------------------------------
// CorrectionSession
// ---------------------------------------------------------------------------

pub struct CorrectionSession {
    gateway: Arc<CorrectionGateway>,
    validator: InputValidator,
    runtime: Handle,
    state: SessionState,
    result_tx: mpsc::Sender<(u64, CorrectionResult)>,
    result_rx: mpsc::Receiver<(u64, CorrectionResult)>,
    request_id: u64,
    in_flight: Option<JoinHandle<()>>,
    output: Option<RenderedOutput>,
    last_result: Option<CorrectionResult>,
}

impl CorrectionSession {
    /// * `gateway`: shared correction gateway.
    /// * `validator`: preconditions for this backend.
    /// * `runtime`: handle of the runtime the correction task runs on.
    pub fn new(gateway: Arc<CorrectionGateway>, validator: InputValidator, runtime: Handle) -> Self {
        let (result_tx, result_rx) = mpsc::channel(4);
        Self {
            gateway,
            validator,
            runtime,
            state: SessionState::Idle,
            result_tx,
            result_rx,
            request_id: 0,
            in_flight: None,
            output: None,
            last_result: None,
        }
    }

    // -----------------------------------------------------------------------
    // Driving the cycle
    // -----------------------------------------------------------------------

    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        if self.state.is_busy() {
            log::warn!("session: submit ignored, a correction is already in flight");
            return SubmitOutcome::Busy;
        }

        let accepted = match self.validator.validate(text) {
            Ok(accepted) => accepted.to_string(),
            Err(e) => {
                log::debug!("session: input rejected ({e})");
                return SubmitOutcome::Rejected(e);
            }
        };

        self.state = SessionState::Submitting;
        self.request_id += 1;

        let id = self.request_id;
        let gateway = Arc::clone(&self.gateway);
        let tx = self.result_tx.clone();

        let handle = self.runtime.spawn(async move {
            let result = gateway.correct(&accepted).await;
            if tx.send((id, result)).await.is_err() {
                log::debug!("session: dropped before request {id} completed");
            }
        });

        self.in_flight = Some(handle);
        self.state = SessionState::AwaitingResult;
        log::debug!("session: request {id} → AwaitingResult");
        SubmitOutcome::Started
    }

    /// Collect a finished result, if any.  Returns `true` when the session
    /// went back to `Idle` during this call.
    ///
    /// A task that ends without delivering a result (it panicked) completes
    /// the request with an `UnexpectedError`, recorded in the diagnostic log
    /// like any other failure, so the controls never stay disabled.
    pub fn poll(&mut self) -> bool {
        let finished = match self.in_flight.as_ref() {
            Some(handle) => handle.is_finished(),
            None => return false,
        };

        loop {
            match self.result_rx.try_recv() {
                Ok((id, result)) if id == self.request_id => {
                    self.finish(result);
                    return true;
                }
                Ok((id, _)) => {
                    log::debug!("session: discarding stale result for request {id}");
                }
                Err(TryRecvError::Empty) if finished => {
                    log::error!(
                        "session: correction task {} ended without a result",
                        self.request_id
                    );
                    let result = self.gateway.fail(CorrectionError::UnexpectedError(
                        "a tarefa de correção terminou sem resultado".into(),
                    ));
                    self.finish(result);
                    return true;
                }
                Err(_) => return false,
            }
        }
    }

    /// Abort the in-flight task, if any, and return to `Idle`.  The output
    /// region keeps whatever it showed before.
    pub fn abort(&mut self) -> bool {
        match self.in_flight.take() {
            Some(handle) => {
                handle.abort();
                self.state = SessionState::Idle;
                log::info!("session: request {} aborted", self.request_id);
                true
            }
            None => false,
        }
    }

    fn finish(&mut self, result: CorrectionResult) {
        self.state = SessionState::Idle;
        self.in_flight = None;
        self.output = Some(RenderedOutput::from(&result));
        self.last_result = Some(result);
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Input region and submit button are enabled only while idle.
    pub fn controls_enabled(&self) -> bool {
        !self.state.is_busy()
    }

    /// The indeterminate progress indicator is visible only while busy.
    pub fn show_progress(&self) -> bool {
        self.state.is_busy()
    }

    pub fn output(&self) -> Option<&RenderedOutput> {
        self.output.as_ref()
    }

    pub fn last_result(&self) -> Option<&CorrectionResult> {
        self.last_result.as_ref()
    }

    pub fn validator(&self) -> &InputValidator {
        &self.validator
    }
}

impl Drop for CorrectionSession {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::correction::{CorrectionBackend, ErrorKind, StubBackend};
    use crate::diagnostics::DiagnosticLog;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Backend whose task dies without producing a result.
    struct PanickingBackend;

    #[async_trait]
    impl CorrectionBackend for PanickingBackend {
        async fn correct(&self, _text: &str) -> Result<String, CorrectionError> {
            panic!("model crashed");
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn make_session(
        backend: Arc<dyn CorrectionBackend>,
        validator: InputValidator,
    ) -> CorrectionSession {
        let gateway = CorrectionGateway::new(backend, Arc::new(DiagnosticLog::discard()));
        CorrectionSession::new(Arc::new(gateway), validator, Handle::current())
    }

    fn stub_session(stub: StubBackend) -> (CorrectionSession, Arc<StubBackend>) {
        let stub = Arc::new(stub);
        let session = make_session(stub.clone(), InputValidator::default());
        (session, stub)
    }

    async fn wait_for_result(session: &mut CorrectionSession) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while !session.poll() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("correction result in time");
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn renders_corrected_text_without_error_styling() {
        let (mut session, stub) = stub_session(StubBackend::ok("Hello world."));

        assert_eq!(session.submit("helo wrld"), SubmitOutcome::Started);
        assert_eq!(session.state(), SessionState::AwaitingResult);
        assert!(!session.controls_enabled());
        assert!(session.show_progress());

        wait_for_result(&mut session).await;

        assert_eq!(
            session.output(),
            Some(&RenderedOutput {
                text: "Hello world.".into(),
                is_error: false
            })
        );
        assert_eq!(stub.last_input().as_deref(), Some("helo wrld"));
    }

    #[tokio::test]
    async fn portuguese_sentence_round() {
        let (mut session, _) = stub_session(StubBackend::ok("Ela fez o trabalho rapidamente."));

        session.submit("Ela fez o trabalho rápido.");
        wait_for_result(&mut session).await;

        let output = session.output().expect("output");
        assert_eq!(output.text, "Ela fez o trabalho rapidamente.");
        assert!(!output.is_error);
        assert_eq!(
            session.last_result(),
            Some(&CorrectionResult::Success(
                "Ela fez o trabalho rapidamente.".into()
            ))
        );
    }

    #[tokio::test]
    async fn blank_input_is_rejected_before_the_gateway() {
        let (mut session, stub) = stub_session(StubBackend::ok("unused"));

        for input in ["", "   ", "\n\n\t"] {
            assert_eq!(
                session.submit(input),
                SubmitOutcome::Rejected(ValidationError::Empty)
            );
            assert_eq!(session.state(), SessionState::Idle);
        }

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!session.poll());
        assert_eq!(stub.calls(), 0);
        assert!(session.output().is_none());
    }

    #[tokio::test]
    async fn too_long_input_is_rejected_before_the_gateway() {
        let (mut session, stub) = stub_session(StubBackend::ok("unused"));

        let outcome = session.submit(&"a".repeat(501));

        match outcome {
            SubmitOutcome::Rejected(e) => {
                assert_eq!(e.title(), "Texto Muito Longo");
                assert_eq!(e.kind(), ErrorKind::TooLong);
            }
            other => panic!("unexpected {other:?}"),
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(stub.calls(), 0);
        assert!(session.controls_enabled());
    }

    #[tokio::test]
    async fn unbounded_validator_accepts_long_input() {
        let stub = Arc::new(StubBackend::ok("ok"));
        let mut session = make_session(stub.clone(), InputValidator::unbounded());

        assert_eq!(session.submit(&"a".repeat(2_000)), SubmitOutcome::Started);
        wait_for_result(&mut session).await;
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn failure_is_error_styled_and_controls_come_back() {
        let (mut session, _) = stub_session(StubBackend::err(CorrectionError::RateLimited));

        session.submit("texto");
        wait_for_result(&mut session).await;

        let output = session.output().expect("output");
        assert!(output.is_error);
        assert_eq!(
            output.text,
            "Erro: Limite de requisições excedido. Tente novamente mais tarde."
        );
        assert!(session.controls_enabled());
        assert!(!session.show_progress());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn success_also_restores_controls() {
        let (mut session, _) = stub_session(StubBackend::ok("ok"));

        session.submit("texto");
        wait_for_result(&mut session).await;

        assert!(session.controls_enabled());
        assert!(!session.show_progress());
    }

    #[tokio::test]
    async fn second_submit_while_in_flight_is_refused() {
        let (mut session, stub) =
            stub_session(StubBackend::ok("ok").delayed(Duration::from_millis(100)));

        assert_eq!(session.submit("um"), SubmitOutcome::Started);
        assert_eq!(session.submit("dois"), SubmitOutcome::Busy);

        wait_for_result(&mut session).await;
        assert_eq!(stub.calls(), 1);
        assert_eq!(stub.last_input().as_deref(), Some("um"));

        // Idle again: the next submission goes through.
        assert_eq!(session.submit("três"), SubmitOutcome::Started);
        wait_for_result(&mut session).await;
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn panicking_task_still_completes_the_request() {
        let (log, captured) = DiagnosticLog::captured();
        let gateway = CorrectionGateway::new(Arc::new(PanickingBackend), Arc::new(log));
        let mut session = CorrectionSession::new(
            Arc::new(gateway),
            InputValidator::default(),
            Handle::current(),
        );

        session.submit("texto");
        wait_for_result(&mut session).await;

        let result = session.last_result().expect("result");
        assert_eq!(result.kind(), Some(ErrorKind::UnexpectedError));
        assert_eq!(
            result.text(),
            "Erro inesperado: a tarefa de correção terminou sem resultado"
        );
        assert!(session.controls_enabled());

        let lines = captured.lines();
        assert_eq!(lines.len(), 1, "one diagnostic record for the dead task");
        assert!(lines[0].contains(" - ERROR - Erro inesperado: "));
    }

    #[tokio::test]
    async fn abort_returns_to_idle_and_drops_the_late_result() {
        let (mut session, _) =
            stub_session(StubBackend::ok("tarde").delayed(Duration::from_millis(50)));

        session.submit("texto");
        assert!(session.abort());
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.abort());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!session.poll());
        assert!(session.output().is_none());
    }

    #[tokio::test]
    async fn poll_without_request_is_noop() {
        let (mut session, _) = stub_session(StubBackend::ok("ok"));
        assert!(!session.poll());
        assert_eq!(session.state(), SessionState::Idle);
    }
}
