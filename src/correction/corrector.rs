//! Core `CorrectionBackend` trait and the remote `ApiCorrector`.
//!
//! `ApiCorrector` calls any OpenAI-compatible `/v1/chat/completions`
//! endpoint.  All connection details come from [`ApiConfig`]; the API key is
//! passed in through the config rather than read from the environment here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::config::ApiConfig;
use crate::correction::error::CorrectionError;
use crate::correction::prompt::PromptBuilder;

/// Longest provider body excerpt carried into an error message.
const MAX_DETAIL_CHARS: usize = 200;

// ---------------------------------------------------------------------------
// CorrectionBackend trait
// ---------------------------------------------------------------------------

/// Async trait for an external correction capability.
///
/// Implementors must be `Send + Sync` so they can be shared behind
/// `Arc<dyn CorrectionBackend>` and called from a spawned task.  Each call
/// performs exactly one request; retries are not attempted.
#[async_trait]
pub trait CorrectionBackend: Send + Sync {
    async fn correct(&self, text: &str) -> Result<String, CorrectionError>;

    /// Short name used in log lines.
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Status classification
// ---------------------------------------------------------------------------

/// Map a non-success HTTP status (and its body) to a [`CorrectionError`].
pub fn classify_status(status: StatusCode, body: &str) -> CorrectionError {
    match status {
        StatusCode::UNAUTHORIZED => CorrectionError::AuthenticationFailure,
        StatusCode::TOO_MANY_REQUESTS => CorrectionError::RateLimited,
        _ => CorrectionError::ProviderError(provider_detail(status, body)),
    }
}

/// Prefer the provider's `{"error": {"message": …}}` text; otherwise a
/// truncated excerpt of the raw body.
fn provider_detail(status: StatusCode, body: &str) -> String {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().chars().take(MAX_DETAIL_CHARS).collect());

    if message.is_empty() {
        status.to_string()
    } else {
        format!("{status}: {message}")
    }
}

// ---------------------------------------------------------------------------
// ApiCorrector
// ---------------------------------------------------------------------------

/// Calls an OpenAI-compatible `/v1/chat/completions` endpoint.
pub struct ApiCorrector {
    client: reqwest::Client,
    config: ApiConfig,
    prompt_builder: PromptBuilder,
}

impl ApiCorrector {
    /// Build an `ApiCorrector` from its config section.
    ///
    /// The HTTP client is pre-configured with `config.timeout_secs`.  A
    /// default client is used if the builder fails.
    pub fn from_config(config: &ApiConfig, language: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
            prompt_builder: PromptBuilder::new(language),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CorrectionBackend for ApiCorrector {
    /// The `Authorization: Bearer …` header is attached only when
    /// `config.api_key` is a non-empty string.
    async fn correct(&self, text: &str) -> Result<String, CorrectionError> {
        let (system_msg, user_msg) = self.prompt_builder.build_chat(text);

        let body = serde_json::json!({
            "model":       self.config.model,
            "messages": [
                { "role": "system", "content": system_msg },
                { "role": "user",   "content": user_msg   }
            ],
            "max_tokens":  self.config.max_tokens,
            "temperature": self.config.temperature
        });

        let mut req = self.client.post(self.endpoint()).json(&body);

        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body));
        }

        let json: serde_json::Value = response.json().await?;

        let corrected = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                CorrectionError::ProviderError("response has no message content".into())
            })?
            .trim()
            .to_string();

        if corrected.is_empty() {
            return Err(CorrectionError::ProviderError(
                "response content is empty".into(),
            ));
        }

        Ok(corrected)
    }

    fn name(&self) -> &str {
        "api"
    }
}

// ---------------------------------------------------------------------------
// StubBackend  (test-only)
// ---------------------------------------------------------------------------

/// A test double that returns a pre-configured response and counts calls.
#[cfg(test)]
pub struct StubBackend {
    response: Result<String, CorrectionError>,
    delay: Option<Duration>,
    calls: std::sync::atomic::AtomicUsize,
    last_input: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl StubBackend {
    /// Always returns `Ok(text)`.
    pub fn ok(text: impl Into<String>) -> Self {
        Self::with_response(Ok(text.into()))
    }

    /// Always returns `Err(error)`.
    pub fn err(error: CorrectionError) -> Self {
        Self::with_response(Err(error))
    }

    fn with_response(response: Result<String, CorrectionError>) -> Self {
        Self {
            response,
            delay: None,
            calls: std::sync::atomic::AtomicUsize::new(0),
            last_input: std::sync::Mutex::new(None),
        }
    }

    /// Sleep for `delay` before answering.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn last_input(&self) -> Option<String> {
        self.last_input.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl CorrectionBackend for StubBackend {
    async fn correct(&self, text: &str) -> Result<String, CorrectionError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        *self.last_input.lock().unwrap() = Some(text.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.clone()
    }

    fn name(&self) -> &str {
        "stub"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
