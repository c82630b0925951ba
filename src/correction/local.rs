//! Local model backend.
//!
//! Talks to a model server on the same machine through the Ollama native
//! `/api/generate` endpoint.  The client has no timeout: a local model is
//! allowed to take as long as it needs.  Every failure is reported as
//! [`CorrectionError::ModelError`] carrying the underlying detail.

use async_trait::async_trait;

use crate::config::LocalConfig;
use crate::correction::corrector::CorrectionBackend;
use crate::correction::error::CorrectionError;
use crate::correction::prompt::PromptBuilder;

pub struct LocalCorrector {
    client: reqwest::Client,
    config: LocalConfig,
    prompt_builder: PromptBuilder,
}

impl LocalCorrector {
    pub fn from_config(config: &LocalConfig, language: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            config: config.clone(),
            prompt_builder: PromptBuilder::new(language),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.config.base_url.trim_end_matches('/'))
    }

    async fn generate(&self, text: &str) -> Result<String, String> {
        let body = serde_json::json!({
            "model":  self.config.model,
            "prompt": self.prompt_builder.build(text),
            "stream": false,
            "options": { "temperature": self.config.temperature }
        });

        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("{status}: {}", body.trim()));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| e.to_string())?;
        let generated = json["response"]
            .as_str()
            .ok_or("model response has no `response` field")?
            .trim()
            .to_string();

        if generated.is_empty() {
            return Err("model returned an empty text".into());
        }
        Ok(generated)
    }
}

#[async_trait]
impl CorrectionBackend for LocalCorrector {
    async fn correct(&self, text: &str) -> Result<String, CorrectionError> {
        self.generate(text)
            .await
            .map_err(CorrectionError::ModelError)
    }

    fn name(&self) -> &str {
        "local"
    }
}
