//! HTTP backend for a text-generation-inference style `/generate` endpoint.

use async_trait::async_trait;
use llm_eval_core::{EvalError, GenerationParams, Result, TextGenerator};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::time::{sleep, Duration};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Base URL of the model server.
    pub endpoint: String,
    pub model: String,
    pub max_new_tokens: usize,
    pub temperature: Option<f32>,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    /// Delay before the first retry; doubled on every further attempt.
    pub retry_backoff_ms: u64,
    /// Replaces the built-in instructions when set.
    pub instructions_file: Option<PathBuf>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            model: "google/gemma-2-2b-it".to_string(),
            max_new_tokens: 50,
            temperature: None,
            timeout_seconds: 60,
            max_retries: 3,
            retry_backoff_ms: 1000,
            instructions_file: None,
        }
    }
}

impl InferenceConfig {
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            max_new_tokens: self.max_new_tokens,
            temperature: self.temperature,
            num_return_sequences: 1,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
}

#[derive(Debug, Serialize)]
struct GenerateParameters {
    max_new_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    do_sample: bool,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: String,
}

/// Single-object (`/generate`) and list (hosted pipeline) response shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Single(Generation),
    Batch(Vec<Generation>),
}

enum AttemptError {
    Transient(EvalError),
    Fatal(EvalError),
}

#[derive(Debug, Clone)]
pub struct HttpTextGenerator {
    client: Client,
    config: Arc<InferenceConfig>,
}

impl HttpTextGenerator {
    pub fn new(config: InferenceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("llm-eval/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| EvalError::Inference(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!("{}/generate", self.config.endpoint.trim_end_matches('/'))
    }

    async fn attempt(&self, prompt: &str, params: &GenerationParams) -> std::result::Result<String, AttemptError> {
        let body = GenerateRequest {
            inputs: prompt,
            parameters: GenerateParameters {
                max_new_tokens: params.max_new_tokens,
                temperature: params.temperature,
                do_sample: params.temperature.is_some(),
                return_full_text: false,
            },
        };

        let response = self
            .client
            .post(self.url())
            .json(&body)
            .send()
            .await
            .map_err(|e| AttemptError::Transient(EvalError::Inference(format!("Request failed: {}", e))))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let err = EvalError::Inference(format!("Model server returned {}: {}", status, text));
            return Err(if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                AttemptError::Transient(err)
            } else {
                AttemptError::Fatal(err)
            });
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            AttemptError::Fatal(EvalError::Inference(format!("Invalid generation response: {}", e)))
        })?;

        match parsed {
            GenerateResponse::Single(generation) => Ok(generation.generated_text),
            GenerateResponse::Batch(generations) => generations
                .into_iter()
                .next()
                .map(|g| g.generated_text)
                .ok_or_else(|| AttemptError::Fatal(EvalError::Inference("Model server returned no generations".to_string()))),
        }
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.attempt(prompt, params).await {
                Ok(text) => return Ok(text),
                Err(AttemptError::Fatal(err)) => return Err(err),
                Err(AttemptError::Transient(err)) if attempt >= self.config.max_retries => return Err(err),
                Err(AttemptError::Transient(err)) => {
                    let delay = self.config.retry_backoff_ms.saturating_mul(1 << attempt.min(16));
                    tracing::warn!(
                        "Inference attempt {} against {} failed ({}), retrying in {}ms",
                        attempt + 1,
                        self.config.model,
                        err,
                        delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    attempt += 1;
                }
            }
        }
    }
}
