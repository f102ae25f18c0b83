use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{CaseRecord, GenerationResult},
    error::GenerationError,
    protocol::{GenerateEnvelope, GenerateRequest, HypothesisPayload},
};
use tracing::{info, warn};

use crate::prompt::build_prompt;

/// Public endpoint the form posts its prompts to.
pub const DEFAULT_ENDPOINT_URL: &str =
    "https://timely-hummingbird-fa79a0.netlify.app/.netlify/functions/gemini";

#[async_trait]
pub trait HypothesisGenerator: Send + Sync {
    async fn generate(&self, snapshot: &CaseRecord) -> Result<GenerationResult, GenerationError>;
}

#[derive(Debug, Clone)]
pub struct HttpGenerationClient {
    http: Client,
    endpoint_url: String,
}

impl HttpGenerationClient {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint_url: endpoint_url.into(),
        }
    }
}

#[async_trait]
impl HypothesisGenerator for HttpGenerationClient {
    async fn generate(&self, snapshot: &CaseRecord) -> Result<GenerationResult, GenerationError> {
        let prompt = build_prompt(snapshot)
            .map_err(|err| GenerationError::Transport(format!("could not encode case: {err}")))?;
        info!(
            endpoint = %self.endpoint_url,
            prompt_len = prompt.len(),
            "generation: sending prompt"
        );

        let response = self
            .http
            .post(&self.endpoint_url)
            .json(&GenerateRequest { prompt })
            .send()
            .await
            .map_err(|err| GenerationError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| GenerationError::Transport(err.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "generation: endpoint signalled failure");
            return Err(GenerationError::ServerStatus(status.as_u16(), body));
        }

        let result = decode_response(&body)?;
        info!("generation: hypotheses received");
        Ok(result)
    }
}

/// Two-stage decode: the outer envelope, then the JSON document carried in its `text`.
pub fn decode_response(body: &str) -> Result<GenerationResult, GenerationError> {
    let envelope: GenerateEnvelope = serde_json::from_str(body)
        .map_err(|err| GenerationError::MalformedResponse(format!("envelope: {err}")))?;
    let payload: HypothesisPayload = serde_json::from_str(&envelope.text)
        .map_err(|err| GenerationError::MalformedResponse(format!("text payload: {err}")))?;
    Ok(payload.into())
}

#[cfg(test)]
#[path = "tests/generation_tests.rs"]
mod tests;
