//! Wire shapes exchanged with the hypothesis generation endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::GenerationResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

/// Outer response body. `text` carries a second JSON document as a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateEnvelope {
    pub text: String,
}

/// Inner document found inside [`GenerateEnvelope::text`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HypothesisPayload {
    pub change_hypothesis: String,
    pub null_hypothesis: String,
}

impl From<HypothesisPayload> for GenerationResult {
    fn from(value: HypothesisPayload) -> Self {
        Self {
            change_hypothesis: value.change_hypothesis,
            null_hypothesis: value.null_hypothesis,
        }
    }
}
