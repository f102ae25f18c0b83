use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("endpoint responded with status {0}: {1}")]
    ServerStatus(u16, String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl GenerationError {
    /// Single message surfaced to the user; the session stays usable after any of these.
    pub fn user_message(&self) -> String {
        let detail = match self {
            GenerationError::Transport(reason) => format!("network error ({reason})"),
            GenerationError::ServerStatus(status, body) => {
                format!("the API responded with error {status}: {body}")
            }
            GenerationError::MalformedResponse(reason) => {
                format!("the API response could not be read ({reason})")
            }
        };
        format!("Could not generate the hypotheses. Error: {detail}")
    }
}
