//! UI/backend events and error modeling for the desktop controller.

use client_core::GenerationTicket;
use shared::{domain::GenerationResult, error::GenerationError};

pub enum UiEvent {
    GenerationFinished {
        ticket: GenerationTicket,
        outcome: Result<GenerationResult, GenerationError>,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Server,
    Validation,
    Startup,
}

impl UiErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            UiErrorCategory::Transport => "Transport",
            UiErrorCategory::Server => "Server",
            UiErrorCategory::Validation => "Validation",
            UiErrorCategory::Startup => "Startup",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    message: String,
}

impl UiError {
    pub fn from_generation(err: &GenerationError) -> Self {
        let category = match err {
            GenerationError::Transport(_) => UiErrorCategory::Transport,
            GenerationError::ServerStatus(..) => UiErrorCategory::Server,
            GenerationError::MalformedResponse(_) => UiErrorCategory::Validation,
        };
        Self {
            category,
            message: err.user_message(),
        }
    }

    /// The backend worker could not start; generation is unavailable until restart.
    pub fn backend_startup(message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Startup,
            message: message.into(),
        }
    }

    /// A command never reached the backend worker.
    pub fn command_queue(message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Transport,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_retryable(&self) -> bool {
        self.category != UiErrorCategory::Startup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_errors_map_to_categories() {
        let transport = UiError::from_generation(&GenerationError::Transport("dns".to_string()));
        assert_eq!(transport.category(), UiErrorCategory::Transport);

        let server =
            UiError::from_generation(&GenerationError::ServerStatus(500, "oops".to_string()));
        assert_eq!(server.category(), UiErrorCategory::Server);
        assert!(server.message().ends_with("500: oops"));

        let malformed =
            UiError::from_generation(&GenerationError::MalformedResponse("text".to_string()));
        assert_eq!(malformed.category(), UiErrorCategory::Validation);
        assert!(malformed.is_retryable());
    }

    #[test]
    fn queue_failures_keep_the_dispatch_status_verbatim() {
        let status = "UI command queue is full; please retry";
        let err = UiError::command_queue(status);
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err.message(), status);
        assert!(err.is_retryable());
    }

    #[test]
    fn backend_startup_failures_are_not_retryable() {
        let err = UiError::backend_startup("backend worker startup failure: failed to build runtime");
        assert_eq!(err.category(), UiErrorCategory::Startup);
        assert!(!err.is_retryable());
    }
}
