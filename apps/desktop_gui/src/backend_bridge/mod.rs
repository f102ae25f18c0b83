//! Bridge between the UI thread and the backend worker that talks to the generation endpoint.

pub mod commands;
pub mod runtime;
