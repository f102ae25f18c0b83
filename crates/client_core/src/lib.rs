//! Client-side core of the TCCR workbench: case store, prompt building, generation client
//! and the session controller tying them together.

pub mod generation;
pub mod prompt;
pub mod session;
pub mod store;

pub use generation::{decode_response, HttpGenerationClient, HypothesisGenerator, DEFAULT_ENDPOINT_URL};
pub use session::{CaseSession, GenerationTicket};
pub use store::{Applied, BridgeField, CaseEdit, CaseStore, ChainField, FieldEdit, ListName};
