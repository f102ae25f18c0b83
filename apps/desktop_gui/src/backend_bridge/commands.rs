//! Backend commands queued from UI to backend worker.

use client_core::GenerationTicket;
use shared::domain::CaseRecord;

#[derive(Debug)]
pub enum BackendCommand {
    Generate {
        ticket: GenerationTicket,
        snapshot: CaseRecord,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Generate { .. } => "generate",
        }
    }
}
