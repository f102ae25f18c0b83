//! Session controller: owns the case store and the generation result slot.

use shared::{
    domain::{CaseRecord, GenerationResult},
    error::GenerationError,
};
use tracing::{info, warn};

use crate::{
    generation::HypothesisGenerator,
    store::{Applied, CaseEdit, CaseStore},
};

/// Identifies one generation request issued by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenerationTicket(pub u64);

#[derive(Debug, Default)]
pub struct CaseSession {
    store: CaseStore,
    result: Option<GenerationResult>,
    last_error: Option<String>,
    in_flight: usize,
    next_ticket: u64,
}

impl CaseSession {
    pub fn new(record: CaseRecord) -> Self {
        Self {
            store: CaseStore::new(record),
            ..Self::default()
        }
    }

    pub fn record(&self) -> &CaseRecord {
        self.store.get()
    }

    pub fn store(&self) -> &CaseStore {
        &self.store
    }

    pub fn apply(&mut self, edit: CaseEdit) -> Applied {
        self.store.apply(edit)
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight > 0
    }

    /// Starts a request: clears the previous outcome and hands back a snapshot to send.
    pub fn begin_generation(&mut self) -> (GenerationTicket, CaseRecord) {
        self.next_ticket += 1;
        let ticket = GenerationTicket(self.next_ticket);
        self.in_flight += 1;
        self.result = None;
        self.last_error = None;
        info!(
            ticket = ticket.0,
            in_flight = self.in_flight,
            "session: generation started"
        );
        (ticket, self.store.snapshot())
    }

    /// Records a completed request. Completions overwrite each other in arrival order.
    pub fn finish_generation(
        &mut self,
        ticket: GenerationTicket,
        outcome: Result<GenerationResult, GenerationError>,
    ) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match outcome {
            Ok(result) => {
                info!(ticket = ticket.0, "session: generation finished");
                self.result = Some(result);
                self.last_error = None;
            }
            Err(err) => {
                warn!(ticket = ticket.0, error = %err, "session: generation failed");
                self.result = None;
                self.last_error = Some(err.user_message());
            }
        }
    }

    /// Drops a request that never reached a generator. The current outcome is left alone.
    pub fn abandon_generation(&mut self, ticket: GenerationTicket) {
        self.in_flight = self.in_flight.saturating_sub(1);
        warn!(ticket = ticket.0, "session: generation abandoned before dispatch");
    }

    pub async fn generate<G>(&mut self, generator: &G) -> Result<(), GenerationError>
    where
        G: HypothesisGenerator + ?Sized,
    {
        let (ticket, snapshot) = self.begin_generation();
        let outcome = generator.generate(&snapshot).await;
        let failure = outcome.as_ref().err().cloned();
        self.finish_generation(ticket, outcome);
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
