use super::*;
use async_trait::async_trait;
use shared::domain::HypothesisQuestion;

use crate::store::FieldEdit;

struct TestGenerator {
    outcome: Result<GenerationResult, GenerationError>,
}

impl TestGenerator {
    fn ok(change: &str, null: &str) -> Self {
        Self {
            outcome: Ok(result(change, null)),
        }
    }

    fn failing(err: GenerationError) -> Self {
        Self { outcome: Err(err) }
    }
}

#[async_trait]
impl HypothesisGenerator for TestGenerator {
    async fn generate(&self, _snapshot: &CaseRecord) -> Result<GenerationResult, GenerationError> {
        self.outcome.clone()
    }
}

fn result(change: &str, null: &str) -> GenerationResult {
    GenerationResult {
        change_hypothesis: change.to_string(),
        null_hypothesis: null.to_string(),
    }
}

#[tokio::test]
async fn successful_generation_stores_both_hypotheses() {
    let mut session = CaseSession::new(CaseRecord::school_example());
    session
        .generate(&TestGenerator::ok("H", "N"))
        .await
        .expect("generate");

    assert_eq!(session.result(), Some(&result("H", "N")));
    assert_eq!(session.last_error(), None);
    assert!(!session.is_generating());
}

#[tokio::test]
async fn failure_surfaces_a_message_and_keeps_the_case_editable() {
    let mut session = CaseSession::default();
    let err = session
        .generate(&TestGenerator::failing(GenerationError::ServerStatus(
            500,
            "oops".to_string(),
        )))
        .await
        .expect_err("failure");
    assert_eq!(err, GenerationError::ServerStatus(500, "oops".to_string()));
    assert_eq!(session.result(), None);
    assert!(session.last_error().expect("message").contains("500: oops"));

    let applied = session.apply(CaseEdit::SetField(FieldEdit::Answer(
        HypothesisQuestion::Problem,
        "retry with more detail".to_string(),
    )));
    assert_eq!(applied, Applied::Changed);

    session
        .generate(&TestGenerator::ok("H2", "N2"))
        .await
        .expect("retry");
    assert_eq!(session.result(), Some(&result("H2", "N2")));
    assert_eq!(session.last_error(), None);
}

#[test]
fn starting_a_request_clears_the_previous_outcome() {
    let mut session = CaseSession::default();
    let (first, _) = session.begin_generation();
    session.finish_generation(first, Ok(result("H", "N")));
    assert!(session.result().is_some());

    let (_second, snapshot) = session.begin_generation();
    assert_eq!(&snapshot, session.record());
    assert!(session.result().is_none());
    assert!(session.is_generating());
}

#[test]
fn later_completion_wins_regardless_of_issue_order() {
    let mut session = CaseSession::default();
    let (first, _) = session.begin_generation();
    let (second, _) = session.begin_generation();
    assert!(second > first);

    session.finish_generation(second, Ok(result("second", "second")));
    assert!(session.is_generating());
    session.finish_generation(first, Ok(result("first", "first")));

    assert!(!session.is_generating());
    assert_eq!(session.result(), Some(&result("first", "first")));
}

#[test]
fn a_late_failure_replaces_an_earlier_success() {
    let mut session = CaseSession::default();
    let (first, _) = session.begin_generation();
    let (second, _) = session.begin_generation();
    session.finish_generation(first, Ok(result("H", "N")));
    session.finish_generation(
        second,
        Err(GenerationError::Transport("connection reset".to_string())),
    );

    assert_eq!(session.result(), None);
    assert!(session.last_error().is_some());
}

#[test]
fn snapshot_is_detached_from_later_edits() {
    let mut session = CaseSession::default();
    let (_ticket, snapshot) = session.begin_generation();
    session.apply(CaseEdit::SetField(FieldEdit::Timespan("8 weeks".to_string())));

    assert_eq!(snapshot.timespan, "");
    assert_eq!(session.record().timespan, "8 weeks");
}

#[test]
fn abandoning_an_undispatched_request_records_no_outcome() {
    let mut session = CaseSession::default();
    let (ticket, _) = session.begin_generation();
    session.abandon_generation(ticket);

    assert!(!session.is_generating());
    assert_eq!(session.result(), None);
    assert_eq!(session.last_error(), None);
}

#[test]
fn abandoning_one_request_leaves_the_other_pending() {
    let mut session = CaseSession::default();
    let (first, _) = session.begin_generation();
    let (second, _) = session.begin_generation();
    session.abandon_generation(second);
    assert!(session.is_generating());

    session.finish_generation(first, Ok(result("H", "N")));
    assert!(!session.is_generating());
    assert_eq!(session.result(), Some(&result("H", "N")));
}
