use super::*;
use std::sync::Arc;

use anyhow::Result;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct EndpointState {
    status: StatusCode,
    body: String,
    prompts: Arc<Mutex<Vec<String>>>,
}

async fn handle_generate(
    State(state): State<EndpointState>,
    Json(request): Json<GenerateRequest>,
) -> (StatusCode, String) {
    state.prompts.lock().await.push(request.prompt);
    (state.status, state.body.clone())
}

async fn spawn_endpoint(
    status: StatusCode,
    body: impl Into<String>,
) -> Result<(String, Arc<Mutex<Vec<String>>>)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let prompts = Arc::new(Mutex::new(Vec::new()));
    let state = EndpointState {
        status,
        body: body.into(),
        prompts: Arc::clone(&prompts),
    };
    let app = Router::new()
        .route("/generate", post(handle_generate))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/generate"), prompts))
}

fn envelope(change: &str, null_hypothesis: &str) -> String {
    let inner = serde_json::json!({ "changeHypothesis": change, "nullHypothesis": null_hypothesis });
    serde_json::json!({ "text": inner.to_string() }).to_string()
}

#[tokio::test]
async fn generate_returns_both_hypotheses_verbatim() {
    let (url, prompts) = spawn_endpoint(StatusCode::OK, envelope("H", "N"))
        .await
        .expect("spawn endpoint");
    let client = HttpGenerationClient::new(url);
    let record = CaseRecord::school_example();

    let result = client.generate(&record).await.expect("generate");
    assert_eq!(
        result,
        GenerationResult {
            change_hypothesis: "H".to_string(),
            null_hypothesis: "N".to_string(),
        }
    );

    let prompts = prompts.lock().await;
    assert_eq!(prompts.len(), 1);
    assert_eq!(crate::prompt::embedded_case(&prompts[0]), Some(record));
}

#[tokio::test]
async fn generate_keeps_whitespace_and_long_text_untouched() {
    let change = "  If PM1 is implemented by the Leadership Team...\n then trust rises.  ";
    let (url, _) = spawn_endpoint(StatusCode::OK, envelope(change, ""))
        .await
        .expect("spawn endpoint");
    let result = HttpGenerationClient::new(url)
        .generate(&CaseRecord::default())
        .await
        .expect("generate");
    assert_eq!(result.change_hypothesis, change);
    assert_eq!(result.null_hypothesis, "");
}

#[tokio::test]
async fn non_success_status_preserves_the_body() {
    let (url, _) = spawn_endpoint(StatusCode::INTERNAL_SERVER_ERROR, "oops")
        .await
        .expect("spawn endpoint");
    let err = HttpGenerationClient::new(url)
        .generate(&CaseRecord::default())
        .await
        .expect_err("server failure");
    assert_eq!(err, GenerationError::ServerStatus(500, "oops".to_string()));
}

#[tokio::test]
async fn non_json_text_field_is_malformed() {
    let (url, _) = spawn_endpoint(StatusCode::OK, r#"{"text": "not json"}"#)
        .await
        .expect("spawn endpoint");
    let err = HttpGenerationClient::new(url)
        .generate(&CaseRecord::default())
        .await
        .expect_err("malformed");
    assert!(matches!(err, GenerationError::MalformedResponse(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = HttpGenerationClient::new(format!("http://{addr}/generate"))
        .generate(&CaseRecord::default())
        .await
        .expect_err("transport");
    assert!(matches!(err, GenerationError::Transport(_)), "{err:?}");
}

#[test]
fn decode_rejects_an_envelope_that_is_not_json() {
    let err = decode_response("<html>bad gateway</html>").expect_err("malformed");
    assert!(matches!(err, GenerationError::MalformedResponse(_)));
}

#[test]
fn decode_rejects_an_envelope_without_text() {
    let err = decode_response(r#"{"output": "x"}"#).expect_err("malformed");
    assert!(matches!(err, GenerationError::MalformedResponse(_)));
}

#[test]
fn decode_rejects_a_payload_missing_one_hypothesis() {
    let inner = serde_json::json!({ "changeHypothesis": "H" }).to_string();
    let body = serde_json::json!({ "text": inner }).to_string();
    let err = decode_response(&body).expect_err("malformed");
    assert!(matches!(err, GenerationError::MalformedResponse(_)));
}

#[test]
fn decode_ignores_extra_envelope_fields() {
    let inner = serde_json::json!({ "changeHypothesis": "H", "nullHypothesis": "N" }).to_string();
    let body = serde_json::json!({ "text": inner, "model": "any" }).to_string();
    let result = decode_response(&body).expect("decode");
    assert_eq!(result.change_hypothesis, "H");
    assert_eq!(result.null_hypothesis, "N");
}
