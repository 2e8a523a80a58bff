//! `HttpTransport` against a local axum stand-in for the summarization service.
//!
//! Each test starts its own stub server on an ephemeral port so tests can run
//! in parallel.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use brevity::{
    BrevityError, HttpTransport, SummarizeConfig, SummaryTransport, UploadOrchestrator,
    UploadRequest, UploadResult, WordCount,
};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const PDF: &[u8] = b"%PDF-1.7\n%%EOF\n";

/// What the stub saw in one multipart upload.
#[derive(Debug, Default, Clone)]
struct Captured {
    file_name: Option<String>,
    content_type: Option<String>,
    file_len: usize,
    word_count: Option<String>,
}

type Captures = Arc<Mutex<Vec<Captured>>>;

async fn capture_upload(State(captures): State<Captures>, mut multipart: Multipart) -> impl IntoResponse {
    let mut seen = Captured::default();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                seen.file_name = field.file_name().map(str::to_string);
                seen.content_type = field.content_type().map(str::to_string);
                seen.file_len = field.bytes().await.unwrap().len();
            }
            Some("wordCount") => seen.word_count = Some(field.text().await.unwrap()),
            _ => {}
        }
    }
    let summary = format!("summary in {} words", seen.word_count.clone().unwrap_or_default());
    captures.lock().unwrap().push(seen);
    Json(json!({ "summary": summary }))
}

async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn transport_for(origin: &str) -> HttpTransport {
    let config = SummarizeConfig::builder().backend_url(origin).build().unwrap();
    HttpTransport::new(&config).unwrap()
}

fn request(word_count: WordCount) -> UploadRequest {
    UploadRequest::from_bytes("doc.pdf", PDF.to_vec(), word_count).unwrap()
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn posts_file_and_word_count_as_multipart() {
    let captures: Captures = Arc::default();
    let app = Router::new()
        .route("/upload/", post(capture_upload))
        .with_state(captures.clone());
    let origin = spawn_stub(app).await;

    let summary = transport_for(&origin)
        .summarize(&request(WordCount::W100))
        .await
        .unwrap();

    assert_eq!(summary, "summary in 100 words");
    let seen = captures.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].file_name.as_deref(), Some("doc.pdf"));
    assert_eq!(seen[0].content_type.as_deref(), Some("application/pdf"));
    assert_eq!(seen[0].file_len, PDF.len());
    assert_eq!(seen[0].word_count.as_deref(), Some("100"));
}

#[tokio::test]
async fn non_success_status_is_remote_error() {
    let app = Router::new().route(
        "/upload/",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model unavailable") }),
    );
    let origin = spawn_stub(app).await;

    let err = transport_for(&origin)
        .summarize(&request(WordCount::W150))
        .await
        .unwrap_err();

    match err {
        BrevityError::RemoteError { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "model unavailable");
        }
        other => panic!("expected RemoteError, got {other:?}"),
    }
}

#[tokio::test]
async fn success_without_summary_is_invalid_response() {
    let app = Router::new().route("/upload/", post(|| async { Json(json!({ "result": "nope" })) }));
    let origin = spawn_stub(app).await;

    let err = transport_for(&origin)
        .summarize(&request(WordCount::W150))
        .await
        .unwrap_err();

    assert!(matches!(err, BrevityError::InvalidResponse { .. }), "got: {err:?}");
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    // Reserve a port, then free it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = transport_for(&format!("http://{addr}"))
        .summarize(&request(WordCount::W150))
        .await
        .unwrap_err();

    assert!(matches!(err, BrevityError::TransportFailed { .. }), "got: {err:?}");
}

#[tokio::test]
async fn slow_service_hits_configured_timeout() {
    let app = Router::new().route(
        "/upload/",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "summary": "too late" }))
        }),
    );
    let origin = spawn_stub(app).await;
    let config = SummarizeConfig::builder()
        .backend_url(&origin)
        .timeout_secs(1)
        .build()
        .unwrap();

    let err = HttpTransport::new(&config)
        .unwrap()
        .summarize(&request(WordCount::W150))
        .await
        .unwrap_err();

    assert!(matches!(err, BrevityError::Timeout { secs: 1, .. }), "got: {err:?}");
}

// ── Orchestrator over HTTP ───────────────────────────────────────────────────

#[tokio::test]
async fn orchestrator_end_to_end_over_http() {
    let app = Router::new().route("/upload/", post(|| async { Json(json!({ "summary": "Short text." })) }));
    let origin = spawn_stub(app).await;
    let config = SummarizeConfig::builder().backend_url(&origin).build().unwrap();
    let orch = UploadOrchestrator::from_config(&config).unwrap();

    let result = orch.submit(Some(request(WordCount::W150))).await;

    assert_eq!(
        result,
        UploadResult::Success {
            summary_text: "Short text.".into()
        }
    );
}

#[tokio::test]
async fn orchestrator_reports_http_error_as_failure() {
    let app = Router::new().route("/upload/", post(|| async { StatusCode::BAD_GATEWAY }));
    let origin = spawn_stub(app).await;
    let config = SummarizeConfig::builder().backend_url(&origin).build().unwrap();
    let orch = UploadOrchestrator::from_config(&config).unwrap();

    let result = orch.submit(Some(request(WordCount::W50))).await;

    assert!(!result.is_success());
    assert!(orch.summary().is_none());
}
