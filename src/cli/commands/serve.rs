//! Web UI and HTTP API server.
//!
//! Serves the browser form for students and a JSON endpoint for integration
//! with other systems.

use crate::cli::Output;
use crate::config::Settings;
use crate::mcq::{DEFAULT_COUNT, MAX_COUNT, MIN_COUNT};
use crate::pipeline::Pipeline;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
struct AppState {
    pipeline: Pipeline,
}

/// Run the web server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let pipeline = Pipeline::new(settings)?;

    let state = Arc::new(AppState { pipeline });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/generate", post(generate))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Prosno Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Web UI", "GET  /");
    Output::kv("Health", "GET  /health");
    Output::kv("Generate", "POST /api/generate");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct GenerateRequest {
    /// Chapter name
    chapter: String,
    /// Topic name
    topic: String,
    /// Number of MCQs to generate
    #[serde(default = "default_count")]
    count: u8,
}

fn default_count() -> u8 {
    DEFAULT_COUNT
}

#[derive(Serialize)]
struct GenerateResponse {
    html: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Validate a generation request at the boundary.
///
/// The pipeline itself does not re-validate; requests that fail here never
/// reach it.
fn validate(req: &GenerateRequest) -> std::result::Result<(), String> {
    if req.chapter.trim().is_empty() || req.topic.trim().is_empty() {
        return Err("Please enter both chapter and topic.".to_string());
    }
    if !(MIN_COUNT..=MAX_COUNT).contains(&req.count) {
        return Err(format!(
            "Number of MCQs must be between {} and {}.",
            MIN_COUNT, MAX_COUNT
        ));
    }
    Ok(())
}

// === Handlers ===

async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn generate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> Response {
    if let Err(message) = validate(&req) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse { error: message }),
        )
            .into_response();
    }

    match state
        .pipeline
        .generate(&req.chapter, &req.topic, req.count)
        .await
    {
        Ok(html) => Json(GenerateResponse { html }).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// The embedded single-page UI.
///
/// The generated quiz document is rendered into a 900 px scrolling iframe via
/// `srcdoc`, keeping its own styles and click handlers isolated from the page.
const INDEX_PAGE: &str = r##"<!DOCTYPE html>
<html lang="bn">
<head>
<meta charset="UTF-8">
<title>Prosno — MCQ Generator</title>
<style>
body { font-family: sans-serif; max-width: 720px; margin: 40px auto; padding: 0 16px; }
h1 { font-size: 1.4em; }
label { display: block; margin-top: 12px; font-weight: bold; }
input { width: 100%; padding: 8px; margin-top: 4px; box-sizing: border-box; }
input[type=number] { width: 120px; }
button { margin-top: 16px; padding: 10px 24px; font-size: 1em; cursor: pointer; }
#error { color: #b00020; margin-top: 12px; display: none; }
#status { margin-top: 12px; display: none; }
#output { width: 100%; height: 900px; border: 1px solid #ccc; margin-top: 16px; display: none; }
</style>
</head>
<body>
<h1>&#128216; RAG-Based MCQ Generator (NCTB Physics)</h1>
<label for="chapter">Chapter Name</label>
<input id="chapter" type="text">
<label for="topic">Topic Name</label>
<input id="topic" type="text">
<label for="count">Number of MCQs</label>
<input id="count" type="number" min="1" max="20" value="5">
<br>
<button id="generate">Generate MCQs</button>
<div id="error"></div>
<div id="status">Generating MCQs...</div>
<iframe id="output" scrolling="yes"></iframe>
<script>
const button = document.getElementById('generate');
const errorBox = document.getElementById('error');
const statusBox = document.getElementById('status');
const output = document.getElementById('output');

button.addEventListener('click', async () => {
    const chapter = document.getElementById('chapter').value.trim();
    const topic = document.getElementById('topic').value.trim();
    const count = parseInt(document.getElementById('count').value, 10);

    errorBox.style.display = 'none';
    if (!chapter || !topic) {
        errorBox.textContent = 'Please enter both chapter and topic.';
        errorBox.style.display = 'block';
        return;
    }

    button.disabled = true;
    statusBox.style.display = 'block';
    output.style.display = 'none';

    try {
        const resp = await fetch('/api/generate', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({ chapter, topic, count })
        });
        const body = await resp.json();
        if (!resp.ok) {
            throw new Error(body.error || 'Request failed');
        }
        output.srcdoc = body.html;
        output.style.display = 'block';
    } catch (e) {
        errorBox.textContent = e.message;
        errorBox.style.display = 'block';
    } finally {
        button.disabled = false;
        statusBox.style.display = 'none';
    }
});
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Prompts;
    use crate::embedding::Embedder;
    use crate::error::Result;
    use crate::mcq::CompletionModel;
    use crate::vector_index::{IndexMatch, VectorIndex};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingEmbedder {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Embedder for CountingEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![0.0; 4])
        }

        fn dimensions(&self) -> usize {
            4
        }
    }

    struct EmptyIndex;

    #[async_trait]
    impl VectorIndex for EmptyIndex {
        async fn query(&self, _vector: &[f32], _top_k: usize) -> Result<Vec<IndexMatch>> {
            Ok(Vec::new())
        }
    }

    struct FixedModel;

    #[async_trait]
    impl CompletionModel for FixedModel {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Ok("<html>quiz</html>".to_string())
        }
    }

    fn state() -> (Arc<AppState>, Arc<CountingEmbedder>) {
        let embedder = Arc::new(CountingEmbedder {
            calls: AtomicUsize::new(0),
        });
        let pipeline = Pipeline::with_components(
            Settings::default(),
            Prompts::default(),
            embedder.clone(),
            Arc::new(EmptyIndex),
            Arc::new(FixedModel),
        );
        (Arc::new(AppState { pipeline }), embedder)
    }

    fn request(chapter: &str, topic: &str, count: u8) -> GenerateRequest {
        GenerateRequest {
            chapter: chapter.to_string(),
            topic: topic.to_string(),
            count,
        }
    }

    #[test]
    fn test_validate_rejects_empty_chapter() {
        assert!(validate(&request("", "topic", 5)).is_err());
        assert!(validate(&request("   ", "topic", 5)).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_topic() {
        assert!(validate(&request("chapter", "", 5)).is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_count() {
        assert!(validate(&request("chapter", "topic", 0)).is_err());
        assert!(validate(&request("chapter", "topic", 21)).is_err());
        assert!(validate(&request("chapter", "topic", 1)).is_ok());
        assert!(validate(&request("chapter", "topic", 20)).is_ok());
    }

    #[tokio::test]
    async fn test_empty_chapter_short_circuits_without_client_calls() {
        let (state, embedder) = state();

        let response = generate(State(state), Json(request("", "প্রথম সূত্র", 3))).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_count_never_reaches_generator() {
        let (state, embedder) = state();

        let response = generate(State(state), Json(request("ch", "tp", 21))).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_valid_request_runs_pipeline() {
        let (state, embedder) = state();

        let response = generate(State(state), Json(request("তাপগতিবিদ্যা", "প্রথম সূত্র", 3))).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_index_page_boundary_attributes() {
        assert!(INDEX_PAGE.contains(r#"min="1" max="20" value="5""#));
        assert!(INDEX_PAGE.contains("height: 900px"));
        assert!(INDEX_PAGE.contains(r#"scrolling="yes""#));
    }
}
