//! REST endpoints for the triage API.

use std::sync::Arc;

use axum::Router;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::error::FileError;
use crate::files;
use crate::pipeline::{EmailPipeline, EmailResult};

/// Shared state for the triage routes.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<EmailPipeline>,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
struct ClassifyResponse {
    success: bool,
    emails: Vec<EmailResult>,
    total: usize,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({
            "success": false,
            "error": message.into(),
        })),
    )
        .into_response()
}

/// POST /api/classify
///
/// Classify raw text containing one or more delimited emails.
async fn classify(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Response {
    if request.text.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Nenhum conteúdo fornecido");
    }

    let emails = state.pipeline.process(&request.text).await;
    Json(ClassifyResponse {
        success: true,
        total: emails.len(),
        emails,
    })
    .into_response()
}

/// POST /api/classify/upload
///
/// Classify the contents of an uploaded text file (multipart field "file").
async fn classify_upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Malformed multipart upload");
                return error_response(StatusCode::BAD_REQUEST, "Upload inválido");
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if !files::allowed_file(&filename) {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Tipo de arquivo não permitido: {filename}"),
            );
        }

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Failed to read upload body");
                let err = FileError::UploadRead(e.to_string());
                return error_response(StatusCode::BAD_REQUEST, err.to_string());
            }
        };

        let text = match files::extract_text(&filename, &bytes) {
            Ok(text) => text,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
        };

        if text.is_empty() {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Não foi possível extrair texto do arquivo",
            );
        }

        let emails = state.pipeline.process(&text).await;
        return Json(ClassifyResponse {
            success: true,
            total: emails.len(),
            emails,
        })
        .into_response();
    }

    error_response(StatusCode::BAD_REQUEST, "Nenhum arquivo fornecido")
}

/// GET /api/health
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "Email Classification API",
    }))
}

/// Unknown routes get the same error envelope as everything else.
async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Rota não encontrada")
}

/// `DefaultBodyLimit` rejections are bare 413s; reshape them into the
/// standard error envelope.
async fn envelope_payload_too_large(response: Response) -> Response {
    if response.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            "Arquivo muito grande. Tamanho máximo: 16MB",
        );
    }
    response
}

/// Build the triage REST routes.
pub fn app_routes(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/api/classify", post(classify))
        .route("/api/classify/upload", post(classify_upload))
        .route("/api/health", get(health))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(middleware::map_response(envelope_payload_too_large))
        .with_state(state)
}
