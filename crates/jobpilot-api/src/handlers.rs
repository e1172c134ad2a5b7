//! Request handlers.
//!
//! Business outcomes travel in the `{status, message}` body with HTTP 200;
//! non-200 responses are reserved for malformed requests and transport-level
//! failures.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use jobpilot_engine::{CoverLetter, PostingReference};

use crate::state::AppState;

/// Body of `POST /apply`.
#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub url: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of the `POST /apply` response.
#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub status: &'static str,
    pub message: String,
}

/// Query parameters of `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub text: Option<String>,
    pub page: Option<u32>,
}

pub async fn apply(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ApplyRequest>,
) -> Response {
    if request.url.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Missing 'url' field"})),
        )
            .into_response();
    }

    info!(url = %request.url, "Apply request received");
    let outcome = state
        .automation
        .apply(
            PostingReference::new(request.url),
            CoverLetter::from(request.message),
        )
        .await;

    Json(ApplyResponse {
        status: outcome.status(),
        message: outcome.message(),
    })
    .into_response()
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let page_num = params.page.unwrap_or(0);
    match state.automation.search(params.text, page_num).await {
        Ok(vacancies) => Json(json!({
            "count": vacancies.len(),
            "vacancies": vacancies,
        }))
        .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

pub async fn health() -> Response {
    Json(json!({"status": "ok"})).into_response()
}
