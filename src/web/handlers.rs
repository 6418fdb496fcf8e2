use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
};
use serde_json::json;
use tracing::error;

use super::AppState;

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /:short/:long answers with a temporary redirect to the hosted
/// excuse image, rendering and uploading on first sight of the pair.
///
/// Segments outside `[a-zA-Z0-9 !]+` are treated as unroutable paths and
/// get a 404 rather than a validation payload. Any internal failure is
/// logged server-side and collapses to a bare 500.
pub async fn generate_excuse(
    Path((short, long)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Response {
    if !state.caption_pattern.is_match(&short) || !state.caption_pattern.is_match(&long) {
        return StatusCode::NOT_FOUND.into_response();
    }

    match state.service.resolve(&short, &long).await {
        Ok(url) => Redirect::temporary(&url).into_response(),
        Err(e) => {
            error!("failed to produce excuse image: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
