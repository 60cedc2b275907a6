//! Status endpoint handler

use axum::{extract::State, response::Json};

use super::AppState;
use crate::server::types::StatusResponse;

/// GET /status - Health check endpoint
pub async fn status(State(service): State<AppState>) -> Json<StatusResponse> {
  let (recent_count, knowledge_count) = service.counts().await;

  Json(StatusResponse {
    status: "healthy".to_string(),
    version: env!("CARGO_PKG_VERSION").to_string(),
    recent_count,
    knowledge_count,
  })
}
