//! Chat endpoint handlers

use axum::{
  extract::{rejection::JsonRejection, Extension, State},
  response::Json,
};

use super::AppState;
use crate::server::middleware::RequestContext;
use crate::server::types::{ApiError, ChatRequest, ChatResponse, ModelsResponse, RecentResponse};
use crate::service::ServiceError;

/// POST /api/chat - Ask the upstream model and record the exchange
pub async fn chat(
  State(service): State<AppState>,
  Extension(context): Extension<RequestContext>,
  payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
  let Json(request) = payload?;

  match service.chat(&request.message, request.model.as_deref()).await {
    Ok(record) => {
      context.log_info(&format!("Recorded Q&A {} using {}", record.id, record.model));
      Ok(Json(ChatResponse { response: record.answer, model: record.model }))
    }
    Err(e @ ServiceError::Upstream(_)) => {
      context.log_error(&format!("Upstream completion failed: {e}"));
      Err(e.into())
    }
    Err(e) => Err(e.into()),
  }
}

/// GET /api/models - Default and available models
pub async fn models(State(service): State<AppState>) -> Json<ModelsResponse> {
  let models = service.models();
  Json(ModelsResponse { default: models.default.clone(), available: models.available.clone() })
}

/// GET /api/recent - Recent exchanges, newest first
pub async fn recent(State(service): State<AppState>) -> Json<RecentResponse> {
  Json(RecentResponse { recent_qas: service.recent().await })
}
