//! Knowledge base endpoint handlers

use axum::{
  extract::{
    rejection::{JsonRejection, PathRejection},
    Extension, Path, State,
  },
  response::Json,
};

use super::AppState;
use crate::server::middleware::RequestContext;
use crate::server::types::{
  AddKnowledgeRequest, AddKnowledgeResponse, ApiError, KnowledgeListResponse, MessageResponse,
};

/// POST /api/knowledge/add - Promote a recent answer into the knowledge base
pub async fn add_knowledge(
  State(service): State<AppState>,
  Extension(context): Extension<RequestContext>,
  payload: Result<Json<AddKnowledgeRequest>, JsonRejection>,
) -> Result<Json<AddKnowledgeResponse>, ApiError> {
  let Json(request) = payload?;
  let record_id = request.record_id.ok_or_else(|| ApiError::bad_request("record_id is required"))?;

  let item = service.promote(record_id, &request.title, &request.tags).await.map_err(|e| {
    context.log_warn(&format!("Promotion of record {record_id} refused: {e}"));
    ApiError::from(e)
  })?;

  context.log_info(&format!("Added knowledge item {} from record {record_id}", item.id));
  Ok(Json(AddKnowledgeResponse { message: "Added to knowledge base".to_string(), item }))
}

/// GET /api/knowledge - Every knowledge item, oldest first
pub async fn list_knowledge(State(service): State<AppState>) -> Json<KnowledgeListResponse> {
  Json(KnowledgeListResponse { knowledge_base: service.knowledge().await })
}

/// DELETE /api/knowledge/{id} - Remove a knowledge item
pub async fn delete_knowledge(
  State(service): State<AppState>,
  Extension(context): Extension<RequestContext>,
  id: Result<Path<u64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
  let Path(id) = id?;

  let removed = service.delete_knowledge(id).await?;
  context.log_info(&format!("Deleted knowledge item {} ({})", removed.id, removed.title));

  Ok(Json(MessageResponse { message: "Knowledge item deleted".to_string() }))
}
