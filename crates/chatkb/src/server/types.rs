//! Request and response bodies for the REST API

use axum::{
  extract::rejection::{JsonRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::records::{KnowledgeItem, QaRecord};
use crate::service::ServiceError;

// Chat Endpoints
// ==============

/// Request for POST /api/chat
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
  /// User message; an empty value is rejected
  #[serde(default)]
  pub message: String,

  /// Model to ask; the configured default is used when absent
  #[serde(default)]
  pub model: Option<String>,
}

/// Response for POST /api/chat
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
  pub response: String,
  pub model: String,
}

/// Response for GET /api/models
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelsResponse {
  pub default: String,
  pub available: Vec<String>,
}

/// Response for GET /api/recent
#[derive(Debug, Serialize, Deserialize)]
pub struct RecentResponse {
  pub recent_qas: Vec<QaRecord>,
}

// Knowledge Endpoints
// ===================

/// Request for POST /api/knowledge/add
#[derive(Debug, Serialize, Deserialize)]
pub struct AddKnowledgeRequest {
  /// Id of the recent Q&A record to promote
  #[serde(default)]
  pub record_id: Option<u64>,

  #[serde(default)]
  pub title: String,

  /// Comma-separated tags
  #[serde(default)]
  pub tags: String,
}

/// Response for POST /api/knowledge/add
#[derive(Debug, Serialize, Deserialize)]
pub struct AddKnowledgeResponse {
  pub message: String,
  pub item: KnowledgeItem,
}

/// Response for GET /api/knowledge
#[derive(Debug, Serialize, Deserialize)]
pub struct KnowledgeListResponse {
  pub knowledge_base: Vec<KnowledgeItem>,
}

/// Plain confirmation message
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
  pub message: String,
}

// Status Endpoint
// ===============

/// Response for GET /status
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
  pub status: String,
  pub version: String,
  pub recent_count: usize,
  pub knowledge_count: usize,
}

// Errors
// ======

/// Error body returned by every endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
  pub error: String,
}

/// An error on its way out as an HTTP response
#[derive(Debug)]
pub struct ApiError {
  pub status: StatusCode,
  pub message: String,
}

impl ApiError {
  pub fn new(status: StatusCode, message: &str) -> Self {
    Self { status, message: message.to_string() }
  }

  pub fn bad_request(message: &str) -> Self {
    Self::new(StatusCode::BAD_REQUEST, message)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (self.status, Json(ErrorResponse { error: self.message })).into_response()
  }
}

impl From<ServiceError> for ApiError {
  fn from(err: ServiceError) -> Self {
    let status = match &err {
      ServiceError::Validation { .. } => StatusCode::BAD_REQUEST,
      ServiceError::RecordNotFound { .. } | ServiceError::KnowledgeNotFound { .. } => StatusCode::NOT_FOUND,
      ServiceError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    Self::new(status, &err.to_string())
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    Self::bad_request(&rejection.body_text())
  }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self {
    Self::bad_request(&rejection.body_text())
  }
}
