//! Axum router configuration for all endpoints

use axum::{
  middleware,
  routing::{delete, get, post},
  Router,
};
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

use crate::server::handlers::{chat, knowledge, status, AppState};
use crate::server::middleware::request_context_middleware;

/// Create the API router around the shared service
pub fn create_router(state: AppState) -> Router {
  Router::new()
    // Status endpoint
    .route("/status", get(status::status))
    // Chat endpoints
    .route("/api/chat", post(chat::chat))
    .route("/api/models", get(chat::models))
    .route("/api/recent", get(chat::recent))
    // Knowledge endpoints
    .route("/api/knowledge/add", post(knowledge::add_knowledge))
    .route("/api/knowledge", get(knowledge::list_knowledge))
    .route("/api/knowledge/{id}", delete(knowledge::delete_knowledge))
    .layer(middleware::from_fn(request_context_middleware))
    .with_state(state)
}

/// Add the HTML pages and static assets found under `root`
pub fn with_frontend(router: Router, root: &Path) -> Router {
  let templates = root.join("templates");

  router
    .route_service("/", ServeFile::new(templates.join("index.html")))
    .route_service("/index.html", ServeFile::new(templates.join("index.html")))
    .route_service("/knowledge", ServeFile::new(templates.join("knowledge.html")))
    .nest_service("/static", ServeDir::new(root.join("static")))
}
