//! Request context and middleware for the chatkb REST API
//!
//! Every request gets a context carrying a unique id and its method and path.
//! The context is placed in the request extensions so handlers can tag their
//! log lines with the same id the access log uses.

use axum::{
  extract::Request,
  http::{Method, Uri},
  middleware::Next,
  response::Response,
};
use std::time::Instant;
use uuid::Uuid;

/// Request context containing request metadata
#[derive(Debug, Clone)]
pub struct RequestContext {
  /// Unique ID for this request
  pub request_id: Uuid,
  pub method: Method,
  pub uri: Uri,
}

impl RequestContext {
  pub fn new(method: Method, uri: Uri) -> Self {
    Self { request_id: Uuid::new_v4(), method, uri }
  }

  pub fn log_info(&self, message: &str) {
    tracing::info!(request_id = %self.request_id, "{} {} - {}", self.method, self.uri.path(), message);
  }

  pub fn log_warn(&self, message: &str) {
    tracing::warn!(request_id = %self.request_id, "{} {} - {}", self.method, self.uri.path(), message);
  }

  pub fn log_error(&self, message: &str) {
    tracing::error!(request_id = %self.request_id, "{} {} - {}", self.method, self.uri.path(), message);
  }

  /// Log request completion with status and duration
  pub fn log_request_complete(&self, status_code: u16, duration_ms: f64) {
    tracing::info!(
      request_id = %self.request_id,
      status = status_code,
      duration_ms,
      "{} {} - Request completed",
      self.method,
      self.uri.path()
    );
  }
}

/// Middleware to inject RequestContext into all requests
pub async fn request_context_middleware(mut request: Request, next: Next) -> Response {
  let context = RequestContext::new(request.method().clone(), request.uri().clone());
  let start_time = Instant::now();

  request.extensions_mut().insert(context.clone());
  let response = next.run(request).await;

  let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
  context.log_request_complete(response.status().as_u16(), duration_ms);

  response
}
