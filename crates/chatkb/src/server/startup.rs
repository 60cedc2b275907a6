//! REST server startup and configuration

use anyhow::{Context, Result};
use axum::serve;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::completion::OpenAiCompletion;
use crate::config::Config;
use crate::server::routing::{create_router, with_frontend};
use crate::service::KnowledgeService;

/// Load persisted state, then serve until Ctrl-C
pub async fn start_server(config: Config, bind: &str, frontend_root: &Path) -> Result<()> {
  let completion = OpenAiCompletion::new(&config.api).context("Failed to create completion client")?;
  let service = KnowledgeService::open(Arc::new(completion), config.models, config.storage);
  let (recent, knowledge) = service.counts().await;
  bentley::info!(&format!("Loaded {recent} recent Q&A records and {knowledge} knowledge items"));

  let app = with_frontend(create_router(Arc::new(service)), frontend_root)
    .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()));

  let listener = TcpListener::bind(bind).await.with_context(|| format!("Failed to bind {bind}"))?;
  bentley::success!(&format!("Server listening on http://{bind}"));

  serve(listener, app).with_graceful_shutdown(shutdown_signal()).await.context("Server error")?;

  bentley::info!("Server shutdown gracefully");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    bentley::warn!(&format!("Failed to listen for shutdown signal: {e}"));
    std::future::pending::<()>().await;
  }
}
