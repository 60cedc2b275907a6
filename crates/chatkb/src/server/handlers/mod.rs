pub mod chat;
pub mod knowledge;
pub mod status;

use std::sync::Arc;

use crate::service::KnowledgeService;

/// Shared state handed to every handler
pub type AppState = Arc<KnowledgeService>;
