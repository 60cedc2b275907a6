//! Request orchestration over the two stores
//!
//! `KnowledgeService` owns the recent history, the knowledge base and the
//! upstream client. Each store sits behind its own lock; a mutation and the
//! save that follows it happen under that lock, so every file written is a
//! complete snapshot and saves land in mutation order. The write itself runs on
//! the blocking pool. The upstream call is
//! made before any lock is taken.

use std::fs;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::completion::{ChatCompletion, CompletionError};
use crate::config::{ModelsConfig, StorageConfig};
use crate::persistence;
use crate::records::{KnowledgeItem, QaRecord};
use crate::store::{KnowledgeStore, RecentQaStore};

#[derive(Error, Debug)]
pub enum ServiceError {
  #[error("{message}")]
  Validation { message: String },

  #[error(transparent)]
  Upstream(#[from] CompletionError),

  #[error("No recent Q&A record with id {id}")]
  RecordNotFound { id: u64 },

  #[error("No knowledge item with id {id}")]
  KnowledgeNotFound { id: u64 },
}

impl ServiceError {
  fn validation(message: &str) -> Self {
    ServiceError::Validation { message: message.to_string() }
  }
}

pub struct KnowledgeService {
  recent: Mutex<RecentQaStore>,
  knowledge: Mutex<KnowledgeStore>,
  completion: Arc<dyn ChatCompletion>,
  models: ModelsConfig,
  storage: StorageConfig,
}

impl KnowledgeService {
  /// Build the service from whatever is persisted under the data directory
  pub fn open(completion: Arc<dyn ChatCompletion>, models: ModelsConfig, storage: StorageConfig) -> Self {
    if let Err(e) = fs::create_dir_all(&storage.data_dir) {
      bentley::warn!(&format!("Failed to create data directory {}: {e}", storage.data_dir.display()));
    }

    let knowledge = KnowledgeStore::from_items(persistence::load(&storage.knowledge_path()));
    let recent = RecentQaStore::from_records(persistence::load(&storage.recent_qas_path()));

    Self::with_stores(completion, models, storage, recent, knowledge)
  }

  pub fn with_stores(
    completion: Arc<dyn ChatCompletion>,
    models: ModelsConfig,
    storage: StorageConfig,
    recent: RecentQaStore,
    knowledge: KnowledgeStore,
  ) -> Self {
    Self {
      recent: Mutex::new(recent),
      knowledge: Mutex::new(knowledge),
      completion,
      models,
      storage,
    }
  }

  pub fn models(&self) -> &ModelsConfig {
    &self.models
  }

  /// Ask the upstream model and remember the exchange.
  ///
  /// Nothing is recorded or saved when the upstream call fails.
  pub async fn chat(&self, message: &str, model: Option<&str>) -> Result<QaRecord, ServiceError> {
    if message.trim().is_empty() {
      return Err(ServiceError::validation("message is required"));
    }

    let model = match model.map(str::trim) {
      Some(model) if !model.is_empty() => model.to_string(),
      _ => self.models.default.clone(),
    };

    let answer = self.completion.complete(message, &model).await?;

    let mut recent = self.recent.lock().await;
    let record = recent.insert(message.to_string(), answer, model);
    persistence::save_async(self.storage.recent_qas_path(), recent.list().to_vec()).await;

    Ok(record)
  }

  pub async fn recent(&self) -> Vec<QaRecord> {
    self.recent.lock().await.list().to_vec()
  }

  /// Copy a recent answer into the knowledge base
  pub async fn promote(&self, record_id: u64, title: &str, tags: &str) -> Result<KnowledgeItem, ServiceError> {
    if title.trim().is_empty() {
      return Err(ServiceError::validation("title is required"));
    }

    let source = self
      .recent
      .lock()
      .await
      .find(record_id)
      .cloned()
      .ok_or(ServiceError::RecordNotFound { id: record_id })?;

    let mut knowledge = self.knowledge.lock().await;
    let item = knowledge.insert(title, &source.answer, &source.model, tags);
    persistence::save_async(self.storage.knowledge_path(), knowledge.list().to_vec()).await;

    Ok(item)
  }

  pub async fn knowledge(&self) -> Vec<KnowledgeItem> {
    self.knowledge.lock().await.list().to_vec()
  }

  pub async fn delete_knowledge(&self, id: u64) -> Result<KnowledgeItem, ServiceError> {
    let mut knowledge = self.knowledge.lock().await;
    let removed = knowledge.delete(id).map_err(|e| ServiceError::KnowledgeNotFound { id: e.id })?;
    persistence::save_async(self.storage.knowledge_path(), knowledge.list().to_vec()).await;

    Ok(removed)
  }

  /// Current sizes of the recent history and the knowledge base
  pub async fn counts(&self) -> (usize, usize) {
    let recent = self.recent.lock().await.len();
    let knowledge = self.knowledge.lock().await.len();
    (recent, knowledge)
  }
}
