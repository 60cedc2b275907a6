use chrono::Utc;

use crate::records::{parse_tags, KnowledgeItem};
use crate::store::{next_id_after, take_id, NotFound};

/// Oldest-first collection of promoted answers
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
  items: Vec<KnowledgeItem>,
  next_id: u64,
}

impl Default for KnowledgeStore {
  fn default() -> Self {
    Self::new()
  }
}

impl KnowledgeStore {
  pub fn new() -> Self {
    Self { items: Vec::new(), next_id: 1 }
  }

  /// Rebuild a store from persisted items; numbering resumes after the highest id.
  /// Items whose ids leave no room for a next id are discarded.
  pub fn from_items(items: Vec<KnowledgeItem>) -> Self {
    match next_id_after(items.iter().map(|item| item.id)) {
      Some(next_id) => Self { items, next_id },
      None => {
        bentley::warn!("Knowledge ids exhausted the id space; starting with no items");
        Self::new()
      }
    }
  }

  /// Append a new item built from copied content and a raw comma-separated tag string
  pub fn insert(&mut self, title: &str, content: &str, model: &str, tags_raw: &str) -> KnowledgeItem {
    let item = KnowledgeItem {
      id: take_id(&mut self.next_id),
      title: title.to_string(),
      content: content.to_string(),
      model: model.to_string(),
      timestamp: Utc::now(),
      tags: parse_tags(tags_raw),
    };

    self.items.push(item.clone());
    item
  }

  /// Remove the item with `id`, keeping the rest in order
  pub fn delete(&mut self, id: u64) -> Result<KnowledgeItem, NotFound> {
    let index = self.items.iter().position(|item| item.id == id).ok_or(NotFound { id })?;
    Ok(self.items.remove(index))
  }

  pub fn find(&self, id: u64) -> Option<&KnowledgeItem> {
    self.items.iter().find(|item| item.id == id)
  }

  pub fn list(&self) -> &[KnowledgeItem] {
    &self.items
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn next_id(&self) -> u64 {
    self.next_id
  }
}
