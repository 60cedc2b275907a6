use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed chat exchange held in the recent history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaRecord {
  pub id: u64,
  pub question: String,
  pub answer: String,
  pub model: String,
  pub timestamp: DateTime<Utc>,
}

impl QaRecord {
  /// Create a record stamped with the current time. The id is assigned on insertion.
  pub fn new(question: String, answer: String, model: String) -> Self {
    Self { id: 0, question, answer, model, timestamp: Utc::now() }
  }
}

/// A curated answer promoted from the recent history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeItem {
  pub id: u64,
  pub title: String,
  pub content: String,
  pub model: String,
  pub timestamp: DateTime<Utc>,
  #[serde(default)]
  pub tags: Vec<String>,
}

/// Split a comma-separated tag string, trimming each piece.
///
/// An empty input yields no tags rather than a single empty one.
pub fn parse_tags(raw: &str) -> Vec<String> {
  if raw.is_empty() {
    return Vec::new();
  }

  raw.split(',').map(|tag| tag.trim().to_string()).collect()
}
