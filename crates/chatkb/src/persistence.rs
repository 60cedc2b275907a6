//! JSON file persistence for the record stores
//!
//! Each store is kept as one pretty-printed JSON array that is rewritten in full
//! after every mutation. Loading is best effort: a missing, unreadable or corrupt
//! file yields an empty sequence so a bad data file never blocks startup.

use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
  #[error("Failed to read {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("Failed to parse {}: {source}", path.display())]
  Parse { path: PathBuf, source: serde_json::Error },

  #[error("Failed to serialize records for {}: {source}", path.display())]
  Serialize { path: PathBuf, source: serde_json::Error },

  #[error("Failed to write {}: {source}", path.display())]
  Write { path: PathBuf, source: std::io::Error },
}

/// Read records from `path`; `None` means the file does not exist yet
fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Option<Vec<T>>, PersistenceError> {
  let content = match fs::read_to_string(path) {
    Ok(content) => content,
    Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
    Err(source) => return Err(PersistenceError::Read { path: path.to_path_buf(), source }),
  };

  serde_json::from_str(&content)
    .map(Some)
    .map_err(|source| PersistenceError::Parse { path: path.to_path_buf(), source })
}

/// Load records from `path`, propagating read and parse failures.
///
/// A file that does not exist is the first-run state and loads as empty.
pub fn try_load<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, PersistenceError> {
  Ok(read_records(path)?.unwrap_or_default())
}

/// Load records from `path`, degrading to an empty sequence on any failure
pub fn load<T: DeserializeOwned>(path: &Path) -> Vec<T> {
  match read_records(path) {
    Ok(Some(records)) => {
      bentley::info!(&format!("Loaded {} records from {}", records.len(), path.display()));
      records
    }
    Ok(None) => {
      bentley::debug!(&format!("No data file at {}, starting empty", path.display()));
      Vec::new()
    }
    Err(e) => {
      bentley::warn!(&format!("{e}; starting with no records"));
      Vec::new()
    }
  }
}

/// Overwrite `path` with the full record sequence as pretty-printed JSON
pub fn try_save<T: Serialize>(path: &Path, records: &[T]) -> Result<(), PersistenceError> {
  let json = serde_json::to_string_pretty(records)
    .map_err(|source| PersistenceError::Serialize { path: path.to_path_buf(), source })?;

  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent)
      .map_err(|source| PersistenceError::Write { path: path.to_path_buf(), source })?;
  }

  fs::write(path, json).map_err(|source| PersistenceError::Write { path: path.to_path_buf(), source })
}

/// Save records, logging and swallowing any failure.
///
/// The in-memory store stays authoritative; the next successful save catches the file up.
pub fn save<T: Serialize>(path: &Path, records: &[T]) {
  if let Err(e) = try_save(path, records) {
    bentley::error!(&e.to_string());
  }
}

/// Save records on the blocking pool so the file write never stalls a runtime worker.
///
/// Completes only once the write has finished, so callers holding a store lock keep
/// their writes in mutation order.
pub async fn save_async<T: Serialize + Send + 'static>(path: PathBuf, records: Vec<T>) {
  let task = tokio::task::spawn_blocking(move || save(&path, &records));
  if let Err(e) = task.await {
    bentley::error!(&format!("Save task failed: {e}"));
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::records::{KnowledgeItem, QaRecord};
  use chrono::{TimeZone, Utc};
  use tempfile::TempDir;

  fn sample_item(id: u64) -> KnowledgeItem {
    KnowledgeItem {
      id,
      title: format!("title {id}"),
      content: "content".to_string(),
      model: "gpt-4o-mini".to_string(),
      timestamp: Utc.with_ymd_and_hms(2024, 3, 9, 8, 30, 0).unwrap(),
      tags: vec!["a".to_string(), "b".to_string()],
    }
  }

  #[test]
  fn test_load_missing_file_is_empty() {
    let temp = TempDir::new().unwrap();
    let records: Vec<QaRecord> = load(&temp.path().join("missing.json"));
    assert!(records.is_empty());
  }

  #[test]
  fn test_load_corrupt_file_degrades_to_empty() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("knowledge.json");
    fs::write(&path, "{ not json").unwrap();

    let items: Vec<KnowledgeItem> = load(&path);
    assert!(items.is_empty());

    let err = try_load::<KnowledgeItem>(&path).unwrap_err();
    assert!(matches!(err, PersistenceError::Parse { .. }));
  }

  #[test]
  fn test_load_unreadable_path_reports_read_error() {
    let temp = TempDir::new().unwrap();
    // Exists but cannot be read as a file
    let path = temp.path().join("recent_qas.json");
    fs::create_dir(&path).unwrap();

    let records: Vec<QaRecord> = load(&path);
    assert!(records.is_empty());
    assert!(matches!(try_load::<QaRecord>(&path), Err(PersistenceError::Read { .. })));
  }

  #[test]
  fn test_load_wrong_shape_degrades_to_empty() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("recent_qas.json");
    fs::write(&path, r#"{"recent_qas": []}"#).unwrap();

    let records: Vec<QaRecord> = load(&path);
    assert!(records.is_empty());
  }

  #[test]
  fn test_save_then_load_round_trip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("knowledge.json");
    let items = vec![sample_item(1), sample_item(4)];

    try_save(&path, &items).unwrap();
    let loaded: Vec<KnowledgeItem> = load(&path);

    assert_eq!(loaded, items);
  }

  #[test]
  fn test_save_is_pretty_printed_and_overwrites() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("knowledge.json");

    try_save(&path, &[sample_item(1), sample_item(2)]).unwrap();
    try_save(&path, &[sample_item(3)]).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("[\n  {"));
    let loaded: Vec<KnowledgeItem> = serde_json::from_str(&content).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, 3);
  }

  #[test]
  fn test_save_creates_parent_directory() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("data").join("recent_qas.json");

    try_save::<QaRecord>(&path, &[]).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
  }

  #[test]
  fn test_save_failure_is_swallowed() {
    let temp = TempDir::new().unwrap();
    // A directory where the file should be makes the write fail
    let path = temp.path().join("occupied");
    fs::create_dir(&path).unwrap();

    assert!(matches!(try_save(&path, &[sample_item(1)]), Err(PersistenceError::Write { .. })));
    save(&path, &[sample_item(1)]);
    assert!(path.is_dir());
  }

  #[tokio::test]
  async fn test_save_async_writes_before_returning() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("data").join("knowledge.json");

    save_async(path.clone(), vec![sample_item(2)]).await;

    let loaded: Vec<KnowledgeItem> = try_load(&path).unwrap();
    assert_eq!(loaded, vec![sample_item(2)]);
  }
}
