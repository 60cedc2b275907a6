use crate::records::QaRecord;
use crate::store::{next_id_after, take_id};

/// Number of exchanges the recent history keeps
pub const RECENT_CAPACITY: usize = 5;

/// Newest-first history of the last few chat exchanges
#[derive(Debug, Clone)]
pub struct RecentQaStore {
  records: Vec<QaRecord>,
  next_id: u64,
}

impl Default for RecentQaStore {
  fn default() -> Self {
    Self::new()
  }
}

impl RecentQaStore {
  pub fn new() -> Self {
    Self { records: Vec::new(), next_id: 1 }
  }

  /// Rebuild a store from persisted records, already in newest-first order.
  ///
  /// Anything past the capacity is dropped; numbering resumes after the highest kept id.
  /// Records whose ids leave no room for a next id are discarded.
  pub fn from_records(mut records: Vec<QaRecord>) -> Self {
    records.truncate(RECENT_CAPACITY);
    match next_id_after(records.iter().map(|r| r.id)) {
      Some(next_id) => Self { records, next_id },
      None => {
        bentley::warn!("Recent Q&A ids exhausted the id space; starting with no records");
        Self::new()
      }
    }
  }

  /// Record a new exchange stamped with the current time
  pub fn insert(&mut self, question: String, answer: String, model: String) -> QaRecord {
    self.insert_record(QaRecord::new(question, answer, model))
  }

  /// Insert a record at the front, assigning its id and evicting the oldest past capacity
  pub fn insert_record(&mut self, mut record: QaRecord) -> QaRecord {
    record.id = take_id(&mut self.next_id);

    self.records.insert(0, record.clone());
    self.records.truncate(RECENT_CAPACITY);
    record
  }

  pub fn find(&self, id: u64) -> Option<&QaRecord> {
    self.records.iter().find(|record| record.id == id)
  }

  pub fn list(&self) -> &[QaRecord] {
    &self.records
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  pub fn next_id(&self) -> u64 {
    self.next_id
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn insert_n(store: &mut RecentQaStore, n: usize) {
    for i in 0..n {
      store.insert(format!("question {i}"), format!("answer {i}"), "gpt-4o-mini".to_string());
    }
  }

  fn ids(store: &RecentQaStore) -> Vec<u64> {
    store.list().iter().map(|r| r.id).collect()
  }

  #[test]
  fn test_length_is_bounded_after_every_insert() {
    let mut store = RecentQaStore::new();
    for count in 1..=9 {
      store.insert("q".to_string(), "a".to_string(), "m".to_string());
      assert_eq!(store.len(), count.min(RECENT_CAPACITY));
    }
  }

  #[test]
  fn test_newest_first_with_eviction() {
    let mut store = RecentQaStore::new();
    insert_n(&mut store, 6);

    assert_eq!(ids(&store), vec![6, 5, 4, 3, 2]);
    assert_eq!(store.list()[0].answer, "answer 5");
    assert!(store.find(1).is_none());
    assert_eq!(store.next_id(), 7);
  }

  #[test]
  fn test_find_hit_and_miss() {
    let mut store = RecentQaStore::new();
    insert_n(&mut store, 3);

    assert_eq!(store.find(2).map(|r| r.question.as_str()), Some("question 1"));
    assert!(store.find(42).is_none());
  }

  #[test]
  fn test_insert_record_reassigns_id_and_keeps_timestamp() {
    let mut store = RecentQaStore::new();
    let mut record = QaRecord::new("q".to_string(), "a".to_string(), "m".to_string());
    record.id = 99;
    let stamped = record.timestamp;

    let inserted = store.insert_record(record);
    assert_eq!(inserted.id, 1);
    assert_eq!(inserted.timestamp, stamped);
  }

  #[test]
  fn test_empty_answer_is_accepted() {
    let mut store = RecentQaStore::new();
    let record = store.insert("q".to_string(), String::new(), "m".to_string());
    assert_eq!(store.find(record.id).unwrap().answer, "");
  }

  #[test]
  fn test_from_records_resumes_numbering() {
    let mut original = RecentQaStore::new();
    insert_n(&mut original, 8);

    let mut restored = RecentQaStore::from_records(original.list().to_vec());
    assert_eq!(restored.list(), original.list());
    assert_eq!(restored.next_id(), 9);

    let next = restored.insert("q".to_string(), "a".to_string(), "m".to_string());
    assert_eq!(next.id, 9);
  }

  #[test]
  fn test_from_records_truncates_oversized_history() {
    let records: Vec<QaRecord> = (1..=7)
      .rev()
      .map(|id| {
        let mut record = QaRecord::new("q".to_string(), "a".to_string(), "m".to_string());
        record.id = id;
        record
      })
      .collect();

    let store = RecentQaStore::from_records(records);
    assert_eq!(ids(&store), vec![7, 6, 5, 4, 3]);
    assert_eq!(store.next_id(), 8);
  }

  #[test]
  fn test_from_records_with_max_id_starts_empty() {
    let mut record = QaRecord::new("q".to_string(), "a".to_string(), "m".to_string());
    record.id = u64::MAX;

    let mut store = RecentQaStore::from_records(vec![record]);
    assert!(store.is_empty());
    assert_eq!(store.insert("q".to_string(), "a".to_string(), "m".to_string()).id, 1);
  }

  #[test]
  fn test_from_empty_records_starts_at_one() {
    let store = RecentQaStore::from_records(Vec::new());
    assert!(store.is_empty());
    assert_eq!(store.next_id(), 1);
  }
}
