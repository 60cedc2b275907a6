//! In-memory record stores
//!
//! Both stores own their collection and next-id counter. Ids are assigned
//! monotonically and never reused, and a reloaded store resumes numbering at
//! one past the highest persisted id.

pub mod knowledge;
pub mod recent;

pub use knowledge::KnowledgeStore;
pub use recent::{RecentQaStore, RECENT_CAPACITY};

use thiserror::Error;

/// Lookup miss for an id that is not (or no longer) in a store
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No entry with id {id}")]
pub struct NotFound {
  pub id: u64,
}

/// Next id to assign after loading `ids`, or `None` when the id space is exhausted
pub(crate) fn next_id_after<I: IntoIterator<Item = u64>>(ids: I) -> Option<u64> {
  match ids.into_iter().max() {
    Some(max) => max.checked_add(1),
    None => Some(1),
  }
}

/// Hand out the current id and advance the counter.
///
/// At `u64::MAX` the counter stays put and the last id is handed out again.
pub(crate) fn take_id(next_id: &mut u64) -> u64 {
  let id = *next_id;
  match id.checked_add(1) {
    Some(next) => *next_id = next,
    None => {
      bentley::warn!(&format!("Id counter exhausted at {id}; ids will repeat"));
    }
  }
  id
}
