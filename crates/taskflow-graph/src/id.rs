//! Session-scoped identifier allocation.

use tracing::debug;

/// Prefix of allocated node ids.
pub const NODE_ID_PREFIX: &str = "node_";

/// Prefix of allocated edge ids.
pub const EDGE_ID_PREFIX: &str = "edge_";

/// Issues ids of the form `<prefix><n>` from a counter that never decreases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
  prefix: String,
  next: u64,
}

impl IdAllocator {
  pub fn new(prefix: impl Into<String>) -> Self {
    Self {
      prefix: prefix.into(),
      next: 0,
    }
  }

  /// Allocator for `node_<n>` ids.
  pub fn for_nodes() -> Self {
    Self::new(NODE_ID_PREFIX)
  }

  /// Allocator for `edge_<n>` ids.
  pub fn for_edges() -> Self {
    Self::new(EDGE_ID_PREFIX)
  }

  pub fn prefix(&self) -> &str {
    &self.prefix
  }

  /// The counter value the next call to [`next_id`](Self::next_id) will use.
  pub fn peek(&self) -> u64 {
    self.next
  }

  /// Return `<prefix><counter>` and advance the counter.
  pub fn next_id(&mut self) -> String {
    let id = format!("{}{}", self.prefix, self.next);
    self.next += 1;
    id
  }

  /// Parse the numeric suffix of `id` if it has the form `<prefix><digits>`.
  pub fn suffix_of(&self, id: &str) -> Option<u64> {
    let digits = id.strip_prefix(self.prefix.as_str())?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
      return None;
    }
    digits.parse().ok()
  }

  /// Move the counter strictly above `max_observed`.
  ///
  /// `None` means no matching id was observed. The counter is never lowered,
  /// so ids already issued in this session are never handed out again.
  pub fn reseed(&mut self, max_observed: Option<u64>) {
    if let Some(max) = max_observed {
      self.next = self.next.max(max.saturating_add(1));
    }
    debug!(prefix = %self.prefix, next = self.next, "reseeded id allocator");
  }

  /// Reseed from a set of observed ids, ignoring any that do not match the pattern.
  pub fn reseed_from<'a, I>(&mut self, ids: I)
  where
    I: IntoIterator<Item = &'a str>,
  {
    let max_observed = ids.into_iter().filter_map(|id| self.suffix_of(id)).max();
    self.reseed(max_observed);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_sequential_ids() {
    let mut ids = IdAllocator::for_nodes();
    let issued: Vec<String> = (0..4).map(|_| ids.next_id()).collect();
    assert_eq!(issued, vec!["node_0", "node_1", "node_2", "node_3"]);
    assert_eq!(ids.peek(), 4);
  }

  #[test]
  fn test_suffix_of() {
    let ids = IdAllocator::for_nodes();
    assert_eq!(ids.suffix_of("node_12"), Some(12));
    assert_eq!(ids.suffix_of("node_007"), Some(7));
    assert_eq!(ids.suffix_of("node_"), None);
    assert_eq!(ids.suffix_of("node_1a"), None);
    assert_eq!(ids.suffix_of("node_-1"), None);
    assert_eq!(ids.suffix_of("edge_3"), None);
    assert_eq!(ids.suffix_of("custom"), None);
    assert_eq!(ids.suffix_of("node_99999999999999999999999"), None);
  }

  #[test]
  fn test_reseed_above_max() {
    let mut ids = IdAllocator::for_nodes();
    ids.reseed_from(["node_0", "node_7", "node_3", "start"]);
    assert_eq!(ids.next_id(), "node_8");
  }

  #[test]
  fn test_reseed_without_matches_keeps_counter() {
    let mut ids = IdAllocator::for_nodes();
    ids.next_id();
    ids.reseed_from(["alpha", "beta"]);
    assert_eq!(ids.next_id(), "node_1");
  }

  #[test]
  fn test_reseed_never_lowers_counter() {
    let mut ids = IdAllocator::for_nodes();
    for _ in 0..10 {
      ids.next_id();
    }
    ids.reseed(Some(2));
    assert_eq!(ids.next_id(), "node_10");
  }

  #[test]
  fn test_independent_allocators() {
    let mut a = IdAllocator::for_nodes();
    let mut b = IdAllocator::for_nodes();
    a.next_id();
    a.next_id();
    assert_eq!(b.next_id(), "node_0");
    assert_eq!(a.next_id(), "node_2");
  }
}
