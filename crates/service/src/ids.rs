//! Record identifier generation

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use configs::IdStrategy;
use uuid::Uuid;

/// Source of candidate identifiers. The store still checks candidates
/// against the collection before using them.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;

    /// Called with every id already stored before a draw.
    fn observe(&self, _existing: &str) {}
}

/// Random v4 UUIDs.
#[derive(Default, Debug, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Strictly increasing decimal counter, starting at 1 by default.
///
/// Observed numeric ids push the counter past them, so a fresh counter over
/// a populated collection continues after its highest id.
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self { Self::starting_at(1) }

    pub fn starting_at(first: u64) -> Self {
        Self { next: AtomicU64::new(first) }
    }
}

impl Default for SequentialIds {
    fn default() -> Self { Self::new() }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        self.next.fetch_add(1, Ordering::SeqCst).to_string()
    }

    fn observe(&self, existing: &str) {
        if let Some(next) = existing.parse::<u64>().ok().and_then(|n| n.checked_add(1)) {
            self.next.fetch_max(next, Ordering::SeqCst);
        }
    }
}

pub fn from_strategy(strategy: IdStrategy) -> Arc<dyn IdGenerator> {
    match strategy {
        IdStrategy::Uuid => Arc::new(UuidIds),
        IdStrategy::Sequential => Arc::new(SequentialIds::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sequential_ids_increase() {
        let ids = SequentialIds::starting_at(10);
        assert_eq!(ids.next_id(), "10");
        assert_eq!(ids.next_id(), "11");
    }

    #[test]
    fn sequential_ids_skip_past_observed() {
        let ids = SequentialIds::new();
        ids.observe("41");
        ids.observe("7");
        ids.observe("abc");
        assert_eq!(ids.next_id(), "42");
    }

    #[test]
    fn uuid_ids_are_distinct() {
        let ids = UuidIds;
        let drawn: HashSet<String> = (0..1000).map(|_| ids.next_id()).collect();
        assert_eq!(drawn.len(), 1000);
    }
}
