//! Simulated network latency
//!
//! Each store operation kind has a fixed delay, applied before the operation
//! touches its slot. A zero delay skips the suspension entirely.

use std::time::Duration;

use configs::LatencyConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
    GetAll,
    GetById,
    Create,
    Update,
    Delete,
    Count,
    Search,
}

impl OpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::GetAll => "get_all",
            OpKind::GetById => "get_by_id",
            OpKind::Create => "create",
            OpKind::Update => "update",
            OpKind::Delete => "delete",
            OpKind::Count => "count",
            OpKind::Search => "search",
        }
    }
}

/// Per-operation delays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Latency {
    get_all: Duration,
    get_by_id: Duration,
    create: Duration,
    update: Duration,
    delete: Duration,
    count: Duration,
    search: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self::from(&LatencyConfig::default())
    }
}

impl From<&LatencyConfig> for Latency {
    fn from(cfg: &LatencyConfig) -> Self {
        Self {
            get_all: Duration::from_millis(cfg.get_all_ms),
            get_by_id: Duration::from_millis(cfg.get_by_id_ms),
            create: Duration::from_millis(cfg.create_ms),
            update: Duration::from_millis(cfg.update_ms),
            delete: Duration::from_millis(cfg.delete_ms),
            count: Duration::from_millis(cfg.count_ms),
            search: Duration::from_millis(cfg.search_ms),
        }
    }
}

impl Latency {
    /// No delay for any operation.
    pub fn none() -> Self {
        Self::uniform(Duration::ZERO)
    }

    pub fn uniform(delay: Duration) -> Self {
        Self { get_all: delay, get_by_id: delay, create: delay, update: delay, delete: delay, count: delay, search: delay }
    }

    /// Override the delay of one operation kind.
    pub fn with(mut self, kind: OpKind, delay: Duration) -> Self {
        *self.slot_mut(kind) = delay;
        self
    }

    pub fn delay_for(&self, kind: OpKind) -> Duration {
        match kind {
            OpKind::GetAll => self.get_all,
            OpKind::GetById => self.get_by_id,
            OpKind::Create => self.create,
            OpKind::Update => self.update,
            OpKind::Delete => self.delete,
            OpKind::Count => self.count,
            OpKind::Search => self.search,
        }
    }

    /// Suspend for the configured delay of `kind`.
    pub async fn simulate(&self, kind: OpKind) {
        let delay = self.delay_for(kind);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn slot_mut(&mut self, kind: OpKind) -> &mut Duration {
        match kind {
            OpKind::GetAll => &mut self.get_all,
            OpKind::GetById => &mut self.get_by_id,
            OpKind::Create => &mut self.create,
            OpKind::Update => &mut self.update,
            OpKind::Delete => &mut self.delete,
            OpKind::Count => &mut self.count,
            OpKind::Search => &mut self.search,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_remote_api_profile() {
        let l = Latency::default();
        assert_eq!(l.delay_for(OpKind::GetAll), Duration::from_millis(300));
        assert_eq!(l.delay_for(OpKind::GetById), Duration::from_millis(200));
        assert_eq!(l.delay_for(OpKind::Create), Duration::from_millis(300));
        assert_eq!(l.delay_for(OpKind::Update), Duration::from_millis(300));
        assert_eq!(l.delay_for(OpKind::Delete), Duration::from_millis(300));
        assert_eq!(l.delay_for(OpKind::Count), Duration::from_millis(100));
        assert_eq!(l.delay_for(OpKind::Search), Duration::from_millis(200));
    }

    #[test]
    fn with_overrides_single_kind() {
        let l = Latency::none().with(OpKind::Count, Duration::from_millis(7));
        assert_eq!(l.delay_for(OpKind::Count), Duration::from_millis(7));
        assert_eq!(l.delay_for(OpKind::Search), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn simulate_sleeps_for_configured_delay() {
        let l = Latency::default();
        let start = tokio::time::Instant::now();
        l.simulate(OpKind::Count).await;
        assert!(start.elapsed() >= Duration::from_millis(100));

        let start = tokio::time::Instant::now();
        Latency::none().simulate(OpKind::GetAll).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
