//! Ranking observability counters.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::strategy::order::OrderType;

const ORDER_COUNT: usize = OrderType::ALL.len();

/// Snapshot of flush strategy counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushStrategyMetricsSnapshot {
    /// Ranking rounds evaluated.
    pub rounds: u64,
    /// Rounds per governing order, indexed in [`OrderType::ALL`] order.
    pub rounds_by_order: [u64; ORDER_COUNT],
    /// Candidates placed in a forced prefix, summed over all rounds.
    pub forced_targets: u64,
    /// Candidates ranked, summed over all rounds.
    pub ranked_targets: u64,
}

impl FlushStrategyMetricsSnapshot {
    /// Rounds governed by `order`.
    pub fn rounds_with(&self, order: OrderType) -> u64 {
        self.rounds_by_order[order.index()]
    }
}

/// Lock-free counters updated once per ranking round.
#[derive(Debug, Default)]
pub struct FlushStrategyMetrics {
    rounds: AtomicU64,
    rounds_by_order: [AtomicU64; ORDER_COUNT],
    forced_targets: AtomicU64,
    ranked_targets: AtomicU64,
}

impl FlushStrategyMetrics {
    /// Create a zeroed metrics registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_round(&self, order: OrderType, ranked: usize, forced: usize) {
        self.rounds.fetch_add(1, Ordering::Relaxed);
        self.rounds_by_order[order.index()].fetch_add(1, Ordering::Relaxed);
        self.ranked_targets.fetch_add(ranked as u64, Ordering::Relaxed);
        self.forced_targets.fetch_add(forced as u64, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> FlushStrategyMetricsSnapshot {
        FlushStrategyMetricsSnapshot {
            rounds: self.rounds.load(Ordering::Relaxed),
            rounds_by_order: std::array::from_fn(|idx| {
                self.rounds_by_order[idx].load(Ordering::Relaxed)
            }),
            forced_targets: self.forced_targets.load(Ordering::Relaxed),
            ranked_targets: self.ranked_targets.load(Ordering::Relaxed),
        }
    }
}
