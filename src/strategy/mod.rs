//! Flush strategies decide the order in which flush targets are written out.
//!
//! A strategy ranks, it does not filter: the returned list is always a
//! permutation of the candidates passed in. How many ranked entries actually
//! get flushed in a round is up to the engine.

use std::sync::Arc;

use crate::{target::FlushCandidate, tls::TlsStatsMap};

/// Strategy configuration.
pub mod config;
/// Configuration errors.
pub mod error;
/// Threshold-driven ranking engine.
pub mod memory;
/// Ranking criteria.
pub mod order;

use order::OrderType;

/// Pluggable ranking interface consumed by the flush engine.
pub trait FlushStrategy: Send + Sync {
    /// Rank `targets` for flushing, most urgent first.
    ///
    /// `tls_stats` is a caller-owned snapshot; entries may be missing.
    fn get_flush_targets(
        &self,
        targets: &[Arc<FlushCandidate>],
        tls_stats: &TlsStatsMap,
    ) -> Vec<Arc<FlushCandidate>>;
}

/// Outcome of one ranking round.
#[derive(Clone, Debug)]
pub struct FlushPlan {
    order: OrderType,
    targets: Vec<Arc<FlushCandidate>>,
    forced: usize,
}

impl FlushPlan {
    pub(crate) fn new(order: OrderType, targets: Vec<Arc<FlushCandidate>>, forced: usize) -> Self {
        debug_assert!(forced <= targets.len());
        Self {
            order,
            targets,
            forced,
        }
    }

    /// Criterion that governed the round.
    pub fn order(&self) -> OrderType {
        self.order
    }

    /// All candidates, most urgent first.
    pub fn targets(&self) -> &[Arc<FlushCandidate>] {
        &self.targets
    }

    /// Leading candidates that should be flushed regardless of engine-side stopping rules.
    ///
    /// Every candidate when a global limit was breached, otherwise those
    /// exceeding a per-target limit.
    pub fn forced(&self) -> &[Arc<FlushCandidate>] {
        &self.targets[..self.forced]
    }

    /// Returns `true` if a global or per-target limit was exceeded.
    pub fn is_urgent(&self) -> bool {
        self.order != OrderType::Default || self.forced > 0
    }

    /// Consume the plan, keeping only the ranked candidates.
    pub fn into_targets(self) -> Vec<Arc<FlushCandidate>> {
        self.targets
    }
}
