//! Threshold-driven flush ranking.
//!
//! [`MemoryFlush`] evaluates global limits against aggregate statistics to
//! pick the governing [`OrderType`] for a round, marks candidates that exceed
//! a per-target limit, and sorts: over-threshold candidates first, then by the
//! governing order, then by target id.
//!
//! A breached global limit forces the whole ranked list; otherwise only the
//! over-threshold prefix is forced.
//!
//! Global triggers are checked in a fixed precedence, first match wins:
//! memory, disk bloat, transaction-log size. When none fires, the strongest
//! per-target trigger seen in the round governs (memory, disk bloat, serial
//! gain, age). With no trigger at all the round uses [`OrderType::Default`].

use std::{
    collections::HashSet,
    sync::Arc,
    time::{Duration, SystemTime},
};

use parking_lot::Mutex;

use super::{
    config::MemoryFlushConfig,
    order::{OrderType, RankKey},
    FlushPlan, FlushStrategy,
};
use crate::{
    metrics::{FlushStrategyMetrics, FlushStrategyMetricsSnapshot},
    observability::{log_debug, log_info},
    target::{DiskGain, FlushCandidate, TargetId},
    tls::TlsStatsMap,
};

/// State shared between the scheduling loop and configuration reloads.
#[derive(Clone, Debug)]
struct Shared {
    config: MemoryFlushConfig,
    start_time: SystemTime,
}

/// Ranking strategy bounding memory, transaction-log size, disk bloat and staleness.
///
/// Configuration may be replaced from any thread while rankings are in
/// progress; each ranking works on the snapshot taken when it started.
#[derive(Debug)]
pub struct MemoryFlush {
    shared: Mutex<Shared>,
    metrics: FlushStrategyMetrics,
}

impl Default for MemoryFlush {
    fn default() -> Self {
        Self::new(MemoryFlushConfig::default())
    }
}

impl MemoryFlush {
    /// Create a strategy whose never-flushed targets age from now.
    pub fn new(config: MemoryFlushConfig) -> Self {
        Self::with_start_time(config, SystemTime::now())
    }

    /// Create a strategy with an explicit reference instant for never-flushed targets.
    pub fn with_start_time(config: MemoryFlushConfig, start_time: SystemTime) -> Self {
        Self {
            shared: Mutex::new(Shared { config, start_time }),
            metrics: FlushStrategyMetrics::new(),
        }
    }

    /// Replace the active configuration. Rankings already in progress keep their snapshot.
    pub fn set_config(&self, config: MemoryFlushConfig) {
        log_info!(
            component = "flush_strategy",
            event = "flush_config_updated",
            max_global_memory = config.max_global_memory,
            max_global_tls_size = config.max_global_tls_size,
            global_disk_bloat_factor = config.global_disk_bloat_factor,
            max_memory_gain = config.max_memory_gain,
            disk_bloat_factor = config.disk_bloat_factor,
            max_serial_gain = config.max_serial_gain,
            max_time_gain = ?config.max_time_gain,
        );
        self.shared.lock().config = config;
    }

    /// Copy of the active configuration.
    pub fn config(&self) -> MemoryFlushConfig {
        self.shared.lock().config.clone()
    }

    /// Reference instant for targets that were never flushed.
    pub fn start_time(&self) -> SystemTime {
        self.shared.lock().start_time
    }

    /// Counters accumulated over all rounds.
    pub fn metrics(&self) -> FlushStrategyMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Rank `targets` as of the current wall-clock time.
    pub fn plan(&self, targets: &[Arc<FlushCandidate>], tls_stats: &TlsStatsMap) -> FlushPlan {
        self.plan_at(SystemTime::now(), targets, tls_stats)
    }

    /// Rank `targets` with ages measured at `now`.
    pub fn plan_at(
        &self,
        now: SystemTime,
        targets: &[Arc<FlushCandidate>],
        tls_stats: &TlsStatsMap,
    ) -> FlushPlan {
        let Shared { config, start_time } = self.shared.lock().clone();

        let mut keys: Vec<RankKey> = targets
            .iter()
            .map(|target| rank_key(&config, target, tls_stats, now, start_time))
            .collect();

        let totals = RoundTotals::collect(targets, tls_stats);
        let global = totals.global_trigger(&config);
        let order = global
            .or_else(|| keys.iter().filter_map(|key| key.over_threshold).max())
            .unwrap_or(OrderType::Default);

        keys.sort_by(|lhs, rhs| {
            rhs.is_over_threshold()
                .cmp(&lhs.is_over_threshold())
                .then_with(|| order.compare(lhs, rhs))
        });
        let forced = if global.is_some() {
            keys.len()
        } else {
            keys.iter().take_while(|key| key.is_over_threshold()).count()
        };

        if let Some(trigger) = global {
            log_debug!(
                component = "flush_strategy",
                event = "flush_global_limit_exceeded",
                order = %trigger,
                total_memory = totals.memory,
                total_tls_bytes = totals.tls_bytes,
                disk_bloat_factor = totals.disk.bloat_factor(),
            );
        }
        log_debug!(
            component = "flush_strategy",
            event = "flush_targets_ranked",
            order = %order,
            candidates = keys.len(),
            forced,
            total_memory = totals.memory,
            total_tls_bytes = totals.tls_bytes,
        );
        self.metrics.record_round(order, keys.len(), forced);

        let ranked = keys.into_iter().map(|key| key.candidate).collect();
        FlushPlan::new(order, ranked, forced)
    }
}

impl FlushStrategy for MemoryFlush {
    fn get_flush_targets(
        &self,
        targets: &[Arc<FlushCandidate>],
        tls_stats: &TlsStatsMap,
    ) -> Vec<Arc<FlushCandidate>> {
        self.plan(targets, tls_stats).into_targets()
    }
}

/// Aggregate statistics over every candidate in a round.
#[derive(Debug, Default)]
struct RoundTotals {
    memory: u64,
    tls_bytes: u64,
    disk: DiskGain,
}

impl RoundTotals {
    fn collect(targets: &[Arc<FlushCandidate>], tls_stats: &TlsStatsMap) -> Self {
        let mut totals = RoundTotals::default();
        let mut seen: HashSet<&TargetId> = HashSet::with_capacity(targets.len());
        for target in targets {
            totals.memory = totals.memory.saturating_add(target.approx_memory_gain());
            totals.disk += target.approx_disk_gain();
            // Log bytes belong to the target, not to each handle the engine passed in.
            if seen.insert(target.id()) {
                totals.tls_bytes = totals
                    .tls_bytes
                    .saturating_add(tls_stats.num_bytes(target.id()));
            }
        }
        totals
    }

    fn global_trigger(&self, config: &MemoryFlushConfig) -> Option<OrderType> {
        if self.memory > config.max_global_memory {
            Some(OrderType::Memory)
        } else if self.disk.bloat_factor() > config.global_disk_bloat_factor {
            Some(OrderType::DiskBloat)
        } else if self.tls_bytes > config.max_global_tls_size {
            Some(OrderType::TlsSize)
        } else {
            None
        }
    }
}

fn rank_key(
    config: &MemoryFlushConfig,
    target: &Arc<FlushCandidate>,
    tls_stats: &TlsStatsMap,
    now: SystemTime,
    start_time: SystemTime,
) -> RankKey {
    let age = target.age(now, start_time);
    RankKey {
        candidate: Arc::clone(target),
        memory_gain: target.approx_memory_gain(),
        disk_gain: target.approx_disk_gain().gain(),
        tls_bytes: tls_stats.num_bytes(target.id()),
        age,
        serial_gain: target.pending_serial_gain(),
        over_threshold: local_trigger(config, target, age),
    }
}

fn local_trigger(
    config: &MemoryFlushConfig,
    target: &FlushCandidate,
    age: Duration,
) -> Option<OrderType> {
    if target.approx_memory_gain() > config.max_memory_gain {
        Some(OrderType::Memory)
    } else if target.approx_disk_gain().bloat_factor() > config.disk_bloat_factor {
        Some(OrderType::DiskBloat)
    } else if target.pending_serial_gain() > config.max_serial_gain {
        Some(OrderType::MaxSerial)
    } else if age > config.max_time_gain {
        Some(OrderType::MaxAge)
    } else {
        None
    }
}
