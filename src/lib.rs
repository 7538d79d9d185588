#![deny(missing_docs)]
//! Flush-target ranking for persistent storage engines.
//!
//! A storage engine keeps many independently flushable in-memory structures
//! (indexes, attributes, document stores). This crate decides which of them
//! should be written out next: given the current candidates and a snapshot of
//! transaction-log statistics, a [`FlushStrategy`] returns the candidates in
//! priority order. Executing the flushes stays with the caller.
//!
//! The default strategy, [`MemoryFlush`], weighs global limits (total memory,
//! total transaction-log size, aggregate disk bloat) against per-target limits
//! (memory gain, disk bloat, serial gain, age) and picks one [`OrderType`] per
//! round to sort by.

mod observability;

/// In-process counters describing ranking rounds.
pub mod metrics;

/// Flush strategies and their configuration.
pub mod strategy;

/// Flush candidate descriptors.
pub mod target;

/// Transaction-log statistics snapshot consumed during ranking.
pub mod tls;

pub use crate::{
    metrics::{FlushStrategyMetrics, FlushStrategyMetricsSnapshot},
    strategy::{
        config::MemoryFlushConfig, error::ConfigError, memory::MemoryFlush, order::OrderType,
        FlushPlan, FlushStrategy,
    },
    target::{DiskGain, FlushCandidate, TargetId},
    tls::{TlsStats, TlsStatsMap},
};
