//! Logging infrastructure for flush scheduling.
//!
//! All events go through `tracing` with target "flushwise" and carry an
//! `event` field for filtering.
//!
//! ## Library Integration
//!
//! This crate never initializes a global subscriber. The embedding engine
//! configures tracing via `tracing_subscriber` or similar.
//!
//! ## Conventions
//!
//! - `event`: snake_case event name (required)
//! - `component`: subsystem emitting the event (e.g., "flush_strategy")
//! - Use `%` for Display, `?` for Debug formatting
//! - Per-target fields only at debug level; rounds can carry hundreds of targets

/// Target for all flushwise log events.
pub(crate) const FLUSHWISE_TARGET: &str = "flushwise";

/// Macro for info-level log events.
///
/// # Example
/// ```ignore
/// log_info!(
///     component = "flush_strategy",
///     event = "flush_config_updated",
///     max_global_memory = cfg.max_global_memory,
/// );
/// ```
macro_rules! log_info {
    ($($field:tt)*) => {
        ::tracing::info!(target: $crate::observability::FLUSHWISE_TARGET, $($field)*)
    };
}

/// Macro for debug-level log events.
macro_rules! log_debug {
    ($($field:tt)*) => {
        ::tracing::debug!(target: $crate::observability::FLUSHWISE_TARGET, $($field)*)
    };
}

pub(crate) use log_debug;
pub(crate) use log_info;
