use thiserror::Error;

/// Rejections reported by [`MemoryFlushConfig::validate`](super::config::MemoryFlushConfig::validate).
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A ratio threshold was below zero.
    #[error("flush threshold `{name}` must not be negative, got {value}")]
    Negative {
        /// Name of the offending field.
        name: &'static str,
        /// Value supplied.
        value: f64,
    },
    /// A ratio threshold was NaN.
    #[error("flush threshold `{name}` is not a number")]
    NotANumber {
        /// Name of the offending field.
        name: &'static str,
    },
}
