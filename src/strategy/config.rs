use std::time::Duration;

use super::error::ConfigError;

/// Thresholds driving [`MemoryFlush`](super::memory::MemoryFlush).
///
/// Every trigger fires when the observed value is strictly greater than its
/// limit. A zero limit fires for any non-zero value; the unbounded defaults
/// never fire, so an unconfigured strategy never forces a flush.
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryFlushConfig {
    /// Limit on memory held by all targets together.
    pub max_global_memory: u64,
    /// Limit on transaction-log bytes retained across all targets.
    pub max_global_tls_size: u64,
    /// Limit on the aggregate disk bloat factor.
    pub global_disk_bloat_factor: f64,
    /// Limit on memory a single target may hold unflushed.
    pub max_memory_gain: u64,
    /// Limit on a single target's disk bloat factor.
    pub disk_bloat_factor: f64,
    /// Limit on a single target's outstanding serial gain.
    pub max_serial_gain: u64,
    /// Limit on how long a single target may go unflushed.
    pub max_time_gain: Duration,
}

impl Default for MemoryFlushConfig {
    fn default() -> Self {
        Self {
            max_global_memory: u64::MAX,
            max_global_tls_size: u64::MAX,
            global_disk_bloat_factor: f64::INFINITY,
            max_memory_gain: u64::MAX,
            disk_bloat_factor: f64::INFINITY,
            max_serial_gain: u64::MAX,
            max_time_gain: Duration::MAX,
        }
    }
}

impl MemoryFlushConfig {
    /// Build a config from explicit thresholds.
    pub fn new(
        max_global_memory: u64,
        max_global_tls_size: u64,
        global_disk_bloat_factor: f64,
        max_memory_gain: u64,
        disk_bloat_factor: f64,
        max_serial_gain: u64,
        max_time_gain: Duration,
    ) -> Self {
        Self {
            max_global_memory,
            max_global_tls_size,
            global_disk_bloat_factor,
            max_memory_gain,
            disk_bloat_factor,
            max_serial_gain,
            max_time_gain,
        }
    }

    /// Set the global memory limit in bytes.
    pub fn max_global_memory(self, max_global_memory: u64) -> Self {
        MemoryFlushConfig {
            max_global_memory,
            ..self
        }
    }

    /// Set the global transaction-log size limit in bytes.
    pub fn max_global_tls_size(self, max_global_tls_size: u64) -> Self {
        MemoryFlushConfig {
            max_global_tls_size,
            ..self
        }
    }

    /// Set the aggregate disk bloat factor limit.
    pub fn global_disk_bloat_factor(self, global_disk_bloat_factor: f64) -> Self {
        MemoryFlushConfig {
            global_disk_bloat_factor,
            ..self
        }
    }

    /// Set the per-target memory limit in bytes.
    pub fn max_memory_gain(self, max_memory_gain: u64) -> Self {
        MemoryFlushConfig {
            max_memory_gain,
            ..self
        }
    }

    /// Set the per-target disk bloat factor limit.
    pub fn disk_bloat_factor(self, disk_bloat_factor: f64) -> Self {
        MemoryFlushConfig {
            disk_bloat_factor,
            ..self
        }
    }

    /// Set the per-target serial gain limit.
    pub fn max_serial_gain(self, max_serial_gain: u64) -> Self {
        MemoryFlushConfig {
            max_serial_gain,
            ..self
        }
    }

    /// Set the per-target maximum unflushed age.
    pub fn max_time_gain(self, max_time_gain: Duration) -> Self {
        MemoryFlushConfig {
            max_time_gain,
            ..self
        }
    }

    /// Check the floating-point thresholds before handing the config to a strategy.
    ///
    /// Integer and duration limits cannot be out of range. The strategy itself
    /// accepts any value; this is for loaders that want to reject bad input.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("global_disk_bloat_factor", self.global_disk_bloat_factor),
            ("disk_bloat_factor", self.disk_bloat_factor),
        ] {
            if value.is_nan() {
                return Err(ConfigError::NotANumber { name });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }
        Ok(())
    }
}
