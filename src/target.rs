//! Descriptors for flushable in-memory components.
//!
//! A [`FlushCandidate`] is built by the engine once per scheduling round and
//! carries the statistics the strategy ranks on. Only the identity is stable
//! across rounds.

use std::{
    fmt,
    ops::{Add, AddAssign},
    sync::Arc,
    time::SystemTime,
};

/// Lower bound used as the denominator when computing disk bloat factors.
///
/// Small stores would otherwise report huge bloat ratios for a few megabytes
/// of garbage and flush constantly.
pub const DISK_BLOAT_BASE_BYTES: u64 = 100_000_000;

/// Stable identity of a flush target.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetId(Arc<str>);

impl TargetId {
    /// Create an identifier from a plain name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Identifier for a target owned by a handler, rendered as `"<handler>.<target>"`.
    pub fn scoped(handler: &str, target: &str) -> Self {
        Self::new(format!("{handler}.{target}"))
    }

    /// Borrow the underlying name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TargetId {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

/// On-disk footprint of a target before and after a hypothetical flush.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiskGain {
    /// Bytes currently occupied on disk.
    pub before: u64,
    /// Bytes expected to remain after flushing.
    pub after: u64,
}

impl DiskGain {
    /// Build a disk gain from before/after byte counts.
    pub const fn new(before: u64, after: u64) -> Self {
        Self { before, after }
    }

    /// Bytes reclaimed by flushing. A target that would grow reclaims nothing.
    pub fn gain(&self) -> u64 {
        self.before.saturating_sub(self.after)
    }

    /// Reclaimable bytes relative to the current size, floored at [`DISK_BLOAT_BASE_BYTES`].
    pub fn bloat_factor(&self) -> f64 {
        self.gain() as f64 / self.before.max(DISK_BLOAT_BASE_BYTES) as f64
    }
}

impl Add for DiskGain {
    type Output = DiskGain;

    fn add(self, rhs: Self) -> Self::Output {
        DiskGain {
            before: self.before.saturating_add(rhs.before),
            after: self.after.saturating_add(rhs.after),
        }
    }
}

impl AddAssign for DiskGain {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// One flushable target together with its statistics for the current round.
#[derive(Clone, Debug, PartialEq)]
pub struct FlushCandidate {
    id: TargetId,
    memory_gain: u64,
    disk_gain: DiskGain,
    serial_gain: u64,
    last_flush_time: Option<SystemTime>,
}

impl FlushCandidate {
    /// Create a candidate with zeroed statistics that has never been flushed.
    pub fn new(id: impl Into<TargetId>) -> Self {
        FlushCandidate {
            id: id.into(),
            memory_gain: 0,
            disk_gain: DiskGain::default(),
            serial_gain: 0,
            last_flush_time: None,
        }
    }

    /// Bytes of memory released by flushing this target.
    pub fn memory_gain(self, memory_gain: u64) -> Self {
        FlushCandidate {
            memory_gain,
            ..self
        }
    }

    /// On-disk footprint before and after flushing.
    pub fn disk_gain(self, disk_gain: DiskGain) -> Self {
        FlushCandidate { disk_gain, ..self }
    }

    /// Unflushed transaction-log progress attributable to this target.
    pub fn serial_gain(self, serial_gain: u64) -> Self {
        FlushCandidate {
            serial_gain,
            ..self
        }
    }

    /// Time of the last successful flush.
    pub fn last_flush_time(self, last_flush_time: SystemTime) -> Self {
        FlushCandidate {
            last_flush_time: Some(last_flush_time),
            ..self
        }
    }

    /// Wrap into the shared handle the engine passes around.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl FlushCandidate {
    /// Identity of the target.
    pub fn id(&self) -> &TargetId {
        &self.id
    }

    /// Memory gain in bytes.
    pub fn approx_memory_gain(&self) -> u64 {
        self.memory_gain
    }

    /// Disk footprint before and after flushing.
    pub fn approx_disk_gain(&self) -> DiskGain {
        self.disk_gain
    }

    /// Pending serial gain.
    pub fn pending_serial_gain(&self) -> u64 {
        self.serial_gain
    }

    /// Time of the last successful flush, if the target was ever flushed.
    pub fn last_flushed_at(&self) -> Option<SystemTime> {
        self.last_flush_time
    }

    /// Unflushed age at `now`, measured from `start_time` when the target was never flushed.
    pub fn age(&self, now: SystemTime, start_time: SystemTime) -> std::time::Duration {
        now.duration_since(self.last_flush_time.unwrap_or(start_time))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn disk_gain_clamps_growth_to_zero() {
        let growing = DiskGain::new(1_000, 5_000);
        assert_eq!(growing.gain(), 0);
        assert_eq!(growing.bloat_factor(), 0.0);
    }

    #[test]
    fn bloat_factor_uses_base_floor() {
        // 50 MB of garbage in a 60 MB store is measured against the 100 MB floor.
        let small = DiskGain::new(60_000_000, 10_000_000);
        assert!((small.bloat_factor() - 0.5).abs() < 1e-9);

        let large = DiskGain::new(400_000_000, 100_000_000);
        assert!((large.bloat_factor() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn disk_gains_sum() {
        let mut total = DiskGain::default();
        total += DiskGain::new(10, 4);
        total += DiskGain::new(5, 5);
        assert_eq!(total, DiskGain::new(15, 9));
        assert_eq!(total.gain(), 6);
    }

    #[test]
    fn scoped_id_joins_handler_and_target() {
        let id = TargetId::scoped("music", "attribute.year");
        assert_eq!(id.as_str(), "music.attribute.year");
        assert_eq!(id, TargetId::from("music.attribute.year"));
    }

    #[test]
    fn age_falls_back_to_start_time() {
        let start = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
        let now = start + Duration::from_secs(30);

        let never = FlushCandidate::new("a");
        assert_eq!(never.age(now, start), Duration::from_secs(30));

        let flushed = FlushCandidate::new("b").last_flush_time(now - Duration::from_secs(5));
        assert_eq!(flushed.age(now, start), Duration::from_secs(5));

        let future = FlushCandidate::new("c").last_flush_time(now + Duration::from_secs(5));
        assert_eq!(future.age(now, start), Duration::ZERO);
    }
}
