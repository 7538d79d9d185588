//! Read-only view of the transaction log's per-target footprint.
//!
//! The engine computes this snapshot before each ranking round. A target
//! without an entry has no known pending log data.

use std::collections::HashMap;

use crate::target::TargetId;

/// Transaction-log footprint of a single target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TlsStats {
    num_bytes: u64,
    first_serial: u64,
    last_serial: u64,
}

impl TlsStats {
    /// Build stats for a log holding `num_bytes` across serials `first_serial..=last_serial`.
    pub const fn new(num_bytes: u64, first_serial: u64, last_serial: u64) -> Self {
        Self {
            num_bytes,
            first_serial,
            last_serial,
        }
    }

    /// Bytes retained in the log on behalf of the target.
    pub fn num_bytes(&self) -> u64 {
        self.num_bytes
    }

    /// First serial not yet pruned.
    pub fn first_serial(&self) -> u64 {
        self.first_serial
    }

    /// Most recent serial written.
    pub fn last_serial(&self) -> u64 {
        self.last_serial
    }
}

/// Snapshot of [`TlsStats`] keyed by target identity.
#[derive(Clone, Debug, Default)]
pub struct TlsStatsMap {
    inner: HashMap<TargetId, TlsStats>,
}

impl TlsStatsMap {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record stats for `id`, replacing any previous entry.
    pub fn insert(&mut self, id: impl Into<TargetId>, stats: TlsStats) -> Option<TlsStats> {
        self.inner.insert(id.into(), stats)
    }

    /// Stats for `id`, if the log knows about it.
    pub fn get(&self, id: &TargetId) -> Option<&TlsStats> {
        self.inner.get(id)
    }

    /// Log bytes attributed to `id`; zero when absent.
    pub fn num_bytes(&self, id: &TargetId) -> u64 {
        self.get(id).map(TlsStats::num_bytes).unwrap_or(0)
    }

    /// Number of targets with recorded stats.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if no stats are recorded.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K: Into<TargetId>> FromIterator<(K, TlsStats)> for TlsStatsMap {
    fn from_iter<I: IntoIterator<Item = (K, TlsStats)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_entry_reads_as_zero_bytes() {
        let map: TlsStatsMap = [("a", TlsStats::new(4096, 10, 20))].into_iter().collect();
        assert_eq!(map.num_bytes(&TargetId::from("a")), 4096);
        assert_eq!(map.num_bytes(&TargetId::from("missing")), 0);
        assert!(map.get(&TargetId::from("missing")).is_none());
    }

    #[test]
    fn insert_replaces_previous_entry() {
        let mut map = TlsStatsMap::new();
        assert!(map.insert("a", TlsStats::new(1, 1, 1)).is_none());
        let prev = map.insert("a", TlsStats::new(2, 1, 2));
        assert_eq!(prev, Some(TlsStats::new(1, 1, 1)));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&"a".into()).map(TlsStats::last_serial), Some(2));
    }
}
