//! Orderings used to rank flush candidates.
//!
//! Each [`OrderType`] is a total order over [`RankKey`]s, most urgent first.
//! When several per-target limits are exceeded in one round, the variant
//! declared last wins.

use std::{cmp::Ordering, fmt, sync::Arc, time::Duration};

use crate::target::FlushCandidate;

/// Criterion governing a ranking round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OrderType {
    /// Oldest unflushed data first, then largest serial gain.
    Default,
    /// Oldest unflushed data first.
    MaxAge,
    /// Largest pending serial gain first.
    MaxSerial,
    /// Largest reclaimable disk space first.
    DiskBloat,
    /// Largest transaction-log footprint first.
    TlsSize,
    /// Largest memory gain first.
    Memory,
}

impl OrderType {
    /// All variants, in declaration order.
    pub const ALL: [OrderType; 6] = [
        OrderType::Default,
        OrderType::MaxAge,
        OrderType::MaxSerial,
        OrderType::DiskBloat,
        OrderType::TlsSize,
        OrderType::Memory,
    ];

    /// Compare two keys under this criterion. `Less` means `lhs` is more urgent.
    ///
    /// Ties under the criterion are broken by ascending target id, so the
    /// result is total for distinct targets.
    pub fn compare(self, lhs: &RankKey, rhs: &RankKey) -> Ordering {
        self.compare_criterion(lhs, rhs)
            .then_with(|| lhs.candidate.id().cmp(rhs.candidate.id()))
    }

    fn compare_criterion(self, lhs: &RankKey, rhs: &RankKey) -> Ordering {
        match self {
            OrderType::Memory => rhs.memory_gain.cmp(&lhs.memory_gain),
            OrderType::DiskBloat => rhs.disk_gain.cmp(&lhs.disk_gain),
            OrderType::TlsSize => rhs.tls_bytes.cmp(&lhs.tls_bytes),
            OrderType::MaxAge => rhs.age.cmp(&lhs.age),
            OrderType::MaxSerial => rhs.serial_gain.cmp(&lhs.serial_gain),
            OrderType::Default => rhs
                .age
                .cmp(&lhs.age)
                .then_with(|| rhs.serial_gain.cmp(&lhs.serial_gain)),
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderType::Default => "default",
            OrderType::MaxAge => "max_age",
            OrderType::MaxSerial => "max_serial",
            OrderType::DiskBloat => "disk_bloat",
            OrderType::TlsSize => "tls_size",
            OrderType::Memory => "memory",
        };
        f.write_str(name)
    }
}

/// Per-round sort keys for one candidate, resolved once before sorting.
#[derive(Clone, Debug)]
pub struct RankKey {
    /// Candidate the keys were computed for.
    pub candidate: Arc<FlushCandidate>,
    /// Memory released by flushing.
    pub memory_gain: u64,
    /// Reclaimable disk bytes.
    pub disk_gain: u64,
    /// Transaction-log bytes attributed to the candidate; zero when unknown.
    pub tls_bytes: u64,
    /// Time since the last flush.
    pub age: Duration,
    /// Pending serial gain.
    pub serial_gain: u64,
    /// Strongest per-target limit the candidate exceeds, if any.
    pub over_threshold: Option<OrderType>,
}

impl RankKey {
    /// Returns `true` if the candidate exceeds at least one per-target limit.
    pub fn is_over_threshold(&self) -> bool {
        self.over_threshold.is_some()
    }
}
