//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::{
    sync::Arc,
    time::{Duration, SystemTime},
};

use flushwise::{DiskGain, FlushCandidate, TlsStats, TlsStatsMap};

/// Fixed evaluation instant so ages are reproducible.
pub fn now() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

/// Candidate with the given memory gain, flushed `age_secs` before [`now`].
pub fn candidate(name: &str, memory: u64, age_secs: u64) -> Arc<FlushCandidate> {
    FlushCandidate::new(name)
        .memory_gain(memory)
        .last_flush_time(now() - Duration::from_secs(age_secs))
        .into_shared()
}

/// Names of `targets` in order.
pub fn names(targets: &[Arc<FlushCandidate>]) -> Vec<String> {
    targets.iter().map(|t| t.id().to_string()).collect()
}

/// Random candidates and a matching log snapshot that leaves some targets out.
pub fn random_round(
    rng: &mut fastrand::Rng,
    count: usize,
) -> (Vec<Arc<FlushCandidate>>, TlsStatsMap) {
    let mut tls = TlsStatsMap::new();
    let targets = (0..count)
        .map(|idx| {
            let name = format!("handler{}.target{idx}", rng.u8(0..4));
            if rng.bool() {
                let first = rng.u64(0..1_000);
                tls.insert(
                    name.as_str(),
                    TlsStats::new(rng.u64(0..1 << 20), first, first + rng.u64(0..1_000)),
                );
            }
            let before = rng.u64(0..500_000_000);
            let mut candidate = FlushCandidate::new(name)
                .memory_gain(rng.u64(0..1 << 24))
                .disk_gain(DiskGain::new(before, rng.u64(0..=before)))
                .serial_gain(rng.u64(0..10_000));
            if rng.bool() {
                candidate =
                    candidate.last_flush_time(now() - Duration::from_secs(rng.u64(0..3_600)));
            }
            candidate.into_shared()
        })
        .collect();
    (targets, tls)
}
