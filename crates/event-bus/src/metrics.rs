//! Counters for event bus activity
//!
//! All counters are relaxed atomics: they are monotonic tallies, not
//! synchronization points.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for one event bus
#[derive(Debug, Default)]
pub struct BusMetrics {
    /// `fire` calls, including ones for unknown events
    pub fires: AtomicU64,
    /// Individual handler invocations
    pub handlers_invoked: AtomicU64,
    /// Handler invocations that returned an error
    pub handler_failures: AtomicU64,
    /// Handlers appended by `subscribe`
    pub subscriptions: AtomicU64,
    /// Slots turned into tombstones by `unsubscribe` or `clear`
    pub slots_tombstoned: AtomicU64,
    /// Tombstoned slots reclaimed by compaction
    pub slots_reclaimed: AtomicU64,
}

impl BusMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one `fire` call
    pub(crate) fn record_fire(&self) {
        self.fires.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one handler invocation
    pub(crate) fn record_invocation(&self) {
        self.handlers_invoked.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one handler error
    pub(crate) fn record_failure(&self) {
        self.handler_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one `subscribe` call
    pub(crate) fn record_subscribe(&self) {
        self.subscriptions.fetch_add(1, Ordering::Relaxed);
    }

    /// Count slots tombstoned by `unsubscribe` or `clear`
    pub(crate) fn record_tombstoned(&self, count: usize) {
        self.slots_tombstoned.fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Count tombstoned slots reclaimed by compaction
    pub(crate) fn record_reclaimed(&self, count: usize) {
        self.slots_reclaimed.fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Get a point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            fires: self.fires.load(Ordering::Relaxed),
            handlers_invoked: self.handlers_invoked.load(Ordering::Relaxed),
            handler_failures: self.handler_failures.load(Ordering::Relaxed),
            subscriptions: self.subscriptions.load(Ordering::Relaxed),
            slots_tombstoned: self.slots_tombstoned.load(Ordering::Relaxed),
            slots_reclaimed: self.slots_reclaimed.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of [`BusMetrics`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub fires: u64,
    pub handlers_invoked: u64,
    pub handler_failures: u64,
    pub subscriptions: u64,
    pub slots_tombstoned: u64,
    pub slots_reclaimed: u64,
}

impl MetricsSnapshot {
    /// Live handlers implied by the counters (subscribed minus tombstoned)
    pub fn live_handlers(&self) -> u64 {
        self.subscriptions.saturating_sub(self.slots_tombstoned)
    }
}
