//! # Event Bus
//!
//! The registry owner and dispatcher. Every method takes `&self`; handlers
//! may call back into the bus they are running on.

use crate::config::EventBusConfig;
use crate::error::{BusError, ConfigError};
use crate::handler::Handler;
use crate::metrics::{BusMetrics, MetricsSnapshot};
use crate::registry::Registry;
use parking_lot::Mutex;
use std::fmt;
use tracing::{debug, trace, warn};

/// Named-event registry with synchronous, ordered dispatch.
///
/// The registry lock is held only for structural reads and writes, never
/// while a handler runs, so handlers can subscribe, unsubscribe or fire
/// on the same bus without deadlocking.
pub struct EventBus<A: ?Sized> {
    registry: Mutex<Registry<A>>,
    config: EventBusConfig,
    metrics: BusMetrics,
}

impl<A: ?Sized> EventBus<A> {
    /// Create an event bus with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::build(EventBusConfig::default())
    }

    /// Create an event bus with a validated configuration.
    pub fn with_config(config: EventBusConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EventBusConfig) -> Self {
        Self {
            registry: Mutex::new(Registry::with_capacity(config.expected_events)),
            config,
            metrics: BusMetrics::new(),
        }
    }

    /// Append `handler` to the subscribers of `name`.
    ///
    /// The same handler may be subscribed more than once; it then runs once
    /// per subscription.
    pub fn subscribe(&self, name: &str, handler: Handler<A>) {
        let slot = {
            let mut registry = self.registry.lock();
            let list = registry.list_or_create(name);
            list.push(handler);
            list.len() - 1
        };

        self.metrics.record_subscribe();
        debug!(event = name, slot, "Handler subscribed");
    }

    /// Remove every subscription of `handler` under `name`.
    ///
    /// Returns the number of slots tombstoned; unknown names and handlers
    /// are a no-op returning 0.
    pub fn unsubscribe(&self, name: &str, handler: &Handler<A>) -> usize {
        let (removed, reclaimed) = {
            let mut registry = self.registry.lock();
            let removed = registry
                .list_mut(name)
                .map_or(0, |list| list.remove(handler));
            let reclaimed = if removed > 0 {
                registry.compact_one(name, self.config.compaction)
            } else {
                0
            };
            (removed, reclaimed)
        };

        if removed > 0 {
            self.metrics.record_tombstoned(removed);
            debug!(event = name, removed, "Handler unsubscribed");
        }
        self.record_compaction(name, reclaimed);
        removed
    }

    /// Remove every subscriber of `name`. Returns the number removed.
    pub fn clear(&self, name: &str) -> usize {
        let (removed, reclaimed) = {
            let mut registry = self.registry.lock();
            let removed = registry.list_mut(name).map_or(0, |list| list.clear());
            let reclaimed = registry.compact_one(name, self.config.compaction);
            (removed, reclaimed)
        };

        if removed > 0 {
            self.metrics.record_tombstoned(removed);
            debug!(event = name, removed, "Event cleared");
        }
        self.record_compaction(name, reclaimed);
        removed
    }

    /// Invoke every live subscriber of `name` with `args`, in slot order.
    ///
    /// Only slots that existed when the pass started are visited; a slot
    /// unsubscribed during the pass is skipped if not yet reached. The first
    /// handler error aborts the pass and is returned.
    ///
    /// Returns the number of handlers invoked.
    pub fn fire(&self, name: &str, args: &A) -> Result<usize, BusError> {
        self.metrics.record_fire();

        let Some(captured) = self.registry.lock().begin_fire(name) else {
            trace!(event = name, "No subscribers for event");
            return Ok(0);
        };
        let _pass = FirePass { bus: self, name };

        let mut invoked = 0;
        for slot in 0..captured {
            let handler = self
                .registry
                .lock()
                .list(name)
                .and_then(|list| list.handler_at(slot));
            let Some(handler) = handler else {
                continue;
            };

            trace!(event = name, slot, "Invoking handler");
            self.metrics.record_invocation();
            invoked += 1;

            if let Err(source) = handler.call(args) {
                self.metrics.record_failure();
                warn!(
                    event = name,
                    slot,
                    error = %source,
                    "Handler failed, aborting fire pass"
                );
                return Err(BusError::HandlerFailed {
                    event: name.to_string(),
                    slot,
                    source,
                });
            }
        }

        debug!(event = name, invoked, "Event fired");
        Ok(invoked)
    }

    /// Number of live subscribers of `name`.
    #[must_use]
    pub fn subscriber_count(&self, name: &str) -> usize {
        self.registry.lock().list(name).map_or(0, |list| list.live())
    }

    /// Number of slots (live and tombstoned) held for `name`.
    #[must_use]
    pub fn slot_count(&self, name: &str) -> usize {
        self.registry.lock().list(name).map_or(0, |list| list.len())
    }

    /// Whether `name` has at least one live subscriber.
    #[must_use]
    pub fn has_subscribers(&self, name: &str) -> bool {
        self.subscriber_count(name) > 0
    }

    /// Names with a subscriber list, sorted.
    #[must_use]
    pub fn event_names(&self) -> Vec<String> {
        self.registry.lock().names()
    }

    /// Get the bus configuration.
    #[must_use]
    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }

    /// Get a snapshot of the bus counters.
    #[must_use]
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    fn record_compaction(&self, name: &str, reclaimed: usize) {
        if reclaimed > 0 {
            self.metrics.record_reclaimed(reclaimed);
            debug!(event = name, reclaimed, "Subscriber list compacted");
        }
    }
}

impl<A: ?Sized> Default for EventBus<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized> fmt::Debug for EventBus<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("events", &self.event_names())
            .field("config", &self.config)
            .finish()
    }
}

/// Marks a fire pass over one list as active until dropped, including on
/// error return or handler panic.
struct FirePass<'a, A: ?Sized> {
    bus: &'a EventBus<A>,
    name: &'a str,
}

impl<A: ?Sized> Drop for FirePass<'_, A> {
    fn drop(&mut self) {
        let reclaimed = self
            .bus
            .registry
            .lock()
            .end_fire(self.name, self.bus.config.compaction);

        if reclaimed > 0 {
            self.bus.metrics.record_reclaimed(reclaimed);
            debug!(event = self.name, reclaimed, "Deferred compaction completed");
        }
    }
}
