//! # Subscribe / Unsubscribe / Fire Contract
//!
//! End-to-end checks of the public contract through the crate root
//! re-exports:
//!
//! 1. **Ordering**: handlers run in subscription order
//! 2. **Removal**: unsubscribed handlers stop running, others keep their order
//! 3. **Tolerance**: unknown names and handlers are silent no-ops
//! 4. **Forwarding**: arguments reach every handler unchanged
//! 5. **Failure**: the first failing handler aborts the pass

#[cfg(test)]
mod tests {
    use crate::integration::CallLog;
    use event_bus::{BusError, CompactionPolicy, EventBus, EventBusConfig, Handler};
    use parking_lot::Mutex;
    use std::error::Error as _;
    use std::sync::Arc;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn bus_with(policy: CompactionPolicy) -> EventBus<()> {
        EventBus::with_config(EventBusConfig::default().with_compaction(policy))
            .expect("valid config")
    }

    // =============================================================================
    // ORDERING AND REMOVAL
    // =============================================================================

    /// subscribe("x", f); fire("x", 42) calls f(42); after unsubscribe it does not.
    #[test]
    fn test_subscribe_fire_unsubscribe_scenario() {
        let bus: EventBus<(i32,)> = EventBus::new();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        let f = Handler::infallible(move |args: &(i32,)| sink.lock().push(*args));

        bus.subscribe("x", f.clone());
        bus.fire("x", &(42,)).unwrap();
        assert_eq!(*calls.lock(), vec![(42,)]);

        bus.unsubscribe("x", &f);
        bus.fire("x", &(42,)).unwrap();
        assert_eq!(calls.lock().len(), 1, "f must not run after unsubscribe");
    }

    #[test]
    fn test_two_handlers_run_in_order() {
        let bus = EventBus::new();
        let log = CallLog::new();
        bus.subscribe("e", log.handler::<()>("h1"));
        bus.subscribe("e", log.handler("h2"));

        bus.fire("e", &()).unwrap();
        assert_eq!(log.entries(), vec!["h1", "h2"]);
    }

    /// [A, B, C] minus B fires A, C; adding D fires A, C, D, under every policy.
    #[test]
    fn test_removal_stability_under_all_policies() {
        for policy in [
            CompactionPolicy::Never,
            CompactionPolicy::Eager,
            CompactionPolicy::Threshold(1),
            CompactionPolicy::Threshold(16),
        ] {
            let bus = bus_with(policy);
            let log = CallLog::new();
            let b = log.handler("B");
            bus.subscribe("e", log.handler("A"));
            bus.subscribe("e", b.clone());
            bus.subscribe("e", log.handler("C"));

            bus.unsubscribe("e", &b);
            bus.fire("e", &()).unwrap();
            assert_eq!(log.entries(), vec!["A", "C"], "policy {policy}");

            log.clear();
            bus.subscribe("e", log.handler("D"));
            bus.fire("e", &()).unwrap();
            assert_eq!(log.entries(), vec!["A", "C", "D"], "policy {policy}");
        }
    }

    #[test]
    fn test_double_subscription_double_invocation() {
        let bus = EventBus::new();
        let log = CallLog::new();
        let h = log.handler::<()>("h");
        bus.subscribe("e", h.clone());
        bus.subscribe("e", h);

        assert_eq!(bus.fire("e", &()).unwrap(), 2);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_same_handler_on_two_events() {
        let bus = EventBus::new();
        let log = CallLog::new();
        let h = log.handler::<()>("h");
        bus.subscribe("a", h.clone());
        bus.subscribe("b", h.clone());

        bus.unsubscribe("a", &h);
        assert_eq!(bus.fire("a", &()).unwrap(), 0);
        assert_eq!(bus.fire("b", &()).unwrap(), 1);
    }

    // =============================================================================
    // TOLERANCE
    // =============================================================================

    #[test]
    fn test_unknown_names_and_handlers_are_noops() {
        let bus: EventBus<()> = EventBus::new();
        let log = CallLog::new();
        let never = log.handler("never");

        assert_eq!(bus.unsubscribe("nobody", &never), 0);
        assert_eq!(bus.fire("nobody", &()).unwrap(), 0);

        bus.subscribe("e", log.handler("h"));
        assert_eq!(bus.unsubscribe("e", &never), 0);
        assert_eq!(bus.fire("e", &()).unwrap(), 1);
        assert_eq!(log.entries(), vec!["h"]);
    }

    #[test]
    fn test_empty_name_is_an_ordinary_key() {
        let bus = EventBus::new();
        let log = CallLog::new();
        bus.subscribe("", log.handler::<()>("blank"));

        assert_eq!(bus.fire("", &()).unwrap(), 1);
        assert_eq!(bus.fire(" ", &()).unwrap(), 0);
    }

    // =============================================================================
    // FORWARDING
    // =============================================================================

    #[test]
    fn test_arguments_forwarded_to_every_handler() {
        type Args = (i32, &'static str);
        let bus: EventBus<Args> = EventBus::new();
        let seen: Arc<Mutex<Vec<Args>>> = Arc::default();
        for _ in 0..3 {
            let sink = seen.clone();
            bus.subscribe("e", Handler::infallible(move |args: &Args| sink.lock().push(*args)));
        }

        bus.fire("e", &(1, "a")).unwrap();
        assert_eq!(*seen.lock(), vec![(1, "a"); 3]);
    }

    #[test]
    fn test_owned_payload_is_borrowed_not_moved() {
        let bus: EventBus<Vec<String>> = EventBus::new();
        let total = Arc::new(Mutex::new(0));
        let sink = total.clone();
        bus.subscribe(
            "batch",
            Handler::infallible(move |items: &Vec<String>| *sink.lock() += items.len()),
        );

        let payload = vec!["a".to_string(), "b".to_string()];
        bus.fire("batch", &payload).unwrap();
        bus.fire("batch", &payload).unwrap();
        assert_eq!(*total.lock(), 4);
        assert_eq!(payload.len(), 2);
    }

    // =============================================================================
    // FAILURE
    // =============================================================================

    #[test]
    fn test_failing_handler_aborts_and_propagates() {
        let bus = EventBus::new();
        let log = CallLog::new();
        bus.subscribe("e", log.handler::<()>("before"));
        bus.subscribe("e", Handler::new(|_| Err("rejected".into())));
        bus.subscribe("e", log.handler("after"));

        let err = bus.fire("e", &()).unwrap_err();
        let BusError::HandlerFailed { event, slot, .. } = &err;
        assert_eq!(event, "e");
        assert_eq!(*slot, 1);
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("rejected"));
        assert_eq!(log.entries(), vec!["before"]);

        // Nothing is retried; the next fire starts from the first slot again.
        assert!(bus.fire("e", &()).is_err());
        assert_eq!(log.entries(), vec!["before", "before"]);
    }

    #[test]
    fn test_metrics_track_activity() {
        let bus = bus_with(CompactionPolicy::Eager);
        let log = CallLog::new();
        let h = log.handler("h");
        bus.subscribe("e", h.clone());
        bus.subscribe("e", log.handler("other"));
        bus.fire("e", &()).unwrap();
        bus.unsubscribe("e", &h);
        bus.fire("missing", &()).unwrap();

        let snapshot = bus.metrics();
        assert_eq!(snapshot.fires, 2);
        assert_eq!(snapshot.handlers_invoked, 2);
        assert_eq!(snapshot.subscriptions, 2);
        assert_eq!(snapshot.slots_tombstoned, 1);
        assert_eq!(snapshot.slots_reclaimed, 1);
        assert_eq!(snapshot.live_handlers(), 1);
    }
}
