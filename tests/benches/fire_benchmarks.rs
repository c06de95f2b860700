//! # Event Bus Benchmarks
//!
//! | Path | Expectation |
//! |------|-------------|
//! | fire, N live handlers | linear in N, one lock per slot |
//! | fire, unknown event | single map lookup |
//! | subscribe + unsubscribe churn | amortized O(1) with threshold compaction |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use event_bus::{CompactionPolicy, EventBus, EventBusConfig, Handler};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

fn bench_fire(c: &mut Criterion) {
    let mut group = c.benchmark_group("fire");

    for handlers in [1usize, 10, 100] {
        let bus: EventBus<u64> = EventBus::new();
        let total = Arc::new(AtomicU64::new(0));
        for _ in 0..handlers {
            let sink = total.clone();
            bus.subscribe(
                "tick",
                Handler::infallible(move |n: &u64| {
                    sink.fetch_add(*n, Ordering::Relaxed);
                }),
            );
        }

        group.throughput(Throughput::Elements(handlers as u64));
        group.bench_with_input(BenchmarkId::new("live_handlers", handlers), &bus, |b, bus| {
            b.iter(|| bus.fire(black_box("tick"), black_box(&1)).expect("fire"))
        });
    }

    let empty: EventBus<u64> = EventBus::new();
    group.bench_function("unknown_event", |b| {
        b.iter(|| empty.fire(black_box("missing"), &1).expect("fire"))
    });

    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");

    for policy in [
        CompactionPolicy::Never,
        CompactionPolicy::Eager,
        CompactionPolicy::Threshold(16),
    ] {
        let bus: EventBus<()> =
            EventBus::with_config(EventBusConfig::default().with_compaction(policy))
                .expect("valid config");
        bus.subscribe("steady", Handler::infallible(|_: &()| {}));
        let handler = Handler::infallible(|_: &()| {});

        group.bench_function(BenchmarkId::new("subscribe_unsubscribe", policy), |b| {
            b.iter(|| {
                bus.subscribe("steady", handler.clone());
                bus.unsubscribe("steady", &handler)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fire, bench_churn);
criterion_main!(benches);
