use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pagewire_core::event_bus::catalog::Ply;
use pagewire_core::{EventBus, Handler};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

fn emit_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit_fan_out");
    for subscribers in [1usize, 8, 64] {
        let bus = EventBus::new();
        let total = Arc::new(AtomicU64::new(0));
        for _ in 0..subscribers {
            let total = total.clone();
            bus.on(&Handler::<Ply>::new(move |(ply, _)| {
                total.fetch_add(u64::from(*ply), Ordering::Relaxed);
            }));
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(subscribers),
            &subscribers,
            |b, _| b.iter(|| bus.emit::<Ply>(black_box((12, Some(true))))),
        );
    }
    group.finish();
}

fn register_and_remove(c: &mut Criterion) {
    c.bench_function("on_off", |b| {
        let bus = EventBus::new();
        let handler = Handler::<Ply>::new(|_| {});
        b.iter(|| {
            bus.on(&handler);
            bus.off(&handler);
        })
    });
}

criterion_group!(benches, emit_fan_out, register_and_remove);
criterion_main!(benches);
