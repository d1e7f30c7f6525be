//! Benchmarks for the drag engine hot path.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flipswitch_core::{DragConfig, Easing, EasedValue, ToggleDragEngine};

fn bench_drag_changed(c: &mut Criterion) {
    c.bench_function("engine_drag_changed_64", |b| {
        b.iter(|| {
            let mut engine = ToggleDragEngine::new(DragConfig::new(100.0, 32.0));
            engine.on_drag_begin(&mut ());
            for i in 0..64 {
                let dx = if i % 3 == 0 { -7.0 } else { 11.0 };
                engine.on_drag_changed(black_box(dx), &mut ());
            }
            engine.on_drag_ended(&mut ());
            engine.is_on()
        });
    });
}

fn bench_drag_recorded(c: &mut Criterion) {
    c.bench_function("engine_drag_recorded_64", |b| {
        b.iter(|| {
            let mut engine = ToggleDragEngine::new(DragConfig::new(100.0, 32.0));
            let mut out = Vec::with_capacity(80);
            engine.on_drag_begin(&mut out);
            for _ in 0..64 {
                engine.on_drag_changed(black_box(4.0), &mut out);
            }
            engine.on_drag_ended(&mut out);
            out.len()
        });
    });
}

fn bench_eased_value(c: &mut Criterion) {
    c.bench_function("eased_value_12_frames", |b| {
        b.iter(|| {
            let mut v = EasedValue::new(0.0, 100.0, 0.2).with_easing(Easing::EaseIn);
            for _ in 0..12 {
                v.update(black_box(1.0 / 60.0));
            }
            v.value()
        });
    });
}

criterion_group!(
    benches,
    bench_drag_changed,
    bench_drag_recorded,
    bench_eased_value
);
criterion_main!(benches);
