//! Benchmarks for switch event handling and painting.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flipswitch_core::{Event, MouseButton, Point, RecordingCanvas, Rect, Widget};
use flipswitch_widgets::Switch;

fn laid_out() -> Switch {
    let mut switch = Switch::new();
    switch.layout(Rect::new(0.0, 0.0, 132.0, 32.0));
    switch
}

fn bench_switch_drag(c: &mut Criterion) {
    c.bench_function("switch_drag_32_moves", |b| {
        b.iter(|| {
            let mut switch = laid_out();
            switch.event(&Event::MouseDown {
                position: Point::new(16.0, 16.0),
                button: MouseButton::Left,
            });
            for i in 0..32u8 {
                switch.event(&Event::MouseMove {
                    position: Point::new(black_box(16.0 + f32::from(i) * 3.0), 16.0),
                });
            }
            switch.event(&Event::MouseUp {
                position: Point::new(112.0, 16.0),
                button: MouseButton::Left,
            })
        });
    });
}

fn bench_switch_settle(c: &mut Criterion) {
    c.bench_function("switch_settle_animation", |b| {
        b.iter(|| {
            let mut switch = laid_out();
            switch.set_on(true, true);
            while switch.tick(black_box(1.0 / 60.0)) {}
            switch.displayed_offset()
        });
    });
}

fn bench_switch_paint(c: &mut Criterion) {
    let switch = laid_out().on(true);
    c.bench_function("switch_paint", |b| {
        b.iter(|| {
            let mut canvas = RecordingCanvas::new();
            switch.paint(&mut canvas);
            black_box(canvas.command_count())
        });
    });
}

criterion_group!(
    benches,
    bench_switch_drag,
    bench_switch_settle,
    bench_switch_paint
);
criterion_main!(benches);
