//! Benchmark tests for triptych-core per-frame operations
//!
//! Run with: cargo bench -p triptych-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use triptych_core::{
    GestureEvent, MediaPlayer, PaneId, PaneLayout, PointerEvent, Result, SessionConfig,
    TriptychSession, WeightAnimator, WeightDistributor,
};
use url::Url;

// ============================================================================
// Helpers
// ============================================================================

struct NullPlayer;

impl MediaPlayer for NullPlayer {
    fn set_source(&mut self, _uri: &Url) -> Result<()> {
        Ok(())
    }
    fn prepare(&mut self) -> Result<()> {
        Ok(())
    }
    fn set_auto_play(&mut self, _auto_play: bool) {}
    fn set_looping(&mut self, _enabled: bool) {}
    fn release(&mut self) {}
}

fn create_session() -> TriptychSession<NullPlayer> {
    TriptychSession::new(SessionConfig::default(), 1920, 1080, |_| Ok(NullPlayer))
        .expect("default config is valid")
}

// ============================================================================
// Weight Benchmarks
// ============================================================================

fn bench_weights(c: &mut Criterion) {
    let mut group = c.benchmark_group("weights");

    group.bench_function("apply_drag", |b| {
        let mut d = WeightDistributor::default();
        let mut i = 0usize;
        b.iter(|| {
            let pane = PaneId::ALL[i % 3];
            d.apply_drag(black_box(pane), black_box(0.013));
            i += 1;
        })
    });

    group.bench_function("apply_maximize", |b| {
        let mut d = WeightDistributor::default();
        b.iter(|| d.apply_maximize(black_box(PaneId::SECOND)))
    });

    group.finish();
}

// ============================================================================
// Frame Benchmarks
// ============================================================================

fn bench_animation(c: &mut Criterion) {
    let mut group = c.benchmark_group("animation");

    for dt_ms in [8u64, 16, 33] {
        group.bench_with_input(BenchmarkId::new("step", dt_ms), &dt_ms, |b, &dt_ms| {
            let mut animator = WeightAnimator::new([0.7, 0.2, 0.1], 1500.0, 0.01);
            let mut flip = false;
            b.iter(|| {
                flip = !flip;
                let targets = if flip { [0.1, 0.8, 0.1] } else { [0.8, 0.1, 0.1] };
                animator.step(black_box(targets), Duration::from_millis(dt_ms))
            })
        });
    }

    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let layout = PaneLayout::new(1920, 1080, 6);

    c.bench_function("layout_compute", |b| {
        b.iter(|| layout.compute(black_box([0.7, 0.2, 0.1])))
    });

    c.bench_function("layout_hit_test", |b| {
        b.iter(|| layout.pane_at(black_box([0.7, 0.2, 0.1]), black_box(1500.0), 500.0))
    });
}

fn bench_session(c: &mut Criterion) {
    c.bench_function("session_drag_and_tick", |b| {
        let mut session = create_session();
        b.iter(|| {
            session.apply_gesture(GestureEvent::Drag {
                pane: PaneId::FIRST,
                dx: black_box(3.0),
            });
            session.tick(Duration::from_millis(16))
        })
    });

    c.bench_function("session_pointer_stream", |b| {
        let mut session = create_session();
        b.iter(|| {
            session.handle_pointer(PointerEvent::Down { x: 200.0, y: 300.0 });
            for step in 1..=20 {
                session.handle_pointer(PointerEvent::Move {
                    x: 200.0 + step as f64 * 4.0,
                    y: 300.0,
                });
            }
            session.handle_pointer(PointerEvent::Up { x: 280.0, y: 300.0 })
        })
    });
}

criterion_group!(weight_benches, bench_weights);
criterion_group!(frame_benches, bench_animation, bench_layout, bench_session);

criterion_main!(weight_benches, frame_benches);
