//! Benchmarks for the scheduler tick loop.
//!
//! Run with: cargo bench -p limina-presence-core --bench presence_step

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use limina_presence_core::{
    ChangeListener, FrameDriver, FrameToken, PresenceOptions, PresenceScheduler, ViewHandle,
    ViewHost,
};

// Null capability doubles so the numbers measure the tick loop, not the
// bookkeeping a recording test double would add.

struct NullViews {
    next: u64,
}

impl ViewHost<u32> for NullViews {
    fn create_view(&mut self, _value: &u32) -> ViewHandle {
        let view = ViewHandle(self.next);
        self.next += 1;
        view
    }

    fn destroy_view(&mut self, _view: ViewHandle) {}
}

struct NullListener;

impl ChangeListener for NullListener {
    fn presence_changed(&mut self) {}
}

struct NullDriver {
    next: u64,
}

impl FrameDriver for NullDriver {
    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken(self.next);
        self.next += 1;
        token
    }

    fn cancel_frame(&mut self, _token: FrameToken) {}
}

fn mk_scheduler(options: PresenceOptions) -> PresenceScheduler<u32> {
    PresenceScheduler::new(
        options,
        Box::new(NullViews { next: 1 }),
        Box::new(NullListener),
        Some(Box::new(NullDriver { next: 0 })),
    )
}

/// Scheduler holding `depth` instances that all still animate. Durations are
/// long enough that no instance settles or reaps within the measured loop.
fn populated(depth: usize) -> PresenceScheduler<u32> {
    let options = PresenceOptions::default()
        .with_enter_ms(1.0e9)
        .with_leave_ms(1.0e9);
    let mut scheduler = mk_scheduler(options);
    for i in 0..depth as u32 {
        scheduler.set_value(Some(i));
    }
    scheduler.tick(0.0);
    scheduler
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for depth in [1usize, 8, 64] {
        group.bench_with_input(BenchmarkId::new("stack", depth), &depth, |b, &depth| {
            let mut scheduler = populated(depth);
            let mut now = 0.0;
            b.iter(|| {
                now += 1.0;
                scheduler.tick(black_box(now));
            });
        });
    }

    group.finish();
}

fn bench_full_lifecycle(c: &mut Criterion) {
    c.bench_function("swap_then_settle", |b| {
        b.iter(|| {
            let options = PresenceOptions::default()
                .with_enter_ms(10.0)
                .with_leave_ms(10.0);
            let mut scheduler = mk_scheduler(options);
            scheduler.set_value(Some(black_box(1)));
            scheduler.tick(0.0);
            scheduler.tick(10.0);
            scheduler.set_value(Some(black_box(2)));
            scheduler.tick(20.0);
            scheduler.tick(40.0);
            black_box(scheduler.len())
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    for depth in [8usize, 64] {
        group.bench_with_input(BenchmarkId::new("capture", depth), &depth, |b, &depth| {
            let scheduler = populated(depth);
            b.iter(|| black_box(scheduler.snapshot()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tick, bench_full_lifecycle, bench_snapshot);
criterion_main!(benches);
