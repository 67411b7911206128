use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use crwd_core::{AllocatorConfig, Cause, CauseId, SplitSession};
use std::time::Duration;

fn open_session(cause_count: u64) -> SplitSession {
    let causes = (1..=cause_count).map(|id| Cause::new(id, format!("Cause {id}"))).collect();
    SplitSession::open(causes, &[], 1_000.0, &AllocatorConfig::default()).unwrap()
}

fn bench_slider_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("slider_drag");
    group.measurement_time(Duration::from_secs(5));

    for cause_count in [4u64, 16, 64].iter() {
        group.bench_with_input(
            BenchmarkId::new("drag_events", cause_count),
            cause_count,
            |b, &cause_count| {
                let mut session = open_session(cause_count);
                let mut value = 0.0;
                b.iter(|| {
                    // One drag gesture sweeps the first cause across its range.
                    value = (value + 0.37) % 100.0;
                    session.drag_slider(CauseId(1), black_box(value)).unwrap();
                });
            },
        );
    }
    group.finish();
}

fn bench_reset(c: &mut Criterion) {
    let mut group = c.benchmark_group("reset_to_equal_split");

    for cause_count in [4u64, 16, 64].iter() {
        group.bench_with_input(BenchmarkId::new("reset", cause_count), cause_count, |b, &count| {
            let mut session = open_session(count);
            b.iter(|| {
                session.drag_slider(CauseId(1), 60.0).unwrap();
                session.reset_to_equal_split();
                black_box(session.percentages().len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_slider_drag, bench_reset);
criterion_main!(benches);
