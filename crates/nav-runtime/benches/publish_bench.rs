//! Benchmarks for history publication cost.
//!
//! Measures one navigation round (backend update, stack snapshot, notify)
//! as the number of bound views grows.
//!
//! Run with: cargo bench -p nav-runtime --bench publish_bench

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use nav_runtime::{HistoryBackend, HistoryStore, Location};

/// Backend that keeps no frames, so long runs do not grow memory.
struct DiscardHistory;

impl HistoryBackend for DiscardHistory {
    fn push(&mut self, location: &Location) {
        black_box(location);
    }

    fn replace(&mut self, location: &Location) {
        black_box(location);
    }
}

fn bench_push_replace(c: &mut Criterion) {
    let mut group = c.benchmark_group("history/push_replace");
    for views in [0usize, 1, 8, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(views), &views, |b, &views| {
            let history = HistoryStore::new(DiscardHistory);
            let _bindings: Vec<_> = (0..views).map(|_| history.all_locations()).collect();
            history.push("/novel?novelId=1", "Work 1");
            b.iter(|| {
                history.push("/chapter?chapterId=1", "Ch. 1");
                history.replace_top("/chapter?chapterId=2", "Ch. 2");
                history.go_to_index(1).expect("index 1 exists");
                black_box(history.len());
            });
        });
    }
    group.finish();
}

fn bench_deep_stack_rename(c: &mut Criterion) {
    let mut group = c.benchmark_group("history/rename_deep");
    for depth in [4usize, 32, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            let history = HistoryStore::new(DiscardHistory);
            for i in 0..depth {
                history.push(format!("/chapter?chapterId={i}").as_str(), format!("Ch. {i}"));
            }
            let current = history.current_location();
            b.iter(|| {
                history.rename_active("renamed");
                black_box(current.get());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_push_replace, bench_deep_stack_rename);
criterion_main!(benches);
