use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use treemap::TreeMap;
use treemap_util::Fuzzer;

fn shuffled_keys(n: i64, fuzzer: &Fuzzer) -> Vec<i64> {
    let mut keys: Vec<i64> = (0..n).collect();
    fuzzer.shuffle(&mut keys);
    keys
}

fn bench_tree_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_map");
    let fuzzer = Fuzzer::seeded(0x5EED);

    for n in [1_000_i64, 10_000, 100_000] {
        let keys = shuffled_keys(n, &fuzzer);
        let probes: Vec<i64> = (0..1_000).map(|_| fuzzer.random_int(-10, n * 2)).collect();

        group.bench_function(BenchmarkId::new("put", n), |b| {
            b.iter(|| {
                let mut map = TreeMap::new();
                for &k in &keys {
                    let _ = map.put(k, k);
                }
                black_box(map.size())
            })
        });

        group.bench_function(BenchmarkId::new("put-btree", n), |b| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                black_box(map.len())
            })
        });

        let map: TreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        group.bench_function(BenchmarkId::new("get", n), |b| {
            b.iter(|| {
                for k in &probes {
                    let _ = black_box(map.get(k));
                }
            })
        });

        group.bench_function(BenchmarkId::new("floor-ceiling", n), |b| {
            b.iter(|| {
                for k in &probes {
                    let _ = black_box(map.floor(k));
                    let _ = black_box(map.ceiling(k));
                }
            })
        });

        group.bench_function(BenchmarkId::new("remove-all", n), |b| {
            b.iter_batched(
                || keys.iter().map(|&k| (k, k)).collect::<TreeMap<i64, i64>>(),
                |mut map| {
                    for k in &keys {
                        let _ = map.remove(k);
                    }
                    black_box(map.size())
                },
                criterion::BatchSize::LargeInput,
            )
        });

        group.bench_function(BenchmarkId::new("poll-first", n), |b| {
            b.iter_batched(
                || keys.iter().map(|&k| (k, k)).collect::<TreeMap<i64, i64>>(),
                |mut map| {
                    while let Ok(entry) = map.poll_first() {
                        black_box(entry);
                    }
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tree_map);
criterion_main!(benches);
