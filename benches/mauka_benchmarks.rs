//! Mauka Search Index Benchmarks
//!
//! Benchmarks for the two data structures on the hot insert/lookup path:
//! the compressed trie and the posting-list pool. Implemented using the
//! Criterion framework, which provides statistical analysis and
//! performance regression detection.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench --features benchmarking
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, measurement::WallTime, BenchmarkId, Criterion,
    SamplingMode, Throughput,
};
use mauka_index_lib::data_structures::{CompressedTrie, PostingListPool};
use std::time::Duration;

/// A deterministic vocabulary of `n` distinct words sharing common
/// prefixes, to exercise the trie's split/extend paths rather than only
/// its happy-path inserts at the root.
fn vocabulary(n: usize) -> Vec<String> {
    let stems = ["car", "cart", "care", "dog", "door", "dome"];
    (0..n)
        .map(|i| format!("{}{}", stems[i % stems.len()], i))
        .collect()
}

fn bench_compressed_trie_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("compressed_trie_insert");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));

    for size in [100usize, 1_000, 10_000] {
        let words = vocabulary(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("insert_or_locate", size), &words, |b, words| {
            b.iter(|| {
                let mut trie = CompressedTrie::new();
                let mut plp = PostingListPool::new();
                for word in words {
                    trie.insert_or_locate(black_box(word), &"d0".to_string(), &mut plp)
                        .unwrap();
                }
            });
        });
    }

    group.finish();
}

fn bench_compressed_trie_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("compressed_trie_lookup");
    group.sampling_mode(SamplingMode::Flat);

    for size in [100usize, 1_000, 10_000] {
        let words = vocabulary(size);
        let mut trie = CompressedTrie::new();
        let mut plp = PostingListPool::new();
        for word in &words {
            trie.insert_or_locate(word, &"d0".to_string(), &mut plp).unwrap();
        }

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("lookup", size), &words, |b, words| {
            b.iter(|| {
                for word in words {
                    black_box(trie.lookup(black_box(word)));
                }
            });
        });
    }

    group.finish();
}

fn bench_posting_list_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("posting_list_pool");
    group.sampling_mode(SamplingMode::Flat);

    group.bench_function("allocate_and_add", |b| {
        b.iter(|| {
            let mut plp = PostingListPool::new();
            let handle = plp.allocate("d0".to_string());
            for i in 1..100 {
                plp.add(handle, format!("d{i}")).unwrap();
            }
            black_box(plp.size());
        });
    });

    group.bench_function("save_and_load_roundtrip", |b| {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plp.dat");

        b.iter(|| {
            let mut plp = PostingListPool::new();
            let handle = plp.allocate("d0".to_string());
            for i in 1..256 {
                plp.add(handle, format!("d{i}")).unwrap();
            }
            plp.save(&path).unwrap();
            black_box(PostingListPool::load(&path).unwrap());
        });
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_measurement(WallTime)
        .significance_level(0.01)
        .noise_threshold(0.02)
        .confidence_level(0.99);
    targets = bench_compressed_trie_insert, bench_compressed_trie_lookup, bench_posting_list_pool
}

criterion_main!(benches);
