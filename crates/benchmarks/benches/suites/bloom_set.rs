//! Core set operations
//!
//! - Insert and contains cost grows with k, not with n
//! - Index generation is one digest plus k cheap rounds
//! - Parameter derivation is a handful of float operations

use bloom_benchmarks::workload::random_keys;
use bloom_set::domain::{calculate_parameters, split_positions};
use bloom_set::{BloomSet, IndexGenerator, Murmur3Hasher};
use criterion::{black_box, BenchmarkId, Criterion, Throughput};

const FPRS: [f64; 4] = [0.1, 0.01, 1e-4, 1e-7];

pub fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom-set/insert");
    let keys = random_keys(10_000);

    for fpr in FPRS {
        group.throughput(Throughput::Elements(keys.len() as u64));
        group.bench_with_input(BenchmarkId::new("add_10000", fpr), &fpr, |b, &fpr| {
            b.iter(|| {
                let mut set = BloomSet::<[u8; 32]>::new(keys.len(), fpr).unwrap();
                for key in &keys {
                    set.add(key).unwrap();
                }
                black_box(set.bits_set())
            });
        });
    }

    group.finish();
}

pub fn bench_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom-set/contains");
    let keys = random_keys(20_000);
    let (inserted, absent) = keys.split_at(10_000);

    for fpr in FPRS {
        let mut set = BloomSet::<[u8; 32]>::new(inserted.len(), fpr).unwrap();
        set.add_all(inserted).unwrap();

        group.bench_with_input(BenchmarkId::new("present", fpr), &set, |b, set| {
            let mut i = 0;
            b.iter(|| {
                i = (i + 1) % inserted.len();
                black_box(set.contains(&inserted[i]).unwrap())
            });
        });

        group.bench_with_input(BenchmarkId::new("absent", fpr), &set, |b, set| {
            let mut i = 0;
            b.iter(|| {
                i = (i + 1) % absent.len();
                black_box(set.contains(&absent[i]).unwrap())
            });
        });
    }

    group.finish();
}

pub fn bench_index_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom-set/index_generation");
    let generator = IndexGenerator::new(Murmur3Hasher::default());
    let element = "ads.tracker.example.com";

    for k in [1usize, 7, 20, 32] {
        group.bench_with_input(BenchmarkId::new("murmur3_splh", k), &k, |b, &k| {
            b.iter(|| generator.hash(black_box(element), k, 95_851).unwrap());
        });
    }

    group.bench_function("split_positions_k7", |b| {
        b.iter(|| split_positions(black_box(0xe34b_bc7b_bc07_1b6c), 7, 9_586));
    });

    group.finish();
}

pub fn bench_parameters(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom-set/parameters");

    group.bench_function("calculate_parameters", |b| {
        b.iter(|| calculate_parameters(black_box(16_331), black_box(1e-6)).unwrap());
    });

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_insert(c);
    bench_contains(c);
    bench_index_generation(c);
    bench_parameters(c);
}
