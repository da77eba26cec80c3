//! Membership lookups: Bloom set against exact collections
//!
//! Each structure holds the same blocklist; the benchmark checks the first
//! `n` query domains for growing `n`.

use std::collections::HashSet;

use bloom_benchmarks::workload::hostnames;
use bloom_set::BloomSet;
use criterion::{black_box, BenchmarkId, Criterion, Throughput};

const BLOCKLIST_SIZE: usize = 16_331;
const QUERIES: usize = 16_331;
const FPR: f64 = 1e-6;

pub fn bench_lookup_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup/scaling");
    let (hosts, domains) = hostnames(BLOCKLIST_SIZE, QUERIES);

    let mut bloom = BloomSet::<str>::new(hosts.len(), FPR).unwrap();
    for host in &hosts {
        bloom.add(host).unwrap();
    }
    let hash_set: HashSet<&str> = hosts.iter().map(String::as_str).collect();

    for n in [1usize, 2_001, 8_001, QUERIES] {
        let queries = &domains[..n];
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("bloom_set", n), queries, |b, queries| {
            b.iter(|| {
                queries
                    .iter()
                    .filter(|d| bloom.contains(d.as_str()).unwrap())
                    .count()
            });
        });

        group.bench_with_input(BenchmarkId::new("hash_set", n), queries, |b, queries| {
            b.iter(|| {
                queries
                    .iter()
                    .filter(|d| hash_set.contains(d.as_str()))
                    .count()
            });
        });
    }

    group.finish();
}

/// Linear scan baseline, kept to small query counts
pub fn bench_linear_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup/linear_scan");
    let (hosts, domains) = hostnames(BLOCKLIST_SIZE, 200);

    group.bench_function("vec_contains_200", |b| {
        b.iter(|| {
            domains
                .iter()
                .filter(|d| hosts.contains(black_box(d)))
                .count()
        });
    });

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_lookup_scaling(c);
    bench_linear_scan(c);
}
