//! Blocker build and domain checks, with and without metrics

use std::sync::Arc;

use bloom_benchmarks::workload::hostnames;
use bloom_blocker::{BloomBlocker, Metrics};
use criterion::{black_box, BenchmarkId, Criterion, Throughput};

pub fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("blocker/build");
    group.sample_size(20);

    for size in [1_000usize, 10_000, 50_000] {
        let (hosts, _) = hostnames(size, 0);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("from_hosts", size), &hosts, |b, hosts| {
            b.iter(|| BloomBlocker::new(hosts, 1e-4).unwrap());
        });
    }

    group.finish();
}

pub fn bench_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("blocker/check");
    let (hosts, domains) = hostnames(10_000, 1_000);

    let plain = BloomBlocker::new(&hosts, 1e-4).unwrap();
    let instrumented = BloomBlocker::builder(&hosts)
        .false_positive_rate(1e-4)
        .metrics(Arc::new(Metrics::new()))
        .build()
        .unwrap();

    group.throughput(Throughput::Elements(domains.len() as u64));
    group.bench_function("count_blocked_noop_metrics", |b| {
        b.iter(|| plain.count_blocked(black_box(&domains)).unwrap());
    });
    group.bench_function("count_blocked_atomic_metrics", |b| {
        b.iter(|| instrumented.count_blocked(black_box(&domains)).unwrap());
    });

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_build(c);
    bench_check(c);
}
