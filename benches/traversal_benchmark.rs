//! Criterion view of the two read loops.
//!
//! The driver times a single cold pass per trial; here the same loops run
//! warm and repeatedly, which isolates indirection cost from cache misses.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use csr_bench::{traverse_adjacency, traverse_csr, AdjacencyGraph, CacheScrubber, CsrGraph, Diagnostics};

const NODES: usize = 200_000;

fn bench_warm_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("warm_traversal");
    group.throughput(Throughput::Elements(NODES as u64));

    for degree in [1usize, 8, 64] {
        let adjacency = AdjacencyGraph::generate(NODES, degree).unwrap();
        let csr = CsrGraph::from_adjacency(&adjacency).unwrap();

        group.bench_with_input(BenchmarkId::new("adjacency", degree), &adjacency, |b, g| {
            b.iter(|| black_box(traverse_adjacency(g, Diagnostics::Off).sum));
        });
        group.bench_with_input(BenchmarkId::new("csr", degree), &csr, |b, g| {
            b.iter(|| black_box(traverse_csr(g, Diagnostics::Off).sum));
        });
    }

    group.finish();
}

fn bench_scrubbed_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("scrubbed_traversal");
    group.sample_size(20);
    let scrubber = CacheScrubber::default();
    let degree = 16;

    let adjacency = AdjacencyGraph::generate(NODES, degree).unwrap();
    let csr = CsrGraph::from_adjacency(&adjacency).unwrap();

    // Scrub cost is included; compare the two rows against each other only.
    group.bench_function(BenchmarkId::new("adjacency", degree), |b| {
        b.iter(|| {
            scrubber.scrub().unwrap();
            black_box(traverse_adjacency(&adjacency, Diagnostics::Off).sum)
        });
    });
    group.bench_function(BenchmarkId::new("csr", degree), |b| {
        b.iter(|| {
            scrubber.scrub().unwrap();
            black_box(traverse_csr(&csr, Diagnostics::Off).sum)
        });
    });

    group.finish();
}

fn bench_diagnostics_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("diagnostics_overhead");
    let adjacency = AdjacencyGraph::generate(NODES, 1).unwrap();
    let csr = CsrGraph::from_adjacency(&adjacency).unwrap();

    for (name, mode) in [("off", Diagnostics::Off), ("collect", Diagnostics::Collect)] {
        group.bench_function(BenchmarkId::new("csr", name), |b| {
            b.iter(|| black_box(traverse_csr(&csr, mode)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_warm_traversal, bench_scrubbed_traversal, bench_diagnostics_overhead);
criterion_main!(benches);
