// Copyright 2025 the Pileup Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pileup_index::FlatVec;
use pileup_layout::{Feature, Layout, LayoutConfig, LayoutGeneric, sort_features};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// `n` reads of 90..150 bases over a `window`-base view, sorted by start.
fn gen_reads(n: usize, window: f64) -> Vec<Feature<bool>> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut reads: Vec<Feature<bool>> = (0..n)
        .map(|i| {
            let start = (rng.next_f64() * window).floor();
            let len = 90.0 + (rng.next_f64() * 60.0).floor();
            Feature::new(format!("read{i}"), start, start + len, 10.0)
                .with_payload(rng.next_u64() & 1 == 0)
        })
        .collect();
    sort_features(&mut reads);
    reads
}

fn bench_place(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_reads");
    group.sample_size(20);
    for &n in &[1_000usize, 5_000, 20_000] {
        let reads = gen_reads(n, 20_000.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(BenchmarkId::new("RTree", n), |b| {
            b.iter(|| {
                let mut layout = Layout::<bool>::new();
                layout.place_features(reads.iter().cloned()).unwrap();
                layout.total_height()
            });
        });
        if n <= 5_000 {
            group.bench_function(BenchmarkId::new("FlatVec", n), |b| {
                b.iter(|| {
                    let mut layout = LayoutGeneric::<bool, _>::with_backend(
                        LayoutConfig::default(),
                        FlatVec::<f64>::default(),
                    )
                    .unwrap();
                    layout.place_features(reads.iter().cloned()).unwrap();
                    layout.total_height()
                });
            });
        }
    }
    group.finish();
}

fn bench_place_capped(c: &mut Criterion) {
    // A tall pileup squeezed into a 1000-unit canvas: most reads overflow.
    let mut group = c.benchmark_group("place_reads_capped");
    group.sample_size(20);
    let reads = gen_reads(20_000, 2_000.0);
    let config = LayoutConfig::new().with_max_height(1_000.0);
    group.throughput(Throughput::Elements(reads.len() as u64));
    group.bench_function("RTree", |b| {
        b.iter(|| {
            let mut layout = Layout::<bool>::with_config(config).unwrap();
            layout.place_features(reads.iter().cloned()).unwrap();
            layout.overflowed()
        });
    });
    group.finish();
}

criterion_group!(benches, bench_place, bench_place_capped);
criterion_main!(benches);
