// Copyright 2025 the Pileup Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use pileup_index::{Aabb2D, Backend, Index, IndexGeneric};

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

/// Rows of read-like boxes: `n` reads of 100 units spread over a 20 kb window,
/// stacked into 5-unit rows the way a pileup ends up.
fn gen_read_rows(n: usize) -> Vec<Aabb2D<f64>> {
    let mut rng = Rng::new(0x3C6E_F35F_4750_2932);
    let rows = (n / 200).max(1);
    (0..n)
        .map(|i| {
            let x = rng.next_f64() * 20_000.0;
            let row = (i % rows) as f64;
            Aabb2D::new(x, row * 5.0, x + 100.0, row * 5.0 + 3.0)
        })
        .collect()
}

/// Probe boxes shaped like the ones the layout issues while searching for a row.
fn gen_probes(count: usize, rows: usize) -> Vec<Aabb2D<f64>> {
    let mut rng = Rng::new(0x81FD_BEE7_94F0_AF1A);
    (0..count)
        .map(|_| {
            let x = rng.next_f64() * 20_000.0;
            let y = (rng.next_f64() * (rows as f64) * 5.0).floor();
            Aabb2D::new(x, y + 0.01, x + 100.0, y + 2.99)
        })
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    fn bench<F, B>(b: &mut criterion::Bencher<'_>, rects: &[Aabb2D<f64>], make_index: F)
    where
        F: Fn() -> IndexGeneric<f64, u32, B> + Clone + 'static,
        B: Backend<f64> + 'static,
    {
        b.iter_batched(
            make_index,
            |mut idx| {
                for (i, r) in rects.iter().copied().enumerate() {
                    idx.insert(r, i as u32);
                }
                idx
            },
            BatchSize::SmallInput,
        );
    }

    let mut group = c.benchmark_group("insert_read_rows");
    for &n in &[1_000usize, 10_000] {
        let rects = gen_read_rows(n);
        group.throughput(Throughput::Elements(rects.len() as u64));
        group.bench_function(BenchmarkId::new("FlatVec", n), |b| {
            bench(b, &rects, Index::<f64, u32>::new);
        });
        group.bench_function(BenchmarkId::new("RTree", n), |b| {
            bench(b, &rects, Index::<f64, u32>::with_rtree);
        });
    }
    group.finish();
}

fn bench_collides(c: &mut Criterion) {
    fn bench<B: Backend<f64>>(
        b: &mut criterion::Bencher<'_>,
        idx: &IndexGeneric<f64, u32, B>,
        probes: &[Aabb2D<f64>],
    ) {
        b.iter(|| {
            probes
                .iter()
                .filter(|p| idx.collides(black_box(**p)))
                .count()
        });
    }

    let mut group = c.benchmark_group("collides_read_rows");
    for &n in &[1_000usize, 10_000, 50_000] {
        let rects = gen_read_rows(n);
        let probes = gen_probes(1_000, (n / 200).max(1));
        let mut flat = Index::<f64, u32>::new();
        let mut tree = Index::<f64, u32>::with_rtree();
        for (i, r) in rects.iter().copied().enumerate() {
            flat.insert(r, i as u32);
            tree.insert(r, i as u32);
        }
        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_function(BenchmarkId::new("FlatVec", n), |b| bench(b, &flat, &probes));
        group.bench_function(BenchmarkId::new("RTree", n), |b| bench(b, &tree, &probes));
    }
    group.finish();
}

fn bench_query_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_point_read_rows");
    let rects = gen_read_rows(10_000);
    let mut tree = Index::<f64, u32>::with_rtree();
    for (i, r) in rects.iter().copied().enumerate() {
        tree.insert(r, i as u32);
    }
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let points: Vec<(f64, f64)> = (0..1_000)
        .map(|_| (rng.next_f64() * 20_000.0, rng.next_f64() * 250.0))
        .collect();
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("RTree", |b| {
        b.iter(|| {
            points
                .iter()
                .map(|&(x, y)| tree.query_point(x, y).count())
                .sum::<usize>()
        });
    });
    group.finish();
}

criterion_group!(benches, bench_insert, bench_collides, bench_query_point);
criterion_main!(benches);
