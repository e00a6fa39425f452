// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size, Vec2};
use understory_quadtree::{ObjectId, QuadTree, QuadTreeConfig};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Rect::from_origin_size((x0, y0), (cell * 0.8, cell * 0.8)));
        }
    }
    out
}

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

fn gen_random_rects(seed: u64, count: usize, extent: f64, max_side: f64) -> Vec<Rect> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            let x = rng.next_f64() * extent;
            let y = rng.next_f64() * extent;
            let w = 1.0 + rng.next_f64() * max_side;
            let h = 1.0 + rng.next_f64() * max_side;
            Rect::from_origin_size((x, y), (w, h))
        })
        .collect()
}

fn config() -> QuadTreeConfig {
    QuadTreeConfig::new(Size::new(16.0, 16.0), 8)
}

fn build(rects: &[Rect]) -> (QuadTree<Rect>, Vec<ObjectId>) {
    let mut tree = QuadTree::with_config(config()).unwrap();
    let ids = rects.iter().map(|r| tree.insert(*r)).collect();
    (tree, ids)
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_insert");
    for &n in &[32usize, 64, 128] {
        let rects = gen_grid_rects(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter(|| {
                let (tree, _) = build(&rects);
                black_box(tree.node_count());
            });
        });
    }
    let rects = gen_random_rects(64, 4096, 2000.0, 12.0);
    group.throughput(Throughput::Elements(rects.len() as u64));
    group.bench_function("random_4096", |b| {
        b.iter(|| {
            let (tree, _) = build(&rects);
            black_box(tree.node_count());
        });
    });
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_query");
    let rects = gen_random_rects(7, 8192, 4000.0, 16.0);
    let queries = gen_random_rects(11, 256, 4000.0, 200.0);
    let (tree, _) = build(&rects);
    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("quadtree_random_8192", |b| {
        b.iter(|| {
            let hits: usize = queries.iter().map(|q| tree.query(*q).count()).sum();
            black_box(hits);
        });
    });
    // Baseline: the brute-force scan every broad phase is measured against.
    group.bench_function("linear_scan_random_8192", |b| {
        b.iter(|| {
            let hits: usize = queries
                .iter()
                .map(|q| {
                    rects
                        .iter()
                        .filter(|r| r.x0 <= q.x1 && q.x0 <= r.x1 && r.y0 <= q.y1 && q.y0 <= r.y1)
                        .count()
                })
                .sum();
            black_box(hits);
        });
    });
    group.finish();
}

fn bench_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_moves");
    let rects = gen_random_rects(3, 4096, 2000.0, 8.0);
    let mut rng = Rng::new(99);
    let steps: Vec<Vec2> = (0..rects.len())
        .map(|_| Vec2::new(rng.next_f64() * 8.0 - 4.0, rng.next_f64() * 8.0 - 4.0))
        .collect();
    group.throughput(Throughput::Elements(rects.len() as u64));
    group.bench_function("small_steps_4096", |b| {
        b.iter_batched(
            || build(&rects),
            |(mut tree, ids)| {
                for (id, step) in ids.iter().zip(&steps) {
                    let _ = tree.modify(*id, |r| *r = *r + *step);
                }
                black_box(tree.node_count());
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("teleport_4096", |b| {
        b.iter_batched(
            || build(&rects),
            |(mut tree, ids)| {
                for (id, step) in ids.iter().zip(&steps) {
                    let _ = tree.modify(*id, |r| *r = *r + *step * 400.0);
                }
                black_box(tree.node_count());
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("remove_all_4096", |b| {
        b.iter_batched(
            || build(&rects),
            |(mut tree, ids)| {
                for id in ids {
                    let _ = tree.remove(id);
                }
                black_box(tree.node_count());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_insert, bench_query, bench_moves);
criterion_main!(benches);
