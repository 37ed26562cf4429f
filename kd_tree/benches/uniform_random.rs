use criterion::{Criterion, BenchmarkId, criterion_group, criterion_main};
use nalgebra as na;

use kd_tree::KDTree;
use kd_tree::visitor::{NearestIndexedVisitor, NearestVisitor};

fn gen_point() -> na::Point2<f64> {
    rand::random()
}

fn gen_points(n: usize) -> impl Iterator<Item = na::Point2<f64>> {
    std::iter::repeat_with(gen_point).take(n)
}

fn kd_tree_uniform_build(c: &mut Criterion) {
    let n = 100_000;
    let points: Vec<na::Point2<f64>> = gen_points(n).collect();

    c.bench_function(
        "kd_tree_uniform_build",
        |b| b.iter(|| {
            let mut tree: KDTree<_, 2> = KDTree::new();
            tree.extend_vec(points.clone());
        }),
    );
}

fn kd_tree_uniform_query(c: &mut Criterion) {
    let n = 100_000;
    let mut tree: KDTree<_, 2> = KDTree::new();
    tree.extend_vec(gen_points(n).collect());

    c.bench_function(
        "kd_tree_uniform_query",
        |b| b.iter(|| {
            let vis = NearestVisitor::new();
            let query_p = gen_point();
            tree.query(&query_p, vis)
        }),
    );
}

fn kd_tree_incremental_query(c: &mut Criterion) {
    // Mirrors how the planner uses the tree: insert one point, query the next.
    let mut group = c.benchmark_group("kd_tree_incremental");
    for n in [1_000usize, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut tree: KDTree<_, 2> = KDTree::with_capacity(n);
                tree.insert(gen_point());
                for _ in 1..n {
                    let query_p = gen_point();
                    let nearest = tree.query(&query_p, NearestIndexedVisitor::new());
                    if nearest.is_some() {
                        tree.insert(query_p);
                    }
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, kd_tree_uniform_build, kd_tree_uniform_query, kd_tree_incremental_query);
criterion_main!(benches);
