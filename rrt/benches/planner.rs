use std::time::Duration;
use criterion::{Criterion, BenchmarkId, SamplingMode, criterion_group, criterion_main};

use rrt::geometry::point2;
use rrt::{KdTreeSearch, LinearSearch, NeighborSearch, RRTBuilder};

// A goal of radius zero is never reached, so every run spends its whole budget and the two
// backends do the same amount of work.
fn session<S: NeighborSearch>(max_iters: usize) -> RRTBuilder<S> {
    RRTBuilder::new()
        .with_size(1000.0, 1000.0)
        .with_start(point2(500.0, 500.0))
        .with_goal(point2(1.0, 1.0))
        .with_goal_radius(0.0)
        .with_step_length(10.0)
        .with_obstacle_count(40)
        .with_obstacle_radius(20.0)
        .with_max_iters(max_iters)
        .with_seed(0)
}

fn planner_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("RRT");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);
    group.sampling_mode(SamplingMode::Flat);

    for max_iters in [2_000, 8_000, 32_000] {
        group.bench_with_input(BenchmarkId::new("linear", max_iters), &max_iters, |b, &max_iters| {
            b.iter(|| {
                let mut planner = session::<LinearSearch>(max_iters).build().unwrap();
                let _ = planner.run();
                planner.tree().size()
            });
        });

        group.bench_with_input(BenchmarkId::new("kd_tree", max_iters), &max_iters, |b, &max_iters| {
            b.iter(|| {
                let mut planner = session::<KdTreeSearch>(max_iters).build().unwrap();
                let _ = planner.run();
                planner.tree().size()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, planner_backends);
criterion_main!(benches);
