use std::f64::consts::PI;

use rstest::rstest;
use tracing_subscriber::EnvFilter;

use rrt::geometry::point2;
use rrt::*;

const EPS: f64 = 1e-9;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn open_field<S: NeighborSearch>(seed: u64) -> RRTBuilder<S> {
    RRTBuilder::new()
        .with_workspace(BBox::new(point2(-20.0, -50.0), point2(120.0, 50.0)))
        .with_start(point2(0.0, 0.0))
        .with_goal(point2(100.0, 0.0))
        .with_goal_radius(10.0)
        .with_step_length(10.0)
        .with_obstacle_count(0)
        .with_max_iters(200_000)
        .with_seed(seed)
}

/// `count` obstacles of radius `radius` evenly spread over a circle of radius `ring_radius`
/// around `center`.
fn ring(center: Point, ring_radius: f64, count: usize, radius: f64) -> Vec<Circle> {
    (0..count)
        .map(|i| {
            let theta = 2.0 * PI * i as f64 / count as f64;
            Circle::new(point2(center.x + ring_radius * theta.cos(), center.y + ring_radius * theta.sin()), radius)
        })
        .collect()
}

fn assert_tree_is_rooted<S: NeighborSearch>(tree: &Tree<S>) {
    assert_eq!(tree.parents()[0], None);
    for (idx, parent) in tree.parents().iter().enumerate().skip(1) {
        let parent = parent.expect("only the root has no parent");
        assert!(parent.index() < idx);
    }
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(99)]
fn open_field_reaches_the_goal(#[case] seed: u64) {
    init_tracing();
    let mut planner = open_field::<LinearSearch>(seed).build().unwrap();

    let path = planner.run().unwrap().clone();

    assert_eq!(planner.state(), PlannerState::GoalReached);
    assert_eq!(path.vertices[0], VertexId::ROOT);
    assert_eq!(path.start(), Some(&point2(0.0, 0.0)));
    assert!(distance(path.end().unwrap(), &point2(100.0, 0.0)) <= 10.0);

    // Every hop is one full step along a recorded edge.
    for (pair, (a, b)) in path.vertices.windows(2).zip(path.edges()) {
        assert_eq!(planner.tree().parent(pair[1]), Ok(Some(pair[0])));
        assert!((distance(&a, &b) - 10.0).abs() < EPS);
    }
    assert!((path.length - 10.0 * (path.len() - 1) as f64).abs() < 1e-6);
    assert_tree_is_rooted(planner.tree());
}

#[test]
fn enclosed_goal_exhausts_the_budget() {
    init_tracing();
    let goal = point2(50.0, 50.0);

    // Neighbouring circles overlap, leaving a solid band roughly from 14 to 25.7 units around
    // the goal. A step of 5 can never cross it.
    let mut planner = RRTBuilder::new_linear()
        .with_size(100.0, 100.0)
        .with_start(point2(5.0, 5.0))
        .with_goal(goal)
        .with_goal_radius(5.0)
        .with_step_length(5.0)
        .with_obstacles(ring(goal, 20.0, 40, 6.0))
        .with_max_iters(2_000)
        .with_seed(17)
        .build()
        .unwrap();

    match planner.run() {
        Err(Error::PlanningFailed { iterations, vertices }) => {
            assert_eq!(iterations, 2_000);
            assert_eq!(vertices, planner.tree().size());
        }
        other => panic!("expected the budget to run out, got {:?}", other),
    }

    assert_eq!(planner.state(), PlannerState::Growing);
    assert!(planner.path().is_none());
    let field = planner.obstacles();
    assert!(planner.tree().vertices().iter().all(|p| field.admits(p)));
    assert!(planner.tree().vertices().iter().all(|p| distance(p, &goal) > 14.0));
}

#[test]
fn candidate_on_an_obstacle_boundary_is_admissible() {
    let field = ObstacleField::from_obstacles(vec![Circle::new(point2(10.0, 5.0), 5.0)]);
    let candidate = steer(&point2(0.0, 0.0), &point2(20.0, 0.0), 10.0);

    assert_eq!(candidate, point2(10.0, 0.0));
    assert_eq!(distance(&candidate, &point2(10.0, 5.0)), 5.0);
    assert!(field.admits(&candidate));
}

#[rstest]
#[case(5)]
#[case(31)]
#[case(2024)]
fn linear_and_kd_backends_grow_the_same_tree(#[case] seed: u64) {
    let mut linear: Planner<LinearSearch> = RRTBuilder::new().with_seed(seed).build().unwrap();
    let mut kd: Planner<KdTreeSearch> = RRTBuilder::new().with_seed(seed).build().unwrap();

    assert_eq!(linear.goal(), kd.goal());
    assert_eq!(linear.obstacles(), kd.obstacles());

    let linear_result = linear.run().cloned();
    let kd_result = kd.run().cloned();

    assert_eq!(linear_result, kd_result);
    assert_eq!(linear.tree().vertices(), kd.tree().vertices());
    assert_eq!(linear.tree().parents(), kd.tree().parents());
}

#[test]
fn default_session_respects_obstacles() {
    init_tracing();
    let mut planner = RRTBuilder::new_kd().with_seed(123).build().unwrap();
    let start = planner.config().start;
    let goal = planner.goal();

    planner.obstacles().check_clearance(&start, &goal.center).unwrap();
    assert_eq!(planner.obstacles().len(), 30);

    let _ = planner.run();

    let field = planner.obstacles();
    assert!(planner.tree().vertices().iter().all(|p| field.admits(p)));
    assert_tree_is_rooted(planner.tree());
    if let Some(path) = planner.path() {
        assert!(goal.contains(path.end().unwrap()));
    }
}

#[test]
fn stepping_feeds_new_edges_to_a_renderer() {
    let mut planner = open_field::<KdTreeSearch>(12).build().unwrap();
    let mut drawn = planner.tree().size();
    let mut edges = Vec::new();

    loop {
        let step = planner.step().unwrap();
        let new: Vec<_> = planner.tree().edges_since(drawn).collect();
        drawn = planner.tree().size();

        match step {
            Step::Extended { .. } => assert_eq!(new.len(), 1),
            Step::GoalReached { .. } => {
                assert_eq!(new.len(), 1);
                edges.extend(new);
                break;
            }
            other => panic!("unexpected step in an empty field: {:?}", other),
        }
        edges.extend(new);
    }

    assert!(edges.iter().copied().eq(planner.tree().edges()));
    assert_eq!(planner.snapshot().state, PlannerState::GoalReached);
    assert!(planner.snapshot().path.is_some());
}

#[test]
fn infeasible_packing_fails_fast() {
    let err = RRTBuilder::new_linear()
        .with_size(60.0, 60.0)
        .with_start(point2(1.0, 1.0))
        .with_goal(point2(59.0, 59.0))
        .with_obstacle_count(50)
        .with_obstacle_radius(10.0)
        .with_max_placement_attempts(1_000)
        .with_seed(3)
        .build()
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Configuration(ConfigurationError::PackingInfeasible { requested: 50, .. })
    ));
}
