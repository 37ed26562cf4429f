use std::marker::PhantomData;

use crate::config::*;
use crate::error::Result;
use crate::field::{FieldConfig, ObstacleField, DEFAULT_MAX_PLACEMENT_ATTEMPTS};
use crate::geometry::Point;
use crate::obstacle::{BBox, Circle};
use crate::planner::Planner;
use crate::search::{KdTreeSearch, LinearSearch, NeighborSearch};

/// Collects the settings of a planning session. Anything left unset falls back to a default,
/// some of which are derived from other settings (see the `get_*` methods).
#[derive(Debug, Clone)]
pub struct RRTBuilder<S = LinearSearch> {
    workspace: Option<BBox>,
    start: Option<Point>,
    goal: Option<Point>,
    goal_radius: Option<f64>,
    step_length: Option<f64>,
    obstacle_count: Option<usize>,
    obstacle_radius: Option<f64>,
    max_placement_attempts: Option<usize>,
    obstacles: Option<Vec<Circle>>,
    max_iters: Option<usize>,
    max_vertices: Option<usize>,
    seed: Option<u64>,
    clamp_to_workspace: bool,
    _search: PhantomData<S>,
}

impl<S: NeighborSearch> Default for RRTBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: NeighborSearch> RRTBuilder<S> {
    pub fn new() -> RRTBuilder<S> {
        RRTBuilder {
            workspace: None,
            start: None,
            goal: None,
            goal_radius: None,
            step_length: None,
            obstacle_count: None,
            obstacle_radius: None,
            max_placement_attempts: None,
            obstacles: None,
            max_iters: None,
            max_vertices: None,
            seed: None,
            clamp_to_workspace: false,
            _search: PhantomData,
        }
    }

    /// A `width` by `height` workspace with its minimum corner at the origin.
    pub fn with_size(self, width: f64, height: f64) -> Self {
        self.with_workspace(BBox::from_size(width, height))
    }

    pub fn with_workspace(mut self, workspace: BBox) -> Self {
        self.workspace.replace(workspace);
        self
    }

    pub fn with_start(mut self, start: Point) -> Self {
        self.start.replace(start);
        self
    }

    pub fn with_goal(mut self, goal: Point) -> Self {
        self.goal.replace(goal);
        self
    }

    /// Undoes `with_goal`, the goal will be drawn from the session's random source.
    pub fn with_random_goal(mut self) -> Self {
        self.goal = None;
        self
    }

    pub fn with_goal_radius(mut self, radius: f64) -> Self {
        self.goal_radius.replace(radius);
        self
    }

    pub fn with_step_length(mut self, step_length: f64) -> Self {
        self.step_length.replace(step_length);
        self
    }

    pub fn with_obstacle_count(mut self, count: usize) -> Self {
        self.obstacle_count.replace(count);
        self
    }

    pub fn with_obstacle_radius(mut self, radius: f64) -> Self {
        self.obstacle_radius.replace(radius);
        self
    }

    pub fn with_max_placement_attempts(mut self, attempts: usize) -> Self {
        self.max_placement_attempts.replace(attempts);
        self
    }

    /// Uses these obstacles instead of generating a random field.
    pub fn with_obstacles(mut self, obstacles: impl IntoIterator<Item = Circle>) -> Self {
        self.obstacles.replace(obstacles.into_iter().collect());
        self
    }

    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters.replace(max_iters);
        self
    }

    pub fn with_max_vertices(mut self, max_vertices: usize) -> Self {
        self.max_vertices.replace(max_vertices);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed.replace(seed);
        self
    }

    pub fn with_clamp_to_workspace(mut self, clamp: bool) -> Self {
        self.clamp_to_workspace = clamp;
        self
    }

    pub fn get_workspace(&self) -> BBox {
        self.workspace
            .unwrap_or_else(|| BBox::from_size(DEFAULT_WORKSPACE_SIZE, DEFAULT_WORKSPACE_SIZE))
    }

    /// Defaults to the centre of the workspace.
    pub fn get_start(&self) -> Point {
        self.start.unwrap_or_else(|| self.get_workspace().center())
    }

    pub fn get_goal(&self) -> GoalPlacement {
        self.goal.map_or(GoalPlacement::Random, GoalPlacement::Fixed)
    }

    pub fn get_goal_radius(&self) -> f64 {
        self.goal_radius.unwrap_or(DEFAULT_GOAL_RADIUS)
    }

    pub fn get_step_length(&self) -> f64 {
        self.step_length.unwrap_or(DEFAULT_STEP_LENGTH)
    }

    pub fn get_obstacle_count(&self) -> usize {
        self.obstacle_count.unwrap_or(DEFAULT_OBSTACLE_COUNT)
    }

    pub fn get_obstacle_radius(&self) -> f64 {
        self.obstacle_radius.unwrap_or(DEFAULT_OBSTACLE_RADIUS)
    }

    pub fn get_max_placement_attempts(&self) -> usize {
        self.max_placement_attempts
            .unwrap_or(DEFAULT_MAX_PLACEMENT_ATTEMPTS)
    }

    pub fn get_obstacles(&self) -> Option<&[Circle]> {
        self.obstacles.as_deref()
    }

    /// Defaults to a budget proportional to the number of step sized cells in the workspace.
    pub fn get_max_iters(&self) -> usize {
        self.max_iters
            .unwrap_or_else(|| PlannerConfig::default_max_iters(&self.get_workspace(), self.get_step_length()))
    }

    pub fn get_max_vertices(&self) -> Option<usize> {
        self.max_vertices
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_clamp_to_workspace(&self) -> bool {
        self.clamp_to_workspace
    }

    /// The configuration `build` would start the session with.
    pub fn config(&self) -> PlannerConfig {
        PlannerConfig {
            workspace: self.get_workspace(),
            start: self.get_start(),
            goal: self.get_goal(),
            goal_radius: self.get_goal_radius(),
            step_length: self.get_step_length(),
            obstacles: FieldConfig {
                count: self.get_obstacle_count(),
                radius: self.get_obstacle_radius(),
                max_placement_attempts: self.get_max_placement_attempts(),
            },
            max_iters: self.get_max_iters(),
            max_vertices: self.get_max_vertices(),
            seed: self.get_seed(),
            clamp_to_workspace: self.get_clamp_to_workspace(),
        }
    }

    pub fn build(self) -> Result<Planner<S>> {
        let config = self.config();

        match self.obstacles {
            Some(obstacles) => Planner::with_obstacles(config, ObstacleField::from_obstacles(obstacles)),
            None => Planner::new(config),
        }
    }
}

impl RRTBuilder<LinearSearch> {
    #[inline(always)]
    pub fn new_linear() -> RRTBuilder<LinearSearch> {
        RRTBuilder::new()
    }

    /// This function is usefull for type inference. It is a no-op, but it indicates to the
    /// compiler that this builder has to use `LinearSearch`.
    #[inline(always)]
    pub fn as_linear(self) -> Self {
        self
    }
}

impl RRTBuilder<KdTreeSearch> {
    #[inline(always)]
    pub fn new_kd() -> RRTBuilder<KdTreeSearch> {
        RRTBuilder::new()
    }

    /// This function is usefull for type inference. It is a no-op, but it indicates to the
    /// compiler that this builder has to use `KdTreeSearch`.
    #[inline(always)]
    pub fn as_kd(self) -> Self {
        self
    }
}
