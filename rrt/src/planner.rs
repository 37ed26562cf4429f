use rand::rngs::StdRng;
use tracing::{debug, info, instrument, trace, warn};

use crate::cancel::CancelToken;
use crate::config::{GoalPlacement, PlannerConfig};
use crate::error::{Error, Result};
use crate::field::ObstacleField;
use crate::geometry::{distance, steer, Point, Vector};
use crate::obstacle::{BBox, Circle};
use crate::search::{LinearSearch, NeighborSearch};
use crate::tree::{Tree, VertexId};
use crate::utils::{gen_random_in_range, session_rng};
use crate::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerState {
    Growing,
    /// Terminal. The path has been traced and the tree no longer grows.
    GoalReached,
}

/// The disk a vertex has to land in for the session to succeed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Goal {
    pub center: Point,
    pub radius: f64,
}

impl Goal {
    pub fn new(center: Point, radius: f64) -> Self {
        Goal { center, radius }
    }

    /// Inclusive: a point exactly `radius` away from the centre reaches the goal.
    #[inline]
    pub fn contains(&self, p: &Point) -> bool {
        distance(&self.center, p) <= self.radius
    }
}

/// What a single call to `Planner::step` did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// A new vertex was added, hanging from `parent`.
    Extended { vertex: VertexId, parent: VertexId },
    /// The candidate fell inside an obstacle and was discarded.
    Rejected { candidate: Point },
    /// `vertex` is inside the goal region. The path is available from `Planner::path`.
    GoalReached { vertex: VertexId },
    /// The session had already finished, nothing happened.
    Idle,
}

/// Read-only view of a session, everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub vertices: &'a [Point],
    pub parents: &'a [Option<VertexId>],
    pub obstacles: &'a [Circle],
    pub goal: Goal,
    pub state: PlannerState,
    pub iterations: usize,
    pub path: Option<&'a Path>,
}

impl<'a> Snapshot<'a> {
    /// Every (parent, child) edge of the tree.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + 'a {
        let (vertices, parents) = (self.vertices, self.parents);
        parents
            .iter()
            .zip(vertices)
            .filter_map(move |(parent, &child)| parent.map(|p| (vertices[p.index()], child)))
    }
}

/// One planning session: owns the tree, the obstacles, the goal and the random source.
///
/// The planner is a small state machine. Each call to `step` makes exactly one growth attempt
/// (sample, nearest, steer, collision check, insert, goal test), so it can be interleaved with
/// drawing. `run` steps until the goal is reached or the budget runs out.
#[derive(Debug, Clone)]
pub struct Planner<S = LinearSearch> {
    config: PlannerConfig,
    rng: StdRng,
    tree: Tree<S>,
    obstacles: ObstacleField,
    goal: Goal,
    state: PlannerState,
    iterations: usize,
    path: Option<Path>,
}

impl<S: NeighborSearch> Planner<S> {
    /// Starts a session, generating the obstacle field from `config.obstacles`.
    pub fn new(config: PlannerConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = session_rng(config.seed);
        let goal = place_goal(&config, &mut rng);
        let obstacles = ObstacleField::generate(&config.workspace, &config.start, &goal, &config.obstacles, &mut rng)?;

        Ok(Self::from_parts(config, rng, goal, obstacles))
    }

    /// Starts a session over an already built obstacle field. `config.obstacles` is ignored.
    pub fn with_obstacles(config: PlannerConfig, obstacles: ObstacleField) -> Result<Self> {
        config.validate()?;

        let mut rng = session_rng(config.seed);
        let goal = place_goal(&config, &mut rng);

        Ok(Self::from_parts(config, rng, goal, obstacles))
    }

    fn from_parts(config: PlannerConfig, rng: StdRng, goal: Point, obstacles: ObstacleField) -> Self {
        info!(
            start.x = config.start.x,
            start.y = config.start.y,
            goal.x = goal.x,
            goal.y = goal.y,
            obstacles = obstacles.len(),
            max_iters = config.max_iters,
            "planning session ready"
        );

        Planner {
            tree: Tree::new(config.start),
            goal: Goal::new(goal, config.goal_radius),
            config,
            rng,
            obstacles,
            state: PlannerState::Growing,
            iterations: 0,
            path: None,
        }
    }

    /// Makes one growth attempt.
    ///
    /// Once the goal is reached every further call returns `Step::Idle`. Calling `step` after
    /// the budget is exhausted keeps returning `Error::PlanningFailed`.
    pub fn step(&mut self) -> Result<Step> {
        if self.state == PlannerState::GoalReached {
            return Ok(Step::Idle);
        }

        // Covers a root that already lies inside the goal region.
        let last = self.tree.last();
        if self.goal.contains(&self.tree.point(last)?) {
            return self.reach_goal(last);
        }

        self.check_budget()?;
        self.iterations += 1;

        let sample = gen_random_in_range(&mut self.rng, &self.config.workspace);
        let nearest = self.tree.nearest(&sample);
        let mut candidate = steer(&self.tree.point(nearest)?, &sample, self.config.step_length);

        if self.config.clamp_to_workspace {
            candidate = self.config.workspace.clamp(&candidate);
        }

        if !self.obstacles.admits(&candidate) {
            trace!(x = candidate.x, y = candidate.y, "candidate rejected");
            return Ok(Step::Rejected { candidate });
        }

        let vertex = self.tree.insert(nearest, candidate)?;

        if self.goal.contains(&candidate) {
            self.reach_goal(vertex)
        } else {
            Ok(Step::Extended { vertex, parent: nearest })
        }
    }

    /// Steps until the goal is reached, returning the path.
    #[instrument(level = "debug", skip(self), fields(max_iters = self.config.max_iters))]
    pub fn run(&mut self) -> Result<&Path> {
        while self.path.is_none() {
            self.step()?;
        }

        self.finished_path()
    }

    /// Like `run`, but checks `token` before every iteration. A cancelled session keeps its
    /// tree and can be resumed with another call.
    #[instrument(level = "debug", skip(self, token), fields(max_iters = self.config.max_iters))]
    pub fn run_with_cancel(&mut self, token: &CancelToken) -> Result<&Path> {
        while self.path.is_none() {
            if token.is_cancelled() {
                debug!(iterations = self.iterations, "planning cancelled");
                return Err(Error::Cancelled {
                    iterations: self.iterations,
                });
            }
            self.step()?;
        }

        self.finished_path()
    }

    fn check_budget(&self) -> Result<()> {
        let vertices = self.tree.size();
        let out_of_iters = self.iterations >= self.config.max_iters;
        let out_of_vertices = self.config.max_vertices.map_or(false, |max| vertices >= max);

        if out_of_iters || out_of_vertices {
            warn!(iterations = self.iterations, vertices, "budget exhausted before reaching the goal");
            Err(Error::PlanningFailed {
                iterations: self.iterations,
                vertices,
            })
        } else {
            Ok(())
        }
    }

    fn reach_goal(&mut self, vertex: VertexId) -> Result<Step> {
        let path = Path::from_tree(&self.tree, vertex)?;

        info!(
            iterations = self.iterations,
            vertices = self.tree.size(),
            waypoints = path.len(),
            length = path.length,
            "goal reached"
        );

        self.path = Some(path);
        self.state = PlannerState::GoalReached;
        Ok(Step::GoalReached { vertex })
    }

    fn finished_path(&self) -> Result<&Path> {
        self.path.as_ref().ok_or(Error::PlanningFailed {
            iterations: self.iterations,
            vertices: self.tree.size(),
        })
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            vertices: self.tree.vertices(),
            parents: self.tree.parents(),
            obstacles: self.obstacles.obstacles(),
            goal: self.goal,
            state: self.state,
            iterations: self.iterations,
            path: self.path.as_ref(),
        }
    }

    #[inline]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    #[inline]
    pub fn tree(&self) -> &Tree<S> {
        &self.tree
    }

    #[inline]
    pub fn obstacles(&self) -> &ObstacleField {
        &self.obstacles
    }

    #[inline]
    pub fn goal(&self) -> Goal {
        self.goal
    }

    #[inline]
    pub fn workspace(&self) -> &BBox {
        &self.config.workspace
    }

    #[inline]
    pub fn state(&self) -> PlannerState {
        self.state
    }

    /// Number of growth attempts made so far.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// The path found, once the goal is reached.
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }
}

fn place_goal(config: &PlannerConfig, rng: &mut StdRng) -> Point {
    match config.goal {
        GoalPlacement::Fixed(goal) => goal,
        GoalPlacement::Random => {
            let ws = &config.workspace;
            let margin = Vector::repeat(config.goal_radius / 2.0);
            let range = BBox::new(ws.min_corner, ws.max_corner - margin);
            gen_random_in_range(rng, &range)
        }
    }
}
