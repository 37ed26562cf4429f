use std::f64::consts::SQRT_2;

use crate::error::ConfigurationError;
use crate::field::FieldConfig;
use crate::geometry::Point;
use crate::obstacle::BBox;

pub const DEFAULT_WORKSPACE_SIZE: f64 = 750.0;
pub const DEFAULT_STEP_LENGTH: f64 = 30.0;
pub const DEFAULT_GOAL_RADIUS: f64 = 30.0;
pub const DEFAULT_OBSTACLE_COUNT: usize = 30;
pub const DEFAULT_OBSTACLE_RADIUS: f64 = 15.0 * SQRT_2;

/// How many times each cell of a step-sized grid over the workspace may be sampled on average
/// before a session gives up.
pub const DEFAULT_ITERS_PER_CELL: usize = 8;

/// Where the goal of a session is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GoalPlacement {
    Fixed(Point),
    /// Drawn from the session's random source, uniformly over the workspace minus half a goal
    /// radius on the far sides.
    Random,
}

/// Everything a planning session is built from. Fixed once the session starts.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub workspace: BBox,
    pub start: Point,
    pub goal: GoalPlacement,
    pub goal_radius: f64,
    pub step_length: f64,
    pub obstacles: FieldConfig,
    pub max_iters: usize,
    pub max_vertices: Option<usize>,
    pub seed: Option<u64>,
    /// Clamp candidates into the workspace before checking them against the obstacles.
    pub clamp_to_workspace: bool,
}

impl PlannerConfig {
    /// Iteration budget scaled to the workspace: `DEFAULT_ITERS_PER_CELL` samples per
    /// `step_length` sized cell. Saturates at `usize::MAX` for huge grids.
    pub fn default_max_iters(workspace: &BBox, step_length: f64) -> usize {
        let cells_x = (workspace.width() / step_length).ceil().max(1.0) as usize;
        let cells_y = (workspace.height() / step_length).ceil().max(1.0) as usize;
        cells_x
            .saturating_mul(cells_y)
            .saturating_mul(DEFAULT_ITERS_PER_CELL)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let (width, height) = (self.workspace.width(), self.workspace.height());
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigurationError::InvalidWorkspace { width, height });
        }
        if !(self.step_length.is_finite() && self.step_length > 0.0) {
            return Err(ConfigurationError::InvalidStepLength(self.step_length));
        }
        if !(self.goal_radius.is_finite() && self.goal_radius >= 0.0) {
            return Err(ConfigurationError::InvalidGoalRadius(self.goal_radius));
        }
        if !is_finite(&self.start) {
            return Err(ConfigurationError::NonFinitePoint { what: "the start" });
        }
        match &self.goal {
            GoalPlacement::Fixed(goal) if !is_finite(goal) => {
                return Err(ConfigurationError::NonFinitePoint { what: "the goal" });
            }
            // A random goal is drawn from the workspace minus half a radius on the far sides.
            GoalPlacement::Random if self.goal_radius / 2.0 > width.min(height) => {
                return Err(ConfigurationError::GoalRadiusTooLarge {
                    radius: self.goal_radius,
                    width,
                    height,
                });
            }
            _ => {}
        }
        if self.max_iters == 0 || self.max_vertices == Some(0) {
            return Err(ConfigurationError::ZeroIterationBudget);
        }
        if self.obstacles.count > 0 && !(self.obstacles.radius.is_finite() && self.obstacles.radius > 0.0) {
            return Err(ConfigurationError::InvalidObstacleRadius(self.obstacles.radius));
        }

        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        let workspace = BBox::from_size(DEFAULT_WORKSPACE_SIZE, DEFAULT_WORKSPACE_SIZE);

        PlannerConfig {
            workspace,
            start: workspace.center(),
            goal: GoalPlacement::Random,
            goal_radius: DEFAULT_GOAL_RADIUS,
            step_length: DEFAULT_STEP_LENGTH,
            obstacles: FieldConfig::new(DEFAULT_OBSTACLE_COUNT, DEFAULT_OBSTACLE_RADIUS),
            max_iters: Self::default_max_iters(&workspace, DEFAULT_STEP_LENGTH),
            max_vertices: None,
            seed: None,
            clamp_to_workspace: false,
        }
    }
}

fn is_finite(p: &Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::geometry::point2;

    #[test]
    fn default_config_is_valid() {
        let config = PlannerConfig::default();

        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.start, point2(375.0, 375.0));
        assert_eq!(config.max_iters, 25 * 25 * DEFAULT_ITERS_PER_CELL);
        assert!(!config.clamp_to_workspace);
    }

    #[rstest]
    #[case::flat_workspace(
        PlannerConfig { workspace: BBox::from_size(100.0, 0.0), ..Default::default() },
        ConfigurationError::InvalidWorkspace { width: 100.0, height: 0.0 },
    )]
    #[case::zero_step(
        PlannerConfig { step_length: 0.0, ..Default::default() },
        ConfigurationError::InvalidStepLength(0.0),
    )]
    #[case::negative_goal_radius(
        PlannerConfig { goal_radius: -1.0, ..Default::default() },
        ConfigurationError::InvalidGoalRadius(-1.0),
    )]
    #[case::infinite_goal(
        PlannerConfig { goal: GoalPlacement::Fixed(point2(f64::INFINITY, 0.0)), ..Default::default() },
        ConfigurationError::NonFinitePoint { what: "the goal" },
    )]
    #[case::random_goal_does_not_fit(
        PlannerConfig { workspace: BBox::from_size(100.0, 40.0), goal_radius: 81.0, ..Default::default() },
        ConfigurationError::GoalRadiusTooLarge { radius: 81.0, width: 100.0, height: 40.0 },
    )]
    #[case::no_iterations(
        PlannerConfig { max_iters: 0, ..Default::default() },
        ConfigurationError::ZeroIterationBudget,
    )]
    #[case::no_vertices(
        PlannerConfig { max_vertices: Some(0), ..Default::default() },
        ConfigurationError::ZeroIterationBudget,
    )]
    fn invalid_configs_are_rejected(#[case] config: PlannerConfig, #[case] expected: ConfigurationError) {
        assert_eq!(config.validate(), Err(expected));
    }

    #[test]
    fn zero_radius_is_fine_without_obstacles() {
        let config = PlannerConfig {
            obstacles: FieldConfig::new(0, 0.0),
            goal_radius: 0.0,
            ..Default::default()
        };

        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn fixed_goal_allows_any_radius() {
        let config = PlannerConfig {
            workspace: BBox::from_size(100.0, 40.0),
            goal: GoalPlacement::Fixed(point2(90.0, 30.0)),
            goal_radius: 500.0,
            ..Default::default()
        };

        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn default_budget_saturates_on_huge_grids() {
        let workspace = BBox::from_size(1e10, 1e10);

        assert_eq!(PlannerConfig::default_max_iters(&workspace, 1e-3), usize::MAX);
        assert_eq!(PlannerConfig::default_max_iters(&workspace, f64::MIN_POSITIVE), usize::MAX);
    }
}
