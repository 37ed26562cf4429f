use thiserror::Error;

use crate::tree::VertexId;

/// Errors surfaced by the tree and the planner. Geometry never fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A vertex was referenced that is not part of the tree. This is always a programming error.
    #[error("vertex {vertex} is not part of the tree ({len} vertices)")]
    InvariantViolation { vertex: VertexId, len: usize },

    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("goal not reached after {iterations} iterations ({vertices} vertices in the tree)")]
    PlanningFailed { iterations: usize, vertices: usize },

    #[error("planning cancelled after {iterations} iterations")]
    Cancelled { iterations: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error(
        "placed only {placed} of {requested} obstacles: no valid position found within {attempts} attempts"
    )]
    PackingInfeasible {
        placed: usize,
        requested: usize,
        attempts: usize,
    },

    #[error("obstacle radius must be positive and finite, got {0}")]
    InvalidObstacleRadius(f64),

    #[error("a {width}x{height} workspace cannot hold an obstacle of radius {radius}")]
    WorkspaceTooSmall { width: f64, height: f64, radius: f64 },

    #[error("workspace dimensions must be positive and finite, got {width}x{height}")]
    InvalidWorkspace { width: f64, height: f64 },

    #[error("step length must be positive and finite, got {0}")]
    InvalidStepLength(f64),

    #[error("goal radius must be non-negative and finite, got {0}")]
    InvalidGoalRadius(f64),

    #[error("a random goal of radius {radius} does not fit in a {width}x{height} workspace")]
    GoalRadiusTooLarge { radius: f64, width: f64, height: f64 },

    #[error("{what} must be a finite point")]
    NonFinitePoint { what: &'static str },

    #[error("the iteration budget must allow at least one iteration")]
    ZeroIterationBudget,

    #[error("obstacle {index} violates the clearance from {from}")]
    ClearanceViolated { index: usize, from: &'static str },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
