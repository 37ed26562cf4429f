use itertools::Itertools;
use rand::Rng;
use tracing::{debug, info};

use crate::error::ConfigurationError;
use crate::geometry::{distance, Point};
use crate::obstacle::{BBox, Circle, Obstacle};
use crate::utils::gen_random_in_range;

pub const DEFAULT_MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

/// How many circular obstacles to scatter over the workspace, and how big they are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    pub count: usize,
    pub radius: f64,
    /// Random draws allowed per obstacle before placement is declared infeasible.
    pub max_placement_attempts: usize,
}

impl FieldConfig {
    pub fn new(count: usize, radius: f64) -> Self {
        FieldConfig {
            count,
            radius,
            max_placement_attempts: DEFAULT_MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

/// The set of obstacles of one planning session. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObstacleField {
    obstacles: Vec<Circle>,
}

impl ObstacleField {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wraps hand placed obstacles. No clearance is enforced, see `check_clearance`.
    pub fn from_obstacles(obstacles: Vec<Circle>) -> Self {
        ObstacleField { obstacles }
    }

    /// Places `config.count` obstacles of `config.radius` by rejection sampling. Every centre
    /// lies inside `workspace` shrunk by the radius, at least one radius away from `start` and
    /// `goal`, and at least two radii away from every other centre.
    ///
    /// Each obstacle gets `config.max_placement_attempts` draws. Running out of them means the
    /// requested packing is (very likely) infeasible and is reported instead of spinning forever.
    pub fn generate<R: Rng + ?Sized>(
        workspace: &BBox,
        start: &Point,
        goal: &Point,
        config: &FieldConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigurationError> {
        if config.count == 0 {
            return Ok(Self::empty());
        }

        let radius = config.radius;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigurationError::InvalidObstacleRadius(radius));
        }

        let region = workspace
            .shrink(radius)
            .ok_or(ConfigurationError::WorkspaceTooSmall {
                width: workspace.width(),
                height: workspace.height(),
                radius,
            })?;

        let mut obstacles: Vec<Circle> = Vec::with_capacity(config.count);

        for placed in 0..config.count {
            let center = std::iter::repeat_with(|| gen_random_in_range(rng, &region))
                .take(config.max_placement_attempts)
                .find(|c| {
                    distance(c, start) >= radius
                        && distance(c, goal) >= radius
                        && obstacles.iter().all(|o| distance(c, &o.center) >= 2.0 * radius)
                })
                .ok_or(ConfigurationError::PackingInfeasible {
                    placed,
                    requested: config.count,
                    attempts: config.max_placement_attempts,
                })?;

            debug!(index = placed, x = center.x, y = center.y, "placed obstacle");
            obstacles.push(Circle::new(center, radius));
        }

        info!(count = obstacles.len(), radius, "generated obstacle field");
        Ok(ObstacleField { obstacles })
    }

    #[inline]
    pub fn obstacles(&self) -> &[Circle] {
        &self.obstacles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Circle> + Clone {
        self.obstacles.iter()
    }

    /// A point is admissible iff it is at least one radius away from every obstacle centre.
    /// Points exactly on a boundary are admissible.
    #[inline]
    pub fn admits(&self, p: &Point) -> bool {
        !self.is_inside(p)
    }

    /// Verifies the placement invariants `generate` guarantees: every centre at least one
    /// radius from `start` and `goal`, and two centres at least the sum of their radii apart.
    pub fn check_clearance(&self, start: &Point, goal: &Point) -> Result<(), ConfigurationError> {
        for (index, o) in self.obstacles.iter().enumerate() {
            if distance(&o.center, start) < o.radius {
                return Err(ConfigurationError::ClearanceViolated { index, from: "the start" });
            }
            if distance(&o.center, goal) < o.radius {
                return Err(ConfigurationError::ClearanceViolated { index, from: "the goal" });
            }
        }

        let overlapping = self
            .obstacles
            .iter()
            .enumerate()
            .tuple_combinations()
            .find(|((_, a), (_, b))| distance(&a.center, &b.center) < a.radius + b.radius);

        match overlapping {
            Some(((_, _), (index, _))) => Err(ConfigurationError::ClearanceViolated {
                index,
                from: "another obstacle",
            }),
            None => Ok(()),
        }
    }
}

impl Obstacle for ObstacleField {
    #[inline]
    fn is_inside(&self, p: &Point) -> bool {
        self.obstacles[..].is_inside(p)
    }
}

impl<'a> IntoIterator for &'a ObstacleField {
    type Item = &'a Circle;
    type IntoIter = std::slice::Iter<'a, Circle>;

    fn into_iter(self) -> Self::IntoIter {
        self.obstacles.iter()
    }
}
