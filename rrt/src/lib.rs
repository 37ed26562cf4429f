pub mod builder;
pub mod cancel;
pub mod config;
pub mod error;
pub mod field;
pub mod geometry;
pub mod obstacle;
pub mod planner;
pub mod search;
pub mod tree;

mod utils;

pub use builder::RRTBuilder;
pub use cancel::CancelToken;
pub use config::{GoalPlacement, PlannerConfig};
pub use error::{ConfigurationError, Error, Result};
pub use field::{FieldConfig, ObstacleField};
pub use geometry::{distance, steer, Point};
pub use obstacle::{BBox, Circle, Obstacle};
pub use planner::{Goal, Planner, PlannerState, Snapshot, Step};
pub use search::{KdTreeSearch, LinearSearch, NeighborSearch};
pub use tree::{Tree, VertexId};

use itertools::Itertools;

/// A path found by the planner, from the root of the tree to the vertex that reached the goal.
/// Every consecutive pair of vertices is a parent/child edge of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub vertices: Vec<VertexId>,
    pub waypoints: Vec<Point>,
    /// Total length of the polyline through `waypoints`.
    pub length: f64,
}

impl Path {
    /// Traces the parent links from `reached` back to the root.
    pub fn from_tree<S: NeighborSearch>(tree: &Tree<S>, reached: VertexId) -> Result<Path> {
        let mut vertices = tree.path_to(reached)?;
        vertices.reverse();

        let waypoints = vertices
            .iter()
            .map(|&v| tree.point(v))
            .collect::<Result<Vec<_>>>()?;

        let length = waypoints
            .iter()
            .tuple_windows()
            .map(|(a, b)| distance(a, b))
            .sum();

        Ok(Path {
            vertices,
            waypoints,
            length,
        })
    }

    /// Number of waypoints, both ends included.
    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn start(&self) -> Option<&Point> {
        self.waypoints.first()
    }

    pub fn end(&self) -> Option<&Point> {
        self.waypoints.last()
    }

    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.waypoints.iter().copied().tuple_windows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point2;

    #[test]
    fn path_goes_from_root_to_the_reached_vertex() {
        let mut tree: Tree = Tree::new(point2(0.0, 0.0));
        let a = tree.insert(VertexId::ROOT, point2(3.0, 4.0)).unwrap();
        tree.insert(VertexId::ROOT, point2(-1.0, 0.0)).unwrap();
        let b = tree.insert(a, point2(3.0, 10.0)).unwrap();

        let path = Path::from_tree(&tree, b).unwrap();

        assert_eq!(path.vertices, vec![VertexId::ROOT, a, b]);
        assert_eq!(path.start(), Some(&point2(0.0, 0.0)));
        assert_eq!(path.end(), Some(&point2(3.0, 10.0)));
        assert_eq!(path.length, 11.0);
        assert_eq!(path.edges().count(), 2);
    }

    #[test]
    fn path_from_unknown_vertex_fails() {
        let tree: Tree = Tree::new(point2(0.0, 0.0));
        assert!(matches!(
            Path::from_tree(&tree, VertexId(1)),
            Err(Error::InvariantViolation { .. })
        ));
    }
}
