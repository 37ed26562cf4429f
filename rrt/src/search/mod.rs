pub mod kd;
pub mod linear;

pub use kd::KdTreeSearch;
pub use linear::LinearSearch;

use crate::geometry::Point;
use crate::tree::VertexId;

/// Nearest neighbour backend of a `Tree`.
///
/// The tree feeds every vertex to `insert` exactly once, in id order, and passes its coordinate
/// array back on every query. For the same tree state every backend must answer with the same
/// vertex: the one nearest to `query`, ties going to the lowest id.
pub trait NeighborSearch: Default {
    fn insert(&mut self, id: VertexId, point: Point);

    /// `None` only when `points` is empty.
    fn nearest(&self, points: &[Point], query: &Point) -> Option<VertexId>;
}
