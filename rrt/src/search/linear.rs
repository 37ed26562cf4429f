use crate::geometry::{distance_squared, Point};
use crate::search::NeighborSearch;
use crate::tree::VertexId;

/// Scans every vertex on each query. O(n) per query, which is fine for trees of a few thousand
/// vertices and needs no bookkeeping at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearSearch;

impl NeighborSearch for LinearSearch {
    #[inline(always)]
    fn insert(&mut self, _id: VertexId, _point: Point) {}

    fn nearest(&self, points: &[Point], query: &Point) -> Option<VertexId> {
        // Squared distances order the same way and match what the k-d tree compares. `min_by`
        // keeps the first of several equal minimums.
        points
            .iter()
            .map(|p| distance_squared(p, query))
            .enumerate()
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(idx, _)| VertexId(idx))
    }
}
