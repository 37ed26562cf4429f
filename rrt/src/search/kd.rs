use tracing::debug;

use kd_tree::visitor::NearestIndexedVisitor;
use kd_tree::KDTree;

use crate::geometry::Point;
use crate::search::NeighborSearch;
use crate::tree::VertexId;

const FIRST_REBUILD: usize = 64;

/// Keeps a k-d tree over the vertices next to the tree's own arrays. Indices in the k-d tree are
/// insertion indices, so they coincide with `VertexId`s.
///
/// Incremental insertion does not keep the k-d tree balanced, so it is rebuilt every time the
/// number of vertices doubles.
#[derive(Debug, Clone)]
pub struct KdTreeSearch {
    tree: KDTree<Point, 2>,
    next_rebuild: usize,
}

impl Default for KdTreeSearch {
    fn default() -> Self {
        KdTreeSearch {
            tree: KDTree::new(),
            next_rebuild: FIRST_REBUILD,
        }
    }
}

impl KdTreeSearch {
    /// Depth of the underlying k-d tree.
    pub fn depth(&self) -> usize {
        self.tree.depth()
    }
}

impl NeighborSearch for KdTreeSearch {
    fn insert(&mut self, id: VertexId, point: Point) {
        let idx = self.tree.insert(point);
        debug_assert_eq!(idx, id.index(), "vertices must be fed in id order");

        if self.tree.size() >= self.next_rebuild {
            self.tree.rebuild();
            debug!(size = self.tree.size(), depth = self.tree.depth(), "rebalanced k-d tree");
            self.next_rebuild = self.tree.size() * 2;
        }
    }

    fn nearest(&self, _points: &[Point], query: &Point) -> Option<VertexId> {
        self.tree
            .query(query, NearestIndexedVisitor::new())
            .map(|(idx, _)| VertexId(idx))
    }
}
