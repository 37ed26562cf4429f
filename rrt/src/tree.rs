use std::fmt;

use tracing::error;

use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::search::{LinearSearch, NeighborSearch};

/// Stable identity of a tree vertex: its position in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub usize);

impl VertexId {
    pub const ROOT: VertexId = VertexId(0);

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A rooted, append-only tree of points.
///
/// Coordinates and parent links live in two arrays addressed by `VertexId`. The root is always
/// `VertexId::ROOT` and is the only vertex without a parent; every other vertex points to a
/// vertex inserted before it, so following parents always ends at the root.
///
/// Nearest neighbour queries are answered by the `S` backend.
#[derive(Debug, Clone)]
pub struct Tree<S = LinearSearch> {
    points: Vec<Point>,
    parents: Vec<Option<VertexId>>,
    search: S,
}

impl<S: NeighborSearch> Tree<S> {
    pub fn new(root: Point) -> Self {
        let mut search = S::default();
        search.insert(VertexId::ROOT, root);

        Tree {
            points: vec![root],
            parents: vec![None],
            search,
        }
    }

    /// Number of vertices, root included. Never zero.
    #[inline]
    pub fn size(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn root(&self) -> VertexId {
        VertexId::ROOT
    }

    /// The most recently inserted vertex (the root if nothing was inserted yet).
    #[inline]
    pub fn last(&self) -> VertexId {
        VertexId(self.points.len() - 1)
    }

    #[inline]
    pub fn contains(&self, vertex: VertexId) -> bool {
        vertex.0 < self.points.len()
    }

    pub fn point(&self, vertex: VertexId) -> Result<Point> {
        self.check(vertex)?;
        Ok(self.points[vertex.0])
    }

    pub fn parent(&self, vertex: VertexId) -> Result<Option<VertexId>> {
        self.check(vertex)?;
        Ok(self.parents[vertex.0])
    }

    /// Coordinates of every vertex, in insertion order.
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.points
    }

    /// Parent of every vertex, in insertion order. Only the root has `None`.
    #[inline]
    pub fn parents(&self) -> &[Option<VertexId>] {
        &self.parents
    }

    /// The vertex closest to `query`. When several are equally close, the one inserted first.
    pub fn nearest(&self, query: &Point) -> VertexId {
        // The tree always holds at least the root.
        self.search
            .nearest(&self.points, query)
            .unwrap_or(VertexId::ROOT)
    }

    /// Appends `child` as a new vertex hanging from `parent`.
    pub fn insert(&mut self, parent: VertexId, child: Point) -> Result<VertexId> {
        self.check(parent)?;

        let id = VertexId(self.points.len());
        self.points.push(child);
        self.parents.push(Some(parent));
        self.search.insert(id, child);

        Ok(id)
    }

    /// Walks the parent links from `vertex` up to the root, both included, child first.
    pub fn path_to(&self, vertex: VertexId) -> Result<Vec<VertexId>> {
        self.check(vertex)?;

        let mut path = vec![vertex];
        let mut curr = vertex;
        while let Some(parent) = self.parents[curr.0] {
            path.push(parent);
            curr = parent;
        }

        Ok(path)
    }

    /// Every (parent, child) edge, in the order the children were inserted.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.edges_since(0)
    }

    /// The edges of the vertices inserted at or after position `start`. A renderer that keeps
    /// the tree size it last drew can feed it back here to get only the new edges.
    pub fn edges_since(&self, start: usize) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.parents
            .iter()
            .enumerate()
            .skip(start)
            .filter_map(move |(child, parent)| parent.map(|parent| (self.points[parent.0], self.points[child])))
    }

    fn check(&self, vertex: VertexId) -> Result<()> {
        if self.contains(vertex) {
            Ok(())
        } else {
            error!(%vertex, len = self.size(), "reference to a vertex outside of the tree");
            Err(Error::InvariantViolation {
                vertex,
                len: self.size(),
            })
        }
    }
}
