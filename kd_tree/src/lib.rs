#[cfg(feature = "display")]
pub mod display;

pub mod visitor;

use std::collections::VecDeque;
use std::iter::Extend;

use nalgebra as na;

pub use visitor::Visitor;

pub trait HasCoords<const N: usize> {
    fn coords(&self) -> [f64; N];

    fn point(&self) -> na::Point<f64, N> {
        self.coords().into()
    }

    fn get_coord(&self, axis: usize) -> f64 {
        self.coords()[axis]
    }
}

impl<const N: usize> HasCoords<N> for na::Point<f64, N> {
    #[inline]
    fn coords(&self) -> [f64; N] {
        let mut array = [0.0; N];
        array.copy_from_slice(self.coords.data.as_slice());
        array
    }

    #[inline]
    fn point(&self) -> na::Point<f64, N> {
        *self
    }

    #[inline]
    fn get_coord(&self, axis: usize) -> f64 {
        self[axis]
    }
}

///
/// A simple implementation of a K-D Tree. Points are stored in insertion order and are addressed
/// by that index, which stays valid for the whole lifetime of the tree (`rebuild` included).
///
/// Insertion never rebalances, so a tree fed with skewed data can become very unbalanced. Use
/// `rebuild` every once in a while in performance sensitive applications.
///
#[derive(Debug, Clone)]
pub struct KDTree<P, const N: usize> {
    nodes: Vec<Node<P>>,
    root: Option<usize>,
}

#[derive(Debug, Clone)]
struct Node<P> {
    data: P,
    left: Option<usize>,
    right: Option<usize>,
}

impl<P> Node<P> {
    fn new(data: P) -> Self {
        Node {
            data,
            left: None,
            right: None,
        }
    }
}

impl<P, const N: usize> KDTree<P, N>
where
    P: HasCoords<N>,
{
    pub const ROOT_IDX: usize = 0;

    #[inline]
    pub fn new() -> KDTree<P, N> {
        KDTree {
            nodes: Vec::new(),
            root: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> KDTree<P, N> {
        KDTree {
            nodes: Vec::with_capacity(capacity),
            root: None,
        }
    }

    /// Inserts a point into the KD-Tree and returns its index. Indices are handed out in
    /// insertion order, starting at `ROOT_IDX`.
    pub fn insert(&mut self, p: P) -> usize {
        let idx = self.nodes.len();
        let coords = p.coords();
        self.nodes.push(Node::new(p));

        let mut curr = match self.root {
            Some(root) => root,
            None => {
                self.root = Some(idx);
                return idx;
            }
        };

        let mut depth = 0;
        loop {
            let axis = depth % N;
            let node = &self.nodes[curr];
            let go_left = coords[axis] <= node.data.get_coord(axis);
            let next = if go_left { node.left } else { node.right };

            match next {
                Some(child) => {
                    curr = child;
                    depth += 1;
                }
                None => {
                    let node = &mut self.nodes[curr];
                    if go_left {
                        node.left = Some(idx);
                    } else {
                        node.right = Some(idx);
                    }
                    return idx;
                }
            }
        }
    }

    pub fn query<'a, V, Q>(&'a self, p: &Q, mut vis: V) -> V::Result
    where
        Q: HasCoords<N> + ?Sized,
        V: Visitor<'a, P, N>,
    {
        if let Some(root) = self.root {
            self.query_node(root, &mut vis, &p.point(), 0);
        }
        vis.result()
    }

    fn query_node<'a, V>(&'a self, idx: usize, vis: &mut V, p: &na::Point<f64, N>, depth: usize)
    where
        V: Visitor<'a, P, N>,
    {
        let node = &self.nodes[idx];
        let axis = depth % N;

        let p_ax = p[axis];
        let m_ax = node.data.get_coord(axis);

        // Follow the axis comparison first to get a good first candidate.
        let (fst, snd) = if p_ax <= m_ax {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(child) = fst {
            self.query_node(child, vis, p, depth + 1);
        }

        if na::distance_squared(&node.data.point(), p) <= vis.radius_sq(p) {
            vis.accept(idx, &node.data, p);
        }

        // Points exactly at the search radius must still be visited so that visitors can break
        // ties between equally distant points.
        if vis.radius_sq(p) >= (p_ax - m_ax).powi(2) {
            if let Some(child) = snd {
                self.query_node(child, vis, p, depth + 1);
            }
        }
    }

    /// Inserts every point and rebalances the whole tree afterwards.
    pub fn extend_vec(&mut self, points: Vec<P>) {
        self.nodes.reserve(points.len());
        for p in points {
            self.nodes.push(Node::new(p));
        }
        self.rebuild();
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&P> {
        self.nodes.get(idx).map(|node| &node.data)
    }

    /// Iterates through the points in insertion order.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.nodes.iter().map(|node| &node.data)
    }

    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut queue: VecDeque<(usize, usize)> = self.root.map(|root| (root, 0)).into_iter().collect();

        while let Some((idx, depth)) = queue.pop_front() {
            max_depth = max_depth.max(depth);
            let node = &self.nodes[idx];
            queue.extend(node.left.into_iter().chain(node.right).map(|child| (child, depth + 1)));
        }

        max_depth
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Rebuilds the KD-Tree into a balanced tree. Only the links between nodes change, every
    /// index handed out by `insert` keeps pointing at the same point.
    pub fn rebuild(&mut self) {
        for node in self.nodes.iter_mut() {
            node.left = None;
            node.right = None;
        }

        let mut order: Vec<usize> = (0..self.nodes.len()).collect();
        self.root = self.build_balanced(&mut order, 0);
    }

    fn build_balanced(&mut self, indices: &mut [usize], depth: usize) -> Option<usize> {
        if indices.is_empty() {
            return None;
        }

        let axis = depth % N;
        let nodes = &self.nodes;
        let coord = |idx: usize| nodes[idx].data.get_coord(axis);

        indices.sort_unstable_by(|&a, &b| coord(a).total_cmp(&coord(b)));

        // Finds the maximum value of `mid` such that `coord(indices[mid]) == median`, so that
        // every point equal to the median on this axis ends up on the left, like in `insert`.
        let mut mid = indices.len() / 2;
        let median_coord = coord(indices[mid]);
        while let Some(&upper) = indices.get(mid + 1) {
            if coord(upper) != median_coord {
                break;
            }
            mid += 1;
        }

        let median = indices[mid];
        let (left, right) = indices.split_at_mut(mid);
        let right = &mut right[1..];

        let left = self.build_balanced(left, depth + 1);
        let right = self.build_balanced(right, depth + 1);

        let node = &mut self.nodes[median];
        node.left = left;
        node.right = right;

        Some(median)
    }
}

impl<P, const N: usize> Default for KDTree<P, N>
where
    P: HasCoords<N>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, const N: usize> Extend<P> for KDTree<P, N>
where
    P: HasCoords<N>,
{
    fn extend<T>(&mut self, iter: T)
    where
        T: IntoIterator<Item = P>,
    {
        for item in iter {
            self.insert(item);
        }
    }
}
