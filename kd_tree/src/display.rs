use std::borrow::Cow;
use std::io;

use crate::{HasCoords, KDTree};

impl<P, const N: usize> KDTree<P, N>
where
    P: HasCoords<N> + Clone,
{
    /// Prints the splitting structure of the tree to stdout.
    pub fn print(&self) -> io::Result<()> {
        ptree::print_tree(&self)
    }
}

impl<'a, P, const N: usize> ptree::TreeItem for &'a KDTree<P, N>
where
    P: HasCoords<N> + Clone,
{
    type Child = NodeDepthPair<'a, P, N>;

    fn write_self<W: io::Write>(&self, f: &mut W, _style: &ptree::Style) -> io::Result<()> {
        if self.root.is_none() {
            write!(f, "No root")
        } else {
            write!(f, "Root")
        }
    }

    fn children(&self) -> Cow<[Self::Child]> {
        let children = self
            .root
            .map(|root| NodeDepthPair {
                tree: *self,
                node: Some((root, 0)),
            })
            .into_iter()
            .collect();

        Cow::Owned(children)
    }
}

#[derive(Clone)]
pub struct NodeDepthPair<'a, P, const N: usize> {
    tree: &'a KDTree<P, N>,
    // (node index, depth)
    node: Option<(usize, usize)>,
}

impl<'a, P, const N: usize> ptree::TreeItem for NodeDepthPair<'a, P, N>
where
    P: HasCoords<N> + Clone,
{
    type Child = NodeDepthPair<'a, P, N>;

    fn write_self<W: io::Write>(&self, f: &mut W, style: &ptree::Style) -> io::Result<()> {
        if let Some((idx, depth)) = self.node {
            let axis = depth % N;
            let point = self.tree.nodes[idx].data.point();
            let to_paint = format!("#{} {} at axis {}", idx, point, axis);
            write!(f, "{}", style.paint(to_paint))
        } else {
            write!(f, "Empty branch")
        }
    }

    fn children(&self) -> Cow<[Self::Child]> {
        let Some((idx, depth)) = self.node else {
            return Cow::Owned(Vec::new());
        };

        let node = &self.tree.nodes[idx];
        let children = [node.left, node.right]
            .into_iter()
            .map(|child| NodeDepthPair {
                tree: self.tree,
                node: child.map(|child| (child, depth + 1)),
            })
            .collect();

        Cow::Owned(children)
    }
}
