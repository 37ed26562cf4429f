use nalgebra as na;

use crate::HasCoords;

macro_rules! impl_default_with_new {
    (impl$(<$($generics:tt),*>)? Default for $($type:tt)*) => {
        impl$(<$($generics),*>)? Default for $($type)* {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

/// This trait defines an interface for any algorithm query in the KD-Tree. In a
/// KD-Tree, the `query` function takes a visitor that implements this trait as
/// well as a reference point that is used to navigate the tree. In the visitor,
/// parameters this reference point is called `other`.
///
/// The `accept` function may modify the visitor in some way. The only way to
/// get nodes out of the tree is through the accept function. For instance, if a
/// visitor wants all of the visited points, it can simply store all of the
/// points passed to the `accept` function.
///
/// The radius function should return a radius around the reference point that
/// still needs to be searched through. Points lying exactly on that radius are
/// still visited.
///
/// The lifetime `'a` is the lifetime of the KD-Tree.
pub trait Visitor<'a, P, const N: usize> {
    /// The final result of the visitor.
    type Result;

    /// Return the radius around `other` that still has to be searched through.
    /// This function is assumed to be decreasing. If for the same `other` it's
    /// value increases, it is a logic error.
    fn radius(&self, other: &na::Point<f64, N>) -> f64;

    /// Accept the point stored at `index` of the KD-Tree. `other` is the reference point that is
    /// used to navigate the KD-Tree.
    fn accept(&mut self, index: usize, point: &'a P, other: &na::Point<f64, N>);

    /// Consume the visitor into the final result.
    fn result(self) -> Self::Result;

    /// Calculates the radius squared. May be overwritten for better performance.
    fn radius_sq(&self, other: &na::Point<f64, N>) -> f64 {
        self.radius(other).powi(2)
    }
}

/// A visitor that returns the nearest point to the reference point. When several points are
/// equally near, the one inserted first wins.
pub struct NearestVisitor<'a, P> {
    inner: NearestIndexedVisitor<'a, P>,
}

impl<'a, P> NearestVisitor<'a, P> {
    pub fn new() -> Self {
        NearestVisitor {
            inner: NearestIndexedVisitor::new(),
        }
    }
}

impl<'a, P, const N: usize> Visitor<'a, P, N> for NearestVisitor<'a, P>
where
    P: HasCoords<N>,
{
    type Result = Option<&'a P>;

    fn radius(&self, other: &na::Point<f64, N>) -> f64 {
        <NearestIndexedVisitor<'a, P> as Visitor<'a, P, N>>::radius(&self.inner, other)
    }

    fn accept(&mut self, index: usize, point: &'a P, other: &na::Point<f64, N>) {
        self.inner.accept(index, point, other);
    }

    fn result(self) -> Option<&'a P> {
        <NearestIndexedVisitor<'a, P> as Visitor<'a, P, N>>::result(self.inner).map(|(_, p)| p)
    }

    fn radius_sq(&self, other: &na::Point<f64, N>) -> f64 {
        <NearestIndexedVisitor<'a, P> as Visitor<'a, P, N>>::radius_sq(&self.inner, other)
    }
}

impl_default_with_new! { impl<'a, P> Default for NearestVisitor<'a, P> }

/// Same as `NearestVisitor`, but also yields the index of the point in the KD-Tree.
pub struct NearestIndexedVisitor<'a, P> {
    // (index, point, squared distance to the reference point)
    min: Option<(usize, &'a P, f64)>,
}

impl<'a, P> NearestIndexedVisitor<'a, P> {
    pub fn new() -> Self {
        NearestIndexedVisitor { min: None }
    }
}

impl<'a, P, const N: usize> Visitor<'a, P, N> for NearestIndexedVisitor<'a, P>
where
    P: HasCoords<N>,
{
    type Result = Option<(usize, &'a P)>;

    fn radius(&self, other: &na::Point<f64, N>) -> f64 {
        <Self as Visitor<'a, P, N>>::radius_sq(self, other).sqrt()
    }

    fn accept(&mut self, index: usize, point: &'a P, other: &na::Point<f64, N>) {
        let dist = na::distance_squared(&point.point(), other);
        let closer = match self.min {
            None => true,
            Some((min_idx, _, min_dist)) => dist < min_dist || (dist == min_dist && index < min_idx),
        };

        if closer {
            self.min = Some((index, point, dist));
        }
    }

    fn result(self) -> Option<(usize, &'a P)> {
        self.min.map(|(idx, p, _)| (idx, p))
    }

    fn radius_sq(&self, _other: &na::Point<f64, N>) -> f64 {
        self.min.map(|(_, _, dist)| dist).unwrap_or(f64::INFINITY)
    }
}

impl_default_with_new! { impl<'a, P> Default for NearestIndexedVisitor<'a, P> }
