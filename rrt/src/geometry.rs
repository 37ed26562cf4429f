//! Distance and steering primitives. Everything here is pure and total: there are no failure
//! modes, the coincident-points case of `steer` included.

use nalgebra as na;

pub type Point = na::Point2<f64>;
pub type Vector = na::Vector2<f64>;

#[inline(always)]
pub fn point2(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Euclidean distance between `a` and `b`.
#[inline]
pub fn distance(a: &Point, b: &Point) -> f64 {
    na::distance(a, b)
}

#[inline]
pub fn distance_squared(a: &Point, b: &Point) -> f64 {
    na::distance_squared(a, b)
}

/// Angle of the direction going from `from` to `toward`, as given by `atan2`. When both points
/// coincide this is `atan2(0, 0) = 0`, the +x direction.
#[inline]
pub fn heading(from: &Point, toward: &Point) -> f64 {
    let d = toward - from;
    d.y.atan2(d.x)
}

/// Returns the point reached by moving exactly `step` away from `from` in the direction of
/// `toward`. The step is taken in full even when `toward` is closer than `step`.
///
/// If `from == toward` the direction is undefined; `heading` resolves it to +x, so the result is
/// `from + (step, 0)`.
pub fn steer(from: &Point, toward: &Point, step: f64) -> Point {
    let theta = heading(from, toward);
    *from + Vector::new(theta.cos(), theta.sin()) * step
}
