use nalgebra as na;

use crate::geometry::{self, Point, Vector};

pub trait Obstacle {
    /// Whether `p` collides with the obstacle. Points lying exactly on the boundary are outside.
    fn is_inside(&self, p: &Point) -> bool;
}

impl<O: Obstacle> Obstacle for [O] {
    fn is_inside(&self, p: &Point) -> bool {
        self.iter().any(|o| o.is_inside(p))
    }
}

/// Axis aligned box, the planning workspace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min_corner: Point,
    pub max_corner: Point,
}

impl BBox {
    pub fn new(min_corner: Point, max_corner: Point) -> BBox {
        BBox {
            min_corner,
            max_corner,
        }
    }

    /// A `width` by `height` box with its minimum corner at the origin.
    pub fn from_size(width: f64, height: f64) -> BBox {
        BBox::new(Point::origin(), Point::new(width, height))
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_corner.x - self.min_corner.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_corner.y - self.min_corner.y
    }

    pub fn center(&self) -> Point {
        na::center(&self.min_corner, &self.max_corner)
    }

    /// Inclusive on every side.
    pub fn contains(&self, p: &Point) -> bool {
        (self.min_corner.x..=self.max_corner.x).contains(&p.x)
            && (self.min_corner.y..=self.max_corner.y).contains(&p.y)
    }

    pub fn clamp(&self, p: &Point) -> Point {
        Point::new(
            p.x.clamp(self.min_corner.x, self.max_corner.x),
            p.y.clamp(self.min_corner.y, self.max_corner.y),
        )
    }

    /// Moves every side `margin` units inwards. Returns `None` if nothing is left.
    pub fn shrink(&self, margin: f64) -> Option<BBox> {
        let margin = Vector::repeat(margin);
        let shrunk = BBox::new(self.min_corner + margin, self.max_corner - margin);

        if shrunk.width() >= 0.0 && shrunk.height() >= 0.0 {
            Some(shrunk)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl Obstacle for Circle {
    #[inline]
    fn is_inside(&self, p: &Point) -> bool {
        geometry::distance(&self.center, p) < self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point2;

    #[test]
    fn circle_boundary_is_not_inside() {
        let circle = Circle::new(point2(10.0, 5.0), 5.0);

        assert!(circle.is_inside(&point2(10.0, 5.0)));
        assert!(circle.is_inside(&point2(10.0, 0.5)));
        assert!(!circle.is_inside(&point2(10.0, 0.0)));
        assert!(!circle.is_inside(&point2(15.0, 5.0)));
    }

    #[test]
    fn slice_of_obstacles_collides_if_any_does() {
        let obstacles = [
            Circle::new(point2(0.0, 0.0), 1.0),
            Circle::new(point2(5.0, 0.0), 1.0),
        ];

        assert!(obstacles[..].is_inside(&point2(5.5, 0.0)));
        assert!(!obstacles[..].is_inside(&point2(2.5, 0.0)));
    }

    #[test]
    fn bbox_shrink_and_clamp() {
        let workspace = BBox::from_size(100.0, 50.0);
        assert_eq!(workspace.center(), point2(50.0, 25.0));

        let inner = workspace.shrink(10.0).unwrap();
        assert_eq!(inner, BBox::new(point2(10.0, 10.0), point2(90.0, 40.0)));
        assert!(workspace.shrink(25.0).is_some());
        assert!(workspace.shrink(25.1).is_none());

        assert_eq!(workspace.clamp(&point2(-3.0, 70.0)), point2(0.0, 50.0));
        assert!(workspace.contains(&point2(100.0, 0.0)));
    }
}
