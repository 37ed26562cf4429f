use rand::prelude::*;
use nalgebra as na;

use crate::geometry::Point;
use crate::obstacle::BBox;

/// Seeded sessions are reproducible, unseeded ones draw from the OS entropy source.
pub(crate) fn session_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Uniform point inside `range`, the maximum corner excluded.
pub(crate) fn gen_random_in_range<R: Rng + ?Sized>(rng: &mut R, range: &BBox) -> Point {
    let rand_vec = rng.gen::<na::Vector2<f64>>();
    let s = range.min_corner.coords;
    let e = range.max_corner.coords;
    Point::from(s + rand_vec.component_mul(&(e - s)))
}
