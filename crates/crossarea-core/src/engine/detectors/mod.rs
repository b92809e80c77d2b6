//! Point-in-shape tests over the projected atoms of one orientation.
//!
//! A query point "collides" when it lies strictly closer than `probe_radius + atom_radius` to
//! some projected atom centre. Both detectors answer exactly the same question; the grid only
//! narrows down which atoms need to be looked at.

pub mod exhaustive;
pub mod grid;

use nalgebra::Point2;

pub use exhaustive::ExhaustiveScan;
pub use grid::LookupGrid;

pub trait CollisionDetector {
    /// Re-indexes the detector for the projected centres of a new orientation.
    ///
    /// `projected` must be index-aligned with the radii the detector was built with.
    fn rebuild(&mut self, projected: &[Point2<f64>]);

    fn collides(&self, point: &Point2<f64>) -> bool;
}

/// Tangency does not count as a collision.
#[inline]
pub(crate) fn within_reach(point: &Point2<f64>, centre: &Point2<f64>, reach: f64) -> bool {
    (point - centre).norm_squared() < reach * reach
}
