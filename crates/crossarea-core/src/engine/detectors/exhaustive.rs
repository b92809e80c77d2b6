use super::{CollisionDetector, within_reach};
use nalgebra::Point2;

/// Tests every atom for every query. Linear in the atom count; used as the reference the lookup
/// grid is checked against.
#[derive(Debug, Clone)]
pub struct ExhaustiveScan<'a> {
    radii: &'a [f64],
    probe_radius: f64,
    positions: Vec<Point2<f64>>,
}

impl<'a> ExhaustiveScan<'a> {
    pub fn new(radii: &'a [f64], probe_radius: f64) -> Self {
        Self {
            radii,
            probe_radius,
            positions: Vec::with_capacity(radii.len()),
        }
    }
}

impl CollisionDetector for ExhaustiveScan<'_> {
    fn rebuild(&mut self, projected: &[Point2<f64>]) {
        self.positions.clear();
        self.positions.extend_from_slice(projected);
    }

    fn collides(&self, point: &Point2<f64>) -> bool {
        self.positions
            .iter()
            .zip(self.radii)
            .any(|(centre, radius)| within_reach(point, centre, self.probe_radius + radius))
    }
}
