use nalgebra::{Matrix2x3, Point2, Point3, Rotation3, Vector3};

/// Rotation by `theta` radians about the x axis.
///
/// Equivalent to `[1 0 0; 0 cos -sin; 0 sin cos]`.
pub fn theta_rotation(theta: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), theta)
}

/// Rotation by `phi` radians about the y axis followed by an orthographic projection onto the
/// x-y plane.
///
/// These are the first two rows of the y-axis rotation: `[cos 0 sin; 0 1 0]`.
pub fn phi_projection(phi: f64) -> Matrix2x3<f64> {
    let (sin, cos) = phi.sin_cos();
    Matrix2x3::new(cos, 0.0, sin, 0.0, 1.0, 0.0)
}

#[inline]
pub fn project(projection: &Matrix2x3<f64>, point: &Point3<f64>) -> Point2<f64> {
    Point2::from(projection * point.coords)
}
