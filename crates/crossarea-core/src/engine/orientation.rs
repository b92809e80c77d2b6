use crate::core::models::atom_set::AtomSet;
use crate::core::utils::geometry::{phi_projection, project, theta_rotation};
use nalgebra::{Point2, Point3};
use std::f64::consts::PI;

/// One polar step of the orientation scheme, with the number of azimuthal samples it carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThetaStep {
    pub index: usize,
    pub theta: f64,
    pub n_phi_steps: usize,
}

impl ThetaStep {
    /// `phi = 2π·j/n` for `j = 1..=n`.
    pub fn phi_angles(self) -> impl Iterator<Item = f64> {
        let n = self.n_phi_steps;
        (1..=n).map(move |step| 2.0 * PI * step as f64 / n as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub theta: f64,
    pub phi: f64,
}

/// Deterministic coverage of viewing directions.
///
/// `theta_k = π·k/n` for `k = 1..=n`. Each polar step takes `max(1, floor(m·sin θ))` azimuthal
/// samples, so sampling thins out towards the poles and collapses to one sample there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationSampler {
    n_theta_steps: usize,
    n_phi_steps_max: usize,
}

impl OrientationSampler {
    pub fn new(n_theta_steps: usize, n_phi_steps_max: usize) -> Self {
        Self {
            n_theta_steps,
            n_phi_steps_max,
        }
    }

    pub fn theta_steps(self) -> impl Iterator<Item = ThetaStep> {
        let n_theta = self.n_theta_steps;
        let n_phi_max = self.n_phi_steps_max;
        (1..=n_theta).map(move |index| {
            let theta = PI * index as f64 / n_theta as f64;
            ThetaStep {
                index,
                theta,
                n_phi_steps: phi_step_count(theta, n_phi_max),
            }
        })
    }

    pub fn orientations(self) -> impl Iterator<Item = Orientation> {
        self.theta_steps().flat_map(|step| {
            step.phi_angles().map(move |phi| Orientation {
                theta: step.theta,
                phi,
            })
        })
    }

    /// Total number of orientations across all polar steps.
    pub fn orientation_count(self) -> usize {
        self.theta_steps().map(|step| step.n_phi_steps).sum()
    }
}

fn phi_step_count(theta: f64, n_phi_steps_max: usize) -> usize {
    let steps = (n_phi_steps_max as f64 * theta.sin()).floor() as usize;
    steps.max(1)
}

/// Projects an atom set into the viewing plane for successive orientations.
///
/// The theta rotation is applied once per polar step and cached; every phi step then only
/// rotates about y and drops the depth axis. Both buffers are allocated once and overwritten.
pub struct Projector<'a> {
    atoms: &'a AtomSet,
    rotated: Vec<Point3<f64>>,
    projected: Vec<Point2<f64>>,
}

impl<'a> Projector<'a> {
    pub fn new(atoms: &'a AtomSet) -> Self {
        Self {
            atoms,
            rotated: atoms.coords().to_vec(),
            projected: vec![Point2::origin(); atoms.len()],
        }
    }

    pub fn rotate(&mut self, theta: f64) {
        let rotation = theta_rotation(theta);
        for (rotated, original) in self.rotated.iter_mut().zip(self.atoms.coords()) {
            *rotated = rotation * original;
        }
    }

    pub fn project(&mut self, phi: f64) -> &[Point2<f64>] {
        let projection = phi_projection(phi);
        for (projected, rotated) in self.projected.iter_mut().zip(&self.rotated) {
            *projected = project(&projection, rotated);
        }
        &self.projected
    }

    #[inline]
    pub fn projected(&self) -> &[Point2<f64>] {
        &self.projected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theta_spans_the_half_turn_ending_at_pi() {
        let thetas: Vec<f64> = OrientationSampler::new(4, 8)
            .theta_steps()
            .map(|s| s.theta)
            .collect();
        assert_eq!(thetas.len(), 4);
        assert!((thetas[0] - PI / 4.0).abs() < 1e-12);
        assert!((thetas[3] - PI).abs() < 1e-12);
    }

    #[test]
    fn phi_steps_follow_sine_and_collapse_at_the_pole() {
        let counts: Vec<usize> = OrientationSampler::new(4, 8)
            .theta_steps()
            .map(|s| s.n_phi_steps)
            .collect();
        // floor(8·sin θ) for θ = π/4, π/2, 3π/4, π
        assert_eq!(counts, vec![5, 8, 5, 1]);
    }

    #[test]
    fn orientation_count_matches_enumeration() {
        let sampler = OrientationSampler::new(7, 14);
        assert_eq!(sampler.orientation_count(), sampler.orientations().count());
    }

    #[test]
    fn single_theta_step_yields_one_orientation() {
        let sampler = OrientationSampler::new(1, 2);
        assert_eq!(sampler.orientation_count(), 1);
    }

    #[test]
    fn phi_angles_end_at_a_full_turn() {
        let step = ThetaStep {
            index: 1,
            theta: PI / 2.0,
            n_phi_steps: 4,
        };
        let phis: Vec<f64> = step.phi_angles().collect();
        assert_eq!(phis.len(), 4);
        assert!((phis[0] - PI / 2.0).abs() < 1e-12);
        assert!((phis[3] - 2.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn atoms_on_the_theta_axis_project_independently_of_theta() {
        let atoms = AtomSet::new(
            vec![Point3::new(-2.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)],
            vec![1.0, 1.0],
        )
        .unwrap();
        let mut projector = Projector::new(&atoms);
        let phi = 1.1;

        projector.rotate(0.3);
        let first = projector.project(phi).to_vec();
        projector.rotate(2.4);
        let second = projector.project(phi).to_vec();

        for (a, b) in first.iter().zip(&second) {
            assert!((a - b).norm() < 1e-12);
        }
    }

    #[test]
    fn atoms_off_the_theta_axis_project_differently_per_theta() {
        let atoms = AtomSet::new(
            vec![Point3::new(0.0, -3.0, 0.0), Point3::new(0.0, 3.0, 0.0)],
            vec![1.0, 1.0],
        )
        .unwrap();
        let mut projector = Projector::new(&atoms);
        let phi = 2.0 * PI;

        projector.rotate(PI / 2.0);
        let end_on = projector.project(phi).to_vec();
        projector.rotate(PI);
        let face_on = projector.project(phi).to_vec();

        assert!((end_on[1] - end_on[0]).norm() < 1e-9);
        assert!(((face_on[1] - face_on[0]).norm() - 6.0).abs() < 1e-9);
    }
}
