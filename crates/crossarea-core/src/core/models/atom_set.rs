use nalgebra::{Point3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AtomSetError {
    #[error("Atom set must contain at least one atom")]
    Empty,
    #[error("Coordinate count ({coords}) does not match radius count ({radii})")]
    LengthMismatch { coords: usize, radii: usize },
    #[error("Atom {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },
    #[error("Atom {index} has an invalid radius: {radius}")]
    InvalidRadius { index: usize, radius: f64 },
    #[error("Invalid box side: {0}")]
    InvalidBoxSide(f64),
}

/// An immutable table of atom centres and radii.
///
/// Coordinates and radii are index-aligned and the indices stay stable for the lifetime of the
/// set. The box side `L` is the side of the square, centred on the origin, that contains the
/// projection of every atom centre for any viewing orientation. The simulation never mutates the
/// set; the probe-dependent enlargement of the box is computed per run (see
/// [`AtomSet::enlarged_box_side`]).
#[derive(Debug, Clone, PartialEq)]
pub struct AtomSet {
    coords: Vec<Point3<f64>>,
    radii: Vec<f64>,
    box_side: f64,
    largest_radius: f64,
}

impl AtomSet {
    /// Builds a set whose box side is derived from the coordinates as given.
    ///
    /// The box side is twice the largest distance of any atom centre from the origin, so every
    /// rotation about the origin keeps the projected centres inside `[-L/2, L/2]²`.
    pub fn new(coords: Vec<Point3<f64>>, radii: Vec<f64>) -> Result<Self, AtomSetError> {
        Self::validate(&coords, &radii)?;
        let box_side = 2.0 * max_distance_from(&coords, &Point3::origin());
        Self::with_box_side(coords, radii, box_side)
    }

    /// Builds a set with an explicit box side.
    pub fn with_box_side(
        coords: Vec<Point3<f64>>,
        radii: Vec<f64>,
        box_side: f64,
    ) -> Result<Self, AtomSetError> {
        Self::validate(&coords, &radii)?;
        if !box_side.is_finite() || box_side < 0.0 {
            return Err(AtomSetError::InvalidBoxSide(box_side));
        }
        let largest_radius = radii.iter().copied().fold(0.0, f64::max);
        Ok(Self {
            coords,
            radii,
            box_side,
            largest_radius,
        })
    }

    /// Builds a set translated so that its geometric centroid sits at the origin.
    pub fn centered(coords: Vec<Point3<f64>>, radii: Vec<f64>) -> Result<Self, AtomSetError> {
        Self::validate(&coords, &radii)?;
        let centroid = centroid(&coords);
        let shifted = coords.iter().map(|p| p - centroid).collect();
        Self::new(shifted, radii)
    }

    fn validate(coords: &[Point3<f64>], radii: &[f64]) -> Result<(), AtomSetError> {
        if coords.len() != radii.len() {
            return Err(AtomSetError::LengthMismatch {
                coords: coords.len(),
                radii: radii.len(),
            });
        }
        if coords.is_empty() {
            return Err(AtomSetError::Empty);
        }
        if let Some(index) = coords
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()))
        {
            return Err(AtomSetError::NonFiniteCoordinate { index });
        }
        if let Some((index, &radius)) = radii
            .iter()
            .enumerate()
            .find(|(_, r)| !r.is_finite() || **r < 0.0)
        {
            return Err(AtomSetError::InvalidRadius { index, radius });
        }
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    #[inline]
    pub fn coords(&self) -> &[Point3<f64>] {
        &self.coords
    }

    #[inline]
    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    #[inline]
    pub fn box_side(&self) -> f64 {
        self.box_side
    }

    #[inline]
    pub fn largest_radius(&self) -> f64 {
        self.largest_radius
    }

    /// Box side grown by `2 × (probe_radius + largest_radius)`.
    ///
    /// The margin lets a probe centred anywhere within reach of an edge atom still be sampled.
    /// Every run calls this once on its own copy of the value, so repeated runs over the same set
    /// never compound the enlargement.
    pub fn enlarged_box_side(&self, probe_radius: f64) -> f64 {
        self.box_side + 2.0 * (probe_radius + self.largest_radius)
    }
}

fn centroid(coords: &[Point3<f64>]) -> Vector3<f64> {
    let sum = coords
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    sum / coords.len() as f64
}

fn max_distance_from(coords: &[Point3<f64>], center: &Point3<f64>) -> f64 {
    coords
        .iter()
        .map(|p| (p - center).norm())
        .fold(0.0, f64::max)
}
