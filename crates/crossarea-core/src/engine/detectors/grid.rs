use super::{CollisionDetector, within_reach};
use nalgebra::Point2;
use tracing::debug;

const NO_ATOM: usize = usize::MAX;

/// Cells per axis beyond which the cell size is widened instead of growing the grid.
///
/// A widened cell is still at least as wide as the interaction radius, so lookups stay exact.
const MAX_CELLS_PER_AXIS: usize = 1024;

/// A square lookup grid over the projection plane.
///
/// Cells are as wide as the largest possible interaction radius (`probe + largest atom radius`),
/// so any atom that can collide with a query point sits in the query's cell or one of its eight
/// neighbours. Each cell holds an intrusive singly linked list of atom indices: `heads` stores
/// the first atom of every cell and `next` chains the rest, with [`NO_ATOM`] terminating a list.
/// Node storage is one slot per atom, allocated once and relinked on every rebuild.
///
/// Atoms and queries outside the grid are clamped to the nearest edge cell. Clamping never
/// moves two cells further apart, so the 3×3 search stays exact.
#[derive(Debug, Clone)]
pub struct LookupGrid<'a> {
    radii: &'a [f64],
    probe_radius: f64,
    cell_size: f64,
    half_side: f64,
    dims: usize,
    heads: Vec<usize>,
    next: Vec<usize>,
    positions: Vec<Point2<f64>>,
}

impl<'a> LookupGrid<'a> {
    /// Creates an empty grid covering `[-box_side/2, box_side/2]²`.
    pub fn new(radii: &'a [f64], probe_radius: f64, box_side: f64) -> Self {
        let largest_radius = radii.iter().copied().fold(0.0, f64::max);
        let interaction_radius = probe_radius + largest_radius;

        let (cell_size, dims) = if interaction_radius > 0.0 {
            let cell_size = interaction_radius.max(box_side / (MAX_CELLS_PER_AXIS - 1) as f64);
            (cell_size, 1 + (box_side / cell_size).floor() as usize)
        } else {
            // Nothing can collide; a single cell keeps lookups trivial.
            (0.0, 1)
        };
        debug!(cell_size, dims, atoms = radii.len(), "Allocating lookup grid.");

        Self {
            radii,
            probe_radius,
            cell_size,
            half_side: 0.5 * box_side,
            dims,
            heads: vec![NO_ATOM; dims * dims],
            next: vec![NO_ATOM; radii.len()],
            positions: vec![Point2::origin(); radii.len()],
        }
    }

    #[inline]
    pub fn dims(&self) -> usize {
        self.dims
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Cell coordinates `(i, j)` of a point, clamped into the grid.
    pub fn cell_of(&self, point: &Point2<f64>) -> (usize, usize) {
        (self.axis_index(point.x), self.axis_index(point.y))
    }

    #[inline]
    fn axis_index(&self, value: f64) -> usize {
        if self.cell_size <= 0.0 {
            return 0;
        }
        let index = ((value + self.half_side) / self.cell_size).floor();
        // NaN saturates to 0 on the cast.
        index.clamp(0.0, (self.dims - 1) as f64) as usize
    }

    /// Atom indices currently linked into cell `(i, j)`, in list order.
    pub fn cell_members(&self, i: usize, j: usize) -> CellMembers<'_> {
        CellMembers {
            next: &self.next,
            current: self.heads[i * self.dims + j],
        }
    }

    fn cell_collides(&self, cell: usize, point: &Point2<f64>) -> bool {
        let mut atom = self.heads[cell];
        while atom != NO_ATOM {
            if within_reach(
                point,
                &self.positions[atom],
                self.probe_radius + self.radii[atom],
            ) {
                return true;
            }
            atom = self.next[atom];
        }
        false
    }
}

impl CollisionDetector for LookupGrid<'_> {
    fn rebuild(&mut self, projected: &[Point2<f64>]) {
        self.heads.fill(NO_ATOM);
        for (atom, position) in projected.iter().enumerate() {
            let (i, j) = self.cell_of(position);
            let cell = i * self.dims + j;
            self.next[atom] = self.heads[cell];
            self.heads[cell] = atom;
            self.positions[atom] = *position;
        }
    }

    fn collides(&self, point: &Point2<f64>) -> bool {
        let (i, j) = self.cell_of(point);
        if self.cell_collides(i * self.dims + j, point) {
            return true;
        }

        let last = self.dims - 1;
        for ni in i.saturating_sub(1)..=(i + 1).min(last) {
            for nj in j.saturating_sub(1)..=(j + 1).min(last) {
                if (ni, nj) != (i, j) && self.cell_collides(ni * self.dims + nj, point) {
                    return true;
                }
            }
        }
        false
    }
}

pub struct CellMembers<'g> {
    next: &'g [usize],
    current: usize,
}

impl Iterator for CellMembers<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.current == NO_ATOM {
            return None;
        }
        let atom = self.current;
        self.current = self.next[atom];
        Some(atom)
    }
}
