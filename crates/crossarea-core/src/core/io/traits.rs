use super::radii::RadiusLibrary;
use crate::core::models::atom_set::AtomSet;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading atomic structure formats into an [`AtomSet`].
///
/// Readers resolve each atom's radius through a [`RadiusLibrary`] and hand back a set whose
/// centroid sits at the origin, ready for the simulation engine.
pub trait StructureFile {
    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads an atom set from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    /// * `radii` - The per-element radius lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails, an element has no radius, or I/O fails.
    fn read_from(reader: &mut impl BufRead, radii: &RadiusLibrary) -> Result<AtomSet, Self::Error>;

    /// Reads an atom set from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
        radii: &RadiusLibrary,
    ) -> Result<AtomSet, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, radii)
    }
}
