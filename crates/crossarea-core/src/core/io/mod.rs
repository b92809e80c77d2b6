//! Input functionality for atomic structures.
//!
//! Structure files are read through the [`traits::StructureFile`] interface, with every atom's
//! radius resolved from a [`radii::RadiusLibrary`].

pub mod pdb;
pub mod radii;
pub mod traits;
