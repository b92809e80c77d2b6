use super::config::ConfigError;
use crate::core::io::pdb::PdbError;
use crate::core::io::radii::RadiusLibraryError;
use crate::core::models::atom_set::AtomSetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load structure: {source}")]
    Structure {
        #[from]
        source: PdbError,
    },

    #[error("Failed to load radius library: {source}")]
    RadiusLibrary {
        #[from]
        source: RadiusLibraryError,
    },

    #[error("Invalid atom set: {0}")]
    AtomSet(#[from] AtomSetError),

    #[error(
        "At least two orientations are required to estimate the standard error, got {count}"
    )]
    InsufficientOrientations { count: usize },
}
