//! # Core Module
//!
//! Fundamental building blocks consumed by the simulation engine.
//!
//! - **Atom Dataset** ([`models`]) - The read-only table of atom centres and radii
//! - **File I/O** ([`io`]) - Structure file and radius library readers
//! - **Geometry** ([`utils`]) - Viewing rotations and the orthographic projection

pub mod io;
pub mod models;
pub mod utils;
