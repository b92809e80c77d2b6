//! # Workflows Module
//!
//! Top-level entry points that take a configuration from file paths to a finished
//! cross-section estimate.
//!
//! - **Cross Section** ([`cross_section`]) - Loads the radius library and structure, sweeps all
//!   orientations and aggregates the per-orientation areas.

pub mod cross_section;
