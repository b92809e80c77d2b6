//! # Engine Module
//!
//! The Monte-Carlo machinery behind a cross-section estimate: orientation sampling, projection,
//! point-in-shape tests, per-orientation area estimation and aggregation across orientations.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Sampling and convergence parameters with builder validation
//! - **Orientations** ([`orientation`]) - The polar/azimuthal viewing scheme and atom projection
//! - **Detectors** ([`detectors`]) - Lookup grid and exhaustive scan behind one trait
//! - **Estimation** ([`estimator`]) - Rejection sampling with a relative-error stopping rule
//! - **Aggregation** ([`aggregator`]) - Mean area and estimated standard error over orientations
//! - **Progress Monitoring** ([`progress`]) - Event callbacks for front ends
//! - **Error Handling** ([`error`]) - Engine-level error type
//!
//! The engine is single-threaded and fully deterministic for a given seed.

pub mod aggregator;
pub mod config;
pub mod detectors;
pub mod error;
pub mod estimator;
pub mod orientation;
pub mod progress;
