//! # CrossArea Core Library
//!
//! Estimates the rotationally averaged, two-dimensional projected area of a rigid set of
//! spheres as seen by a probe particle of a given radius. The estimate is a Monte-Carlo
//! simulation over systematically sampled viewing orientations, which makes it suitable for
//! predicting collision cross sections of molecular structures.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** The immutable atom dataset (`AtomSet`), readers for
//!   structure files and radius libraries, and the rotation/projection geometry.
//!
//! - **[`engine`]: The Logic Core.** Orientation sampling, collision detection (a spatial
//!   lookup grid and an exhaustive scan behind a common trait), the sequential-stopping
//!   Monte-Carlo estimator and the aggregator that folds per-orientation estimates into a mean
//!   area and its estimated standard error.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together into a complete
//!   simulation run, either from an in-memory `AtomSet` or straight from files on disk.

pub mod core;
pub mod engine;
pub mod workflows;
