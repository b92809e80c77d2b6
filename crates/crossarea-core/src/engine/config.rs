use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Which point-in-shape test the estimator uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionStrategy {
    /// Spatial lookup grid; inspects the 3×3 block of cells around each query.
    #[default]
    Grid,
    /// Scans every atom for every query.
    Exhaustive,
}

/// Upper bound on the number of guesses drawn for a single orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuessCap {
    /// `floor(L²)`, with `L` the enlarged box side.
    #[default]
    BoxArea,
    Fixed(u64),
}

impl GuessCap {
    pub fn resolve(&self, box_side: f64) -> u64 {
        match self {
            GuessCap::BoxArea => (box_side * box_side).floor() as u64,
            GuessCap::Fixed(n) => *n,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SamplingConfig {
    pub n_theta_steps: usize,
    pub n_phi_steps_max: usize,
    pub probe_radius: f64,
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorConfig {
    /// Target relative standard error of the hit rate.
    pub convergence_threshold: f64,
    pub min_guesses: u64,
    /// Guesses between two convergence checks.
    pub check_interval: u64,
    /// Guesses between two progress checkpoints.
    pub checkpoint_interval: u64,
    pub guess_cap: GuessCap,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            convergence_threshold: 0.001,
            min_guesses: 100,
            check_interval: 100,
            checkpoint_interval: 1000,
            guess_cap: GuessCap::BoxArea,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub sampling: SamplingConfig,
    pub estimator: EstimatorConfig,
    pub collision_strategy: CollisionStrategy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrossSectionConfig {
    pub structure_path: PathBuf,
    pub radius_library_path: PathBuf,
    pub simulation: SimulationConfig,
}

#[derive(Default)]
pub struct SimulationConfigBuilder {
    n_theta_steps: Option<usize>,
    n_phi_steps_max: Option<usize>,
    probe_radius: Option<f64>,
    seed: Option<u64>,
    estimator: Option<EstimatorConfig>,
    collision_strategy: Option<CollisionStrategy>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn n_theta_steps(mut self, steps: usize) -> Self {
        self.n_theta_steps = Some(steps);
        self
    }
    /// Defaults to twice the theta step count.
    pub fn n_phi_steps_max(mut self, steps: usize) -> Self {
        self.n_phi_steps_max = Some(steps);
        self
    }
    pub fn probe_radius(mut self, radius: f64) -> Self {
        self.probe_radius = Some(radius);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn estimator(mut self, estimator: EstimatorConfig) -> Self {
        self.estimator = Some(estimator);
        self
    }
    pub fn collision_strategy(mut self, strategy: CollisionStrategy) -> Self {
        self.collision_strategy = Some(strategy);
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let n_theta_steps = self
            .n_theta_steps
            .ok_or(ConfigError::MissingParameter("n_theta_steps"))?;
        let n_phi_steps_max = match self.n_phi_steps_max {
            Some(steps) => steps,
            None => n_theta_steps.checked_mul(2).ok_or_else(|| {
                invalid("n_theta_steps", "is too large to derive n_phi_steps_max")
            })?,
        };
        let probe_radius = self
            .probe_radius
            .ok_or(ConfigError::MissingParameter("probe_radius"))?;

        let config = SimulationConfig {
            sampling: SamplingConfig {
                n_theta_steps,
                n_phi_steps_max,
                probe_radius,
                seed: self.seed.unwrap_or(0),
            },
            estimator: self.estimator.unwrap_or_default(),
            collision_strategy: self.collision_strategy.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}

impl SimulationConfig {
    /// Checks every parameter the sampling loop divides or iterates by.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sampling = &self.sampling;
        if sampling.n_theta_steps == 0 {
            return Err(invalid("n_theta_steps", "must be greater than zero"));
        }
        if sampling.n_phi_steps_max == 0 {
            return Err(invalid("n_phi_steps_max", "must be greater than zero"));
        }
        if !sampling.probe_radius.is_finite() || sampling.probe_radius < 0.0 {
            return Err(invalid("probe_radius", "must be a finite, non-negative number"));
        }
        validate_estimator(&self.estimator)
    }
}

fn validate_estimator(estimator: &EstimatorConfig) -> Result<(), ConfigError> {
    if !estimator.convergence_threshold.is_finite() || estimator.convergence_threshold <= 0.0 {
        return Err(invalid("convergence_threshold", "must be a positive number"));
    }
    if estimator.check_interval == 0 {
        return Err(invalid("check_interval", "must be greater than zero"));
    }
    if estimator.checkpoint_interval == 0 {
        return Err(invalid("checkpoint_interval", "must be greater than zero"));
    }
    if estimator.guess_cap == GuessCap::Fixed(0) {
        return Err(invalid("guess_cap", "must be greater than zero"));
    }
    Ok(())
}

fn invalid(name: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        reason: reason.to_string(),
    }
}

#[derive(Default)]
pub struct CrossSectionConfigBuilder {
    structure_path: Option<PathBuf>,
    radius_library_path: Option<PathBuf>,
    simulation: Option<SimulationConfig>,
}

impl CrossSectionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn structure_path(mut self, path: PathBuf) -> Self {
        self.structure_path = Some(path);
        self
    }
    pub fn radius_library_path(mut self, path: PathBuf) -> Self {
        self.radius_library_path = Some(path);
        self
    }
    pub fn simulation(mut self, simulation: SimulationConfig) -> Self {
        self.simulation = Some(simulation);
        self
    }

    pub fn build(self) -> Result<CrossSectionConfig, ConfigError> {
        Ok(CrossSectionConfig {
            structure_path: self
                .structure_path
                .ok_or(ConfigError::MissingParameter("structure_path"))?,
            radius_library_path: self
                .radius_library_path
                .ok_or(ConfigError::MissingParameter("radius_library_path"))?,
            simulation: self
                .simulation
                .ok_or(ConfigError::MissingParameter("simulation"))?,
        })
    }
}
