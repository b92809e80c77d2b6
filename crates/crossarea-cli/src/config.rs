pub mod defaults;

use crate::cli::{Cli, CollisionMode};
use crate::error::{CliError, Result};
use crossarea::engine::config::{
    CrossSectionConfig, CrossSectionConfigBuilder, EstimatorConfig, GuessCap,
    SimulationConfigBuilder,
};
use defaults::DefaultsConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialSamplingConfig {
    angle_steps: Option<usize>,
    phi_steps_max: Option<usize>,
    probe_radius: Option<f64>,
    seed: Option<u64>,
    collision: Option<CollisionMode>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialEstimatorConfig {
    convergence_threshold: Option<f64>,
    min_guesses: Option<u64>,
    check_interval: Option<u64>,
    checkpoint_interval: Option<u64>,
    guess_cap: Option<u64>,
}

/// Contents of a `--config` TOML file. Every field is optional.
///
/// ```toml
/// input = "molecule.pdb"
/// radius-library = "radii.csv"
///
/// [sampling]
/// angle-steps = 10
/// probe-radius = 1.0
///
/// [estimator]
/// convergence-threshold = 0.001
/// ```
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialRunConfig {
    input: Option<PathBuf>,
    radius_library: Option<PathBuf>,
    sampling: Option<PartialSamplingConfig>,
    estimator: Option<PartialEstimatorConfig>,
}

impl PartialRunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Resolves every run parameter as command line, then file, then built-in default.
    pub fn merge_with_cli(self, args: &Cli) -> Result<CrossSectionConfig> {
        let defaults = DefaultsConfig::default();
        let sampling = self.sampling.unwrap_or_default();

        let required = |name: &str| {
            CliError::Config(format!(
                "A value for '{}' is required either in the config file or via CLI argument.",
                name
            ))
        };

        let structure_path = args
            .input
            .clone()
            .or(self.input)
            .ok_or_else(|| required("input"))?;
        let radius_library_path = args
            .radius_library
            .clone()
            .or(self.radius_library)
            .ok_or_else(|| required("radius-library"))?;
        let angle_steps = args
            .angle_steps
            .or(sampling.angle_steps)
            .ok_or_else(|| required("angle-steps"))?;
        let probe_radius = args
            .probe_radius
            .or(sampling.probe_radius)
            .ok_or_else(|| required("probe-radius"))?;

        let mut builder = SimulationConfigBuilder::new()
            .n_theta_steps(angle_steps)
            .probe_radius(probe_radius)
            .seed(args.seed.or(sampling.seed).unwrap_or(defaults.seed))
            .collision_strategy(
                args.collision
                    .or(sampling.collision)
                    .unwrap_or(defaults.collision)
                    .into(),
            )
            .estimator(Self::merge_estimator(
                self.estimator.unwrap_or_default(),
                args.guess_cap,
                defaults.estimator,
            ));
        if let Some(steps) = args.phi_steps_max.or(sampling.phi_steps_max) {
            builder = builder.n_phi_steps_max(steps);
        }

        let simulation = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        CrossSectionConfigBuilder::new()
            .structure_path(structure_path)
            .radius_library_path(radius_library_path)
            .simulation(simulation)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    fn merge_estimator(
        partial: PartialEstimatorConfig,
        cli_guess_cap: Option<u64>,
        defaults: EstimatorConfig,
    ) -> EstimatorConfig {
        EstimatorConfig {
            convergence_threshold: partial
                .convergence_threshold
                .unwrap_or(defaults.convergence_threshold),
            min_guesses: partial.min_guesses.unwrap_or(defaults.min_guesses),
            check_interval: partial.check_interval.unwrap_or(defaults.check_interval),
            checkpoint_interval: partial
                .checkpoint_interval
                .unwrap_or(defaults.checkpoint_interval),
            guess_cap: cli_guess_cap
                .or(partial.guess_cap)
                .map_or(defaults.guess_cap, GuessCap::Fixed),
        }
    }
}
