use crate::cli::CollisionMode;
use crossarea::engine::config::EstimatorConfig;

/// Values used when neither the command line nor the config file sets them.
pub struct DefaultsConfig {
    pub seed: u64,
    pub collision: CollisionMode,
    pub estimator: EstimatorConfig,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            collision: CollisionMode::Grid,
            estimator: EstimatorConfig::default(),
        }
    }
}
