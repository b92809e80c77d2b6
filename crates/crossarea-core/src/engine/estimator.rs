use super::config::EstimatorConfig;
use super::detectors::CollisionDetector;
use super::progress::{Progress, ProgressReporter};
use nalgebra::Point2;
use rand::Rng;
use tracing::warn;

/// Outcome of sampling one projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationEstimate {
    /// Guesses actually drawn, which is below the cap when sampling converged.
    pub guesses: u64,
    pub hits: u64,
    pub p_hit: f64,
    pub area: f64,
    pub std_error: f64,
    /// Relative standard error of `p_hit`, undefined when nothing was hit.
    pub error_ratio: Option<f64>,
    pub converged: bool,
}

/// Binomial hit-rate statistics after `guesses` draws.
#[derive(Debug, Clone, Copy, PartialEq)]
struct HitRate {
    p: f64,
    std_dev: f64,
}

impl HitRate {
    fn new(hits: u64, guesses: u64) -> Self {
        if guesses == 0 {
            return Self { p: 0.0, std_dev: 0.0 };
        }
        let n = guesses as f64;
        let p = hits as f64 / n;
        Self {
            p,
            std_dev: (p * (1.0 - p) / n).sqrt(),
        }
    }

    fn error_ratio(&self) -> Option<f64> {
        (self.p > 0.0).then(|| self.std_dev / self.p)
    }

    fn is_degenerate(&self) -> bool {
        self.p == 0.0 || self.p == 1.0
    }
}

/// Estimates the projected area held by `detector` by uniform rejection sampling over the
/// square of side `box_side` centred on the origin.
///
/// Convergence is tested every `check_interval` guesses once `min_guesses` have been drawn;
/// sampling stops when the error ratio drops below the threshold and the hit rate is neither 0
/// nor 1. Otherwise it runs until the guess cap.
pub fn estimate<D: CollisionDetector>(
    detector: &D,
    box_side: f64,
    config: &EstimatorConfig,
    rng: &mut impl Rng,
    reporter: &ProgressReporter,
) -> OrientationEstimate {
    let box_area = box_side * box_side;
    let cap = config.guess_cap.resolve(box_side);
    let mut hits = 0u64;
    let mut guesses = 0u64;
    let mut converged = false;

    while guesses < cap {
        let point = Point2::new(
            (rng.random::<f64>() - 0.5) * box_side,
            (rng.random::<f64>() - 0.5) * box_side,
        );
        guesses += 1;

        // Always true inside the square; retained as the sampling region test.
        if point.x * point.x + point.y * point.y <= box_area && detector.collides(&point) {
            hits += 1;
        }

        let check_due = guesses % config.check_interval == 0;
        let checkpoint_due = guesses % config.checkpoint_interval == 0;
        if guesses < config.min_guesses || !(check_due || checkpoint_due) {
            continue;
        }

        let rate = HitRate::new(hits, guesses);
        let error_ratio = rate.error_ratio();

        if checkpoint_due {
            reporter.report(Progress::SamplingCheckpoint {
                guesses,
                error_ratio: error_ratio.unwrap_or(f64::INFINITY),
                area: box_area * rate.p,
            });
        }

        if check_due
            && error_ratio.is_some_and(|ratio| ratio < config.convergence_threshold)
            && !rate.is_degenerate()
        {
            converged = true;
            break;
        }
    }

    if guesses == 0 {
        warn!(box_side, "Guess cap is zero for this box; no samples were drawn.");
    }

    let rate = HitRate::new(hits, guesses);
    OrientationEstimate {
        guesses,
        hits,
        p_hit: rate.p,
        area: box_area * rate.p,
        std_error: box_area * rate.std_dev,
        error_ratio: rate.error_ratio(),
        converged,
    }
}
