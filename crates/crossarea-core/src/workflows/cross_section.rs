use crate::core::io::pdb::PdbFile;
use crate::core::io::radii::RadiusLibrary;
use crate::core::io::traits::StructureFile;
use crate::core::models::atom_set::AtomSet;
use crate::engine::aggregator::Aggregator;
use crate::engine::config::{CollisionStrategy, CrossSectionConfig, SimulationConfig};
use crate::engine::detectors::{CollisionDetector, ExhaustiveScan, LookupGrid};
use crate::engine::error::EngineError;
use crate::engine::estimator::{self, OrientationEstimate};
use crate::engine::orientation::{OrientationSampler, Projector};
use crate::engine::progress::{Progress, ProgressReporter};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct OrientationRecord {
    pub theta: f64,
    pub phi: f64,
    pub estimate: OrientationEstimate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrossSectionResult {
    pub mean_area: f64,
    /// Estimated standard error of the mean area.
    pub ese: f64,
    pub orientation_count: usize,
    /// Enlarged box side the sampling ran in.
    pub box_side: f64,
    pub orientations: Vec<OrientationRecord>,
}

/// Loads the radius library and structure named in `config` and estimates the cross section.
#[instrument(skip_all, name = "cross_section_workflow")]
pub fn run(
    config: &CrossSectionConfig,
    reporter: &ProgressReporter,
) -> Result<CrossSectionResult, EngineError> {
    reporter.report(Progress::PhaseStart { name: "Loading" });
    reporter.report(Progress::Message(format!(
        "Reading coordinates from file \"{}\" and radii from \"{}\"",
        config.structure_path.display(),
        config.radius_library_path.display()
    )));

    let radii = RadiusLibrary::load(&config.radius_library_path)?;
    let atoms = PdbFile::read_from_path(&config.structure_path, &radii)?;
    info!(
        atoms = atoms.len(),
        box_side = atoms.box_side(),
        elements = radii.len(),
        "Structure loaded."
    );
    reporter.report(Progress::PhaseFinish);

    simulate(&atoms, &config.simulation, reporter)
}

/// Estimates the orientation-averaged cross section of an atom set already in memory.
///
/// The atom set is only read; running twice with the same configuration yields identical
/// results.
#[instrument(skip_all, name = "cross_section_simulation", fields(atoms = atoms.len()))]
pub fn simulate(
    atoms: &AtomSet,
    config: &SimulationConfig,
    reporter: &ProgressReporter,
) -> Result<CrossSectionResult, EngineError> {
    config.validate()?;
    let probe_radius = config.sampling.probe_radius;
    let box_side = atoms.enlarged_box_side(probe_radius);

    match config.collision_strategy {
        CollisionStrategy::Grid => {
            let mut detector = LookupGrid::new(atoms.radii(), probe_radius, box_side);
            sweep(atoms, &mut detector, box_side, config, reporter)
        }
        CollisionStrategy::Exhaustive => {
            let mut detector = ExhaustiveScan::new(atoms.radii(), probe_radius);
            sweep(atoms, &mut detector, box_side, config, reporter)
        }
    }
}

fn sweep<D: CollisionDetector>(
    atoms: &AtomSet,
    detector: &mut D,
    box_side: f64,
    config: &SimulationConfig,
    reporter: &ProgressReporter,
) -> Result<CrossSectionResult, EngineError> {
    let sampler = OrientationSampler::new(
        config.sampling.n_theta_steps,
        config.sampling.n_phi_steps_max,
    );
    let total = sampler.orientation_count();
    if total < 2 {
        return Err(EngineError::InsufficientOrientations { count: total });
    }

    reporter.report(Progress::PhaseStart { name: "Sampling" });
    reporter.report(Progress::Message(
        "Starting Monte-Carlo area measurement.".to_string(),
    ));
    info!(
        orientations = total,
        box_side,
        seed = config.sampling.seed,
        "Starting Monte-Carlo area measurement."
    );
    reporter.report(Progress::TaskStart {
        total_steps: total as u64,
    });

    let mut rng = ChaCha8Rng::seed_from_u64(config.sampling.seed);
    let mut projector = Projector::new(atoms);
    let mut aggregator = Aggregator::new();
    let mut records = Vec::with_capacity(total);

    for step in sampler.theta_steps() {
        projector.rotate(step.theta);
        for phi in step.phi_angles() {
            reporter.report(Progress::OrientationStart {
                theta: step.theta,
                phi,
            });
            detector.rebuild(projector.project(phi));

            let estimate =
                estimator::estimate(detector, box_side, &config.estimator, &mut rng, reporter);
            debug!(
                theta = step.theta,
                phi,
                guesses = estimate.guesses,
                area = estimate.area,
                converged = estimate.converged,
                "Orientation sampled."
            );
            reporter.report(Progress::OrientationFinish {
                area: estimate.area,
                std_error: estimate.std_error,
                guesses: estimate.guesses,
                converged: estimate.converged,
            });

            aggregator.add(estimate.area, estimate.std_error);
            records.push(OrientationRecord {
                theta: step.theta,
                phi,
                estimate,
            });
            reporter.report(Progress::TaskIncrement);
        }
    }
    reporter.report(Progress::TaskFinish);

    let section = aggregator.finish()?;
    reporter.report(Progress::Summary {
        mean_area: section.mean_area,
        ese: section.ese,
        orientations: section.orientations,
    });
    reporter.report(Progress::PhaseFinish);
    info!(
        mean_area = section.mean_area,
        ese = section.ese,
        "Cross-section estimate complete."
    );

    Ok(CrossSectionResult {
        mean_area: section.mean_area,
        ese: section.ese,
        orientation_count: section.orientations,
        box_side,
        orientations: records,
    })
}
