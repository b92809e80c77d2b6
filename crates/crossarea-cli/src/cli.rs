use clap::{Parser, ValueEnum};
use crossarea::engine::config::CollisionStrategy;
use serde::Deserialize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "crossarea - Monte-Carlo estimate of the orientation-averaged cross-sectional area of a molecule as seen by a spherical probe.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    // --- Inputs ---
    /// Path to the input structure file (PDB ATOM/HETATM records).
    #[arg(short, long, visible_alias = "infile", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Path to the per-element radius library (CSV with an `element,radius` header).
    #[arg(short, long, visible_alias = "radlib", value_name = "PATH")]
    pub radius_library: Option<PathBuf>,

    /// Optional TOML configuration file. Command-line flags take precedence over its values.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Sampling ---
    /// Number of polar (theta) steps.
    #[arg(short, long, visible_alias = "anglesteps", value_name = "INT")]
    pub angle_steps: Option<usize>,

    /// Maximum number of azimuthal (phi) steps per polar step. Defaults to twice the angle steps.
    #[arg(long, value_name = "INT")]
    pub phi_steps_max: Option<usize>,

    /// Radius of the probe particle, in the units of the structure coordinates.
    #[arg(short = 'g', long, visible_alias = "gasradius", value_name = "FLOAT")]
    pub probe_radius: Option<f64>,

    /// Seed for the random number generator.
    #[arg(short, long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Point-in-shape test used while sampling.
    #[arg(long, value_enum, value_name = "STRATEGY")]
    pub collision: Option<CollisionMode>,

    /// Fixed number of guesses per orientation. Defaults to the square of the box side.
    #[arg(long, value_name = "INT")]
    pub guess_cap: Option<u64>,

    // --- Output ---
    /// Write the area report to this file instead of standard output.
    #[arg(short, long, visible_alias = "logfile", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Increase verbosity (-v adds per-orientation report lines and INFO logs, -vv DEBUG, -vvv TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionMode {
    /// Spatial lookup grid over the projection plane.
    Grid,
    /// Test every atom for every sampled point.
    Exhaustive,
}

impl From<CollisionMode> for CollisionStrategy {
    fn from(mode: CollisionMode) -> Self {
        match mode {
            CollisionMode::Grid => CollisionStrategy::Grid,
            CollisionMode::Exhaustive => CollisionStrategy::Exhaustive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_flags() {
        let cli = Cli::try_parse_from([
            "crossarea",
            "--input",
            "mol.pdb",
            "--radius-library",
            "radii.csv",
            "--angle-steps",
            "12",
            "--probe-radius",
            "1.2",
            "--seed",
            "99",
            "--collision",
            "exhaustive",
        ])
        .unwrap();

        assert_eq!(cli.input, Some(PathBuf::from("mol.pdb")));
        assert_eq!(cli.radius_library, Some(PathBuf::from("radii.csv")));
        assert_eq!(cli.angle_steps, Some(12));
        assert_eq!(cli.probe_radius, Some(1.2));
        assert_eq!(cli.seed, Some(99));
        assert_eq!(cli.collision, Some(CollisionMode::Exhaustive));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn accepts_legacy_flag_spellings() {
        let cli = Cli::try_parse_from([
            "crossarea",
            "--infile",
            "mol.pdb",
            "--radlib",
            "radii.csv",
            "--anglesteps",
            "6",
            "--gasradius",
            "0.5",
            "--logfile",
            "out.log",
        ])
        .unwrap();

        assert_eq!(cli.input, Some(PathBuf::from("mol.pdb")));
        assert_eq!(cli.angle_steps, Some(6));
        assert_eq!(cli.probe_radius, Some(0.5));
        assert_eq!(cli.log_file, Some(PathBuf::from("out.log")));
    }

    #[test]
    fn parses_short_flags() {
        let cli = Cli::try_parse_from([
            "crossarea", "-i", "mol.pdb", "-r", "radii.csv", "-a", "3", "-g", "1.0", "-s", "5",
            "-l", "out.log", "-vv",
        ])
        .unwrap();

        assert_eq!(cli.angle_steps, Some(3));
        assert_eq!(cli.seed, Some(5));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["crossarea", "-q", "-v"]).is_err());
    }

    #[test]
    fn rejects_unknown_collision_strategy() {
        assert!(Cli::try_parse_from(["crossarea", "--collision", "octree"]).is_err());
    }

    #[test]
    fn collision_mode_maps_to_core_strategy() {
        assert_eq!(
            CollisionStrategy::from(CollisionMode::Grid),
            CollisionStrategy::Grid
        );
        assert_eq!(
            CollisionStrategy::from(CollisionMode::Exhaustive),
            CollisionStrategy::Exhaustive
        );
    }
}
