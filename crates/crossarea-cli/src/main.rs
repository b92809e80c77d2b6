mod cli;
mod config;
mod error;
mod logging;
mod report;
mod utils;

use crate::cli::Cli;
use crate::config::PartialRunConfig;
use crate::error::Result;
use crate::report::ReportWriter;
use crate::utils::progress::{OrientationBar, fan_out};
use clap::Parser;
use crossarea::engine::progress::ProgressReporter;
use crossarea::workflows;
use tracing::{debug, error, info};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    if let Err(e) = run_app(cli) {
        error!("Run failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app(cli: Cli) -> Result<()> {
    logging::setup_logging(cli.verbose, cli.quiet)?;
    info!("crossarea CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let file_config = match &cli.config {
        Some(path) => PartialRunConfig::from_file(path)?,
        None => PartialRunConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = file_config.merge_with_cli(&cli)?;

    let verbose = cli.verbose > 0;
    let report = match &cli.log_file {
        Some(path) => ReportWriter::create(path, verbose)?,
        None => ReportWriter::stdout(verbose),
    };
    if verbose {
        report.write_line("Verbose output engaged!")?;
    }

    // Progress bar on stderr while the report goes to a file.
    let callback = if cli.log_file.is_some() && !cli.quiet {
        let bar = OrientationBar::new();
        fan_out(vec![bar.callback(), report.get_callback()])
    } else {
        report.get_callback()
    };
    let reporter = ProgressReporter::with_callback(callback);

    let result = workflows::cross_section::run(&config, &reporter)?;
    drop(reporter);
    report.flush()?;

    info!(
        mean_area = result.mean_area,
        ese = result.ese,
        orientations = result.orientation_count,
        "Cross-section calculation finished."
    );
    if let Some(path) = &cli.log_file {
        println!(
            "Mean area: {} (ESE {}), report written to {}",
            result.mean_area,
            result.ese,
            path.display()
        );
    }

    Ok(())
}
