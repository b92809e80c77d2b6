use crate::error::{CliError, Result};
use crossarea::engine::progress::{Progress, ProgressCallback};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Renders engine progress events as the plain-text area report.
///
/// Per-orientation angle and checkpoint lines only appear when verbose; orientation results and
/// the final summary are always written.
#[derive(Clone)]
pub struct ReportWriter {
    out: SharedWriter,
    verbose: bool,
}

impl ReportWriter {
    pub fn stdout(verbose: bool) -> Self {
        Self::from_writer(io::stdout(), verbose)
    }

    pub fn create(path: &Path, verbose: bool) -> Result<Self> {
        let file = File::create(path).map_err(|source| CliError::Output {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_writer(BufWriter::new(file), verbose))
    }

    pub fn from_writer(writer: impl Write + Send + 'static, verbose: bool) -> Self {
        Self {
            out: Arc::new(Mutex::new(Box::new(writer))),
            verbose,
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let out = self.out.clone();
        let verbose = self.verbose;

        Box::new(move |progress: Progress| {
            let Some(text) = render(&progress, verbose) else {
                return;
            };
            let Ok(mut writer) = out.lock() else {
                warn!("Report writer mutex was poisoned. Dropping report line.");
                return;
            };
            if let Err(e) = writeln!(writer, "{}", text) {
                warn!("Failed to write report line: {}", e);
            }
        })
    }

    pub fn write_line(&self, text: &str) -> Result<()> {
        writeln!(self.lock()?, "{}", text)?;
        Ok(())
    }

    pub fn flush(&self) -> Result<()> {
        self.lock()?.flush()?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Box<dyn Write + Send>>> {
        self.out
            .lock()
            .map_err(|_| CliError::Other(anyhow::anyhow!("Report writer mutex was poisoned")))
    }
}

fn render(progress: &Progress, verbose: bool) -> Option<String> {
    match progress {
        Progress::Message(msg) => Some(msg.clone()),
        Progress::OrientationStart { theta, phi } if verbose => {
            Some(format!("Projecting at angles: {} {}", theta, phi))
        }
        Progress::SamplingCheckpoint {
            guesses,
            error_ratio,
            area,
        } if verbose => Some(format!(
            "iteration: {} estimated error ratio: {:.6} estimated area: {:.6}",
            guesses, error_ratio, area
        )),
        Progress::OrientationFinish {
            area,
            std_error,
            converged,
            ..
        } => {
            let outcome = if *converged {
                "Calculation converged for this set of angles."
            } else {
                "Guess limit reached for this set of angles."
            };
            Some(format!(
                "{} Area: {} Estimated Error: {}",
                outcome, area, std_error
            ))
        }
        Progress::Summary {
            mean_area, ese, ..
        } => Some(format!(
            "Mean Area Over All Projections: {}\nTotal ESE: {}",
            mean_area, ese
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn orientation_events() -> Vec<Progress> {
        vec![
            Progress::PhaseStart { name: "Sampling" },
            Progress::OrientationStart {
                theta: 1.5,
                phi: 3.0,
            },
            Progress::SamplingCheckpoint {
                guesses: 1000,
                error_ratio: 0.25,
                area: 12.5,
            },
            Progress::OrientationFinish {
                area: 12.5,
                std_error: 0.5,
                guesses: 1200,
                converged: true,
            },
            Progress::TaskIncrement,
            Progress::Summary {
                mean_area: 12.5,
                ese: 0.25,
                orientations: 2,
            },
        ]
    }

    #[test]
    fn quiet_report_keeps_results_only() {
        let buffer = SharedBuffer::default();
        let report = ReportWriter::from_writer(buffer.clone(), false);
        let callback = report.get_callback();
        orientation_events().into_iter().for_each(|e| callback(e));

        assert_eq!(
            buffer.contents(),
            "Calculation converged for this set of angles. Area: 12.5 Estimated Error: 0.5\n\
             Mean Area Over All Projections: 12.5\n\
             Total ESE: 0.25\n"
        );
    }

    #[test]
    fn verbose_report_adds_angles_and_checkpoints() {
        let buffer = SharedBuffer::default();
        let report = ReportWriter::from_writer(buffer.clone(), true);
        let callback = report.get_callback();
        orientation_events().into_iter().for_each(|e| callback(e));

        let contents = buffer.contents();
        assert!(contents.starts_with("Projecting at angles: 1.5 3\n"));
        assert!(contents.contains(
            "iteration: 1000 estimated error ratio: 0.250000 estimated area: 12.500000\n"
        ));
    }

    #[test]
    fn unconverged_orientation_is_labelled() {
        let line = render(
            &Progress::OrientationFinish {
                area: 0.0,
                std_error: 0.0,
                guesses: 400,
                converged: false,
            },
            false,
        );
        assert_eq!(
            line.as_deref(),
            Some("Guess limit reached for this set of angles. Area: 0 Estimated Error: 0")
        );
    }

    #[test]
    fn report_file_receives_lines_after_flush() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.log");
        let report = ReportWriter::create(&path, false).unwrap();
        let callback = report.get_callback();
        report.write_line("Verbose output engaged!").unwrap();
        callback(Progress::Message("Reading coordinates".to_string()));
        report.flush().unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Verbose output engaged!\nReading coordinates\n"
        );
    }

    #[test]
    fn unwritable_destination_is_an_output_error() {
        let dir = tempdir().unwrap();
        let result = ReportWriter::create(&dir.path().join("missing/report.log"), false);
        assert!(matches!(result, Err(CliError::Output { .. })));
    }
}
