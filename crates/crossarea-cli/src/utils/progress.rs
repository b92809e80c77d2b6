use crossarea::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TEMPLATE: &str = "[{elapsed_precise}] [{bar:32}] {pos}/{len} orientations {msg}";

/// Stderr bar counting finished orientations.
///
/// Loading and other phases are not drawn; only the sampling sweep moves the bar.
#[derive(Clone)]
pub struct OrientationBar {
    bar: ProgressBar,
}

impl OrientationBar {
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let style = ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        Self {
            bar: ProgressBar::with_draw_target(Some(0), target).with_style(style),
        }
    }

    pub fn callback(&self) -> ProgressCallback<'static> {
        let bar = self.bar.clone();
        Box::new(move |progress: Progress| match progress {
            Progress::TaskStart { total_steps } => {
                bar.reset();
                bar.set_length(total_steps);
            }
            Progress::OrientationStart { theta, phi } => {
                bar.set_message(format!("θ {:.3} φ {:.3}", theta, phi));
            }
            Progress::TaskIncrement => bar.inc(1),
            Progress::Message(msg) => bar.println(msg),
            Progress::Summary { mean_area, ese, .. } => {
                bar.finish_with_message(format!("mean area {:.3} ± {:.3}", mean_area, ese));
            }
            _ => {}
        })
    }
}

impl Default for OrientationBar {
    fn default() -> Self {
        Self::new()
    }
}

/// Delivers every event to each callback in turn.
pub fn fan_out(callbacks: Vec<ProgressCallback<'static>>) -> ProgressCallback<'static> {
    Box::new(move |progress: Progress| {
        for callback in &callbacks {
            callback(progress.clone());
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::thread;

    fn hidden_bar() -> OrientationBar {
        OrientationBar::with_target(ProgressDrawTarget::hidden())
    }

    #[test]
    fn bar_waits_for_the_sweep_to_start() {
        let bar = hidden_bar();
        let callback = bar.callback();
        callback(Progress::PhaseStart { name: "Loading" });
        callback(Progress::PhaseFinish);

        assert_eq!(bar.bar.length(), Some(0));
        assert_eq!(bar.bar.position(), 0);
        assert!(!bar.bar.is_finished());
    }

    #[test]
    fn sweep_advances_one_step_per_orientation() {
        let bar = hidden_bar();
        let callback = bar.callback();
        callback(Progress::TaskStart { total_steps: 19 });
        callback(Progress::OrientationStart {
            theta: 0.5,
            phi: 1.0,
        });
        callback(Progress::TaskIncrement);
        callback(Progress::TaskIncrement);

        assert_eq!(bar.bar.length(), Some(19));
        assert_eq!(bar.bar.position(), 2);
        assert_eq!(bar.bar.message(), "θ 0.500 φ 1.000");
    }

    #[test]
    fn summary_finishes_the_bar() {
        let bar = hidden_bar();
        let callback = bar.callback();
        callback(Progress::TaskStart { total_steps: 2 });
        callback(Progress::TaskIncrement);
        callback(Progress::TaskIncrement);
        callback(Progress::Summary {
            mean_area: 28.274,
            ese: 0.5,
            orientations: 2,
        });

        assert!(bar.bar.is_finished());
        assert_eq!(bar.bar.message(), "mean area 28.274 ± 0.500");
    }

    #[test]
    fn callback_can_run_on_another_thread() {
        let bar = hidden_bar();
        let callback = bar.callback();
        thread::spawn(move || {
            callback(Progress::TaskStart { total_steps: 3 });
            callback(Progress::TaskIncrement);
        })
        .join()
        .unwrap();

        assert_eq!(bar.bar.position(), 1);
    }

    #[test]
    fn fan_out_reaches_every_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let make = |tag: &'static str| -> ProgressCallback<'static> {
            let seen = seen.clone();
            Box::new(move |event: Progress| seen.lock().unwrap().push((tag, event)))
        };
        let callback = fan_out(vec![make("bar"), make("report")]);
        callback(Progress::TaskIncrement);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ("bar", Progress::TaskIncrement),
                ("report", Progress::TaskIncrement)
            ]
        );
    }
}
