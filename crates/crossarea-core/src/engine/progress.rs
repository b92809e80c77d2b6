/// Events emitted while a simulation runs.
///
/// The engine never writes text itself; callers turn these events into log lines, progress bars
/// or nothing at all.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Message(String),

    OrientationStart {
        theta: f64,
        phi: f64,
    },
    SamplingCheckpoint {
        guesses: u64,
        error_ratio: f64,
        area: f64,
    },
    OrientationFinish {
        area: f64,
        std_error: f64,
        guesses: u64,
        converged: bool,
    },
    Summary {
        mean_area: f64,
        ese: f64,
        orientations: usize,
    },
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
