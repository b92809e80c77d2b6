use super::error::EngineError;

/// Mean area and estimated standard error over a set of orientations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossSection {
    pub mean_area: f64,
    pub ese: f64,
    pub orientations: usize,
}

/// Running sums of per-orientation areas and standard errors.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    angle_count: usize,
    area_sum: f64,
    error_sum: f64,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, area: f64, std_error: f64) {
        self.angle_count += 1;
        self.area_sum += area;
        self.error_sum += std_error;
    }

    pub fn count(&self) -> usize {
        self.angle_count
    }

    /// `mean = Σarea / n` and `ese = (Σerror / n) / sqrt(n - 1)`.
    ///
    /// Needs at least two orientations for the `n - 1` term.
    pub fn finish(&self) -> Result<CrossSection, EngineError> {
        if self.angle_count < 2 {
            return Err(EngineError::InsufficientOrientations {
                count: self.angle_count,
            });
        }
        let n = self.angle_count as f64;
        Ok(CrossSection {
            mean_area: self.area_sum / n,
            ese: (self.error_sum / n) / (n - 1.0).sqrt(),
            orientations: self.angle_count,
        })
    }
}
