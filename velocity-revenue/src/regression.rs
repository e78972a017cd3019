/// Ordinary least squares line fitted against the position of each
/// observation (0, 1, 2, ...), not against calendar distance. Gaps between
/// observed days are deliberately ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearTrend {
    /// Fit `y ≈ intercept + slope * index`. An empty series yields a flat zero
    /// line and a single observation a flat line through it.
    pub fn fit(values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self { slope: 0.0, intercept: 0.0 };
        }

        let n_f = n as f64;
        let mean_x = (n_f - 1.0) / 2.0;
        let mean_y = values.iter().sum::<f64>() / n_f;

        let mut covariance = 0.0;
        let mut variance = 0.0;
        for (i, y) in values.iter().enumerate() {
            let dx = i as f64 - mean_x;
            covariance += dx * (y - mean_y);
            variance += dx * dx;
        }

        let slope = if variance == 0.0 { 0.0 } else { covariance / variance };
        Self {
            slope,
            intercept: mean_y - slope * mean_x,
        }
    }

    pub fn predict(&self, index: f64) -> f64 {
        self.intercept + self.slope * index
    }
}
