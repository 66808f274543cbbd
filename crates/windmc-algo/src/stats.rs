//! Summary statistics of a power batch.

use serde::Serialize;

/// Count, mean and unbiased variance of a batch, computed in one pass with
/// Welford's update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatchStats {
    pub count: usize,
    pub mean: f64,
    /// Sample variance with Bessel's correction (n − 1); 0 for n < 2
    pub variance: f64,
}

impl BatchStats {
    pub fn from_slice(values: &[f64]) -> Self {
        let mut mean = 0.0;
        let mut m2 = 0.0;
        for (i, &x) in values.iter().enumerate() {
            let delta = x - mean;
            mean += delta / (i + 1) as f64;
            m2 += delta * (x - mean);
        }
        let count = values.len();
        let variance = if count > 1 {
            m2 / (count - 1) as f64
        } else {
            0.0
        };
        Self {
            count,
            mean,
            variance,
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    /// `std_dev / sqrt(count)`; 0 for an empty batch
    pub fn standard_error(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.std_dev() / (self.count as f64).sqrt()
        }
    }
}

/// `sqrt(variance / n)`, the CLT spread of a mean over `n` draws.
pub fn theoretical_standard_error(population_variance: f64, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    (population_variance / n as f64).sqrt()
}
