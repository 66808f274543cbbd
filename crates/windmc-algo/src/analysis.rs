//! Diagnostics over a finished convergence sweep.

use serde::Serialize;

use crate::convergence::{ConvergencePoint, Z_95};

/// Which standard error series to analyse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSeries {
    Empirical,
    Theoretical,
}

impl ErrorSeries {
    fn pick(self, point: &ConvergencePoint) -> f64 {
        match self {
            ErrorSeries::Empirical => point.empirical_se,
            ErrorSeries::Theoretical => point.theoretical_se,
        }
    }
}

/// Least-squares slope of `ln(SE)` against `ln(S)`.
///
/// Plain Monte Carlo gives a slope near −0.5. Points with a non-positive
/// standard error are skipped; `None` when fewer than two usable points
/// remain or all sizes are equal.
pub fn decay_slope(points: &[ConvergencePoint], series: ErrorSeries) -> Option<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = points
        .iter()
        .filter(|p| p.size > 0 && series.pick(p) > 0.0)
        .map(|p| ((p.size as f64).ln(), series.pick(p).ln()))
        .unzip();
    least_squares_slope(&xs, &ys)
}

fn least_squares_slope(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() < 2 {
        return None;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;
    let (sxy, sxx) = xs
        .iter()
        .zip(ys)
        .fold((0.0, 0.0), |(sxy, sxx), (&x, &y)| {
            let dx = x - mean_x;
            (sxy + dx * (y - mean_y), sxx + dx * dx)
        });
    if sxx == 0.0 {
        None
    } else {
        Some(sxy / sxx)
    }
}

/// `|mean − reference|` per checkpoint, in schedule order.
pub fn absolute_errors(points: &[ConvergencePoint], reference: f64) -> Vec<f64> {
    points.iter().map(|p| (p.mean - reference).abs()).collect()
}

/// Fraction of checkpoints whose mean lies inside the `z`-band around
/// `reference`, whose own standard error is `reference_se`. Returns 0 for an
/// empty sweep.
pub fn coverage(points: &[ConvergencePoint], reference: f64, reference_se: f64, z: f64) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let covered = points
        .iter()
        .filter(|p| p.covers(reference, reference_se, z))
        .count();
    covered as f64 / points.len() as f64
}

/// Headline numbers of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConvergenceSummary {
    pub checkpoints: usize,
    /// Center of the 95% bands
    pub band_center: f64,
    /// Standard error of `band_center`; 0 for an exact expectation
    pub band_center_se: f64,
    pub final_point: Option<ConvergencePoint>,
    pub final_abs_error: Option<f64>,
    pub final_within_95: Option<bool>,
    pub empirical_slope: Option<f64>,
    pub theoretical_slope: Option<f64>,
    /// Share of checkpoints inside their 95% band
    pub coverage_95: f64,
}

impl ConvergenceSummary {
    /// Errors and coverage are measured against `reference`, whose own
    /// standard error `reference_se` widens the bands.
    pub fn from_points(points: &[ConvergencePoint], reference: f64, reference_se: f64) -> Self {
        let final_point = points.last().copied();
        Self {
            checkpoints: points.len(),
            band_center: reference,
            band_center_se: reference_se,
            final_point,
            final_abs_error: final_point.map(|p| (p.mean - reference).abs()),
            final_within_95: final_point.map(|p| p.covers(reference, reference_se, Z_95)),
            empirical_slope: decay_slope(points, ErrorSeries::Empirical),
            theoretical_slope: decay_slope(points, ErrorSeries::Theoretical),
            coverage_95: coverage(points, reference, reference_se, Z_95),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(size: usize, mean: f64, se: f64) -> ConvergencePoint {
        ConvergencePoint {
            size,
            mean,
            std_dev: se * (size as f64).sqrt(),
            empirical_se: se,
            theoretical_se: se,
        }
    }

    #[test]
    fn test_exact_inverse_sqrt_decay() {
        let points: Vec<_> = [100, 400, 1600, 6400]
            .iter()
            .map(|&s| point(s, 1000.0, 50.0 / (s as f64).sqrt()))
            .collect();
        let slope = decay_slope(&points, ErrorSeries::Theoretical).unwrap();
        assert!((slope + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_slope_needs_two_distinct_sizes() {
        assert_eq!(decay_slope(&[point(100, 1.0, 1.0)], ErrorSeries::Empirical), None);
        assert_eq!(
            decay_slope(&[point(100, 1.0, 1.0), point(100, 1.0, 2.0)], ErrorSeries::Empirical),
            None
        );
    }

    #[test]
    fn test_zero_errors_are_skipped() {
        let points = vec![point(1, 5.0, 0.0), point(100, 5.0, 1.0), point(10_000, 5.0, 0.1)];
        let slope = decay_slope(&points, ErrorSeries::Empirical).unwrap();
        assert!((slope + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_coverage_and_errors() {
        let points = vec![point(100, 1000.0, 10.0), point(100, 1030.0, 10.0)];
        assert_eq!(absolute_errors(&points, 1010.0), vec![10.0, 20.0]);
        assert_eq!(coverage(&points, 1010.0, 0.0, Z_95), 0.5);
        assert_eq!(coverage(&[], 1010.0, 0.0, Z_95), 0.0);
        // A noisy reference widens both bands enough to cover 1030
        assert_eq!(coverage(&points, 1010.0, 10.0, Z_95), 1.0);
    }

    #[test]
    fn test_summary_uses_last_point() {
        let points = vec![point(100, 900.0, 10.0), point(400, 1001.0, 5.0)];
        let summary = ConvergenceSummary::from_points(&points, 1000.0, 0.0);
        assert_eq!(summary.checkpoints, 2);
        assert_eq!(summary.band_center, 1000.0);
        assert_eq!(summary.final_point.map(|p| p.size), Some(400));
        assert_eq!(summary.final_abs_error, Some(1.0));
        assert_eq!(summary.final_within_95, Some(true));
        assert_eq!(summary.coverage_95, 0.5);
    }
}
