//! Reference ("ground truth") expectation of portfolio power.
//!
//! The default reference is itself a Monte Carlo estimate: one run of the
//! pipeline at a sample size far beyond the largest checkpoint. Its mean
//! carries a sampling error of roughly `sqrt(variance / samples)`, which
//! [`ReferenceValue::standard_error`] reports. [`analytic_reference`]
//! offers a deterministic alternative by quadrature.

use serde::Serialize;
use tracing::info;
use windmc_core::{Farm, SeedStreams, WindError, WindResult};

use crate::portfolio::Portfolio;

/// Mean and variance of total power from the large reference run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceValue {
    pub samples: usize,
    /// Estimated expected total power (kW)
    pub mean: f64,
    /// Sample variance of total power; feeds the theoretical standard error
    pub variance: f64,
}

impl ReferenceValue {
    /// Sampling error of the reference mean itself.
    pub fn standard_error(&self) -> f64 {
        crate::stats::theoretical_standard_error(self.variance, self.samples)
    }
}

/// Runs the pipeline once at the reference sample size.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceEstimator {
    portfolio: Portfolio,
    samples: usize,
}

impl ReferenceEstimator {
    pub fn new(portfolio: Portfolio, samples: usize) -> Self {
        Self { portfolio, samples }
    }

    pub fn run(&self, streams: &SeedStreams) -> WindResult<ReferenceValue> {
        if self.samples == 0 {
            return Err(WindError::config("reference_samples", "must be >= 1"));
        }
        info!(samples = self.samples, "computing reference expectation");
        let mut first = streams.reference_rng(Farm::First);
        let mut second = streams.reference_rng(Farm::Second);
        let stats = self
            .portfolio
            .simulate_stats(self.samples, &mut first, &mut second)?;
        info!(
            mean = stats.mean,
            variance = stats.variance,
            "reference expectation ready"
        );
        Ok(ReferenceValue {
            samples: stats.count,
            mean: stats.mean,
            variance: stats.variance,
        })
    }
}

/// Number of Simpson intervals used by [`analytic_reference`].
pub const DEFAULT_QUADRATURE_INTERVALS: usize = 4_000;

/// Upper bound on Simpson intervals; larger requests are clamped.
pub const MAX_QUADRATURE_INTERVALS: usize = 10_000_000;

/// Expected total power and its variance by numerical integration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalyticReference {
    pub mean: f64,
    pub variance: f64,
    /// Per-farm expected power (kW)
    pub farm_means: [f64; 2],
}

/// Integrate the power curve against each farm's Weibull density.
///
/// For one farm with density `f`, CDF `F` and cubic segment `g(v)`:
///
/// ```text
/// E[P]  = ∫_{cut_in}^{rated} g(v)  f(v) dv + P_r   · (F(cut_out) − F(rated))
/// E[P²] = ∫_{cut_in}^{rated} g(v)² f(v) dv + P_r²  · (F(cut_out) − F(rated))
/// ```
///
/// The farms are independent, so their means and variances add. The
/// integrals use composite Simpson's rule with `intervals` panels, clamped
/// to `2..=MAX_QUADRATURE_INTERVALS` and rounded up to even.
pub fn analytic_reference(portfolio: &Portfolio, intervals: usize) -> AnalyticReference {
    let intervals = simpson_panels(intervals);
    let curve = portfolio.curve();
    let params = curve.params();
    let lo = params.cut_in().value();
    let hi = params.rated_speed().value();
    let rated = params.rated_power().value();

    let mut mean = 0.0;
    let mut variance = 0.0;
    let mut farm_means = [0.0; 2];
    for farm in Farm::ALL {
        let sampler = portfolio.sampler(farm);
        let cubic = |v: f64| params.coeff_a() * (v * v * v) + params.coeff_b();
        let first = simpson(|v| cubic(v) * sampler.density(v), lo, hi, intervals);
        let second = simpson(|v| cubic(v).powi(2) * sampler.density(v), lo, hi, intervals);
        let p_rated = sampler.cdf(params.cut_out().value()) - sampler.cdf(hi);

        let e1 = first + rated * p_rated;
        let e2 = second + rated * rated * p_rated;
        farm_means[farm.index()] = e1;
        mean += e1;
        variance += e2 - e1 * e1;
    }

    AnalyticReference {
        mean,
        variance,
        farm_means,
    }
}

fn simpson_panels(intervals: usize) -> usize {
    intervals
        .clamp(2, MAX_QUADRATURE_INTERVALS)
        .next_multiple_of(2)
}

fn simpson(f: impl Fn(f64) -> f64, a: f64, b: f64, intervals: usize) -> f64 {
    let h = (b - a) / intervals as f64;
    let mut sum = f(a) + f(b);
    for i in 1..intervals {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * f(a + i as f64 * h);
    }
    sum * h / 3.0
}
