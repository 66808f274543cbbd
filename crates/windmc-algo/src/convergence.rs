//! Convergence sweep of the Monte Carlo estimator.
//!
//! Every checkpoint size `S` is an independent experiment: fresh draws at
//! both farms, reduced to mean and standard errors, then discarded before
//! the next checkpoint starts. Draws at one checkpoint are neither a
//! subset nor a superset of another's, so the sequence of means is not
//! monotone; its spread shrinks like `1/√S`.
//!
//! Two standard errors are reported per checkpoint:
//!
//! - **empirical**: the checkpoint's own sample standard deviation over `√S`
//! - **theoretical**: `sqrt(σ²/S)` with σ² taken from the reference run, so
//!   it decays smoothly and can be compared against the empirical one.

use serde::Serialize;
use tracing::{debug, info};
use windmc_core::{CheckpointSchedule, Farm, SeedStreams, WindResult};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::portfolio::Portfolio;
use crate::stats::theoretical_standard_error;

/// Two-sided 95% normal quantile used for confidence bands.
pub const Z_95: f64 = 1.96;

/// Summary of one checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConvergencePoint {
    /// Checkpoint sample size S
    pub size: usize,
    /// Sample mean of total power (kW)
    pub mean: f64,
    /// Sample standard deviation of total power
    pub std_dev: f64,
    /// `std_dev / √S`
    pub empirical_se: f64,
    /// `sqrt(population variance / S)`
    pub theoretical_se: f64,
}

impl ConvergencePoint {
    /// Half-width of the `z`-band around a center that carries its own
    /// standard error `center_se` (0 for an exact expectation). The two
    /// errors are independent, so they add in quadrature.
    pub fn half_width(&self, center_se: f64, z: f64) -> f64 {
        z * self.theoretical_se.hypot(center_se)
    }

    /// `(center − half, center + half)`, see [`Self::half_width`].
    pub fn band(&self, center: f64, center_se: f64, z: f64) -> (f64, f64) {
        let half = self.half_width(center_se, z);
        (center - half, center + half)
    }

    /// Whether this checkpoint's mean lies inside the band around `target`.
    pub fn covers(&self, target: f64, target_se: f64, z: f64) -> bool {
        (self.mean - target).abs() <= self.half_width(target_se, z)
    }
}

/// Runs the portfolio pipeline at each checkpoint of a schedule.
#[derive(Debug, Clone)]
pub struct ConvergenceEstimator {
    portfolio: Portfolio,
    schedule: CheckpointSchedule,
    parallel: bool,
}

impl ConvergenceEstimator {
    pub fn new(portfolio: Portfolio, schedule: CheckpointSchedule) -> Self {
        Self {
            portfolio,
            schedule,
            parallel: false,
        }
    }

    /// Evaluate checkpoints across threads. Output is identical to the
    /// sequential sweep because each checkpoint owns its random streams.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run the sweep. `population_variance` normally comes from
    /// [`crate::ReferenceValue::variance`].
    pub fn run(
        &self,
        streams: &SeedStreams,
        population_variance: f64,
    ) -> WindResult<Vec<ConvergencePoint>> {
        info!(
            checkpoints = self.schedule.len(),
            max = self.schedule.max(),
            parallel = self.parallel,
            "starting convergence sweep"
        );
        let points = if self.parallel {
            self.run_parallel(streams, population_variance)?
        } else {
            self.run_sequential(streams, population_variance)?
        };
        if let Some(last) = points.last() {
            info!(
                size = last.size,
                mean = last.mean,
                empirical_se = last.empirical_se,
                theoretical_se = last.theoretical_se,
                "convergence sweep finished"
            );
        }
        Ok(points)
    }

    fn run_sequential(
        &self,
        streams: &SeedStreams,
        population_variance: f64,
    ) -> WindResult<Vec<ConvergencePoint>> {
        self.schedule
            .sizes()
            .iter()
            .enumerate()
            .map(|(index, &size)| self.checkpoint(streams, index, size, population_variance))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn run_parallel(
        &self,
        streams: &SeedStreams,
        population_variance: f64,
    ) -> WindResult<Vec<ConvergencePoint>> {
        self.schedule
            .sizes()
            .par_iter()
            .enumerate()
            .map(|(index, &size)| self.checkpoint(streams, index, size, population_variance))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn run_parallel(
        &self,
        streams: &SeedStreams,
        population_variance: f64,
    ) -> WindResult<Vec<ConvergencePoint>> {
        tracing::warn!("built without the `parallel` feature; running checkpoints sequentially");
        self.run_sequential(streams, population_variance)
    }

    /// One independent Monte Carlo experiment at sample size `size`.
    pub fn checkpoint(
        &self,
        streams: &SeedStreams,
        index: usize,
        size: usize,
        population_variance: f64,
    ) -> WindResult<ConvergencePoint> {
        let mut first = streams.checkpoint_rng(index, Farm::First);
        let mut second = streams.checkpoint_rng(index, Farm::Second);
        let stats = self.portfolio.simulate_stats(size, &mut first, &mut second)?;

        let point = ConvergencePoint {
            size,
            mean: stats.mean,
            std_dev: stats.std_dev(),
            empirical_se: stats.standard_error(),
            theoretical_se: theoretical_standard_error(population_variance, size),
        };
        debug!(
            index,
            size,
            mean = point.mean,
            empirical_se = point.empirical_se,
            theoretical_se = point.theoretical_se,
            "checkpoint"
        );
        Ok(point)
    }
}
