//! # windmc-algo: Monte Carlo Engine for Wind Portfolio Power
//!
//! Estimates the expected combined output of a two-farm wind portfolio
//! and measures how the estimate converges as the number of simulated
//! scenarios grows.
//!
//! ## Pipeline
//!
//! | Stage | Type | Role |
//! |-------|------|------|
//! | Sampling | [`WindSpeedSampler`] | Weibull speeds by inverse CDF |
//! | Conversion | [`PowerCurve`] | piecewise speed → power |
//! | Aggregation | [`aggregate`], [`Portfolio`] | sum both farms per scenario |
//! | Sweep | [`ConvergenceEstimator`] | mean and standard errors per checkpoint |
//! | Reference | [`ReferenceEstimator`], [`analytic_reference`] | large-sample / quadrature expectation |
//!
//! Plain i.i.d. Monte Carlo, no variance reduction. Random sources are
//! passed explicitly; see [`windmc_core::SeedStreams`].
//!
//! ## Example
//!
//! ```no_run
//! use windmc_algo::{run_experiment, RunOptions};
//! use windmc_core::ExperimentConfig;
//!
//! let experiment = ExperimentConfig::default().resolve()?;
//! let result = run_experiment(&experiment, RunOptions::default())?;
//! println!("reference: {:.1} kW", result.reference.mean);
//! for point in &result.points {
//!     println!("{:>6} {:.1} ± {:.2}", point.size, point.mean, point.empirical_se);
//! }
//! # Ok::<(), windmc_core::WindError>(())
//! ```

pub mod analysis;
pub mod convergence;
pub mod experiment;
pub mod portfolio;
pub mod power_curve;
pub mod reference;
pub mod sampler;
pub mod stats;

pub use analysis::{absolute_errors, coverage, decay_slope, ConvergenceSummary, ErrorSeries};
pub use convergence::{ConvergenceEstimator, ConvergencePoint, Z_95};
pub use experiment::{run_experiment, ExperimentResult, RunOptions};
pub use portfolio::{aggregate, Portfolio};
pub use power_curve::{PowerCurve, Region};
pub use reference::{
    analytic_reference, AnalyticReference, ReferenceEstimator, ReferenceValue,
    DEFAULT_QUADRATURE_INTERVALS, MAX_QUADRATURE_INTERVALS,
};
pub use sampler::{ks_statistic, WindSpeedSampler};
pub use stats::{theoretical_standard_error, BatchStats};
