//! End-to-end run: reference expectation followed by the convergence sweep.

use serde::Serialize;
use tracing::{info, warn};
use windmc_core::{Experiment, SeedStreams, WindResult};

use crate::analysis::ConvergenceSummary;
use crate::convergence::{ConvergenceEstimator, ConvergencePoint};
use crate::portfolio::Portfolio;
use crate::reference::{analytic_reference, AnalyticReference, ReferenceEstimator, ReferenceValue};

/// Everything a run produces. Consumers (tables, plots, exports) read it
/// and never modify it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentResult {
    /// Base seed actually used; replaying with it reproduces the run
    pub seed: u64,
    pub reference: ReferenceValue,
    /// Quadrature reference, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytic: Option<AnalyticReference>,
    pub points: Vec<ConvergencePoint>,
    pub summary: ConvergenceSummary,
}

/// Options that leave the sampled numbers of a run unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Also compute the quadrature reference with this many intervals
    pub analytic_intervals: Option<usize>,
}

/// Run the reference estimator, then sweep every checkpoint using the
/// reference variance for the theoretical standard error.
pub fn run_experiment(experiment: &Experiment, options: RunOptions) -> WindResult<ExperimentResult> {
    for issue in experiment.diagnostics().issues {
        warn!("{issue}");
    }

    let streams = SeedStreams::from_option(experiment.seed);
    info!(seed = streams.base_seed(), "running experiment");

    let portfolio = Portfolio::from_experiment(experiment)?;
    let reference =
        ReferenceEstimator::new(portfolio, experiment.reference_samples).run(&streams)?;
    let points = ConvergenceEstimator::new(portfolio, experiment.schedule.clone())
        .with_parallel(experiment.parallel)
        .run(&streams, reference.variance)?;

    let analytic = options
        .analytic_intervals
        .map(|intervals| analytic_reference(&portfolio, intervals));
    // Bands center on the exact expectation when it is available, otherwise
    // on the empirical reference widened by its own standard error.
    let (center, center_se) = match &analytic {
        Some(exact) => (exact.mean, 0.0),
        None => (reference.mean, reference.standard_error()),
    };
    let summary = ConvergenceSummary::from_points(&points, center, center_se);

    Ok(ExperimentResult {
        seed: streams.base_seed(),
        reference,
        analytic,
        points,
        summary,
    })
}
