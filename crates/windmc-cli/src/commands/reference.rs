use std::io;

use anyhow::{Context, Result};
use serde::Serialize;
use windmc_algo::{analytic_reference, AnalyticReference, Portfolio, ReferenceEstimator, ReferenceValue};
use windmc_cli::{cli::ExperimentArgs, OutputFormat};
use windmc_core::SeedStreams;

use crate::commands::util::load_experiment;

#[derive(Debug, Serialize)]
struct ReferenceReport {
    seed: u64,
    empirical: ReferenceValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    analytic: Option<AnalyticReference>,
}

pub fn handle(
    args: &ExperimentArgs,
    analytic: bool,
    intervals: usize,
    format: OutputFormat,
) -> Result<()> {
    let experiment = load_experiment(args)?;
    let portfolio = Portfolio::from_experiment(&experiment)?;
    let streams = SeedStreams::from_option(experiment.seed);
    let empirical = ReferenceEstimator::new(portfolio, experiment.reference_samples)
        .run(&streams)
        .context("estimating reference expectation")?;
    let report = ReferenceReport {
        seed: streams.base_seed(),
        empirical,
        analytic: analytic.then(|| analytic_reference(&portfolio, intervals)),
    };

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(io::stdout(), &report)
                .context("serializing reference to JSON")?;
            println!();
        }
        OutputFormat::Plain => {
            println!("Seed: {}", report.seed);
            println!(
                "Empirical reference: {:.3} kW (variance {:.1}, SE {:.3}, {} samples)",
                empirical.mean,
                empirical.variance,
                empirical.standard_error(),
                empirical.samples
            );
            if let Some(exact) = &report.analytic {
                println!(
                    "Analytic reference:  {:.3} kW (variance {:.1}; farm1 {:.3}, farm2 {:.3})",
                    exact.mean, exact.variance, exact.farm_means[0], exact.farm_means[1]
                );
                let difference = empirical.mean - exact.mean;
                let se = empirical.standard_error();
                if se > 0.0 {
                    println!("Difference: {difference:.3} kW ({:.2} SE)", difference / se);
                } else {
                    println!("Difference: {difference:.3} kW");
                }
            }
        }
    }
    Ok(())
}
