use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tabwriter::TabWriter;
use tracing::info;
use windmc_algo::{run_experiment, ExperimentResult, RunOptions, DEFAULT_QUADRATURE_INTERVALS, Z_95};
use windmc_cli::{cli::ExperimentArgs, manifest::record_manifest, OutputFormat};

use crate::commands::util::load_experiment;

pub const CONVERGENCE_FILE: &str = "convergence.csv";
pub const SUMMARY_FILE: &str = "summary.json";

/// One line of `convergence.csv`.
#[derive(Debug, Serialize)]
struct CsvRow {
    size: usize,
    mean: f64,
    std_dev: f64,
    empirical_se: f64,
    theoretical_se: f64,
    abs_error: f64,
    band_lower: f64,
    band_upper: f64,
    within_95: bool,
}

pub fn handle(
    args: &ExperimentArgs,
    out: Option<&Path>,
    format: OutputFormat,
    analytic: bool,
) -> Result<()> {
    let experiment = load_experiment(args)?;
    let options = RunOptions {
        analytic_intervals: analytic.then_some(DEFAULT_QUADRATURE_INTERVALS),
    };
    let result = run_experiment(&experiment, options).context("running convergence study")?;

    match format {
        OutputFormat::Plain => print_table(&result)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(io::stdout(), &result)
                .context("serializing experiment result to JSON")?;
            println!();
        }
    }

    if let Some(dir) = out {
        let written = write_outputs(dir, &result)?;
        let outputs: Vec<&Path> = written.iter().map(PathBuf::as_path).collect();
        let params = [
            ("farm1_scale", experiment.farms[0].scale().value().to_string()),
            ("farm1_shape", experiment.farms[0].shape().to_string()),
            ("farm2_scale", experiment.farms[1].scale().value().to_string()),
            ("farm2_shape", experiment.farms[1].shape().to_string()),
            ("checkpoints", experiment.schedule.len().to_string()),
            ("max_checkpoint", experiment.schedule.max().to_string()),
            ("reference_samples", experiment.reference_samples.to_string()),
        ];
        let manifest = record_manifest(dir, "run", result.seed, &outputs, &params)?;
        info!("Recorded run {} in {}", manifest.run_id, dir.display());
    }
    Ok(())
}

fn print_table(result: &ExperimentResult) -> Result<()> {
    let summary = &result.summary;
    let (center, center_se) = (summary.band_center, summary.band_center_se);
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "N\tMEAN (kW)\tEMP SE\tTHEO SE\t|ERROR|\tIN 95%")?;
    for point in &result.points {
        writeln!(
            writer,
            "{}\t{:.2}\t{:.3}\t{:.3}\t{:.3}\t{}",
            point.size,
            point.mean,
            point.empirical_se,
            point.theoretical_se,
            (point.mean - center).abs(),
            if point.covers(center, center_se, Z_95) { "yes" } else { "no" },
        )?;
    }
    writer.flush()?;

    println!();
    println!("Seed: {}", result.seed);
    println!(
        "Reference: {:.3} kW (variance {:.1}, {} samples, SE {:.3})",
        result.reference.mean,
        result.reference.variance,
        result.reference.samples,
        result.reference.standard_error()
    );
    if let Some(analytic) = &result.analytic {
        println!(
            "Analytic:  {:.3} kW (variance {:.1})",
            analytic.mean, analytic.variance
        );
    }
    if let Some(slope) = summary.empirical_slope {
        println!("Empirical SE log-log slope: {slope:.4}");
    }
    println!(
        "Checkpoints inside 95% band: {:.1}%",
        summary.coverage_95 * 100.0
    );
    Ok(())
}

fn write_outputs(dir: &Path, result: &ExperimentResult) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let csv_path = dir.join(CONVERGENCE_FILE);
    let mut writer = csv::Writer::from_path(&csv_path)
        .with_context(|| format!("opening {}", csv_path.display()))?;
    let (center, center_se) = (result.summary.band_center, result.summary.band_center_se);
    for point in &result.points {
        let (band_lower, band_upper) = point.band(center, center_se, Z_95);
        writer.serialize(CsvRow {
            size: point.size,
            mean: point.mean,
            std_dev: point.std_dev,
            empirical_se: point.empirical_se,
            theoretical_se: point.theoretical_se,
            abs_error: (point.mean - center).abs(),
            band_lower,
            band_upper,
            within_95: point.covers(center, center_se, Z_95),
        })?;
    }
    writer.flush()?;

    let summary_path = dir.join(SUMMARY_FILE);
    let file = fs::File::create(&summary_path)
        .with_context(|| format!("creating {}", summary_path.display()))?;
    serde_json::to_writer_pretty(file, result)?;

    info!(
        "Wrote {} checkpoints to {}",
        result.points.len(),
        csv_path.display()
    );
    Ok(vec![csv_path, summary_path])
}
