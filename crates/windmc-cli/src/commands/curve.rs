use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tabwriter::TabWriter;
use windmc_algo::PowerCurve;
use windmc_core::ExperimentConfig;

pub fn handle(speeds: &[f64], config: Option<&Path>) -> Result<()> {
    let config = match config {
        Some(path) => ExperimentConfig::load(path)
            .with_context(|| format!("loading experiment config '{}'", path.display()))?,
        None => ExperimentConfig::default(),
    };
    let experiment = config.resolve().context("invalid experiment configuration")?;
    let curve = PowerCurve::new(experiment.curve);

    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "SPEED (m/s)\tREGION\tPOWER (kW)")?;
    for &speed in speeds {
        writeln!(
            writer,
            "{}\t{:?}\t{:.3}",
            speed,
            curve.region(speed),
            curve.evaluate(speed)
        )?;
    }
    writer.flush()?;
    Ok(())
}
