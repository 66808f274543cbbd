use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};
use windmc_core::ExperimentConfig;

pub fn handle(config: &Path) -> Result<()> {
    info!("Validating experiment configuration {}", config.display());
    let experiment = ExperimentConfig::load(config)
        .with_context(|| format!("loading experiment config '{}'", config.display()))?
        .resolve()
        .context("invalid experiment configuration")?;

    let diagnostics = experiment.diagnostics();
    for issue in &diagnostics.issues {
        warn!("{issue}");
    }
    println!(
        "{}: OK ({} checkpoints up to {}, reference {} samples, {})",
        config.display(),
        experiment.schedule.len(),
        experiment.schedule.max(),
        experiment.reference_samples,
        diagnostics.summary()
    );
    Ok(())
}
