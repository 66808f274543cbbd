use anyhow::{Context, Result};
use tracing::info;
use windmc_cli::cli::ExperimentArgs;
use windmc_core::{Experiment, ExperimentConfig};

/// Load the configuration file (or the built-in default) and apply
/// command-line overrides.
pub fn load_config(args: &ExperimentArgs) -> Result<ExperimentConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading experiment configuration from {}", path.display());
            ExperimentConfig::load(path)
                .with_context(|| format!("loading experiment config '{}'", path.display()))?
        }
        None => ExperimentConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.parallel {
        config.parallel = true;
    }
    if let Some(step) = args.step {
        config.checkpoints.step = step;
        config.checkpoints.sizes = None;
    }
    if let Some(max) = args.max_checkpoint {
        config.checkpoints.max = max;
        config.checkpoints.sizes = None;
    }
    if let Some(samples) = args.reference_samples {
        config.reference_samples = samples;
    }
    Ok(config)
}

/// Load, override and validate.
pub fn load_experiment(args: &ExperimentArgs) -> Result<Experiment> {
    load_config(args)?
        .resolve()
        .context("invalid experiment configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_on_top_of_default() {
        let args = ExperimentArgs {
            seed: Some(3),
            parallel: true,
            step: Some(10),
            max_checkpoint: Some(200),
            reference_samples: Some(5_000),
            ..ExperimentArgs::default()
        };
        let config = load_config(&args).unwrap();
        assert_eq!(config.seed, Some(3));
        assert!(config.parallel);
        assert_eq!(config.checkpoints.step, 10);
        assert_eq!(config.checkpoints.max, 200);
        assert_eq!(config.reference_samples, 5_000);
        assert_eq!(config.farm1, ExperimentConfig::default().farm1);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let args = ExperimentArgs {
            max_checkpoint: Some(500_000),
            ..ExperimentArgs::default()
        };
        let err = load_experiment(&args).unwrap_err();
        assert!(format!("{err:#}").contains("reference_samples"));
    }
}
