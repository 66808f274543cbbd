use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum, ValueHint};
use clap_complete::Shell;
use std::path::PathBuf;
use clap::builder::RangedU64ValueParser;
use windmc_algo::{DEFAULT_QUADRATURE_INTERVALS, MAX_QUADRATURE_INTERVALS};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Monte Carlo convergence study of a two-farm wind portfolio",
    long_about = None
)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the reference estimate and the convergence sweep
    Run {
        #[command(flatten)]
        experiment: ExperimentArgs,
        /// Directory for convergence.csv, summary.json and the run manifest
        #[arg(long, value_hint = ValueHint::DirPath)]
        out: Option<PathBuf>,
        /// Output format for stdout
        #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
        /// Also compute the reference by numerical integration
        #[arg(long)]
        analytic: bool,
    },
    /// Compute the reference expectation of portfolio power
    Reference {
        #[command(flatten)]
        experiment: ExperimentArgs,
        /// Also compute the reference by numerical integration
        #[arg(long)]
        analytic: bool,
        /// Simpson intervals for the analytic reference
        #[arg(
            long,
            default_value_t = DEFAULT_QUADRATURE_INTERVALS,
            value_parser = RangedU64ValueParser::<usize>::new()
                .range(2..=MAX_QUADRATURE_INTERVALS as u64)
        )]
        intervals: usize,
        /// Output format for stdout
        #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
    },
    /// Evaluate the turbine power curve at given wind speeds
    Curve {
        /// Wind speeds in m/s; negative speeds produce no power
        #[arg(long = "speed", required = true, num_args = 1.., allow_negative_numbers = true)]
        speeds: Vec<f64>,
        /// Experiment configuration providing the turbine parameters
        #[arg(long, value_hint = ValueHint::FilePath)]
        config: Option<PathBuf>,
    },
    /// Validate an experiment configuration and report diagnostics
    Validate {
        /// Path to the configuration file (.toml or .json)
        #[arg(long, value_hint = ValueHint::FilePath)]
        config: PathBuf,
    },
    /// Print the default experiment configuration as TOML
    Init,
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

/// Experiment source and command-line overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct ExperimentArgs {
    /// Experiment configuration (.toml or .json); defaults to the built-in scenario
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    /// Random seed (overrides the configuration)
    #[arg(long)]
    pub seed: Option<u64>,
    /// Evaluate checkpoints in parallel
    #[arg(long)]
    pub parallel: bool,
    /// Checkpoint step size
    #[arg(long)]
    pub step: Option<usize>,
    /// Largest checkpoint size
    #[arg(long = "max-checkpoint")]
    pub max_checkpoint: Option<usize>,
    /// Reference sample size
    #[arg(long)]
    pub reference_samples: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        build_cli_command().debug_assert();
    }

    #[test]
    fn test_run_overrides_parse() {
        let cli = Cli::parse_from([
            "windmc-cli",
            "run",
            "--seed",
            "7",
            "--step",
            "10",
            "--max-checkpoint",
            "100",
            "--reference-samples",
            "5000",
            "--format",
            "json",
        ]);
        let Some(Commands::Run {
            experiment, format, ..
        }) = cli.command
        else {
            panic!("expected run command");
        };
        assert_eq!(experiment.seed, Some(7));
        assert_eq!(experiment.step, Some(10));
        assert_eq!(experiment.max_checkpoint, Some(100));
        assert_eq!(experiment.reference_samples, Some(5000));
        assert_eq!(format, OutputFormat::Json);
    }

    #[test]
    fn test_curve_accepts_multiple_speeds() {
        let cli = Cli::parse_from(["windmc-cli", "curve", "--speed", "3", "12", "25"]);
        let Some(Commands::Curve { speeds, .. }) = cli.command else {
            panic!("expected curve command");
        };
        assert_eq!(speeds, vec![3.0, 12.0, 25.0]);
    }

    #[test]
    fn test_curve_accepts_negative_speeds() {
        let cli = Cli::parse_from(["windmc-cli", "curve", "--speed", "-1", "5"]);
        let Some(Commands::Curve { speeds, .. }) = cli.command else {
            panic!("expected curve command");
        };
        assert_eq!(speeds, vec![-1.0, 5.0]);
    }

    #[test]
    fn test_intervals_are_range_checked() {
        let cli = Cli::parse_from(["windmc-cli", "reference", "--intervals", "2000"]);
        let Some(Commands::Reference { intervals, .. }) = cli.command else {
            panic!("expected reference command");
        };
        assert_eq!(intervals, 2000);

        for bad in ["0", "1", "18446744073709551615"] {
            assert!(
                Cli::try_parse_from(["windmc-cli", "reference", "--intervals", bad]).is_err(),
                "accepted --intervals {bad}"
            );
        }
    }
}
