use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::FmtSubscriber;
use windmc_cli::cli::{build_cli_command, Cli, Commands};
use windmc_core::ExperimentConfig;

mod commands;

use commands::{completions, curve, reference, run, validate};

fn dispatch(command: &Commands) -> Result<()> {
    match command {
        Commands::Run {
            experiment,
            out,
            format,
            analytic,
        } => run::handle(experiment, out.as_deref(), *format, *analytic),
        Commands::Reference {
            experiment,
            analytic,
            intervals,
            format,
        } => reference::handle(experiment, *analytic, *intervals, *format),
        Commands::Curve { speeds, config } => curve::handle(speeds, config.as_deref()),
        Commands::Validate { config } => validate::handle(config),
        Commands::Init => {
            print!("{}", ExperimentConfig::default().to_toml_string()?);
            Ok(())
        }
        Commands::Completions { shell, out } => completions::handle(*shell, out.as_deref()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: a global tracing subscriber was already installed");
    }

    let Some(command) = &cli.command else {
        let _ = build_cli_command().print_help();
        println!();
        return ExitCode::SUCCESS;
    };

    match dispatch(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
