//! # windmc-core: Wind Portfolio Model Core
//!
//! Value types shared by the simulation engine and its front-ends.
//!
//! A portfolio has two farms. Each farm's wind speed follows its own
//! two-parameter Weibull distribution ([`DistributionParams`]); both farms
//! run the same turbine model ([`PowerCurveParams`]). A convergence sweep
//! evaluates the Monte Carlo estimate of expected portfolio power at an
//! ascending [`CheckpointSchedule`], and compares it against a much larger
//! reference run.
//!
//! ## Quick Start
//!
//! ```
//! use windmc_core::ExperimentConfig;
//!
//! let experiment = ExperimentConfig::default().resolve()?;
//! assert_eq!(experiment.schedule.max(), 10_000);
//! assert_eq!(experiment.curve.rated_power().value(), 2000.0);
//! # Ok::<(), windmc_core::WindError>(())
//! ```
//!
//! ## Modules
//!
//! - [`config`] - file format and validated [`Experiment`]
//! - [`params`] - distribution and power-curve parameters
//! - [`schedule`] - checkpoint sample sizes
//! - [`seed`] - independent random streams per farm and checkpoint
//! - [`diagnostics`] - non-fatal configuration findings
//! - [`units`] - m/s and kW newtypes
//! - [`error`] - [`WindError`] taxonomy

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod params;
pub mod schedule;
pub mod seed;
pub mod units;

pub use config::{CheckpointSpec, Experiment, ExperimentConfig, FarmSpec, TurbineSpec};
pub use diagnostics::{DiagnosticIssue, Diagnostics};
pub use error::{WindError, WindResult};
pub use params::{DistributionParams, Farm, PowerCurveParams};
pub use schedule::CheckpointSchedule;
pub use seed::SeedStreams;
pub use units::{Kilowatts, MetersPerSecond};
