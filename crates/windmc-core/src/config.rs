//! Experiment configuration: the serde-facing file format and its
//! validated, typed form.
//!
//! [`ExperimentConfig`] mirrors the on-disk layout (TOML or JSON) with raw
//! numbers. [`ExperimentConfig::resolve`] checks every domain constraint
//! and produces an [`Experiment`], which is the only thing the simulation
//! engine accepts.
//!
//! ```toml
//! reference_samples = 100000
//! seed = 42
//!
//! [farm1]
//! scale = 10.0
//! shape = 2.0
//!
//! [farm2]
//! scale = 12.0
//! shape = 2.2
//!
//! [turbine]
//! cut_in = 3.0
//! rated_speed = 12.0
//! cut_out = 25.0
//! rated_power = 2000.0
//!
//! [checkpoints]
//! step = 100
//! max = 10000
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;
use crate::error::{WindError, WindResult};
use crate::params::{DistributionParams, Farm, PowerCurveParams};
use crate::schedule::CheckpointSchedule;
use crate::units::{Kilowatts, MetersPerSecond};

/// Reference samples should exceed the largest checkpoint by this factor.
pub const REFERENCE_MARGIN: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmSpec {
    /// Weibull scale λ (m/s)
    pub scale: f64,
    /// Weibull shape k
    pub shape: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurbineSpec {
    pub cut_in: f64,
    pub rated_speed: f64,
    pub cut_out: f64,
    /// Rated power (kW)
    pub rated_power: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointSpec {
    pub step: usize,
    pub max: usize,
    /// Explicit sizes; when present, `step`/`max` are ignored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<usize>>,
}

/// Raw experiment configuration as read from disk or built by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub farm1: FarmSpec,
    pub farm2: FarmSpec,
    pub turbine: TurbineSpec,
    pub checkpoints: CheckpointSpec,
    pub reference_samples: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub parallel: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            farm1: FarmSpec {
                scale: 10.0,
                shape: 2.0,
            },
            farm2: FarmSpec {
                scale: 12.0,
                shape: 2.2,
            },
            turbine: TurbineSpec {
                cut_in: 3.0,
                rated_speed: 12.0,
                cut_out: 25.0,
                rated_power: 2000.0,
            },
            checkpoints: CheckpointSpec {
                step: 100,
                max: 10_000,
                sizes: None,
            },
            reference_samples: 100_000,
            seed: Some(42),
            parallel: false,
        }
    }
}

impl ExperimentConfig {
    /// Validate every parameter and build the typed [`Experiment`].
    pub fn resolve(&self) -> WindResult<Experiment> {
        let farms = [
            DistributionParams::for_farm(Farm::First.key(), self.farm1.scale, self.farm1.shape)?,
            DistributionParams::for_farm(Farm::Second.key(), self.farm2.scale, self.farm2.shape)?,
        ];
        let curve = PowerCurveParams::new(
            MetersPerSecond(self.turbine.cut_in),
            MetersPerSecond(self.turbine.rated_speed),
            MetersPerSecond(self.turbine.cut_out),
            Kilowatts(self.turbine.rated_power),
        )?;
        let schedule = match &self.checkpoints.sizes {
            Some(sizes) => CheckpointSchedule::from_sizes(sizes.clone())?,
            None => CheckpointSchedule::from_step(self.checkpoints.step, self.checkpoints.max)?,
        };
        if self.reference_samples <= schedule.max() {
            return Err(WindError::config(
                "reference_samples",
                format!(
                    "must be larger than the largest checkpoint ({} <= {})",
                    self.reference_samples,
                    schedule.max()
                ),
            ));
        }

        Ok(Experiment {
            farms,
            curve,
            schedule,
            reference_samples: self.reference_samples,
            seed: self.seed,
            parallel: self.parallel,
        })
    }

    /// Parse TOML text
    pub fn from_toml_str(text: &str) -> WindResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Parse JSON text
    pub fn from_json_str(text: &str) -> WindResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load from `.toml` or `.json` by extension; unknown extensions try
    /// TOML first, then JSON.
    pub fn load(path: &Path) -> WindResult<Self> {
        let data = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml_str(&data),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&data),
            _ => Self::from_toml_str(&data).or_else(|_| Self::from_json_str(&data)),
        }
    }

    pub fn to_toml_string(&self) -> WindResult<String> {
        toml::to_string_pretty(self).map_err(|err| WindError::Parse(err.to_string()))
    }
}

/// A fully validated experiment. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Experiment {
    pub farms: [DistributionParams; 2],
    pub curve: PowerCurveParams,
    pub schedule: CheckpointSchedule,
    pub reference_samples: usize,
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Experiment {
    /// Legal-but-questionable settings worth surfacing to the user.
    pub fn diagnostics(&self) -> Diagnostics {
        let mut diag = Diagnostics::new();
        let max = self.schedule.max();
        if self.reference_samples < max.saturating_mul(REFERENCE_MARGIN) {
            diag.add_warning(
                "reference",
                &format!(
                    "reference sample ({}) is less than {}x the largest checkpoint ({}); \
                     the reference carries comparable sampling error",
                    self.reference_samples, REFERENCE_MARGIN, max
                ),
            );
        }
        if self.schedule.len() < 2 {
            diag.add_warning(
                "schedule",
                "a single checkpoint cannot show error decay",
            );
        }
        diag
    }
}
