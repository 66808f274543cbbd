//! Checkpoint schedules: the ascending sample sizes a convergence sweep
//! evaluates.

use serde::Serialize;

use crate::error::{WindError, WindResult};

/// Strictly ascending, non-empty list of checkpoint sample sizes (each >= 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CheckpointSchedule {
    sizes: Vec<usize>,
}

impl CheckpointSchedule {
    /// `step, 2·step, 3·step, …` up to and including `max` when `max` is a
    /// multiple of `step`.
    pub fn from_step(step: usize, max: usize) -> WindResult<Self> {
        if step == 0 {
            return Err(WindError::config("checkpoints.step", "must be >= 1"));
        }
        if max < step {
            return Err(WindError::config(
                "checkpoints.max",
                format!("must be >= checkpoints.step ({max} < {step})"),
            ));
        }
        Ok(Self {
            sizes: (step..=max).step_by(step).collect(),
        })
    }

    /// Explicit list of sizes; must be non-empty, >= 1 and strictly ascending.
    pub fn from_sizes(sizes: Vec<usize>) -> WindResult<Self> {
        if sizes.is_empty() {
            return Err(WindError::config("checkpoints", "must not be empty"));
        }
        if sizes[0] == 0 {
            return Err(WindError::config("checkpoints", "sizes must be >= 1"));
        }
        if let Some(pair) = sizes.windows(2).find(|w| w[0] >= w[1]) {
            return Err(WindError::config(
                "checkpoints",
                format!("must be strictly ascending ({} >= {})", pair[0], pair[1]),
            ));
        }
        Ok(Self { sizes })
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Always false for a constructed schedule
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Largest checkpoint size
    pub fn max(&self) -> usize {
        // non-empty by construction
        self.sizes.last().copied().unwrap_or(0)
    }
}
