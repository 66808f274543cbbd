//! Piecewise turbine power curve.
//!
//! | Region       | Speed range              | Output          |
//! |--------------|--------------------------|-----------------|
//! | `BelowCutIn` | `v < cut_in`             | 0               |
//! | `Cubic`      | `cut_in ≤ v < rated`     | `a·v³ + b`      |
//! | `Rated`      | `rated ≤ v < cut_out`    | `P_r`           |
//! | `CutOut`     | `v ≥ cut_out`            | 0               |
//!
//! Each region is closed at its lower bound and open at its upper bound;
//! the last region is closed at cut-out. The drop from `P_r` to 0 at
//! cut-out is the turbine's high-wind shutdown.

use serde::Serialize;
use windmc_core::PowerCurveParams;

/// Operating region of a turbine at a given wind speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    BelowCutIn,
    Cubic,
    Rated,
    CutOut,
}

/// Pure mapping from wind speed (m/s) to power (kW).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerCurve {
    params: PowerCurveParams,
}

impl PowerCurve {
    pub fn new(params: PowerCurveParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PowerCurveParams {
        &self.params
    }

    /// Classify a wind speed. NaN falls through to `CutOut` and yields 0.
    #[inline]
    pub fn region(&self, v: f64) -> Region {
        let p = &self.params;
        if v < p.cut_in().value() {
            Region::BelowCutIn
        } else if v < p.rated_speed().value() {
            Region::Cubic
        } else if v < p.cut_out().value() {
            Region::Rated
        } else {
            Region::CutOut
        }
    }

    /// Power output at wind speed `v`.
    #[inline]
    pub fn evaluate(&self, v: f64) -> f64 {
        match self.region(v) {
            Region::BelowCutIn | Region::CutOut => 0.0,
            // Rounding can push the cubic a hair outside [0, P_r]
            Region::Cubic => (self.params.coeff_a() * (v * v * v) + self.params.coeff_b())
                .clamp(0.0, self.params.rated_power().value()),
            Region::Rated => self.params.rated_power().value(),
        }
    }

    /// Apply the curve elementwise; output has the same length as `speeds`.
    pub fn apply(&self, speeds: &[f64]) -> Vec<f64> {
        speeds.iter().map(|&v| self.evaluate(v)).collect()
    }
}
