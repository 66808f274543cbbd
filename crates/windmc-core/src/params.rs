//! Validated model parameters: per-farm wind distributions and the turbine
//! power curve.
//!
//! Both types can only be constructed through their checked constructors,
//! so any value of these types already satisfies its domain constraints.

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, WindError, WindResult};
use crate::units::{Kilowatts, MetersPerSecond};

/// The two farms of the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Farm {
    First,
    Second,
}

impl Farm {
    pub const ALL: [Farm; 2] = [Farm::First, Farm::Second];

    /// Zero-based position in per-farm arrays
    pub fn index(self) -> usize {
        match self {
            Farm::First => 0,
            Farm::Second => 1,
        }
    }

    /// Configuration key prefix used in error messages
    pub fn key(self) -> &'static str {
        match self {
            Farm::First => "farm1",
            Farm::Second => "farm2",
        }
    }
}

impl std::fmt::Display for Farm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Two-parameter Weibull distribution of wind speed at one farm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistributionParams {
    scale: MetersPerSecond,
    shape: f64,
}

impl DistributionParams {
    /// Build distribution parameters, rejecting non-positive or non-finite
    /// scale (λ) and shape (k).
    pub fn new(scale: f64, shape: f64) -> WindResult<Self> {
        Self::for_farm("distribution", scale, shape)
    }

    /// Same as [`DistributionParams::new`] but error messages carry the
    /// farm's configuration key.
    pub fn for_farm(prefix: &str, scale: f64, shape: f64) -> WindResult<Self> {
        require_positive(&format!("{prefix}.scale"), scale)?;
        require_positive(&format!("{prefix}.shape"), shape)?;
        Ok(Self {
            scale: MetersPerSecond(scale),
            shape,
        })
    }

    /// Scale parameter λ
    pub fn scale(&self) -> MetersPerSecond {
        self.scale
    }

    /// Shape parameter k
    pub fn shape(&self) -> f64 {
        self.shape
    }
}

/// Power curve of one turbine model.
///
/// The cubic segment `a·v³ + b` is fitted once at construction so that it
/// passes through zero at cut-in and through rated power at rated speed:
///
/// ```text
/// a = P_r / (v_rated³ − v_cut_in³)
/// b = −a · v_cut_in³
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerCurveParams {
    cut_in: MetersPerSecond,
    rated_speed: MetersPerSecond,
    cut_out: MetersPerSecond,
    rated_power: Kilowatts,
    coeff_a: f64,
    coeff_b: f64,
}

impl PowerCurveParams {
    /// Build and validate a power curve.
    ///
    /// Requires all inputs to be finite and > 0, and
    /// `cut_in < rated_speed < cut_out`.
    pub fn new(
        cut_in: MetersPerSecond,
        rated_speed: MetersPerSecond,
        cut_out: MetersPerSecond,
        rated_power: Kilowatts,
    ) -> WindResult<Self> {
        require_positive("turbine.cut_in", cut_in.value())?;
        require_positive("turbine.rated_speed", rated_speed.value())?;
        require_positive("turbine.cut_out", cut_out.value())?;
        require_positive("turbine.rated_power", rated_power.value())?;

        if cut_in >= rated_speed {
            return Err(WindError::config(
                "turbine.cut_in",
                format!("must be < rated_speed ({cut_in} >= {rated_speed})"),
            ));
        }
        if rated_speed >= cut_out {
            return Err(WindError::config(
                "turbine.rated_speed",
                format!("must be < cut_out ({rated_speed} >= {cut_out})"),
            ));
        }

        let coeff_a = rated_power.value() / (rated_speed.cubed() - cut_in.cubed());
        let coeff_b = -coeff_a * cut_in.cubed();

        Ok(Self {
            cut_in,
            rated_speed,
            cut_out,
            rated_power,
            coeff_a,
            coeff_b,
        })
    }

    pub fn cut_in(&self) -> MetersPerSecond {
        self.cut_in
    }

    pub fn rated_speed(&self) -> MetersPerSecond {
        self.rated_speed
    }

    pub fn cut_out(&self) -> MetersPerSecond {
        self.cut_out
    }

    pub fn rated_power(&self) -> Kilowatts {
        self.rated_power
    }

    /// Cubic coefficient `a`
    pub fn coeff_a(&self) -> f64 {
        self.coeff_a
    }

    /// Constant offset `b`
    pub fn coeff_b(&self) -> f64 {
        self.coeff_b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_curve() -> PowerCurveParams {
        PowerCurveParams::new(
            MetersPerSecond(3.0),
            MetersPerSecond(12.0),
            MetersPerSecond(25.0),
            Kilowatts(2000.0),
        )
        .unwrap()
    }

    #[test]
    fn test_distribution_rejects_non_positive() {
        assert!(DistributionParams::new(10.0, 2.0).is_ok());

        let err = DistributionParams::for_farm("farm1", 0.0, 2.0).unwrap_err();
        assert!(err.to_string().contains("farm1.scale"));

        let err = DistributionParams::for_farm("farm2", 12.0, -2.2).unwrap_err();
        assert!(err.to_string().contains("farm2.shape"));

        assert!(DistributionParams::new(f64::NAN, 2.0).is_err());
    }

    #[test]
    fn test_cubic_coefficients() {
        let curve = reference_curve();
        let a = 2000.0 / (1728.0 - 27.0);
        assert!((curve.coeff_a() - a).abs() < 1e-12);
        assert!((curve.coeff_b() + a * 27.0).abs() < 1e-9);

        // Passes through the two anchor points
        let at_cut_in = curve.coeff_a() * 27.0 + curve.coeff_b();
        let at_rated = curve.coeff_a() * 1728.0 + curve.coeff_b();
        assert!(at_cut_in.abs() < 1e-9);
        assert!((at_rated - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_power_curve_ordering_constraints() {
        let err = PowerCurveParams::new(
            MetersPerSecond(12.0),
            MetersPerSecond(12.0),
            MetersPerSecond(25.0),
            Kilowatts(2000.0),
        )
        .unwrap_err();
        assert!(err.to_string().contains("turbine.cut_in"));

        let err = PowerCurveParams::new(
            MetersPerSecond(3.0),
            MetersPerSecond(25.0),
            MetersPerSecond(20.0),
            Kilowatts(2000.0),
        )
        .unwrap_err();
        assert!(err.to_string().contains("turbine.rated_speed"));
    }

    #[test]
    fn test_power_curve_rejects_non_positive_power() {
        let err = PowerCurveParams::new(
            MetersPerSecond(3.0),
            MetersPerSecond(12.0),
            MetersPerSecond(25.0),
            Kilowatts(0.0),
        )
        .unwrap_err();
        assert!(err.to_string().contains("turbine.rated_power"));
    }

    #[test]
    fn test_farm_indexing() {
        assert_eq!(Farm::First.index(), 0);
        assert_eq!(Farm::Second.index(), 1);
        assert_eq!(Farm::Second.to_string(), "farm2");
    }
}
