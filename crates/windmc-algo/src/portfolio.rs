//! Portfolio aggregation and the per-scenario simulation pipeline.
//!
//! One scenario draws a wind speed at each farm, maps both through the
//! power curve and sums them. A batch of `n` scenarios is built as
//!
//! ```text
//! sampler(farm1) ─► power curve ─┐
//!                                ├─► aggregate ─► total power [n]
//! sampler(farm2) ─► power curve ─┘
//! ```
//!
//! Each farm draws from its own random source.

use rand::Rng;
use windmc_core::{DistributionParams, Experiment, Farm, PowerCurveParams, WindError, WindResult};

use crate::power_curve::PowerCurve;
use crate::sampler::WindSpeedSampler;
use crate::stats::BatchStats;

/// Elementwise sum of the two farms' power vectors.
///
/// Unequal lengths are an internal wiring fault and are always reported,
/// never truncated.
pub fn aggregate(farm1: &[f64], farm2: &[f64]) -> WindResult<Vec<f64>> {
    if farm1.len() != farm2.len() {
        return Err(WindError::DimensionMismatch {
            left: farm1.len(),
            right: farm2.len(),
        });
    }
    Ok(farm1.iter().zip(farm2).map(|(a, b)| a + b).collect())
}

/// Two farms sharing one turbine model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Portfolio {
    samplers: [WindSpeedSampler; 2],
    curve: PowerCurve,
}

impl Portfolio {
    pub fn new(farms: [DistributionParams; 2], curve: PowerCurveParams) -> WindResult<Self> {
        let [first, second] = farms;
        Ok(Self {
            samplers: [WindSpeedSampler::new(first)?, WindSpeedSampler::new(second)?],
            curve: PowerCurve::new(curve),
        })
    }

    pub fn from_experiment(experiment: &Experiment) -> WindResult<Self> {
        Self::new(experiment.farms, experiment.curve)
    }

    pub fn sampler(&self, farm: Farm) -> &WindSpeedSampler {
        &self.samplers[farm.index()]
    }

    pub fn curve(&self) -> &PowerCurve {
        &self.curve
    }

    /// Upper bound on total power: both farms at rated output.
    pub fn max_power(&self) -> f64 {
        2.0 * self.curve.params().rated_power().value()
    }

    /// Power of `n` scenarios at a single farm.
    pub fn farm_power<R: Rng + ?Sized>(&self, farm: Farm, n: usize, rng: &mut R) -> Vec<f64> {
        let speeds = self.sampler(farm).sample(n, rng);
        self.curve.apply(&speeds)
    }

    /// Total portfolio power of `n` scenarios.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        n: usize,
        first: &mut R,
        second: &mut R,
    ) -> WindResult<Vec<f64>> {
        let p1 = self.farm_power(Farm::First, n, first);
        let p2 = self.farm_power(Farm::Second, n, second);
        aggregate(&p1, &p2)
    }

    /// Simulate `n` scenarios and reduce them to summary statistics. The
    /// per-scenario vectors are dropped before returning.
    pub fn simulate_stats<R: Rng + ?Sized>(
        &self,
        n: usize,
        first: &mut R,
        second: &mut R,
    ) -> WindResult<BatchStats> {
        let total = self.simulate(n, first, second)?;
        Ok(BatchStats::from_slice(&total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use windmc_core::ExperimentConfig;

    #[test]
    fn test_aggregate_literal_example() {
        let total = aggregate(&[0.0, 500.0, 2000.0], &[100.0, 0.0, 0.0]).unwrap();
        assert_eq!(total, vec![100.0, 500.0, 2000.0]);
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_aggregate_length_mismatch() {
        let err = aggregate(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            WindError::DimensionMismatch { left: 2, right: 1 }
        ));
    }

    #[test]
    fn test_simulate_bounds_and_length() {
        let experiment = ExperimentConfig::default().resolve().unwrap();
        let portfolio = Portfolio::from_experiment(&experiment).unwrap();
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(2);
        let total = portfolio.simulate(5_000, &mut a, &mut b).unwrap();
        assert_eq!(total.len(), 5_000);
        assert!(total
            .iter()
            .all(|p| (0.0..=portfolio.max_power()).contains(p)));
    }

    #[test]
    fn test_simulate_stats_matches_simulate() {
        let experiment = ExperimentConfig::default().resolve().unwrap();
        let portfolio = Portfolio::from_experiment(&experiment).unwrap();
        let total = portfolio
            .simulate(
                1_000,
                &mut StdRng::seed_from_u64(3),
                &mut StdRng::seed_from_u64(4),
            )
            .unwrap();
        let stats = portfolio
            .simulate_stats(
                1_000,
                &mut StdRng::seed_from_u64(3),
                &mut StdRng::seed_from_u64(4),
            )
            .unwrap();
        assert_eq!(stats, BatchStats::from_slice(&total));
    }
}
