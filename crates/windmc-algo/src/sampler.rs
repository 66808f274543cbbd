//! Weibull wind-speed sampling by inverse-transform.
//!
//! For scale λ and shape k the Weibull CDF is `F(v) = 1 − exp(−(v/λ)^k)`,
//! so a uniform draw `U` maps to a speed through the closed-form inverse
//!
//! ```text
//! v = λ · (−ln(1 − U))^(1/k)
//! ```
//!
//! The random source is always passed in by the caller; the sampler holds
//! no generator state of its own.

use rand::Rng;
use statrs::distribution::{Continuous, ContinuousCDF, Weibull};
use windmc_core::{DistributionParams, WindError, WindResult};

/// Draws i.i.d. wind speeds for one farm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindSpeedSampler {
    params: DistributionParams,
    distribution: Weibull,
}

impl WindSpeedSampler {
    pub fn new(params: DistributionParams) -> WindResult<Self> {
        let distribution = Weibull::new(params.shape(), params.scale().value())
            .map_err(|err| WindError::config("weibull", err.to_string()))?;
        Ok(Self {
            params,
            distribution,
        })
    }

    /// Map a uniform `u ∈ [0, 1)` to a wind speed.
    #[inline]
    pub fn inverse_cdf(&self, u: f64) -> f64 {
        let scale = self.params.scale().value();
        let shape = self.params.shape();
        // −ln(1 − u) via ln_1p keeps precision for small u
        scale * (-(-u).ln_1p()).powf(1.0 / shape)
    }

    /// Draw `n` speeds. `n == 0` yields an empty vector.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<f64> {
        (0..n).map(|_| self.inverse_cdf(rng.gen::<f64>())).collect()
    }

    /// Weibull CDF; zero for negative speeds.
    pub fn cdf(&self, v: f64) -> f64 {
        self.distribution.cdf(v)
    }

    /// Weibull probability density; zero for negative speeds.
    pub fn density(&self, v: f64) -> f64 {
        self.distribution.pdf(v)
    }
}

/// One-sample Kolmogorov–Smirnov statistic `D = sup |F_n(x) − F(x)|`.
///
/// Sorts `samples` in place. Returns 0 for an empty slice.
pub fn ks_statistic(samples: &mut [f64], cdf: impl Fn(f64) -> f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.sort_by(f64::total_cmp);
    let n = samples.len() as f64;
    samples
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let f = cdf(x);
            let above = (i + 1) as f64 / n - f;
            let below = f - i as f64 / n;
            above.max(below)
        })
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn sampler(scale: f64, shape: f64) -> WindSpeedSampler {
        WindSpeedSampler::new(DistributionParams::new(scale, shape).unwrap()).unwrap()
    }

    #[test]
    fn test_inverse_cdf_inverts_cdf() {
        let s = sampler(10.0, 2.0);
        for u in [0.0, 0.01, 0.25, 0.5, 0.9, 0.999] {
            let v = s.inverse_cdf(u);
            assert!((s.cdf(v) - u).abs() < 1e-12, "u={u} v={v}");
        }
    }

    #[test]
    fn test_median_matches_closed_form() {
        // median = λ · (ln 2)^(1/k)
        let s = sampler(12.0, 2.2);
        let expected = 12.0 * std::f64::consts::LN_2.powf(1.0 / 2.2);
        assert!((s.inverse_cdf(0.5) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zero_samples_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(sampler(10.0, 2.0).sample(0, &mut rng).is_empty());
    }

    #[test]
    fn test_samples_are_non_negative() {
        let mut rng = StdRng::seed_from_u64(7);
        let speeds = sampler(10.0, 0.8).sample(10_000, &mut rng);
        assert_eq!(speeds.len(), 10_000);
        assert!(speeds.iter().all(|v| *v >= 0.0 && v.is_finite()));
    }

    #[test]
    fn test_density_integrates_to_cdf() {
        let s = sampler(10.0, 2.0);
        // Trapezoid from 0 to 15
        let n = 30_000;
        let h = 15.0 / n as f64;
        let mut area = 0.5 * (s.density(0.0) + s.density(15.0));
        for i in 1..n {
            area += s.density(i as f64 * h);
        }
        area *= h;
        assert!((area - s.cdf(15.0)).abs() < 1e-6);
    }

    #[test]
    fn test_cdf_and_density_outside_support() {
        let s = sampler(10.0, 2.0);
        assert_eq!(s.cdf(-1.0), 0.0);
        assert_eq!(s.cdf(0.0), 0.0);
        assert_eq!(s.density(-1.0), 0.0);
        // k = 2 density at the scale: (2/λ)·e⁻¹
        let expected = 0.2 * (-1.0f64).exp();
        assert!((s.density(10.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_ks_statistic_on_perfect_grid() {
        // Quantiles at (i + 0.5)/n give D = 0.5/n exactly
        let s = sampler(10.0, 2.0);
        let n = 1000;
        let mut grid: Vec<f64> = (0..n)
            .map(|i| s.inverse_cdf((i as f64 + 0.5) / n as f64))
            .collect();
        let d = ks_statistic(&mut grid, |v| s.cdf(v));
        assert!((d - 0.5 / n as f64).abs() < 1e-9);
    }
}
