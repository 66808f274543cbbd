//! Integration tests for Weibull sampling and the power pipeline bounds

use rand::{rngs::StdRng, SeedableRng};
use windmc_algo::{ks_statistic, Portfolio, WindSpeedSampler};
use windmc_core::{DistributionParams, ExperimentConfig, Farm, SeedStreams};

const N: usize = 100_000;
// Well above the 0.1% KS critical value (≈ 1.95/√N ≈ 0.0062)
const KS_TOLERANCE: f64 = 0.01;

fn ks_for(scale: f64, shape: f64, seed: u64) -> f64 {
    let sampler = WindSpeedSampler::new(DistributionParams::new(scale, shape).unwrap()).unwrap();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut speeds = sampler.sample(N, &mut rng);
    ks_statistic(&mut speeds, |v| sampler.cdf(v))
}

#[test]
fn test_ks_fit_farm1_parameters() {
    let d = ks_for(10.0, 2.0, 42);
    assert!(d < KS_TOLERANCE, "KS statistic {d}");
}

#[test]
fn test_ks_fit_farm2_parameters() {
    let d = ks_for(12.0, 2.2, 43);
    assert!(d < KS_TOLERANCE, "KS statistic {d}");
}

#[test]
fn test_ks_fit_heavy_tail_shape() {
    let d = ks_for(7.5, 0.9, 44);
    assert!(d < KS_TOLERANCE, "KS statistic {d}");
}

#[test]
fn test_ks_detects_wrong_distribution() {
    // Samples from (10, 2.0) tested against (12, 2.2)
    let drawn = WindSpeedSampler::new(DistributionParams::new(10.0, 2.0).unwrap()).unwrap();
    let other = WindSpeedSampler::new(DistributionParams::new(12.0, 2.2).unwrap()).unwrap();
    let mut rng = StdRng::seed_from_u64(45);
    let mut speeds = drawn.sample(N, &mut rng);
    let d = ks_statistic(&mut speeds, |v| other.cdf(v));
    assert!(d > 0.05, "KS statistic {d}");
}

#[test]
fn test_sample_mean_matches_weibull_mean() {
    // E[V] = λ·Γ(1 + 1/k); Γ(1.5) = √π / 2
    let sampler = WindSpeedSampler::new(DistributionParams::new(10.0, 2.0).unwrap()).unwrap();
    let mut rng = StdRng::seed_from_u64(46);
    let speeds = sampler.sample(N, &mut rng);
    let mean = speeds.iter().sum::<f64>() / N as f64;
    let expected = 10.0 * std::f64::consts::PI.sqrt() / 2.0;
    // σ/√N ≈ 0.0146 for this distribution
    assert!((mean - expected).abs() < 0.08, "mean {mean} vs {expected}");
}

#[test]
fn test_farms_draw_from_independent_streams() {
    let streams = SeedStreams::new(42);
    let experiment = ExperimentConfig::default().resolve().unwrap();
    let portfolio = Portfolio::from_experiment(&experiment).unwrap();
    let first = portfolio
        .sampler(Farm::First)
        .sample(1_000, &mut streams.checkpoint_rng(0, Farm::First));
    let second = portfolio
        .sampler(Farm::First)
        .sample(1_000, &mut streams.checkpoint_rng(0, Farm::Second));
    // Same distribution, different uniforms
    assert_ne!(first, second);
}

#[test]
fn test_power_values_within_rated_bounds() {
    let experiment = ExperimentConfig::default().resolve().unwrap();
    let portfolio = Portfolio::from_experiment(&experiment).unwrap();
    let rated = experiment.curve.rated_power().value();
    let streams = SeedStreams::new(7);
    for farm in Farm::ALL {
        let power = portfolio.farm_power(farm, 50_000, &mut streams.reference_rng(farm));
        assert!(power.iter().all(|p| (0.0..=rated).contains(p)));
        // Both the flat rated region and the zero regions are reached
        assert!(power.iter().any(|p| *p == rated));
        assert!(power.iter().any(|p| *p == 0.0));
    }
}
