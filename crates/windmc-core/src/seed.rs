//! Per-farm, per-checkpoint random streams derived from one base seed.
//!
//! Every draw in a run comes from its own `StdRng`, seeded from the base
//! seed, a lane tag (which farm, sweep or reference) and an index through a
//! SplitMix64 finalizer. Farms never share uniforms, checkpoints never
//! share uniforms, and the stream a checkpoint receives does not depend on
//! evaluation order, so sequential and parallel sweeps are bit-identical.

use rand::{rngs::StdRng, RngCore, SeedableRng};
use serde::Serialize;

use crate::params::Farm;

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

const LANE_SWEEP: u64 = 1;
const LANE_REFERENCE: u64 = 3;

/// SplitMix64 output function.
fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Factory for the independent random sources of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedStreams {
    base: u64,
}

impl SeedStreams {
    pub fn new(base: u64) -> Self {
        Self { base }
    }

    /// Draw a fresh base seed from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy().next_u64())
    }

    /// Use `seed` when given, otherwise draw one from entropy.
    pub fn from_option(seed: Option<u64>) -> Self {
        seed.map(Self::new).unwrap_or_else(Self::from_entropy)
    }

    /// Base seed; replaying a run with it reproduces every stream.
    pub fn base_seed(&self) -> u64 {
        self.base
    }

    /// Stream for `farm` at checkpoint position `checkpoint` of a sweep.
    pub fn checkpoint_rng(&self, checkpoint: usize, farm: Farm) -> StdRng {
        StdRng::seed_from_u64(self.derive(LANE_SWEEP + farm.index() as u64, checkpoint as u64))
    }

    /// Stream for `farm` in the large reference run.
    pub fn reference_rng(&self, farm: Farm) -> StdRng {
        StdRng::seed_from_u64(self.derive(LANE_REFERENCE + farm.index() as u64, 0))
    }

    fn derive(&self, lane: u64, index: u64) -> u64 {
        splitmix64(splitmix64(self.base ^ lane.wrapping_mul(GOLDEN_GAMMA)) ^ index)
    }
}
