//! Per-component pseudorandom state.
//!
//! Every stochastic component owns one of these; there is no process-wide
//! generator. The generator as it was at construction is kept aside so a
//! component can replay exactly the same draws on every call.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaChaRng;
use uuid::Uuid;

/// How a stochastic component treats its generator when sampling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Draw {
    /// Restore the construction-time state first (reproducible output)
    #[default]
    Replay,
    /// Continue from wherever the previous draw left the generator
    Advance,
}

/// A seeded generator plus the state captured at construction.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use signals::{Draw, RandomState};
///
/// let mut state = RandomState::from_seed(42);
/// let a: f64 = state.generator(Draw::Replay).random();
/// let b: f64 = state.generator(Draw::Replay).random();
/// let c: f64 = state.generator(Draw::Advance).random();
///
/// assert_eq!(a, b);
/// assert_ne!(b, c);
/// ```
#[derive(Debug, Clone)]
pub struct RandomState {
    seed: u64,
    captured: ChaChaRng,
    live: ChaChaRng,
}

impl RandomState {
    pub fn from_seed(seed: u64) -> Self {
        let captured = ChaChaRng::seed_from_u64(seed);
        Self {
            seed,
            live: captured.clone(),
            captured,
        }
    }

    /// Fresh state seeded from a random UUID
    pub fn from_entropy() -> Self {
        Self::from_seed(fresh_seed())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The generator to draw from, rewound first when `draw` is `Replay`.
    pub fn generator(&mut self, draw: Draw) -> &mut ChaChaRng {
        if draw == Draw::Replay {
            self.live = self.captured.clone();
        }
        &mut self.live
    }
}

pub fn fresh_seed() -> u64 {
    Uuid::new_v4().as_u64_pair().0
}

/// Independent per-component seeds derived from one master seed.
pub struct SeedSequence {
    rng: ChaChaRng,
}

impl SeedSequence {
    pub fn new(master: u64) -> Self {
        Self {
            rng: ChaChaRng::seed_from_u64(master),
        }
    }

    pub fn next_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }
}
