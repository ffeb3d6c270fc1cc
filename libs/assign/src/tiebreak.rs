//! Tie-break sources.
//!
//! Candidates with identical fairness scores are ordered by a uniform value in
//! `[0, 1)` drawn once per candidate. The source is injected so tests can pin
//! the sequence and production can use any PRNG.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// A source of uniform values in `[0, 1)`.
pub trait TieBreaker {
    /// Draw the next tie-break value.
    fn next_tiebreak(&mut self) -> f64;
}

impl<F> TieBreaker for F
where
    F: FnMut() -> f64,
{
    fn next_tiebreak(&mut self) -> f64 {
        self()
    }
}

/// Tie-breaker backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngTieBreaker<R> {
    rng: R,
}

impl<R: Rng> RngTieBreaker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngTieBreaker<StdRng> {
    /// Reproducible tie-breaker for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl RngTieBreaker<ThreadRng> {
    /// Tie-breaker using the thread-local generator.
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> TieBreaker for RngTieBreaker<R> {
    fn next_tiebreak(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}
