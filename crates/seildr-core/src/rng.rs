//! Deterministic, independent per-replicate random streams.
//!
//! # Determinism strategy
//!
//! Every replicate owns one `ChaCha8Rng` keyed by the ensemble's master seed,
//! with the ChaCha *stream* selected by the replicate index:
//!
//!   key    = seed_from_u64(master_seed)
//!   stream = replicate.0
//!
//! ChaCha is a counter-based generator: each (key, stream) pair addresses its
//! own 2^64-block keystream, so two replicates never read overlapping output
//! no matter how many draws each makes.  This means:
//!
//! - Replicates never share RNG state (no contention, no ordering dependency).
//! - Outcomes of replicate `r` do not depend on how many replicates run, on
//!   worker count, or on completion order.
//! - ChaCha output is defined bit-for-bit, so a `(master_seed, replicate)`
//!   pair reproduces identically on every platform.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Binomial, Distribution};

use crate::ReplicateId;

/// Clamp a probability into `[0, 1]`, mapping NaN to 0.
///
/// Guards sampling routines against floating-point overshoot such as
/// `1 - exp(-λ)` for very large λ.
#[inline]
pub fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

// ── ReplicateRng ──────────────────────────────────────────────────────────────

/// Per-replicate deterministic RNG.
///
/// Create one per replicate and pass it by `&mut` into every stepper call of
/// that replicate.  The type is deliberately not `Clone`: duplicating a stream
/// would silently correlate two realizations.
pub struct ReplicateRng(ChaCha8Rng);

impl ReplicateRng {
    /// Seed deterministically from the ensemble's master seed and a replicate ID.
    pub fn new(master_seed: u64, replicate: ReplicateId) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(master_seed);
        inner.set_stream(replicate.0 as u64);
        ReplicateRng(inner)
    }

    /// The ChaCha stream this generator reads from.
    pub fn stream(&self) -> u64 {
        self.0.get_stream()
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(clamp_probability(p))
    }

    /// Number of successes in `n` independent trials with probability `p`.
    ///
    /// `p` is clamped first, so the draw cannot fail.
    pub fn binomial(&mut self, n: u32, p: f64) -> u32 {
        let p = clamp_probability(p);
        if n == 0 || p == 0.0 {
            return 0;
        }
        if p == 1.0 {
            return n;
        }
        // `p` is in (0, 1) here, which is the whole domain `Binomial::new` accepts.
        let dist = Binomial::new(n as u64, p);
        debug_assert!(dist.is_ok(), "Binomial::new({n}, {p}) rejected a clamped probability");
        match dist {
            Ok(dist) => dist.sample(&mut self.0) as u32,
            Err(_) => 0,
        }
    }
}
