//! Shared pseudo-random source for the noise LFOs.
//!
//! Both random LFO shapes draw from the same generator, so switching between
//! them continues one random sequence rather than restarting it. The
//! generator lives in a thread-local: the draw takes no lock and never
//! allocates, which keeps it usable from the audio callback.
//!
//! Each thread therefore has its own sequence. The random LFOs only draw
//! from `generate`, so a voice built on one thread and rendered on another
//! (as the player does) takes every value from the rendering thread.

use std::cell::RefCell;

use rand::{rngs::SmallRng, Rng, SeedableRng};

const SEED: u64 = 0x6b6e_6f74;

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::seed_from_u64(SEED));
}

/// Uniform random value in [0, 1).
#[inline]
pub fn random_unipolar() -> f32 {
    RNG.with(|rng| rng.borrow_mut().random::<f32>())
}

/// Uniform random value in [-1, 1).
#[inline]
pub fn random_bipolar() -> f32 {
    random_unipolar() * 2.0 - 1.0
}
