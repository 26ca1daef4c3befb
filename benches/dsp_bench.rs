//! Benchmarks for DSP primitives and the full knot voice.
//!
//! Run with: cargo bench
//!
//! These benchmarks measure the per-buffer cost of the voice and its parts to
//! ensure they complete well within real-time audio deadlines.
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Low-level primitives (knot, envelope, LFO bank, noise)
//!   - scenarios/*  The complete voice with different modulation loads

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

criterion_group!(
    benches,
    // Low-level DSP primitives
    dsp::bench_knot,
    dsp::bench_envelope,
    dsp::bench_lfo,
    dsp::bench_noise,
    // Full voice
    scenarios::bench_voice,
);
criterion_main!(benches);
