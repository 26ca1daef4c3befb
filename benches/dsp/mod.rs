//! Benchmarks for low-level DSP primitives.

mod envelope;
mod knot;
mod lfo;
mod noise;

pub use envelope::bench_envelope;
pub use knot::bench_knot;
pub use lfo::bench_lfo;
pub use noise::bench_noise;
