pub mod dsp;
pub mod synth; // Monophonic knot voice, notes and parameters

pub use synth::{error::InitError, voice::KnotSynth};

/// The only sample rate the voice accepts.
pub const SAMPLE_RATE: u32 = 48_000;
/// Interleaved stereo output.
pub const CHANNELS: u32 = 2;
pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
pub(crate) const MAX_TIME: f32 = 10.0;
