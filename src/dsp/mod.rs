//! Low-level DSP primitives used by the knot voice.
//!
//! These components are allocation-free and realtime-safe once constructed,
//! making them safe to embed directly inside voice structs. The only table
//! built up front is the noise field, which is shared read-only by every voice.

/// 3-D point arithmetic for the knot curve.
pub mod cartesian;
/// Attack/decay/sustain/release envelope generators.
pub mod envelope;
/// Torus knot oscillator producing a 3-D point per sample.
pub mod knot;
/// Switchable low frequency oscillator bank.
pub mod lfo;
/// Precomputed 2-D coherent noise field.
pub mod noise;
/// Phase accumulation and the FM carrier.
pub mod oscillator;
/// Process-wide pseudo-random source.
pub mod random;
/// Euler rotation of 3-D points.
pub mod rotation;
/// One-pole parameter smoothing.
pub mod smooth;

pub use cartesian::Cartesian;
pub use envelope::{Envelope, EnvelopeCurve, EnvelopeState};
pub use knot::KnotOscillator;
pub use lfo::{Lfo, LfoBank, LfoShape};
pub use noise::{shared_noise_field, NoiseField};
pub use oscillator::{advance_phase, SineOscillator};
pub use rotation::{EulerPhase, Rotation3D};
pub use smooth::SmoothedValue;
