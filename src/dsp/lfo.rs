//! Switchable low frequency oscillator bank.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::f32::consts::TAU;

use crate::dsp::random::random_bipolar;

/*
Low Frequency Oscillators
=========================

An LFO is an oscillator running at sub-audio rates (here 0.05 - 20 Hz) whose
output moves other parameters: pitch, morph, and so on. Output is bipolar,
-1.0 to +1.0.

Vocabulary
----------

  phase       Position in the current cycle, NORMALIZED to [0, 1) here (not
              radians). Every shape reads the same phase.

  increment   Phase added per sample: frequency / sample_rate.

  wrap        When the phase reaches 1.0, one is subtracted. The random
              shapes draw their next value on the wrap.


The Six Shapes
--------------

    SINE       sin(2π·phase)                              smooth sweep
    TRIANGLE   1 − 4·|phase − 0.5|                        -1 at 0, +1 at 0.5
    RAMP       2·phase − 1                                rising saw
    SQUARE     +1 for phase < 0.5, else −1                hard switch
    S&H        new random value on every wrap             stepped noise
    SMOOTH     random targets joined by smoothstep        wandering noise

The smoothed noise glides between successive random targets with the
smoothstep curve t² (3 − 2t), so it starts and ends each cycle with zero
slope:

      target₁ ·
              ·‾‾‾‾‾‾·..
                         ‾‾··.__________ target₂
      |← one cycle (phase 0 → 1) →|


Switching Shapes
----------------

The bank owns one instance of every shape and points at one of them. When
the shape changes, the outgoing oscillator's frequency and phase are copied
into the incoming one BEFORE the handle moves:

    outgoing.phase = 0.37 ──copy──→ incoming.phase = 0.37

The waveform shape changes instantly but the position in the cycle does not,
so a rhythmic modulation keeps its timing across the switch.
*/

/// Selects one of the six LFO shapes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LfoShape {
    Sine,
    Triangle,
    Ramp,
    Square,
    SampleAndHold,
    SmoothNoise,
}

impl LfoShape {
    pub const ALL: [LfoShape; 6] = [
        LfoShape::Sine,
        LfoShape::Triangle,
        LfoShape::Ramp,
        LfoShape::Square,
        LfoShape::SampleAndHold,
        LfoShape::SmoothNoise,
    ];

    /// Shape for a parameter value; anything out of the table is `None`.
    pub fn from_index(index: i32) -> Option<LfoShape> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Short display name.
    pub fn label(self) -> &'static str {
        match self {
            LfoShape::Sine => "SINE",
            LfoShape::Triangle => "TRI",
            LfoShape::Ramp => "RAMP",
            LfoShape::Square => "SQR",
            LfoShape::SampleAndHold => "S&H",
            LfoShape::SmoothNoise => "SMTH",
        }
    }
}

/// Normalized phase accumulator shared by every LFO shape.
#[derive(Debug, Clone, Copy)]
pub struct LfoPhase {
    sample_rate: f32,
    frequency: f32,
    increment: f32,
    phase: f32,
}

impl LfoPhase {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            frequency: 0.0,
            increment: 0.0,
            phase: 0.0,
        }
    }

    pub fn set_frequency(&mut self, frequency_hz: f32) {
        self.frequency = frequency_hz;
        self.increment = frequency_hz / self.sample_rate;
    }

    pub fn set_phase(&mut self, phase: f32) {
        let wrapped = phase.rem_euclid(1.0);
        // tiny negatives round up to exactly 1.0 in f32
        self.phase = if wrapped >= 1.0 { 0.0 } else { wrapped };
    }

    /// Step the phase; true when it wrapped past the end of the cycle.
    #[inline]
    fn advance(&mut self) -> bool {
        self.phase += self.increment;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
            true
        } else {
            false
        }
    }
}

/// Common contract of every LFO shape.
///
/// Phase handling lives in the provided methods so all shapes share exactly
/// the same semantics; a shape only decides what value a phase maps to.
pub trait Lfo {
    fn accumulator(&self) -> &LfoPhase;

    fn accumulator_mut(&mut self) -> &mut LfoPhase;

    /// Advance one sample and return the new output in [-1, 1].
    fn generate(&mut self) -> f32;

    fn set_frequency(&mut self, frequency_hz: f32) {
        self.accumulator_mut().set_frequency(frequency_hz);
    }

    fn frequency(&self) -> f32 {
        self.accumulator().frequency
    }

    /// Set the normalized phase; values outside [0, 1) are wrapped.
    fn set_phase(&mut self, phase: f32) {
        self.accumulator_mut().set_phase(phase);
    }

    fn phase(&self) -> f32 {
        self.accumulator().phase
    }
}

pub struct SineLfo {
    acc: LfoPhase,
}

pub struct TriangleLfo {
    acc: LfoPhase,
}

pub struct RampLfo {
    acc: LfoPhase,
}

pub struct SquareLfo {
    acc: LfoPhase,
}

/// Stepped random: holds one value for a whole cycle.
///
/// The first value is drawn by the first `generate`, not by `new`, so every
/// draw happens on the thread that renders.
pub struct SampleAndHoldLfo {
    acc: LfoPhase,
    held: f32,
    seeded: bool,
}

/// Smoothed random: glides from one random target to the next each cycle.
///
/// Like [`SampleAndHoldLfo`], the first target is drawn on the first sample.
pub struct SmoothNoiseLfo {
    acc: LfoPhase,
    from: f32,
    interval: f32,
    seeded: bool,
}

impl SineLfo {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            acc: LfoPhase::new(sample_rate),
        }
    }
}

impl TriangleLfo {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            acc: LfoPhase::new(sample_rate),
        }
    }
}

impl RampLfo {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            acc: LfoPhase::new(sample_rate),
        }
    }
}

impl SquareLfo {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            acc: LfoPhase::new(sample_rate),
        }
    }
}

impl SampleAndHoldLfo {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            acc: LfoPhase::new(sample_rate),
            held: 0.0,
            seeded: false,
        }
    }
}

impl SmoothNoiseLfo {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            acc: LfoPhase::new(sample_rate),
            from: 0.0,
            interval: 0.0,
            seeded: false,
        }
    }

    /// Start the next segment from wherever the last one ended.
    fn next_target(&mut self) {
        self.from += self.interval;
        self.interval = random_bipolar() - self.from;
    }
}

impl Lfo for SineLfo {
    fn accumulator(&self) -> &LfoPhase {
        &self.acc
    }

    fn accumulator_mut(&mut self) -> &mut LfoPhase {
        &mut self.acc
    }

    #[inline]
    fn generate(&mut self) -> f32 {
        self.acc.advance();
        (TAU * self.acc.phase).sin()
    }
}

impl Lfo for TriangleLfo {
    fn accumulator(&self) -> &LfoPhase {
        &self.acc
    }

    fn accumulator_mut(&mut self) -> &mut LfoPhase {
        &mut self.acc
    }

    #[inline]
    fn generate(&mut self) -> f32 {
        self.acc.advance();
        1.0 - 4.0 * (self.acc.phase - 0.5).abs()
    }
}

impl Lfo for RampLfo {
    fn accumulator(&self) -> &LfoPhase {
        &self.acc
    }

    fn accumulator_mut(&mut self) -> &mut LfoPhase {
        &mut self.acc
    }

    #[inline]
    fn generate(&mut self) -> f32 {
        self.acc.advance();
        2.0 * self.acc.phase - 1.0
    }
}

impl Lfo for SquareLfo {
    fn accumulator(&self) -> &LfoPhase {
        &self.acc
    }

    fn accumulator_mut(&mut self) -> &mut LfoPhase {
        &mut self.acc
    }

    #[inline]
    fn generate(&mut self) -> f32 {
        self.acc.advance();
        if self.acc.phase < 0.5 {
            1.0
        } else {
            -1.0
        }
    }
}

impl Lfo for SampleAndHoldLfo {
    fn accumulator(&self) -> &LfoPhase {
        &self.acc
    }

    fn accumulator_mut(&mut self) -> &mut LfoPhase {
        &mut self.acc
    }

    #[inline]
    fn generate(&mut self) -> f32 {
        let wrapped = self.acc.advance();
        if wrapped || !self.seeded {
            self.held = random_bipolar();
            self.seeded = true;
        }
        self.held
    }
}

impl Lfo for SmoothNoiseLfo {
    fn accumulator(&self) -> &LfoPhase {
        &self.acc
    }

    fn accumulator_mut(&mut self) -> &mut LfoPhase {
        &mut self.acc
    }

    #[inline]
    fn generate(&mut self) -> f32 {
        let wrapped = self.acc.advance();
        if wrapped || !self.seeded {
            self.next_target();
            self.seeded = true;
        }
        let t = self.acc.phase;
        let smooth = t * t * (3.0 - 2.0 * t);
        self.from + self.interval * smooth
    }
}

/// One active LFO among six owned instances.
pub struct LfoBank {
    sine: SineLfo,
    triangle: TriangleLfo,
    ramp: RampLfo,
    square: SquareLfo,
    sample_and_hold: SampleAndHoldLfo,
    smooth_noise: SmoothNoiseLfo,
    active: LfoShape,
}

impl LfoBank {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sine: SineLfo::new(sample_rate),
            triangle: TriangleLfo::new(sample_rate),
            ramp: RampLfo::new(sample_rate),
            square: SquareLfo::new(sample_rate),
            sample_and_hold: SampleAndHoldLfo::new(sample_rate),
            smooth_noise: SmoothNoiseLfo::new(sample_rate),
            active: LfoShape::Sine,
        }
    }

    pub fn shape(&self) -> LfoShape {
        self.active
    }

    /// Point the handle at another shape, carrying frequency and phase over.
    pub fn select(&mut self, shape: LfoShape) {
        if shape == self.active {
            return;
        }

        let frequency = self.frequency();
        let phase = self.phase();

        self.active = shape;
        let incoming = self.active_mut();
        incoming.set_frequency(frequency);
        incoming.set_phase(phase);
    }

    fn active_ref(&self) -> &dyn Lfo {
        match self.active {
            LfoShape::Sine => &self.sine,
            LfoShape::Triangle => &self.triangle,
            LfoShape::Ramp => &self.ramp,
            LfoShape::Square => &self.square,
            LfoShape::SampleAndHold => &self.sample_and_hold,
            LfoShape::SmoothNoise => &self.smooth_noise,
        }
    }

    fn active_mut(&mut self) -> &mut dyn Lfo {
        match self.active {
            LfoShape::Sine => &mut self.sine,
            LfoShape::Triangle => &mut self.triangle,
            LfoShape::Ramp => &mut self.ramp,
            LfoShape::Square => &mut self.square,
            LfoShape::SampleAndHold => &mut self.sample_and_hold,
            LfoShape::SmoothNoise => &mut self.smooth_noise,
        }
    }
}

impl Lfo for LfoBank {
    fn accumulator(&self) -> &LfoPhase {
        self.active_ref().accumulator()
    }

    fn accumulator_mut(&mut self) -> &mut LfoPhase {
        self.active_mut().accumulator_mut()
    }

    #[inline]
    fn generate(&mut self) -> f32 {
        self.active_mut().generate()
    }
}
