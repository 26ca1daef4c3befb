#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{MAX_TIME, MIN_TIME};

/*
Envelope Generators
===================

The voice runs two envelopes built from the same state machine:

  modulation envelope   Linear, one-shot Attack → Decay → Idle. Sustain and
                        release are both zero, so it only ever plays the AD
                        part. Retriggered on every new note.

  amplitude envelope    Exponentially shaped, full Attack → Decay → Sustain →
                        Release, opened and closed by the gate.


Vocabulary
----------

  level       The envelope's current output value (0.0 to 1.0).

  stage       Idle, Attack, Decay, Sustain or Release.

  progress    How far through the current stage we are, 0.0 → 1.0. Each
              sample adds 1 / (stage_time × sample_rate).

  start       The level the current stage began at. Every stage starts from
              wherever the previous one left the output, never from a fixed
              value, so there is no jump at stage boundaries or on retrigger.

  peak        Level the attack heads for. The modulation envelope uses the
              note velocity here; the amplitude envelope always uses 1.0.


The Shape
---------

Within a stage the level moves from `start` to the stage target:

    level = start + (target − start) × shape(progress)

  Linear:       shape(t) = t

  Exponential:  shape(t) = (1 − e^(−k·t)) / (1 − e^(−k))      k = 5

      1.0 ┤      ________
          │    ╱‾
          │   ╱             The exponential curve moves fast first and
          │  ╱              settles gently, like an RC circuit charging.
          │ /               Loudness changes sound even rather than
      0.0 ┼/────────────→ t lingering at the quiet end.
          0              1

shape(0) = 0 and shape(1) = 1 for both curves, which is what keeps every
boundary continuous.


Parameter Changes
-----------------

Stage times are re-read every sample from the stored values, but only the
INCREMENT depends on them; `progress` is kept. Changing the attack time in
the middle of an attack therefore leaves the elapsed part alone and only
speeds up or slows down what is left. The voice writes new times once per
buffer.

Times are clamped to [MIN_TIME, MAX_TIME]. A zero-percent attack becomes a
single sample.


The State Machine
-----------------

    Idle ──trigger──→ Attack ──progress=1──→ Decay ──progress=1──→ Sustain
     ↑                  │                     │  (sustain = 0: Idle)   │
     │                  └───────gate off──────┴────────────────────────┤
     │                                                                 ↓
     └──────────────────────────progress=1──────────────────────── Release

Gate off moves to Release from ANY active stage, starting at the current
level.
*/

/// Curvature of the exponential segments.
const EXP_CURVATURE: f32 = 5.0;
/// Accumulated increments land a hair under 1.0 in f32.
const PROGRESS_EPSILON: f32 = 1e-6;

/// The current stage of the envelope state machine.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,    // Gate low, envelope inactive, level = 0
    Attack,  // Ramping from the current level up to the peak
    Decay,   // Ramping from the peak down to the sustain level
    Sustain, // Holding while the gate is high
    Release, // Gate went low, ramping down to 0
}

/// Segment shape.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeCurve {
    Linear,
    Exponential,
}

impl EnvelopeCurve {
    #[inline]
    fn shape(self, t: f32) -> f32 {
        match self {
            EnvelopeCurve::Linear => t,
            EnvelopeCurve::Exponential => {
                (1.0 - (-EXP_CURVATURE * t).exp()) / (1.0 - (-EXP_CURVATURE).exp())
            }
        }
    }
}

pub struct Envelope {
    sample_rate: f32,
    curve: EnvelopeCurve,

    // Shape parameters
    attack_time: f32,
    decay_time: f32,
    sustain_level: f32,
    release_time: f32,

    // Runtime state
    stage: EnvelopeState,
    level: f32,
    progress: f32,
    start_level: f32,
    peak: f32,
    gate: bool,
}

impl Envelope {
    /// Build an envelope with explicit times (seconds) and sustain level.
    pub fn adsr(
        sample_rate: f32,
        curve: EnvelopeCurve,
        attack: f32,
        decay: f32,
        sustain: f32,
        release: f32,
    ) -> Self {
        Self {
            sample_rate,
            curve,
            attack_time: clamp_time(attack),
            decay_time: clamp_time(decay),
            sustain_level: sustain.clamp(0.0, 1.0),
            release_time: clamp_time(release),

            stage: EnvelopeState::Idle,
            level: 0.0,
            progress: 0.0,
            start_level: 0.0,
            peak: 1.0,
            gate: false,
        }
    }

    /// Linear one-shot AD envelope (sustain and release fixed at zero).
    pub fn modulation(sample_rate: f32) -> Self {
        Self::adsr(sample_rate, EnvelopeCurve::Linear, 0.0, 0.8, 0.0, 0.0)
    }

    /// Exponentially shaped ADSR for amplitude.
    pub fn amplitude(sample_rate: f32) -> Self {
        Self::adsr(sample_rate, EnvelopeCurve::Exponential, 0.0, 0.0, 1.0, 0.4)
    }

    pub fn set_attack(&mut self, seconds: f32) {
        self.attack_time = clamp_time(seconds);
    }

    pub fn set_decay(&mut self, seconds: f32) {
        self.decay_time = clamp_time(seconds);
    }

    pub fn set_sustain(&mut self, level: f32) {
        self.sustain_level = level.clamp(0.0, 1.0);
    }

    pub fn set_release(&mut self, seconds: f32) {
        self.release_time = clamp_time(seconds);
    }

    /// Restart the attack from the current level, heading for `velocity`.
    ///
    /// `gate = false` releases instead, like [`Envelope::gate`].
    pub fn trigger(&mut self, gate: bool, velocity: f32) {
        if gate {
            self.peak = velocity.clamp(0.0, 1.0);
            self.gate = true;
            self.enter(EnvelopeState::Attack);
        } else {
            self.gate(false);
        }
    }

    /// Open or close the gate.
    ///
    /// Opening an already open gate does nothing, which keeps legato notes
    /// from re-attacking.
    pub fn gate(&mut self, on: bool) {
        if on {
            if !self.gate {
                self.trigger(true, 1.0);
            }
            return;
        }

        self.gate = false;
        if self.stage != EnvelopeState::Idle {
            self.enter(EnvelopeState::Release);
        }
    }

    /// Advance by one sample and return the new level.
    #[inline]
    pub fn generate(&mut self) -> f32 {
        match self.stage {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }

            EnvelopeState::Attack => {
                if self.advance(self.attack_time) {
                    self.level = self.peak;
                    self.enter(EnvelopeState::Decay);
                } else {
                    self.level = self.segment(self.peak);
                }
            }

            EnvelopeState::Decay => {
                let target = self.sustain_level * self.peak;
                if self.advance(self.decay_time) {
                    self.level = target;
                    if target <= 0.0 {
                        self.enter(EnvelopeState::Idle);
                    } else {
                        self.enter(EnvelopeState::Sustain);
                    }
                } else {
                    self.level = self.segment(target);
                }
            }

            EnvelopeState::Sustain => {
                self.level = self.sustain_level * self.peak;
            }

            EnvelopeState::Release => {
                if self.advance(self.release_time) {
                    self.level = 0.0;
                    self.enter(EnvelopeState::Idle);
                } else {
                    self.level = self.segment(0.0);
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
        self.level
    }

    /// Render a block of envelope values into the buffer.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.generate();
        }
    }

    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeState::Idle
    }

    pub fn reset(&mut self) {
        self.stage = EnvelopeState::Idle;
        self.level = 0.0;
        self.progress = 0.0;
        self.start_level = 0.0;
        self.gate = false;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn state(&self) -> EnvelopeState {
        self.stage
    }

    pub fn curve(&self) -> EnvelopeCurve {
        self.curve
    }

    fn enter(&mut self, stage: EnvelopeState) {
        self.stage = stage;
        self.start_level = self.level;
        self.progress = 0.0;
    }

    /// Step `progress` for a stage lasting `time` seconds. True once the
    /// stage is complete.
    #[inline]
    fn advance(&mut self, time: f32) -> bool {
        self.progress += 1.0 / (time * self.sample_rate);
        self.progress + PROGRESS_EPSILON >= 1.0
    }

    #[inline]
    fn segment(&self, target: f32) -> f32 {
        let shaped = self.curve.shape(self.progress);
        (self.start_level + (target - self.start_level) * shaped).clamp(0.0, 1.0)
    }
}

fn clamp_time(seconds: f32) -> f32 {
    seconds.clamp(MIN_TIME, MAX_TIME)
}
