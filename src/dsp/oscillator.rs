use std::f32::consts::TAU;

/*
Phase Accumulation
==================

Every periodic generator in the voice (knot curve, FM carrier, noise wobble,
the three rotation axes) keeps a running phase in radians and adds a fixed
step to it once per sample.

Vocabulary
----------

  phase       Position within one cycle, in radians. One full cycle = 2π.

  step        How far the phase moves per sample:
                step = 2π × frequency / sample_rate

              Example: 440 Hz at 48 kHz
                step = 6.2832 × 440 / 48000 ≈ 0.0576 rad per sample


The Carry Rule
--------------

The wrap is NOT a modulo. When the phase has passed 2π, one cycle is taken
off and the step is added in the same move:

    next = phase > 2π ? (phase − 2π) + step
                      : phase + step

Compared with `(phase + step) mod 2π`:

  - the phase is allowed to sit slightly above 2π for one sample before it
    wraps (it is tested before the step is added, not after)
  - a phase that is already more than one cycle past 2π only loses a single
    cycle per sample, so it walks back down over several samples, provided
    the step itself is below 2π

Both generators that read the phase (sin/cos) are 2π-periodic, so the output
is the same either way for small steps; the accumulator values differ, and
downstream code that compares phases relies on this exact rule.

A step of 2π or more would outrun the single cycle taken off per sample and
the phase would climb until f32 can no longer represent the increment. The
FM carrier can get there (note × octave bend × 7/1 ratio is well above the
sample rate), so `SineOscillator` folds its step into [0, 2π) first. Whole
cycles vanish from the step, the sine samples stay the same.
*/

/// Advance a radian phase accumulator with the carry rule.
#[inline]
pub fn advance_phase(phase: f32, step: f32) -> f32 {
    if phase > TAU {
        (phase - TAU) + step
    } else {
        phase + step
    }
}

/// Per-sample phase step for a frequency in Hz.
#[inline]
pub fn phase_step(frequency_hz: f32, sample_rate: f32) -> f32 {
    TAU * frequency_hz / sample_rate
}

/// Sine oscillator used as the FM (phase modulation) carrier.
///
/// Output is read before the phase advances, so the first sample after
/// construction is `sin(0) = 0`.
pub struct SineOscillator {
    sample_rate: f32,
    frequency: f32,
    step: f32,
    phase: f32,
}

impl SineOscillator {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            frequency: 0.0,
            step: 0.0,
            phase: 0.0,
        }
    }

    /// The step is folded into [0, 2π) so the carry rule keeps the phase
    /// bounded above the sample rate.
    pub fn set_frequency(&mut self, frequency_hz: f32) {
        self.frequency = frequency_hz;
        self.step = phase_step(frequency_hz, self.sample_rate).rem_euclid(TAU);
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    #[inline]
    pub fn generate(&mut self) -> f32 {
        let sample = self.phase.sin();
        self.phase = advance_phase(self.phase, self.step);
        sample
    }
}
