use crate::dsp::{
    cartesian::Cartesian,
    oscillator::{advance_phase, phase_step},
};

/*
Knot Oscillator
===============

Instead of a scalar waveform this oscillator traces a closed curve in 3-D
space and returns one point per sample. The curve is a (p, q) knot: over one
cycle of the phase it winds P times around one axis and Q times around the
other, then meets its own start.

Vocabulary
----------

  P, Q        The knot numbers, integers 1..=16. (2, 3) is the trefoil;
              (2, 1) is a simple loop that winds twice around the hole.

  θ           The curve argument: the running phase plus the FM offset.
                θ = phase + fm
              FM is added to the ARGUMENT, not to the phase step, so it is
              true phase modulation and never detunes the oscillator.

  morph       0.0 → 1.0 blend between the two curve families below.


The Two Curves
--------------

TORUS KNOT (morph = 0)
    A curve lying on the surface of a torus with tube radius 1 around a
    core circle of radius 2:

        r = cos(Qθ) + 2
        x = r · cos(Pθ)
        y = r · sin(Pθ)
        z = −sin(Qθ)

LISSAJOUS KNOT (morph = 1)
    Independent harmonics on each axis:

        x = 2 · cos(Pθ)
        y = 2 · sin(Qθ)
        z = cos((P + Q)θ)

In between, the two points are blended linearly:

    point = torus + (lissajous − torus) × morph


Size
----

For the torus knot

    |point|² = r² + sin²(Qθ) = 5 + 4·cos(Qθ) ≤ 9

and the Lissajous knot stays within √(2² + 2² + 1²) = 3. A linear blend of
two points inside a ball stays inside it, so every output satisfies

    |point| ≤ 3

The output is deliberately NOT normalized; the perspective projection
downstream scales it.
*/

pub const KNOT_MIN: i32 = 1;
pub const KNOT_MAX: i32 = 16;

/// Largest distance from the origin any knot point can reach.
pub const MAX_MAGNITUDE: f32 = 3.0;

#[inline]
pub fn torus_knot(p: f32, q: f32, theta: f32) -> Cartesian {
    let (sin_q, cos_q) = (q * theta).sin_cos();
    let (sin_p, cos_p) = (p * theta).sin_cos();
    let r = cos_q + 2.0;
    Cartesian::new(r * cos_p, r * sin_p, -sin_q)
}

#[inline]
pub fn lissajous_knot(p: f32, q: f32, theta: f32) -> Cartesian {
    Cartesian::new(
        2.0 * (p * theta).cos(),
        2.0 * (q * theta).sin(),
        ((p + q) * theta).cos(),
    )
}

/// Point on the morphed knot for argument `theta`.
#[inline]
pub fn knot_point(p: f32, q: f32, morph: f32, theta: f32) -> Cartesian {
    let torus = torus_knot(p, q, theta);
    if morph <= 0.0 {
        return torus;
    }
    torus.lerp(lissajous_knot(p, q, theta), morph)
}

pub struct KnotOscillator {
    sample_rate: f32,
    frequency: f32,
    step: f32,
    phase: f32,
    p: i32,
    q: i32,
    morph: f32,
}

impl KnotOscillator {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            frequency: 0.0,
            step: 0.0,
            phase: 0.0,
            p: 2,
            q: 1,
            morph: 0.0,
        }
    }

    /// Set the knot numbers, clamped to `KNOT_MIN..=KNOT_MAX`.
    pub fn set_pq(&mut self, p: i32, q: i32) {
        self.p = p.clamp(KNOT_MIN, KNOT_MAX);
        self.q = q.clamp(KNOT_MIN, KNOT_MAX);
    }

    pub fn set_morph(&mut self, morph: f32) {
        self.morph = morph.clamp(0.0, 1.0);
    }

    pub fn set_frequency(&mut self, frequency_hz: f32) {
        self.frequency = frequency_hz;
        self.step = phase_step(frequency_hz, self.sample_rate);
    }

    pub fn pq(&self) -> (i32, i32) {
        (self.p, self.q)
    }

    pub fn morph(&self) -> f32 {
        self.morph
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Running phase in radians.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Emit the point for the current phase offset by `fm` radians, then
    /// advance the phase.
    #[inline]
    pub fn generate(&mut self, fm: f32) -> Cartesian {
        let point = knot_point(self.p as f32, self.q as f32, self.morph, self.phase + fm);
        self.phase = advance_phase(self.phase, self.step);
        point
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    const SAMPLE_RATE: f32 = 48_000.0;

    #[test]
    fn torus_knot_start_point() {
        // θ = 0: r = 3, point on the +x axis in the z = 0 plane
        let point = torus_knot(2.0, 3.0, 0.0);
        assert_eq!(point, Cartesian::new(3.0, 0.0, -0.0));
    }

    #[test]
    fn torus_knot_lies_on_torus() {
        for i in 0..500 {
            let theta = i as f32 * TAU / 500.0;
            let point = torus_knot(3.0, 2.0, theta);
            // distance from the core circle of radius 2 is the tube radius 1
            let ring = (point.x * point.x + point.y * point.y).sqrt() - 2.0;
            let tube = (ring * ring + point.z * point.z).sqrt();
            assert!((tube - 1.0).abs() < 1e-4, "theta {theta}: tube {tube}");
        }
    }

    #[test]
    fn curve_closes_after_one_cycle() {
        for (p, q) in [(2.0, 1.0), (2.0, 3.0), (5.0, 7.0)] {
            for morph in [0.0, 0.5, 1.0] {
                let start = knot_point(p, q, morph, 0.3);
                let end = knot_point(p, q, morph, 0.3 + TAU);
                assert!((start - end).magnitude() < 1e-3);
            }
        }
    }

    #[test]
    fn every_point_within_bound() {
        for p in KNOT_MIN..=KNOT_MAX {
            for q in [1, 4, 9, 16] {
                for morph in [0.0, 0.25, 0.5, 0.75, 1.0] {
                    for i in 0..256 {
                        let theta = i as f32 * TAU / 256.0;
                        let point = knot_point(p as f32, q as f32, morph, theta);
                        assert!(point.magnitude() <= MAX_MAGNITUDE + 1e-4);
                    }
                }
            }
        }
    }

    #[test]
    fn morph_one_is_lissajous() {
        let point = knot_point(3.0, 2.0, 1.0, 0.7);
        let expected = lissajous_knot(3.0, 2.0, 0.7);
        assert!((point - expected).magnitude() < 1e-5);
    }

    #[test]
    fn generate_follows_phase() {
        let mut knot = KnotOscillator::new(SAMPLE_RATE);
        knot.set_pq(2, 1);
        knot.set_frequency(440.0);

        let step = TAU * 440.0 / SAMPLE_RATE;
        let mut phase = 0.0f32;
        for _ in 0..2_000 {
            let expected = torus_knot(2.0, 1.0, phase);
            let actual = knot.generate(0.0);
            assert!((actual - expected).magnitude() < 1e-5);
            phase = advance_phase(phase, step);
        }
    }

    #[test]
    fn fm_offsets_argument_not_rate() {
        let mut plain = KnotOscillator::new(SAMPLE_RATE);
        let mut modulated = KnotOscillator::new(SAMPLE_RATE);
        plain.set_frequency(100.0);
        modulated.set_frequency(100.0);

        let shifted = modulated.generate(PI);
        assert!((shifted - torus_knot(2.0, 1.0, PI)).magnitude() < 1e-5);

        plain.generate(0.0);
        assert_eq!(plain.phase(), modulated.phase());
    }

    #[test]
    fn knot_numbers_are_clamped() {
        let mut knot = KnotOscillator::new(SAMPLE_RATE);
        knot.set_pq(0, 40);
        assert_eq!(knot.pq(), (KNOT_MIN, KNOT_MAX));
        knot.set_morph(3.0);
        assert_eq!(knot.morph(), 1.0);
    }
}
