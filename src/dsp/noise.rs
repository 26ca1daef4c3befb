use std::sync::OnceLock;

use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};

/*
Noise Field
===========

A square D×D table of smooth 2-D noise, computed once and then only read.
The voice looks it up at the rotated knot's (x, y) position to roughen the
curve.

Vocabulary
----------

  value noise   Random values pinned to the integer lattice, smoothly
                interpolated in between. Cheap, coherent: nearby inputs give
                nearby outputs.

  octave        One layer of noise. Each further octave doubles the spatial
                frequency and halves the amplitude. Summing four gives the
                familiar cloudy "fractal" look.

  cell step     Spacing of the table grid in noise space: 4 / D. The whole
                table covers a 4 × 4 patch of noise.


Building
--------

    for each cell (i, j):
        table[i·D + j] = fractal(i·step, j·step) × 2 − 1

The fractal sum is normalized to [0, 1), so the table holds values in
[-1, 1).


Lookup
------

    nx = trunc(|x| / step) mod D
    ny = trunc(|y| / step) mod D
    sample = table[nx·D + ny]

No interpolation: every point in a cell reads the same value. Because of the
absolute value the lookup is MIRRORED about both axes:

    sample(x, y) == sample(−x, y) == sample(x, −y)

and because of the modulo it repeats every 4 units.


Sharing
-------

The table never changes after construction, so one copy serves every voice:
`shared_noise_field()` builds it on first use and hands out a `'static`
reference from then on.
*/

/// Table dimension used by the voice.
pub const NOISE_DIM: usize = 64;
/// Octaves summed per table cell.
pub const NOISE_OCTAVES: u32 = 4;
const NOISE_SPAN: f32 = 4.0;
const NOISE_SEED: u64 = 0x5eed_0f_6e01;

/// Hashed lattice value noise.
pub struct ValueNoise {
    perm: [u8; 256],
}

impl ValueNoise {
    pub fn new(seed: u64) -> Self {
        let mut perm: [u8; 256] = std::array::from_fn(|i| i as u8);
        perm.shuffle(&mut SmallRng::seed_from_u64(seed));
        Self { perm }
    }

    #[inline]
    fn lattice(&self, x: i32, y: i32) -> f32 {
        let row = self.perm[y.rem_euclid(256) as usize] as i32;
        self.perm[(row + x).rem_euclid(256) as usize] as f32
    }

    /// Single octave, in [0, 255].
    fn noise2d(&self, x: f32, y: f32) -> f32 {
        let (x0, y0) = (x.floor(), y.floor());
        let (fx, fy) = (x - x0, y - y0);
        let (xi, yi) = (x0 as i32, y0 as i32);

        let s = self.lattice(xi, yi);
        let t = self.lattice(xi + 1, yi);
        let u = self.lattice(xi, yi + 1);
        let v = self.lattice(xi + 1, yi + 1);

        let low = smooth_lerp(s, t, fx);
        let high = smooth_lerp(u, v, fx);
        smooth_lerp(low, high, fy)
    }

    /// Fractal sum of `octaves` layers at base `frequency`, in [0, 1).
    pub fn fractal(&self, x: f32, y: f32, frequency: f32, octaves: u32) -> f32 {
        let (mut xa, mut ya) = (x * frequency, y * frequency);
        let mut amplitude = 1.0;
        let mut total = 0.0;
        let mut norm = 0.0;

        for _ in 0..octaves {
            norm += 256.0 * amplitude;
            total += self.noise2d(xa, ya) * amplitude;
            amplitude *= 0.5;
            xa *= 2.0;
            ya *= 2.0;
        }

        total / norm
    }
}

#[inline]
fn smooth_lerp(a: f32, b: f32, t: f32) -> f32 {
    let s = t * t * (3.0 - 2.0 * t);
    a + (b - a) * s
}

/// Immutable D×D lookup table of coherent noise in [-1, 1).
pub struct NoiseField<const DIM: usize> {
    step: f32,
    table: Vec<f32>,
}

impl<const DIM: usize> NoiseField<DIM> {
    pub fn new() -> Self {
        Self::with_noise(&ValueNoise::new(NOISE_SEED))
    }

    pub fn with_noise(noise: &ValueNoise) -> Self {
        let step = NOISE_SPAN / DIM as f32;
        let mut table = vec![0.0; DIM * DIM];

        for x in 0..DIM {
            for y in 0..DIM {
                let value = noise.fractal(x as f32 * step, y as f32 * step, 1.0, NOISE_OCTAVES);
                table[x * DIM + y] = value * 2.0 - 1.0;
            }
        }

        Self { step, table }
    }

    /// Nearest-cell lookup, mirrored about both axes and wrapped every
    /// `DIM` cells.
    #[inline]
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let nx = (x.abs() / self.step) as usize % DIM;
        let ny = (y.abs() / self.step) as usize % DIM;
        self.table[nx * DIM + ny]
    }

    /// Distance between neighbouring cells in noise space.
    pub fn step(&self) -> f32 {
        self.step
    }
}

impl<const DIM: usize> Default for NoiseField<DIM> {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide field, built on first call.
pub fn shared_noise_field() -> &'static NoiseField<NOISE_DIM> {
    static FIELD: OnceLock<NoiseField<NOISE_DIM>> = OnceLock::new();
    FIELD.get_or_init(NoiseField::new)
}
