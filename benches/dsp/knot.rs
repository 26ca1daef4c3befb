//! Benchmarks for the knot oscillator and rotation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use knoscillator::dsp::{Cartesian, EulerPhase, KnotOscillator, Rotation3D};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_knot(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/knot");

    for &size in BLOCK_SIZES {
        let mut points = vec![Cartesian::ORIGIN; size];

        // Pure torus knot: the morph <= 0 path skips the Lissajous curve
        let mut torus = KnotOscillator::new(SAMPLE_RATE);
        torus.set_pq(3, 2);
        torus.set_frequency(220.0);
        group.bench_with_input(BenchmarkId::new("torus", size), &size, |b, _| {
            b.iter(|| {
                for p in points.iter_mut() {
                    *p = torus.generate(black_box(0.0));
                }
            })
        });

        // Morphed: both curves evaluated and blended
        let mut morphed = KnotOscillator::new(SAMPLE_RATE);
        morphed.set_pq(3, 2);
        morphed.set_morph(0.5);
        morphed.set_frequency(220.0);
        group.bench_with_input(BenchmarkId::new("morphed", size), &size, |b, _| {
            b.iter(|| {
                for p in points.iter_mut() {
                    *p = morphed.generate(black_box(0.1));
                }
            })
        });

        // Matrix rebuilt every sample, as the voice does
        let mut rotation = Rotation3D::identity();
        let mut angles = EulerPhase::new(1.0, 1.0, 0.0);
        angles.set_rate(0.5, SAMPLE_RATE, [1.0, 0.7, 0.3]);
        group.bench_with_input(BenchmarkId::new("rotate", size), &size, |b, _| {
            b.iter(|| {
                for p in points.iter_mut() {
                    rotation.set_euler(angles.x, angles.y, angles.z);
                    *p = rotation.process(black_box(*p));
                    angles.advance();
                }
            })
        });
    }

    group.finish();
}
