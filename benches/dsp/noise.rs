//! Benchmarks for the noise field: one-off build and per-sample lookup.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use knoscillator::dsp::{noise::NOISE_DIM, shared_noise_field, NoiseField};

use crate::BLOCK_SIZES;

pub fn bench_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/noise");

    group.bench_function("build", |b| {
        b.iter(|| black_box(NoiseField::<NOISE_DIM>::new()))
    });

    let field = shared_noise_field();
    for &size in BLOCK_SIZES {
        group.bench_with_input(BenchmarkId::new("sample", size), &size, |b, &size| {
            b.iter(|| {
                let mut acc = 0.0f32;
                for i in 0..size {
                    let t = i as f32 * 0.013;
                    acc += field.sample(black_box(t.cos() * 3.0), black_box(t.sin() * 3.0));
                }
                acc
            })
        });
    }

    group.finish();
}
