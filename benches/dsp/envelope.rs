//! Benchmarks for the modulation and amplitude envelopes.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use knoscillator::dsp::envelope::{Envelope, EnvelopeCurve};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Linear attack (ramping up)
        let mut env = Envelope::adsr(SAMPLE_RATE, EnvelopeCurve::Linear, 10.0, 0.1, 0.7, 0.3);
        env.trigger(true, 1.0);
        group.bench_with_input(BenchmarkId::new("linear_attack", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });

        // Exponential attack: one exp() per sample
        let mut env =
            Envelope::adsr(SAMPLE_RATE, EnvelopeCurve::Exponential, 10.0, 0.1, 0.7, 0.3);
        env.gate(true);
        group.bench_with_input(BenchmarkId::new("exp_attack", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });

        // Sustain phase (holding steady)
        let mut env = Envelope::amplitude(SAMPLE_RATE);
        env.gate(true);
        for _ in 0..200 {
            env.generate();
        }
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
