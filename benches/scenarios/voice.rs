//! Benchmarks for the complete knot voice.
//!
//! From the plain golden-test configuration up to every modulation route
//! active at once.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use knoscillator::{synth::params::Param, KnotSynth};

use crate::BLOCK_SIZES;

fn voice(settings: &[(Param, i32)]) -> KnotSynth {
    let mut synth = KnotSynth::new();
    for &(param, value) in settings {
        synth.set_parameter(param as u8, value);
    }
    synth.note_on(57, 110);
    synth
}

pub fn bench_voice(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voice");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size * 2];

        // === PLAIN ===
        // rotation only, no FM/LFO/noise
        let mut plain = voice(&[]);
        group.bench_with_input(BenchmarkId::new("plain", size), &size, |b, &size| {
            b.iter(|| {
                plain.render(black_box(&mut buffer), size);
            })
        });

        // === FULL MODULATION ===
        // FM, smoothed-noise LFO on pitch and morph, noise field, morph
        let mut full = voice(&[
            (Param::KnotP, 5),
            (Param::KnotQ, 3),
            (Param::Morph, 50),
            (Param::FmDepth, 60),
            (Param::FmRatio, 6),
            (Param::LfoType, 5),
            (Param::LfoPitch, 20),
            (Param::LfoMorph, 40),
            (Param::Noise, 80),
            (Param::EnvFm, 50),
            (Param::EnvMorph, 30),
        ]);
        group.bench_with_input(BenchmarkId::new("full", size), &size, |b, &size| {
            b.iter(|| {
                full.render(black_box(&mut buffer), size);
            })
        });

        // === PARAMETER AUTOMATION ===
        // a parameter change before every buffer, like a host sweeping a knob
        let mut automated = voice(&[(Param::FmDepth, 30)]);
        let mut morph = 0;
        group.bench_with_input(BenchmarkId::new("automated", size), &size, |b, &size| {
            b.iter(|| {
                morph = (morph + 1) % 101;
                automated.set_parameter(Param::Morph as u8, morph);
                automated.render(black_box(&mut buffer), size);
            })
        });
    }

    group.finish();
}
