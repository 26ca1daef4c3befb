//! Benchmarks for the LFO bank, one run per shape.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use knoscillator::dsp::{Lfo, LfoBank, LfoShape};

use crate::BLOCK_SIZES;

pub fn bench_lfo(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/lfo");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for shape in LfoShape::ALL {
            let mut lfo = LfoBank::new(48_000.0);
            lfo.select(shape);
            lfo.set_frequency(5.0);

            let id = format!("{}/{}", shape.label(), size);
            group.bench_with_input(BenchmarkId::from_parameter(id), &size, |b, _| {
                b.iter(|| {
                    for s in buffer.iter_mut() {
                        *s = lfo.generate();
                    }
                    black_box(&buffer);
                })
            });
        }
    }

    group.finish();
}
