//! Benchmarks for the vibrato.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use delay_fx::{Effect, Vibrato, VibratoParam};

use crate::{test_signal, BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_vibrato(c: &mut Criterion) {
    let mut group = c.benchmark_group("effects/vibrato");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let mut left = vec![0.0f32; size];
        let mut right = vec![0.0f32; size];

        let mut vibrato = Vibrato::new();
        vibrato.init(0.01, SAMPLE_RATE, 2).unwrap();
        vibrato.set_param(VibratoParam::Delay, 0.005).unwrap();
        vibrato.set_param(VibratoParam::Frequency, 5.0).unwrap();
        vibrato.set_param(VibratoParam::BlockSize, size as f32).unwrap();

        group.bench_with_input(BenchmarkId::new("process", size), &size, |b, _| {
            b.iter(|| {
                let ins: [&[f32]; 2] = [&input, &input];
                let mut outs: [&mut [f32]; 2] = [&mut left, &mut right];
                vibrato.process(black_box(&ins), &mut outs, size).unwrap()
            })
        });
    }

    group.finish();
}
