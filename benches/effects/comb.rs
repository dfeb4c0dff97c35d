//! Benchmarks for the comb filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use delay_fx::{CombFilter, CombFilterType, CombParam, Effect};

use crate::{test_signal, BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_comb(c: &mut Criterion) {
    let mut group = c.benchmark_group("effects/comb");

    let kinds = [("fir", CombFilterType::Fir), ("iir", CombFilterType::Iir)];

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let mut left = vec![0.0f32; size];
        let mut right = vec![0.0f32; size];

        for (name, kind) in kinds {
            let mut comb = CombFilter::new();
            comb.init(kind, 0.1, SAMPLE_RATE, 2).unwrap();
            comb.set_param(CombParam::Delay, 0.01).unwrap();
            comb.set_param(CombParam::Gain, 0.5).unwrap();

            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    let ins: [&[f32]; 2] = [&input, &input];
                    let mut outs: [&mut [f32]; 2] = [&mut left, &mut right];
                    comb.process(black_box(&ins), &mut outs, size).unwrap()
                })
            });
        }
    }

    group.finish();
}
