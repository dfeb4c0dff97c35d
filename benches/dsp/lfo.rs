//! Benchmarks for the wavetable LFO.

use criterion::{BenchmarkId, Criterion};
use delay_fx::dsp::{Lfo, LfoParam, LfoWaveform};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_lfo(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/lfo");

    let waveforms = [
        ("sine", LfoWaveform::Sine),
        ("saw", LfoWaveform::Saw),
        ("pulse", LfoWaveform::Pulse),
    ];

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for (name, waveform) in waveforms {
            let mut lfo = Lfo::new();
            lfo.init(waveform, 1.0, SAMPLE_RATE).unwrap();
            lfo.set_param(LfoParam::Amplitude, 96.0).unwrap();
            lfo.set_param(LfoParam::Frequency, 5.0).unwrap();

            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for sample in buffer.iter_mut() {
                        *sample = lfo.get_value();
                    }
                })
            });
        }
    }

    group.finish();
}
