//! Benchmarks for ring buffer operations.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use delay_fx::dsp::RingBuffer;

use crate::{test_signal, BLOCK_SIZES};

pub fn bench_ring_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/ring_buffer");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);

        // Write and read through the cursors (fixed delay)
        let mut ring = RingBuffer::<f32>::new(4800);
        ring.set_read_index(ring.capacity() - 480);
        group.bench_with_input(BenchmarkId::new("put_get_post_inc", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for &sample in &input {
                    ring.put_post_inc(black_box(sample));
                    sum += ring.get_post_inc();
                }
                sum
            })
        });

        // Fractional lookback (modulated delay)
        let mut ring = RingBuffer::<f32>::new(4800);
        for &sample in &input {
            ring.put_post_inc(sample);
        }
        group.bench_with_input(BenchmarkId::new("get_interpolated", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for i in 0..size {
                    let offset = 480.0 + (i as f32 * 0.1).sin() * 48.0;
                    sum += ring.get(black_box(offset));
                }
                sum
            })
        });
    }

    group.finish();
}
