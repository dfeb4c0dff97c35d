//! Benchmarks for low-level DSP primitives.

mod lfo;
mod ring_buffer;

pub use lfo::bench_lfo;
pub use ring_buffer::bench_ring_buffer;
