//! Benchmarks for the effects, two channels at 48kHz.

mod comb;
mod vibrato;

pub use comb::bench_comb;
pub use vibrato::bench_vibrato;
