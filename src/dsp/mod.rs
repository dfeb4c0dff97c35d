//! Low-level DSP primitives used by the effects.
//!
//! Both primitives allocate only when they are created or initialized, so the
//! per-sample paths stay realtime-safe. They hold the signal math; the effects
//! layer adds multi-channel bookkeeping and parameter validation.

/// Circular buffer with independent cursors and interpolated lookback reads.
pub mod ring_buffer;
/// Wavetable low frequency oscillator.
pub mod lfo;

pub use lfo::{Lfo, LfoParam, LfoWaveform};
pub use ring_buffer::RingBuffer;

use crate::MAX_DELAY_LINE_SAMPLES;

/// Whole-sample buffer length for an already rounded `samples`, or `None`
/// when it is not finite or longer than [`MAX_DELAY_LINE_SAMPLES`].
pub(crate) fn buffer_len(samples: f32) -> Option<usize> {
    if samples.is_finite() && (0.0..=MAX_DELAY_LINE_SAMPLES as f32).contains(&samples) {
        Some(samples as usize)
    } else {
        None
    }
}
