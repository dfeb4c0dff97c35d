//! Multi-channel delay-line effects.
//!
//! Each effect follows the same lifecycle: `init` once, adjust parameters with
//! `set_param`, call `process` block by block, and `reset` to release its
//! buffers. Every call before `init` (or after `reset`) fails with
//! [`EffectError::NotInitialized`], except `get_param` which reads 0.

/// Feedforward/feedback comb filter on flat per-channel delay lines.
pub mod comb;
/// LFO-modulated delay (vibrato) on per-channel ring buffers.
pub mod vibrato;

pub use comb::{CombFilter, CombFilterType, CombParam};
pub use vibrato::{Vibrato, VibratoParam};

use crate::error::{EffectError, Result};

/// Shared operation surface of the effects, used by the block runner and the
/// realtime control queue.
pub trait Effect: Send {
    type Param: Copy + Send;

    fn set_param(&mut self, param: Self::Param, value: f32) -> Result<()>;

    /// Current value of `param`, or 0 when uninitialized.
    fn get_param(&self, param: Self::Param) -> f32;

    /// Process up to `num_frames` frames from `input` into `output`.
    ///
    /// Returns how many frames were written, which may be fewer than
    /// requested (see [`Vibrato`] block size).
    fn process(
        &mut self,
        input: &[&[f32]],
        output: &mut [&mut [f32]],
        num_frames: usize,
    ) -> Result<usize>;

    /// Release buffers and return to the uninitialized state.
    fn reset(&mut self) -> Result<()>;

    fn is_initialized(&self) -> bool;

    /// Channel count given to `init`, 0 when uninitialized.
    fn num_channels(&self) -> usize;
}

/// Check that both sides carry `channels` channels of at least `num_frames`.
pub(crate) fn check_io(
    input: &[&[f32]],
    output: &[&mut [f32]],
    channels: usize,
    num_frames: usize,
) -> Result<()> {
    if input.len() != channels || output.len() != channels {
        return Err(EffectError::InvalidArguments(
            "channel count does not match init",
        ));
    }
    if input.iter().any(|ch| ch.len() < num_frames) {
        return Err(EffectError::InvalidArguments(
            "input block shorter than frame count",
        ));
    }
    if output.iter().any(|ch| ch.len() < num_frames) {
        return Err(EffectError::InvalidArguments(
            "output block shorter than frame count",
        ));
    }
    Ok(())
}

/// Seconds must be finite and non-negative.
#[inline]
pub(crate) fn is_valid_seconds(seconds: f32) -> bool {
    seconds.is_finite() && seconds >= 0.0
}
