#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::buffer_len;
use crate::effects::{check_io, is_valid_seconds, Effect};
use crate::error::{EffectError, Result};

/*
Comb Filter
===========

A comb filter mixes a signal with a delayed copy of itself. In the frequency
domain the peaks and notches are evenly spaced like the teeth of a comb, one
every sample_rate / delay_samples Hz.

Two flavors, fixed at init:

    FIR (feedforward)   y[n] = x[n] + g · x[n - D]
    IIR (feedback)      y[n] = x[n] + g · y[n - D]

    FIR: [x] ──┬───────────────(+)──→ [y]
               └──→ [delay D] ──(g)┘

    IIR: [x] ──────(+)──┬──→ [y]
                   (g)  │
                    └── [delay D] ←┘

The feedback flavor recirculates: with |g| < 1 each echo decays by g,
with |g| >= 1 it rings forever or grows.

Delay Storage
-------------

Each channel owns a flat array sized for the maximum delay. All channels
share one head index that walks the first D slots only:

    capacity = round(max_delay_seconds · sample_rate)     (fixed at init)
    D        = round(delay_seconds · sample_rate)          (1 ..= capacity)

    [ h . . . . . . D | unused up to capacity ]

At head h the slot still holds the sample written D frames ago, so it is read
before being overwritten. Changing D at runtime only changes where the head
wraps; no memory moves.
*/

/// Update rule selected once at init.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombFilterType {
    /// Feedforward: the delay line stores the input.
    #[default]
    Fir,
    /// Feedback: the delay line stores the output.
    Iir,
}

/// Parameters that can be changed after `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombParam {
    /// Feed coefficient, any value.
    Gain,
    /// Delay in seconds, `1 / sample_rate ..= max_delay_seconds`.
    Delay,
}

#[derive(Debug)]
struct CombState {
    filter_type: CombFilterType,
    sample_rate: f32,
    max_delay_seconds: f32,
    delay_lines: Vec<Vec<f32>>,
    delay_seconds: f32,
    delay_length: usize,
    head: usize,
    gain: f32,
}

/// Multi-channel comb filter.
#[derive(Debug, Default)]
pub struct CombFilter {
    state: Option<CombState>,
}

impl CombFilter {
    /// Create an uninitialized comb filter. Call [`CombFilter::init`] before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate `num_channels` delay lines of `round(sample_rate · max_delay)`
    /// samples and fix the update rule.
    ///
    /// The delay starts at `max_delay_seconds` and the gain at 0.
    pub fn init(
        &mut self,
        filter_type: CombFilterType,
        max_delay_seconds: f32,
        sample_rate: f32,
        num_channels: usize,
    ) -> Result<()> {
        if self.state.is_some() {
            return Err(EffectError::IllegalCall("comb filter is already initialized"));
        }
        if num_channels < 1 {
            return Err(EffectError::InvalidArguments("need at least one channel"));
        }
        if !(sample_rate > 0.0 && sample_rate.is_finite()) {
            return Err(EffectError::InvalidArguments("sample rate must be positive"));
        }
        if !is_valid_seconds(max_delay_seconds) {
            return Err(EffectError::InvalidArguments(
                "max delay must be a non-negative number of seconds",
            ));
        }

        let capacity = buffer_len((sample_rate * max_delay_seconds).round())
            .ok_or(EffectError::InvalidArguments("max delay is too long"))?;
        if capacity == 0 {
            return Err(EffectError::InvalidArguments(
                "max delay is shorter than one sample",
            ));
        }

        self.state = Some(CombState {
            filter_type,
            sample_rate,
            max_delay_seconds,
            delay_lines: vec![vec![0.0; capacity]; num_channels],
            delay_seconds: max_delay_seconds,
            delay_length: capacity,
            head: 0,
            gain: 0.0,
        });

        tracing::debug!(
            ?filter_type,
            sample_rate,
            max_delay_seconds,
            num_channels,
            capacity,
            "comb filter initialized"
        );
        Ok(())
    }

    pub fn filter_type(&self) -> Option<CombFilterType> {
        self.state.as_ref().map(|s| s.filter_type)
    }

    /// Current delay in whole samples, 0 when uninitialized.
    pub fn delay_length(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.delay_length)
    }

    /// Physical delay line size per channel, 0 when uninitialized.
    pub fn capacity(&self) -> usize {
        self.state
            .as_ref()
            .and_then(|s| s.delay_lines.first())
            .map_or(0, Vec::len)
    }
}

impl Effect for CombFilter {
    type Param = CombParam;

    fn set_param(&mut self, param: CombParam, value: f32) -> Result<()> {
        let state = self.state.as_mut().ok_or(EffectError::NotInitialized)?;

        match param {
            CombParam::Gain => {
                state.gain = value;
            }
            CombParam::Delay => {
                if !is_valid_seconds(value) || value > state.max_delay_seconds {
                    tracing::warn!(
                        delay = value,
                        max_delay = state.max_delay_seconds,
                        "comb delay out of range"
                    );
                    return Err(EffectError::InvalidArguments(
                        "delay exceeds the configured maximum",
                    ));
                }
                let length = (value * state.sample_rate).round() as usize;
                if length == 0 {
                    tracing::warn!(delay = value, "comb delay rounds to zero samples");
                    return Err(EffectError::InvalidArguments(
                        "delay is shorter than one sample",
                    ));
                }
                state.delay_seconds = value;
                state.delay_length = length.min(state.delay_lines[0].len());
            }
        }
        Ok(())
    }

    fn get_param(&self, param: CombParam) -> f32 {
        let Some(state) = self.state.as_ref() else {
            return 0.0;
        };
        match param {
            CombParam::Gain => state.gain,
            CombParam::Delay => state.delay_seconds,
        }
    }

    fn process(
        &mut self,
        input: &[&[f32]],
        output: &mut [&mut [f32]],
        num_frames: usize,
    ) -> Result<usize> {
        let state = self.state.as_mut().ok_or(EffectError::NotInitialized)?;
        check_io(input, output, state.delay_lines.len(), num_frames)?;

        let gain = state.gain;
        for n in 0..num_frames {
            let head = state.head;
            for (c, line) in state.delay_lines.iter_mut().enumerate() {
                let x = input[c][n];
                let y = x + gain * line[head];
                output[c][n] = y;
                line[head] = match state.filter_type {
                    CombFilterType::Fir => x,
                    CombFilterType::Iir => y,
                };
            }
            state.head = (head + 1) % state.delay_length;
        }

        Ok(num_frames)
    }

    fn reset(&mut self) -> Result<()> {
        if self.state.take().is_none() {
            return Err(EffectError::NotInitialized);
        }
        tracing::debug!("comb filter reset");
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    fn num_channels(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.delay_lines.len())
    }
}
