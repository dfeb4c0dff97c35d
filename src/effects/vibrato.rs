use crate::dsp::lfo::{Lfo, LfoParam, LfoWaveform};
use crate::dsp::buffer_len;
use crate::dsp::ring_buffer::RingBuffer;
use crate::effects::{check_io, is_valid_seconds, Effect};
use crate::error::{EffectError, Result};
use crate::DEFAULT_BLOCK_SIZE;

/*
Vibrato
=======

Vibrato reads a delay line at a distance that an LFO keeps moving. While
the delay shrinks the read speeds up and pitch rises. While it grows pitch
falls. No dry signal is mixed in.

Geometry
--------

    M        = ceil(max_delay_seconds · sample_rate)   max swing in samples
    capacity = 2·M + 2

The read cursor trails the newest sample by M (the center). The LFO,
whose amplitude is the current delay in samples (≤ M), moves the read
point around that center:

    lookback = M − lfo        lfo ∈ [−A, A], A ≤ M  →  lookback ∈ [0, 2·M]

The two spare slots keep the interpolated read (which touches lookback and
lookback + 1) clear of the slot being written.

Warm-up
-------

A fresh instance starts with both cursors at 0. On the very first process
call each read cursor is advanced by capacity − M slots, which leaves it M
samples behind the newest sample once the first input is written. This
happens once, before the sample loop. The output therefore lags the input
by M samples even with zero modulation depth.

Per Sample
----------

    lfo = next LFO value (shared by every channel)
    for each channel:
        write input            put_post_inc
        read output            get(read_lag − lfo)
        advance read cursor    get_post_inc (value discarded)

Only min(block_size, frames) frames are handled per call; callers loop
until a block is consumed.
*/

/// Parameters that can be changed after `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VibratoParam {
    /// Modulation depth in seconds, `0 ..= max_delay_seconds`.
    Delay,
    /// Modulation rate in Hz, not below the LFO reference frequency.
    Frequency,
    /// Frames handled per process call, at least 1.
    BlockSize,
}

/// LFO reference frequency used unless overridden: a one-second wavetable.
pub const DEFAULT_LFO_REFERENCE_HZ: f32 = 1.0;

#[derive(Debug)]
struct VibratoState {
    delay_lines: Vec<RingBuffer<f32>>,
    lfo: Lfo,
    sample_rate: f32,
    max_swing_samples: usize,
    block_size: usize,
    warmed_up: bool,
}

/// Multi-channel vibrato sharing one LFO across channels.
#[derive(Debug)]
pub struct Vibrato {
    waveform: LfoWaveform,
    lfo_reference_hz: f32,
    state: Option<VibratoState>,
}

impl Default for Vibrato {
    fn default() -> Self {
        Self::new()
    }
}

impl Vibrato {
    /// Create an uninitialized sine vibrato. Call [`Vibrato::init`] before use.
    pub fn new() -> Self {
        Self {
            waveform: LfoWaveform::Sine,
            lfo_reference_hz: DEFAULT_LFO_REFERENCE_HZ,
            state: None,
        }
    }

    /// Use a different LFO shape from the next `init` on.
    pub fn with_waveform(mut self, waveform: LfoWaveform) -> Self {
        self.waveform = waveform;
        self
    }

    /// Set the LFO reference frequency (the lowest allowed rate) from the
    /// next `init` on.
    pub fn with_lfo_reference(mut self, reference_hz: f32) -> Self {
        self.lfo_reference_hz = reference_hz;
        self
    }

    /// Allocate `num_channels` ring buffers of `2·M + 2` samples, with
    /// `M = ceil(max_delay_seconds · sample_rate)`, and the shared LFO.
    pub fn init(
        &mut self,
        max_delay_seconds: f32,
        sample_rate: f32,
        num_channels: usize,
    ) -> Result<()> {
        if self.state.is_some() {
            return Err(EffectError::IllegalCall("vibrato is already initialized"));
        }
        if num_channels < 1 {
            return Err(EffectError::InvalidArguments("need at least one channel"));
        }
        if !is_valid_seconds(max_delay_seconds) {
            return Err(EffectError::InvalidArguments(
                "max delay must be a non-negative number of seconds",
            ));
        }

        let mut lfo = Lfo::new();
        lfo.init(self.waveform, self.lfo_reference_hz, sample_rate)?;

        let max_swing_samples = buffer_len((max_delay_seconds * sample_rate).ceil())
            .ok_or(EffectError::InvalidArguments("max delay is too long"))?;
        let capacity = max_swing_samples
            .checked_mul(2)
            .and_then(|n| n.checked_add(2))
            .ok_or(EffectError::InvalidArguments("max delay is too long"))?;

        self.state = Some(VibratoState {
            delay_lines: (0..num_channels).map(|_| RingBuffer::new(capacity)).collect(),
            lfo,
            sample_rate,
            max_swing_samples,
            block_size: DEFAULT_BLOCK_SIZE,
            warmed_up: false,
        });

        tracing::debug!(
            max_delay_seconds,
            sample_rate,
            num_channels,
            max_swing_samples,
            capacity,
            "vibrato initialized"
        );
        Ok(())
    }

    /// Maximum modulation swing in samples, 0 when uninitialized.
    pub fn max_swing_samples(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.max_swing_samples)
    }

    /// Per-channel ring buffer size, 0 when uninitialized.
    pub fn delay_line_capacity(&self) -> usize {
        self.state
            .as_ref()
            .and_then(|s| s.delay_lines.first())
            .map_or(0, RingBuffer::capacity)
    }

    /// Whether the one-time read cursor alignment has happened.
    pub fn is_warmed_up(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.warmed_up)
    }
}

impl Effect for Vibrato {
    type Param = VibratoParam;

    fn set_param(&mut self, param: VibratoParam, value: f32) -> Result<()> {
        let state = self.state.as_mut().ok_or(EffectError::NotInitialized)?;

        match param {
            VibratoParam::Delay => {
                let samples = value * state.sample_rate;
                if !is_valid_seconds(value) || samples.ceil() as usize > state.max_swing_samples {
                    tracing::warn!(
                        delay = value,
                        max_swing_samples = state.max_swing_samples,
                        "vibrato delay out of range"
                    );
                    return Err(EffectError::InvalidArguments(
                        "delay exceeds the configured maximum",
                    ));
                }
                state.lfo.set_param(LfoParam::Amplitude, samples)
            }
            VibratoParam::Frequency => state.lfo.set_param(LfoParam::Frequency, value),
            VibratoParam::BlockSize => {
                if !(value.is_finite() && value >= 1.0) {
                    return Err(EffectError::InvalidArguments(
                        "block size must be at least 1",
                    ));
                }
                state.block_size = value as usize;
                Ok(())
            }
        }
    }

    fn get_param(&self, param: VibratoParam) -> f32 {
        let Some(state) = self.state.as_ref() else {
            return 0.0;
        };
        match param {
            VibratoParam::Delay => state.lfo.get_param(LfoParam::Amplitude) / state.sample_rate,
            VibratoParam::Frequency => state.lfo.get_param(LfoParam::Frequency),
            VibratoParam::BlockSize => state.block_size as f32,
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

        if !state.warmed_up {
            for line in state.delay_lines.iter_mut() {
                let pre_roll = line.capacity() - state.max_swing_samples;
                for _ in 0..pre_roll {
                    line.get_post_inc();
                }
            }
            state.warmed_up = true;
        }

        let frames = state.block_size.min(num_frames);
        for i in 0..frames {
            let modulation = state.lfo.get_value();
            for (c, line) in state.delay_lines.iter_mut().enumerate() {
                line.put_post_inc(input[c][i]);
                output[c][i] = line.get(line.read_lag() as f32 - modulation);
                line.get_post_inc();
            }
        }

        Ok(frames)
    }

    fn reset(&mut self) -> Result<()> {
        if self.state.take().is_none() {
            return Err(EffectError::NotInitialized);
        }
        tracing::debug!("vibrato reset");
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    fn num_channels(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.delay_lines.len())
    }
}
