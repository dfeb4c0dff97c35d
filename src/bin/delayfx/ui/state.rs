//! Parameter state owned by the UI thread.
//!
//! The UI keeps its own copy of every knob, clamps edits to the ranges the
//! effects accept, and forwards the result to the audio thread. The audio
//! thread never reports values back.

use delay_fx::{CombFilterType, EngineConfig};

/// Fixed facts about the running stream, captured once at startup.
#[derive(Clone, Debug)]
pub struct StreamInfo {
    pub sample_rate: f32,
    pub channels: usize,
    pub tone_hz: f32,
    pub comb_type: CombFilterType,
    pub comb_max_delay: f32,
    pub vibrato_max_delay: f32,
    pub vibrato_min_rate: f32,
}

/// Editable effect parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Knobs {
    pub comb_gain: f32,
    /// Seconds.
    pub comb_delay: f32,
    /// Seconds.
    pub vibrato_depth: f32,
    /// Hz.
    pub vibrato_rate: f32,
}

pub const GAIN_STEP: f32 = 0.05;
pub const GAIN_LIMIT: f32 = 0.95;
pub const DELAY_STEP: f32 = 0.0005;
pub const RATE_STEP: f32 = 0.5;
pub const RATE_LIMIT: f32 = 20.0;

impl StreamInfo {
    pub fn new(config: &EngineConfig, device_channels: usize, tone_hz: f32) -> Self {
        Self {
            sample_rate: config.sample_rate,
            channels: device_channels,
            tone_hz,
            comb_type: config.comb.filter_type,
            comb_max_delay: config.comb.max_delay_seconds,
            vibrato_max_delay: config.vibrato.max_delay_seconds,
            vibrato_min_rate: config.vibrato.lfo_reference_hz,
        }
    }

    /// Shortest comb delay that still rounds to one sample.
    pub fn comb_min_delay(&self) -> f32 {
        1.0 / self.sample_rate
    }
}

impl Knobs {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            comb_gain: config.comb.gain,
            comb_delay: config.comb.delay_seconds,
            vibrato_depth: config.vibrato.delay_seconds,
            vibrato_rate: config.vibrato.frequency_hz,
        }
    }

    pub fn nudge_gain(&mut self, steps: f32) -> f32 {
        self.comb_gain = (self.comb_gain + steps * GAIN_STEP).clamp(-GAIN_LIMIT, GAIN_LIMIT);
        self.comb_gain
    }

    pub fn nudge_comb_delay(&mut self, steps: f32, info: &StreamInfo) -> f32 {
        self.comb_delay = (self.comb_delay + steps * DELAY_STEP)
            .clamp(info.comb_min_delay(), info.comb_max_delay);
        self.comb_delay
    }

    pub fn nudge_depth(&mut self, steps: f32, info: &StreamInfo) -> f32 {
        self.vibrato_depth =
            (self.vibrato_depth + steps * DELAY_STEP).clamp(0.0, info.vibrato_max_delay);
        self.vibrato_depth
    }

    pub fn nudge_rate(&mut self, steps: f32, info: &StreamInfo) -> f32 {
        self.vibrato_rate =
            (self.vibrato_rate + steps * RATE_STEP).clamp(info.vibrato_min_rate, RATE_LIMIT);
        self.vibrato_rate
    }

    /// Spacing of the comb filter's peaks/notches in Hz.
    pub fn comb_tooth_hz(&self) -> f32 {
        1.0 / self.comb_delay
    }
}
