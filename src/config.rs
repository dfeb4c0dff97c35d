//! Effect configurations with defaults.
//!
//! A config captures everything `init` and `set_param` need, so an effect can
//! be rebuilt from plain data (and, with the `serde` feature, from a file).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::lfo::LfoWaveform;
use crate::effects::vibrato::DEFAULT_LFO_REFERENCE_HZ;
use crate::effects::{CombFilter, CombFilterType, CombParam, Effect, Vibrato, VibratoParam};
use crate::error::Result;
use crate::DEFAULT_BLOCK_SIZE;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct CombFilterConfig {
    pub filter_type: CombFilterType,
    pub max_delay_seconds: f32,
    pub delay_seconds: f32,
    pub gain: f32,
}

impl Default for CombFilterConfig {
    fn default() -> Self {
        Self {
            filter_type: CombFilterType::Fir,
            max_delay_seconds: 1.0,
            delay_seconds: 0.01,
            gain: 0.5,
        }
    }
}

impl CombFilterConfig {
    /// Initialize a comb filter and apply the delay and gain.
    pub fn build(&self, sample_rate: f32, num_channels: usize) -> Result<CombFilter> {
        let mut comb = CombFilter::new();
        comb.init(
            self.filter_type,
            self.max_delay_seconds,
            sample_rate,
            num_channels,
        )?;
        comb.set_param(CombParam::Delay, self.delay_seconds)?;
        comb.set_param(CombParam::Gain, self.gain)?;
        Ok(comb)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct VibratoConfig {
    pub max_delay_seconds: f32,
    /// Modulation depth in seconds.
    pub delay_seconds: f32,
    /// Modulation rate in Hz.
    pub frequency_hz: f32,
    /// Lowest allowed rate; sets the wavetable length.
    pub lfo_reference_hz: f32,
    pub waveform: LfoWaveform,
    pub block_size: usize,
}

impl Default for VibratoConfig {
    fn default() -> Self {
        Self {
            max_delay_seconds: 0.01,
            delay_seconds: 0.002,
            frequency_hz: 5.0,
            lfo_reference_hz: DEFAULT_LFO_REFERENCE_HZ,
            waveform: LfoWaveform::Sine,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl VibratoConfig {
    /// Initialize a vibrato and apply depth, rate and block size.
    pub fn build(&self, sample_rate: f32, num_channels: usize) -> Result<Vibrato> {
        let mut vibrato = Vibrato::new()
            .with_waveform(self.waveform)
            .with_lfo_reference(self.lfo_reference_hz);
        vibrato.init(self.max_delay_seconds, sample_rate, num_channels)?;
        vibrato.set_param(VibratoParam::Delay, self.delay_seconds)?;
        vibrato.set_param(VibratoParam::Frequency, self.frequency_hz)?;
        vibrato.set_param(VibratoParam::BlockSize, self.block_size as f32)?;
        Ok(vibrato)
    }
}

/// Stream format plus the settings of both effects.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub sample_rate: f32,
    pub channels: usize,
    pub block_size: usize,
    pub comb: CombFilterConfig,
    pub vibrato: VibratoConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            channels: 2,
            block_size: DEFAULT_BLOCK_SIZE,
            comb: CombFilterConfig::default(),
            vibrato: VibratoConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn build_comb(&self) -> Result<CombFilter> {
        self.comb.build(self.sample_rate, self.channels)
    }

    pub fn build_vibrato(&self) -> Result<Vibrato> {
        self.vibrato.build(self.sample_rate, self.channels)
    }
}
