//! Test tone built on the wavetable LFO running at audio rate.

use delay_fx::{
    dsp::{Lfo, LfoParam, LfoWaveform},
    Result,
};

/// Lowest pitch the tone table supports.
const TONE_REFERENCE_HZ: f32 = 20.0;

pub struct Tone {
    osc: Lfo,
}

impl Tone {
    /// Sawtooth at `frequency_hz` with peak `amplitude`.
    pub fn saw(frequency_hz: f32, amplitude: f32, sample_rate: f32) -> Result<Self> {
        let mut osc = Lfo::new();
        osc.init(LfoWaveform::Saw, TONE_REFERENCE_HZ, sample_rate)?;
        osc.set_param(LfoParam::Amplitude, amplitude)?;
        osc.set_param(LfoParam::Frequency, frequency_hz.max(TONE_REFERENCE_HZ))?;
        Ok(Self { osc })
    }

    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.osc.get_value();
        }
    }
}
