//! Wavetable low frequency oscillator.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::error::{EffectError, Result};

/*
Wavetable LFO
=============

The LFO precomputes one cycle of its waveform into a table and then walks
through that table by a fixed phase increment ("hop") per call.

Reference Frequency
-------------------

The table is sized for a *reference* frequency: one cycle at that frequency
covers the whole table.

    table length = ceil(sample_rate / reference_hz)

    reference_hz = 1 Hz at 48 kHz  ->  48000 entries (one second)

Playing the table back faster raises the frequency:

    hop = frequency / reference_hz

    frequency = reference   -> hop = 1.0   (one entry per call)
    frequency = 5.5 x ref   -> hop = 5.5   (fractional, interpolated)

Going slower than the reference would need a hop below 1.0, which is
rejected. The reference frequency is therefore the floor.

Amplitude
---------

Amplitude is baked into the table: changing it rebuilds every entry as
shape(i, L) * amplitude. Reads stay a single lookup and blend.

Shapes (i = table index, L = table length)
------------------------------------------

    sine      sin(2π·i/L)
    saw       2·i/L − 1              ╱╱╱╱
    pulse     −1 for i/L < 0.5       ▁▔▁▔
              +1 otherwise

Phase
-----

Phase is a fractional table index in [0, L). Each value blends the two
neighboring bins, then phase advances by hop and wraps modulo L. Resetting
the position zeroes phase and leaves amplitude, frequency and the table
untouched.
*/

/// Waveform baked into the wavetable.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LfoWaveform {
    #[default]
    Sine,
    Saw,
    Pulse,
}

impl LfoWaveform {
    /// Unit-amplitude value of the shape at table index `index` of `length`.
    pub fn shape(self, index: usize, length: usize) -> f32 {
        let position = index as f32 / length as f32;
        match self {
            LfoWaveform::Sine => (TAU * position).sin(),
            LfoWaveform::Saw => 2.0 * position - 1.0,
            LfoWaveform::Pulse => {
                if position < 0.5 {
                    -1.0
                } else {
                    1.0
                }
            }
        }
    }
}

/// Parameters that can be changed after `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LfoParam {
    /// Peak value of the output, in whatever unit the caller needs.
    Amplitude,
    /// Oscillation frequency in Hz; must not be below the reference.
    Frequency,
}

/// Calculate samples per LFO period.
///
/// # Example
/// ```
/// use delay_fx::dsp::lfo::samples_per_period;
/// let samples = samples_per_period(5.0, 48000.0);
/// assert_eq!(samples, 9600.0); // 5 Hz at 48kHz = 9600 samples
/// ```
#[inline]
pub fn samples_per_period(frequency_hz: f32, sample_rate: f32) -> f32 {
    sample_rate / frequency_hz
}

#[derive(Debug, Clone, Default)]
pub struct Lfo {
    initialized: bool,
    waveform: LfoWaveform,
    wavetable: Vec<f32>,
    sample_rate: f32,
    reference_hz: f32,
    amplitude: f32,
    frequency: f32,
    phase: f64,
    hop: f64,
}

impl Lfo {
    /// Create an uninitialized LFO. Call [`Lfo::init`] before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the wavetable for `reference_hz` at `sample_rate`.
    ///
    /// The table starts at amplitude 0 and the frequency at 0 (no movement).
    pub fn init(
        &mut self,
        waveform: LfoWaveform,
        reference_hz: f32,
        sample_rate: f32,
    ) -> Result<()> {
        if self.initialized {
            return Err(EffectError::IllegalCall("lfo is already initialized"));
        }
        if !(reference_hz > 0.0 && reference_hz.is_finite()) {
            return Err(EffectError::InvalidArguments(
                "lfo reference frequency must be positive",
            ));
        }
        if !(sample_rate > 0.0 && sample_rate.is_finite()) {
            return Err(EffectError::InvalidArguments("sample rate must be positive"));
        }

        let length = super::buffer_len(samples_per_period(reference_hz, sample_rate).ceil())
            .ok_or(EffectError::InvalidArguments("lfo wavetable would be too long"))?
            .max(1);

        self.waveform = waveform;
        self.sample_rate = sample_rate;
        self.reference_hz = reference_hz;
        self.amplitude = 0.0;
        self.frequency = 0.0;
        self.phase = 0.0;
        self.hop = 0.0;
        // Reuses the allocation kept by `reset(false)`.
        self.wavetable.clear();
        self.wavetable.resize(length, 0.0);
        self.initialized = true;

        tracing::debug!(
            ?waveform,
            reference_hz,
            sample_rate,
            length,
            "lfo initialized"
        );
        Ok(())
    }

    pub fn set_param(&mut self, param: LfoParam, value: f32) -> Result<()> {
        if !self.initialized {
            return Err(EffectError::NotInitialized);
        }
        if !value.is_finite() {
            return Err(EffectError::InvalidArguments("lfo parameter must be finite"));
        }

        match param {
            LfoParam::Amplitude => {
                self.amplitude = value;
                self.fill_wavetable();
            }
            LfoParam::Frequency => {
                if value < self.reference_hz {
                    tracing::warn!(
                        frequency = value,
                        reference_hz = self.reference_hz,
                        "lfo frequency below reference rejected"
                    );
                    return Err(EffectError::IllegalCall(
                        "lfo frequency is below the reference frequency",
                    ));
                }
                self.frequency = value;
                self.hop = value as f64 / self.reference_hz as f64;
            }
        }
        Ok(())
    }

    /// Current parameter value, or 0 when uninitialized.
    pub fn get_param(&self, param: LfoParam) -> f32 {
        if !self.initialized {
            return 0.0;
        }
        match param {
            LfoParam::Amplitude => self.amplitude,
            LfoParam::Frequency => self.frequency,
        }
    }

    /// Interpolated table value at the current phase; advances phase by hop.
    #[inline]
    pub fn get_value(&mut self) -> f32 {
        let length = self.wavetable.len();
        if length == 0 {
            return 0.0;
        }

        let whole = self.phase.floor();
        let frac = (self.phase - whole) as f32;
        let index = whole as usize % length;
        let next = (index + 1) % length;

        let current = self.wavetable[index];
        let value = current + (self.wavetable[next] - current) * frac;

        self.phase += self.hop;
        if self.phase >= length as f64 {
            self.phase %= length as f64;
        }

        value
    }

    /// Rewind phase to the start of the table.
    pub fn reset_position(&mut self) {
        self.phase = 0.0;
    }

    /// Clear all configuration. With `free_memory` the wavetable allocation
    /// is released, otherwise it is kept for the next `init`.
    pub fn reset(&mut self, free_memory: bool) {
        if free_memory {
            self.wavetable = Vec::new();
        } else {
            self.wavetable.clear();
        }
        self.initialized = false;
        self.waveform = LfoWaveform::default();
        self.sample_rate = 0.0;
        self.reference_hz = 0.0;
        self.amplitude = 0.0;
        self.frequency = 0.0;
        self.phase = 0.0;
        self.hop = 0.0;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn waveform(&self) -> LfoWaveform {
        self.waveform
    }

    pub fn reference_frequency(&self) -> f32 {
        self.reference_hz
    }

    pub fn wavetable_len(&self) -> usize {
        self.wavetable.len()
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    fn fill_wavetable(&mut self) {
        let length = self.wavetable.len();
        let (waveform, amplitude) = (self.waveform, self.amplitude);
        for (i, entry) in self.wavetable.iter_mut().enumerate() {
            *entry = waveform.shape(i, length) * amplitude;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lfo(waveform: LfoWaveform, reference_hz: f32, sample_rate: f32) -> Lfo {
        let mut lfo = Lfo::new();
        lfo.init(waveform, reference_hz, sample_rate).unwrap();
        lfo
    }

    #[test]
    fn test_samples_per_period() {
        assert!((samples_per_period(5.0, 48000.0) - 9600.0).abs() < 1e-6);
        assert!((samples_per_period(1.0, 48000.0) - 48000.0).abs() < 1e-6);
    }

    #[test]
    fn test_init_rejects_non_positive_frequencies() {
        let mut lfo = Lfo::new();
        assert!(matches!(
            lfo.init(LfoWaveform::Sine, 0.0, 48000.0),
            Err(EffectError::InvalidArguments(_))
        ));
        assert!(matches!(
            lfo.init(LfoWaveform::Sine, 1.0, -1.0),
            Err(EffectError::InvalidArguments(_))
        ));
        assert!(!lfo.is_initialized());
    }

    #[test]
    fn test_init_rejects_oversized_wavetable() {
        let mut lfo = Lfo::new();
        assert!(matches!(
            lfo.init(LfoWaveform::Sine, 1.0e-30, 48000.0),
            Err(EffectError::InvalidArguments(_))
        ));
        assert!(!lfo.is_initialized());
    }

    #[test]
    fn test_init_twice_is_illegal() {
        let mut lfo = lfo(LfoWaveform::Sine, 1.0, 100.0);
        assert!(matches!(
            lfo.init(LfoWaveform::Saw, 1.0, 100.0),
            Err(EffectError::IllegalCall(_))
        ));
        assert_eq!(lfo.waveform(), LfoWaveform::Sine);
    }

    #[test]
    fn test_wavetable_length_rounds_up() {
        let lfo = lfo(LfoWaveform::Sine, 3.0, 100.0);
        assert_eq!(lfo.wavetable_len(), 34);
    }

    #[test]
    fn test_set_param_before_init_fails() {
        let mut lfo = Lfo::new();
        assert_eq!(
            lfo.set_param(LfoParam::Amplitude, 1.0),
            Err(EffectError::NotInitialized)
        );
        assert_eq!(lfo.get_param(LfoParam::Amplitude), 0.0);
    }

    #[test]
    fn test_frequency_below_reference_is_rejected() {
        let mut lfo = lfo(LfoWaveform::Sine, 2.0, 100.0);
        lfo.set_param(LfoParam::Frequency, 4.0).unwrap();

        assert!(matches!(
            lfo.set_param(LfoParam::Frequency, 1.5),
            Err(EffectError::IllegalCall(_))
        ));
        // Rejected value leaves the previous one in place.
        assert_eq!(lfo.get_param(LfoParam::Frequency), 4.0);
    }

    #[test]
    fn test_saw_at_reference_walks_table() {
        let mut lfo = lfo(LfoWaveform::Saw, 1.0, 4.0);
        lfo.set_param(LfoParam::Amplitude, 1.0).unwrap();
        lfo.set_param(LfoParam::Frequency, 1.0).unwrap();

        let values: Vec<f32> = (0..5).map(|_| lfo.get_value()).collect();
        let expected = [-1.0, -0.5, 0.0, 0.5, -1.0];
        for (value, want) in values.iter().zip(expected.iter()) {
            assert!((value - want).abs() < 1e-6, "got {values:?}");
        }
    }

    #[test]
    fn test_amplitude_scales_table() {
        let mut lfo = lfo(LfoWaveform::Pulse, 1.0, 4.0);
        lfo.set_param(LfoParam::Amplitude, 3.0).unwrap();
        lfo.set_param(LfoParam::Frequency, 1.0).unwrap();

        let values: Vec<f32> = (0..4).map(|_| lfo.get_value()).collect();
        assert_eq!(values, vec![-3.0, -3.0, 3.0, 3.0]);
    }

    #[test]
    fn test_fractional_hop_interpolates() {
        let mut lfo = lfo(LfoWaveform::Saw, 2.0, 8.0); // table of 4
        lfo.set_param(LfoParam::Amplitude, 1.0).unwrap();
        lfo.set_param(LfoParam::Frequency, 3.0).unwrap(); // hop 1.5

        let first = lfo.get_value(); // phase 0.0
        let second = lfo.get_value(); // phase 1.5: between -0.5 and 0.0
        let third = lfo.get_value(); // phase 3.0
        assert!((first - -1.0).abs() < 1e-6);
        assert!((second - -0.25).abs() < 1e-6);
        assert!((third - 0.5).abs() < 1e-6);
        // 4.5 wraps to 0.5
        assert!((lfo.phase() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_sine_peaks_at_quarter_cycle() {
        let mut lfo = lfo(LfoWaveform::Sine, 1.0, 8.0);
        lfo.set_param(LfoParam::Amplitude, 2.0).unwrap();
        lfo.set_param(LfoParam::Frequency, 2.0).unwrap(); // hop 2

        assert!(lfo.get_value().abs() < 1e-6);
        assert!((lfo.get_value() - 2.0).abs() < 1e-5);
        assert!(lfo.get_value().abs() < 1e-5);
        assert!((lfo.get_value() + 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_reset_position_keeps_configuration() {
        let mut lfo = lfo(LfoWaveform::Saw, 1.0, 10.0);
        lfo.set_param(LfoParam::Amplitude, 0.5).unwrap();
        lfo.set_param(LfoParam::Frequency, 3.0).unwrap();
        let first = lfo.get_value();
        lfo.get_value();

        lfo.reset_position();

        assert_eq!(lfo.phase(), 0.0);
        assert_eq!(lfo.get_value(), first);
        assert_eq!(lfo.get_param(LfoParam::Amplitude), 0.5);
        assert_eq!(lfo.get_param(LfoParam::Frequency), 3.0);
    }

    #[test]
    fn test_reset_clears_configuration() {
        let mut lfo = lfo(LfoWaveform::Saw, 1.0, 10.0);
        lfo.set_param(LfoParam::Amplitude, 0.5).unwrap();

        lfo.reset(true);

        assert!(!lfo.is_initialized());
        assert_eq!(lfo.wavetable_len(), 0);
        assert_eq!(lfo.get_param(LfoParam::Amplitude), 0.0);
        assert_eq!(lfo.get_value(), 0.0);

        // Can be initialized again after a reset.
        lfo.init(LfoWaveform::Pulse, 1.0, 20.0).unwrap();
        assert_eq!(lfo.wavetable_len(), 20);
    }

    #[test]
    fn test_unset_frequency_holds_phase() {
        let mut lfo = lfo(LfoWaveform::Saw, 1.0, 10.0);
        lfo.set_param(LfoParam::Amplitude, 1.0).unwrap();

        for _ in 0..5 {
            assert!((lfo.get_value() - -1.0).abs() < 1e-6);
        }
    }
}
