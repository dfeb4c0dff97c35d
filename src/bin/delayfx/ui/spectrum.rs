//! Spectrum analyzer widget
//!
//! Comb filters space their peaks and notches evenly in Hz, so the display
//! uses a linear frequency axis over the low part of the band where the
//! teeth are easiest to see.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Upper edge of the displayed band in Hz
const DISPLAY_MAX_HZ: f32 = 5_000.0;
/// Floor of the magnitude axis in dB
const FLOOR_DB: f64 = -100.0;

pub struct SpectrumAnalyzer {
    /// Hann window coefficients
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// Width of one FFT bin in Hz
    bin_hz: f64,
    /// (frequency_hz, magnitude_db) for every displayed bin
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    /// `buffer_len` is the FFT size and must match the scope buffer length.
    pub fn new(buffer_len: usize, sample_rate: f32) -> Self {
        let buffer_len = buffer_len.max(2);
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(buffer_len);

        let denom = (buffer_len - 1) as f32;
        let window: Vec<f32> = (0..buffer_len)
            .map(|i| 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos()))
            .collect();

        let bin_hz = sample_rate as f64 / buffer_len as f64;
        let max_hz = DISPLAY_MAX_HZ.min(sample_rate / 2.0) as f64;
        let bins = ((max_hz / bin_hz) as usize).clamp(1, buffer_len / 2);
        let spectrum = (0..bins).map(|i| (i as f64 * bin_hz, FLOOR_DB)).collect();

        Self {
            window,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); buffer_len],
            bin_hz,
            spectrum,
        }
    }

    /// Recompute from the latest scope buffer; other lengths are ignored.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }

        self.fft.process(&mut self.scratch);

        for (i, (freq, magnitude_db)) in self.spectrum.iter_mut().enumerate() {
            let bin = self.scratch[i];
            let power = (bin.re * bin.re + bin.im * bin.im).max(1e-12);
            *freq = i as f64 * self.bin_hz;
            *magnitude_db = (10.0 * (power as f64).log10()).max(FLOOR_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

/// Render the spectrum with the expected comb tooth spacing in the title
pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)], tooth_hz: f32) {
    let block = Block::default()
        .title(format!(" Spectrum (teeth every {:.0} Hz) ", tooth_hz))
        .borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let max_freq = spectrum
        .last()
        .map(|(f, _)| *f)
        .unwrap_or(1.0)
        .max(1.0);
    let max_db = spectrum.iter().map(|(_, db)| *db).fold(FLOOR_DB, f64::max);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, max_freq])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", max_freq / 2.0)),
                    Span::raw(format!("{:.0} Hz", max_freq)),
                ])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, max_db.max(0.0) + 10.0])
                .labels(vec!["-100", "-50", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
