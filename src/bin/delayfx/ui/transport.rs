//! Status bar widget - stream facts, current knob values and audio stats

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use delay_fx::CombFilterType;

use super::{Knobs, StreamInfo};

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    info: &StreamInfo,
    knobs: &Knobs,
    audio_stats: &AudioStats,
    rejected: usize,
) {
    let block = Block::default()
        .title(" delayfx ")
        .borders(Borders::ALL);

    let comb_kind = match info.comb_type {
        CombFilterType::Fir => "FIR",
        CombFilterType::Iir => "IIR",
    };

    let stream_line = Line::from(vec![
        Span::styled(
            format!(" {:.1}kHz  {}ch  ", info.sample_rate / 1000.0, info.channels),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Tone: {:.0}Hz saw  ", info.tone_hz),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            format!("  Rejected: {}", rejected),
            Style::default().fg(if rejected > 0 {
                Color::Yellow
            } else {
                Color::DarkGray
            }),
        ),
    ]);

    let knob_line = Line::from(vec![
        Span::styled(
            format!(
                " Comb {}: gain {:+.2}  delay {:.1}ms  ",
                comb_kind,
                knobs.comb_gain,
                knobs.comb_delay * 1000.0
            ),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!(
                "Vibrato: depth {:.2}ms  rate {:.1}Hz",
                knobs.vibrato_depth * 1000.0,
                knobs.vibrato_rate
            ),
            Style::default().fg(Color::Green),
        ),
    ]);

    let paragraph = Paragraph::new(vec![stream_line, knob_line]).block(block);
    frame.render_widget(paragraph, area);
}
