//! TUI module for delayfx
//!
//! Shows the processed signal and lets the user play with the effect knobs
//! while audio is running.

pub mod state;
mod spectrum;
mod transport;
mod waveform;

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};

use delay_fx::{control::ParamChange, CombParam, VibratoParam};

pub use state::{Knobs, StreamInfo};

use spectrum::{render_spectrum, SpectrumAnalyzer};
use transport::{render_transport, AudioStats};
use waveform::render_waveform;

/// Audio visualization buffer size
pub const VIS_BUFFER_SIZE: usize = 2048;

/// UI application state
pub struct UiApp {
    /// Processed samples from the audio thread
    audio_rx: Consumer<f32>,
    comb_tx: Producer<ParamChange<CombParam>>,
    vibrato_tx: Producer<ParamChange<VibratoParam>>,
    /// Parameter changes the effects refused
    rejected: Arc<AtomicUsize>,
    info: StreamInfo,
    knobs: Knobs,
    /// Changes dropped because a queue was full
    dropped: usize,
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        audio_rx: Consumer<f32>,
        comb_tx: Producer<ParamChange<CombParam>>,
        vibrato_tx: Producer<ParamChange<VibratoParam>>,
        rejected: Arc<AtomicUsize>,
        info: StreamInfo,
        knobs: Knobs,
    ) -> Self {
        let spectrum = SpectrumAnalyzer::new(VIS_BUFFER_SIZE, info.sample_rate);
        Self {
            audio_rx,
            comb_tx,
            vibrato_tx,
            rejected,
            info,
            knobs,
            dropped: 0,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.spectrum.update(&self.audio_buffer);

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Keep the most recent VIS_BUFFER_SIZE samples
    fn poll_audio(&mut self) {
        let mut received = false;
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
            received = true;
        }

        if received && self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('g') => {
                let value = self.knobs.nudge_gain(-1.0);
                self.send_comb(CombParam::Gain, value);
            }
            KeyCode::Char('G') => {
                let value = self.knobs.nudge_gain(1.0);
                self.send_comb(CombParam::Gain, value);
            }
            KeyCode::Char('c') => {
                let value = self.knobs.nudge_comb_delay(-1.0, &self.info);
                self.send_comb(CombParam::Delay, value);
            }
            KeyCode::Char('C') => {
                let value = self.knobs.nudge_comb_delay(1.0, &self.info);
                self.send_comb(CombParam::Delay, value);
            }
            KeyCode::Char('d') => {
                let value = self.knobs.nudge_depth(-1.0, &self.info);
                self.send_vibrato(VibratoParam::Delay, value);
            }
            KeyCode::Char('D') => {
                let value = self.knobs.nudge_depth(1.0, &self.info);
                self.send_vibrato(VibratoParam::Delay, value);
            }
            KeyCode::Char('f') => {
                let value = self.knobs.nudge_rate(-1.0, &self.info);
                self.send_vibrato(VibratoParam::Frequency, value);
            }
            KeyCode::Char('F') => {
                let value = self.knobs.nudge_rate(1.0, &self.info);
                self.send_vibrato(VibratoParam::Frequency, value);
            }
            _ => {}
        }
    }

    fn send_comb(&mut self, param: CombParam, value: f32) {
        if self.comb_tx.push(ParamChange::new(param, value)).is_err() {
            self.dropped += 1;
        }
        tracing::debug!(?param, value, "comb change queued");
    }

    fn send_vibrato(&mut self, param: VibratoParam, value: f32) {
        if self.vibrato_tx.push(ParamChange::new(param, value)).is_err() {
            self.dropped += 1;
        }
        tracing::debug!(?param, value, "vibrato change queued");
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Status + knobs
                Constraint::Min(8),    // Waveform
                Constraint::Min(8),    // Spectrum
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        let rejected = self.rejected.load(Ordering::Relaxed) + self.dropped;
        render_transport(frame, chunks[0], &self.info, &self.knobs, &stats, rejected);

        render_waveform(frame, chunks[1], &self.audio_buffer);
        render_spectrum(frame, chunks[2], self.spectrum.data(), self.knobs.comb_tooth_hz());

        let help = Paragraph::new(
            " [g/G] Gain  [c/C] Comb delay  [d/D] Depth  [f/F] Rate  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
