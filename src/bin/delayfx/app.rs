//! DelayFx - audio device setup and the realtime render path

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, Producer, RingBuffer};

use delay_fx::{
    control::{apply_pending, param_queue, ParamChange},
    CombFilter, CombParam, Effect, EngineConfig, Vibrato, VibratoParam, MAX_BLOCK_SIZE,
};

use super::tone::Tone;
use super::ui::{Knobs, StreamInfo, UiApp, VIS_BUFFER_SIZE};

/// Peak level of the test tone.
const TONE_AMPLITUDE: f32 = 0.3;
/// Pending parameter changes per effect.
const PARAM_QUEUE_SIZE: usize = 64;

/// Application builder
pub struct DelayFx {
    config: EngineConfig,
    tone_hz: f32,
}

impl DelayFx {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            tone_hz: 110.0,
        }
    }

    /// Set the pitch of the test tone
    pub fn tone_hz(mut self, hz: f32) -> Self {
        self.tone_hz = hz;
        self
    }

    /// Open the default output device and run until the UI quits
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let supported = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = supported.sample_rate().0 as f32;
        let channels = supported.channels() as usize;

        // Effects run mono; the result is copied to every device channel.
        let mut engine = self.config;
        engine.sample_rate = sample_rate;
        engine.channels = 1;

        let comb = engine.build_comb().wrap_err("invalid comb filter settings")?;
        let vibrato = engine.build_vibrato().wrap_err("invalid vibrato settings")?;
        let tone = Tone::saw(self.tone_hz, TONE_AMPLITUDE, sample_rate)
            .wrap_err("invalid tone settings")?;

        tracing::info!(sample_rate, channels, tone_hz = self.tone_hz, "output device opened");

        let (scope_tx, scope_rx) = RingBuffer::<f32>::new(VIS_BUFFER_SIZE * 4);
        let (comb_tx, comb_rx) = param_queue(PARAM_QUEUE_SIZE);
        let (vibrato_tx, vibrato_rx) = param_queue(PARAM_QUEUE_SIZE);
        let rejected = Arc::new(AtomicUsize::new(0));

        let mut renderer = Renderer {
            tone,
            comb,
            vibrato,
            comb_rx,
            vibrato_rx,
            scope_tx,
            rejected: rejected.clone(),
            tone_buf: vec![0.0; MAX_BLOCK_SIZE],
            comb_buf: vec![0.0; MAX_BLOCK_SIZE],
            out_buf: vec![0.0; MAX_BLOCK_SIZE],
        };

        let stream = device.build_output_stream(
            &supported.into(),
            move |data: &mut [f32], _| renderer.fill(data, channels),
            |err| tracing::error!(%err, "audio stream error"),
            None,
        )?;
        stream.play()?;

        let info = StreamInfo::new(&engine, channels, self.tone_hz);
        let knobs = Knobs::from_config(&engine);
        let mut ui = UiApp::new(scope_rx, comb_tx, vibrato_tx, rejected, info, knobs);

        let mut terminal = ratatui::init();
        let result = ui.run(&mut terminal);
        ratatui::restore();

        drop(stream);
        tracing::info!("stream closed");
        result
    }
}

/// Everything the audio callback owns
struct Renderer {
    tone: Tone,
    comb: CombFilter,
    vibrato: Vibrato,
    comb_rx: Consumer<ParamChange<CombParam>>,
    vibrato_rx: Consumer<ParamChange<VibratoParam>>,
    scope_tx: Producer<f32>,
    rejected: Arc<AtomicUsize>,
    tone_buf: Vec<f32>,
    comb_buf: Vec<f32>,
    out_buf: Vec<f32>,
}

impl Renderer {
    /// Fill an interleaved device buffer
    fn fill(&mut self, data: &mut [f32], channels: usize) {
        if channels == 0 {
            return;
        }

        let comb_report = apply_pending(&mut self.comb, &mut self.comb_rx);
        let vibrato_report = apply_pending(&mut self.vibrato, &mut self.vibrato_rx);
        let rejected = comb_report.rejected + vibrato_report.rejected;
        if rejected > 0 {
            self.rejected.fetch_add(rejected, Ordering::Relaxed);
        }

        let total_frames = data.len() / channels;
        let mut frames_written = 0;

        while frames_written < total_frames {
            let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
            self.render_block(frames);

            let out_off = frames_written * channels;
            for (i, &sample) in self.out_buf[..frames].iter().enumerate() {
                let sample = sample.clamp(-1.0, 1.0);
                // A full scope queue just drops samples.
                let _ = self.scope_tx.push(sample);
                for ch in 0..channels {
                    data[out_off + i * channels + ch] = sample;
                }
            }

            frames_written += frames;
        }
    }

    /// tone -> comb -> vibrato into `out_buf[..frames]`
    fn render_block(&mut self, frames: usize) {
        self.tone.render(&mut self.tone_buf[..frames]);

        let input: [&[f32]; 1] = [&self.tone_buf[..frames]];
        let mut output: [&mut [f32]; 1] = [&mut self.comb_buf[..frames]];
        if self.comb.process(&input, &mut output, frames).is_err() {
            self.comb_buf[..frames].fill(0.0);
        }

        let mut done = 0;
        while done < frames {
            let input: [&[f32]; 1] = [&self.comb_buf[done..frames]];
            let mut output: [&mut [f32]; 1] = [&mut self.out_buf[done..frames]];
            match self.vibrato.process(&input, &mut output, frames - done) {
                Ok(n) if n > 0 => done += n,
                _ => {
                    self.out_buf[done..frames].fill(0.0);
                    break;
                }
            }
        }
    }
}
