//! delayfx - live comb filter + vibrato demo with a terminal scope
//!
//! Run with: cargo run --bin delayfx
//!
//! Logs go to `delayfx.log` in the temp directory; set `RUST_LOG` to adjust.

mod app;
mod tone;
mod ui;

use std::{fs::File, sync::Mutex};

use color_eyre::eyre::WrapErr;
use tracing_subscriber::EnvFilter;

use app::DelayFx;
use delay_fx::{CombFilterType, EngineConfig};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let log_path = std::env::temp_dir().join("delayfx.log");
    let log_file = File::create(&log_path)
        .wrap_err_with(|| format!("failed to create log file {}", log_path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .init();

    let mut config = EngineConfig::default();
    config.comb.filter_type = CombFilterType::Iir;
    config.comb.delay_seconds = 0.004;
    config.comb.gain = 0.6;
    config.vibrato.max_delay_seconds = 0.008;
    config.vibrato.delay_seconds = 0.003;
    config.vibrato.frequency_hz = 5.0;

    DelayFx::new(config).tone_hz(110.0).run()
}
