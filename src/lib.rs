pub mod config;
pub mod control; // Realtime parameter messages
pub mod dsp;
pub mod effects; // Comb filter and vibrato
pub mod error;
pub mod io;
pub mod runtime; // Block-by-block driver

pub use config::{CombFilterConfig, EngineConfig, VibratoConfig};
pub use effects::{CombFilter, CombFilterType, CombParam, Effect, Vibrato, VibratoParam};
pub use error::{EffectError, Result};

/// Largest block the realtime demo renders in one go.
pub const MAX_BLOCK_SIZE: usize = 2048;
/// Frames per `process` call until a block size is set explicitly.
pub const DEFAULT_BLOCK_SIZE: usize = 1024;
/// Longest per-channel delay line or wavetable, in samples.
pub const MAX_DELAY_LINE_SAMPLES: usize = 1 << 24;
