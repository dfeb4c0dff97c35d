//! Block-based driver for offline processing.
//!
//! Mirrors what a file-processing front end does: read a fixed-size block,
//! run it through an effect, append the output, repeat until the input is
//! exhausted. The last block may be short.
//!
//! # Example
//!
//! ```
//! use delay_fx::{io::AudioBuffer, runtime::BlockProcessor, CombFilter, CombFilterType, CombParam, Effect};
//!
//! let mut comb = CombFilter::new();
//! comb.init(CombFilterType::Fir, 1.0, 8.0, 1)?;
//! comb.set_param(CombParam::Gain, -1.0)?;
//!
//! let mut impulse = AudioBuffer::new(1, 9);
//! impulse.buffers[0][0] = 1.0;
//!
//! let out = BlockProcessor::new(4)?.run(&mut comb, &impulse)?;
//! assert_eq!(out.buffers[0][8], -1.0);
//! # Ok::<(), delay_fx::EffectError>(())
//! ```

use crate::effects::Effect;
use crate::error::{EffectError, Result};
use crate::io::AudioBuffer;

#[derive(Debug, Clone, Copy)]
pub struct BlockProcessor {
    block_size: usize,
}

impl BlockProcessor {
    pub fn new(block_size: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(EffectError::InvalidArguments("block size must be at least 1"));
        }
        Ok(Self { block_size })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Run all of `input` through `effect` and return the output.
    ///
    /// Effects that consume fewer frames than offered are called again on
    /// the remainder of the block.
    pub fn run<E: Effect>(&self, effect: &mut E, input: &AudioBuffer) -> Result<AudioBuffer> {
        if !effect.is_initialized() {
            return Err(EffectError::NotInitialized);
        }
        if input.num_channels() != effect.num_channels() {
            return Err(EffectError::InvalidArguments(
                "channel count does not match the effect",
            ));
        }

        let total = input.num_frames();
        let mut output = AudioBuffer::new(input.num_channels(), total);
        let mut start = 0;

        while start < total {
            let block_end = (start + self.block_size).min(total);
            let mut position = start;

            while position < block_end {
                let remaining = block_end - position;
                let source = input.block(position, remaining);
                let mut sink = output.block_mut(position, remaining);

                let done = effect.process(&source, &mut sink, remaining)?;
                if done == 0 {
                    return Err(EffectError::IllegalCall("effect made no progress"));
                }
                position += done;
            }

            start = block_end;
        }

        tracing::debug!(frames = total, block_size = self.block_size, "buffer processed");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{CombFilter, CombFilterType, CombParam, Vibrato, VibratoParam};

    #[test]
    fn test_zero_block_size_rejected() {
        assert!(matches!(
            BlockProcessor::new(0),
            Err(EffectError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_block_size_does_not_change_comb_output() {
        let mut input = AudioBuffer::new(2, 50);
        for (i, sample) in input.buffers[0].iter_mut().enumerate() {
            *sample = ((i * 7) % 11) as f32 / 11.0 - 0.5;
        }

        let render = |block| {
            let mut comb = CombFilter::new();
            comb.init(CombFilterType::Iir, 0.5, 20.0, 2).unwrap();
            comb.set_param(CombParam::Gain, 0.6).unwrap();
            comb.set_param(CombParam::Delay, 0.15).unwrap();
            BlockProcessor::new(block)
                .unwrap()
                .run(&mut comb, &input)
                .unwrap()
        };

        assert_eq!(render(1), render(50));
        assert_eq!(render(7), render(16));
    }

    #[test]
    fn test_effect_block_smaller_than_runner_block() {
        let mut vib = Vibrato::new();
        vib.init(0.05, 100.0, 1).unwrap();
        vib.set_param(VibratoParam::BlockSize, 3.0).unwrap();

        let input = AudioBuffer::from_channels(vec![vec![1.0; 40]]);
        let out = BlockProcessor::new(16).unwrap().run(&mut vib, &input).unwrap();

        // Lag of 5 samples, then the DC passes through.
        assert!(out.buffers[0][..5].iter().all(|&s| s == 0.0));
        assert!(out.buffers[0][5..].iter().all(|&s| s == 1.0));
    }

    #[test]
    fn test_channel_mismatch_rejected() {
        let mut comb = CombFilter::new();
        comb.init(CombFilterType::Fir, 0.1, 100.0, 2).unwrap();
        let input = AudioBuffer::new(1, 10);

        assert!(matches!(
            BlockProcessor::new(4).unwrap().run(&mut comb, &input),
            Err(EffectError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_uninitialized_effect_fails() {
        let mut vib = Vibrato::new();
        let input = AudioBuffer::new(0, 10);
        assert_eq!(
            BlockProcessor::new(4).unwrap().run(&mut vib, &input),
            Err(EffectError::NotInitialized)
        );
    }
}
