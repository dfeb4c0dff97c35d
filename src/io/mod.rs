// Purpose - planar audio storage and interleaving for device/file collaborators

/// Planar multi-channel audio: one `Vec<f32>` per channel, equal lengths.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AudioBuffer {
    pub buffers: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Silent buffer of `channels` x `frames`.
    pub fn new(channels: usize, frames: usize) -> Self {
        Self {
            buffers: vec![vec![0.0; frames]; channels],
        }
    }

    /// Wrap existing channels. Shorter channels are zero-padded to the
    /// longest one.
    pub fn from_channels(mut buffers: Vec<Vec<f32>>) -> Self {
        let frames = buffers.iter().map(Vec::len).max().unwrap_or(0);
        for channel in &mut buffers {
            channel.resize(frames, 0.0);
        }
        Self { buffers }
    }

    /// Split interleaved frames (`L R L R ...`) into channels. A trailing
    /// partial frame is dropped.
    pub fn from_interleaved(data: &[f32], channels: usize) -> Self {
        if channels == 0 {
            return Self::default();
        }
        let frames = data.len() / channels;
        let mut buffer = Self::new(channels, frames);
        for (frame, samples) in data.chunks_exact(channels).enumerate() {
            for (channel, &sample) in samples.iter().enumerate() {
                buffer.buffers[channel][frame] = sample;
            }
        }
        buffer
    }

    pub fn num_channels(&self) -> usize {
        self.buffers.len()
    }

    pub fn num_frames(&self) -> usize {
        self.buffers.first().map_or(0, Vec::len)
    }

    /// Borrow frames `start..start + len` of every channel.
    pub fn block(&self, start: usize, len: usize) -> Vec<&[f32]> {
        self.buffers
            .iter()
            .map(|channel| &channel[start..start + len])
            .collect()
    }

    /// Mutably borrow frames `start..start + len` of every channel.
    pub fn block_mut(&mut self, start: usize, len: usize) -> Vec<&mut [f32]> {
        self.buffers
            .iter_mut()
            .map(|channel| &mut channel[start..start + len])
            .collect()
    }

    /// Write frames interleaved into `out`, as many as fit.
    pub fn write_interleaved(&self, out: &mut [f32]) -> usize {
        let channels = self.num_channels();
        if channels == 0 {
            return 0;
        }
        let frames = self.num_frames().min(out.len() / channels);
        for (frame, slot) in out.chunks_exact_mut(channels).take(frames).enumerate() {
            for (channel, sample) in slot.iter_mut().enumerate() {
                *sample = self.buffers[channel][frame];
            }
        }
        frames
    }
}
