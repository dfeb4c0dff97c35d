//! # Ring Buffer
//!
//! A fixed-capacity circular buffer with two independent cursors. The write
//! cursor records incoming samples; the read cursor trails it and is advanced
//! explicitly by the owner. Both wrap modulo the capacity, which never changes
//! after construction.
//!
//! ```text
//!            newest sample (lookback 0)
//!                  │
//!   [ . . . r . . . n w . . . . ]
//!           │         │
//!         read      write
//! ```
//!
//! Fractional reads are addressed by *lookback*: the distance in samples
//! behind the most recently written sample. A lookback of 2.25 blends the
//! samples at lookback 2 and 3 with weights 0.75 and 0.25:
//!
//! ```text
//! result = sample_a * (1 - frac) + sample_b * frac
//! ```
//!
//! Keeping the lookback within `capacity - 2` is the caller's job. Past that
//! point the read aliases samples that are about to be overwritten.

/// Values that can be linearly blended between two neighbors.
pub trait Interpolate: Copy {
    /// Blend `self` towards `other` by `frac` in `[0, 1)`.
    fn lerp(self, other: Self, frac: f32) -> Self;
}

impl Interpolate for f32 {
    #[inline]
    fn lerp(self, other: Self, frac: f32) -> Self {
        self * (1.0 - frac) + other * frac
    }
}

impl Interpolate for f64 {
    #[inline]
    fn lerp(self, other: Self, frac: f32) -> Self {
        let frac = frac as f64;
        self * (1.0 - frac) + other * frac
    }
}

/// Circular sample storage with independent write and read cursors.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    buffer: Vec<T>,
    write_index: usize,
    read_index: usize,
}

impl<T: Copy + Default> RingBuffer<T> {
    /// Allocate a zero-filled buffer holding `capacity` samples.
    ///
    /// A capacity of 0 is bumped to 1 so the modular arithmetic stays valid.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![T::default(); capacity.max(1)],
            write_index: 0,
            read_index: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    #[inline]
    pub fn read_index(&self) -> usize {
        self.read_index
    }

    pub fn set_write_index(&mut self, index: usize) {
        self.write_index = index % self.capacity();
    }

    pub fn set_read_index(&mut self, index: usize) {
        self.read_index = index % self.capacity();
    }

    /// Store `value` at the write cursor without moving it.
    #[inline]
    pub fn put(&mut self, value: T) {
        self.buffer[self.write_index] = value;
    }

    /// Store `value` at the write cursor, then advance the write cursor.
    #[inline]
    pub fn put_post_inc(&mut self, value: T) {
        self.put(value);
        self.write_index = (self.write_index + 1) % self.capacity();
    }

    /// Return the value under the read cursor, then advance the read cursor.
    #[inline]
    pub fn get_post_inc(&mut self) -> T {
        let value = self.buffer[self.read_index];
        self.read_index = (self.read_index + 1) % self.capacity();
        value
    }

    /// How many samples the read cursor trails the most recently written
    /// sample. Zero means the read cursor sits on the newest sample.
    #[inline]
    pub fn read_lag(&self) -> usize {
        let capacity = self.capacity();
        (self.write_index + capacity - 1 - self.read_index) % capacity
    }

    /// Zero the storage and rewind both cursors.
    pub fn reset(&mut self) {
        self.buffer.fill(T::default());
        self.write_index = 0;
        self.read_index = 0;
    }

    /// Index of the sample `lookback` whole samples behind the newest one.
    #[inline]
    fn index_behind_newest(&self, lookback: usize) -> usize {
        let capacity = self.capacity();
        (self.write_index + capacity - 1 - lookback % capacity) % capacity
    }
}

impl<T: Interpolate + Default> RingBuffer<T> {
    /// Read `offset` samples behind the most recently written sample,
    /// linearly interpolating fractional offsets. No cursor moves.
    ///
    /// Offsets are clamped to `[0, capacity - 1]`.
    pub fn get(&self, offset: f32) -> T {
        let max_offset = (self.capacity() - 1) as f32;
        let offset = offset.max(0.0).min(max_offset);

        let whole = offset.floor();
        let frac = offset - whole;
        let whole = whole as usize;

        let sample_a = self.buffer[self.index_behind_newest(whole)];
        if frac == 0.0 {
            return sample_a;
        }
        let sample_b = self.buffer[self.index_behind_newest(whole + 1)];

        sample_a.lerp(sample_b, frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get_post_inc_fifo() {
        let mut rb = RingBuffer::<f32>::new(4);

        for i in 1..=3 {
            rb.put_post_inc(i as f32);
        }

        assert_eq!(rb.get_post_inc(), 1.0);
        assert_eq!(rb.get_post_inc(), 2.0);
        assert_eq!(rb.get_post_inc(), 3.0);
        assert_eq!(rb.read_index(), 3);
        assert_eq!(rb.write_index(), 3);
    }

    #[test]
    fn test_cursors_wrap_modulo_capacity() {
        let mut rb = RingBuffer::<f32>::new(3);

        for i in 0..7 {
            rb.put_post_inc(i as f32);
        }
        assert_eq!(rb.write_index(), 7 % 3);

        for _ in 0..5 {
            rb.get_post_inc();
        }
        assert_eq!(rb.read_index(), 5 % 3);
        assert_eq!(rb.capacity(), 3);
    }

    #[test]
    fn test_get_integer_lookback() {
        let mut rb = RingBuffer::<f32>::new(10);

        // Write 1, 2, 3, 4, 5: lookback 0 is the newest sample.
        for i in 1..=5 {
            rb.put_post_inc(i as f32);
        }

        assert!((rb.get(0.0) - 5.0).abs() < 1e-6);
        assert!((rb.get(1.0) - 4.0).abs() < 1e-6);
        assert!((rb.get(4.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_get_interpolates_between_neighbors() {
        let mut rb = RingBuffer::<f32>::new(8);

        rb.put_post_inc(0.0);
        rb.put_post_inc(1.0);

        // Lookback 0.5 sits halfway between 1.0 (newest) and 0.0.
        let result = rb.get(0.5);
        assert!((result - 0.5).abs() < 1e-6, "Expected 0.5, got {result}");

        let result = rb.get(0.25);
        assert!((result - 0.75).abs() < 1e-6, "Expected 0.75, got {result}");
    }

    #[test]
    fn test_get_wraps_around_start_of_storage() {
        let mut rb = RingBuffer::<f32>::new(4);

        // After 6 writes: storage = [4, 5, 2, 3], write cursor at 2.
        for i in 0..6 {
            rb.put_post_inc(i as f32);
        }

        assert!((rb.get(0.0) - 5.0).abs() < 1e-6);
        assert!((rb.get(1.0) - 4.0).abs() < 1e-6);
        // Crosses index 0 back to index 3.
        assert!((rb.get(2.0) - 3.0).abs() < 1e-6);
        assert!((rb.get(1.5) - 3.5).abs() < 1e-6);
    }

    #[test]
    fn test_get_does_not_move_cursors() {
        let mut rb = RingBuffer::<f32>::new(5);
        rb.put_post_inc(0.3);
        let (w, r) = (rb.write_index(), rb.read_index());

        let _ = rb.get(0.7);

        assert_eq!(rb.write_index(), w);
        assert_eq!(rb.read_index(), r);
    }

    #[test]
    fn test_get_clamps_out_of_range_offsets() {
        let mut rb = RingBuffer::<f32>::new(4);
        for i in 1..=4 {
            rb.put_post_inc(i as f32);
        }

        assert!((rb.get(-3.0) - 4.0).abs() < 1e-6);
        assert!((rb.get(100.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_read_lag_tracks_cursor_distance() {
        let mut rb = RingBuffer::<f32>::new(6);

        // Fresh buffer: newest slot is the one behind index 0.
        assert_eq!(rb.read_lag(), 5);

        rb.put_post_inc(1.0);
        assert_eq!(rb.read_lag(), 0);

        rb.put_post_inc(2.0);
        rb.put_post_inc(3.0);
        assert_eq!(rb.read_lag(), 2);

        rb.get_post_inc();
        assert_eq!(rb.read_lag(), 1);
    }

    #[test]
    fn test_set_indices_wrap() {
        let mut rb = RingBuffer::<f64>::new(5);
        rb.set_write_index(7);
        rb.set_read_index(12);
        assert_eq!(rb.write_index(), 2);
        assert_eq!(rb.read_index(), 2);
    }

    #[test]
    fn test_reset_clears_storage_and_cursors() {
        let mut rb = RingBuffer::<f64>::new(4);
        rb.put_post_inc(0.5);
        rb.put_post_inc(0.25);
        rb.get_post_inc();

        rb.reset();

        assert_eq!(rb.write_index(), 0);
        assert_eq!(rb.read_index(), 0);
        for offset in [0.0, 1.0, 2.5, 3.0] {
            assert_eq!(rb.get(offset), 0.0);
        }
    }

    #[test]
    fn test_zero_capacity_is_bumped() {
        let mut rb = RingBuffer::<f32>::new(0);
        assert_eq!(rb.capacity(), 1);
        rb.put_post_inc(0.9);
        assert!((rb.get(0.0) - 0.9).abs() < 1e-6);
        assert_eq!(rb.read_lag(), 0);
    }
}
