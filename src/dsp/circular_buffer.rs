use crate::error::{ensure_positive, DspError, Result};

/// Largest history a buffer may hold, about 21.8 s at 48 kHz.
pub const MAX_BUFFER_LEN: usize = 1 << 20;

/// Samples needed to hold one period of `min_frequency` at `sample_rate`.
///
/// The ratio is checked in `f64` before any cast to `usize`.
pub fn buffer_len_for(min_frequency: f32, sample_rate: f32) -> Result<usize> {
    ensure_positive("min_frequency", min_frequency as f64)?;
    ensure_positive("sample_rate", sample_rate as f64)?;

    let len = (sample_rate as f64 / min_frequency as f64).ceil();
    if !len.is_finite() || len > MAX_BUFFER_LEN as f64 {
        return Err(DspError::invalid(
            "min_frequency",
            format!(
                "{min_frequency} Hz at {sample_rate} Hz sample rate needs {len} samples, \
                 limit is {MAX_BUFFER_LEN}"
            ),
        ));
    }
    Ok(len as usize)
}

/// Fixed-size ring of audio samples.
///
/// Every index passed in is reduced modulo the buffer length, so callers can
/// hand over any position without bounds checks of their own. The storage is
/// allocated once at construction and never resized.
pub struct CircularSampleBuffer {
    samples: Vec<f32>,
}

impl CircularSampleBuffer {
    pub fn new(len: usize) -> Result<Self> {
        if !(2..=MAX_BUFFER_LEN).contains(&len) {
            return Err(DspError::invalid(
                "buffer_len",
                format!("need 2..={MAX_BUFFER_LEN} samples, got {len}"),
            ));
        }
        Ok(Self {
            samples: vec![0.0; len],
        })
    }

    /// Enough history for one period of `min_frequency` at `sample_rate`.
    pub fn with_min_frequency(min_frequency: f32, sample_rate: f32) -> Result<Self> {
        Self::new(buffer_len_for(min_frequency, sample_rate)?)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; a buffer holds at least two samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn write(&mut self, index: usize, sample: f32) {
        let len = self.samples.len();
        self.samples[index % len] = sample;
    }

    #[inline]
    pub fn read(&self, index: usize) -> f32 {
        self.samples[index % self.samples.len()]
    }

    /// Index `offset` samples behind `position`, wrapped into the buffer.
    #[inline]
    pub fn wrap_back(&self, position: usize, offset: usize) -> usize {
        let len = self.samples.len();
        (position % len + len - offset % len) % len
    }

    /// Linear interpolation at a fractional position.
    ///
    /// Reads `floor(position)` and the next slot (wrapping past the end). A
    /// whole-number position reads its slot directly.
    #[inline]
    pub fn read_interpolated(&self, position: f64) -> f32 {
        let len = self.samples.len();
        let base = position.floor();
        let frac = (position - base) as f32;
        let i0 = base as usize % len;

        if frac == 0.0 {
            return self.samples[i0];
        }

        let i1 = (i0 + 1) % len;
        let a = self.samples[i0];
        let b = self.samples[i1];
        a + (b - a) * frac
    }

    /// RMS of the pairwise differences between the `window` samples that
    /// precede `a` and the `window` samples that precede `b`.
    ///
    /// Both walks step backward and wrap. A window longer than the buffer is
    /// clamped to the buffer length. Comparing a position with itself is
    /// exactly zero.
    pub fn rms_difference(&self, a: usize, b: usize, window: usize) -> f32 {
        let window = window.min(self.samples.len());
        if window == 0 {
            return 0.0;
        }

        let mut sum = 0.0f32;
        for k in 1..=window {
            let diff = self.samples[self.wrap_back(a, k)] - self.samples[self.wrap_back(b, k)];
            sum += diff * diff;
        }

        (sum / window as f32).sqrt()
    }

    pub fn clear(&mut self) {
        self.samples.fill(0.0);
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize) -> CircularSampleBuffer {
        let mut buffer = CircularSampleBuffer::new(len).unwrap();
        for i in 0..len {
            buffer.write(i, i as f32);
        }
        buffer
    }

    #[test]
    fn rejects_degenerate_sizes() {
        assert!(CircularSampleBuffer::new(0).is_err());
        assert!(CircularSampleBuffer::new(1).is_err());
        assert!(CircularSampleBuffer::with_min_frequency(0.0, 48_000.0).is_err());
        assert!(CircularSampleBuffer::with_min_frequency(10.0, -1.0).is_err());
    }

    #[test]
    fn oversized_history_rejected_before_allocating() {
        assert!(matches!(
            CircularSampleBuffer::with_min_frequency(1e-30, 48_000.0),
            Err(DspError::InvalidParameter { name: "min_frequency", .. })
        ));
        assert!(buffer_len_for(f32::MIN_POSITIVE, f32::MAX).is_err());
        assert!(CircularSampleBuffer::new(MAX_BUFFER_LEN + 1).is_err());
        assert!(CircularSampleBuffer::new(usize::MAX).is_err());
    }

    #[test]
    fn largest_history_still_allowed() {
        assert_eq!(buffer_len_for(0.5, 48_000.0), Ok(96_000));
        let buffer = CircularSampleBuffer::new(MAX_BUFFER_LEN).unwrap();
        assert_eq!(buffer.len(), MAX_BUFFER_LEN);
    }

    #[test]
    fn sized_from_min_frequency() {
        let buffer = CircularSampleBuffer::with_min_frequency(10.0, 48_000.0).unwrap();
        assert_eq!(buffer.len(), 4800);
    }

    #[test]
    fn indices_wrap() {
        let mut buffer = ramp(8);
        buffer.write(10, 99.0);
        assert_eq!(buffer.read(2), 99.0);
        assert_eq!(buffer.read(17), 1.0);
        assert_eq!(buffer.wrap_back(0, 1), 7);
        assert_eq!(buffer.wrap_back(3, 11), 0);
    }

    #[test]
    fn interpolation_between_and_across_the_end() {
        let buffer = ramp(8);
        assert_eq!(buffer.read_interpolated(3.0), 3.0);
        assert_eq!(buffer.read_interpolated(3.5), 3.5);
        // Slot 7 blends with slot 0
        assert_eq!(buffer.read_interpolated(7.5), 3.5);
    }

    #[test]
    fn rms_against_itself_is_zero() {
        let mut buffer = CircularSampleBuffer::new(64).unwrap();
        for i in 0..64 {
            buffer.write(i, (i as f32 * 0.37).sin());
        }
        for window in [0, 1, 8, 32, 64, 500] {
            for p in [0, 5, 63] {
                assert_eq!(buffer.rms_difference(p, p, window), 0.0);
            }
        }
    }

    #[test]
    fn rms_of_constant_offset() {
        let buffer = ramp(16);
        // Positions 10 and 8: walks read 9,8,7,6 and 7,6,5,4
        let rms = buffer.rms_difference(10, 8, 4);
        assert!((rms - 2.0).abs() < 1e-6);
    }

    #[test]
    fn oversized_window_stays_in_bounds() {
        let buffer = ramp(4);
        let rms = buffer.rms_difference(1, 3, 10_000);
        assert!(rms.is_finite());
    }
}
