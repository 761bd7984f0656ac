//! Shared state types for UI communication
//!
//! Designed for real-time safety: static data is built once before the
//! stream starts, dynamic updates are allocation-free.

/// Static state known before the audio stream starts (can allocate)
#[derive(Clone)]
pub struct UiStateInit {
    /// Audio sample rate in Hz
    pub sample_rate: f32,
    /// History length of the shifter in samples
    pub buffer_len: usize,
    /// Input device name
    pub input_name: String,
    /// Output device name
    pub output_name: String,
}

/// Dynamic state update sent from the audio thread (allocation-free, Copy)
#[derive(Clone, Copy, Debug, Default)]
pub struct UiStateUpdate {
    /// Phase-lock skips since start or last reset
    pub skip_count: u64,
    /// Samples processed since start or last reset
    pub samples_processed: u64,
    /// Current comparison window in samples
    pub window: usize,
    /// Current skip threshold
    pub threshold: f32,
    /// Input samples the output callback had to replace with silence
    pub underruns: u64,
    /// Output stream time in seconds
    pub stream_time: f64,
}

impl UiStateUpdate {
    /// Average skips per second of processed audio
    pub fn skip_rate(&self, sample_rate: f32) -> f64 {
        if self.samples_processed == 0 {
            return 0.0;
        }
        self.skip_count as f64 * sample_rate as f64 / self.samples_processed as f64
    }
}
