use tracing::debug;

use crate::{config::OctaverConfig, dsp::circular_buffer::CircularSampleBuffer, error::Result};

/*
Pitch-Synchronous Octave Shifter
================================

Dropping a signal by one octave in the time domain is easy in principle:
play the recording back at half speed. The catch is that a half-speed
reader falls further and further behind the live input. This shifter keeps
one ring buffer, writes the input at full speed and reads it at half speed,
and every so often lets the reader jump forward to catch up.

Vocabulary
----------

  record head   Integer slot that receives the next input sample.
                Moves +1 per sample.

  play head     Fractional slot the output is read from.
                Moves +0.5 per sample (half speed = one octave down).

  lag           How far the play head trails the record head.
                Grows by half a sample every sample.

  skip          Snapping the play head onto the record head. Lag drops to 0.

  hysteresis    Samples left before another skip is allowed.


Where To Jump
-------------

A jump is inaudible only if the audio just behind the play head looks like
the audio just behind the record head, i.e. the lag is close to a whole
number of input periods. The shifter checks this by comparing the two
trailing windows:

    buffer:  ... [ w samples ] P ............ [ w samples ] R ...
                      |                            |
                      +-------- pairwise diff -----+

    rms = sqrt( sum((buf[R-k] - buf[P-k])^2) / w ),  k = 1..=w

When rms drops below the skip threshold the play head jumps to R. For a
periodic input this happens once the lag reaches one period, so the output
repeats each period twice as slowly: half the frequency.

Right after a jump the lag is zero and the windows trivially match, so a
fixed hysteresis of HYSTERESIS_LENGTH samples suppresses the check.


Per-Sample Order
----------------

    1. buf[R] = x;          R = (R + 1) mod len
    2. y = lerp(buf, P);    P = (P + 0.5) mod len
    3. hysteresis > 0  ->  hysteresis -= 1
       otherwise       ->  if rms(R, P, w) < threshold: P = R, hysteresis = 48
    4. return y

The output is fixed in step 2, so a jump only changes the trajectory from
the next sample on.

The check runs on every sample once hysteresis clears; there is no
zero-crossing gate.


Realtime Safety
---------------

No allocation, no locks, no logging. The only loop is the window
comparison, bounded by MAX_COMPARISON_WINDOW.
*/

/// Samples after a skip during which no further skip may trigger.
pub const HYSTERESIS_LENGTH: u32 = 48;

pub const MIN_COMPARISON_WINDOW: usize = 8;
pub const MAX_COMPARISON_WINDOW: usize = 1024;
pub const DEFAULT_COMPARISON_WINDOW: usize = 32;
pub const DEFAULT_SKIP_THRESHOLD: f32 = 0.005;

/// Host-tunable k-rate parameters. Read once at the start of every sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctaverParams {
    comparison_window_length: usize,
    skip_threshold: f32,
}

impl Default for OctaverParams {
    fn default() -> Self {
        Self {
            comparison_window_length: DEFAULT_COMPARISON_WINDOW,
            skip_threshold: DEFAULT_SKIP_THRESHOLD,
        }
    }
}

impl OctaverParams {
    pub fn comparison_window_length(&self) -> usize {
        self.comparison_window_length
    }

    pub fn skip_threshold(&self) -> f32 {
        self.skip_threshold
    }
}

pub struct PitchSyncOctaveShifter {
    buffer: CircularSampleBuffer,
    record_head: usize,
    play_head: f64,
    params: OctaverParams,
    hysteresis_samples_remaining: u32,

    // Statistics
    skip_count: u64,
    samples_processed: u64,
}

impl PitchSyncOctaveShifter {
    /// Shifter over a `buffer_len`-sample history with default parameters.
    pub fn new(buffer_len: usize) -> Result<Self> {
        let buffer = CircularSampleBuffer::new(buffer_len)?;
        debug!(buffer_len, "octave shifter constructed");
        Ok(Self::with_buffer(buffer, OctaverParams::default()))
    }

    pub fn from_config(config: &OctaverConfig) -> Result<Self> {
        config.validate()?;
        let buffer = CircularSampleBuffer::new(config.buffer_len()?)?;

        let mut shifter = Self::with_buffer(buffer, OctaverParams::default());
        shifter.set_comparison_window_length(config.comparison_window_length);
        shifter.set_skip_threshold(config.skip_threshold);

        debug!(
            buffer_len = shifter.buffer_len(),
            window = shifter.params.comparison_window_length,
            threshold = shifter.params.skip_threshold,
            "octave shifter constructed"
        );
        Ok(shifter)
    }

    fn with_buffer(buffer: CircularSampleBuffer, params: OctaverParams) -> Self {
        Self {
            buffer,
            record_head: 0,
            play_head: 0.0,
            params,
            hysteresis_samples_remaining: 0,
            skip_count: 0,
            samples_processed: 0,
        }
    }

    /// Push one input sample, return one output sample an octave down.
    #[inline]
    pub fn process_sample(&mut self, input: f32) -> f32 {
        let params = self.params;
        let len = self.buffer.len();

        self.buffer.write(self.record_head, input);
        self.record_head = (self.record_head + 1) % len;

        let output = self.buffer.read_interpolated(self.play_head);
        self.play_head = (self.play_head + 0.5) % len as f64;

        if self.hysteresis_samples_remaining > 0 {
            self.hysteresis_samples_remaining -= 1;
        } else {
            let diff = self.buffer.rms_difference(
                self.record_head,
                self.play_head as usize,
                params.comparison_window_length,
            );
            if diff < params.skip_threshold {
                self.play_head = self.record_head as f64;
                self.hysteresis_samples_remaining = HYSTERESIS_LENGTH;
                self.skip_count += 1;
            }
        }

        self.samples_processed = self.samples_processed.wrapping_add(1);
        output
    }

    /// Process a block in place.
    pub fn process_block(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    /// RMS difference between the windows trailing two positions.
    pub fn rms_difference(&self, a: usize, b: usize, window: usize) -> f32 {
        self.buffer.rms_difference(a, b, window)
    }

    /// Clamped into [MIN_COMPARISON_WINDOW, MAX_COMPARISON_WINDOW].
    pub fn set_comparison_window_length(&mut self, window: usize) {
        self.params.comparison_window_length =
            window.clamp(MIN_COMPARISON_WINDOW, MAX_COMPARISON_WINDOW);
    }

    /// Clamped into [0, 1]. NaN is ignored.
    pub fn set_skip_threshold(&mut self, threshold: f32) {
        if threshold.is_nan() {
            return;
        }
        self.params.skip_threshold = threshold.clamp(0.0, 1.0);
    }

    pub fn params(&self) -> OctaverParams {
        self.params
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
        self.record_head = 0;
        self.play_head = 0.0;
        self.hysteresis_samples_remaining = 0;
        self.skip_count = 0;
        self.samples_processed = 0;
    }

    pub fn record_head(&self) -> usize {
        self.record_head
    }

    pub fn play_head(&self) -> f64 {
        self.play_head
    }

    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn hysteresis_samples_remaining(&self) -> u32 {
        self.hysteresis_samples_remaining
    }

    /// Number of phase-lock skips since construction or the last reset.
    pub fn skip_count(&self) -> u64 {
        self.skip_count
    }

    pub fn samples_processed(&self) -> u64 {
        self.samples_processed
    }
}
