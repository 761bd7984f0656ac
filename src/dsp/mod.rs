//! Low-level DSP primitives used by the graph nodes.
//!
//! These components allocate only at construction and are realtime-safe
//! afterwards, so they can be driven straight from an audio callback.

/// Fixed-size sample ring with wrapping reads, writes and window comparison.
pub mod circular_buffer;
/// Half-speed playback with phase-locked catch-up skips.
pub mod octaver;

pub use circular_buffer::{buffer_len_for, CircularSampleBuffer, MAX_BUFFER_LEN};
pub use octaver::{OctaverParams, PitchSyncOctaveShifter, HYSTERESIS_LENGTH};
