pub mod config;
pub mod control; // Control-surface messages for the audio thread
pub mod dsp;
pub mod error;
pub mod graph; // Block-rendering wrappers around the dsp primitives
pub mod string; // Mass-spring string model and its renderer

pub use config::{OctaverConfig, StringConfig};
pub use error::{DspError, Result};

pub const MAX_BLOCK_SIZE: usize = 2048;
