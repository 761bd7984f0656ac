//! Error types shared by the string model and the octave shifter.

use thiserror::Error;

/// Errors raised while building a processor.
///
/// Only construction can fail. Once a `UniformString` or a
/// `PitchSyncOctaveShifter` exists, stepping and sample processing never
/// return an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DspError {
    /// A physical or buffer parameter is non-positive, non-finite, or out of range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, DspError>;

impl DspError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        DspError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Reject values that are not strictly positive and finite.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DspError::invalid(
            name,
            format!("expected a finite value > 0, got {value}"),
        ))
    }
}
