//! Construction parameters for the two processors.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::circular_buffer::buffer_len_for,
    error::{ensure_positive, DspError, Result},
};

/// Physical description of a fixed-fixed string.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StringConfig {
    /// Number of point masses, including the two clamped end nodes (>= 3)
    pub segment_count: usize,

    /// Total string length in meters
    pub length: f64,

    /// Linear density in kg/m
    pub mass_per_unit_length: f64,

    /// Spring constant used for stretch beyond rest length
    pub stiffness: f64,

    /// Target fundamental in Hz; only used to derive tension
    pub frequency: f64,
}

impl Default for StringConfig {
    fn default() -> Self {
        Self {
            segment_count: 64,
            length: 0.65,
            mass_per_unit_length: 0.001,
            stiffness: 1000.0,
            frequency: 110.0,
        }
    }
}

impl StringConfig {
    pub fn validate(&self) -> Result<()> {
        if self.segment_count < 3 {
            return Err(DspError::invalid(
                "segment_count",
                format!("need at least 3 segments, got {}", self.segment_count),
            ));
        }
        ensure_positive("length", self.length)?;
        ensure_positive("mass_per_unit_length", self.mass_per_unit_length)?;
        ensure_positive("stiffness", self.stiffness)?;
        ensure_positive("frequency", self.frequency)?;
        Ok(())
    }

    /// Tension of an ideal string with this length, density and fundamental.
    ///
    /// f = (1 / 2L) * sqrt(T / mu)  =>  T = (2 L f)^2 * mu
    pub fn tension(&self) -> f64 {
        let wave_speed = 2.0 * self.length * self.frequency;
        wave_speed * wave_speed * self.mass_per_unit_length
    }
}

/// Sizing and initial k-rate parameters for the octave shifter.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctaverConfig {
    /// Audio sample rate in Hz (default: 48000.0)
    pub sample_rate: f32,

    /// Lowest input frequency the history buffer must hold one period of (default: 10.0 Hz)
    pub min_frequency: f32,

    /// Trailing samples compared when looking for a phase match (default: 32)
    pub comparison_window_length: usize,

    /// Largest RMS difference accepted as a phase match (default: 0.005)
    pub skip_threshold: f32,
}

impl Default for OctaverConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            min_frequency: 10.0,
            comparison_window_length: 32,
            skip_threshold: 0.005,
        }
    }
}

impl OctaverConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("sample_rate", self.sample_rate as f64)?;
        ensure_positive("min_frequency", self.min_frequency as f64)?;
        if !self.skip_threshold.is_finite() {
            return Err(DspError::invalid(
                "skip_threshold",
                format!("expected a finite value, got {}", self.skip_threshold),
            ));
        }
        let len = self.buffer_len()?;
        if len < 2 {
            return Err(DspError::invalid(
                "min_frequency",
                format!(
                    "{} Hz at {} Hz sample rate leaves a {}-sample buffer",
                    self.min_frequency, self.sample_rate, len
                ),
            ));
        }
        Ok(())
    }

    /// History length needed to hold one period of `min_frequency`.
    ///
    /// Fails when the rates are not positive or the history would exceed
    /// [`MAX_BUFFER_LEN`](crate::dsp::MAX_BUFFER_LEN).
    pub fn buffer_len(&self) -> Result<usize> {
        buffer_len_for(self.min_frequency, self.sample_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::MAX_BUFFER_LEN;

    #[test]
    fn default_configs_are_valid() {
        assert!(StringConfig::default().validate().is_ok());
        assert!(OctaverConfig::default().validate().is_ok());
    }

    #[test]
    fn tension_follows_fundamental() {
        let config = StringConfig {
            segment_count: 5,
            length: 0.5,
            mass_per_unit_length: 0.001,
            stiffness: 1000.0,
            frequency: 100.0,
        };
        // (2 * 0.5 * 100)^2 * 0.001
        assert!((config.tension() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn too_few_segments_rejected() {
        let config = StringConfig {
            segment_count: 2,
            ..StringConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DspError::InvalidParameter { name: "segment_count", .. })
        ));
    }

    #[test]
    fn buffer_len_from_min_frequency() {
        let config = OctaverConfig::default();
        assert_eq!(config.buffer_len(), Ok(4800));

        let low = OctaverConfig {
            min_frequency: 0.5,
            ..OctaverConfig::default()
        };
        assert_eq!(low.buffer_len(), Ok(96_000));
    }

    #[test]
    fn tiny_buffer_rejected() {
        let config = OctaverConfig {
            sample_rate: 100.0,
            min_frequency: 100.0,
            ..OctaverConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_buffer_rejected() {
        let config = OctaverConfig {
            min_frequency: 1e-30,
            ..OctaverConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DspError::InvalidParameter { name: "min_frequency", .. })
        ));

        let just_over = OctaverConfig {
            sample_rate: 48_000.0,
            min_frequency: 48_000.0 / (MAX_BUFFER_LEN as f32 + 16.0),
            ..OctaverConfig::default()
        };
        assert!(just_over.validate().is_err());
    }
}
