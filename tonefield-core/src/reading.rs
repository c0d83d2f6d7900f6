//! # Tuning Error Readings
//!
//! The transient input to every computation: three signed deviations in Hz
//! measured on a single note.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TonefieldError};
use crate::target::Dimension;

/// Signed tuning errors in Hz for the tonic, octave and fifth partials.
///
/// Positive values are too high and need lowering with an external strike,
/// negative values are too low and need raising with an internal strike,
/// zero is in tune.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TuningError {
    pub tonic: f64,
    pub octave: f64,
    pub fifth: f64,
}

impl TuningError {
    /// Creates a reading without validation.
    pub fn new(tonic: f64, octave: f64, fifth: f64) -> Self {
        Self {
            tonic,
            octave,
            fifth,
        }
    }

    /// Creates a reading, rejecting NaN and infinite values.
    pub fn try_new(tonic: f64, octave: f64, fifth: f64) -> Result<Self> {
        let reading = Self::new(tonic, octave, fifth);
        for dimension in Dimension::ALL {
            let value = reading.value(dimension);
            if !value.is_finite() {
                return Err(TonefieldError::NonFiniteReading { dimension, value });
            }
        }
        Ok(reading)
    }

    /// The raw signed reading for one dimension.
    pub fn value(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Tonic => self.tonic,
            Dimension::Octave => self.octave,
            Dimension::Fifth => self.fifth,
        }
    }

    /// True when every reading is exactly zero; there is nothing to strike.
    pub fn is_in_tune(&self) -> bool {
        self.tonic == 0.0 && self.octave == 0.0 && self.fifth == 0.0
    }
}
