//! # Hammering Style
//!
//! Classifies the strike technique from the direction and size of the raw
//! error alone. The computed force plays no part in it.
//!
//! | location | magnitude | style |
//! |---|---|---|
//! | internal | `<= 1.0` | SNAP |
//! | internal | `(1.0, 10.0)` | PULL |
//! | internal | `>= 10.0` | PRESS |
//! | external | `<= 5.0` | SNAP |
//! | external | `> 5.0` | PRESS |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{EXTERNAL_SNAP_MAX, INTERNAL_PRESS_MIN, INTERNAL_SNAP_MAX};
use crate::error::{Result, TonefieldError};

/// Qualitative strike technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HammeringType {
    Snap,
    Pull,
    Press,
}

impl fmt::Display for HammeringType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            HammeringType::Snap => "SNAP",
            HammeringType::Pull => "PULL",
            HammeringType::Press => "PRESS",
        })
    }
}

/// Which face of the tonefield is struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrikeLocation {
    /// Raises a flat pitch.
    Internal,
    /// Lowers a sharp pitch.
    External,
}

impl StrikeLocation {
    /// Negative errors are struck from inside, everything else from outside.
    pub fn from_raw(raw_error: f64) -> Self {
        if raw_error < 0.0 {
            StrikeLocation::Internal
        } else {
            StrikeLocation::External
        }
    }
}

impl fmt::Display for StrikeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            StrikeLocation::Internal => "internal",
            StrikeLocation::External => "external",
        })
    }
}

impl std::str::FromStr for StrikeLocation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "internal" | "in" => Ok(StrikeLocation::Internal),
            "external" | "ex" | "out" => Ok(StrikeLocation::External),
            other => Err(format!("expected `internal` or `external`, got `{other}`")),
        }
    }
}

/// Magnitude bands (Hz) separating the styles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HammeringThresholds {
    pub internal_snap_max: f64,
    pub internal_press_min: f64,
    pub external_snap_max: f64,
}

impl Default for HammeringThresholds {
    fn default() -> Self {
        Self {
            internal_snap_max: INTERNAL_SNAP_MAX,
            internal_press_min: INTERNAL_PRESS_MIN,
            external_snap_max: EXTERNAL_SNAP_MAX,
        }
    }
}

impl HammeringThresholds {
    pub fn validate(&self) -> Result<()> {
        let values = [
            self.internal_snap_max,
            self.internal_press_min,
            self.external_snap_max,
        ];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(TonefieldError::InvalidConfig(
                "hammering thresholds must be finite and >= 0".into(),
            ));
        }
        if self.internal_snap_max >= self.internal_press_min {
            return Err(TonefieldError::InvalidConfig(
                "internal snap threshold must be below the press threshold".into(),
            ));
        }
        Ok(())
    }

    pub fn classify(&self, raw_error: f64) -> HammeringType {
        let magnitude = raw_error.abs();
        match StrikeLocation::from_raw(raw_error) {
            StrikeLocation::Internal => {
                if magnitude <= self.internal_snap_max {
                    HammeringType::Snap
                } else if magnitude < self.internal_press_min {
                    HammeringType::Pull
                } else {
                    HammeringType::Press
                }
            }
            // No PULL for external strikes.
            StrikeLocation::External => {
                if magnitude <= self.external_snap_max {
                    HammeringType::Snap
                } else {
                    HammeringType::Press
                }
            }
        }
    }
}
