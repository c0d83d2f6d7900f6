//! # Configuration
//!
//! [`PhysicsConfig`] is the immutable constant table captured by the resolver
//! and the impact calculator when they are built. [`TonefieldConfig`] is what
//! lives on disk: the physics table plus optional per-note tonefield
//! geometries.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{Result, TonefieldError};
use crate::geometry::Ellipse;
use crate::hammering::HammeringThresholds;
use crate::note;
use crate::target::Dimension;

/// One value per tuning dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisTable {
    pub tonic: f64,
    pub octave: f64,
    pub fifth: f64,
}

impl AxisTable {
    pub const TARGET_WEIGHTS: AxisTable = AxisTable {
        tonic: TARGET_WEIGHT_TONIC,
        octave: TARGET_WEIGHT_OCTAVE,
        fifth: TARGET_WEIGHT_FIFTH,
    };

    pub const FORCE_WEIGHTS: AxisTable = AxisTable {
        tonic: FORCE_WEIGHT_TONIC,
        octave: FORCE_WEIGHT_OCTAVE,
        fifth: FORCE_WEIGHT_FIFTH,
    };

    pub const STIFFNESS: AxisTable = AxisTable {
        tonic: STIFFNESS_TONIC,
        octave: STIFFNESS_OCTAVE,
        fifth: STIFFNESS_FIFTH,
    };

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Tonic => self.tonic,
            Dimension::Octave => self.octave,
            Dimension::Fifth => self.fifth,
        }
    }

    fn all_positive(&self) -> bool {
        Dimension::ALL
            .iter()
            .all(|d| self.get(*d).is_finite() && self.get(*d) > 0.0)
    }
}

/// Calibration of the strike model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub threshold_c: f64,
    pub scaling_s: f64,
    pub safety_ratio: f64,
    pub stiffness: AxisTable,
    pub target_weights: AxisTable,
    pub force_weights: AxisTable,
    pub efficiency_floor: f64,
    pub max_strikes: u32,
    pub hammering: HammeringThresholds,
    pub ellipse: Ellipse,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            threshold_c: THRESHOLD_C,
            scaling_s: SCALING_S,
            safety_ratio: SAFETY_RATIO,
            stiffness: AxisTable::STIFFNESS,
            target_weights: AxisTable::TARGET_WEIGHTS,
            force_weights: AxisTable::FORCE_WEIGHTS,
            efficiency_floor: EFFICIENCY_FLOOR,
            max_strikes: MAX_STRIKES,
            hammering: HammeringThresholds::default(),
            ellipse: Ellipse::default(),
        }
    }
}

impl PhysicsConfig {
    /// Machine safety ceiling: no single strike may exceed this force.
    pub fn limit(&self) -> f64 {
        self.threshold_c * self.safety_ratio
    }

    /// Returns a copy using a different tonefield ellipse.
    pub fn with_ellipse(mut self, ellipse: Ellipse) -> Self {
        self.ellipse = ellipse;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| -> Result<()> { Err(TonefieldError::InvalidConfig(msg.to_string())) };

        if !(self.threshold_c.is_finite() && self.threshold_c > 0.0) {
            return invalid("threshold_c must be > 0");
        }
        if !(self.scaling_s.is_finite() && self.scaling_s > 0.0) {
            return invalid("scaling_s must be > 0");
        }
        if !(self.safety_ratio.is_finite() && self.safety_ratio > 1.0) {
            return invalid("safety_ratio must be > 1");
        }
        if !self.stiffness.all_positive() {
            return invalid("stiffness values must be > 0");
        }
        if !self.target_weights.all_positive() {
            return invalid("target weights must be > 0");
        }
        if !self.force_weights.all_positive() {
            return invalid("force weights must be > 0");
        }
        if !(self.efficiency_floor > 0.0 && self.efficiency_floor <= 1.0) {
            return invalid("efficiency_floor must be in (0, 1]");
        }
        if !(1..=MAX_STRIKES).contains(&self.max_strikes) {
            return invalid("max_strikes must be in 1..=10");
        }
        self.hammering.validate()?;
        self.ellipse.validate()
    }
}

/// On-disk configuration: physics constants plus per-note geometry overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TonefieldConfig {
    pub physics: PhysicsConfig,
    /// Tonefield ellipse per note name (e.g. `"A4"`). Notes without an entry
    /// use `physics.ellipse`.
    pub note_geometries: BTreeMap<String, Ellipse>,
}

impl TonefieldConfig {
    /// Reads a JSON configuration file and validates it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| TonefieldError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&data)?;
        tracing::debug!(
            target: "tonefield::config",
            path = %path.display(),
            notes = config.note_geometries.len(),
            "loaded tonefield configuration"
        );
        Ok(config)
    }

    /// Parses and validates a JSON configuration. Note keys are canonicalised
    /// (`Bb2` becomes `A#2`).
    pub fn from_json(data: &str) -> Result<Self> {
        let raw: TonefieldConfig = serde_json::from_str(data)?;
        let mut note_geometries = BTreeMap::new();
        for (name, ellipse) in raw.note_geometries {
            let canonical = note::canonical_name(&name).map_err(|_| {
                TonefieldError::InvalidConfig(format!("unknown note key `{name}` in note_geometries"))
            })?;
            ellipse.validate()?;
            note_geometries.insert(canonical, ellipse);
        }
        let config = Self {
            physics: raw.physics,
            note_geometries,
        };
        config.physics.validate()?;
        Ok(config)
    }

    /// Physics for a specific note, falling back to the default ellipse when
    /// the note is absent, unknown or has no geometry of its own.
    pub fn physics_for_note(&self, note_name: Option<&str>) -> PhysicsConfig {
        let Some(name) = note_name else {
            return self.physics;
        };
        match note::canonical_name(name) {
            Ok(canonical) => match self.note_geometries.get(&canonical) {
                Some(ellipse) => self.physics.with_ellipse(*ellipse),
                None => self.physics,
            },
            Err(_) => {
                tracing::debug!(target: "tonefield::config", note = name, "unknown note, using default geometry");
                self.physics
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_calibration_table() {
        let config = PhysicsConfig::default();
        assert_eq!(config.threshold_c, 20.0);
        assert_eq!(config.scaling_s, 30.0);
        assert_eq!(config.limit(), 42.0);
        assert_eq!(config.stiffness.get(Dimension::Octave), 0.9);
        assert_eq!(config.target_weights.get(Dimension::Tonic), 6.0);
        assert_eq!(config.force_weights.get(Dimension::Fifth), 3.0);
        assert_eq!(config.ellipse.radius_x, 0.6);
        assert_eq!(config.ellipse.radius_y, 0.85);
        assert_eq!(config.max_strikes, 10);
        config.validate().unwrap();
    }

    #[test]
    fn validate_rejects_broken_values() {
        let mut config = PhysicsConfig::default();
        config.safety_ratio = 1.0;
        assert!(config.validate().is_err());

        let mut config = PhysicsConfig::default();
        config.force_weights.octave = 0.0;
        assert!(config.validate().is_err());

        let mut config = PhysicsConfig::default();
        config.efficiency_floor = 0.0;
        assert!(config.validate().is_err());

        let mut config = PhysicsConfig::default();
        config.max_strikes = 0;
        assert!(config.validate().is_err());

        let mut config = PhysicsConfig::default();
        config.max_strikes = MAX_STRIKES + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn strike_cap_above_ten_is_rejected_from_json() {
        let err = TonefieldConfig::from_json(r#"{ "physics": { "max_strikes": 500 } }"#).unwrap_err();
        assert!(matches!(err, TonefieldError::InvalidConfig(_)));
        assert!(TonefieldConfig::from_json(r#"{ "physics": { "max_strikes": 4 } }"#).is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = TonefieldConfig::from_json(r#"{ "physics": { "safety_ratio": 1.5 } }"#).unwrap();
        assert_eq!(config.physics.limit(), 30.0);
        assert_eq!(config.physics.scaling_s, 30.0);
        assert!(config.note_geometries.is_empty());
    }

    #[test]
    fn note_geometry_overrides_the_ellipse() {
        let config = TonefieldConfig::from_json(
            r#"{ "note_geometries": { "Bb3": { "radius_x": 0.5, "radius_y": 0.9 } } }"#,
        )
        .unwrap();

        let physics = config.physics_for_note(Some("A#3"));
        assert_eq!(physics.ellipse, Ellipse::new(0.5, 0.9));

        assert_eq!(config.physics_for_note(Some("C4")).ellipse, Ellipse::default());
        assert_eq!(config.physics_for_note(Some("H9")).ellipse, Ellipse::default());
        assert_eq!(config.physics_for_note(None).ellipse, Ellipse::default());
    }

    #[test]
    fn unknown_note_key_is_rejected() {
        let err = TonefieldConfig::from_json(
            r#"{ "note_geometries": { "Q4": { "radius_x": 0.5, "radius_y": 0.9 } } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, TonefieldError::InvalidConfig(_)));
    }

    #[test]
    fn load_reports_missing_file_and_reads_real_one() {
        let err = TonefieldConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TonefieldError::ConfigIo { .. }));

        let path = std::env::temp_dir().join(format!("tonefield-config-{}.json", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{ "physics": {{ "threshold_c": 10.0 }} }}"#).unwrap();
        drop(file);

        let config = TonefieldConfig::load(&path).unwrap();
        assert_eq!(config.physics.limit(), 21.0);
        fs::remove_file(&path).unwrap();
    }
}
