//! # Hit Point Records
//!
//! A record is what the technician confirms after a strike: the reading, what
//! the model recommended, and what was actually done. Records are created
//! once, never edited, and deleted by id. Storing them is the caller's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::StrikeAnalysis;
use crate::error::{Result, TonefieldError};
use crate::hammering::{HammeringType, StrikeLocation};
use crate::note;
use crate::target::Dimension;

/// User-entered part of a record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitPointEntry {
    /// Defaults to the side implied by the primary error's sign.
    pub location: Option<StrikeLocation>,
    pub intent: String,
    pub note: Option<String>,
    /// Defaults to the recommended count.
    pub hit_count: Option<u32>,
    /// Defaults to the recommended force.
    pub strength: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitPointRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,

    pub tonic: f64,
    pub octave: f64,
    pub fifth: f64,

    pub primary_target: Dimension,
    pub auxiliary_target: Option<Dimension>,
    pub is_compound: bool,

    pub coordinate_x: f64,
    pub coordinate_y: f64,

    pub recommended_force: f64,
    pub recommended_count: u32,
    pub hammering_type: HammeringType,

    pub location: StrikeLocation,
    pub intent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub hit_count: u32,
    pub strength: f64,
}

impl HitPointRecord {
    /// Builds a record from an analysis and the technician's confirmation.
    pub fn new(analysis: &StrikeAnalysis, entry: HitPointEntry) -> Result<Self> {
        let hit_count = entry.hit_count.unwrap_or(analysis.plan.count);
        if hit_count < 1 {
            return Err(TonefieldError::InvalidRecord("hit count must be at least 1".into()));
        }
        let strength = entry.strength.unwrap_or(analysis.plan.force);
        if !(strength.is_finite() && strength > 0.0) {
            return Err(TonefieldError::InvalidRecord("strength must be a positive number".into()));
        }
        let note = entry.note.as_deref().map(note::canonical_name).transpose()?;
        let location = entry
            .location
            .unwrap_or_else(|| StrikeLocation::from_raw(analysis.primary_error()));

        let target = analysis.resolution.target;
        let coordinate = analysis.resolution.coordinate;

        Ok(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            tonic: analysis.error.tonic,
            octave: analysis.error.octave,
            fifth: analysis.error.fifth,
            primary_target: target.primary,
            auxiliary_target: target.auxiliary,
            is_compound: target.is_compound,
            coordinate_x: coordinate.x,
            coordinate_y: coordinate.y,
            recommended_force: analysis.plan.force,
            recommended_count: analysis.plan.count,
            hammering_type: analysis.plan.hammering_type,
            location,
            intent: entry.intent.trim().to_string(),
            note,
            hit_count,
            strength,
        })
    }

    /// True when the technician deviated from the recommended plan.
    pub fn was_adjusted(&self) -> bool {
        self.hit_count != self.recommended_count || self.strength != self.recommended_force
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Tonefield;
    use crate::reading::TuningError;
    use crate::resolver::{FixedSide, Side};

    fn analysis(tonic: f64, octave: f64, fifth: f64) -> StrikeAnalysis {
        Tonefield::default()
            .analyze(&TuningError::new(tonic, octave, fifth), &mut FixedSide(Side::Positive))
            .unwrap()
    }

    #[test]
    fn defaults_come_from_the_plan() {
        let analysis = analysis(0.0, 0.0, 17.7);
        let record = HitPointRecord::new(
            &analysis,
            HitPointEntry {
                intent: "  lower the fifth ".into(),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(record.primary_target, Dimension::Fifth);
        assert_eq!(record.location, StrikeLocation::External);
        assert_eq!(record.hit_count, 2);
        assert_eq!(record.strength, 37.8);
        assert_eq!(record.intent, "lower the fifth");
        assert!(!record.was_adjusted());
    }

    #[test]
    fn user_values_override_the_plan() {
        let analysis = analysis(-3.0, 0.0, 0.0);
        let record = HitPointRecord::new(
            &analysis,
            HitPointEntry {
                location: Some(StrikeLocation::External),
                intent: "test".into(),
                note: Some("Bb3".into()),
                hit_count: Some(3),
                strength: Some(25.0),
            },
        )
        .unwrap();

        assert_eq!(record.location, StrikeLocation::External);
        assert_eq!(record.note.as_deref(), Some("A#3"));
        assert_eq!(record.hit_count, 3);
        assert!(record.was_adjusted());
    }

    #[test]
    fn invalid_entries_are_rejected() {
        let analysis = analysis(-3.0, 0.0, 0.0);
        let zero_hits = HitPointEntry {
            hit_count: Some(0),
            ..Default::default()
        };
        assert!(HitPointRecord::new(&analysis, zero_hits).is_err());

        let bad_note = HitPointEntry {
            note: Some("X9".into()),
            ..Default::default()
        };
        assert!(matches!(
            HitPointRecord::new(&analysis, bad_note),
            Err(TonefieldError::UnknownNote(_))
        ));

        let nan_strength = HitPointEntry {
            strength: Some(f64::NAN),
            ..Default::default()
        };
        assert!(HitPointRecord::new(&analysis, nan_strength).is_err());

        for strength in [0.0, -5.0] {
            let entry = HitPointEntry {
                strength: Some(strength),
                ..Default::default()
            };
            assert!(matches!(
                HitPointRecord::new(&analysis, entry),
                Err(TonefieldError::InvalidRecord(_))
            ));
        }
    }

    #[test]
    fn json_round_trip_keeps_ids() {
        let record = HitPointRecord::new(&analysis(1.0, 0.0, 0.0), HitPointEntry::default()).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"primary_target\":\"tonic\""));
        let back: HitPointRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, record.id);
        assert_eq!(back.created_at, record.created_at);
        assert_eq!(back.hammering_type, record.hammering_type);
        assert_eq!(back.note, None);
    }
}
