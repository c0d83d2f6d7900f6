//! # Target Selection
//!
//! Decides which tuning dimension a strike is primarily aimed at. Each
//! dimension's error is scaled by its target weight and the strongest score
//! wins. The target weights are not the force weights used to build the
//! strike vector.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::AxisTable;
use crate::reading::TuningError;

/// One of the three tuned partials of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Tonic,
    Octave,
    Fifth,
}

impl Dimension {
    /// Evaluation order. Ties in target selection go to the earlier entry.
    pub const ALL: [Dimension; 3] = [Dimension::Tonic, Dimension::Octave, Dimension::Fifth];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Tonic => "tonic",
            Dimension::Octave => "octave",
            Dimension::Fifth => "fifth",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// `|error| * weight` for one dimension. Only used for ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedScore {
    pub dimension: Dimension,
    pub score: f64,
}

/// Scores every dimension of a reading, in evaluation order.
pub fn weighted_scores(error: &TuningError, weights: &AxisTable) -> [WeightedScore; 3] {
    Dimension::ALL.map(|dimension| WeightedScore {
        dimension,
        score: error.value(dimension).abs() * weights.get(dimension),
    })
}

/// Picks the dimension with the strictly largest weighted score.
///
/// Returns `None` for an all-zero reading.
pub fn select_primary(error: &TuningError, weights: &AxisTable) -> Option<Dimension> {
    if error.is_in_tune() {
        return None;
    }

    let mut best: Option<WeightedScore> = None;
    for candidate in weighted_scores(error, weights) {
        match best {
            Some(current) if candidate.score <= current.score => {}
            _ => best = Some(candidate),
        }
    }
    best.map(|winner| winner.dimension)
}

/// The primary target of a strike and the dimension, if any, that rides along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetResolution {
    pub primary: Dimension,
    pub auxiliary: Option<Dimension>,
    pub is_compound: bool,
}

impl TargetResolution {
    pub fn new(primary: Dimension, auxiliary: Option<Dimension>) -> Self {
        // An auxiliary equal to the primary carries no extra information.
        let auxiliary = auxiliary.filter(|aux| *aux != primary);
        Self {
            primary,
            auxiliary,
            is_compound: auxiliary.is_some(),
        }
    }
}
