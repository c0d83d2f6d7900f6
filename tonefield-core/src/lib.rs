// tonefield-core/src/lib.rs

//! The core logic for the tonefield strike planner.
//! This crate turns a tonic/octave/fifth tuning error reading into a strike
//! point on the tonefield and a hammer plan that stays inside the machine's
//! safety limit. It is completely headless, does no I/O beyond loading a
//! configuration file, and contains no front-end code.

pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod hammering;
pub mod impact;
pub mod note;
pub mod pipeline;
pub mod reading;
pub mod record;
pub mod resolver;
pub mod target;

use serde::{Deserialize, Serialize};

pub use config::{PhysicsConfig, TonefieldConfig};
pub use error::{Result, TonefieldError};
pub use hammering::{HammeringType, StrikeLocation};
pub use impact::ImpactPlan;
pub use pipeline::Tonefield;
pub use reading::TuningError;
pub use resolver::{FixedSide, Resolution, Side, SideSource};
pub use target::Dimension;

/// Represents the result of analysing a single reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrikeAnalysis {
    /// The reading that was analysed.
    pub error: TuningError,
    /// Primary/auxiliary targets, force vector and strike coordinate.
    pub resolution: Resolution,
    /// Recommended force, strike count and hammering style.
    pub plan: ImpactPlan,
}

impl StrikeAnalysis {
    /// Signed error of the primary target, the value the plan corrects.
    pub fn primary_error(&self) -> f64 {
        self.error.value(self.resolution.target.primary)
    }
}
