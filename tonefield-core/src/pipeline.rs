//! # Strike Pipeline
//!
//! Runs the resolver and the impact calculator back to back. Both capture the
//! same [`PhysicsConfig`] so the coordinate and the efficiency are measured on
//! the same ellipse.

use crate::StrikeAnalysis;
use crate::config::PhysicsConfig;
use crate::error::Result;
use crate::impact::ImpactCalculator;
use crate::reading::TuningError;
use crate::resolver::{SideSource, TargetResolver};

#[derive(Debug, Clone, Copy)]
pub struct Tonefield {
    resolver: TargetResolver,
    calculator: ImpactCalculator,
}

impl Default for Tonefield {
    fn default() -> Self {
        Self::with_config(PhysicsConfig::default())
    }
}

impl Tonefield {
    /// Validates `config` and builds both components from it.
    pub fn new(config: PhysicsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: PhysicsConfig) -> Self {
        Self {
            resolver: TargetResolver::new(config),
            calculator: ImpactCalculator::new(config),
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        self.resolver.config()
    }

    pub fn calculator(&self) -> &ImpactCalculator {
        &self.calculator
    }

    /// Full analysis of one reading. `None` means nothing needs correcting.
    pub fn analyze<S>(&self, error: &TuningError, sides: &mut S) -> Option<StrikeAnalysis>
    where
        S: SideSource + ?Sized,
    {
        let resolution = self.resolver.resolve(error, sides)?;
        let primary = resolution.target.primary;
        let plan = self
            .calculator
            .compute_plan(error.value(primary), resolution.coordinate, primary);

        Some(StrikeAnalysis {
            error: *error,
            resolution,
            plan,
        })
    }
}
