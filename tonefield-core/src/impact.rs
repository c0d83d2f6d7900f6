//! # Impact Power Calculator
//!
//! Works out how hard and how often to strike once the strike point is known.
//!
//! The energy law is `force = C + sqrt(effective_hz * S * k)`. When a single
//! strike would exceed the machine limit the extra energy is spread over
//! several strikes, each carrying `pure_energy / sqrt(count)` on top of the
//! fixed threshold.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::PhysicsConfig;
use crate::geometry::TonefieldCoordinate;
use crate::hammering::HammeringType;
use crate::target::Dimension;

/// Recommended strike.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactPlan {
    /// Per-strike force, rounded to one decimal place.
    pub force: f64,
    /// Number of strikes, `1..=max_strikes`.
    pub count: u32,
    pub hammering_type: HammeringType,
}

/// Intermediate figures behind an [`ImpactPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactBreakdown {
    pub efficiency: f64,
    pub effective_hz: f64,
    pub pure_energy: f64,
    pub required_force: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct ImpactCalculator {
    config: PhysicsConfig,
}

impl ImpactCalculator {
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Computes the plan for correcting `raw_error` (signed Hz) of `mode` by
    /// striking at `coordinate`.
    pub fn compute_plan(
        &self,
        raw_error: f64,
        coordinate: TonefieldCoordinate,
        mode: Dimension,
    ) -> ImpactPlan {
        let breakdown = self.breakdown(raw_error, coordinate, mode);
        let (force, count) = self.split(&breakdown);
        let hammering_type = self.config.hammering.classify(raw_error);

        let plan = ImpactPlan {
            force: round_within_limit(force, self.config.limit()),
            count,
            hammering_type,
        };
        debug!(
            target: "tonefield::impact",
            mode = %mode,
            raw_error,
            efficiency = breakdown.efficiency,
            required = breakdown.required_force,
            force = plan.force,
            count = plan.count,
            style = %plan.hammering_type,
            "computed impact plan"
        );
        plan
    }

    /// Efficiency, effective error and single-strike force.
    pub fn breakdown(
        &self,
        raw_error: f64,
        coordinate: TonefieldCoordinate,
        mode: Dimension,
    ) -> ImpactBreakdown {
        let efficiency = self.efficiency(coordinate, mode);
        let effective_hz = raw_error.abs() / efficiency;
        let pure_energy =
            (effective_hz * self.config.scaling_s * self.config.stiffness.get(mode)).sqrt();

        ImpactBreakdown {
            efficiency,
            effective_hz,
            pure_energy,
            required_force: self.config.threshold_c + pure_energy,
        }
    }

    /// Fraction of the axis vertex reached by the strike point, on the axis
    /// that moves `mode`. Never below the configured floor.
    pub fn efficiency(&self, coordinate: TonefieldCoordinate, mode: Dimension) -> f64 {
        let ellipse = &self.config.ellipse;
        let ratio = match mode {
            Dimension::Fifth => coordinate.x.abs() / ellipse.radius_x,
            Dimension::Tonic | Dimension::Octave => coordinate.y.abs() / ellipse.radius_y,
        };
        ratio.max(self.config.efficiency_floor)
    }

    /// Applies the safety ceiling, returning the unrounded force and count.
    fn split(&self, breakdown: &ImpactBreakdown) -> (f64, u32) {
        let limit = self.config.limit();
        if breakdown.required_force <= limit {
            return (breakdown.required_force, 1);
        }

        for count in 2..=self.config.max_strikes {
            let force = self.config.threshold_c + breakdown.pure_energy / f64::from(count).sqrt();
            if force <= limit {
                return (force, count);
            }
        }

        // Never exceed the machine: accept under-correction.
        warn!(
            target: "tonefield::impact",
            required = breakdown.required_force,
            limit,
            max_strikes = self.config.max_strikes,
            "strike plan saturated at the safety ceiling"
        );
        (limit, self.config.max_strikes)
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rounds to one decimal, rounding down instead when rounding to nearest
/// would land above `limit`.
fn round_within_limit(value: f64, limit: f64) -> f64 {
    let rounded = round_one_decimal(value);
    if rounded > limit {
        (value * 10.0).floor() / 10.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn calculator() -> ImpactCalculator {
        ImpactCalculator::new(PhysicsConfig::default())
    }

    const RIGHT_VERTEX: TonefieldCoordinate = TonefieldCoordinate { x: 0.6, y: 0.0 };
    const BOTTOM_VERTEX: TonefieldCoordinate = TonefieldCoordinate { x: 0.0, y: -0.85 };

    #[test]
    fn fifth_strike_splits_into_two() {
        let calc = calculator();
        let breakdown = calc.breakdown(17.7, RIGHT_VERTEX, Dimension::Fifth);
        assert_eq!(breakdown.efficiency, 1.0);
        assert_abs_diff_eq!(breakdown.effective_hz, 17.7);
        assert_abs_diff_eq!(breakdown.pure_energy, 637.2_f64.sqrt(), epsilon = 1e-9);
        assert!(breakdown.required_force > 42.0);

        let plan = calc.compute_plan(17.7, RIGHT_VERTEX, Dimension::Fifth);
        assert_eq!(plan.force, 37.8);
        assert_eq!(plan.count, 2);
        assert_eq!(plan.hammering_type, HammeringType::Press);
    }

    #[test]
    fn small_error_is_a_single_strike() {
        // sqrt(2 * 30 * 1.0) = 7.746 -> 27.7
        let plan = calculator().compute_plan(-2.0, BOTTOM_VERTEX, Dimension::Tonic);
        assert_eq!(plan.count, 1);
        assert_eq!(plan.force, 27.7);
        assert_eq!(plan.hammering_type, HammeringType::Pull);
    }

    #[test]
    fn orthogonal_strike_uses_the_efficiency_floor() {
        let calc = calculator();
        assert_eq!(calc.efficiency(RIGHT_VERTEX, Dimension::Tonic), 0.1);
        assert_eq!(calc.efficiency(BOTTOM_VERTEX, Dimension::Fifth), 0.1);
        assert_abs_diff_eq!(calc.efficiency(BOTTOM_VERTEX, Dimension::Octave), 1.0);

        let breakdown = calc.breakdown(1.0, RIGHT_VERTEX, Dimension::Tonic);
        assert_abs_diff_eq!(breakdown.effective_hz, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_error_is_threshold_force() {
        let plan = calculator().compute_plan(0.0, RIGHT_VERTEX, Dimension::Fifth);
        assert_eq!(plan.force, 20.0);
        assert_eq!(plan.count, 1);
        assert_eq!(plan.hammering_type, HammeringType::Snap);
    }

    #[test]
    fn huge_error_saturates_at_the_ceiling() {
        let plan = calculator().compute_plan(-1.0e6, BOTTOM_VERTEX, Dimension::Tonic);
        assert_eq!(plan.force, 42.0);
        assert_eq!(plan.count, 10);
        assert_eq!(plan.hammering_type, HammeringType::Press);
    }

    #[test]
    fn low_limit_exercises_the_split_loop() {
        let mut config = PhysicsConfig::default();
        config.safety_ratio = 1.5; // limit 30
        let calc = ImpactCalculator::new(config);

        // pure = sqrt(8 * 30 * 1.0) = 15.49; n = 2 gives 30.95, n = 3 gives 28.94
        let plan = calc.compute_plan(8.0, TonefieldCoordinate { x: 0.0, y: 0.85 }, Dimension::Tonic);
        assert_eq!(plan.count, 3);
        assert_eq!(plan.force, 28.9);
    }

    #[test]
    fn count_stays_within_the_cap() {
        let mut config = PhysicsConfig::default();
        config.max_strikes = 4;
        let calc = ImpactCalculator::new(config);
        let plan = calc.compute_plan(500.0, RIGHT_VERTEX, Dimension::Fifth);
        assert_eq!(plan.count, 4);
        assert_eq!(plan.force, 42.0);
    }

    #[test]
    fn off_grid_limit_is_never_rounded_past() {
        let mut config = PhysicsConfig::default();
        config.safety_ratio = 2.1234; // limit 42.468
        let calc = ImpactCalculator::new(config);

        let plan = calc.compute_plan(-1.0e6, BOTTOM_VERTEX, Dimension::Tonic);
        assert_eq!(plan.count, 10);
        assert_eq!(plan.force, 42.4);
        assert!(plan.force <= config.limit());
    }

    #[test]
    fn rounding_is_to_one_decimal() {
        assert_eq!(round_within_limit(42.468, 42.468), 42.4);
        assert_eq!(round_within_limit(37.849, 42.0), 37.8);
        assert_eq!(round_one_decimal(37.849), 37.8);
        assert_eq!(round_one_decimal(37.85000001), 37.9);
        assert_eq!(round_one_decimal(20.0), 20.0);
    }
}
