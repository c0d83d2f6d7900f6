//! # Physics Constants
//!
//! Calibration values for the tonefield strike model. These are the defaults
//! behind [`PhysicsConfig`](crate::config::PhysicsConfig); any of them can be
//! overridden through a configuration file, but the defaults must stay
//! bit-for-bit identical for results to match recorded hit points.

// -- Machine calibration --

/// Minimum force that produces any deformation of the tonefield.
pub const THRESHOLD_C: f64 = 20.0;

/// Hz-to-force sensitivity.
pub const SCALING_S: f64 = 30.0;

/// Safety ceiling as a multiple of [`THRESHOLD_C`] (SUS430 pan, 30 mm hammer).
pub const SAFETY_RATIO: f64 = 2.1;

// -- Structural stiffness per axis --

pub const STIFFNESS_TONIC: f64 = 1.0;
pub const STIFFNESS_OCTAVE: f64 = 0.9; // long axis, flexible
pub const STIFFNESS_FIFTH: f64 = 1.2; // short axis, stiff

// -- Tonefield ellipse --

/// Semi-axis along the fifth (X) direction.
pub const RADIUS_X: f64 = 0.6;

/// Semi-axis along the tonic/octave (Y) direction.
pub const RADIUS_Y: f64 = 0.85;

// -- Weight tables --
//
// The two tables are deliberately distinct: one ranks dimensions, the other
// scales the force vector. Keep them separate.

/// Weights used to rank which dimension is the primary target.
pub const TARGET_WEIGHT_TONIC: f64 = 6.0;
pub const TARGET_WEIGHT_OCTAVE: f64 = 3.0;
pub const TARGET_WEIGHT_FIFTH: f64 = 2.0;

/// Divisors turning an error in Hz into a force-vector component.
pub const FORCE_WEIGHT_TONIC: f64 = 1.0;
pub const FORCE_WEIGHT_OCTAVE: f64 = 2.0;
pub const FORCE_WEIGHT_FIFTH: f64 = 3.0;

// -- Safety split --

/// Lowest directional efficiency ever used; an off-axis strike still couples.
pub const EFFICIENCY_FLOOR: f64 = 0.1;

/// Hard cap on the number of strikes a plan may ask for.
pub const MAX_STRIKES: u32 = 10;

// -- Hammering style thresholds (Hz) --

pub const INTERNAL_SNAP_MAX: f64 = 1.0;
pub const INTERNAL_PRESS_MIN: f64 = 10.0;
pub const EXTERNAL_SNAP_MAX: f64 = 5.0;
