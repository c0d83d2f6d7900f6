//! # Target & Vector Resolver
//!
//! Turns a [`TuningError`] into a strike point on the tonefield boundary.
//!
//! 1. Pick the primary dimension by weighted score.
//! 2. Convert each error to a force magnitude with the force weights.
//! 3. Build the force vector, applying cooperation and axis isolation.
//! 4. Project the vector's angle onto the ellipse.
//! 5. Report which other dimension, if any, contributed to the vector.
//!
//! The horizontal side of a fifth component is physically symmetric, so it is
//! drawn from an injected [`SideSource`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PhysicsConfig;
use crate::geometry::{ForceVector, TonefieldCoordinate};
use crate::reading::TuningError;
use crate::target::{Dimension, TargetResolution, select_primary};

/// Horizontal side of the tonefield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Positive,
    Negative,
}

impl Side {
    pub fn sign(&self) -> f64 {
        match self {
            Side::Positive => 1.0,
            Side::Negative => -1.0,
        }
    }
}

/// Source of the uniform left/right choice.
pub trait SideSource {
    fn pick_side(&mut self) -> Side;
}

impl<R: rand::Rng + ?Sized> SideSource for R {
    fn pick_side(&mut self) -> Side {
        if self.gen_bool(0.5) {
            Side::Positive
        } else {
            Side::Negative
        }
    }
}

/// Always answers with the same side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSide(pub Side);

impl SideSource for FixedSide {
    fn pick_side(&mut self) -> Side {
        self.0
    }
}

/// Output of a successful resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub target: TargetResolution,
    pub vector: ForceVector,
    pub coordinate: TonefieldCoordinate,
}

/// Per-dimension force magnitudes, `|error| / force_weight`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisForces {
    tonic: f64,
    octave: f64,
    fifth: f64,
}

/// Resolves readings against a captured [`PhysicsConfig`].
#[derive(Debug, Clone, Copy)]
pub struct TargetResolver {
    config: PhysicsConfig,
}

impl TargetResolver {
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Resolves a reading, or returns `None` when every error is zero.
    pub fn resolve<S>(&self, error: &TuningError, sides: &mut S) -> Option<Resolution>
    where
        S: SideSource + ?Sized,
    {
        let primary = select_primary(error, &self.config.target_weights)?;
        let forces = self.axis_forces(error);

        let vector = match primary {
            Dimension::Fifth => fifth_led_vector(error, &forces, sides),
            Dimension::Tonic | Dimension::Octave => {
                vertical_led_vector(primary, error, &forces, sides)
            }
        };

        let coordinate = self.config.ellipse.project(vector);
        let target = TargetResolution::new(primary, auxiliary_for(primary, vector));

        debug!(
            target: "tonefield::resolver",
            primary = %target.primary,
            auxiliary = ?target.auxiliary,
            vx = vector.x,
            vy = vector.y,
            x = coordinate.x,
            y = coordinate.y,
            "resolved strike point"
        );

        Some(Resolution {
            target,
            vector,
            coordinate,
        })
    }

    fn axis_forces(&self, error: &TuningError) -> AxisForces {
        let weights = &self.config.force_weights;
        AxisForces {
            tonic: error.tonic.abs() / weights.tonic,
            octave: error.octave.abs() / weights.octave,
            fifth: error.fifth.abs() / weights.fifth,
        }
    }
}

/// Y component contributed by a vertical dimension. The octave pushes along
/// +Y, the tonic along -Y, regardless of the error sign.
fn vertical_component(dimension: Dimension, forces: &AxisForces) -> f64 {
    match dimension {
        Dimension::Octave => forces.octave,
        Dimension::Tonic => -forces.tonic,
        Dimension::Fifth => 0.0,
    }
}

fn same_sign(a: f64, b: f64) -> bool {
    (a > 0.0) == (b > 0.0)
}

/// Horizontal component on a random side. No side is drawn for a zero force.
fn horizontal_component<S>(force: f64, sides: &mut S) -> f64
where
    S: SideSource + ?Sized,
{
    if force == 0.0 {
        return 0.0;
    }
    sides.pick_side().sign() * force
}

fn fifth_led_vector<S>(error: &TuningError, forces: &AxisForces, sides: &mut S) -> ForceVector
where
    S: SideSource + ?Sized,
{
    let x = horizontal_component(forces.fifth, sides);

    // Cooperating partner: same sign as the fifth, non-zero, strongest force.
    // The octave is listed first and keeps an exact tie.
    let partner = [
        (Dimension::Octave, error.octave, forces.octave),
        (Dimension::Tonic, error.tonic, forces.tonic),
    ]
    .into_iter()
    .filter(|(_, raw, _)| *raw != 0.0 && same_sign(*raw, error.fifth))
    .fold(None::<(Dimension, f64)>, |best, (dim, _, force)| match best {
        Some((_, best_force)) if force <= best_force => best,
        _ => Some((dim, force)),
    });

    let y = partner.map_or(0.0, |(dim, _)| vertical_component(dim, forces));
    ForceVector::new(x, y)
}

fn vertical_led_vector<S>(
    primary: Dimension,
    error: &TuningError,
    forces: &AxisForces,
    sides: &mut S,
) -> ForceVector
where
    S: SideSource + ?Sized,
{
    let y = vertical_component(primary, forces);
    let primary_raw = error.value(primary);

    // Opposite signs would cancel: isolate the vertical axis.
    let cooperates = error.fifth == 0.0 || same_sign(primary_raw, error.fifth);
    let x = if cooperates {
        horizontal_component(forces.fifth, sides)
    } else {
        0.0
    };
    ForceVector::new(x, y)
}

fn auxiliary_for(primary: Dimension, vector: ForceVector) -> Option<Dimension> {
    if vector.x != 0.0 && primary != Dimension::Fifth {
        Some(Dimension::Fifth)
    } else if vector.y != 0.0 && primary == Dimension::Fifth {
        if vector.y > 0.0 {
            Some(Dimension::Octave)
        } else {
            Some(Dimension::Tonic)
        }
    } else {
        None
    }
}
