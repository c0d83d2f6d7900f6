//! # Tonefield Geometry
//!
//! The tonefield is modelled as an axis-aligned ellipse centred on the origin.
//! X runs along the fifth axis, Y along the tonic/octave axis. Strike points
//! always sit on the boundary, never inside the ellipse.

use serde::{Deserialize, Serialize};

use crate::constants::{RADIUS_X, RADIUS_Y};
use crate::error::{Result, TonefieldError};

/// Semi-axes of a tonefield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    /// Fifth axis.
    pub radius_x: f64,
    /// Tonic/octave axis.
    pub radius_y: f64,
}

impl Default for Ellipse {
    fn default() -> Self {
        Self::new(RADIUS_X, RADIUS_Y)
    }
}

impl Ellipse {
    pub fn new(radius_x: f64, radius_y: f64) -> Self {
        Self { radius_x, radius_y }
    }

    pub fn validate(&self) -> Result<()> {
        let ok = |r: f64| r.is_finite() && r > 0.0;
        if ok(self.radius_x) && ok(self.radius_y) {
            Ok(())
        } else {
            Err(TonefieldError::InvalidConfig(format!(
                "ellipse radii must be > 0 (got {} x {})",
                self.radius_x, self.radius_y
            )))
        }
    }

    /// Boundary point at parametric angle `theta` (radians).
    pub fn point_at(&self, theta: f64) -> TonefieldCoordinate {
        TonefieldCoordinate {
            x: self.radius_x * theta.cos(),
            y: self.radius_y * theta.sin(),
        }
    }

    /// Maps a force vector onto the boundary along its direction angle.
    pub fn project(&self, vector: ForceVector) -> TonefieldCoordinate {
        self.point_at(vector.angle())
    }

    /// `(x/rx)^2 + (y/ry)^2`; exactly 1.0 on the boundary.
    pub fn normalized_radius(&self, coord: TonefieldCoordinate) -> f64 {
        let u = coord.x / self.radius_x;
        let v = coord.y / self.radius_y;
        u * u + v * v
    }
}

/// Signed strike direction before it is mapped onto the tonefield.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ForceVector {
    pub x: f64,
    pub y: f64,
}

impl ForceVector {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `atan2(y, x)`
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }
}

/// A strike point on the tonefield boundary.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TonefieldCoordinate {
    pub x: f64,
    pub y: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn vertices_of_the_default_ellipse() {
        let e = Ellipse::default();
        assert_eq!(e.point_at(0.0), TonefieldCoordinate { x: 0.6, y: 0.0 });
        assert_eq!(e.point_at(PI).x, -0.6);
        assert_abs_diff_eq!(e.point_at(FRAC_PI_2).y, 0.85);
        assert_abs_diff_eq!(e.point_at(-FRAC_PI_2).y, -0.85);
    }

    #[test]
    fn projection_lands_on_the_boundary() {
        let e = Ellipse::default();
        for (x, y) in [(1.0, 1.0), (-3.0, 0.5), (0.0, -2.0), (5.0, 0.0), (-0.1, -7.0)] {
            let coord = e.project(ForceVector::new(x, y));
            assert_abs_diff_eq!(e.normalized_radius(coord), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn projection_keeps_the_quadrant() {
        let coord = Ellipse::default().project(ForceVector::new(-2.0, 1.0));
        assert!(coord.x < 0.0 && coord.y > 0.0);
    }

    #[test]
    fn rejects_degenerate_radii() {
        assert!(Ellipse::new(0.0, 1.0).validate().is_err());
        assert!(Ellipse::new(0.5, f64::NAN).validate().is_err());
        assert!(Ellipse::default().validate().is_ok());
    }
}
