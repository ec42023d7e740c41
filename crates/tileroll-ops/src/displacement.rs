//! Integer displacement from continuous roll parameters.
//!
//! Rolling never filters, so fractional offsets are snapped to whole
//! pixels with `floor(v + 0.5)`. Unlike truncation or `f64::round`, this
//! rounds halves the same way (up) on both sides of zero.

use glam::{DMat4, DVec2, DVec3};

use crate::{OpsError, OpsResult, RollParams};

/// Integer pixel offset applied per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Displacement {
    /// Horizontal offset; positive moves content right.
    pub dx: i32,
    /// Vertical offset; positive moves content down.
    pub dy: i32,
}

impl Displacement {
    /// No movement.
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    /// Creates a displacement.
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Rounds `roll - origin` to whole pixels.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] if either component is not finite
    /// or rounds outside the `i32` range.
    pub fn from_offsets(roll: DVec2, origin: DVec2) -> OpsResult<Self> {
        let d = roll - origin;
        Ok(Self {
            dx: to_pixels(d.x, "x")?,
            dy: to_pixels(d.y, "y")?,
        })
    }

    /// Displacement for a parameter set.
    pub fn from_params(params: &RollParams) -> OpsResult<Self> {
        Self::from_offsets(params.roll_vec(), params.origin_vec())
    }
}

/// Round half up: `floor(v + 0.5)`.
#[inline]
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

fn to_pixels(v: f64, axis: &str) -> OpsResult<i32> {
    if !v.is_finite() {
        return Err(OpsError::InvalidParameter(format!(
            "roll {} offset is not finite: {}",
            axis, v
        )));
    }
    let r = round_half_up(v);
    if r < f64::from(i32::MIN) || r > f64::from(i32::MAX) {
        return Err(OpsError::InvalidParameter(format!(
            "roll {} offset {} exceeds the pixel coordinate range",
            axis, v
        )));
    }
    Ok(r as i32)
}

/// Translation by the raw roll offset, for viewer overlays.
///
/// Uses the unrounded value so the handle tracks the control exactly.
pub fn overlay_matrix(roll: DVec2) -> DMat4 {
    DMat4::from_translation(DVec3::new(roll.x, roll.y, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dx_of(x: f64) -> i32 {
        Displacement::from_params(&RollParams::new(x, 0.0)).unwrap().dx
    }

    #[test]
    fn test_round_half_up_both_signs() {
        assert_eq!(dx_of(2.5), 3);
        assert_eq!(dx_of(-2.5), -2);
        assert_eq!(dx_of(2.49), 2);
        assert_eq!(dx_of(-2.51), -3);
        assert_eq!(dx_of(-0.5), 0);
        assert_eq!(dx_of(0.5), 1);
    }

    #[test]
    fn test_origin_is_subtracted() {
        let p = RollParams::new(10.0, 5.0).with_origin(2.6, -1.0);
        assert_eq!(Displacement::from_params(&p).unwrap(), Displacement::new(7, 6));
    }

    #[test]
    fn test_rejects_non_finite() {
        let p = RollParams::new(f64::NAN, 0.0);
        assert!(matches!(
            Displacement::from_params(&p),
            Err(OpsError::InvalidParameter(_))
        ));
        let p = RollParams::new(0.0, f64::INFINITY);
        assert!(Displacement::from_params(&p).is_err());
    }

    #[test]
    fn test_rejects_out_of_range() {
        let p = RollParams::new(1e12, 0.0);
        assert!(Displacement::from_params(&p).is_err());
        let p = RollParams::new(f64::from(i32::MIN), 0.0);
        assert_eq!(Displacement::from_params(&p).unwrap().dx, i32::MIN);
    }

    #[test]
    fn test_overlay_matrix_translates() {
        let m = overlay_matrix(DVec2::new(2.25, -3.0));
        let p = m.transform_point3(DVec3::ZERO);
        assert_relative_eq!(p.x, 2.25);
        assert_relative_eq!(p.y, -3.0);
        assert_relative_eq!(p.z, 0.0);
    }
}
