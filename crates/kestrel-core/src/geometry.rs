//! Pure angle and direction math for the sensor gimbal.
//!
//! Frame convention: x = East, y = Up, azimuth 0° points along +z and
//! grows toward +x. Angles are degrees at every public boundary.
//!
//! `direction_from_angles` and `angles_to_point` are inverses: for any
//! valid (heading, pan, tilt) and k > 0, projecting a point k meters
//! along the direction and solving back recovers (pan, tilt) within
//! floating-point tolerance. Tests below hold this property to 1e-3°.

use glam::DVec3;

use crate::constants::{
    DIRECTION_EPSILON, MIN_TARGET_SEPARATION_M, TILT_MAX_DEG, TILT_MIN_DEG,
};
use crate::types::Position;

/// Wrap a pan angle to [-180, 180] degrees. NaN passes through.
pub fn wrap_pan_deg(pan_deg: f64) -> f64 {
    let wrapped = (pan_deg + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid maps +180 to -180; keep the canonical half-open range.
    if wrapped == -180.0 && pan_deg >= 180.0 {
        180.0
    } else {
        wrapped
    }
}

/// Clamp a tilt angle to the gimbal's physical limits.
pub fn clamp_tilt_deg(tilt_deg: f64) -> f64 {
    tilt_deg.clamp(TILT_MIN_DEG, TILT_MAX_DEG)
}

/// World-space aiming direction for the given vehicle heading and
/// sensor pan/tilt (all degrees). The result is unit length unless the
/// composed vector is degenerate (magnitude below `DIRECTION_EPSILON`),
/// which only occurs with non-finite input.
pub fn direction_from_angles(heading_deg: f64, pan_deg: f64, tilt_deg: f64) -> DVec3 {
    let az = (heading_deg + pan_deg).to_radians();
    let tilt = tilt_deg.to_radians();

    let dir = DVec3::new(
        az.sin() * tilt.cos(),
        tilt.sin(),
        az.cos() * tilt.cos(),
    );

    if dir.length() > DIRECTION_EPSILON {
        dir.normalize()
    } else {
        dir
    }
}

/// Pan/tilt angles that point from `origin` at `target` given the
/// vehicle heading. Returns `None` when the separation is under
/// `MIN_TARGET_SEPARATION_M`: the solution is indeterminate and the
/// caller should keep its previous angles (defined edge case, not an
/// error).
pub fn angles_to_point(origin: &Position, target: &Position, heading_deg: f64) -> Option<(f64, f64)> {
    let dx = target.x - origin.x;
    let dy = target.y - origin.y;
    let dz = target.z - origin.z;

    let horizontal = (dx * dx + dz * dz).sqrt();
    let total = (dx * dx + dy * dy + dz * dz).sqrt();
    if !(total >= MIN_TARGET_SEPARATION_M) {
        return None;
    }

    let pan = wrap_pan_deg(dx.atan2(dz).to_degrees() - heading_deg);
    let tilt = clamp_tilt_deg(dy.atan2(horizontal).to_degrees());
    Some((pan, tilt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wrap_pan_basic() {
        assert_relative_eq!(wrap_pan_deg(0.0), 0.0);
        assert_relative_eq!(wrap_pan_deg(190.0), -170.0);
        assert_relative_eq!(wrap_pan_deg(-190.0), 170.0);
        assert_relative_eq!(wrap_pan_deg(540.0), 180.0);
        assert_relative_eq!(wrap_pan_deg(-180.0), -180.0);
    }

    #[test]
    fn test_clamp_tilt_limits() {
        assert_relative_eq!(clamp_tilt_deg(60.0), TILT_MAX_DEG);
        assert_relative_eq!(clamp_tilt_deg(-120.0), TILT_MIN_DEG);
        assert_relative_eq!(clamp_tilt_deg(-15.0), -15.0);
    }

    #[test]
    fn test_direction_is_unit_length() {
        for heading in [0.0, 37.0, 180.0, 271.5] {
            for pan in [-170.0, -45.0, 0.0, 90.0] {
                for tilt in [-89.0, -15.0, 0.0, 44.0] {
                    let d = direction_from_angles(heading, pan, tilt);
                    assert_relative_eq!(d.length(), 1.0, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_direction_cardinal_points() {
        // Heading 0, no pan, level: straight along +z.
        let d = direction_from_angles(0.0, 0.0, 0.0);
        assert_relative_eq!(d.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(d.z, 1.0, epsilon = 1e-12);

        // Azimuth 90: along +x (East).
        let d = direction_from_angles(90.0, 0.0, 0.0);
        assert_relative_eq!(d.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(d.z, 0.0, epsilon = 1e-9);

        // Straight down.
        let d = direction_from_angles(0.0, 0.0, -90.0);
        assert_relative_eq!(d.y, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_angle_round_trip() {
        // Required property: project a point along the direction and
        // solve back; pan/tilt must match to 1e-3 degrees.
        let origin = Position::new(1200.0, 850.0, -4300.0);
        for heading in [0.0, 45.0, 123.4, 270.0, 359.0] {
            for pan in [-170.0, -90.0, -10.0, 0.0, 25.0, 160.0] {
                for tilt in [-85.0, -45.0, -15.0, 0.0, 10.0, 40.0] {
                    for k in [10.0, 500.0, 25_000.0] {
                        let dir = direction_from_angles(heading, pan, tilt);
                        let target = Position::from_dvec3(origin.to_dvec3() + dir * k);
                        let (p, t) = angles_to_point(&origin, &target, heading)
                            .expect("separation is positive");
                        assert!(
                            (p - pan).abs() < 1e-3,
                            "pan round trip: heading={heading} pan={pan} got {p}"
                        );
                        assert!(
                            (t - tilt).abs() < 1e-3,
                            "tilt round trip: heading={heading} tilt={tilt} got {t}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_angles_to_point_degenerate_separation() {
        let origin = Position::new(10.0, 20.0, 30.0);
        let near = Position::new(10.2, 20.1, 30.3);
        assert!(angles_to_point(&origin, &near, 0.0).is_none());
        assert!(angles_to_point(&origin, &origin, 90.0).is_none());
    }

    #[test]
    fn test_angles_to_point_tilt_clamped() {
        // Target nearly overhead wants tilt ~ +89°; gimbal stops at +45°.
        let origin = Position::new(0.0, 0.0, 0.0);
        let above = Position::new(0.0, 1000.0, 10.0);
        let (_, tilt) = angles_to_point(&origin, &above, 0.0).unwrap();
        assert_relative_eq!(tilt, TILT_MAX_DEG);
    }
}
