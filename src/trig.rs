//! Fixed-point trigonometry
//!
//! Formats:
//! - Angles: 128 orientation units per full rotation
//! - Sine/cosine: amplitude 256 (one world unit)
//! - Arctangent: 17-entry octant table, 16 units = 45°

use glam::IVec3;

use crate::consts::{ANGLE_STEPS, QUARTER_TURN, UNIT};
use crate::normalize_angle;

/// SINE_TABLE[i] = round(sin(i * 2pi / 128) * 256)
static SINE_TABLE: [i32; 128] = [
    0, 13, 25, 38, 50, 62, 74, 86, 98, 109, 121, 132, 142, 152, 162, 172,
    181, 190, 198, 206, 213, 220, 226, 231, 237, 241, 245, 248, 251, 253, 255, 256,
    256, 256, 255, 253, 251, 248, 245, 241, 237, 231, 226, 220, 213, 206, 198, 190,
    181, 172, 162, 152, 142, 132, 121, 109, 98, 86, 74, 62, 50, 38, 25, 13,
    0, -13, -25, -38, -50, -62, -74, -86, -98, -109, -121, -132, -142, -152, -162, -172,
    -181, -190, -198, -206, -213, -220, -226, -231, -237, -241, -245, -248, -251, -253, -255, -256,
    -256, -256, -255, -253, -251, -248, -245, -241, -237, -231, -226, -220, -213, -206, -198, -190,
    -181, -172, -162, -152, -142, -132, -121, -109, -98, -86, -74, -62, -50, -38, -25, -13,
];

/// ARCTAN_TABLE[i] = round(atan(i / 16) * 64 / pi), valid for x >= y >= 0
static ARCTAN_TABLE: [i32; 17] = [0, 1, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 15, 16];

/// An eighth of a turn, the top of the arctan table
const OCTANT: i32 = ANGLE_STEPS / 8;

/// Sine of an orientation in [0, 127].
///
/// Out-of-range input is reported and folded into range; the result is not
/// meant to be relied on, callers keep their angles normalized.
#[inline]
pub fn sine(angle: i32) -> i32 {
    if !(0..ANGLE_STEPS).contains(&angle) {
        log::warn!("sine: angle {} out of range 0..{}", angle, ANGLE_STEPS);
        return SINE_TABLE[(angle & (ANGLE_STEPS - 1)) as usize];
    }
    SINE_TABLE[angle as usize]
}

/// Cosine of an orientation in [0, 127]
#[inline]
pub fn cosine(angle: i32) -> i32 {
    if !(0..ANGLE_STEPS).contains(&angle) {
        log::warn!("cosine: angle {} out of range 0..{}", angle, ANGLE_STEPS);
    }
    sine(normalize_angle(angle + QUARTER_TURN))
}

/// Integer atan2 returning an orientation in [0, 127].
///
/// Standard mathematical convention: `arctan2(0, x > 0) == 0`, counter-clockwise
/// from +x. The origin maps to 0.
pub fn arctan2(y: i32, x: i32) -> i32 {
    if x == 0 && y == 0 {
        return 0;
    }

    let ax = x.unsigned_abs() as u64;
    let ay = y.unsigned_abs() as u64;

    // First octant lookup, mirrored across the 45° line when y dominates
    let angle = if ax >= ay {
        ARCTAN_TABLE[(ay * 16 / ax) as usize]
    } else {
        2 * OCTANT - ARCTAN_TABLE[(ax * 16 / ay) as usize]
    };

    let angle = match (x >= 0, y >= 0) {
        (true, true) => angle,
        (false, true) => 2 * QUARTER_TURN - angle,
        (false, false) => 2 * QUARTER_TURN + angle,
        (true, false) => ANGLE_STEPS - angle,
    };
    normalize_angle(angle)
}

/// Orientation that faces from `from` toward `to` on the ground plane
#[inline]
pub fn bearing(from: IVec3, to: IVec3) -> i32 {
    arctan2(-(to.x - from.x), -(to.z - from.z))
}

/// Unit heading of an orientation, scaled by `distance` world units
#[inline]
pub fn heading(angle: i32, distance: i32) -> IVec3 {
    IVec3::new(-sine(angle) * distance, 0, -cosine(angle) * distance)
}

/// Rotate a fixed-point vector about the vertical axis so that the forward
/// axis (-z) ends up pointing along `angle`'s heading
#[inline]
pub fn rotate_y(v: IVec3, angle: i32) -> IVec3 {
    let s = sine(angle) as i64;
    let c = cosine(angle) as i64;
    let (x, z) = (v.x as i64, v.z as i64);
    let unit = UNIT as i64;
    // Products are taken in i64; the results fit i32 again after the divide
    IVec3::new(
        ((x * c + z * s) / unit) as i32,
        v.y,
        ((z * c - x * s) / unit) as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sine_landmarks() {
        assert_eq!(sine(0), 0);
        assert_eq!(sine(32), 256);
        assert_eq!(sine(64), 0);
        assert_eq!(sine(96), -256);
        assert_eq!(cosine(0), 256);
        assert_eq!(cosine(64), -256);
    }

    #[test]
    fn test_out_of_range_is_not_fatal() {
        // Unreliable, but must not panic
        let _ = sine(-1);
        let _ = sine(500);
        let _ = cosine(-40);
    }

    #[test]
    fn test_arctan2_axes() {
        assert_eq!(arctan2(0, 5), 0);
        assert_eq!(arctan2(5, 0), 32);
        assert_eq!(arctan2(0, -5), 64);
        assert_eq!(arctan2(-5, 0), 96);
        assert_eq!(arctan2(0, 0), 0);
    }

    #[test]
    fn test_arctan2_quadrants() {
        // Diagonals land on octant boundaries
        assert_eq!(arctan2(10, 10), 16);
        assert_eq!(arctan2(10, -10), 48);
        assert_eq!(arctan2(-10, -10), 80);
        assert_eq!(arctan2(-10, 10), 112);

        // Shallow angles in each quadrant mirror each other
        let a = arctan2(3, 16);
        assert_eq!(a, 4);
        assert_eq!(arctan2(3, -16), 64 - a);
        assert_eq!(arctan2(-3, -16), 64 + a);
        assert_eq!(arctan2(-3, 16), 128 - a);

        // Steep angle mirrors across 45°
        assert_eq!(arctan2(16, 3), 32 - a);
    }

    #[test]
    fn test_bearing_matches_heading() {
        let origin = IVec3::ZERO;
        for angle in [0, 10, 32, 50, 64, 90, 127] {
            let target = heading(angle, 200);
            let b = bearing(origin, target);
            assert!(crate::angle_delta(angle, b).abs() <= 1, "angle {} bearing {}", angle, b);
        }
    }

    #[test]
    fn test_rotate_y_forward_axis() {
        let forward = IVec3::new(0, 0, -UNIT);
        assert_eq!(rotate_y(forward, 0), forward);
        assert_eq!(rotate_y(forward, 32), IVec3::new(-UNIT, 0, 0));
        assert_eq!(rotate_y(forward, 64), IVec3::new(0, 0, UNIT));
    }

    #[test]
    fn test_rotate_y_far_offsets() {
        let far = IVec3::new(0, 0, -40_000 * UNIT);
        assert_eq!(rotate_y(far, 32), IVec3::new(-40_000 * UNIT, 0, 0));
        assert_eq!(rotate_y(far, 64), IVec3::new(0, 0, 40_000 * UNIT));
        let diagonal = rotate_y(IVec3::new(30_000 * UNIT, 0, 30_000 * UNIT), 16);
        assert!(diagonal.x > 0 && diagonal.z.abs() < UNIT * 100);
    }

    proptest! {
        #[test]
        fn prop_pythagorean_identity(a in 0i32..128) {
            let s = sine(a);
            let c = cosine(a);
            prop_assert!((s * s + c * c - UNIT * UNIT).abs() <= 400);
        }

        #[test]
        fn prop_cosine_is_shifted_sine(a in 0i32..128) {
            prop_assert_eq!(cosine(a), sine((a + 32) % 128));
        }

        #[test]
        fn prop_arctan2_in_range(y in -100_000i32..100_000, x in -100_000i32..100_000) {
            let a = arctan2(y, x);
            prop_assert!((0..128).contains(&a));
        }
    }
}
