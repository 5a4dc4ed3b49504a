//! Scalar helpers shared by both simulators: angle wraparound and GLSL-style
//! interpolation.

use std::f64::consts::{PI, TAU};

/// Wrap an angle into `[0, 2π)`.
///
/// `rem_euclid` can round up to exactly `TAU` for tiny negative inputs, so
/// that case folds back to 0.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Shortest angular distance between two angles already in `[0, 2π)`.
/// Result lies in `[0, π]`.
pub fn wraparound_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs();
    d.min(TAU - d)
}

/// Shortest angular distance between two arbitrary angles.
pub fn angular_distance(a: f64, b: f64) -> f64 {
    ((a - b + PI).rem_euclid(TAU) - PI).abs()
}

/// Signed shortest rotation taking `from` to `to`, in `[-π, π)`.
pub fn signed_angle_delta(from: f64, to: f64) -> f64 {
    (to - from + PI).rem_euclid(TAU) - PI
}

/// Hermite smoothstep as in GLSL. A degenerate edge pair acts as a step at `edge0`.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Unclamped linear interpolation.
pub fn lerp(start: f64, stop: f64, amount: f64) -> f64 {
    start + (stop - start) * amount
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_angle_range() {
        for angle in [-1e-17, -TAU, -0.5, 0.0, PI, TAU, 3.0 * TAU + 0.25, 1e9] {
            let w = wrap_angle(angle);
            assert!((0.0..TAU).contains(&w), "{angle} wrapped to {w}");
        }
        assert_eq!(wrap_angle(TAU), 0.0);
        assert!((wrap_angle(-0.5) - (TAU - 0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_wraparound_distance_symmetric() {
        let samples = [0.0, 0.1, 1.0, PI, 4.0, 6.2];
        for &a in &samples {
            for &b in &samples {
                assert_eq!(wraparound_distance(a, b), wraparound_distance(b, a));
                assert!(wraparound_distance(a, b) <= PI);
            }
        }
        assert!((wraparound_distance(0.1, 6.2) - (TAU - 6.1)).abs() < 1e-12);
    }

    #[test]
    fn test_angular_distance_matches_wrapped() {
        let d = angular_distance(-0.25, TAU + 0.25);
        assert!((d - 0.5).abs() < 1e-12);
        assert!((angular_distance(0.0, PI) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_signed_delta_takes_short_way() {
        assert!((signed_angle_delta(0.1, TAU - 0.1) + 0.2).abs() < 1e-12);
        assert!((signed_angle_delta(TAU - 0.1, 0.1) - 0.2).abs() < 1e-12);
        assert!((signed_angle_delta(1.0, 2.5) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_smoothstep() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
        assert_eq!(smoothstep(0.0, 0.0, 0.0), 1.0);
        assert_eq!(smoothstep(0.5, 0.5, 0.1), 0.0);
    }

    #[test]
    fn test_lerp_extrapolates() {
        assert_eq!(lerp(6.0, 8.0, 0.5), 7.0);
        assert_eq!(lerp(6.0, 8.0, -0.5), 5.0);
    }
}
