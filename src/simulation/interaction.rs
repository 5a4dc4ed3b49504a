//! Pointer contact with the water surface.

use crate::config::{
    CONTACT_STEP_AT_120, CONTACT_STEP_AT_60, CONTACT_VELOCITY_BLEND, INTERACTION_RADIUS_NARROW,
    INTERACTION_RADIUS_WIDE, VIEWPORT_NARROW_PX, VIEWPORT_RAMP_PX,
};
use crate::math::{lerp, smoothstep};

/// A ripple source for one step, in normalized grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interaction {
    pub u: f64,
    pub v: f64,
    /// Distance (uv units) at which the bump fades to zero
    pub radius: f64,
    pub strength: f64,
}

impl Interaction {
    pub fn new(u: f64, v: f64, radius: f64) -> Self {
        Self { u, v, radius, strength: 1.0 }
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    /// Pressure added at `(u, v)`: full strength at the centre, 0 at `radius`.
    pub fn bump_at(&self, u: f64, v: f64) -> f64 {
        let du = u - self.u;
        let dv = v - self.v;
        let distance = (du * du + dv * dv).sqrt();
        self.strength * (1.0 - smoothstep(0.0, self.radius, distance))
    }
}

/// Interaction radius for a viewport, shrinking from narrow (phones) to wide screens.
pub fn interaction_radius_for_viewport(viewport_width_px: f64) -> f64 {
    let ramp = ((viewport_width_px - VIEWPORT_NARROW_PX) / VIEWPORT_RAMP_PX).clamp(0.0, 1.0);
    lerp(INTERACTION_RADIUS_NARROW, INTERACTION_RADIUS_WIDE, ramp)
}

/// Makes a drag feel like a finger through water: the simulation cannot keep
/// up with a fast pointer, so the contact point trails it with a capped,
/// velocity-smoothed step per frame.
#[derive(Clone, Debug, Default)]
pub struct ContactSmoother {
    contact: Option<(f64, f64)>,
    last_speed: f64,
}

impl ContactSmoother {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame. `pointer` is the pressed pointer position in
    /// pixels, `None` when released. Returns the contact point in pixels.
    pub fn update(&mut self, pointer: Option<(f64, f64)>, frame_rate: f64) -> Option<(f64, f64)> {
        let Some((px, py)) = pointer else {
            self.last_speed = 0.0;
            self.contact = None;
            return None;
        };

        let Some((cx, cy)) = self.contact else {
            self.contact = Some((px, py));
            return self.contact;
        };

        let step_cap = lerp(CONTACT_STEP_AT_60, CONTACT_STEP_AT_120, (frame_rate - 60.0) / 60.0);
        let capped = limit((cx - px, cy - py), step_cap);
        let blended_cap =
            self.last_speed * CONTACT_VELOCITY_BLEND + (1.0 - CONTACT_VELOCITY_BLEND) * magnitude(capped);
        let step = limit(capped, blended_cap);

        self.last_speed = magnitude(step);
        self.contact = Some((cx - step.0, cy - step.1));
        self.contact
    }

    pub fn contact(&self) -> Option<(f64, f64)> {
        self.contact
    }
}

fn magnitude(v: (f64, f64)) -> f64 {
    (v.0 * v.0 + v.1 * v.1).sqrt()
}

fn limit(v: (f64, f64), max: f64) -> (f64, f64) {
    let m = magnitude(v);
    if m > max && m > 0.0 {
        let scale = max.max(0.0) / m;
        (v.0 * scale, v.1 * scale)
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_profile() {
        let hit = Interaction::new(0.5, 0.5, 0.1);
        assert_eq!(hit.bump_at(0.5, 0.5), 1.0);
        assert_eq!(hit.bump_at(0.7, 0.5), 0.0);
        let mid = hit.bump_at(0.55, 0.5);
        assert!(mid > 0.0 && mid < 1.0);

        let strong = hit.with_strength(2.5);
        assert_eq!(strong.bump_at(0.5, 0.5), 2.5);
    }

    #[test]
    fn test_radius_for_viewport() {
        assert_eq!(interaction_radius_for_viewport(320.0), INTERACTION_RADIUS_NARROW);
        assert_eq!(interaction_radius_for_viewport(1920.0), INTERACTION_RADIUS_WIDE);
        let mid = interaction_radius_for_viewport(1000.0);
        assert!((mid - 0.0085).abs() < 1e-12);
    }

    #[test]
    fn test_contact_starts_at_pointer() {
        let mut smoother = ContactSmoother::new();
        assert_eq!(smoother.update(Some((10.0, 20.0)), 60.0), Some((10.0, 20.0)));
    }

    #[test]
    fn test_contact_trails_fast_pointer() {
        let mut smoother = ContactSmoother::new();
        smoother.update(Some((0.0, 0.0)), 60.0);

        let mut last_x = 0.0;
        for _ in 0..10 {
            let (x, y) = smoother.update(Some((100.0, 0.0)), 60.0).unwrap();
            assert!(x > last_x - 1e-12, "contact moved away from pointer");
            assert!(x - last_x <= CONTACT_STEP_AT_60 + 1e-9);
            assert_eq!(y, 0.0);
            last_x = x;
        }
        assert!(last_x > 0.0 && last_x < 100.0);
    }

    #[test]
    fn test_release_resets() {
        let mut smoother = ContactSmoother::new();
        smoother.update(Some((0.0, 0.0)), 60.0);
        smoother.update(Some((50.0, 0.0)), 60.0);
        assert_eq!(smoother.update(None, 60.0), None);
        assert_eq!(smoother.update(Some((50.0, 0.0)), 60.0), Some((50.0, 0.0)));
    }
}
