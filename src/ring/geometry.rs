use std::f64::consts::TAU;

use crate::config::{INNER_RADIUS_PX, RING_SPACING_PX, RING_THICKNESS_PX};

/// Ring track layout in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingGeometry {
    pub thickness_px: f64,
    pub spacing_px: f64,
    pub inner_radius_px: f64,
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self {
            thickness_px: RING_THICKNESS_PX,
            spacing_px: RING_SPACING_PX,
            inner_radius_px: INNER_RADIUS_PX,
        }
    }
}

/// Canvas size in CSS pixels plus the device pixel ratio of pointer events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width_px: f64,
    pub height_px: f64,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width_px: f64, height_px: f64, pixel_ratio: f64) -> Self {
        Self {
            width_px,
            height_px,
            pixel_ratio,
        }
    }

    /// Polar space units per CSS pixel: the shorter side spans [-1, 1]
    pub fn scale(&self) -> f64 {
        2.0 / self.width_px.min(self.height_px)
    }

    /// Map a pointer in device pixels (y down) to polar `(radius, angle)`,
    /// angle counter-clockwise from +x in [0, 2π).
    pub fn to_polar(&self, pointer_x: f64, pointer_y: f64) -> (f64, f64) {
        let x = pointer_x / self.pixel_ratio;
        let y = pointer_y / self.pixel_ratio;
        let scale = self.scale();
        let ux = (2.0 * x - self.width_px) * scale / 2.0;
        let uy = (self.height_px - 2.0 * y) * scale / 2.0;

        let mut angle = uy.atan2(ux);
        if angle < 0.0 {
            angle += TAU;
        }
        ((ux * ux + uy * uy).sqrt(), angle)
    }
}

impl RingGeometry {
    /// Centre-line radius of `ring` in polar units
    pub fn track_radius(&self, ring: usize, viewport: &Viewport) -> f64 {
        (self.inner_radius_px + ring as f64 * self.spacing_px) * viewport.scale()
    }

    /// Ring whose band (half a spacing either side of the track) contains `radius`.
    pub fn ring_at(&self, radius: f64, ring_count: usize, viewport: &Viewport) -> Option<usize> {
        let scale = viewport.scale();
        let offset = radius / scale - self.inner_radius_px;
        let ring = (offset / self.spacing_px).round();
        if ring < 0.0 || ring >= ring_count as f64 {
            return None;
        }
        let ring = ring as usize;
        let half_band = self.spacing_px.max(self.thickness_px) * scale / 2.0;
        if (radius - self.track_radius(ring, viewport)).abs() <= half_band {
            Some(ring)
        } else {
            None
        }
    }
}
