use crate::error::ConfigError;

/// Simulation resolution of the fountain basin (1024x1024 = 1M cells)
pub const GRID_SIZE: usize = 1024;

// ============================================
// Wave Equation Parameters
// ============================================

/// Multiplicative dampening applied to both wave terms and both state variables
pub const DAMPENING: f64 = 0.99;

/// Basin radius as a fraction of the half-width (0.4775 of the full width)
pub const RADIUS_FRACTION: f64 = 0.955;

/// Spring constant pulling velocity back toward rest, gives water-like waves
pub const SPRING: f64 = 0.005;

/// Gain of jet turbulence inside the forcing field
pub const JET_GAIN: f64 = 0.1;

/// Gain of ambient agitation outside the forcing field
pub const AMBIENT_GAIN: f64 = 0.05;

/// Amplitude of each simplex noise band
pub const NOISE_AMPLITUDE: f64 = 0.7;

/// Time scale of the slow jet band
pub const JET_TIME_SCALE: f64 = 0.003;

/// Time scale of the fast turbulence band
pub const TURBULENCE_TIME_SCALE: f64 = 0.3;

/// Spatial frequencies (in uv units) of the noise bands
pub const JET_FREQUENCY: f64 = 10.0;
pub const JET_COARSE_FREQUENCY: f64 = 2.0;
pub const JET_COARSE_SHIFT: [f64; 2] = [1.3, 1.7];
pub const TURBULENCE_FREQUENCY: f64 = 40.0;

/// Seed of the noise permutation table
pub const NOISE_SEED: u32 = 0xF0E7_A1A5;

// ============================================
// Pointer Interaction
// ============================================

/// Interaction radius (uv units) on narrow viewports
pub const INTERACTION_RADIUS_NARROW: f64 = 0.012;

/// Interaction radius (uv units) on wide viewports
pub const INTERACTION_RADIUS_WIDE: f64 = 0.005;

/// Viewport widths (px) between which the interaction radius shrinks
pub const VIEWPORT_NARROW_PX: f64 = 800.0;
pub const VIEWPORT_RAMP_PX: f64 = 400.0;

/// Per-frame contact step cap (px) at 60 and 120 FPS
pub const CONTACT_STEP_AT_60: f64 = 6.0;
pub const CONTACT_STEP_AT_120: f64 = 8.0;

/// Weight of the previous contact speed when smoothing drags
pub const CONTACT_VELOCITY_BLEND: f64 = 0.8;

// ============================================
// Lonely Runner Rings
// ============================================

/// Number of concentric rings
pub const NUM_RINGS: usize = 15;

/// Runners on the innermost ring; each ring outward adds one
pub const BASE_RUNNERS: usize = 3;

/// Angular speed multiplier applied to every runner velocity
pub const RING_SPEED_SCALE: f64 = 0.5;

/// Ring time units per wall-clock second
pub const RING_TIME_SCALE: f64 = 0.1;

/// Runner colour saturation and lightness
pub const RUNNER_SATURATION: f64 = 0.7;
pub const RUNNER_LIGHTNESS: f64 = 0.6;

/// Ring track geometry in CSS pixels
pub const RING_THICKNESS_PX: f64 = 10.0;
pub const RING_SPACING_PX: f64 = 20.0;
pub const INNER_RADIUS_PX: f64 = 200.0;

/// Loneliness (radians) below which a runner is fully crowded / above which fully lonely
pub const HIGHLIGHT_CROWDED: f64 = 0.05;
pub const HIGHLIGHT_LONELY: f64 = 0.5;

// ============================================
// Driver
// ============================================

/// Seconds a hidden toy keeps simulating before it pauses
pub const PAUSE_DELAY_SECS: f64 = 5.0;

/// Nominal frame interval of the headless driver
pub const FRAME_INTERVAL_SECS: f64 = 1.0 / 60.0;

/// Tunable parameters of the wave grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveConfig {
    /// Multiplicative dampening, must lie in (0, 1)
    pub dampening: f64,
    /// Basin radius relative to the half-width, must lie in (0, 1]
    pub radius_fraction: f64,
    pub spring: f64,
    pub jet_gain: f64,
    /// Set to 0 to disable the ambient band outside the jets
    pub ambient_gain: f64,
    /// Radius (uv units) of `apply_impulse` bumps, must be positive
    pub interaction_radius: f64,
    pub noise_seed: u32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            dampening: DAMPENING,
            radius_fraction: RADIUS_FRACTION,
            spring: SPRING,
            jet_gain: JET_GAIN,
            ambient_gain: AMBIENT_GAIN,
            interaction_radius: INTERACTION_RADIUS_NARROW,
            noise_seed: NOISE_SEED,
        }
    }
}

impl WaveConfig {
    /// Check ranges; every grid constructor runs this first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dampening > 0.0 && self.dampening < 1.0) {
            return Err(ConfigError::DampeningOutOfRange(self.dampening));
        }
        if !(self.radius_fraction > 0.0 && self.radius_fraction <= 1.0) {
            return Err(ConfigError::RadiusFractionOutOfRange(self.radius_fraction));
        }
        for (name, value) in [
            ("spring", self.spring),
            ("jet_gain", self.jet_gain),
            ("ambient_gain", self.ambient_gain),
            ("interaction_radius", self.interaction_radius),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        if self.interaction_radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius(self.interaction_radius));
        }
        Ok(())
    }
}
