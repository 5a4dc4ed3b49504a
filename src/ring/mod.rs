//! Lonely-runner rings: runners circling concentric tracks, each claiming
//! half the gap to its nearest neighbour.

mod config;
mod geometry;
mod palette;
mod simulator;

pub use config::RingConfig;
pub use geometry::{RingGeometry, Viewport};
pub use palette::{hsl_to_rgb, Color};
pub use simulator::{AgentSample, RingLonelinessSimulator, RingState};

use crate::config::{HIGHLIGHT_CROWDED, HIGHLIGHT_LONELY};
use crate::math::smoothstep;

/// Opacity ramp for drawing a runner: faint when crowded, popping out
/// sharply as its loneliness approaches `HIGHLIGHT_LONELY` radians.
pub fn lonely_highlight(loneliness: f64) -> f64 {
    let normalized = smoothstep(HIGHLIGHT_CROWDED, HIGHLIGHT_LONELY, loneliness);
    0.1 + 0.9 * normalized.powi(8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_ramp() {
        assert_eq!(lonely_highlight(0.0), 0.1);
        assert!((lonely_highlight(1.0) - 1.0).abs() < 1e-12);
        let mid = lonely_highlight(0.3);
        assert!(mid > 0.1 && mid < 1.0);
        assert!(lonely_highlight(0.4) > mid);
    }
}
