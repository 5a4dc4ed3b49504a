use std::f64::consts::PI;

use crate::config::{BASE_RUNNERS, RUNNER_LIGHTNESS, RUNNER_SATURATION};
use crate::error::ConfigError;
use crate::ring::palette::{hsl_to_rgb, Color};

/// Immutable description of one ring: a fixed set of runners.
#[derive(Clone, Debug, PartialEq)]
pub struct RingConfig {
    velocities: Vec<f64>,
    colors: Vec<Color>,
}

impl RingConfig {
    /// `colors` must be empty (all white) or match `velocities` in length.
    pub fn new(velocities: Vec<f64>, colors: Vec<Color>) -> Self {
        let colors = if colors.is_empty() {
            vec![Color::WHITE; velocities.len()]
        } else {
            colors
        };
        Self { velocities, colors }
    }

    /// Ring with uncoloured runners
    pub fn from_velocities(velocities: Vec<f64>) -> Self {
        Self::new(velocities, Vec::new())
    }

    /// Standard lonely-runner layout: ring `i` holds `i + 3` runners with
    /// velocities `1, 2, ..`, coloured along a rainbow that shifts per ring.
    pub fn generate(num_rings: usize) -> Vec<RingConfig> {
        (0..num_rings)
            .map(|i| {
                let runners = i + BASE_RUNNERS;
                let velocities = (0..runners).map(|j| (j + 1) as f64).collect();
                let colors = (0..runners)
                    .map(|j| {
                        let hue = (j as f64 / runners as f64 + i as f64 / num_rings as f64) % 1.0;
                        hsl_to_rgb(hue, RUNNER_SATURATION, RUNNER_LIGHTNESS)
                    })
                    .collect();
                RingConfig::new(velocities, colors)
            })
            .collect()
    }

    pub(crate) fn validate(&self, ring: usize) -> Result<(), ConfigError> {
        if self.velocities.is_empty() {
            return Err(ConfigError::EmptyRing { ring });
        }
        if self.colors.len() != self.velocities.len() {
            return Err(ConfigError::ColorCountMismatch {
                ring,
                velocities: self.velocities.len(),
                colors: self.colors.len(),
            });
        }
        if let Some(&value) = self.velocities.iter().find(|v| !v.is_finite()) {
            return Err(ConfigError::NonFinite { name: "velocity", value });
        }
        Ok(())
    }

    pub fn velocities(&self) -> &[f64] {
        &self.velocities
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.velocities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.velocities.is_empty()
    }

    /// Loneliness at or above which a runner counts as lonely: π / N
    pub fn lonely_threshold(&self) -> f64 {
        PI / self.velocities.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_layout() {
        let rings = RingConfig::generate(15);
        assert_eq!(rings.len(), 15);
        for (i, ring) in rings.iter().enumerate() {
            assert_eq!(ring.len(), i + 3);
            assert_eq!(ring.velocities()[0], 1.0);
            assert_eq!(*ring.velocities().last().unwrap(), (i + 3) as f64);
            assert_eq!(ring.colors().len(), ring.len());
            assert!(ring.validate(i).is_ok());
        }
    }

    #[test]
    fn test_threshold() {
        let ring = RingConfig::from_velocities(vec![1.0, 2.0, 3.0, 4.0]);
        assert!((ring.lonely_threshold() - PI / 4.0).abs() < 1e-15);
    }

    #[test]
    fn test_validation() {
        let empty = RingConfig::from_velocities(vec![]);
        assert_eq!(empty.validate(2), Err(ConfigError::EmptyRing { ring: 2 }));

        let mismatched = RingConfig::new(vec![1.0, 2.0], vec![Color::WHITE]);
        assert_eq!(
            mismatched.validate(0),
            Err(ConfigError::ColorCountMismatch { ring: 0, velocities: 2, colors: 1 })
        );

        let nan = RingConfig::from_velocities(vec![1.0, f64::NAN]);
        assert!(matches!(nan.validate(0), Err(ConfigError::NonFinite { .. })));
    }
}
