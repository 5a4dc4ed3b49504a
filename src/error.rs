//! Error types for both simulators.

use thiserror::Error;

/// Invalid construction parameters. Not recoverable at runtime.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must have at least one cell, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("grid must be square, got {width}x{height}")]
    NonSquareGrid { width: usize, height: usize },

    #[error("dampening must lie in (0, 1), got {0}")]
    DampeningOutOfRange(f64),

    #[error("radius fraction must lie in (0, 1], got {0}")]
    RadiusFractionOutOfRange(f64),

    #[error("interaction radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("parameter {name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("scalar field of {width}x{height} needs {expected} values, got {got}")]
    FieldSize {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },

    #[error("forcing value {value} at cell {index} outside [0, 1]")]
    ForcingOutOfRange { index: usize, value: f64 },

    #[error("ring {ring} has no runners")]
    EmptyRing { ring: usize },

    #[error("ring {ring} has {velocities} velocities but {colors} colours")]
    ColorCountMismatch {
        ring: usize,
        velocities: usize,
        colors: usize,
    },
}

/// Out-of-range ring or runner index. Indicates a driver bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("ring index {index} out of range for {count} rings")]
    Ring { index: usize, count: usize },

    #[error("runner index {index} out of range for ring {ring} with {count} runners")]
    Agent {
        ring: usize,
        index: usize,
        count: usize,
    },
}

/// Umbrella error for driver code that touches both simulators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("index error: {0}")]
    Index(#[from] IndexError),
}

pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ConfigError::NonSquareGrid { width: 8, height: 4 };
        assert_eq!(err.to_string(), "grid must be square, got 8x4");

        let err = IndexError::Agent { ring: 2, index: 9, count: 5 };
        assert_eq!(
            err.to_string(),
            "runner index 9 out of range for ring 2 with 5 runners"
        );
    }

    #[test]
    fn test_from_conversions() {
        let err: SimError = IndexError::Ring { index: 3, count: 1 }.into();
        assert!(matches!(err, SimError::Index(IndexError::Ring { index: 3, .. })));

        let err: SimError = ConfigError::EmptyRing { ring: 0 }.into();
        assert!(matches!(err, SimError::Config(_)));
    }
}
