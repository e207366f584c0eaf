//! Error types for simulation setup.
//!
//! Only construction can fail. Once a [`Simulation`](crate::sim::Simulation)
//! exists, every tick recovers locally instead of reporting errors.

use core::fmt;

/// Reasons a [`SimConfig`](crate::config::SimConfig) is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Ball radius must be positive and finite.
    InvalidRadius,
    /// Mass must be positive and finite.
    InvalidMass,
    /// Inertia factor must be positive (0.5 for a solid disk).
    InvalidInertiaFactor,
    /// Core radius must be in [0, radius).
    CoreRadiusOutOfRange,
    /// Total rope length must be positive and finite.
    InvalidRopeLength,
    /// Segment length must be positive and no longer than the rope.
    InvalidSegmentLength,
    /// A coefficient fell outside its allowed range.
    CoefficientOutOfRange { name: &'static str },
    /// The world must be larger than the ball in both axes.
    WorldTooSmall,
    /// Solver iteration and sub-step counts must be at least 1.
    ZeroIterations,
    /// The time step bound must be positive and finite.
    InvalidTimeStep,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidRadius => write!(f, "ball radius must be positive and finite"),
            ConfigError::InvalidMass => write!(f, "mass must be positive and finite"),
            ConfigError::InvalidInertiaFactor => write!(f, "inertia factor must be positive"),
            ConfigError::CoreRadiusOutOfRange => write!(f, "core radius must be in [0, radius)"),
            ConfigError::InvalidRopeLength => write!(f, "rope length must be positive and finite"),
            ConfigError::InvalidSegmentLength => {
                write!(f, "segment length must be positive and at most the rope length")
            }
            ConfigError::CoefficientOutOfRange { name } => {
                write!(f, "coefficient `{}` is out of range", name)
            }
            ConfigError::WorldTooSmall => write!(f, "world must be larger than the ball"),
            ConfigError::ZeroIterations => write!(f, "iteration and sub-step counts must be at least 1"),
            ConfigError::InvalidTimeStep => write!(f, "max time step must be positive and finite"),
        }
    }
}
