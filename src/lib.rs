//! Simulation core of the fountain and lonely-runner toys.
//!
//! - [`WaveGridSimulator`]: damped 2D wave field with jets, ambient
//!   turbulence, pointer ripples and a circular basin.
//! - [`RingLonelinessSimulator`]: runners on concentric rings with drag
//!   offsets and a cumulative "has been lonely" history.
//!
//! Both are deterministic and advanced explicitly by a frame driver such as
//! [`app::App`]. Rendering and audio stay with the caller.

pub mod app;
pub mod config;
pub mod error;
pub mod math;
pub mod ring;
pub mod simulation;

pub use config::WaveConfig;
pub use error::{ConfigError, IndexError, SimError};
pub use ring::{AgentSample, RingConfig, RingLonelinessSimulator};
pub use simulation::{Interaction, ScalarField, WaveGridSimulator};
