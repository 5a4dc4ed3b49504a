mod cell;
mod field;
mod grid;
mod interaction;
mod wave;

pub use cell::{Cell, Texel};
pub use field::{normalized_radius, BoundaryMask, ScalarField};
pub use grid::Grid;
pub use interaction::{interaction_radius_for_viewport, ContactSmoother, Interaction};
pub use wave::WaveGridSimulator;
