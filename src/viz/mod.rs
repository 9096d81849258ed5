//! Visualization pipeline
//!
//! Volume aggregation, the thinking sweep, and bar layout. Everything here
//! is pure state and arithmetic; drawing lives in the `ui` module.

pub mod bars;
pub mod sweep;
pub mod volume;

pub use bars::{BarColor, BarDescriptor, BarGeometry, Visualizer};
pub use sweep::{SweepDirection, ThinkingSweep};
pub use volume::{band_magnitude, band_magnitudes};
