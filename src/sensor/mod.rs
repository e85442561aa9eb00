//! Motion input boundary.
//!
//! This module provides abstractions for consuming motion events from
//! device hardware. The sensor is treated as an external collaborator
//! supplying untyped, possibly partial data: vectors and individual axes
//! may be absent, and readings are reduced to scalar magnitudes immediately.

mod reading;
mod source;

pub use reading::{Axes, MotionReading};
pub use source::{MockMotionSource, MotionSource, SensorError};
