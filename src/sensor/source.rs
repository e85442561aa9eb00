//! Motion source abstraction.
//!
//! This module provides a trait-based abstraction over motion hardware,
//! allowing for both real platform backends and mock implementations for
//! testing. Starting a source may be gated behind a user-facing permission
//! prompt on some platforms.

use super::{Axes, MotionReading};
use std::collections::VecDeque;
use thiserror::Error;

/// Errors that can occur when starting a motion source.
///
/// Both are reported once, from session start; the expected recovery is the
/// caller falling back to the random-seed path, not a retry.
#[derive(Debug, Clone, Error)]
pub enum SensorError {
    /// The user declined the platform permission prompt.
    #[error("motion sensor permission denied")]
    PermissionDenied,
    /// The platform has no motion sensor.
    #[error("no motion sensor available")]
    Unsupported,
}

/// Trait for motion sensor implementations.
///
/// This abstraction allows swapping between real platform backends
/// and mock implementations for testing.
pub trait MotionSource {
    /// Starts delivering readings. May suspend on a permission decision.
    fn start(&mut self) -> Result<(), SensorError>;

    /// Returns the next queued reading, if any.
    fn poll(&mut self) -> Option<MotionReading>;

    /// Checks if the source is currently delivering readings.
    fn is_active(&self) -> bool;

    /// Stops delivering readings. Safe to call when already stopped.
    fn stop(&mut self);
}

/// How a mock source responds to `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StartBehavior {
    Grant,
    Deny,
    Unsupported,
}

/// Mock motion source backed by a scripted queue of readings.
#[derive(Debug)]
pub struct MockMotionSource {
    behavior: StartBehavior,
    queue: VecDeque<MotionReading>,
    active: bool,
}

impl MockMotionSource {
    /// Creates an empty mock source that grants permission.
    pub fn new() -> Self {
        Self {
            behavior: StartBehavior::Grant,
            queue: VecDeque::new(),
            active: false,
        }
    }

    /// Creates a mock source preloaded with the given readings.
    pub fn with_readings(readings: impl IntoIterator<Item = MotionReading>) -> Self {
        Self {
            queue: readings.into_iter().collect(),
            ..Self::new()
        }
    }

    /// Creates a mock source whose permission prompt is declined.
    pub fn denying() -> Self {
        Self {
            behavior: StartBehavior::Deny,
            ..Self::new()
        }
    }

    /// Creates a mock source simulating a platform without motion hardware.
    pub fn unsupported() -> Self {
        Self {
            behavior: StartBehavior::Unsupported,
            ..Self::new()
        }
    }

    /// Queues a reading.
    pub fn push(&mut self, reading: MotionReading) {
        self.queue.push_back(reading);
    }

    /// Queues a resting reading: no user motion, gravity only.
    pub fn push_still(&mut self) {
        self.push(MotionReading::new(
            Axes::new(0.0, 0.0, 0.0),
            Axes::new(0.0, 0.0, 9.81),
        ));
    }

    /// Queues a shake reading with the given user-acceleration magnitude.
    pub fn push_shake(&mut self, magnitude: f64) {
        self.push(MotionReading::new(
            Axes::new(magnitude, 0.0, 0.0),
            Axes::new(magnitude, 0.0, 9.81),
        ));
    }

    /// Queues a freefall reading: gravity-inclusive magnitude near zero.
    pub fn push_freefall(&mut self) {
        self.push(MotionReading::new(
            Axes::new(0.0, 0.0, 9.5),
            Axes::new(0.5, 0.5, 0.5),
        ));
    }

    /// Queues an impact reading with the given gravity-inclusive magnitude.
    pub fn push_impact(&mut self, magnitude: f64) {
        self.push(MotionReading::new(
            Axes::new(0.0, 0.0, magnitude - 9.81),
            Axes::new(0.0, 0.0, magnitude),
        ));
    }

    /// Number of readings still queued.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}

impl Default for MockMotionSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionSource for MockMotionSource {
    fn start(&mut self) -> Result<(), SensorError> {
        match self.behavior {
            StartBehavior::Grant => {
                self.active = true;
                tracing::info!(queued = self.queue.len(), "MockMotionSource started");
                Ok(())
            }
            StartBehavior::Deny => Err(SensorError::PermissionDenied),
            StartBehavior::Unsupported => Err(SensorError::Unsupported),
        }
    }

    fn poll(&mut self) -> Option<MotionReading> {
        if !self.active {
            return None;
        }
        self.queue.pop_front()
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn stop(&mut self) {
        self.active = false;
    }
}
