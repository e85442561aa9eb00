//! Motion reading type carrying raw sensor event data.

/// A 3-axis acceleration vector with individually optional components.
///
/// Sensor events arrive as untyped, possibly partial data: any axis may be
/// absent. A missing component counts as zero when computing magnitudes,
/// but a vector with all three components absent is treated as unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Axes {
    /// X-axis acceleration in m/s².
    pub x: Option<f64>,
    /// Y-axis acceleration in m/s².
    pub y: Option<f64>,
    /// Z-axis acceleration in m/s².
    pub z: Option<f64>,
}

impl Axes {
    /// Creates a vector with all three components present.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }

    /// Returns true if every component is absent.
    pub fn is_unavailable(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.z.is_none()
    }

    /// Euclidean norm of the vector, with missing components as zero.
    pub fn magnitude(&self) -> f64 {
        let x = self.x.unwrap_or(0.0);
        let y = self.y.unwrap_or(0.0);
        let z = self.z.unwrap_or(0.0);
        (x * x + y * y + z * z).sqrt()
    }
}

/// A single motion event from the sensor boundary.
///
/// Mirrors what motion hardware actually delivers: two acceleration vectors
/// (one including gravity, one with gravity removed) and an optional
/// sampling interval. Either vector, and any axis within it, may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionReading {
    /// Gravity-excluded ("user") acceleration.
    pub acceleration: Option<Axes>,
    /// Gravity-inclusive ("raw") acceleration.
    pub acceleration_including_gravity: Option<Axes>,
    /// Sampling interval in seconds, if the platform reports one.
    pub interval: Option<f64>,
}

impl MotionReading {
    /// Creates a reading with both vectors present.
    pub fn new(acceleration: Axes, acceleration_including_gravity: Axes) -> Self {
        Self {
            acceleration: Some(acceleration),
            acceleration_including_gravity: Some(acceleration_including_gravity),
            interval: None,
        }
    }

    /// Attaches a sampling interval to the reading.
    pub fn with_interval(mut self, interval: f64) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Magnitude of the gravity-excluded vector.
    ///
    /// Returns `None` when the vector is wholly unavailable (absent, or all
    /// three axes absent); the reading must then be discarded.
    pub fn user_magnitude(&self) -> Option<f64> {
        match self.acceleration {
            Some(axes) if !axes.is_unavailable() => Some(axes.magnitude()),
            _ => None,
        }
    }

    /// Magnitude of the gravity-inclusive vector.
    ///
    /// Returns `None` when the vector is wholly unavailable.
    pub fn raw_magnitude(&self) -> Option<f64> {
        match self.acceleration_including_gravity {
            Some(axes) if !axes.is_unavailable() => Some(axes.magnitude()),
            _ => None,
        }
    }

    /// The sampling interval, defaulting to 1 when unknown.
    pub fn interval_or_default(&self) -> f64 {
        self.interval.unwrap_or(1.0)
    }

    /// Returns true if either vector is wholly unavailable.
    pub fn is_partial(&self) -> bool {
        self.user_magnitude().is_none() || self.raw_magnitude().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude_missing_axes_count_as_zero() {
        let axes = Axes {
            x: Some(3.0),
            y: None,
            z: Some(4.0),
        };
        assert!((axes.magnitude() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_axes_absent_is_unavailable() {
        let axes = Axes::default();
        assert!(axes.is_unavailable());
        assert_eq!(axes.magnitude(), 0.0);
    }

    #[test]
    fn test_reading_with_both_vectors_is_complete() {
        let reading = MotionReading::new(Axes::new(0.0, 0.0, 0.0), Axes::new(0.0, 0.0, 9.8));
        assert!(!reading.is_partial());
        assert_eq!(reading.user_magnitude(), Some(0.0));
        assert!((reading.raw_magnitude().unwrap() - 9.8).abs() < 1e-12);
    }

    #[test]
    fn test_missing_vector_makes_reading_partial() {
        let reading = MotionReading {
            acceleration: None,
            acceleration_including_gravity: Some(Axes::new(0.0, 0.0, 9.8)),
            interval: None,
        };
        assert!(reading.is_partial());
        assert!(reading.user_magnitude().is_none());
    }

    #[test]
    fn test_empty_axes_vector_makes_reading_partial() {
        let reading = MotionReading {
            acceleration: Some(Axes::new(1.0, 1.0, 1.0)),
            acceleration_including_gravity: Some(Axes::default()),
            interval: None,
        };
        assert!(reading.is_partial());
    }

    #[test]
    fn test_interval_defaults_to_one() {
        let reading = MotionReading::new(Axes::new(0.0, 0.0, 0.0), Axes::new(1.0, 0.0, 0.0));
        assert_eq!(reading.interval_or_default(), 1.0);
        assert_eq!(reading.with_interval(0.016).interval_or_default(), 0.016);
    }
}
