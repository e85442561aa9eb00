//! Entropy collection over a motion source.
//!
//! The collector owns its motion source (the session's subscription
//! handle) and releases it unconditionally on finalize, so repeated
//! sessions never leak a live subscription.

use super::config::CastConfig;
use super::fallback::FallbackRng;
use super::seed::Seed;
use super::session::{Session, SessionState};
use crate::sensor::{MotionReading, MotionSource, SensorError};
use std::sync::mpsc::{channel, Receiver, Sender};
use thiserror::Error;

/// Errors that can occur when starting a collection session.
#[derive(Debug, Error)]
pub enum CastError {
    /// A session is already in progress; finalize it before starting
    /// another.
    #[error("a collection session is already active")]
    AlreadyActive,
    /// The motion source could not be started.
    #[error(transparent)]
    Sensor(#[from] SensorError),
}

/// Fire-and-forget impact notification.
///
/// Carries no payload beyond "the drop gesture completed; cast now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImpactNotice;

/// Converts a stream of motion readings into a single 8-bit seed.
///
/// One session is active at a time. Samples accumulate via [`ingest`]
/// (push, for platform glue) or [`pump`] (pull, draining the owned
/// source); a detected drop gesture emits an [`ImpactNotice`] to every
/// subscriber exactly once per session. [`stop_and_cast`] always yields a
/// valid seed: the weighted chaos sum when samples were collected, a
/// fallback draw otherwise.
///
/// [`ingest`]: EntropyCollector::ingest
/// [`pump`]: EntropyCollector::pump
/// [`stop_and_cast`]: EntropyCollector::stop_and_cast
pub struct EntropyCollector<S: MotionSource> {
    source: S,
    config: CastConfig,
    session: Session,
    fallback: FallbackRng,
    impact_listeners: Vec<Sender<ImpactNotice>>,
}

impl<S: MotionSource> EntropyCollector<S> {
    /// Creates a collector with the default configuration and an
    /// OS-seeded fallback generator.
    pub fn new(source: S) -> Self {
        Self::with_config(source, CastConfig::default())
    }

    /// Creates a collector with the given configuration.
    pub fn with_config(source: S, config: CastConfig) -> Self {
        Self::with_fallback_rng(source, config, FallbackRng::from_os_entropy())
    }

    /// Creates a collector with an injected fallback generator.
    ///
    /// Lets tests pin the sensorless path to a deterministic sequence.
    pub fn with_fallback_rng(source: S, config: CastConfig, fallback: FallbackRng) -> Self {
        Self {
            source,
            config,
            session: Session::new(),
            fallback,
            impact_listeners: Vec::new(),
        }
    }

    /// Starts a collection session.
    ///
    /// Starts the owned motion source (it may suspend on a platform
    /// permission prompt) and resets the session to listening. Starting
    /// while a session is active is rejected with
    /// [`CastError::AlreadyActive`]; finalize first. On
    /// [`SensorError::PermissionDenied`] or [`SensorError::Unsupported`]
    /// the expected recovery is a manual [`stop_and_cast`], which takes
    /// the fallback path; no retry is attempted internally.
    ///
    /// [`stop_and_cast`]: EntropyCollector::stop_and_cast
    pub fn start_session(&mut self) -> Result<(), CastError> {
        if self.session.is_active() {
            return Err(CastError::AlreadyActive);
        }

        self.source.start()?;
        self.session.begin();
        tracing::info!("collection session started");
        Ok(())
    }

    /// Feeds one motion reading into the active session.
    ///
    /// A reading with either acceleration vector wholly unavailable is
    /// discarded as a recoverable no-op, not an error. Otherwise the
    /// gravity-inclusive magnitude, weighted by the sampling interval
    /// (default 1) plus any configured jitter, is appended to the sample
    /// sequence and the gesture state machine advances. Ignored while no
    /// session is active.
    pub fn ingest(&mut self, reading: &MotionReading) {
        if !self.session.is_active() {
            return;
        }

        let (Some(raw), Some(user)) = (reading.raw_magnitude(), reading.user_magnitude()) else {
            tracing::debug!("partial motion reading discarded");
            return;
        };

        let mut weighted = raw * reading.interval_or_default();
        if self.config.jitter_amplitude > 0.0 {
            weighted += self.fallback.jitter(self.config.jitter_amplitude);
        }

        if self.session.observe(raw, user, weighted, &self.config) {
            self.notify_impact();
        }
    }

    /// Drains the owned source, ingesting every queued reading.
    ///
    /// Returns the number of readings drained.
    pub fn pump(&mut self) -> usize {
        let mut drained = 0;
        while let Some(reading) = self.source.poll() {
            self.ingest(&reading);
            drained += 1;
        }
        drained
    }

    /// Subscribes to impact notifications.
    ///
    /// At most one notice is emitted per session. Dropping the receiver
    /// unsubscribes; disconnected listeners are pruned on the next
    /// emission.
    pub fn subscribe_impact(&mut self) -> Receiver<ImpactNotice> {
        let (tx, rx) = channel();
        self.impact_listeners.push(tx);
        rx
    }

    /// Current gesture state.
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Number of samples accumulated in the current session.
    pub fn sample_count(&self) -> usize {
        self.session.sample_count()
    }

    /// Returns true while a session is in progress.
    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// Terminates sampling and computes the seed.
    ///
    /// Idempotent (safe to call when already stopped) and unconditionally
    /// stops the motion source regardless of gesture state. An empty sample
    /// sequence (sensorless platforms, denied permission, repeated call)
    /// takes the fallback path; the call never blocks and always returns a
    /// seed in [0, 255].
    pub fn stop_and_cast(&mut self) -> Seed {
        self.source.stop();
        let samples = self.session.finalize();

        match Seed::from_samples(&samples, self.config.chaos_scale) {
            Some(seed) => {
                tracing::info!(
                    seed = seed.value(),
                    samples = samples.len(),
                    "cast from physical entropy"
                );
                seed
            }
            None => {
                let seed = self.fallback.next_seed();
                tracing::info!(seed = seed.value(), "cast from fallback generator");
                seed
            }
        }
    }

    fn notify_impact(&mut self) {
        tracing::info!("drop impact detected, signaling cast");
        self.impact_listeners
            .retain(|listener| listener.send(ImpactNotice).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::{Axes, MockMotionSource};

    fn deterministic_collector(source: MockMotionSource) -> EntropyCollector<MockMotionSource> {
        EntropyCollector::with_fallback_rng(
            source,
            CastConfig::default(),
            FallbackRng::from_seed([9u8; 32]),
        )
    }

    fn unit_reading() -> MotionReading {
        // Gravity-inclusive magnitude exactly 1.0, no user motion.
        MotionReading::new(Axes::new(0.0, 0.0, 0.0), Axes::new(1.0, 0.0, 0.0))
    }

    #[test]
    fn test_known_stream_casts_deterministically() {
        let mut collector = deterministic_collector(MockMotionSource::new());
        collector.start_session().unwrap();

        for _ in 0..3 {
            collector.ingest(&unit_reading());
        }
        assert_eq!(collector.sample_count(), 3);

        // chaos_sum = 6 -> floor(600000) mod 256
        assert_eq!(collector.stop_and_cast().value(), 192);
    }

    #[test]
    fn test_restart_while_active_is_rejected() {
        let mut collector = deterministic_collector(MockMotionSource::new());
        collector.start_session().unwrap();

        assert!(matches!(
            collector.start_session(),
            Err(CastError::AlreadyActive)
        ));

        // Finalizing clears the way for a fresh session.
        collector.stop_and_cast();
        collector.start_session().unwrap();
        assert_eq!(collector.sample_count(), 0);
    }

    #[test]
    fn test_permission_denied_then_fallback() {
        let mut collector = deterministic_collector(MockMotionSource::denying());

        assert!(matches!(
            collector.start_session(),
            Err(CastError::Sensor(SensorError::PermissionDenied))
        ));

        // Recovery path: manual stop still yields a valid seed.
        let seed = collector.stop_and_cast();
        let mut expected = FallbackRng::from_seed([9u8; 32]);
        assert_eq!(seed, expected.next_seed());
    }

    #[test]
    fn test_unsupported_source_surfaces_once() {
        let mut collector = deterministic_collector(MockMotionSource::unsupported());
        assert!(matches!(
            collector.start_session(),
            Err(CastError::Sensor(SensorError::Unsupported))
        ));
    }

    #[test]
    fn test_double_finalize_is_safe() {
        let mut collector = deterministic_collector(MockMotionSource::new());
        collector.start_session().unwrap();
        collector.ingest(&unit_reading());

        let first = collector.stop_and_cast();
        assert_eq!(u32::from(first.value()), 100_000 % 256);

        // Second finalize finds no samples and takes the fallback path.
        let second = collector.stop_and_cast();
        let mut expected = FallbackRng::from_seed([9u8; 32]);
        assert_eq!(second, expected.next_seed());
    }

    #[test]
    fn test_partial_readings_are_discarded() {
        let mut collector = deterministic_collector(MockMotionSource::new());
        collector.start_session().unwrap();

        let partial = MotionReading {
            acceleration: None,
            acceleration_including_gravity: Some(Axes::new(0.0, 0.0, 9.8)),
            interval: None,
        };
        collector.ingest(&partial);

        let empty_axes = MotionReading {
            acceleration: Some(Axes::new(0.0, 0.0, 0.0)),
            acceleration_including_gravity: Some(Axes::default()),
            interval: None,
        };
        collector.ingest(&empty_axes);

        assert_eq!(collector.sample_count(), 0);
    }

    #[test]
    fn test_interval_weights_samples() {
        let mut collector = deterministic_collector(MockMotionSource::new());
        collector.start_session().unwrap();

        // 2.0 magnitude over half-second intervals: weighted samples of 1.0
        let reading = MotionReading::new(Axes::new(0.0, 0.0, 0.0), Axes::new(2.0, 0.0, 0.0))
            .with_interval(0.5);
        for _ in 0..3 {
            collector.ingest(&reading);
        }

        assert_eq!(collector.stop_and_cast().value(), 192);
    }

    #[test]
    fn test_drop_gesture_notifies_once() {
        let mut source = MockMotionSource::new();
        source.push_shake(16.0);
        source.push_freefall();
        source.push_impact(25.0);
        source.push_impact(30.0);

        let mut collector = deterministic_collector(source);
        let impact = collector.subscribe_impact();

        collector.start_session().unwrap();
        assert_eq!(collector.pump(), 4);

        assert!(impact.try_recv().is_ok());
        assert!(impact.try_recv().is_err());
        assert_eq!(collector.state(), SessionState::Landed);
    }

    #[test]
    fn test_no_freefall_no_notification() {
        let mut source = MockMotionSource::new();
        for _ in 0..6 {
            source.push_shake(16.0);
        }

        let mut collector = deterministic_collector(source);
        let impact = collector.subscribe_impact();

        collector.start_session().unwrap();
        collector.pump();

        assert!(impact.try_recv().is_err());
        assert_eq!(collector.state(), SessionState::Shaking);
    }

    #[test]
    fn test_dropped_receiver_is_pruned() {
        let mut source = MockMotionSource::new();
        source.push_freefall();
        source.push_impact(25.0);

        let mut collector = deterministic_collector(source);
        let kept = collector.subscribe_impact();
        let dropped = collector.subscribe_impact();
        drop(dropped);

        collector.start_session().unwrap();
        collector.pump();

        assert!(kept.try_recv().is_ok());
        assert_eq!(collector.impact_listeners.len(), 1);
    }

    #[test]
    fn test_fallback_distribution_covers_range() {
        let mut collector = deterministic_collector(MockMotionSource::new());
        let mut seen = [false; 256];

        for _ in 0..10_000 {
            collector.start_session().unwrap();
            let seed = collector.stop_and_cast();
            seen[seed.value() as usize] = true;
        }
        assert!(seen.iter().all(|&hit| hit));
    }

    #[test]
    fn test_jitter_is_deterministic_under_injected_rng() {
        let config = CastConfig {
            jitter_amplitude: 0.5,
            ..Default::default()
        };
        let mut collector = EntropyCollector::with_fallback_rng(
            MockMotionSource::new(),
            config.clone(),
            FallbackRng::from_seed([1u8; 32]),
        );
        collector.start_session().unwrap();

        for _ in 0..3 {
            collector.ingest(&unit_reading());
        }

        // Replay the same draws to predict the perturbed chaos sum.
        let mut replay = FallbackRng::from_seed([1u8; 32]);
        let weighted: Vec<f64> = (0..3).map(|_| 1.0 + replay.jitter(0.5)).collect();
        let expected = Seed::from_samples(&weighted, config.chaos_scale).unwrap();

        assert_eq!(collector.stop_and_cast(), expected);
    }
}
