//! Collection session state machine.
//!
//! A session accumulates weighted sample magnitudes in arrival order and
//! tracks the shake/drop gesture. The machine is monotonic: no transition
//! is reversible, and the only exit from `Falling` is `Landed`.

use super::config::CastConfig;

/// Gesture state of a collection session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session in progress.
    Idle,
    /// Collecting samples, no gesture detected yet.
    Listening,
    /// User acceleration exceeded the shake threshold.
    Shaking,
    /// Gravity-inclusive magnitude dropped below the freefall threshold.
    Falling,
    /// Impact detected after a fall; the drop gesture is complete.
    Landed,
}

/// A motion-sampling session.
///
/// Holds the ordered sample sequence; insertion order is the sample order,
/// which the weighted seed derivation depends on. Created idle; reset by
/// [`begin`](Session::begin); consumed and invalidated by
/// [`finalize`](Session::finalize).
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    samples: Vec<f64>,
    impact_emitted: bool,
}

impl Session {
    /// Creates an idle session with no samples.
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            samples: Vec::new(),
            impact_emitted: false,
        }
    }

    /// Resets the sample sequence and enters `Listening`.
    pub fn begin(&mut self) {
        self.samples.clear();
        self.impact_emitted = false;
        self.state = SessionState::Listening;
    }

    /// Returns true while a session is in progress.
    pub fn is_active(&self) -> bool {
        self.state != SessionState::Idle
    }

    /// Current gesture state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of samples accumulated so far.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Records one weighted sample and advances the gesture state machine.
    ///
    /// Returns true exactly once per session: on the sample that completes
    /// the drop gesture, falling into landed. Safe to call repeatedly from a
    /// stream of asynchronous notifications; a sample observed while idle
    /// is ignored.
    pub fn observe(&mut self, raw: f64, user: f64, weighted: f64, config: &CastConfig) -> bool {
        if self.state == SessionState::Idle {
            return false;
        }

        self.samples.push(weighted);

        match self.state {
            SessionState::Listening => {
                if user > config.shake_threshold {
                    self.state = SessionState::Shaking;
                    tracing::debug!(user, "shake detected");
                }
                // Freefall overrides a shake seen in the same sample.
                if raw < config.freefall_threshold {
                    self.state = SessionState::Falling;
                    tracing::debug!(raw, "freefall detected");
                }
            }
            SessionState::Shaking => {
                if raw < config.freefall_threshold {
                    self.state = SessionState::Falling;
                    tracing::debug!(raw, "freefall detected");
                }
            }
            SessionState::Falling => {
                if raw > config.impact_threshold {
                    self.state = SessionState::Landed;
                    if !self.impact_emitted {
                        self.impact_emitted = true;
                        tracing::debug!(raw, "impact detected");
                        return true;
                    }
                }
            }
            SessionState::Idle | SessionState::Landed => {}
        }

        false
    }

    /// Consumes the sample sequence and returns the session to idle.
    pub fn finalize(&mut self) -> Vec<f64> {
        self.state = SessionState::Idle;
        std::mem::take(&mut self.samples)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
