//! Entropy collection and seed derivation.
//!
//! This module turns a stream of motion readings into a single 8-bit cast
//! seed: a session state machine tracks the shake/drop gesture, samples
//! accumulate as weighted magnitudes, and finalization reduces them (or a
//! fallback draw) into a [`Seed`].

mod collector;
mod config;
mod fallback;
mod seed;
mod session;

pub use collector::{CastError, EntropyCollector, ImpactNotice};
pub use config::{CastConfig, ConfigError, DemoConfig, FileConfig};
pub use fallback::FallbackRng;
pub use seed::Seed;
pub use session::{Session, SessionState};
