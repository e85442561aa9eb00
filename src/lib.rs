//! Opele Cast Library
//!
//! Derives a pseudo-random 8-bit "cast" seed from ambient motion-sensor
//! noise (or an injectable fallback generator) and maps it to one of 256
//! divination signs via a 4-bit binary encoding.
//!
//! # Architecture
//!
//! The system follows an explicit data flow:
//!
//! ```text
//! sensor → session (gesture state machine) → seed → sign descriptor
//!                      ↓
//!            impact notification
//! ```
//!
//! # Design Principles
//!
//! - **Always casts**: finalization never fails; an empty session takes
//!   the fallback path and still yields a valid seed
//! - **Owned subscription**: the collector owns its motion source and
//!   releases it on finalize; sessions never leak a live listener
//! - **Injectable randomness**: the fallback generator is a constructor
//!   argument, never a hidden global, so the sensorless path is
//!   deterministically testable
//! - **No cryptographic claims**: the seed is an 8-bit modulo reduction
//!   of physical noise, suitable for divination, not for key material
//!
//! # Example
//!
//! ```
//! use opele_cast::{sign, EntropyCollector, MockMotionSource};
//!
//! // Script a shake-then-drop gesture on the mock sensor
//! let mut source = MockMotionSource::new();
//! source.push_shake(18.0);
//! source.push_freefall();
//! source.push_impact(25.0);
//!
//! let mut collector = EntropyCollector::new(source);
//! let impact = collector.subscribe_impact();
//!
//! collector.start_session().unwrap();
//! collector.pump();
//!
//! // The drop gesture signals "cast now"
//! assert!(impact.try_recv().is_ok());
//!
//! let seed = collector.stop_and_cast();
//! let descriptor = sign::profile(seed);
//! assert_eq!(descriptor.index, seed.value());
//! assert_eq!(descriptor.binary_signature.len(), 8);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod cast;
pub mod sensor;
pub mod sign;

// Re-export commonly used types at crate root
pub use cast::{
    CastConfig, CastError, EntropyCollector, FallbackRng, ImpactNotice, Seed, SessionState,
};
pub use sensor::{Axes, MockMotionSource, MotionReading, MotionSource, SensorError};
pub use sign::{LegMark, SignDescriptor};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
