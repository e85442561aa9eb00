//! Binary sign mapping.
//!
//! Maps an 8-bit cast seed to one of 256 divination signs: the seed's
//! binary signature splits into two 4-bit legs, each leg resolves to a
//! canonical apola name, and the pair composes the full sign name with its
//! open/closed visual pattern.

mod mapper;
mod table;

pub use mapper::{profile, to_binary, LegMark, SignDescriptor};
pub use table::{apola_for, Apola, APOLA_TABLE, UNKNOWN_NAME};
