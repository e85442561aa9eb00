//! Seed to sign-descriptor mapping.
//!
//! Pure, deterministic, side-effect-free: a seed renders as an 8-bit
//! binary signature, splits into two 4-bit legs, and resolves to a named
//! sign with per-leg open/closed visual patterns.

use super::table::{apola_for, UNKNOWN_NAME};
use crate::cast::Seed;
use serde::{Deserialize, Serialize};

/// Visual state of one leg position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegMark {
    /// Bit 1: the seed shows its open face.
    Open,
    /// Bit 0: the seed shows its closed face.
    Closed,
}

/// A fully resolved divination sign.
///
/// Derived deterministically from a seed and immutable once produced.
/// Serializes for the downstream verse-content layer, which matches on
/// `index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignDescriptor {
    /// The reduced seed, 0 through 255. Zero is a valid, distinguished
    /// index.
    pub index: u8,
    /// 8-character binary rendering of the index.
    pub binary_signature: String,
    /// Composed sign name.
    pub name: String,
    /// Right leg, first four bits in left-to-right order.
    pub right_leg: [LegMark; 4],
    /// Left leg, last four bits in left-to-right order.
    pub left_leg: [LegMark; 4],
}

impl SignDescriptor {
    /// Returns true for a doubled sign (both legs identical).
    pub fn is_meji(&self) -> bool {
        self.right_leg == self.left_leg
    }
}

/// Renders a value as an 8-character, left-zero-padded binary string.
///
/// The `u8` parameter carries the precondition: callers reduce modulo 256
/// first, this function does not.
pub fn to_binary(value: u8) -> String {
    format!("{value:08b}")
}

/// Maps a seed to its sign descriptor.
///
/// Never fails: seed construction already reduced the index into
/// [0, 255], and every 4-bit pattern has a canonical name (a miss would
/// resolve to the "Unknown" sentinel).
pub fn profile(seed: Seed) -> SignDescriptor {
    let index = seed.value();
    let binary = to_binary(index);
    let (right_bits, left_bits) = binary.split_at(4);

    let right = apola_for(right_bits);
    let left = apola_for(left_bits);
    let right_name = right.map_or(UNKNOWN_NAME, |apola| apola.name);
    let left_name = left.map_or(UNKNOWN_NAME, |apola| apola.name);

    let name = if right_bits == left_bits {
        if right.is_some_and(|apola| apola.rank == 1) {
            "Eji Ogbe".to_string()
        } else {
            format!("{right_name} Meji")
        }
    } else {
        format!("{right_name}-{left_name}")
    };

    SignDescriptor {
        index,
        right_leg: leg_marks(right_bits),
        left_leg: leg_marks(left_bits),
        binary_signature: binary,
        name,
    }
}

fn leg_marks(bits: &str) -> [LegMark; 4] {
    let mut marks = [LegMark::Closed; 4];
    for (mark, bit) in marks.iter_mut().zip(bits.chars()) {
        if bit == '1' {
            *mark = LegMark::Open;
        }
    }
    marks
}
