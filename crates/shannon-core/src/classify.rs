//! Randomness verdict for a computed entropy value

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum distance from 8 bits/byte for data to count as random.
///
/// A fixed empirical cut-off, not a statistically derived bound.
pub const RANDOM_THRESHOLD: f64 = 0.0001;

/// Maximum possible entropy of byte data
pub const MAX_ENTROPY: f64 = 8.0;

/// Verdict on whether data looks like random (or encrypted) bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Randomness {
    /// Within [`RANDOM_THRESHOLD`] of the maximum entropy
    VirtuallyRandom,
    /// Anything else
    NotRandom,
}

impl Randomness {
    pub fn is_random(self) -> bool {
        self == Randomness::VirtuallyRandom
    }
}

impl fmt::Display for Randomness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Randomness::VirtuallyRandom => write!(f, "File is (virtually) truly random"),
            Randomness::NotRandom => write!(f, "File is not truly random"),
        }
    }
}

/// True when `8 - entropy` is strictly below [`RANDOM_THRESHOLD`]
pub fn is_virtually_random(entropy: f64) -> bool {
    MAX_ENTROPY - entropy < RANDOM_THRESHOLD
}

/// Classify an entropy value
pub fn classify(entropy: f64) -> Randomness {
    if is_virtually_random(entropy) {
        Randomness::VirtuallyRandom
    } else {
        Randomness::NotRandom
    }
}
