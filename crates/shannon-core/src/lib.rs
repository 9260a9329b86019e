//! Shannon - byte-level entropy estimation for files
//!
//! This library builds a 256-bucket byte histogram from a file, either by
//! scanning every block or by sampling evenly spaced blocks, and computes the
//! Shannon entropy of the resulting distribution in bits per byte.

pub mod classify;
pub mod config;
pub mod error;
pub mod estimator;
pub mod histogram;
pub mod number;
pub mod progress;
pub mod report;
pub mod sample;

pub use error::{Error, Result};

// Re-export commonly used types
pub use classify::{classify, is_virtually_random, Randomness, RANDOM_THRESHOLD};
pub use estimator::{EntropyEstimator, DEFAULT_BLOCK_SIZE, MAX_BLOCK_SIZE};
pub use histogram::Histogram;
pub use number::parse_number;
pub use progress::{NoProgress, ProgressCallback, ProgressReporter};
pub use report::{format_ratio, AcquisitionMode, EntropyReport};
pub use sample::SamplePlan;
