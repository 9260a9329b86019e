//! Run summary and output formatting

use crate::classify::{classify, Randomness};
use crate::estimator::EntropyEstimator;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How bytes were gathered from the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AcquisitionMode {
    /// Every block of the file
    Full,
    /// Evenly spaced blocks
    Sparse { samples: u64 },
}

/// Result of one entropy run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntropyReport {
    pub path: PathBuf,
    pub acquisition: AcquisitionMode,
    pub block_size: usize,
    pub bytes_observed: u64,
    pub distinct_bytes: usize,
    pub entropy: f64,
    pub verdict: Randomness,
}

impl EntropyReport {
    /// Summarize the current state of an estimator
    pub fn from_estimator<P: AsRef<Path>>(
        path: P,
        acquisition: AcquisitionMode,
        estimator: &EntropyEstimator,
    ) -> Self {
        let entropy = estimator.entropy();
        Self {
            path: path.as_ref().to_path_buf(),
            acquisition,
            block_size: estimator.block_size(),
            bytes_observed: estimator.total_bytes(),
            distinct_bytes: estimator.histogram().distinct(),
            entropy,
            verdict: classify(entropy),
        }
    }

    /// `<entropy>/8` as shown to users
    pub fn ratio(&self) -> String {
        format_ratio(self.entropy)
    }
}

/// Format entropy with five decimals, dropping trailing zeros and a trailing
/// point, followed by `/8`.
pub fn format_ratio(entropy: f64) -> String {
    let fixed = format!("{:.5}", entropy);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{}/8", trimmed)
}
