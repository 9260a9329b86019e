//! Evenly spaced sample offsets for sparse acquisition

use crate::{Error, Result};
use tracing::debug;

/// Block-aligned read offsets spread evenly across a file.
///
/// The file size is first rounded up to a whole number of blocks. Offsets
/// start at 0 and advance by `floor(rounded_size / samples)` while they stay
/// strictly below the rounded size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePlan {
    requested: u64,
    block_size: u64,
    rounded_size: u64,
    step: u64,
}

impl SamplePlan {
    /// Plan `samples` reads of `block_size` bytes over a file of `file_size`
    /// bytes.
    ///
    /// Fails when samples would be less than one block apart.
    pub fn new(file_size: u64, samples: u64, block_size: u64) -> Result<Self> {
        if samples == 0 {
            return Err(Error::ZeroSamples);
        }

        let block_size = block_size.max(1);
        let rounded_size = file_size.div_ceil(block_size) * block_size;

        if rounded_size < block_size.saturating_mul(samples) {
            return Err(Error::SampleSizeTooLarge {
                spacing: rounded_size as f64 / samples as f64,
                minimum: block_size,
            });
        }

        let step = rounded_size / samples;
        debug!(
            "Sampling {} blocks of {} bytes every {} bytes over {} bytes",
            samples, block_size, step, rounded_size
        );

        Ok(Self {
            requested: samples,
            block_size,
            rounded_size,
            step,
        })
    }

    /// Number of samples asked for
    pub fn requested(&self) -> u64 {
        self.requested
    }

    pub fn block_size(&self) -> u64 {
        self.block_size
    }

    /// File size rounded up to a multiple of the block size
    pub fn rounded_size(&self) -> u64 {
        self.rounded_size
    }

    /// Distance between consecutive offsets
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Number of offsets the plan produces.
    ///
    /// Truncating the step can leave room for one offset more than requested.
    pub fn len(&self) -> u64 {
        self.rounded_size.div_ceil(self.step)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read offsets in ascending order
    pub fn offsets(&self) -> impl Iterator<Item = u64> {
        let step = self.step;
        (0..self.len()).map(move |i| i * step)
    }
}
