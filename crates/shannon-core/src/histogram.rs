//! Byte-frequency histogram and the Shannon entropy of its distribution

/// Running count of every byte value observed so far.
///
/// The sum of all buckets always equals [`Histogram::total_bytes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; 256],
    total: u64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    /// Create an empty histogram
    pub fn new() -> Self {
        Self {
            counts: [0; 256],
            total: 0,
        }
    }

    /// Count every byte of `chunk`. An empty chunk changes nothing.
    pub fn update(&mut self, chunk: &[u8]) {
        for &byte in chunk {
            self.counts[byte as usize] += 1;
        }
        self.total += chunk.len() as u64;
    }

    /// Total number of bytes observed
    pub fn total_bytes(&self) -> u64 {
        self.total
    }

    /// Occurrences of a single byte value
    pub fn count(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// All 256 buckets, indexed by byte value
    pub fn counts(&self) -> &[u64; 256] {
        &self.counts
    }

    /// Number of distinct byte values seen
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// Shannon entropy in bits per byte, in `[0, 8]`.
    ///
    /// Returns 0 when nothing has been observed.
    pub fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }

        let inv_total = 1.0 / self.total as f64;
        let entropy: f64 = self
            .counts
            .iter()
            .filter(|&&count| count > 0)
            .map(|&count| {
                let p = count as f64 * inv_total;
                p * p.log2()
            })
            .sum();

        // A single populated bucket sums to -0.0
        if entropy == 0.0 {
            0.0
        } else {
            -entropy
        }
    }
}
