//! File entropy estimation by full scan or sparse sampling

use crate::histogram::Histogram;
use crate::progress::ProgressCallback;
use crate::report::AcquisitionMode;
use crate::sample::SamplePlan;
use crate::Result;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::debug;

/// Bytes read per I/O operation (4KB)
pub const DEFAULT_BLOCK_SIZE: usize = 4096;

/// Largest accepted block size (64MB); one block is buffered in memory
pub const MAX_BLOCK_SIZE: usize = 64 * 1024 * 1024;

/// Accumulates a byte histogram from one or more files and reports its
/// entropy.
///
/// One estimator serves one logical run: every acquisition adds to the same
/// histogram.
#[derive(Debug, Clone)]
pub struct EntropyEstimator {
    histogram: Histogram,
    block_size: usize,
}

impl Default for EntropyEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropyEstimator {
    /// Create an estimator reading [`DEFAULT_BLOCK_SIZE`] bytes at a time
    pub fn new() -> Self {
        Self::with_block_size(DEFAULT_BLOCK_SIZE)
    }

    /// Create an estimator with a custom block size, clamped to
    /// `1..=MAX_BLOCK_SIZE`
    pub fn with_block_size(block_size: usize) -> Self {
        Self {
            histogram: Histogram::new(),
            block_size: block_size.clamp(1, MAX_BLOCK_SIZE),
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    pub fn total_bytes(&self) -> u64 {
        self.histogram.total_bytes()
    }

    /// Feed a chunk of bytes into the histogram
    pub fn update(&mut self, chunk: &[u8]) {
        self.histogram.update(chunk);
    }

    /// Entropy of everything observed so far, in bits per byte
    pub fn entropy(&self) -> f64 {
        self.histogram.entropy()
    }

    /// Acquire `path` with the given mode and return the resulting entropy
    pub fn estimate<P: AsRef<Path>>(
        &mut self,
        path: P,
        mode: AcquisitionMode,
        progress: &mut dyn ProgressCallback,
    ) -> Result<f64> {
        match mode {
            AcquisitionMode::Full => self.scan_file(path, progress),
            AcquisitionMode::Sparse { samples } => self.sample_file(path, samples, progress),
        }
    }

    /// Read the whole file block by block
    pub fn scan_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        progress: &mut dyn ProgressCallback,
    ) -> Result<f64> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        let file_size = file.metadata()?.len();
        let blocks = file_size.div_ceil(self.block_size as u64);

        debug!(
            "Scanning {:?}: {} bytes in {} blocks",
            path.file_name().unwrap_or_default(),
            file_size,
            blocks
        );

        progress.start("Scanning file", blocks);
        let mut buffer = vec![0u8; self.block_size];
        loop {
            let bytes_read = read_block(&mut file, &mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            self.histogram.update(&buffer[..bytes_read]);
            progress.advance(1);
        }
        progress.finish();

        Ok(self.entropy())
    }

    /// Read `samples` evenly spaced blocks of the file
    pub fn sample_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        samples: u64,
        progress: &mut dyn ProgressCallback,
    ) -> Result<f64> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        let file_size = file.metadata()?.len();
        let plan = SamplePlan::new(file_size, samples, self.block_size as u64)?;

        debug!(
            "Sampling {:?}: {} bytes, {} samples",
            path.file_name().unwrap_or_default(),
            file_size,
            plan.len()
        );

        progress.start("Sampling file", plan.requested());
        let mut buffer = vec![0u8; self.block_size];
        for offset in plan.offsets() {
            file.seek(SeekFrom::Start(offset))?;
            let bytes_read = read_block(&mut file, &mut buffer)?;
            self.histogram.update(&buffer[..bytes_read]);
            progress.advance(1);
        }
        progress.finish();

        Ok(self.entropy())
    }
}

/// Fill `buf` from `reader`, stopping early only at end of file
fn read_block<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoProgress;
    use crate::Error;
    use shannon_testing::{assertions::assert_entropy_close, fixtures, TestDir};

    #[derive(Default)]
    struct RecordingProgress {
        label: String,
        total: u64,
        steps: u64,
        finished: bool,
    }

    impl ProgressCallback for RecordingProgress {
        fn start(&mut self, label: &str, total: u64) {
            self.label = label.to_string();
            self.total = total;
        }

        fn advance(&mut self, delta: u64) {
            self.steps += delta;
        }

        fn finish(&mut self) {
            self.finished = true;
        }
    }

    /// Reader that hands out at most three bytes per call
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = buf.len().min(3).min(self.0.len());
            buf[..n].copy_from_slice(&self.0[..n]);
            self.0 = &self.0[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_read_block_fills_short_reads() {
        let data = [7u8; 10];
        let mut reader = Trickle(&data);
        let mut buf = [0u8; 8];
        assert_eq!(read_block(&mut reader, &mut buf).unwrap(), 8);
        assert_eq!(read_block(&mut reader, &mut buf).unwrap(), 2);
        assert_eq!(read_block(&mut reader, &mut buf).unwrap(), 0);
    }

    #[test]
    fn test_scan_empty_file() {
        let test_dir = TestDir::new().unwrap();
        let path = test_dir.create_file("empty.bin", b"").unwrap();

        let mut estimator = EntropyEstimator::new();
        let mut progress = RecordingProgress::default();
        let entropy = estimator.scan_file(&path, &mut progress).unwrap();

        assert_eq!(entropy, 0.0);
        assert_eq!(estimator.total_bytes(), 0);
        assert_eq!(progress.total, 0);
        assert!(progress.finished);
    }

    #[test]
    fn test_scan_repeated_byte() {
        let test_dir = TestDir::new().unwrap();
        let path = test_dir
            .create_file(
                "zeros.bin",
                &fixtures::repeated_byte(0x00, 3 * DEFAULT_BLOCK_SIZE + 17),
            )
            .unwrap();

        let mut estimator = EntropyEstimator::new();
        let entropy = estimator.scan_file(&path, &mut NoProgress).unwrap();
        assert_eq!(entropy, 0.0);
        assert_eq!(estimator.total_bytes(), 3 * DEFAULT_BLOCK_SIZE as u64 + 17);
    }

    #[test]
    fn test_scan_counts_short_final_block() {
        let test_dir = TestDir::new().unwrap();
        let len = 2 * DEFAULT_BLOCK_SIZE + 100;
        let path = test_dir
            .create_file("cycle.bin", &fixtures::byte_cycle(len))
            .unwrap();

        let mut estimator = EntropyEstimator::new();
        let mut progress = RecordingProgress::default();
        estimator.scan_file(&path, &mut progress).unwrap();

        assert_eq!(estimator.total_bytes(), len as u64);
        assert_eq!(progress.label, "Scanning file");
        assert_eq!(progress.total, 3);
        assert_eq!(progress.steps, 3);
    }

    #[test]
    fn test_scan_uniform_file_is_eight() {
        let test_dir = TestDir::new().unwrap();
        let path = test_dir
            .create_file("uniform.bin", &fixtures::byte_cycle(256 * 64))
            .unwrap();

        let mut estimator = EntropyEstimator::new();
        let entropy = estimator.scan_file(&path, &mut NoProgress).unwrap();
        assert_entropy_close(entropy, 8.0, 1e-9);
    }

    #[test]
    fn test_scan_random_megabyte() {
        let test_dir = TestDir::new().unwrap();
        let path = test_dir
            .create_file("random.bin", &fixtures::random_bytes(1024 * 1024, 0x5eed))
            .unwrap();

        let mut estimator = EntropyEstimator::new();
        let entropy = estimator.scan_file(&path, &mut NoProgress).unwrap();
        assert_entropy_close(entropy, 8.0, 0.01);
    }

    #[test]
    fn test_scan_missing_file() {
        let test_dir = TestDir::new().unwrap();
        let mut estimator = EntropyEstimator::new();
        let result = estimator.scan_file(test_dir.path().join("missing.bin"), &mut NoProgress);
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_sample_matches_full_scan_when_exhaustive() {
        let test_dir = TestDir::new().unwrap();
        let blocks = 64;
        let path = test_dir
            .create_file("text.bin", &fixtures::text_bytes(blocks * DEFAULT_BLOCK_SIZE))
            .unwrap();

        let mut full = EntropyEstimator::new();
        let full_entropy = full.scan_file(&path, &mut NoProgress).unwrap();

        let mut sparse = EntropyEstimator::new();
        let mut progress = RecordingProgress::default();
        let sparse_entropy = sparse
            .sample_file(&path, blocks as u64, &mut progress)
            .unwrap();

        assert_entropy_close(sparse_entropy, full_entropy, 1e-9);
        assert_eq!(sparse.histogram(), full.histogram());
        assert_eq!(progress.label, "Sampling file");
        assert_eq!(progress.total, blocks as u64);
        assert_eq!(progress.steps, blocks as u64);
    }

    #[test]
    fn test_sample_offset_past_end_of_file() {
        let test_dir = TestDir::new().unwrap();
        // Rounded to 24576 bytes, step 4915: the last offset 24575 is past EOF
        let len = 5 * DEFAULT_BLOCK_SIZE + 1;
        let path = test_dir
            .create_file("tail.bin", &fixtures::byte_cycle(len))
            .unwrap();

        let mut estimator = EntropyEstimator::new();
        let mut progress = RecordingProgress::default();
        estimator.sample_file(&path, 5, &mut progress).unwrap();

        // Four full blocks, 821 bytes from offset 19660, nothing from 24575
        let expected = 4 * DEFAULT_BLOCK_SIZE as u64 + (len as u64 - 19660);
        assert_eq!(estimator.total_bytes(), expected);
        assert_eq!(progress.total, 5);
        assert_eq!(progress.steps, 6);
        assert!(progress.finished);
    }

    #[test]
    fn test_block_size_clamped() {
        assert_eq!(EntropyEstimator::with_block_size(0).block_size(), 1);
        assert_eq!(
            EntropyEstimator::with_block_size(usize::MAX).block_size(),
            MAX_BLOCK_SIZE
        );
    }

    #[test]
    fn test_sample_reads_only_planned_blocks() {
        let test_dir = TestDir::new().unwrap();
        // Four blocks: 'a', 'b', 'c', 'd'
        let mut data = Vec::new();
        for byte in [b'a', b'b', b'c', b'd'] {
            data.extend(fixtures::repeated_byte(byte, DEFAULT_BLOCK_SIZE));
        }
        let path = test_dir.create_file("blocks.bin", &data).unwrap();

        let mut estimator = EntropyEstimator::new();
        let entropy = estimator.sample_file(&path, 2, &mut NoProgress).unwrap();

        assert_eq!(estimator.histogram().count(b'a'), DEFAULT_BLOCK_SIZE as u64);
        assert_eq!(estimator.histogram().count(b'c'), DEFAULT_BLOCK_SIZE as u64);
        assert_eq!(estimator.histogram().count(b'b'), 0);
        assert_eq!(estimator.histogram().count(b'd'), 0);
        assert_entropy_close(entropy, 1.0, 1e-12);
    }

    #[test]
    fn test_sample_short_final_block() {
        let test_dir = TestDir::new().unwrap();
        let len = DEFAULT_BLOCK_SIZE + 10;
        let path = test_dir
            .create_file("short.bin", &fixtures::repeated_byte(0xAB, len))
            .unwrap();

        let mut estimator = EntropyEstimator::new();
        estimator.sample_file(&path, 2, &mut NoProgress).unwrap();
        assert_eq!(estimator.total_bytes(), len as u64);
    }

    #[test]
    fn test_sample_too_many_samples() {
        let test_dir = TestDir::new().unwrap();
        let path = test_dir
            .create_file("small.bin", &fixtures::byte_cycle(4 * DEFAULT_BLOCK_SIZE))
            .unwrap();

        let mut estimator = EntropyEstimator::new();
        let err = estimator
            .sample_file(&path, 8, &mut NoProgress)
            .unwrap_err();
        assert!(err.to_string().contains("only 2048 bytes between samples"));
        assert_eq!(estimator.total_bytes(), 0);
    }

    #[test]
    fn test_custom_block_size() {
        let test_dir = TestDir::new().unwrap();
        let path = test_dir
            .create_file("cycle.bin", &fixtures::byte_cycle(1000))
            .unwrap();

        let mut estimator = EntropyEstimator::with_block_size(100);
        let mut progress = RecordingProgress::default();
        estimator.scan_file(&path, &mut progress).unwrap();
        assert_eq!(progress.total, 10);

        let mut sparse = EntropyEstimator::with_block_size(100);
        let err = sparse.sample_file(&path, 11, &mut NoProgress).unwrap_err();
        assert!(err.to_string().contains("Needs at least 100 bytes"));
    }

    #[test]
    fn test_same_chunks_same_result() {
        let chunks: [&[u8]; 3] = [b"hello", b"", b"entropy world"];

        let mut first = EntropyEstimator::new();
        let mut second = EntropyEstimator::new();
        for chunk in chunks {
            first.update(chunk);
            second.update(chunk);
        }

        assert_eq!(first.histogram(), second.histogram());
        assert_eq!(first.entropy(), second.entropy());
    }

    #[test]
    fn test_estimate_dispatches_on_mode() {
        let test_dir = TestDir::new().unwrap();
        let path = test_dir
            .create_file("cycle.bin", &fixtures::byte_cycle(8 * DEFAULT_BLOCK_SIZE))
            .unwrap();

        let mut estimator = EntropyEstimator::new();
        estimator
            .estimate(&path, AcquisitionMode::Sparse { samples: 2 }, &mut NoProgress)
            .unwrap();
        assert_eq!(estimator.total_bytes(), 2 * DEFAULT_BLOCK_SIZE as u64);
    }
}
