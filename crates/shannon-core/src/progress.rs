//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Observer notified while a file is being read.
///
/// Implementations must not influence what gets read; they are called
/// synchronously after each block or sample.
pub trait ProgressCallback {
    /// Called once before the first block, with the expected number of steps
    fn start(&mut self, label: &str, total: u64);

    /// Called after each processed block or sample
    fn advance(&mut self, delta: u64);

    /// Called once after the last block
    fn finish(&mut self);
}

/// No-op progress callback
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn start(&mut self, _label: &str, _total: u64) {}
    fn advance(&mut self, _delta: u64) {}
    fn finish(&mut self) {}
}

/// Terminal progress bar backed by `indicatif`
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter. A disabled reporter draws nothing.
    pub fn new(enabled: bool) -> Self {
        Self { bar: None, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl ProgressCallback for ProgressReporter {
    fn start(&mut self, label: &str, total: u64) {
        if !self.enabled {
            return;
        }

        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, {eta})",
        ) {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar.set_message(label.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    fn advance(&mut self, delta: u64) {
        if let Some(bar) = &self.bar {
            bar.inc(delta);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.finish();
    }
}
