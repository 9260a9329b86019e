//! Error types for shannon-core

use thiserror::Error;

/// Core error types for the shannon library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Sample count string does not start with digits, or is out of range
    #[error("Invalid number format: {0}")]
    InvalidNumberFormat(String),

    /// A sample count of zero was requested
    #[error("Sample count must be greater than zero")]
    ZeroSamples,

    /// Samples would be closer together than one block
    #[error(
        "Sample size is too large relative to file size, there are only {spacing:.0} bytes between samples. Needs at least {minimum} bytes between samples."
    )]
    SampleSizeTooLarge { spacing: f64, minimum: u64 },

    /// Configuration-related error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error was caused by bad user input rather than the
    /// environment. These are reported together with usage help.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidNumberFormat(_) | Error::ZeroSamples | Error::SampleSizeTooLarge { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_size_message() {
        let err = Error::SampleSizeTooLarge {
            spacing: 2048.0,
            minimum: 4096,
        };
        assert_eq!(
            err.to_string(),
            "Sample size is too large relative to file size, there are only 2048 bytes between samples. Needs at least 4096 bytes between samples."
        );
    }

    #[test]
    fn test_validation_kinds() {
        assert!(Error::ZeroSamples.is_validation());
        assert!(Error::InvalidNumberFormat("x".into()).is_validation());
        assert!(!Error::Config("bad".into()).is_validation());
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(!Error::from(io).is_validation());
    }
}
