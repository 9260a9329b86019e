//! Parsing of human sample counts such as `10k` or `2m`

use crate::{Error, Result};

/// Parse a count with an optional decimal magnitude suffix.
///
/// The input must start with digits, optionally followed by one of
/// `k`, `m`, `g`/`b`, `t` (case-insensitive) for thousands, millions,
/// billions and trillions. Anything after that prefix is ignored, so
/// `"10kg"` is read as `10k`.
pub fn parse_number(num_str: &str) -> Result<u64> {
    let split_pos = num_str
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(num_str.len());

    if split_pos == 0 {
        return Err(Error::InvalidNumberFormat(num_str.to_string()));
    }

    let (digits, rest) = num_str.split_at(split_pos);
    let number: u64 = digits
        .parse()
        .map_err(|_| Error::InvalidNumberFormat(num_str.to_string()))?;

    let multiplier: u64 = match rest.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('k') => 1_000,
        Some('m') => 1_000_000,
        Some('g') | Some('b') => 1_000_000_000,
        Some('t') => 1_000_000_000_000,
        _ => 1,
    };

    number
        .checked_mul(multiplier)
        .ok_or_else(|| Error::InvalidNumberFormat(num_str.to_string()))
}
