//! Byte patterns with predictable entropy

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// `len` copies of one byte (entropy 0)
pub fn repeated_byte(byte: u8, len: usize) -> Vec<u8> {
    vec![byte; len]
}

/// 0, 1, ..., 255, 0, 1, ... (entropy 8 when `len` is a multiple of 256)
pub fn byte_cycle(len: usize) -> Vec<u8> {
    (0..len).map(|i| i as u8).collect()
}

/// Seeded pseudo-random bytes (entropy close to 8 for large `len`)
pub fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut data = vec![0u8; len];
    StdRng::seed_from_u64(seed).fill_bytes(&mut data);
    data
}

/// Repeated English prose (entropy around 4)
pub fn text_bytes(len: usize) -> Vec<u8> {
    const TEXT: &[u8] = b"The quick brown fox jumps over the lazy dog while the \
        archivist counts every byte twice.\n";
    TEXT.iter().copied().cycle().take(len).collect()
}
