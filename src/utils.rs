// ============================================================================
// FILE: src/utils.rs
// ============================================================================

//! Utility functions used across the library.

use std::num::NonZeroUsize;

/// XORs `mask` into `block` in place.
///
/// Used by the CBC decryption path to undo chaining: `block` holds the raw
/// block-cipher output and `mask` the previous ciphertext block (or the IV).
///
/// # Panics (by contract)
///
/// Panics if `mask.len() < block.len()`. Callers always pass slices of the
/// cipher's block size.
#[inline(always)]
pub fn xor_blocks(block: &mut [u8], mask: &[u8]) {
    let n = block.len();
    for (byte, m) in block.iter_mut().zip(&mask[..n]) {
        *byte ^= m;
    }
}

/// Number of concurrent oracle invocations used when the caller asks for `0`.
///
/// Falls back to `1` when the host cannot report its parallelism.
#[must_use]
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Maps a requested concurrency to an effective one (`0` → host default).
#[inline]
#[must_use]
pub fn effective_concurrency(requested: usize) -> usize {
    if requested == 0 {
        default_concurrency()
    } else {
        requested
    }
}
