// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Compile-time constants for the rolling hash and the collision search.
//!
//! The hash under attack is
//!
//! ```text
//! h(-1) := 0
//! h(n)  := h(n-1) * 257 + c(n)      (mod 2^64)
//! ```
//!
//! A target string is assembled from [`BLOCKS`] blocks of equal length, so the
//! total length is always `BLOCKS * block_len` (12 for the default block length).

/// Multiplier of the rolling hash.
pub const BASE: u64 = 257;

/// Number of blocks joined by the meet-in-the-middle search.
pub const BLOCKS: usize = 4;

/// Default length of one block.
///
/// The suffix table holds `|alphabet|^block_len` entries and the join loops over
/// it, so this is kept small.
pub const DEFAULT_BLOCK_LEN: usize = 3;

/// Largest supported block length.
pub const MAX_BLOCK_LEN: usize = 4;

/// Largest meaningful number of coefficient rows.
///
/// Row `r` carries weight `256^r`; for `r >= 8` that is a multiple of 2^64,
/// so those rows vanish from the hash.
pub const MAX_ROWS: usize = 8;

/// Default number of coefficient rows.
pub const DEFAULT_ROWS: usize = MAX_ROWS;

/// Characters candidate strings are drawn from.
pub const DEFAULT_ALPHABET: &str = concat!(
    "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz",
    "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~"
);

/// Characters the random reference string is drawn from.
pub const DEFAULT_REFERENCE_ALPHABET: &str =
    "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Binomial coefficient (n choose k) at compile time.
///
/// Uses the multiplicative form so intermediate values stay small.
pub const fn choose(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = if k > n - k { n - k } else { k };
    let mut result: u64 = 1;
    let mut i = 0;
    while i < k {
        result = result * (n - i) as u64 / (i + 1) as u64;
        i += 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose() {
        assert_eq!(choose(0, 0), 1);
        assert_eq!(choose(5, 0), 1);
        assert_eq!(choose(5, 5), 1);
        assert_eq!(choose(11, 1), 11);
        assert_eq!(choose(11, 2), 55);
        assert_eq!(choose(11, 7), 330);
        assert_eq!(choose(3, 4), 0);
    }

    #[test]
    fn test_alphabet_sizes() {
        assert_eq!(DEFAULT_ALPHABET.len(), 94);
        assert_eq!(DEFAULT_REFERENCE_ALPHABET.len(), 62);
    }
}
