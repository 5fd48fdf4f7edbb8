// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The rolling hash and its additive structure.
//!
//! All arithmetic wraps modulo 2^64, exactly as the native implementation does.
//! The search relies on the additivity of the hash:
//!
//! ```text
//! hash(a ++ b) = hash(a) * BASE^len(b) + hash(b)      (mod 2^64)
//! ```

use super::constants::BASE;

/// A hash value. Arithmetic on hash values is always wrapping.
pub type HashValue = u64;

/// Fold one more character code into a running hash.
#[inline]
pub fn extend(hash: HashValue, code: u8) -> HashValue {
    hash.wrapping_mul(BASE).wrapping_add(code as HashValue)
}

/// Rolling hash of a sequence of character codes.
///
/// # Example
///
/// ```
/// use rolling_collide::model::hash::rolling_hash;
///
/// assert_eq!(rolling_hash(b""), 0);
/// assert_eq!(rolling_hash(b"a"), 97);
/// assert_eq!(rolling_hash(b"ab"), 97 * 257 + 98);
/// ```
pub fn rolling_hash(codes: &[u8]) -> HashValue {
    codes.iter().fold(0, |hash, &code| extend(hash, code))
}

/// `BASE^n (mod 2^64)`.
pub fn base_power(n: usize) -> HashValue {
    (0..n).fold(1, |acc: HashValue, _| acc.wrapping_mul(BASE))
}

/// Position a block's hash `power` characters from the end of a longer string.
pub fn weighted_block_hash(block_hash: HashValue, power: usize) -> HashValue {
    block_hash.wrapping_mul(base_power(power))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(rolling_hash(b""), 0);
        assert_eq!(rolling_hash(b"a"), 97);
        assert_eq!(rolling_hash(b"ab"), 25027);
    }

    #[test]
    fn test_wraps_without_overflow() {
        // 257^11 exceeds 2^64, so a 12 character string exercises wrapping.
        let codes = [0xffu8; 12];
        let expected = codes
            .iter()
            .fold(0u128, |h, &c| (h * 257 + c as u128) % (1u128 << 64));
        assert_eq!(rolling_hash(&codes) as u128, expected);
    }

    #[test]
    fn test_base_power() {
        assert_eq!(base_power(0), 1);
        assert_eq!(base_power(3), 257 * 257 * 257);
        assert_eq!(base_power(9), base_power(3).wrapping_mul(base_power(6)));
    }

    #[test]
    fn test_additivity_on_split() {
        let text = b"0123456789ab";
        for split in 0..=text.len() {
            let (prefix, suffix) = text.split_at(split);
            let joined = weighted_block_hash(rolling_hash(prefix), suffix.len())
                .wrapping_add(rolling_hash(suffix));
            assert_eq!(joined, rolling_hash(text), "split at {}", split);
        }
    }

    #[test]
    fn test_additive_in_characters() {
        // hash("ab") = hash("a\0") + hash("\0b")
        assert_eq!(
            rolling_hash(b"ab"),
            rolling_hash(b"a\0").wrapping_add(rolling_hash(b"\0b"))
        );
    }
}
