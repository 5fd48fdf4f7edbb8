// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use rolling_collide::model::hash::{extend, HashValue};
use rolling_collide::model::Alphabet;

/// Six codes whose differences include 1, 8, 28, 56 and 70.
pub const CONSTRUCTED_ALPHABET: &str = "!\")=Yg";

/// Reference string of the constructed collision.
pub const CONSTRUCTED_REFERENCE: &[u8] = b"!)!Y!Y!)!!!!";

/// The reference plus the 8th difference pattern (1, -8, 28, -56, 70, -56, 28, -8, 1).
///
/// Since (257 - 1)^8 = 2^64 the pattern adds nothing to the hash.
pub const CONSTRUCTED_ALTERNATE: &[u8] = b"\"!=!g!=!\"!!!";

pub fn alphabet(codes: &str) -> Alphabet {
    codes.parse().unwrap()
}

/// Every string of `len` codes over `alphabet` whose hash is `target`,
/// each followed by `suffix`, in lexicographic alphabet order.
pub fn brute_force(alphabet: &Alphabet, len: usize, suffix: &[u8], target: HashValue) -> Vec<Vec<u8>> {
    let mut found = Vec::new();
    let mut prefix = Vec::with_capacity(len + suffix.len());
    descend(alphabet, len, suffix, target, 0, &mut prefix, &mut found);
    found
}

fn descend(
    alphabet: &Alphabet,
    len: usize,
    suffix: &[u8],
    target: HashValue,
    hash: HashValue,
    prefix: &mut Vec<u8>,
    found: &mut Vec<Vec<u8>>,
) {
    if prefix.len() == len {
        let full = suffix.iter().fold(hash, |h, &c| extend(h, c));
        if full == target {
            let mut text = prefix.clone();
            text.extend_from_slice(suffix);
            found.push(text);
        }
        return;
    }
    for &code in alphabet.codes() {
        prefix.push(code);
        descend(alphabet, len, suffix, target, extend(hash, code), prefix, found);
        prefix.pop();
    }
}

/// Every string of `len` codes over `alphabet`.
pub fn all_strings(alphabet: &Alphabet, len: usize) -> Vec<Vec<u8>> {
    let mut strings = vec![Vec::new()];
    for _ in 0..len {
        strings = strings
            .into_iter()
            .flat_map(|s| {
                alphabet.codes().iter().map(move |&c| {
                    let mut t = s.clone();
                    t.push(c);
                    t
                })
            })
            .collect();
    }
    strings
}
