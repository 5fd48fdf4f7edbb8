// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Table of every fixed-width block over an alphabet, keyed by hash.
//!
//! # Construction
//!
//! Blocks are enumerated with an odometer over alphabet indices, last position
//! fastest, so the table iterates in the same lexicographic order on every run.
//! When two blocks share a hash only the first is kept: the search only needs
//! to know that some block reaches a value.
//!
//! # Memory
//!
//! `|alphabet|^block_len` entries: 830,584 for the default 94 characters and
//! block length 3, stored as one flat byte buffer plus a hash index.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::{info, trace};

use crate::model::hash::{base_power, rolling_hash, HashValue};
use crate::model::Alphabet;

/// Immutable mapping from block hash to one block with that hash.
#[derive(Debug, Clone)]
pub struct SuffixTable {
    block_len: usize,
    hashes: Vec<HashValue>,
    blocks: Vec<u8>,
    index: HashMap<HashValue, usize>,
    min_hash: HashValue,
    max_hash: HashValue,
}

impl SuffixTable {
    /// Enumerate all `|alphabet|^block_len` blocks and index them by hash.
    pub fn build(alphabet: &Alphabet, block_len: usize) -> Self {
        assert!(block_len > 0, "block length must be positive");
        let capacity = alphabet.len().pow(block_len as u32);
        info!(
            "Building suffix table: {} blocks of length {}",
            capacity, block_len
        );

        let mut hashes = Vec::with_capacity(capacity);
        let mut blocks = Vec::with_capacity(capacity * block_len);
        let mut index = HashMap::with_capacity(capacity);
        let mut min_hash = HashValue::MAX;
        let mut max_hash = HashValue::MIN;

        let mut odometer = vec![0usize; block_len];
        let mut block = vec![alphabet.code(0); block_len];
        loop {
            let hash = rolling_hash(&block);
            min_hash = min_hash.min(hash);
            max_hash = max_hash.max(hash);
            if let Entry::Vacant(entry) = index.entry(hash) {
                entry.insert(hashes.len());
                hashes.push(hash);
                blocks.extend_from_slice(&block);
            }

            // Advance the odometer; positions that roll over reset to the first code.
            let mut position = block_len;
            loop {
                if position == 0 {
                    info!(
                        "Suffix table complete: {} entries, hashes {}..{}",
                        hashes.len(),
                        min_hash,
                        max_hash
                    );
                    return Self {
                        block_len,
                        hashes,
                        blocks,
                        index,
                        min_hash,
                        max_hash,
                    };
                }
                position -= 1;
                odometer[position] += 1;
                if odometer[position] < alphabet.len() {
                    block[position] = alphabet.code(odometer[position]);
                    break;
                }
                odometer[position] = 0;
                block[position] = alphabet.code(0);
            }
            // A carry opened a new short prefix.
            if position + 2 < block_len {
                trace!("{}", String::from_utf8_lossy(&block[..=position]));
            }
        }
    }

    pub fn block_len(&self) -> usize {
        self.block_len
    }

    /// Number of distinct hashes.
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn min_hash(&self) -> HashValue {
        self.min_hash
    }

    pub fn max_hash(&self) -> HashValue {
        self.max_hash
    }

    /// Hash of entry `i`.
    #[inline]
    pub fn hash_at(&self, i: usize) -> HashValue {
        self.hashes[i]
    }

    /// Block of entry `i`.
    #[inline]
    pub fn block_at(&self, i: usize) -> &[u8] {
        &self.blocks[i * self.block_len..(i + 1) * self.block_len]
    }

    /// A block hashing to `hash`, if any.
    #[inline]
    pub fn get(&self, hash: HashValue) -> Option<&[u8]> {
        self.index.get(&hash).map(|&i| self.block_at(i))
    }

    /// All entries in enumeration order.
    pub fn entries(&self) -> impl Iterator<Item = (HashValue, &[u8])> + '_ {
        (0..self.len()).map(move |i| (self.hash_at(i), self.block_at(i)))
    }

    /// Range of the hash of two adjacent blocks: `[min·BASE^B + min, max·BASE^B + max]`,
    /// reduced modulo 2^64.
    ///
    /// With high codes and long blocks the upper end passes 2^64, and then
    /// `hi < lo`: the range wraps around zero. Test membership with
    /// `value - lo <= hi - lo` in wrapping arithmetic. `None` when the range
    /// is wide enough to hold every 64-bit value.
    pub fn pair_range(&self) -> Option<(HashValue, HashValue)> {
        let scale = u128::from(base_power(self.block_len)) + 1;
        let lo = u128::from(self.min_hash) * scale;
        let hi = u128::from(self.max_hash) * scale;
        if hi - lo > u128::from(HashValue::MAX) {
            return None;
        }
        Some((lo as HashValue, hi as HashValue))
    }
}
