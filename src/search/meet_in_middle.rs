// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Meet-in-the-middle block join.
//!
//! A target string of `4 * B` characters is cut into four blocks of `B`
//! characters. By additivity its hash is
//!
//! ```text
//! h(s0) * BASE^3B + h(s1) * BASE^2B + h(s2) * BASE^B + h(s3)      (mod 2^64)
//! ```
//!
//! The walk picks `s0`, `s1`, `s2` from the suffix table and looks the hash still
//! missing for `s3` up directly. Two range checks keep the join from being cubic:
//!
//! - after `s0, s1`: the last two blocks hash into `pair_range()`, so
//!   `target - p1` must too (skipped when that range holds every value);
//! - after `s0, s1, s2`: the last block hashes into `[min, max]`, so
//!   `target - p2` must too.
//!
//! The checks subtract modulo 2^64 before comparing, which is the same as
//! testing `p1 ∈ [target - hi, target - lo]` but stays exhaustive when that
//! interval wraps around zero.
//!
//! Root branches are the entries chosen for `s0`.

use std::ops::Range;
use std::sync::Arc;

use log::debug;

use super::{CollisionSearch, MismatchPolicy, Walk};
use crate::memo::SuffixTable;
use crate::model::constants::BLOCKS;
use crate::model::hash::{base_power, HashValue};
use crate::state::{Counters, Statistics};

/// Roots between progress reports.
const PROGRESS_INTERVAL: usize = 1000;

/// Block join over a shared suffix table.
#[derive(Debug, Clone)]
pub struct MeetInMiddle {
    table: Arc<SuffixTable>,
    target: HashValue,
    /// Weights of blocks 0, 1 and 2; block 3 has weight 1.
    weights: [HashValue; BLOCKS - 1],
    pair_range: Option<(HashValue, HashValue)>,
}

impl MeetInMiddle {
    pub fn new(table: Arc<SuffixTable>, target: HashValue) -> Self {
        let block_len = table.block_len();
        let weights = [
            base_power(3 * block_len),
            base_power(2 * block_len),
            base_power(block_len),
        ];
        let pair_range = table.pair_range();
        debug!(
            "Join target {}: two-block suffix in {:?}, last block in [{}, {}]",
            target,
            pair_range,
            table.min_hash(),
            table.max_hash()
        );
        Self {
            table,
            target,
            weights,
            pair_range,
        }
    }

    pub fn table(&self) -> &SuffixTable {
        &self.table
    }

    /// Length of every string the join produces.
    pub fn target_len(&self) -> usize {
        BLOCKS * self.table.block_len()
    }
}

impl CollisionSearch for MeetInMiddle {
    type Walk<'a> = JoinWalk<'a>;

    fn target(&self) -> HashValue {
        self.target
    }

    fn roots(&self) -> usize {
        self.table.len()
    }

    fn walk(&self, roots: Range<usize>) -> JoinWalk<'_> {
        JoinWalk {
            search: self,
            roots,
            cursor: Cursor::Root,
            statistics: Statistics::new(),
        }
    }

    fn mismatch_policy(&self) -> MismatchPolicy {
        MismatchPolicy::Fatal
    }

    fn name(&self) -> &str {
        "MeetInMiddle"
    }
}

/// Position of the join loops between calls to `next`.
#[derive(Debug, Clone, Copy)]
enum Cursor {
    /// Choose the next first block.
    Root,
    /// Scanning second blocks after first block `i0`.
    Pair { i0: usize, p0: HashValue, i1: usize },
    /// Scanning third blocks after blocks `i0`, `i1`.
    Triple {
        i0: usize,
        p0: HashValue,
        i1: usize,
        p1: HashValue,
        i2: usize,
    },
}

/// Lazy join over a range of first blocks.
#[derive(Debug)]
pub struct JoinWalk<'a> {
    search: &'a MeetInMiddle,
    roots: Range<usize>,
    cursor: Cursor,
    statistics: Statistics,
}

impl JoinWalk<'_> {
    fn candidate(&self, blocks: [usize; 3], last: &[u8]) -> Vec<u8> {
        let table = &self.search.table;
        let mut text = Vec::with_capacity(self.search.target_len());
        for i in blocks {
            text.extend_from_slice(table.block_at(i));
        }
        text.extend_from_slice(last);
        text
    }
}

impl Walk for JoinWalk<'_> {
    fn statistics(&self) -> &Statistics {
        &self.statistics
    }
}

impl Iterator for JoinWalk<'_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        let search = self.search;
        let table = &*search.table;
        let n = table.len();
        let [w0, w1, w2] = search.weights;
        let pair_range = search.pair_range;
        let (min, max) = (table.min_hash(), table.max_hash());

        loop {
            match self.cursor {
                Cursor::Root => {
                    let i0 = self.roots.next()?;
                    self.statistics.increment(Counters::Roots);
                    if i0 % PROGRESS_INTERVAL == 0 {
                        debug!(
                            "{}/{} :: {:.3}%",
                            i0,
                            n,
                            i0 as f64 * 100.0 / n as f64
                        );
                    }
                    let p0 = table.hash_at(i0).wrapping_mul(w0);
                    self.cursor = Cursor::Pair { i0, p0, i1: 0 };
                }
                Cursor::Pair { i0, p0, i1 } => {
                    if i1 >= n {
                        self.cursor = Cursor::Root;
                        continue;
                    }
                    self.cursor = Cursor::Pair { i0, p0, i1: i1 + 1 };
                    let p1 = p0.wrapping_add(table.hash_at(i1).wrapping_mul(w1));
                    let rest = search.target.wrapping_sub(p1);
                    let outside = pair_range
                        .map_or(false, |(lo, hi)| rest.wrapping_sub(lo) > hi.wrapping_sub(lo));
                    if outside {
                        self.statistics.increment(Counters::PairBoundPruned);
                        continue;
                    }
                    self.cursor = Cursor::Triple {
                        i0,
                        p0,
                        i1,
                        p1,
                        i2: 0,
                    };
                }
                Cursor::Triple { i0, p0, i1, p1, i2 } => {
                    if i2 >= n {
                        self.cursor = Cursor::Pair { i0, p0, i1: i1 + 1 };
                        continue;
                    }
                    self.cursor = Cursor::Triple {
                        i0,
                        p0,
                        i1,
                        p1,
                        i2: i2 + 1,
                    };
                    let p2 = p1.wrapping_add(table.hash_at(i2).wrapping_mul(w2));
                    let missing = search.target.wrapping_sub(p2);
                    if missing < min || missing > max {
                        self.statistics.increment(Counters::TripleBoundPruned);
                        continue;
                    }
                    match table.get(missing) {
                        Some(last) => {
                            self.statistics.increment(Counters::Candidates);
                            return Some(self.candidate([i0, i1, i2], last));
                        }
                        None => self.statistics.increment(Counters::TableMisses),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::hash::rolling_hash;
    use crate::model::Alphabet;
    use crate::search::collisions;

    fn join(alphabet: &str, block_len: usize, reference: &[u8]) -> Vec<Vec<u8>> {
        let alphabet: Alphabet = alphabet.parse().unwrap();
        let table = Arc::new(SuffixTable::build(&alphabet, block_len));
        let search = MeetInMiddle::new(table, rolling_hash(reference));
        let mut found: Vec<Vec<u8>> = collisions(&search)
            .map(|c| c.unwrap().into_text())
            .collect();
        found.sort();
        found
    }

    #[test]
    fn test_finds_reference_itself() {
        assert_eq!(join("ab", 1, b"abba"), vec![b"abba".to_vec()]);
        assert_eq!(join("abc", 2, b"cabbacab"), vec![b"cabbacab".to_vec()]);
    }

    #[test]
    fn test_finds_constructed_collision() {
        // The second string is the first plus the 8th difference pattern
        // (1, -8, 28, -56, 70, -56, 28, -8, 1), and (257 - 1)^8 = 2^64.
        let found = join("!\")=Yg", 3, b"!)!Y!Y!)!!!!");
        assert_eq!(found, vec![b"!)!Y!Y!)!!!!".to_vec(), b"\"!=!g!=!\"!!!".to_vec()]);
    }

    #[test]
    fn test_unreachable_target_is_empty() {
        let alphabet: Alphabet = "ab".parse().unwrap();
        let table = Arc::new(SuffixTable::build(&alphabet, 1));
        let search = MeetInMiddle::new(table, rolling_hash(b"zzzz"));
        assert_eq!(collisions(&search).count(), 0);
    }

    #[test]
    fn test_walk_counts_roots_and_prunes() {
        let alphabet: Alphabet = "abc".parse().unwrap();
        let table = Arc::new(SuffixTable::build(&alphabet, 1));
        let search = MeetInMiddle::new(table, rolling_hash(b"cabc"));
        let mut walk = search.walk(0..search.roots());
        let found: Vec<Vec<u8>> = walk.by_ref().collect();
        assert_eq!(found, vec![b"cabc".to_vec()]);
        let stats = walk.statistics();
        assert_eq!(stats.get(Counters::Roots), 3);
        assert_eq!(stats.get(Counters::Candidates), 1);
        assert!(stats.get(Counters::PairBoundPruned) > 0);
    }

    #[test]
    fn test_root_ranges_partition_results() {
        let alphabet: Alphabet = "!\")=Yg".parse().unwrap();
        let table = Arc::new(SuffixTable::build(&alphabet, 3));
        let search = MeetInMiddle::new(table, rolling_hash(b"!)!Y!Y!)!!!!"));
        let roots = search.roots();
        let mut split: Vec<Vec<u8>> = search.walk(0..roots / 2).collect();
        split.extend(search.walk(roots / 2..roots));
        split.sort();
        let mut whole: Vec<Vec<u8>> = search.walk(0..roots).collect();
        whole.sort();
        assert_eq!(split, whole);
        assert_eq!(whole.len(), 2);
    }

    #[test]
    fn test_high_codes_with_wrapping_pair_range() {
        let alphabet = Alphabet::new(&[0xf0, 0xff]).unwrap();
        let table = Arc::new(SuffixTable::build(&alphabet, 4));
        let reference = [0xff; 16];
        let search = MeetInMiddle::new(table, rolling_hash(&reference));
        let found: Vec<Vec<u8>> = collisions(&search)
            .map(|c| c.unwrap().into_text())
            .collect();
        assert!(found.contains(&reference.to_vec()));
    }

    #[test]
    fn test_unbounded_pair_range_still_joins() {
        let alphabet = Alphabet::new(&[0x00, 0xff]).unwrap();
        let table = Arc::new(SuffixTable::build(&alphabet, 4));
        let reference: Vec<u8> = (0..16).map(|i| if i % 3 == 0 { 0xff } else { 0x00 }).collect();
        let search = MeetInMiddle::new(table, rolling_hash(&reference));
        let found: Vec<Vec<u8>> = collisions(&search)
            .map(|c| c.unwrap().into_text())
            .collect();
        assert!(found.contains(&reference));
    }
}
