// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Timed insertion into a hash table keyed by the rolling hash.

use std::collections::HashMap;
use std::hash::{BuildHasher, Hasher};
use std::time::{Duration, Instant};

use crate::model::hash::{extend, HashValue};

/// `Hasher` folding every written byte into the rolling hash.
#[derive(Debug, Default, Clone, Copy)]
pub struct RollingHasher {
    hash: HashValue,
}

impl Hasher for RollingHasher {
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        self.hash = bytes.iter().fold(self.hash, |hash, &code| extend(hash, code));
    }
}

/// `BuildHasher` for [`RollingHasher`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RollingState;

impl BuildHasher for RollingState {
    type Hasher = RollingHasher;

    fn build_hasher(&self) -> RollingHasher {
        RollingHasher::default()
    }
}

/// Outcome of one timed insertion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub inserted: usize,
    pub elapsed: Duration,
}

/// Insert every key into a fresh rolling-hash `HashMap` and time it.
pub fn measure<I>(keys: I) -> Measurement
where
    I: IntoIterator<Item = Vec<u8>>,
{
    let mut table: HashMap<Vec<u8>, usize, RollingState> = HashMap::with_hasher(RollingState);
    let start = Instant::now();
    for (i, key) in keys.into_iter().enumerate() {
        table.insert(key, i);
    }
    Measurement {
        inserted: table.len(),
        elapsed: start.elapsed(),
    }
}

/// `count` distinct zero-padded decimal keys of length `len`.
///
/// Their hashes differ, so they make the baseline for [`measure`].
pub fn distinct_keys(count: usize, len: usize) -> impl Iterator<Item = Vec<u8>> {
    (0..count).map(move |i| format!("{:0width$}", i, width = len).into_bytes())
}
