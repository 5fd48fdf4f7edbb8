// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Binomial coefficient model of the rolling hash.
//!
//! Expanding `257^k = (256 + 1)^k = Σ_r C(k, r) 256^r` turns the hash of a
//! string of length `L` into
//!
//! ```text
//! hash = Σ_r 256^r · Σ_i C(L-1-i, r) · c_i      (mod 2^64)
//! ```
//!
//! Row `r` of the matrix holds the weights `C(L-1-i, r)`, so its dot product
//! with the codes is the un-carried value of output byte `r`. Rows from 8 on
//! are multiplied by a multiple of 2^64 and vanish, which bounds the number of
//! rows by [`MAX_ROWS`](super::constants::MAX_ROWS).
//!
//! The model ignores the carries between output bytes (each byte is really
//! reduced modulo 256). Two strings with equal vectors over all 8 rows collide
//! exactly, but colliding strings need not have equal vectors, and with fewer
//! than 8 rows equal vectors no longer imply a collision. Results found with
//! this model must therefore be checked against [`rolling_hash`](super::hash::rolling_hash).
//!
//! Row `r` has zero weight at positions `L-r..L`, so it is finalized as soon as
//! a prefix reaches length `L-r`: row 0 at `L`, row 1 at `L-1`, and so on.

use std::cmp::Ordering;

use super::constants::choose;
use super::hash::HashValue;

/// `rows x len` matrix of non-negative weights, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoefficientMatrix {
    rows: usize,
    len: usize,
    weights: Vec<u64>,
}

impl CoefficientMatrix {
    /// The binomial model for strings of length `len`: entry `(r, i)` is `C(len-1-i, r)`.
    pub fn binomial(rows: usize, len: usize) -> Self {
        let mut weights = Vec::with_capacity(rows * len);
        for r in 0..rows {
            for i in 0..len {
                weights.push(choose(len - 1 - i, r));
            }
        }
        Self { rows, len, weights }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Length of the strings the matrix models.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn weight(&self, row: usize, position: usize) -> u64 {
        self.weights[row * self.len + position]
    }

    /// The all-zero vector: the value of the empty prefix.
    pub fn zero(&self) -> CoefficientVector {
        CoefficientVector(vec![0; self.rows])
    }

    /// Dot product of every row with `codes`.
    ///
    /// `codes` may be shorter than [`len`](Self::len); missing positions count as zero,
    /// which gives the partial vector of a prefix.
    pub fn apply(&self, codes: &[u8]) -> CoefficientVector {
        assert!(
            codes.len() <= self.len,
            "{} codes applied to a matrix of length {}",
            codes.len(),
            self.len
        );
        let mut vector = self.zero();
        for (position, &code) in codes.iter().enumerate() {
            self.accumulate(&mut vector, position, code);
        }
        vector
    }

    /// Add the contribution of `code` at `position` to a partial vector.
    #[inline]
    pub fn accumulate(&self, vector: &mut CoefficientVector, position: usize, code: u8) {
        for (r, component) in vector.0.iter_mut().enumerate() {
            *component += self.weight(r, position) * code as u64;
        }
    }

    /// The row whose weights are all placed once a prefix reaches `depth` characters.
    pub fn finalized_row(&self, depth: usize) -> Option<usize> {
        let remaining = self.len.checked_sub(depth)?;
        (remaining < self.rows).then_some(remaining)
    }
}

/// Per-row weighted sums, one component per matrix row.
///
/// Ordered by dominance: `a <= b` holds iff every paired component of `a` is
/// `<=` the one of `b` and `a` has no more components than `b`. Vectors that
/// are neither dominated nor dominating are incomparable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoefficientVector(Vec<u64>);

impl CoefficientVector {
    pub fn new(components: Vec<u64>) -> Self {
        Self(components)
    }

    pub fn components(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn component(&self, row: usize) -> u64 {
        self.0[row]
    }

    /// Reassemble the hash: `Σ 256^r · v_r (mod 2^64)`.
    ///
    /// Exact when the vector carries all 8 rows.
    pub fn fold_hash(&self) -> HashValue {
        self.0
            .iter()
            .take(8)
            .enumerate()
            .fold(0, |hash: HashValue, (r, &v)| {
                hash.wrapping_add(v.wrapping_mul(1u64 << (8 * r)))
            })
    }
}

impl PartialOrd for CoefficientVector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let pairs = || self.0.iter().zip(other.0.iter());
        let le = self.len() <= other.len() && pairs().all(|(a, b)| a <= b);
        let ge = self.len() >= other.len() && pairs().all(|(a, b)| a >= b);
        match (le, ge) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (false, false) => None,
        }
    }
}
