// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bounded depth-first search over the coefficient model.
//!
//! Candidates grow one character at a time from the empty prefix. Weights and
//! codes are non-negative, so the partial vector of a prefix only grows as the
//! prefix is extended. Two tests cut a prefix together with its subtree:
//!
//! 1. **Dominance**: the partial vector must stay `<=` the target vector
//!    (see [`CoefficientVector`]'s ordering).
//! 2. **Finalized row**: at length `L - r` row `r` receives no more weight, so it
//!    must equal the target's row `r` exactly.
//!
//! A prefix that survives to length `L` matches the target vector on every row.
//!
//! # State
//!
//! The traversal keeps an explicit stack of frames, one per prefix length, each
//! holding the partial vector and the next alphabet index to try. The prefix
//! codes live in one shared buffer that is truncated on backtrack. Root
//! branches are the choices of the first character.
//!
//! # Approximation
//!
//! The model drops carries between output bytes. With all 8 rows every
//! candidate is a true collision, but collisions that rely on carries are never
//! found; with fewer rows candidates may miss the real hash. Candidates are
//! therefore verified with [`MismatchPolicy::Discard`].

use std::ops::Range;

use log::debug;

use super::{CollisionSearch, MismatchPolicy, Walk};
use crate::model::hash::HashValue;
use crate::model::{Alphabet, CoefficientMatrix, CoefficientVector};
use crate::reference::Reference;
use crate::state::{Counters, Statistics};

/// Why a prefix was cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prune {
    /// Some component already exceeds the target.
    Dominance,
    /// The given row is complete and differs from the target.
    FinalizedRow(usize),
}

impl Prune {
    fn counter(self) -> Counters {
        match self {
            Prune::Dominance => Counters::DominancePruned,
            Prune::FinalizedRow(_) => Counters::FinalizedRowPruned,
        }
    }
}

/// Depth-first search for strings whose coefficient vector equals a target vector.
#[derive(Debug, Clone)]
pub struct BoundedSearch {
    matrix: CoefficientMatrix,
    alphabet: Alphabet,
    target_vector: CoefficientVector,
    target: HashValue,
}

impl BoundedSearch {
    /// `target` is the true hash candidates are verified against.
    pub fn new(
        matrix: CoefficientMatrix,
        alphabet: Alphabet,
        target_vector: CoefficientVector,
        target: HashValue,
    ) -> Self {
        assert_eq!(
            matrix.rows(),
            target_vector.len(),
            "target vector does not match the matrix rows"
        );
        Self {
            matrix,
            alphabet,
            target_vector,
            target,
        }
    }

    /// Search for strings sharing the reference's vector under `matrix`.
    pub fn for_reference(matrix: CoefficientMatrix, alphabet: Alphabet, reference: &Reference) -> Self {
        let target_vector = reference.target_vector(&matrix);
        Self::new(matrix, alphabet, target_vector, reference.hash())
    }

    pub fn matrix(&self) -> &CoefficientMatrix {
        &self.matrix
    }

    pub fn target_vector(&self) -> &CoefficientVector {
        &self.target_vector
    }

    /// Test the partial vector of a prefix of length `depth`.
    ///
    /// Only the row finalized at exactly `depth` is compared; rows finalized
    /// earlier were compared by the ancestors and do not change.
    pub fn admits(&self, vector: &CoefficientVector, depth: usize) -> Result<(), Prune> {
        if !(*vector <= self.target_vector) {
            return Err(Prune::Dominance);
        }
        if let Some(row) = self.matrix.finalized_row(depth) {
            if vector.component(row) != self.target_vector.component(row) {
                return Err(Prune::FinalizedRow(row));
            }
        }
        Ok(())
    }

    /// Whether the walk would reach `prefix`: every prefix of it is admitted.
    pub fn viable(&self, prefix: &[u8]) -> bool {
        let mut vector = self.matrix.zero();
        for (position, &code) in prefix.iter().enumerate() {
            self.matrix.accumulate(&mut vector, position, code);
            if self.admits(&vector, position + 1).is_err() {
                return false;
            }
        }
        true
    }
}

impl CollisionSearch for BoundedSearch {
    type Walk<'a> = PrefixWalk<'a>;

    fn target(&self) -> HashValue {
        self.target
    }

    fn roots(&self) -> usize {
        self.alphabet.len()
    }

    fn walk(&self, roots: Range<usize>) -> PrefixWalk<'_> {
        let end = roots.end.min(self.alphabet.len());
        PrefixWalk {
            search: self,
            stack: vec![Frame {
                depth: 0,
                vector: self.matrix.zero(),
                next_choice: roots.start,
                end_choice: end,
            }],
            prefix: Vec::with_capacity(self.matrix.len()),
            longest: 0,
            statistics: Statistics::new(),
        }
    }

    fn mismatch_policy(&self) -> MismatchPolicy {
        MismatchPolicy::Discard
    }

    fn name(&self) -> &str {
        "BoundedSearch"
    }
}

/// One level of the depth-first traversal.
#[derive(Debug)]
struct Frame {
    /// Length of the prefix this frame extends.
    depth: usize,
    /// Partial vector of that prefix.
    vector: CoefficientVector,
    /// Next alphabet index to try.
    next_choice: usize,
    end_choice: usize,
}

/// Lazy depth-first traversal over a range of first characters.
#[derive(Debug)]
pub struct PrefixWalk<'a> {
    search: &'a BoundedSearch,
    stack: Vec<Frame>,
    prefix: Vec<u8>,
    longest: usize,
    statistics: Statistics,
}

impl PrefixWalk<'_> {
    /// Length of the longest admitted prefix so far.
    pub fn longest(&self) -> usize {
        self.longest
    }
}

impl Walk for PrefixWalk<'_> {
    fn statistics(&self) -> &Statistics {
        &self.statistics
    }
}

impl Iterator for PrefixWalk<'_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        let search = self.search;
        let matrix = &search.matrix;
        loop {
            let frame = self.stack.last_mut()?;
            if frame.next_choice >= frame.end_choice {
                self.stack.pop();
                continue;
            }
            let choice = frame.next_choice;
            frame.next_choice += 1;
            let depth = frame.depth;
            let code = search.alphabet.code(choice);
            let mut vector = frame.vector.clone();
            matrix.accumulate(&mut vector, depth, code);

            if depth == 0 {
                self.statistics.increment(Counters::Roots);
            }
            self.statistics.increment(Counters::Nodes);
            self.prefix.truncate(depth);
            self.prefix.push(code);
            let depth = depth + 1;

            if let Err(prune) = search.admits(&vector, depth) {
                self.statistics.increment(prune.counter());
                continue;
            }
            if depth > self.longest {
                self.longest = depth;
                debug!(
                    "Longest prefix {}: {}",
                    depth,
                    String::from_utf8_lossy(&self.prefix)
                );
            }
            if depth == matrix.len() {
                self.statistics.increment(Counters::Candidates);
                return Some(self.prefix.clone());
            }
            self.stack.push(Frame {
                depth,
                vector,
                next_choice: 0,
                end_choice: search.alphabet.len(),
            });
        }
    }
}
