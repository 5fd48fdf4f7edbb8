// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Collision search.
//!
//! Two strategies share one seam, [`CollisionSearch`]:
//!
//! - [`MeetInMiddle`]: joins four precomputed blocks through the suffix table
//! - [`BoundedSearch`]: depth-first over prefixes of the coefficient model
//!
//! A search splits its space into independent root branches. A [`Walk`] lazily
//! produces raw candidates from a range of roots; [`collisions`] walks every root
//! on the current thread, and [`parallel::stream`] hands roots to rayon workers.
//! Either way every candidate is re-hashed before it is reported.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use rolling_collide::memo::SuffixTable;
//! use rolling_collide::model::Alphabet;
//! use rolling_collide::reference::Reference;
//! use rolling_collide::search::{collisions, MeetInMiddle};
//!
//! let alphabet: Alphabet = "ab".parse().unwrap();
//! let table = Arc::new(SuffixTable::build(&alphabet, 1));
//! let reference = Reference::from_text(b"abba");
//! let search = MeetInMiddle::new(table, reference.hash());
//!
//! let found: Vec<_> = collisions(&search).collect::<Result<_, _>>().unwrap();
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].text(), b"abba");
//! ```

pub mod bounded;
pub mod meet_in_middle;
pub mod parallel;

pub use bounded::BoundedSearch;
pub use meet_in_middle::MeetInMiddle;

use std::fmt;
use std::ops::Range;

use log::warn;

use crate::error::SearchError;
use crate::model::hash::{rolling_hash, HashValue};
use crate::state::Statistics;

/// A verified string hashing to the target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Collision {
    text: Vec<u8>,
    hash: HashValue,
}

impl Collision {
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// The recomputed hash, equal to the target.
    pub fn hash(&self) -> HashValue {
        self.hash
    }

    pub fn into_text(self) -> Vec<u8> {
        self.text
    }
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", String::from_utf8_lossy(&self.text), self.hash)
    }
}

/// What to do with a candidate whose recomputed hash misses the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchPolicy {
    /// The candidate came from exact algebra; a miss is a bug and ends the search.
    Fatal,
    /// The candidate came from an approximate model; drop it.
    Discard,
}

/// Lazy producer of raw candidates over some root branches.
pub trait Walk: Iterator<Item = Vec<u8>> {
    /// Counters accumulated so far by this walk.
    fn statistics(&self) -> &Statistics;
}

/// A collision search whose space splits into independent root branches.
///
/// Implementations hold only read-only state, so one search can be walked
/// from many threads at once.
pub trait CollisionSearch: Sync {
    type Walk<'a>: Walk
    where
        Self: 'a;

    /// Hash every candidate must reproduce.
    fn target(&self) -> HashValue;

    /// Number of root branches.
    fn roots(&self) -> usize;

    /// Walk the root branches in `roots`.
    fn walk(&self, roots: Range<usize>) -> Self::Walk<'_>;

    fn mismatch_policy(&self) -> MismatchPolicy;

    /// Name for diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Re-hash a candidate against the target.
///
/// Returns `None` when a mismatch is discarded under [`MismatchPolicy::Discard`].
pub fn verify(
    candidate: Vec<u8>,
    target: HashValue,
    policy: MismatchPolicy,
) -> Option<Result<Collision, SearchError>> {
    let hash = rolling_hash(&candidate);
    if hash == target {
        return Some(Ok(Collision {
            text: candidate,
            hash,
        }));
    }
    let candidate = String::from_utf8_lossy(&candidate).into_owned();
    match policy {
        MismatchPolicy::Fatal => Some(Err(SearchError::VerificationMismatch {
            candidate,
            expected: target,
            actual: hash,
        })),
        MismatchPolicy::Discard => {
            warn!(
                "Discarding approximate candidate {:?}: hashes to {}, target {}",
                candidate, hash, target
            );
            None
        }
    }
}

/// Verified collisions of `search`, walking all roots on the current thread.
pub fn collisions<S: CollisionSearch>(search: &S) -> Collisions<'_, S> {
    Collisions {
        walk: search.walk(0..search.roots()),
        target: search.target(),
        policy: search.mismatch_policy(),
        failed: false,
    }
}

/// Lazy sequence of verified collisions. Ends after the first error.
pub struct Collisions<'a, S: CollisionSearch + 'a> {
    walk: S::Walk<'a>,
    target: HashValue,
    policy: MismatchPolicy,
    failed: bool,
}

impl<'a, S: CollisionSearch + 'a> Collisions<'a, S> {
    pub fn statistics(&self) -> &Statistics {
        self.walk.statistics()
    }
}

impl<'a, S: CollisionSearch + 'a> Iterator for Collisions<'a, S> {
    type Item = Result<Collision, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let candidate = self.walk.next()?;
            if let Some(result) = verify(candidate, self.target, self.policy) {
                self.failed = result.is_err();
                return Some(result);
            }
        }
    }
}
