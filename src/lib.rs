// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Collision search for a base-257 rolling string hash.
//!
//! The hash `h(n) = h(n-1) * 257 + c(n) (mod 2^64)` is the core of several
//! native string hashes. Equal-length strings that collide under it collide in
//! the native hash as well, and enough of them turn a hash table into a list.
//! This crate finds such strings for a random (or given) reference string.
//!
//! # Architecture
//!
//! ## Immutable data
//!
//! Built once before the search and shared read-only afterwards:
//! - [`Alphabet`](model::Alphabet) - the codes candidates are made of
//! - [`SuffixTable`](memo::SuffixTable) - every block of the block length, by hash
//! - [`CoefficientMatrix`](model::CoefficientMatrix) - the binomial model of the hash
//!
//! ## Search
//!
//! Two strategies implement [`CollisionSearch`](search::CollisionSearch):
//!
//! 1. **[`MeetInMiddle`](search::MeetInMiddle)**: picks three blocks, prunes
//!    with the table's hash range, and looks up the fourth block
//! 2. **[`BoundedSearch`](search::BoundedSearch)**: extends prefixes one
//!    character at a time, pruning by dominance and finalized rows
//!
//! Both are lazy, and every candidate is re-hashed before it is reported.
//!
//! # Parallelization
//!
//! The root branches of either search are independent, so
//! [`parallel::stream`](search::parallel::stream) spreads them over a rayon pool
//! and merges verified results through a channel.

pub mod config;
pub mod drivers;
pub mod error;
pub mod memo;
pub mod model;
pub mod reference;
pub mod search;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use config::{SearchConfig, Strategy};
pub use error::{ConfigError, SearchError};
pub use reference::Reference;
pub use search::{Collision, CollisionSearch};
