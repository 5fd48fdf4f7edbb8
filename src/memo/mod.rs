// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Immutable precomputed data.
//!
//! Built once per run and only read during the search, so it can be shared
//! between workers behind an `Arc`.

pub mod suffix_table;

pub use suffix_table::SuffixTable;
