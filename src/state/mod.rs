// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mutable search state.
//!
//! Search branches keep their partial hashes and vectors in the walks
//! themselves; only the counters live here.

pub mod statistics;

pub use statistics::{Counters, Statistics};
