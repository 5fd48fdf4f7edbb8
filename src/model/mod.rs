// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The hash model.
//!
//! - `constants`: hash base, block geometry and default alphabets
//! - `alphabet`: ordered set of character codes
//! - `hash`: the wrapping rolling hash and block positioning
//! - `matrix`: the binomial coefficient model used by the bounded search

pub mod alphabet;
pub mod constants;
pub mod hash;
pub mod matrix;

pub use alphabet::Alphabet;
pub use constants::*;
pub use hash::{base_power, extend, rolling_hash, weighted_block_hash, HashValue};
pub use matrix::{CoefficientMatrix, CoefficientVector};
