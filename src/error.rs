// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types.

use thiserror::Error;

use crate::model::constants::{MAX_BLOCK_LEN, MAX_ROWS};
use crate::model::HashValue;

/// Invalid run configuration, detected before any search starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("alphabet is empty")]
    EmptyAlphabet,

    #[error("alphabet contains {code:?} more than once")]
    DuplicateCode { code: char },

    #[error("alphabet must be ASCII")]
    NonAscii,

    #[error("block length {len} is outside 1..={max}", max = MAX_BLOCK_LEN)]
    BlockLength { len: usize },

    #[error("row count {rows} is outside 1..={max}", max = MAX_ROWS)]
    Rows { rows: usize },

    #[error("reference string has length {actual}, expected {expected}")]
    ReferenceLength { expected: usize, actual: usize },
}

/// Failure raised while searching.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A candidate produced by exact algebra does not hash to the target.
    ///
    /// This means the block weights or bounds are wrong; no result from the
    /// run can be trusted.
    #[error(
        "internal consistency fault: candidate {candidate:?} hashes to {actual}, \
         expected {expected}; block weight derivation is broken"
    )]
    VerificationMismatch {
        candidate: String,
        expected: HashValue,
        actual: HashValue,
    },

    #[error("could not start search workers")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
