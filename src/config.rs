// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Validated run configuration.
//!
//! The command line is parsed by the binary; everything it passes on is checked
//! here so a run never starts with an alphabet, block length or reference the
//! search cannot handle.

use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::ConfigError;
use crate::model::constants::{BLOCKS, DEFAULT_ROWS, MAX_BLOCK_LEN, MAX_ROWS};
use crate::model::Alphabet;
use crate::reference::{Reference, ReferenceGenerator};

/// Which search to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Strategy {
    /// Join four blocks through the suffix table.
    #[default]
    MeetInMiddle,
    /// Depth-first search over the coefficient model.
    Bounded,
}

/// Everything a run needs besides the reference string itself.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    strategy: Strategy,
    alphabet: Alphabet,
    reference_alphabet: Alphabet,
    block_len: usize,
    rows: usize,
    reference: Option<Vec<u8>>,
    seed: Option<u64>,
    limit: Option<usize>,
    threads: Option<usize>,
}

impl SearchConfig {
    /// A sequential meet-in-the-middle run drawing references from `alphabet`.
    pub fn new(alphabet: Alphabet, block_len: usize) -> Result<Self, ConfigError> {
        if block_len == 0 || block_len > MAX_BLOCK_LEN {
            return Err(ConfigError::BlockLength { len: block_len });
        }
        Ok(Self {
            strategy: Strategy::default(),
            reference_alphabet: alphabet.clone(),
            alphabet,
            block_len,
            rows: DEFAULT_ROWS,
            reference: None,
            seed: None,
            limit: None,
            threads: None,
        })
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_reference_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.reference_alphabet = alphabet;
        self
    }

    pub fn with_rows(mut self, rows: usize) -> Result<Self, ConfigError> {
        if rows == 0 || rows > MAX_ROWS {
            return Err(ConfigError::Rows { rows });
        }
        self.rows = rows;
        Ok(self)
    }

    /// Search for collisions with `text` instead of a random reference.
    pub fn with_reference(mut self, text: &[u8]) -> Result<Self, ConfigError> {
        if text.len() != self.target_len() {
            return Err(ConfigError::ReferenceLength {
                expected: self.target_len(),
                actual: text.len(),
            });
        }
        self.reference = Some(text.to_vec());
        Ok(self)
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Stop after this many verified collisions.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Walk roots on a pool of `threads` workers; 0 walks them sequentially.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = (threads > 0).then_some(threads);
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn block_len(&self) -> usize {
        self.block_len
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Length of the reference and of every collision.
    pub fn target_len(&self) -> usize {
        BLOCKS * self.block_len
    }

    /// The explicit reference, or a random one from the reference alphabet.
    pub fn reference(&self) -> Reference {
        if let Some(text) = &self.reference {
            return Reference::from_text(text);
        }
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        ReferenceGenerator::new(self.reference_alphabet.clone(), rng).generate(self.target_len())
    }
}
