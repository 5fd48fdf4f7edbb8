// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Ordered set of character codes candidate strings are built from.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// An ordered, non-empty sequence of distinct character codes.
///
/// Fixed for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    codes: Vec<u8>,
}

impl Alphabet {
    /// Build an alphabet, rejecting empty input and repeated codes.
    pub fn new(codes: &[u8]) -> Result<Self, ConfigError> {
        if codes.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        let mut seen = [false; 256];
        for &code in codes {
            if seen[code as usize] {
                return Err(ConfigError::DuplicateCode {
                    code: code as char,
                });
            }
            seen[code as usize] = true;
        }
        Ok(Self {
            codes: codes.to_vec(),
        })
    }

    pub fn codes(&self) -> &[u8] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Code at index `i` of the ordering.
    pub fn code(&self, i: usize) -> u8 {
        self.codes[i]
    }

    pub fn min_code(&self) -> u8 {
        self.codes.iter().copied().min().unwrap_or(0)
    }

    pub fn max_code(&self) -> u8 {
        self.codes.iter().copied().max().unwrap_or(0)
    }

    pub fn contains(&self, code: u8) -> bool {
        self.codes.contains(&code)
    }
}

impl FromStr for Alphabet {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() {
            return Err(ConfigError::NonAscii);
        }
        Self::new(s.as_bytes())
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.codes))
    }
}
