// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Reference strings: the random input whose hash the search tries to hit.

use std::fmt;

use rand::Rng;

use crate::model::hash::{rolling_hash, HashValue};
use crate::model::{Alphabet, CoefficientMatrix, CoefficientVector};

/// A reference string together with its target hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    text: Vec<u8>,
    hash: HashValue,
}

impl Reference {
    pub fn from_text(text: &[u8]) -> Self {
        Self {
            text: text.to_vec(),
            hash: rolling_hash(text),
        }
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The target hash.
    pub fn hash(&self) -> HashValue {
        self.hash
    }

    /// The target vector of the coefficient model.
    pub fn target_vector(&self, matrix: &CoefficientMatrix) -> CoefficientVector {
        matrix.apply(&self.text)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", String::from_utf8_lossy(&self.text), self.hash)
    }
}

/// Draws reference strings uniformly from an alphabet.
#[derive(Debug)]
pub struct ReferenceGenerator<R> {
    alphabet: Alphabet,
    rng: R,
}

impl<R: Rng> ReferenceGenerator<R> {
    pub fn new(alphabet: Alphabet, rng: R) -> Self {
        Self { alphabet, rng }
    }

    pub fn generate(&mut self, len: usize) -> Reference {
        let text: Vec<u8> = (0..len)
            .map(|_| self.alphabet.code(self.rng.gen_range(0..self.alphabet.len())))
            .collect();
        Reference::from_text(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_reference() {
        let alphabet: Alphabet = "0123456789".parse().unwrap();
        let mut generator = ReferenceGenerator::new(alphabet.clone(), StdRng::seed_from_u64(7));
        let reference = generator.generate(12);
        assert_eq!(reference.len(), 12);
        assert!(reference.text().iter().all(|&c| alphabet.contains(c)));
        assert_eq!(reference.hash(), rolling_hash(reference.text()));
    }

    #[test]
    fn test_seed_is_reproducible() {
        let alphabet: Alphabet = "abcdef".parse().unwrap();
        let a = ReferenceGenerator::new(alphabet.clone(), StdRng::seed_from_u64(42)).generate(12);
        let b = ReferenceGenerator::new(alphabet, StdRng::seed_from_u64(42)).generate(12);
        assert_eq!(a, b);
    }

    #[test]
    fn test_target_vector_folds_to_hash() {
        let reference = Reference::from_text(b"aaaaaaaaaaaa");
        let matrix = CoefficientMatrix::binomial(8, 12);
        assert_eq!(reference.target_vector(&matrix).fold_hash(), reference.hash());
        assert_eq!(reference.to_string(), format!("aaaaaaaaaaaa -> {}", reference.hash()));
    }
}
