// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Drivers that put found collisions to work against real hash tables.
//!
//! - `plist`: an XML property list whose keys all collide
//! - `stress`: timed insertion into a `HashMap` using the rolling hash
//!
//! Both consume multi-collisions: strings of equal length and equal hash can
//! be concatenated in any order and the results still share one hash, since
//! `hash(a ++ b) = hash(a) * BASE^len(b) + hash(b)`.

pub mod plist;
pub mod stress;

/// All `strings.len()^width` concatenations of `width` strings, odometer order.
///
/// Yields nothing when `strings` is empty or `width` is zero.
pub fn multicollisions(strings: &[Vec<u8>], width: usize) -> MultiCollisions<'_> {
    MultiCollisions {
        strings,
        odometer: vec![0; width],
        done: strings.is_empty() || width == 0,
    }
}

/// Iterator returned by [`multicollisions`].
#[derive(Debug)]
pub struct MultiCollisions<'a> {
    strings: &'a [Vec<u8>],
    odometer: Vec<usize>,
    done: bool,
}

impl Iterator for MultiCollisions<'_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        if self.done {
            return None;
        }
        let key: Vec<u8> = self
            .odometer
            .iter()
            .flat_map(|&i| self.strings[i].iter().copied())
            .collect();

        self.done = true;
        for digit in self.odometer.iter_mut().rev() {
            *digit += 1;
            if *digit < self.strings.len() {
                self.done = false;
                break;
            }
            *digit = 0;
        }
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::hash::rolling_hash;

    #[test]
    fn test_multicollisions_share_hash() {
        let strings = vec![b"!)!Y!Y!)!!!!".to_vec(), b"\"!=!g!=!\"!!!".to_vec()];
        let keys: Vec<Vec<u8>> = multicollisions(&strings, 3).collect();
        assert_eq!(keys.len(), 8);
        let hash = rolling_hash(&keys[0]);
        assert!(keys.iter().all(|key| key.len() == 36 && rolling_hash(key) == hash));
        let mut distinct = keys.clone();
        distinct.sort();
        distinct.dedup();
        assert_eq!(distinct.len(), 8);
    }

    #[test]
    fn test_odometer_order() {
        let strings = vec![b"a".to_vec(), b"b".to_vec()];
        let keys: Vec<Vec<u8>> = multicollisions(&strings, 2).collect();
        assert_eq!(keys, vec![b"aa".to_vec(), b"ab".to_vec(), b"ba".to_vec(), b"bb".to_vec()]);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(multicollisions(&[], 3).count(), 0);
        assert_eq!(multicollisions(&[b"a".to_vec()], 0).count(), 0);
        assert_eq!(multicollisions(&[b"a".to_vec()], 4).count(), 1);
    }
}
