// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Integration tests for the block join.
//!
//! These tests validate that the join:
//! - Only reports strings that hash to the target
//! - Reports everything a brute-force enumeration finds
//! - Stays exhaustive when the admissible range wraps around zero

mod common;

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use common::{alphabet, all_strings, brute_force, CONSTRUCTED_ALPHABET, CONSTRUCTED_ALTERNATE, CONSTRUCTED_REFERENCE};
use rolling_collide::memo::SuffixTable;
use rolling_collide::model::hash::{rolling_hash, HashValue};
use rolling_collide::reference::ReferenceGenerator;
use rolling_collide::search::{collisions, CollisionSearch, MeetInMiddle};

fn join(table: &Arc<SuffixTable>, target: HashValue) -> Vec<Vec<u8>> {
    let search = MeetInMiddle::new(Arc::clone(table), target);
    let mut found: Vec<Vec<u8>> = collisions(&search)
        .map(|c| c.unwrap().into_text())
        .collect();
    found.sort();
    found
}

#[test]
fn test_complete_against_brute_force_two_letters() {
    let ab = alphabet("ab");
    let table = Arc::new(SuffixTable::build(&ab, 1));
    for reference in all_strings(&ab, 4) {
        let target = rolling_hash(&reference);
        let mut expected = brute_force(&ab, 4, b"", target);
        expected.sort();
        assert_eq!(join(&table, target), expected, "reference {:?}", reference);
    }
}

#[test]
fn test_complete_against_brute_force_block_two() {
    let abc = alphabet("abc");
    let table = Arc::new(SuffixTable::build(&abc, 2));
    for reference in [&b"abcabcab"[..], b"cccccccc", b"aaaaaaaa", b"bacbacca"] {
        let target = rolling_hash(reference);
        let mut expected = brute_force(&abc, 8, b"", target);
        expected.sort();
        assert_eq!(join(&table, target), expected);
    }
}

#[test]
fn test_targets_near_wraparound() {
    // Targets just above zero or near 2^64 make [target - hi, target - lo]
    // wrap; the join must still agree with brute force.
    let ab = alphabet("ab");
    let table = Arc::new(SuffixTable::build(&ab, 1));
    for target in [0, 1, 25027, HashValue::MAX, HashValue::MAX - 97] {
        let expected = brute_force(&ab, 4, b"", target);
        assert_eq!(join(&table, target), expected, "target {}", target);
    }
}

#[test]
fn test_sound_for_random_references() {
    let codes = alphabet("0123456789");
    let table = Arc::new(SuffixTable::build(&codes, 2));
    let mut generator = ReferenceGenerator::new(codes.clone(), StdRng::seed_from_u64(2025));
    for _ in 0..5 {
        let reference = generator.generate(8);
        let found = join(&table, reference.hash());
        assert!(found.contains(&reference.text().to_vec()));
        assert!(found.iter().all(|s| s.len() == 8 && rolling_hash(s) == reference.hash()));
    }
}

#[test]
fn test_constructed_collision_matches_restricted_brute_force() {
    let codes = alphabet(CONSTRUCTED_ALPHABET);
    let table = Arc::new(SuffixTable::build(&codes, 3));
    let target = rolling_hash(CONSTRUCTED_REFERENCE);
    let found = join(&table, target);
    assert_eq!(found, vec![CONSTRUCTED_REFERENCE.to_vec(), CONSTRUCTED_ALTERNATE.to_vec()]);

    // Every collision ending in "!!!", by exhausting the first nine characters.
    let restricted = brute_force(&codes, 9, b"!!!", target);
    let found_restricted: Vec<Vec<u8>> = found.into_iter().filter(|s| s.ends_with(b"!!!")).collect();
    assert_eq!(found_restricted, restricted);
}

#[test]
fn test_early_termination_keeps_results() {
    let codes = alphabet(CONSTRUCTED_ALPHABET);
    let table = Arc::new(SuffixTable::build(&codes, 3));
    let search = MeetInMiddle::new(table, rolling_hash(CONSTRUCTED_REFERENCE));
    let first: Vec<_> = collisions(&search).take(1).map(|c| c.unwrap()).collect();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].text(), CONSTRUCTED_REFERENCE);
    assert_eq!(search.roots(), 216);
}
