// Copyright (c) 2025 - Cowboy AI, Inc.
//! Properties of the sequence and aggregation pipelines
//!
//! Each property pins one observable law of the wrappers: ordered-sublist
//! filtering, length-preserving mapping, terminal exhaustion, and the
//! grouping/reduction bookkeeping.

use cim_toolkit::{KeyedSequence, Sequence};
use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Generate small value lists, empty included
fn small_values() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-100..100_i32, 0..50)
}

/// Generate keyed pairs over a small key alphabet
fn keyed_pairs() -> impl Strategy<Value = Vec<(String, i32)>> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(|key| key.to_string()),
            -100..100_i32,
        ),
        0..50,
    )
}

proptest! {
    #[test]
    fn prop_filter_keeps_ordered_sublist(values in small_values(), threshold in -100..100_i32) {
        let expected: Vec<i32> = values.iter().copied().filter(|n| *n >= threshold).collect();

        let actual = Sequence::from_collection(values)
            .filter(move |n, _| *n >= threshold)
            .to_vec();

        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_filter_indices_increase_per_examined_element(values in small_values()) {
        let observed = Rc::new(RefCell::new(Vec::new()));
        let sink = observed.clone();

        Sequence::from_collection(values.clone())
            .filter(move |_, index| {
                sink.borrow_mut().push(index);
                true
            })
            .to_vec();

        let indices = observed.borrow().clone();
        prop_assert_eq!(indices, (0..values.len()).collect::<Vec<_>>());
    }

    #[test]
    fn prop_map_preserves_length_and_values(values in small_values()) {
        let actual = Sequence::from_collection(values.clone())
            .map(|n, index| i64::from(n) * 2 + index as i64)
            .to_vec();

        prop_assert_eq!(actual.len(), values.len());
        for (index, value) in values.iter().enumerate() {
            prop_assert_eq!(actual[index], i64::from(*value) * 2 + index as i64);
        }
    }

    #[test]
    fn prop_second_drain_is_empty(values in small_values()) {
        let mut sequence = Sequence::from_collection(values);
        sequence.to_vec();
        prop_assert_eq!(sequence.to_vec(), Vec::<i32>::new());
    }

    #[test]
    fn prop_grouping_matches_reference(pairs in keyed_pairs()) {
        // naive insertion-order grouping as the reference model
        let mut expected: Vec<(String, Vec<i32>)> = Vec::new();
        for (key, value) in &pairs {
            match expected.iter_mut().find(|(seen, _)| seen == key) {
                Some((_, group)) => group.push(*value),
                None => expected.push((key.clone(), vec![*value])),
            }
        }

        let actual = KeyedSequence::from_pairs(pairs).to_vec();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_seeded_and_seedless_reduction_agree(pairs in keyed_pairs()) {
        let seedless = KeyedSequence::from_pairs(pairs.clone())
            .reduce(|_, acc, value, _| acc + value);
        let seeded = KeyedSequence::from_pairs(pairs)
            .reduce_with(0, |_, acc, value, _| acc + value);

        prop_assert_eq!(seedless.to_vec(), seeded.to_vec());
    }

    #[test]
    fn prop_keyed_filter_keeps_one_element_per_key(pairs in keyed_pairs()) {
        let groups = KeyedSequence::from_pairs(pairs.clone())
            .filter(|_, _, index| index < 1)
            .to_vec();

        for (_, group) in &groups {
            prop_assert_eq!(group.len(), 1);
        }

        let distinct: HashSet<String> = pairs.into_iter().map(|(key, _)| key).collect();
        prop_assert_eq!(groups.len(), distinct.len());
    }
}
