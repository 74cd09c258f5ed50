//! Integration tests for the keyed aggregation pipelines

use cim_toolkit::{AsyncKeyedSequence, KeyedSequence, Sequence};
use pretty_assertions::assert_eq;
use std::collections::HashMap;

#[test]
fn test_grouping_preserves_both_orders() {
    let pairs = vec![("a", 1), ("b", 2), ("a", 3)];

    let groups = KeyedSequence::from_pairs(pairs.clone()).to_vec();
    assert_eq!(groups, vec![("a", vec![1, 3]), ("b", vec![2])]);

    let map = KeyedSequence::from_pairs(pairs).to_map();
    let expected: HashMap<&str, Vec<i32>> =
        [("a", vec![1, 3]), ("b", vec![2])].into_iter().collect();
    assert_eq!(map, expected);
}

#[test]
fn test_keyed_pipeline_from_flat_sequence() {
    let flat = Sequence::from_collection(1..=9).map(|n, _| (n % 3, n));

    let groups = KeyedSequence::from_sequence(flat).to_vec();
    assert_eq!(
        groups,
        vec![(1, vec![1, 4, 7]), (2, vec![2, 5, 8]), (0, vec![3, 6, 9])]
    );
}

#[test]
fn test_per_key_filter_then_group() {
    // keep at most two elements per key, regardless of value
    let groups = KeyedSequence::from_pairs(vec![
        ("x", 1),
        ("y", 2),
        ("x", 3),
        ("x", 4),
        ("y", 5),
        ("y", 6),
    ])
    .filter(|_, _, index| index < 2)
    .to_vec();

    assert_eq!(groups, vec![("x", vec![1, 3]), ("y", vec![2, 5])]);
}

#[test]
fn test_reduction_matches_worked_example() {
    // seedless: 1 seeds, then 1+2=3, 3+3=6
    let seedless = KeyedSequence::from_pairs(vec![("a", 1), ("a", 2), ("a", 3)])
        .reduce(|_, acc, value, _| acc + value);
    assert_eq!(seedless.pairs(), &[("a", 6)]);

    // seeded with 0: 0+1, 1+2, 3+3, same final value
    let seeded = KeyedSequence::from_pairs(vec![("a", 1), ("a", 2), ("a", 3)])
        .reduce_with(0, |_, acc, value, _| acc + value);
    assert_eq!(seeded.pairs(), &[("a", 6)]);
}

#[test]
fn test_reduction_with_diverging_accumulator_type() {
    // a seed is mandatory once the accumulator type differs from the values
    let reduced = KeyedSequence::from_pairs(vec![("a", 1), ("b", 2), ("a", 3)])
        .reduce_with(String::new(), |_, acc, value, _| {
            format!("{}{}", acc, value)
        });

    assert_eq!(
        reduced.pairs(),
        &[("a", "13".to_string()), ("b", "2".to_string())]
    );
}

#[test]
fn test_reduced_wrapper_supports_further_processing() {
    let totals = KeyedSequence::from_pairs(vec![
        ("small", 1),
        ("large", 100),
        ("small", 2),
        ("large", 200),
    ])
    .reduce(|_, acc, value, _| acc + value)
    .filter(|_, total, _| *total > 10)
    .map(|key, total, _| format!("{}={}", key, total));

    assert_eq!(totals.pairs(), &[("large", "large=300".to_string())]);
}

#[test]
fn test_reduced_terminal_conversions() {
    let reduced = KeyedSequence::from_pairs(vec![(1, 10), (2, 20), (1, 30)])
        .reduce(|_, acc, value, _| acc + value);

    let by_name = reduced.clone().to_string_map();
    assert_eq!(by_name.get("1"), Some(&40));
    assert_eq!(by_name.get("2"), Some(&20));

    assert_eq!(reduced.to_vec(), vec![(1, 40), (2, 20)]);
}

#[tokio::test]
async fn test_async_grouping_matches_sync_semantics() {
    let pairs = vec![("a", 1), ("b", 2), ("a", 3)];

    let async_groups = AsyncKeyedSequence::from_pairs(pairs.clone())
        .to_vec()
        .await;
    let sync_groups = KeyedSequence::from_pairs(pairs).to_vec();

    assert_eq!(async_groups, sync_groups);
}

#[tokio::test]
async fn test_async_filter_map_reduce_round_trip() {
    let reduced = AsyncKeyedSequence::from_pairs(vec![
        ("even", 2),
        ("odd", 1),
        ("even", 4),
        ("odd", 3),
    ])
    .filter(|_, value, _| async move { value < 4 })
    .map(|_, value, _| async move { value * 10 })
    .reduce(|_, acc, value, _| async move { acc + value })
    .await;

    assert_eq!(reduced.pairs(), &[("even", 20), ("odd", 40)]);
}

#[tokio::test]
async fn test_async_string_map_terminal() {
    let map = AsyncKeyedSequence::from_pairs(vec![(7, "a"), (8, "b"), (7, "c")])
        .to_string_map()
        .await;

    assert_eq!(map.get("7"), Some(&vec!["a", "c"]));
    assert_eq!(map.get("8"), Some(&vec!["b"]));
}
