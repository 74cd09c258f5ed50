//! Integration tests for the synchronous sequence wrapper

use cim_toolkit::{Cursor, Sequence, ToolkitError};
use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::rc::Rc;

/// A pipeline chained from every construction variant behaves identically:
/// collections, pre-built cursors, pull routines, and deferred producers all
/// normalize into the same wrapper.
#[test]
fn test_construction_variants_normalize() {
    let from_collection = Sequence::from_collection(vec![1, 2, 3]).to_vec();

    let mut remaining = vec![3, 2, 1];
    let from_fn = Sequence::from_fn(move || remaining.pop()).to_vec();

    let from_cursor =
        Sequence::from_cursor(cim_toolkit::sequence::IterCursor::new(1..=3)).to_vec();

    let from_deferred =
        Sequence::deferred(|| Sequence::from_collection(vec![1, 2, 3])).to_vec();

    assert_eq!(from_collection, vec![1, 2, 3]);
    assert_eq!(from_fn, vec![1, 2, 3]);
    assert_eq!(from_cursor, vec![1, 2, 3]);
    assert_eq!(from_deferred, vec![1, 2, 3]);
}

#[test]
fn test_full_pipeline_filter_map_fold() {
    let total = Sequence::from_collection(1..=10)
        .filter(|n, _| n % 2 == 0)
        .map(|n, _| n * n)
        .fold(0, |acc, n, _| acc + n);

    // 4 + 16 + 36 + 64 + 100
    assert_eq!(total, 220);
}

#[test]
fn test_no_source_work_before_terminal() {
    let pulls = Rc::new(Cell::new(0_usize));
    let observed = pulls.clone();

    let mut items = vec![3, 2, 1];
    let mut pipeline = Sequence::from_fn(move || {
        observed.set(observed.get() + 1);
        items.pop()
    })
    .filter(|n: &i32, _| *n > 0)
    .map(|n, _| n * 2);

    assert_eq!(pulls.get(), 0, "combinators must not pull");

    assert_eq!(pipeline.next(), Some(2));
    assert_eq!(pulls.get(), 1, "one terminal pull draws exactly one element");
}

#[test]
fn test_infinite_source_with_short_circuit() {
    let mut naturals = Sequence::from_collection(0..).map(|n, _| n * 3);

    assert!(naturals.any(|n, _| *n > 10));
    // the wrapper survives and continues from where the scan stopped
    assert_eq!(naturals.next(), Some(15));
}

#[test]
fn test_reduce_of_singleton_never_calls_reducer() {
    let mut calls = 0;
    let result = Sequence::from_collection(vec![41])
        .reduce(|acc, n, _| {
            calls += 1;
            acc + n
        })
        .unwrap();

    assert_eq!(result, 41);
    assert_eq!(calls, 0);
}

#[test]
fn test_reduce_empty_reports_missing_seed() {
    let err = Sequence::<i32>::empty()
        .reduce(|acc, n, _| acc + n)
        .unwrap_err();

    assert!(matches!(err, ToolkitError::EmptySequence));
    assert!(err.to_string().contains("seed"));
}

#[test]
fn test_for_each_observes_every_element_once() {
    let mut seen = Vec::new();
    Sequence::from_collection(vec!["x", "y", "z"]).for_each(|s, index| seen.push((s, index)));

    assert_eq!(seen, vec![("x", 0), ("y", 1), ("z", 2)]);
}

#[test]
fn test_abandoned_consumption_closes_source() {
    struct Resource {
        released: Rc<Cell<bool>>,
        remaining: i32,
    }

    impl Cursor<i32> for Resource {
        fn next(&mut self) -> Option<i32> {
            if self.remaining == 0 {
                return None;
            }
            self.remaining -= 1;
            Some(self.remaining)
        }

        fn close(&mut self) {
            self.released.set(true);
        }
    }

    let released = Rc::new(Cell::new(false));
    let mut pipeline = Sequence::from_cursor(Resource {
        released: released.clone(),
        remaining: 100,
    })
    .filter(|n, _| n % 2 == 0);

    // consume a little, then abandon
    assert_eq!(pipeline.next(), Some(98));
    pipeline.close();

    assert!(released.get());
    assert_eq!(pipeline.next(), None);
}

#[test]
fn test_sequence_composes_with_std_iterators() {
    let evens: Vec<i32> = Sequence::from_collection(0..10)
        .filter(|n, _| n % 2 == 0)
        .take(3)
        .collect();

    assert_eq!(evens, vec![0, 2, 4]);
}
