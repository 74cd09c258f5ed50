// Copyright (c) 2025 - Cowboy AI, Inc.
//! KeyedSequence - Grouping Pipelines Over Keyed Pairs
//!
//! A `KeyedSequence<K, V>` consumes a stream of `(key, value)` pairs and
//! builds groupings without knowing the key cardinality in advance. Unlike
//! the flat wrapper's uniform draw index, combinator indices here are scoped
//! per key:
//!
//! - `filter` passes the count of previously *accepted* elements of that key;
//!   only acceptance advances the stored counter.
//! - `map` passes a counter that advances on every element of that key (map
//!   cannot reject).
//!
//! Per-key counters are created on first sighting, reset only at wrapper
//! construction, and grow monotonically while the stream drains.
//!
//! # Reduction
//!
//! `reduce` folds each key's elements into one accumulator. Without an
//! explicit seed, the first element of a key becomes the seed directly (no
//! reducer call) and takes slot 1 of the key's count; the reducer then sees
//! indices 2, 3, … With [`KeyedSequence::reduce_with`] every key is seeded
//! with a clone of the initial value and the reducer already runs for the
//! first element, seeing indices 1, 2, 3, … Both paths produce the same
//! final accumulators for associative reducers; the observable difference is
//! the index sequence.
//!
//! # Examples
//!
//! ```rust,ignore
//! let groups = KeyedSequence::from_pairs(vec![("a", 1), ("b", 2), ("a", 3)]).to_vec();
//! assert_eq!(groups, vec![("a", vec![1, 3]), ("b", vec![2])]);
//! ```

use std::collections::HashMap;
use std::hash::Hash;

use super::reduced::ReducedSequence;
use super::KeyedPair;
use crate::sequence::{Cursor, Sequence};

/// Per-key reduction record: total sightings and the running accumulator
struct KeyState<A> {
    count: usize,
    acc: A,
}

/// Grouping pipeline over a lazy stream of keyed pairs
pub struct KeyedSequence<K, V> {
    inner: Sequence<(K, V)>,
}

impl<K, V> KeyedSequence<K, V>
where
    K: Clone + Eq + Hash + 'static,
    V: 'static,
{
    /// Wrap a collection of keyed pairs
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = KeyedPair<K, V>>,
        I::IntoIter: 'static,
    {
        Self {
            inner: Sequence::from_collection(pairs),
        }
    }

    /// Wrap an existing pair sequence
    pub fn from_sequence(inner: Sequence<(K, V)>) -> Self {
        Self { inner }
    }

    /// Pull the next surviving pair
    pub fn next(&mut self) -> Option<KeyedPair<K, V>> {
        self.inner.next()
    }

    /// Propagate the cleanup hook to the source
    pub fn close(&mut self) {
        self.inner.close();
    }

    /// Release the underlying pair sequence
    pub fn into_sequence(self) -> Sequence<(K, V)> {
        self.inner
    }

    /// Keep only pairs satisfying the predicate
    ///
    /// The predicate receives the per-key count of previously accepted
    /// elements; rejected elements leave that key's counter untouched.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnMut(&K, &V, usize) -> bool + 'static,
    {
        Self {
            inner: Sequence::from_cursor(KeyedFilterCursor {
                inner: self.inner,
                predicate,
                accepted: HashMap::new(),
            }),
        }
    }

    /// Transform each value, keeping its key
    ///
    /// The iteratee receives a per-key counter that advances on every
    /// element of that key.
    pub fn map<W, F>(self, iteratee: F) -> KeyedSequence<K, W>
    where
        W: 'static,
        F: FnMut(&K, V, usize) -> W + 'static,
    {
        KeyedSequence {
            inner: Sequence::from_cursor(KeyedMapCursor {
                inner: self.inner,
                iteratee,
                seen: HashMap::new(),
            }),
        }
    }

    /// Reduce each key's elements, seeding from the first element
    ///
    /// Eager: drains the source fully. The accumulator type equals the
    /// element type in this path; use [`KeyedSequence::reduce_with`] when it
    /// diverges.
    pub fn reduce<R>(&mut self, mut reducer: R) -> ReducedSequence<K, V>
    where
        R: FnMut(&K, V, V, usize) -> V,
    {
        let mut order: Vec<K> = Vec::new();
        let mut states: HashMap<K, KeyState<V>> = HashMap::new();

        while let Some((key, value)) = self.inner.next() {
            if let Some(mut state) = states.remove(&key) {
                state.count += 1;
                state.acc = reducer(&key, state.acc, value, state.count);
                states.insert(key, state);
            } else {
                order.push(key.clone());
                states.insert(key, KeyState { count: 1, acc: value });
            }
        }

        collect_in_order(order, states)
    }

    /// Reduce each key's elements, seeding every key with `initial`
    ///
    /// Eager: drains the source fully. The first element of a key already
    /// invokes the reducer against a clone of `initial`.
    pub fn reduce_with<A, R>(&mut self, initial: A, mut reducer: R) -> ReducedSequence<K, A>
    where
        A: Clone + 'static,
        R: FnMut(&K, A, V, usize) -> A,
    {
        let mut order: Vec<K> = Vec::new();
        let mut states: HashMap<K, KeyState<A>> = HashMap::new();

        while let Some((key, value)) = self.inner.next() {
            if let Some(mut state) = states.remove(&key) {
                state.count += 1;
                state.acc = reducer(&key, state.acc, value, state.count);
                states.insert(key, state);
            } else {
                order.push(key.clone());
                let acc = reducer(&key, initial.clone(), value, 1);
                states.insert(key, KeyState { count: 1, acc });
            }
        }

        collect_in_order(order, states)
    }

    /// Group into `(key, values)` lists in first-insertion key order
    ///
    /// Eager: drains the source fully. Arrival order is preserved within
    /// each group; a key with no surviving elements never appears.
    pub fn to_vec(&mut self) -> Vec<(K, Vec<V>)> {
        let mut order: Vec<K> = Vec::new();
        let mut groups: HashMap<K, Vec<V>> = HashMap::new();

        while let Some((key, value)) = self.inner.next() {
            match groups.get_mut(&key) {
                Some(group) => group.push(value),
                None => {
                    order.push(key.clone());
                    groups.insert(key, vec![value]);
                }
            }
        }

        order
            .into_iter()
            .filter_map(|key| groups.remove(&key).map(|values| (key, values)))
            .collect()
    }

    /// Group into a keyed lookup map
    ///
    /// Use [`KeyedSequence::to_vec`] when cross-key ordering matters.
    pub fn to_map(&mut self) -> HashMap<K, Vec<V>> {
        self.to_vec().into_iter().collect()
    }

    /// Group into a map keyed by the property-name form of each key
    pub fn to_string_map(&mut self) -> HashMap<String, Vec<V>>
    where
        K: ToString,
    {
        self.to_vec()
            .into_iter()
            .map(|(key, values)| (key.to_string(), values))
            .collect()
    }
}

impl<K, V> std::fmt::Debug for KeyedSequence<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "KeyedSequence<{}, {}>",
            std::any::type_name::<K>(),
            std::any::type_name::<V>()
        )
    }
}

fn collect_in_order<K, A>(order: Vec<K>, mut states: HashMap<K, KeyState<A>>) -> ReducedSequence<K, A>
where
    K: Clone + Eq + Hash + 'static,
    A: 'static,
{
    let entries = order
        .into_iter()
        .filter_map(|key| states.remove(&key).map(|state| (key, state.acc)))
        .collect();
    ReducedSequence::from_entries(entries)
}

struct KeyedFilterCursor<K, V, P> {
    inner: Sequence<(K, V)>,
    predicate: P,
    accepted: HashMap<K, usize>,
}

impl<K, V, P> Cursor<(K, V)> for KeyedFilterCursor<K, V, P>
where
    K: Clone + Eq + Hash + 'static,
    V: 'static,
    P: FnMut(&K, &V, usize) -> bool,
{
    fn next(&mut self) -> Option<(K, V)> {
        while let Some((key, value)) = self.inner.next() {
            let index = self.accepted.get(&key).copied().unwrap_or(0);
            if (self.predicate)(&key, &value, index) {
                self.accepted.insert(key.clone(), index + 1);
                return Some((key, value));
            }
        }
        None
    }

    fn close(&mut self) {
        self.inner.close();
    }
}

struct KeyedMapCursor<K, V, F> {
    inner: Sequence<(K, V)>,
    iteratee: F,
    seen: HashMap<K, usize>,
}

impl<K, V, W, F> Cursor<(K, W)> for KeyedMapCursor<K, V, F>
where
    K: Clone + Eq + Hash + 'static,
    V: 'static,
    F: FnMut(&K, V, usize) -> W,
{
    fn next(&mut self) -> Option<(K, W)> {
        let (key, value) = self.inner.next()?;
        let slot = self.seen.entry(key.clone()).or_insert(0);
        let index = *slot;
        *slot += 1;
        let mapped = (self.iteratee)(&key, value, index);
        Some((key, mapped))
    }

    fn close(&mut self) {
        self.inner.close();
    }
}
