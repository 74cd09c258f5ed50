// Copyright (c) 2025 - Cowboy AI, Inc.
//! ReducedSequence - Materialized Reduction Output
//!
//! A `ReducedSequence<K, A>` holds the `(key, accumulator)` pairs produced by
//! a keyed reduction, in first-insertion key order. At this stage there is
//! exactly one pair per key, so the flat element index and the per-key index
//! coincide; `filter` and `map` therefore use a plain enumeration index.
//!
//! The wrapper is materialized: combinators consume it and rebuild the pair
//! list eagerly, and the terminal consumers are plain conversions.

use std::collections::HashMap;
use std::hash::Hash;

use crate::sequence::Sequence;

/// Materialized `(key, accumulator)` pairs in first-insertion key order
#[derive(Clone, Debug)]
pub struct ReducedSequence<K, A> {
    entries: Vec<(K, A)>,
}

impl<K, A> ReducedSequence<K, A>
where
    K: Clone + Eq + Hash + 'static,
    A: 'static,
{
    /// Build from already-ordered pairs
    ///
    /// Later duplicates of a key overwrite the earlier accumulator while the
    /// key keeps its original position.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, A)>,
    {
        let mut order: Vec<K> = Vec::new();
        let mut slots: HashMap<K, A> = HashMap::new();
        for (key, acc) in pairs {
            if !slots.contains_key(&key) {
                order.push(key.clone());
            }
            slots.insert(key, acc);
        }
        let entries = order
            .into_iter()
            .filter_map(|key| slots.remove(&key).map(|acc| (key, acc)))
            .collect();
        Self { entries }
    }

    pub(crate) fn from_entries(entries: Vec<(K, A)>) -> Self {
        Self { entries }
    }

    /// Keep only pairs satisfying the predicate
    ///
    /// The index is the flat position in the materialized list.
    pub fn filter<P>(self, mut predicate: P) -> Self
    where
        P: FnMut(&K, &A, usize) -> bool,
    {
        let entries = self
            .entries
            .into_iter()
            .enumerate()
            .filter(|(index, (key, acc))| predicate(key, acc, *index))
            .map(|(_, entry)| entry)
            .collect();
        Self { entries }
    }

    /// Transform each accumulator, keeping its key
    pub fn map<B, F>(self, mut iteratee: F) -> ReducedSequence<K, B>
    where
        B: 'static,
        F: FnMut(&K, A, usize) -> B,
    {
        let entries = self
            .entries
            .into_iter()
            .enumerate()
            .map(|(index, (key, acc))| {
                let mapped = iteratee(&key, acc, index);
                (key, mapped)
            })
            .collect();
        ReducedSequence { entries }
    }

    /// The ordered pairs
    pub fn pairs(&self) -> &[(K, A)] {
        &self.entries
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key survived
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume into the ordered pair list
    pub fn to_vec(self) -> Vec<(K, A)> {
        self.entries
    }

    /// Consume into a keyed lookup map
    pub fn to_map(self) -> HashMap<K, A> {
        self.entries.into_iter().collect()
    }

    /// Consume into a map keyed by the property-name form of each key
    pub fn to_string_map(self) -> HashMap<String, A>
    where
        K: ToString,
    {
        self.entries
            .into_iter()
            .map(|(key, acc)| (key.to_string(), acc))
            .collect()
    }

    /// Continue processing as a flat sequence of pairs
    pub fn into_sequence(self) -> Sequence<(K, A)> {
        Sequence::from_collection(self.entries)
    }
}
