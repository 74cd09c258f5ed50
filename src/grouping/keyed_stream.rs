// Copyright (c) 2025 - Cowboy AI, Inc.
//! AsyncKeyedSequence - Grouping Pipelines Over Suspending Keyed Streams
//!
//! The asynchronous variant of [`KeyedSequence`](super::keyed::KeyedSequence):
//! identical per-key index and seeding bookkeeping, but pulls may suspend and
//! predicates/iteratees/reducers return futures that are awaited in source
//! order. Callbacks receive owned clones, so their futures never borrow from
//! the pipeline's interior.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::marker::PhantomData;

use async_trait::async_trait;

use super::reduced::ReducedSequence;
use super::KeyedPair;
use crate::sequence::{AsyncCursor, AsyncSequence};

struct KeyState<A> {
    count: usize,
    acc: A,
}

/// Grouping pipeline over a suspending stream of keyed pairs
pub struct AsyncKeyedSequence<K, V> {
    inner: AsyncSequence<(K, V)>,
}

impl<K, V> AsyncKeyedSequence<K, V>
where
    K: Clone + Eq + Hash + Send + 'static,
    V: Clone + Send + 'static,
{
    /// Wrap a collection of keyed pairs
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = KeyedPair<K, V>>,
        I::IntoIter: Send + 'static,
    {
        Self {
            inner: AsyncSequence::from_collection(pairs),
        }
    }

    /// Wrap an existing asynchronous pair sequence
    pub fn from_sequence(inner: AsyncSequence<(K, V)>) -> Self {
        Self { inner }
    }

    /// Pull the next surviving pair
    pub async fn next(&mut self) -> Option<KeyedPair<K, V>> {
        self.inner.next().await
    }

    /// Propagate the cleanup hook to the source
    pub async fn close(&mut self) {
        self.inner.close().await;
    }

    /// Release the underlying pair sequence
    pub fn into_sequence(self) -> AsyncSequence<(K, V)> {
        self.inner
    }

    /// Keep only pairs whose awaited predicate result is true
    ///
    /// The predicate receives the per-key count of previously accepted
    /// elements; rejected elements leave that key's counter untouched.
    pub fn filter<P, Fut>(self, predicate: P) -> Self
    where
        P: FnMut(K, V, usize) -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Self {
            inner: AsyncSequence::from_cursor(KeyedFilterCursor {
                inner: self.inner,
                predicate,
                accepted: HashMap::new(),
                _pending: PhantomData,
            }),
        }
    }

    /// Transform each value through an awaited iteratee, keeping its key
    ///
    /// The iteratee receives a per-key counter that advances on every
    /// element of that key.
    pub fn map<W, F, Fut>(self, iteratee: F) -> AsyncKeyedSequence<K, W>
    where
        W: Clone + Send + 'static,
        F: FnMut(K, V, usize) -> Fut + Send + 'static,
        Fut: Future<Output = W> + Send + 'static,
    {
        AsyncKeyedSequence {
            inner: AsyncSequence::from_cursor(KeyedMapCursor {
                inner: self.inner,
                iteratee,
                seen: HashMap::new(),
                _pending: PhantomData,
            }),
        }
    }

    /// Reduce each key's elements, seeding from the first element
    ///
    /// Eager: drains the source fully, awaiting each reducer result before
    /// the next pull. Indices match the synchronous pipeline: the seed takes
    /// slot 1, the reducer sees 2, 3, …
    pub async fn reduce<R, Fut>(&mut self, mut reducer: R) -> ReducedSequence<K, V>
    where
        R: FnMut(K, V, V, usize) -> Fut + Send,
        Fut: Future<Output = V> + Send,
    {
        let mut order: Vec<K> = Vec::new();
        let mut states: HashMap<K, KeyState<V>> = HashMap::new();

        while let Some((key, value)) = self.inner.next().await {
            if let Some(mut state) = states.remove(&key) {
                state.count += 1;
                state.acc = reducer(key.clone(), state.acc, value, state.count).await;
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
    /// invokes the reducer against a clone of `initial`, with index 1.
    pub async fn reduce_with<A, R, Fut>(&mut self, initial: A, mut reducer: R) -> ReducedSequence<K, A>
    where
        A: Clone + Send + 'static,
        R: FnMut(K, A, V, usize) -> Fut + Send,
        Fut: Future<Output = A> + Send,
    {
        let mut order: Vec<K> = Vec::new();
        let mut states: HashMap<K, KeyState<A>> = HashMap::new();

        while let Some((key, value)) = self.inner.next().await {
            if let Some(mut state) = states.remove(&key) {
                state.count += 1;
                state.acc = reducer(key.clone(), state.acc, value, state.count).await;
                states.insert(key, state);
            } else {
                order.push(key.clone());
                let acc = reducer(key.clone(), initial.clone(), value, 1).await;
                states.insert(key, KeyState { count: 1, acc });
            }
        }

        collect_in_order(order, states)
    }

    /// Group into `(key, values)` lists in first-insertion key order
    pub async fn to_vec(&mut self) -> Vec<(K, Vec<V>)> {
        let mut order: Vec<K> = Vec::new();
        let mut groups: HashMap<K, Vec<V>> = HashMap::new();

        while let Some((key, value)) = self.inner.next().await {
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
    pub async fn to_map(&mut self) -> HashMap<K, Vec<V>> {
        self.to_vec().await.into_iter().collect()
    }

    /// Group into a map keyed by the property-name form of each key
    pub async fn to_string_map(&mut self) -> HashMap<String, Vec<V>>
    where
        K: ToString,
    {
        self.to_vec()
            .await
            .into_iter()
            .map(|(key, values)| (key.to_string(), values))
            .collect()
    }
}

impl<K, V> std::fmt::Debug for AsyncKeyedSequence<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AsyncKeyedSequence<{}, {}>",
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

struct KeyedFilterCursor<K, V, P, Fut> {
    inner: AsyncSequence<(K, V)>,
    predicate: P,
    accepted: HashMap<K, usize>,
    _pending: PhantomData<fn() -> Fut>,
}

#[async_trait]
impl<K, V, P, Fut> AsyncCursor<(K, V)> for KeyedFilterCursor<K, V, P, Fut>
where
    K: Clone + Eq + Hash + Send + 'static,
    V: Clone + Send + 'static,
    P: FnMut(K, V, usize) -> Fut + Send,
    Fut: Future<Output = bool> + Send,
{
    async fn next(&mut self) -> Option<(K, V)> {
        while let Some((key, value)) = self.inner.next().await {
            let index = self.accepted.get(&key).copied().unwrap_or(0);
            if (self.predicate)(key.clone(), value.clone(), index).await {
                self.accepted.insert(key.clone(), index + 1);
                return Some((key, value));
            }
        }
        None
    }

    async fn close(&mut self) {
        self.inner.close().await;
    }
}

struct KeyedMapCursor<K, V, F, Fut> {
    inner: AsyncSequence<(K, V)>,
    iteratee: F,
    seen: HashMap<K, usize>,
    _pending: PhantomData<fn() -> Fut>,
}

#[async_trait]
impl<K, V, W, F, Fut> AsyncCursor<(K, W)> for KeyedMapCursor<K, V, F, Fut>
where
    K: Clone + Eq + Hash + Send + 'static,
    V: Clone + Send + 'static,
    W: Send,
    F: FnMut(K, V, usize) -> Fut + Send,
    Fut: Future<Output = W> + Send,
{
    async fn next(&mut self) -> Option<(K, W)> {
        let (key, value) = self.inner.next().await?;
        let slot = self.seen.entry(key.clone()).or_insert(0);
        let index = *slot;
        *slot += 1;
        let mapped = (self.iteratee)(key.clone(), value, index).await;
        Some((key, mapped))
    }

    async fn close(&mut self) {
        self.inner.close().await;
    }
}
