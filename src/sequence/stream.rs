// Copyright (c) 2025 - Cowboy AI, Inc.
//! AsyncSequence - Lazy Suspending Pipelines
//!
//! The asynchronous counterpart of [`Sequence`](super::sync::Sequence): the
//! same combinator surface, but every pull may suspend, and every
//! user-supplied predicate/iteratee/reducer returns a future that is awaited
//! before the pipeline proceeds. A synchronous callback result is expressed
//! as an immediately-ready future (`async move { .. }`).
//!
//! # Suspension model
//!
//! Suspension points are exactly the upstream pulls and the user-callback
//! awaits. Pulls on one wrapper are strictly sequential: the wrapper is
//! driven through `&mut self`, so overlapping pulls on the same instance are
//! ruled out at compile time, and source order and index bookkeeping stay
//! deterministic.
//!
//! # Cancellation
//!
//! Consumption is pull-driven, so stopping early simply means not calling
//! `next` again. `close` additionally propagates a cooperative cleanup signal
//! to sources that hold resources; without it, cleanup falls back to `Drop`.
//!
//! # Values
//!
//! Callbacks receive owned values (`T: Clone`; `filter` hands the predicate a
//! clone and yields the original), so callback futures never borrow from the
//! pipeline's interior.

use std::collections::HashSet;
use std::future::Future;
use std::hash::Hash;
use std::marker::PhantomData;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{Stream, StreamExt};

use crate::errors::{ToolkitError, ToolkitResult};

/// Stateful pull handle whose advancement may suspend
#[async_trait]
pub trait AsyncCursor<T: Send>: Send {
    /// Pull the next element, or `None` once the source is exhausted
    async fn next(&mut self) -> Option<T>;

    /// Signal early termination to the source
    async fn close(&mut self) {}
}

/// Lazy wrapper over a suspending pull-based source
pub struct AsyncSequence<T> {
    cursor: Box<dyn AsyncCursor<T>>,
    exhausted: bool,
}

impl<T: Clone + Send + 'static> AsyncSequence<T> {
    /// Wrap a finite or infinite collection
    pub fn from_collection<I>(collection: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        Self::from_cursor(SyncBridge {
            iter: collection.into_iter(),
        })
    }

    /// Wrap a pre-built asynchronous cursor
    pub fn from_cursor<C>(cursor: C) -> Self
    where
        C: AsyncCursor<T> + 'static,
    {
        Self {
            cursor: Box::new(cursor),
            exhausted: false,
        }
    }

    /// Wrap a `futures` stream
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = T> + Send + Unpin + 'static,
    {
        Self::from_cursor(StreamBridge { stream })
    }

    /// Wrap an asynchronous producer whose source is acquired on the first pull
    pub fn deferred<F, Fut>(producer: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = AsyncSequence<T>> + Send + 'static,
    {
        Self::from_cursor(DeferredCursor {
            state: DeferredState::Pending(Box::new(move || producer().boxed())),
        })
    }

    /// Create an exhausted sequence
    pub fn empty() -> Self {
        Self::from_collection(std::iter::empty())
    }

    /// Pull the next element
    ///
    /// Returns `None` forever once the source has been observed to end.
    pub async fn next(&mut self) -> Option<T> {
        if self.exhausted {
            return None;
        }
        match self.cursor.next().await {
            Some(value) => Some(value),
            None => {
                self.exhausted = true;
                None
            }
        }
    }

    /// Propagate the cleanup hook to the source and stop pulling
    pub async fn close(&mut self) {
        self.cursor.close().await;
        self.exhausted = true;
    }

    /// Keep only elements whose awaited predicate result is true
    ///
    /// Same draw-index semantics as the synchronous wrapper: rejected
    /// elements still increment the index.
    pub fn filter<P, Fut>(self, predicate: P) -> Self
    where
        P: FnMut(T, usize) -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Self::from_cursor(FilterCursor {
            inner: self,
            predicate,
            drawn: 0,
            _pending: PhantomData,
        })
    }

    /// Transform each element through an awaited iteratee
    pub fn map<U, F, Fut>(self, iteratee: F) -> AsyncSequence<U>
    where
        U: Clone + Send + 'static,
        F: FnMut(T, usize) -> Fut + Send + 'static,
        Fut: Future<Output = U> + Send + 'static,
    {
        AsyncSequence::from_cursor(MapCursor {
            inner: self,
            iteratee,
            drawn: 0,
            _pending: PhantomData,
        })
    }

    /// Keep only the first occurrence of each distinct value
    ///
    /// Seen values are tracked in a growing set, so memory grows with the
    /// number of distinct values drained through this wrapper.
    pub fn unique(self) -> Self
    where
        T: Eq + Hash,
    {
        Self::from_cursor(UniqueCursor {
            inner: self,
            seen: HashSet::new(),
        })
    }

    /// Drain the sequence into an accumulator seeded with `init`
    pub async fn fold<A, F, Fut>(&mut self, init: A, mut reducer: F) -> A
    where
        F: FnMut(A, T, usize) -> Fut + Send,
        Fut: Future<Output = A> + Send,
    {
        let mut acc = init;
        let mut index = 0;
        while let Some(value) = self.next().await {
            acc = reducer(acc, value, index).await;
            index += 1;
        }
        acc
    }

    /// Drain the sequence, seeding the accumulator from the first element
    ///
    /// Fails with [`ToolkitError::EmptySequence`] when the source is empty;
    /// the seed occupies index 0 and the reducer sees indices 1, 2, …
    pub async fn reduce<F, Fut>(&mut self, mut reducer: F) -> ToolkitResult<T>
    where
        F: FnMut(T, T, usize) -> Fut + Send,
        Fut: Future<Output = T> + Send,
    {
        let mut acc = match self.next().await {
            Some(first) => first,
            None => return Err(ToolkitError::EmptySequence),
        };
        let mut index = 1;
        while let Some(value) = self.next().await {
            acc = reducer(acc, value, index).await;
            index += 1;
        }
        Ok(acc)
    }

    /// Drain the sequence, awaiting `f` on every element
    pub async fn for_each<F, Fut>(&mut self, mut f: F)
    where
        F: FnMut(T, usize) -> Fut + Send,
        Fut: Future<Output = ()> + Send,
    {
        let mut index = 0;
        while let Some(value) = self.next().await {
            f(value, index).await;
            index += 1;
        }
    }

    /// Whether every element satisfies the awaited predicate
    ///
    /// Stops pulling at the first falsifying element.
    pub async fn all<P, Fut>(&mut self, mut predicate: P) -> bool
    where
        P: FnMut(T, usize) -> Fut + Send,
        Fut: Future<Output = bool> + Send,
    {
        let mut index = 0;
        while let Some(value) = self.next().await {
            if !predicate(value, index).await {
                return false;
            }
            index += 1;
        }
        true
    }

    /// Whether any element satisfies the awaited predicate
    ///
    /// Stops pulling at the first satisfying element.
    pub async fn any<P, Fut>(&mut self, mut predicate: P) -> bool
    where
        P: FnMut(T, usize) -> Fut + Send,
        Fut: Future<Output = bool> + Send,
    {
        let mut index = 0;
        while let Some(value) = self.next().await {
            if predicate(value, index).await {
                return true;
            }
            index += 1;
        }
        false
    }

    /// Drain the sequence into an ordered list
    pub async fn to_vec(&mut self) -> Vec<T> {
        let mut out = Vec::new();
        while let Some(value) = self.next().await {
            out.push(value);
        }
        out
    }

    /// Expose the sequence as a `futures` stream
    pub fn into_stream(self) -> impl Stream<Item = T> {
        futures::stream::unfold(self, |mut sequence| async move {
            sequence.next().await.map(|value| (value, sequence))
        })
    }
}

#[async_trait]
impl<T: Clone + Send + 'static> AsyncCursor<T> for AsyncSequence<T> {
    async fn next(&mut self) -> Option<T> {
        AsyncSequence::next(self).await
    }

    async fn close(&mut self) {
        AsyncSequence::close(self).await
    }
}

impl<T> std::fmt::Debug for AsyncSequence<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AsyncSequence<{}> {{ exhausted: {} }}",
            std::any::type_name::<T>(),
            self.exhausted
        )
    }
}

struct SyncBridge<I> {
    iter: I,
}

#[async_trait]
impl<I> AsyncCursor<I::Item> for SyncBridge<I>
where
    I: Iterator + Send,
    I::Item: Send,
{
    async fn next(&mut self) -> Option<I::Item> {
        self.iter.next()
    }
}

struct StreamBridge<S> {
    stream: S,
}

#[async_trait]
impl<S> AsyncCursor<S::Item> for StreamBridge<S>
where
    S: Stream + Send + Unpin,
    S::Item: Send,
{
    async fn next(&mut self) -> Option<S::Item> {
        self.stream.next().await
    }
}

enum DeferredState<T> {
    Pending(Box<dyn FnOnce() -> BoxFuture<'static, AsyncSequence<T>> + Send>),
    Active(AsyncSequence<T>),
}

struct DeferredCursor<T> {
    state: DeferredState<T>,
}

#[async_trait]
impl<T: Clone + Send + 'static> AsyncCursor<T> for DeferredCursor<T> {
    async fn next(&mut self) -> Option<T> {
        let state = std::mem::replace(
            &mut self.state,
            DeferredState::Active(AsyncSequence::empty()),
        );
        let mut sequence = match state {
            DeferredState::Pending(producer) => producer().await,
            DeferredState::Active(sequence) => sequence,
        };
        let value = sequence.next().await;
        self.state = DeferredState::Active(sequence);
        value
    }

    async fn close(&mut self) {
        match &mut self.state {
            DeferredState::Active(sequence) => sequence.close().await,
            DeferredState::Pending(_) => {
                // producer is dropped without ever running
                self.state = DeferredState::Active(AsyncSequence::empty());
            }
        }
    }
}

struct FilterCursor<T, P, Fut> {
    inner: AsyncSequence<T>,
    predicate: P,
    drawn: usize,
    _pending: PhantomData<fn() -> Fut>,
}

#[async_trait]
impl<T, P, Fut> AsyncCursor<T> for FilterCursor<T, P, Fut>
where
    T: Clone + Send + 'static,
    P: FnMut(T, usize) -> Fut + Send,
    Fut: Future<Output = bool> + Send,
{
    async fn next(&mut self) -> Option<T> {
        while let Some(value) = self.inner.next().await {
            let index = self.drawn;
            self.drawn += 1;
            if (self.predicate)(value.clone(), index).await {
                return Some(value);
            }
        }
        None
    }

    async fn close(&mut self) {
        self.inner.close().await;
    }
}

struct MapCursor<T, F, Fut> {
    inner: AsyncSequence<T>,
    iteratee: F,
    drawn: usize,
    _pending: PhantomData<fn() -> Fut>,
}

#[async_trait]
impl<T, U, F, Fut> AsyncCursor<U> for MapCursor<T, F, Fut>
where
    T: Clone + Send + 'static,
    U: Send,
    F: FnMut(T, usize) -> Fut + Send,
    Fut: Future<Output = U> + Send,
{
    async fn next(&mut self) -> Option<U> {
        let value = self.inner.next().await?;
        let index = self.drawn;
        self.drawn += 1;
        Some((self.iteratee)(value, index).await)
    }

    async fn close(&mut self) {
        self.inner.close().await;
    }
}

struct UniqueCursor<T> {
    inner: AsyncSequence<T>,
    seen: HashSet<T>,
}

#[async_trait]
impl<T: Clone + Eq + Hash + Send + 'static> AsyncCursor<T> for UniqueCursor<T> {
    async fn next(&mut self) -> Option<T> {
        while let Some(value) = self.inner.next().await {
            if self.seen.insert(value.clone()) {
                return Some(value);
            }
        }
        None
    }

    async fn close(&mut self) {
        self.inner.close().await;
    }
}
