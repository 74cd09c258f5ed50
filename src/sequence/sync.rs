// Copyright (c) 2025 - Cowboy AI, Inc.
//! Sequence - Lazy Synchronous Pipelines
//!
//! A `Sequence<T>` normalizes any pull-based source into one wrapper type
//! exposing lazy combinators and eager terminal consumers.
//!
//! # Characteristics
//!
//! - **Lazy**: applying a combinator never advances the source; only terminal
//!   consumption (`next`, `fold`, `reduce`, `for_each`, `all`, `any`,
//!   `to_vec`) pulls elements.
//! - **Linear**: combinators consume the wrapper and return a new one closing
//!   over it, so sibling wrappers can never share a cursor position.
//! - **Terminal exhaustion**: once the wrapper observes the end of its source
//!   it never pulls again, even if the raw source could resume. A second
//!   drain yields nothing.
//!
//! # Indexing
//!
//! Every combinator instance keeps its own zero-based draw counter,
//! incremented once per pull it takes from its upstream. For `filter` this
//! means rejected elements still advance the index seen by the predicate.
//!
//! # Examples
//!
//! ```rust,ignore
//! let total = Sequence::from_collection(1..=10)
//!     .filter(|n, _| n % 2 == 0)
//!     .map(|n, _| n * n)
//!     .fold(0, |acc, n, _| acc + n);
//!
//! assert_eq!(total, 220);
//! ```

use super::cursor::{Cursor, FnCursor, IterCursor};
use crate::errors::{ToolkitError, ToolkitResult};

/// Lazy wrapper over a pull-based source
///
/// Built from a collection, a pre-built cursor, a pull routine, or a deferred
/// producer; each constructor dispatches on the source capability once, at
/// construction time.
pub struct Sequence<T> {
    cursor: Box<dyn Cursor<T>>,
    exhausted: bool,
}

impl<T: 'static> Sequence<T> {
    /// Wrap a finite or infinite collection
    pub fn from_collection<I>(collection: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self::from_cursor(IterCursor::new(collection.into_iter()))
    }

    /// Wrap a pre-built cursor
    pub fn from_cursor<C>(cursor: C) -> Self
    where
        C: Cursor<T> + 'static,
    {
        Self {
            cursor: Box::new(cursor),
            exhausted: false,
        }
    }

    /// Wrap an external pull routine
    pub fn from_fn<F>(puller: F) -> Self
    where
        F: FnMut() -> Option<T> + 'static,
    {
        Self::from_cursor(FnCursor::new(puller))
    }

    /// Wrap a producer whose source is acquired on the first pull
    ///
    /// Side effects in source acquisition are deferred until a terminal
    /// consumer actually pulls; closing before the first pull drops the
    /// producer without running it.
    pub fn deferred<F>(producer: F) -> Self
    where
        F: FnOnce() -> Sequence<T> + 'static,
    {
        Self::from_cursor(DeferredCursor {
            state: DeferredState::Pending(Box::new(producer)),
        })
    }

    /// Create an exhausted sequence
    pub fn empty() -> Self {
        Self::from_collection(std::iter::empty())
    }

    /// Pull the next element
    ///
    /// Returns `None` forever once the source has been observed to end.
    pub fn next(&mut self) -> Option<T> {
        if self.exhausted {
            return None;
        }
        match self.cursor.next() {
            Some(value) => Some(value),
            None => {
                self.exhausted = true;
                None
            }
        }
    }

    /// Propagate the cleanup hook to the source and stop pulling
    pub fn close(&mut self) {
        self.cursor.close();
        self.exhausted = true;
    }

    /// Keep only elements satisfying the predicate
    ///
    /// The predicate receives the draw index over all source pulls this
    /// wrapper has examined; rejected elements still increment it.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnMut(&T, usize) -> bool + 'static,
    {
        Sequence::from_cursor(FilterCursor {
            inner: self,
            predicate,
            drawn: 0,
        })
    }

    /// Transform each element one-to-one
    pub fn map<U, F>(self, iteratee: F) -> Sequence<U>
    where
        U: 'static,
        F: FnMut(T, usize) -> U + 'static,
    {
        Sequence::from_cursor(MapCursor {
            inner: self,
            iteratee,
            drawn: 0,
        })
    }

    /// Drain the sequence into an accumulator seeded with `init`
    pub fn fold<A, F>(&mut self, init: A, mut reducer: F) -> A
    where
        F: FnMut(A, T, usize) -> A,
    {
        let mut acc = init;
        let mut index = 0;
        while let Some(value) = self.next() {
            acc = reducer(acc, value, index);
            index += 1;
        }
        acc
    }

    /// Drain the sequence, seeding the accumulator from the first element
    ///
    /// The seed occupies index 0; the reducer sees indices 1, 2, … An
    /// already-empty sequence has nothing to seed from and fails with
    /// [`ToolkitError::EmptySequence`]. An infinite source never returns.
    pub fn reduce<F>(&mut self, mut reducer: F) -> ToolkitResult<T>
    where
        F: FnMut(T, T, usize) -> T,
    {
        let mut acc = match self.next() {
            Some(first) => first,
            None => return Err(ToolkitError::EmptySequence),
        };
        let mut index = 1;
        while let Some(value) = self.next() {
            acc = reducer(acc, value, index);
            index += 1;
        }
        Ok(acc)
    }

    /// Drain the sequence, invoking `f` on every element
    pub fn for_each<F>(&mut self, mut f: F)
    where
        F: FnMut(T, usize),
    {
        let mut index = 0;
        while let Some(value) = self.next() {
            f(value, index);
            index += 1;
        }
    }

    /// Whether every element satisfies the predicate
    ///
    /// Stops pulling at the first falsifying element.
    pub fn all<P>(&mut self, mut predicate: P) -> bool
    where
        P: FnMut(&T, usize) -> bool,
    {
        let mut index = 0;
        while let Some(value) = self.next() {
            if !predicate(&value, index) {
                return false;
            }
            index += 1;
        }
        true
    }

    /// Whether any element satisfies the predicate
    ///
    /// Stops pulling at the first satisfying element.
    pub fn any<P>(&mut self, mut predicate: P) -> bool
    where
        P: FnMut(&T, usize) -> bool,
    {
        let mut index = 0;
        while let Some(value) = self.next() {
            if predicate(&value, index) {
                return true;
            }
            index += 1;
        }
        false
    }

    /// Drain the sequence into an ordered list
    pub fn to_vec(&mut self) -> Vec<T> {
        let mut out = Vec::new();
        while let Some(value) = self.next() {
            out.push(value);
        }
        out
    }
}

impl<T: 'static> Iterator for Sequence<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        Sequence::next(self)
    }
}

impl<T: 'static> Cursor<T> for Sequence<T> {
    fn next(&mut self) -> Option<T> {
        Sequence::next(self)
    }

    fn close(&mut self) {
        Sequence::close(self)
    }
}

impl<T: 'static> From<Vec<T>> for Sequence<T> {
    fn from(values: Vec<T>) -> Self {
        Sequence::from_collection(values)
    }
}

impl<T> std::fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Sequence<{}> {{ exhausted: {} }}",
            std::any::type_name::<T>(),
            self.exhausted
        )
    }
}

struct FilterCursor<T, P> {
    inner: Sequence<T>,
    predicate: P,
    drawn: usize,
}

impl<T: 'static, P> Cursor<T> for FilterCursor<T, P>
where
    P: FnMut(&T, usize) -> bool,
{
    fn next(&mut self) -> Option<T> {
        while let Some(value) = self.inner.next() {
            let index = self.drawn;
            self.drawn += 1;
            if (self.predicate)(&value, index) {
                return Some(value);
            }
        }
        None
    }

    fn close(&mut self) {
        self.inner.close();
    }
}

struct MapCursor<T, F> {
    inner: Sequence<T>,
    iteratee: F,
    drawn: usize,
}

impl<T: 'static, U, F> Cursor<U> for MapCursor<T, F>
where
    F: FnMut(T, usize) -> U,
{
    fn next(&mut self) -> Option<U> {
        let value = self.inner.next()?;
        let index = self.drawn;
        self.drawn += 1;
        Some((self.iteratee)(value, index))
    }

    fn close(&mut self) {
        self.inner.close();
    }
}

enum DeferredState<T> {
    Pending(Box<dyn FnOnce() -> Sequence<T>>),
    Active(Sequence<T>),
}

struct DeferredCursor<T> {
    state: DeferredState<T>,
}

impl<T: 'static> Cursor<T> for DeferredCursor<T> {
    fn next(&mut self) -> Option<T> {
        let state = std::mem::replace(&mut self.state, DeferredState::Active(Sequence::empty()));
        let mut sequence = match state {
            DeferredState::Pending(producer) => producer(),
            DeferredState::Active(sequence) => sequence,
        };
        let value = sequence.next();
        self.state = DeferredState::Active(sequence);
        value
    }

    fn close(&mut self) {
        match &mut self.state {
            DeferredState::Active(sequence) => sequence.close(),
            DeferredState::Pending(_) => {
                // producer is dropped without ever running
                self.state = DeferredState::Active(Sequence::empty());
            }
        }
    }
}
