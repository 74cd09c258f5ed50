// Copyright (c) 2025 - Cowboy AI, Inc.
//! Lazy Sequence Pipelines
//!
//! This module normalizes pull-based sources into wrapper types exposing
//! lazy combinators and eager terminal consumers, in a synchronous and an
//! asynchronous flavor.
//!
//! # Core Concepts
//!
//! ## Cursor
//!
//! A stateful pull handle advanced one element at a time. Every source a
//! wrapper accepts (a collection, an external pull routine, a deferred
//! producer) is normalized into a cursor at construction time.
//!
//! ## Combinators vs terminals
//!
//! `filter` and `map` are combinators: they return a new wrapper closing
//! over the previous one and never advance the source. `next`, `fold`,
//! `reduce`, `for_each`, `all`, `any`, and `to_vec` are terminal consumers:
//! they are the only operations that pull.
//!
//! ```text
//! source ──▶ filter ──▶ map ──▶ (no pulls yet)
//!                                │
//!                        to_vec()│  pulls flow upstream one element
//!                                ▼  at a time
//!                              [..]
//! ```
//!
//! ## Indexing
//!
//! Each derived wrapper keeps its own zero-based draw counter, incremented
//! once per pull it takes from its upstream. For `filter`, rejected
//! elements still advance the index the predicate observes.

pub mod cursor;
pub mod stream;
pub mod sync;

pub use cursor::{Cursor, FnCursor, IterCursor};
pub use stream::{AsyncCursor, AsyncSequence};
pub use sync::Sequence;
