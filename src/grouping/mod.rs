// Copyright (c) 2025 - Cowboy AI, Inc.
//! Keyed Aggregation Pipelines
//!
//! Grouping and streaming reduction over streams of `(key, value)` pairs,
//! without advance knowledge of key cardinality. Two strategies:
//!
//! - **Eager grouping** into key → value-list structures (`to_vec`,
//!   `to_map`, `to_string_map`).
//! - **Streaming reduction** into key → accumulator pairs
//!   ([`ReducedSequence`]), which supports further filtering and mapping.
//!
//! Combinator indices here are scoped per key, unlike the flat wrappers'
//! uniform draw index; see [`keyed`] for the acceptance rules.

pub mod keyed;
pub mod keyed_stream;
pub mod reduced;

pub use keyed::KeyedSequence;
pub use keyed_stream::AsyncKeyedSequence;
pub use reduced::ReducedSequence;

/// The unit of data flowing through an aggregation pipeline
pub type KeyedPair<K, V> = (K, V);
