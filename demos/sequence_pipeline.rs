// Copyright (c) 2025 - Cowboy AI, Inc.
//! Sequence Pipeline Example
//!
//! Walks through the lazy sequence wrappers and the keyed aggregation
//! pipeline.
//!
//! # Key Concepts
//!
//! 1. **Sequence<T>** - lazy combinators over any pull source
//! 2. **KeyedSequence<K, V>** - grouping and reduction over keyed pairs
//! 3. **ReducedSequence<K, A>** - further processing of reduction output
//!
//! Run with: cargo run --example sequence_pipeline

use cim_toolkit::{KeyedSequence, RuntimeEnv, Sequence};

fn main() {
    let env = RuntimeEnv::capture();
    println!("=== Sequence Pipeline Example ({}) ===\n", env.label());

    // === Example 1: Lazy flat pipeline ===
    println!("=== Example 1: Lazy Flat Pipeline ===");

    let squares = Sequence::from_collection(1..=10)
        .filter(|n, _| n % 2 == 0)
        .map(|n, _| n * n)
        .to_vec();

    println!("even squares up to 10: {:?}", squares);

    let total = Sequence::from_collection(squares).fold(0, |acc, n, _| acc + n);
    println!("their sum: {}\n", total);

    // === Example 2: Deferred source acquisition ===
    println!("=== Example 2: Deferred Source ===");

    let mut deferred = Sequence::deferred(|| {
        println!("(source acquired now, on first pull)");
        Sequence::from_collection(vec!["alpha", "beta"])
    });

    println!("wrapper built, nothing pulled yet");
    println!("first element: {:?}\n", deferred.next());

    // === Example 3: Keyed grouping ===
    println!("=== Example 3: Keyed Grouping ===");

    let requests = vec![
        ("api", 12),
        ("web", 3),
        ("api", 7),
        ("batch", 120),
        ("web", 9),
    ];

    let by_service = KeyedSequence::from_pairs(requests.clone()).to_vec();
    println!("grouped by service: {:?}", by_service);

    // === Example 4: Keyed reduction ===
    println!("\n=== Example 4: Keyed Reduction ===");

    let totals = KeyedSequence::from_pairs(requests)
        .reduce(|_, acc, latency, _| acc + latency)
        .filter(|_, total, _| *total > 10)
        .map(|service, total, _| format!("{} spent {}ms", service, total));

    for (_, line) in totals.pairs() {
        println!("{}", line);
    }
}
