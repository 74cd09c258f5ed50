// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event Bus and Task Helper Example
//!
//! Shows the typed publish/subscribe bus working together with the
//! deferred/timed/queued future helpers.
//!
//! Run with: cargo run --example bus_and_tasks

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use cim_toolkit::{deferred, delayed, timeout, AsyncSequence, EventBus, TaskQueue};
use tracing::info;

#[derive(Debug, Clone)]
enum DeployEvent {
    Started { service: String },
    Finished { service: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("starting bus and task example");

    // Typed bus with a subscriber resolving a deferred value
    let mut bus = EventBus::new();
    let (handle, finished) = deferred();

    let slot = Arc::new(Mutex::new(Some(handle)));
    bus.subscribe(move |event: &DeployEvent| {
        if let DeployEvent::Finished { service } = event {
            if let Some(handle) = slot.lock().unwrap().take() {
                handle.resolve(service.clone());
            }
        }
    });

    bus.publish(&DeployEvent::Started {
        service: "billing".to_string(),
    });
    bus.publish(&DeployEvent::Finished {
        service: "billing".to_string(),
    });

    let service = timeout(Duration::from_secs(1), finished).await??;
    info!("deploy finished for {}", service);

    // Sequential task queue over an async pipeline
    let queue = Arc::new(TaskQueue::new());
    let mut checks = AsyncSequence::from_collection(vec!["db", "cache", "queue"]);

    while let Some(target) = checks.next().await {
        let queue = queue.clone();
        queue
            .run(|| async move {
                let status = delayed("ok", Duration::from_millis(10)).await;
                info!("health check {} -> {}", target, status);
            })
            .await;
    }

    info!("all checks completed in submission order");
    Ok(())
}
