//! Typed publish/subscribe event bus
//!
//! In-process fan-out of typed events to registered handlers. Subscriptions
//! are identified by UUID tokens; delivery is synchronous and follows
//! subscription order.

use std::fmt;

use tracing::{debug, trace};
use uuid::Uuid;

use crate::errors::{ToolkitError, ToolkitResult};

/// Token identifying one subscription on an [`EventBus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

type Handler<E> = Box<dyn Fn(&E) + Send + Sync>;

/// Typed event bus delivering to all current subscribers
pub struct EventBus<E> {
    subscribers: Vec<(SubscriptionId, Handler<E>)>,
}

impl<E> EventBus<E> {
    /// Create a bus with no subscribers
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Register a handler and return its subscription token
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = SubscriptionId(Uuid::now_v7());
        self.subscribers.push((id, Box::new(handler)));
        debug!("registered subscriber {}", id);
        id
    }

    /// Remove a subscription by token
    ///
    /// Fails with [`ToolkitError::UnknownSubscription`] when the token was
    /// never issued by this bus or was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> ToolkitResult<()> {
        match self.subscribers.iter().position(|(sid, _)| *sid == id) {
            Some(position) => {
                self.subscribers.remove(position);
                debug!("removed subscriber {}", id);
                Ok(())
            }
            None => Err(ToolkitError::UnknownSubscription(id.to_string())),
        }
    }

    /// Deliver an event to every current subscriber, in subscription order
    pub fn publish(&self, event: &E) {
        trace!("publishing to {} subscribers", self.subscribers.len());
        for (_, handler) in &self.subscribers {
            handler(event);
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EventBus<{}> {{ subscribers: {} }}",
            std::any::type_name::<E>(),
            self.subscribers.len()
        )
    }
}
