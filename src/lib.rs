//! General-purpose utility toolkit for the Composable Information Machine
//!
//! This crate bundles the small cross-cutting pieces the rest of the stack
//! leans on: lazy sequence pipelines over synchronous and asynchronous
//! pull sources, keyed aggregation with grouping and streaming reduction,
//! a typed in-process event bus, deferred/timed/queued future helpers, and
//! assorted math/date/string utilities.

pub mod bus;
pub mod environment;
pub mod errors;
pub mod grouping;
pub mod sequence;
pub mod task;
pub mod util;

// Re-export commonly used types
pub use bus::{EventBus, SubscriptionId};
pub use environment::RuntimeEnv;
pub use errors::{ToolkitError, ToolkitResult};
pub use grouping::{AsyncKeyedSequence, KeyedPair, KeyedSequence, ReducedSequence};
pub use sequence::{AsyncCursor, AsyncSequence, Cursor, Sequence};
pub use task::{deferred, delayed, timeout, Deferred, DeferredHandle, TaskQueue};
