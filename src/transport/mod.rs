mod memory;

pub use memory::{MemoryPublisher, MemorySubscriber, MemoryTopic};

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

/// Callback invoked by the transport on every delivery.
///
/// Runs on the transport's own thread, so implementations must be
/// cheap and must not block.
pub type MessageCallback<T> = Arc<dyn Fn(T) + Send + Sync>;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("timed out waiting for a message")]
    Timeout,

    #[error("channel closed")]
    Closed,
}

/// Inbound side of a named channel.
pub trait Subscription<T>: Send {
    /// Block for at most `timeout` for the next message.
    fn wait_for_message(&self, timeout: Duration) -> Result<T, TransportError>;

    /// Register a callback run on the transport's delivery context.
    fn listen(&self, callback: MessageCallback<T>);
}

/// Outbound side of a named channel.
pub trait Publication<T>: Send {
    fn publish(&self, msg: T) -> Result<(), TransportError>;

    /// Number of downstream consumers currently attached.
    fn subscriber_count(&self) -> usize;
}

/// Pause/resume control over the physics simulator.
///
/// Both calls are idempotent; pausing an already-paused simulation is
/// safe.
pub trait SimControl: Send {
    fn pause(&self);
    fn unpause(&self);
}

/// `SimControl` that does nothing, for wiring without a simulator.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSim;

impl SimControl for NoopSim {
    fn pause(&self) {
        // intentionally no-op
    }

    fn unpause(&self) {
        // intentionally no-op
    }
}
