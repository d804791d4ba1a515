mod cache;
mod channel;
mod gate;
mod handshake;
mod height;

pub use cache::SensorCache;
pub use channel::SensorChannel;
pub use gate::ReadinessGate;
pub use handshake::PublisherHandshake;
pub use height::{Crossing, HeightMonitor};

use thiserror::Error;

/// Failure modes of the blocking waits.
///
/// Transport timeouts are recovered internally by retrying and never
/// show up here.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitError {
    /// Shutdown was triggered while the wait was in progress. The
    /// caller must treat this as cancellation, not as a stale success.
    #[error("wait cancelled by shutdown")]
    Cancelled,

    /// The opt-in attempt bound ran out before a payload arrived.
    #[error("gave up after {0} readiness attempts")]
    AttemptsExhausted(u32),
}
