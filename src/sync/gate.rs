use std::time::Duration;

use log::{debug, error};

use crate::shutdown::ShutdownToken;
use crate::sync::{SensorChannel, WaitError};

/// Blocking-with-retry acquisition of the latest value on a channel.
///
/// Each attempt is a bounded single-message wait; attempts repeat
/// until a payload arrives, shutdown is triggered, or the opt-in
/// attempt bound runs out. Unbounded retry is the default because the
/// first message from a simulated sensor can lag far behind
/// subscription while the plant warms up.
pub struct ReadinessGate {
    timeout: Duration,
    max_attempts: Option<u32>,
    shutdown: ShutdownToken,
}

impl ReadinessGate {
    pub fn new(timeout: Duration, max_attempts: Option<u32>, shutdown: ShutdownToken) -> Self {
        Self {
            timeout,
            max_attempts,
            shutdown,
        }
    }

    /// Block until `channel` has delivered a payload.
    ///
    /// The received value is also stored into the channel cache, so
    /// later plain reads return without blocking. Transport errors on
    /// a single attempt are logged and retried, never surfaced. On
    /// shutdown this returns `Err(WaitError::Cancelled)` rather than a
    /// possibly-stale cached value.
    pub fn await_value<T: Clone + Send + 'static>(
        &self,
        channel: &SensorChannel<T>,
    ) -> Result<T, WaitError> {
        let mut attempts = 0u32;
        loop {
            if self.shutdown.is_triggered() {
                return Err(WaitError::Cancelled);
            }

            match channel.wait_for_message(self.timeout) {
                Ok(value) => {
                    channel.store(value.clone());
                    debug!("channel `{}` ready", channel.name());
                    return Ok(value);
                }
                Err(err) => {
                    attempts = attempts.saturating_add(1);
                    error!("channel `{}` not ready yet ({err}), retrying", channel.name());
                    if let Some(max) = self.max_attempts {
                        if attempts >= max {
                            return Err(WaitError::AttemptsExhausted(attempts));
                        }
                    }
                }
            }
        }
    }
}
