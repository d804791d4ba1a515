use std::time::Duration;

use log::debug;

use crate::shutdown::ShutdownToken;
use crate::sync::WaitError;
use crate::transport::Publication;

/// Wait for a downstream subscriber before trusting delivery.
///
/// A control topic can be published before the simulator plugin has
/// subscribed, silently dropping the first command. This runs before
/// every delivery-dependent publish, not once at startup: a consumer
/// that was connected earlier may have gone away.
pub struct PublisherHandshake {
    poll_period: Duration,
    shutdown: ShutdownToken,
}

impl PublisherHandshake {
    pub fn new(poll_period: Duration, shutdown: ShutdownToken) -> Self {
        Self {
            poll_period,
            shutdown,
        }
    }

    /// Busy-poll until `publication` has at least one subscriber.
    pub fn ensure_connected<T>(
        &self,
        publication: &dyn Publication<T>,
        name: &str,
    ) -> Result<(), WaitError> {
        loop {
            if self.shutdown.is_triggered() {
                return Err(WaitError::Cancelled);
            }
            if publication.subscriber_count() > 0 {
                debug!("publisher `{name}` connected");
                return Ok(());
            }
            debug!("no subscribers on `{name}` yet, waiting");
            std::thread::sleep(self.poll_period);
        }
    }
}
