use std::time::Duration;

use crate::sync::SensorCache;
use crate::transport::{Subscription, TransportError};

/// One inbound channel: name, transport handle and latest-value cache.
///
/// The cache starts unset and is populated either by the readiness
/// gate or, once [`attach_listener`](Self::attach_listener) has run,
/// by every delivery from the transport.
pub struct SensorChannel<T> {
    name: String,
    subscription: Box<dyn Subscription<T>>,
    cache: SensorCache<T>,
}

impl<T: Clone + Send + 'static> SensorChannel<T> {
    pub fn new(name: impl Into<String>, subscription: Box<dyn Subscription<T>>) -> Self {
        Self {
            name: name.into(),
            subscription,
            cache: SensorCache::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Route every subsequent delivery into the cache.
    pub fn attach_listener(&self) {
        self.subscription.listen(self.cache.updater());
    }

    /// Most recent payload, without blocking.
    pub fn latest(&self) -> Option<T> {
        self.cache.latest()
    }

    /// Whether at least one payload has been cached.
    pub fn is_ready(&self) -> bool {
        self.cache.is_set()
    }

    pub(crate) fn wait_for_message(&self, timeout: Duration) -> Result<T, TransportError> {
        self.subscription.wait_for_message(timeout)
    }

    pub(crate) fn store(&self, value: T) {
        self.cache.store(value);
    }
}
