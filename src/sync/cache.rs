use std::sync::{Arc, Mutex};

use crate::transport::MessageCallback;

/// Slot holding the most recently received payload on one channel.
///
/// Written by the channel's delivery callback and by the readiness
/// gate, read by the non-blocking accessors. The mutex guarantees a
/// reader never observes a half-written payload. Once set, the slot is
/// overwritten on every delivery and never cleared.
pub struct SensorCache<T> {
    slot: Arc<Mutex<Option<T>>>,
}

impl<T> Clone for SensorCache<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Default for SensorCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SensorCache<T> {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }

    pub fn store(&self, value: T) {
        *self.slot.lock().unwrap() = Some(value);
    }

    pub fn is_set(&self) -> bool {
        self.slot.lock().unwrap().is_some()
    }
}

impl<T: Clone + Send + 'static> SensorCache<T> {
    /// Most recent payload, without blocking.
    pub fn latest(&self) -> Option<T> {
        self.slot.lock().unwrap().clone()
    }

    /// Callback that routes every delivery into this cache.
    pub fn updater(&self) -> MessageCallback<T> {
        let slot = Arc::clone(&self.slot);
        Arc::new(move |value: T| {
            *slot.lock().unwrap() = Some(value);
        })
    }
}
