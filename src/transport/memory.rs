use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use super::{MessageCallback, Publication, Subscription, TransportError};

/// Per-subscriber queue depth. A consumer that stops draining loses
/// messages once its queue fills, like a real bus with a bounded
/// queue_size.
const QUEUE_DEPTH: usize = 64;

/// In-process pub/sub topic backed by crossbeam channels.
///
/// Publishing fans a message out to every subscriber queue, then runs
/// listener callbacks on the publishing thread. That keeps delivery on
/// a different thread than the one blocked in `wait_for_message`,
/// mirroring the asynchronous delivery context of a real transport.
pub struct MemoryTopic<T> {
    inner: Arc<TopicInner<T>>,
}

struct TopicInner<T> {
    name: String,
    queues: Mutex<Vec<Sender<T>>>,
    listeners: Mutex<Vec<MessageCallback<T>>>,
}

impl<T> Clone for MemoryTopic<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> MemoryTopic<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(TopicInner {
                name: name.into(),
                queues: Mutex::new(Vec::new()),
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Handle for the publishing side of the topic.
    pub fn publisher(&self) -> MemoryPublisher<T> {
        MemoryPublisher {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Attach a new subscriber with its own delivery queue.
    ///
    /// Messages published before this call are not replayed.
    pub fn subscribe(&self) -> MemorySubscriber<T> {
        let (tx, rx) = crossbeam_channel::bounded(QUEUE_DEPTH);
        self.inner.queues.lock().unwrap().push(tx);
        MemorySubscriber {
            inner: Arc::clone(&self.inner),
            queue: rx,
        }
    }
}

/// Publishing handle for a [`MemoryTopic`].
pub struct MemoryPublisher<T> {
    inner: Arc<TopicInner<T>>,
}

impl<T> Clone for MemoryPublisher<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> Publication<T> for MemoryPublisher<T> {
    fn publish(&self, msg: T) -> Result<(), TransportError> {
        {
            let queues = self.inner.queues.lock().unwrap();
            for queue in queues.iter() {
                // Full or abandoned queues drop the message.
                let _ = queue.try_send(msg.clone());
            }
        }

        // Snapshot the listener list so a callback can attach further
        // listeners without deadlocking.
        let listeners: Vec<MessageCallback<T>> =
            self.inner.listeners.lock().unwrap().clone();
        for listener in &listeners {
            listener(msg.clone());
        }
        Ok(())
    }

    fn subscriber_count(&self) -> usize {
        let queues = self.inner.queues.lock().unwrap().len();
        let listeners = self.inner.listeners.lock().unwrap().len();
        queues + listeners
    }
}

/// Subscribing handle for a [`MemoryTopic`].
pub struct MemorySubscriber<T> {
    inner: Arc<TopicInner<T>>,
    queue: Receiver<T>,
}

impl<T: Clone + Send + 'static> Subscription<T> for MemorySubscriber<T> {
    fn wait_for_message(&self, timeout: Duration) -> Result<T, TransportError> {
        self.queue.recv_timeout(timeout).map_err(|err| match err {
            RecvTimeoutError::Timeout => TransportError::Timeout,
            RecvTimeoutError::Disconnected => TransportError::Closed,
        })
    }

    fn listen(&self, callback: MessageCallback<T>) {
        self.inner.listeners.lock().unwrap().push(callback);
    }
}
