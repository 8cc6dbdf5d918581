use crate::domain::Message;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// FIFO of messages received since the last drain
///
/// Cloning yields another handle to the same queue: the transport side adds
/// from its delivery context while the dispatch loop drains. `add` and
/// `drain_all` are serialized by one lock, so a drain sees every message
/// added before it and none added after it.
#[derive(Debug, Clone, Default)]
pub struct MessageBuffer {
    queue: Arc<Mutex<VecDeque<Message>>>,
}

impl MessageBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
        }
    }

    /// Append at the tail (never fails)
    pub fn add(&self, msg: Message) {
        let mut queue = self.lock();
        queue.push_back(msg);
        tracing::trace!(pending = queue.len(), "message buffered");
    }

    /// Take everything pending, in arrival order, leaving the buffer empty
    pub fn drain_all(&self) -> Vec<Message> {
        let drained = std::mem::take(&mut *self.lock());
        drained.into()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock leaves the queue itself intact,
    // so keep using it instead of propagating the poison.
    fn lock(&self) -> MutexGuard<'_, VecDeque<Message>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
