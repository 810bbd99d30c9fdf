/// Event bus
/// Publish/subscribe by event name, the `listen`/`emit` pair of the host

use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

use crate::error::CapabilityError;

/// Handle returned by `listen`, used to stop listening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u32);

impl ListenerId {
    /// Hand out the id in `counter` and advance it, wrapping at `u32::MAX`
    pub fn take_next(counter: &mut u32) -> Self {
        let id = ListenerId(*counter);
        *counter = counter.wrapping_add(1);
        id
    }
}

pub type EventHandler = Arc<dyn Fn(Value) + Send + Sync>;

pub trait EventBus {
    /// Deliver `payload` to every listener of `event`
    fn emit(&self, event: &str, payload: Value) -> Result<(), CapabilityError>;

    /// Call `handler` for each future emission of `event`
    fn listen(&self, event: &str, handler: EventHandler) -> Result<ListenerId, CapabilityError>;

    /// Remove a listener; unknown ids are ignored
    fn unlisten(&self, id: ListenerId);
}

struct Listener {
    id: ListenerId,
    event: String,
    handler: EventHandler,
}

/// In-process bus: handlers run synchronously on the emitting thread,
/// in registration order
pub struct LocalEventBus {
    listeners: Mutex<Vec<Listener>>,
    next_id: Mutex<u32>,
}

impl LocalEventBus {
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
        }
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .lock()
            .iter()
            .filter(|l| l.event == event)
            .count()
    }
}

impl Default for LocalEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus for LocalEventBus {
    fn emit(&self, event: &str, payload: Value) -> Result<(), CapabilityError> {
        // Snapshot first so a handler may listen/unlisten without deadlocking
        let handlers: Vec<EventHandler> = self
            .listeners
            .lock()
            .iter()
            .filter(|l| l.event == event)
            .map(|l| Arc::clone(&l.handler))
            .collect();

        log::debug!("[Events] emit {} to {} listener(s)", event, handlers.len());
        for handler in handlers {
            handler(payload.clone());
        }
        Ok(())
    }

    fn listen(&self, event: &str, handler: EventHandler) -> Result<ListenerId, CapabilityError> {
        let id = ListenerId::take_next(&mut self.next_id.lock());

        self.listeners.lock().push(Listener {
            id,
            event: event.to_string(),
            handler,
        });
        Ok(id)
    }

    fn unlisten(&self, id: ListenerId) {
        self.listeners.lock().retain(|l| l.id != id);
    }
}
