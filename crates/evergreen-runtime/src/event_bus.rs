//! Event bus for broadcasting card events

use crate::event::CardEvent;

/// A simple event queue that the session pushes to and consumers drain
pub struct EventBus {
    events: Vec<CardEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event onto the bus
    pub fn push(&mut self, event: CardEvent) {
        self.events.push(event);
    }

    /// Drain all events from the bus, returning them
    pub fn drain(&mut self) -> Vec<CardEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_drain() {
        let mut bus = EventBus::new();
        assert!(bus.is_empty());

        bus.push(CardEvent::Exploded);
        bus.push(CardEvent::WishReady("merry".into()));

        assert_eq!(bus.len(), 2);

        let events = bus.drain();
        assert_eq!(events, vec![CardEvent::Exploded, CardEvent::WishReady("merry".into())]);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_drain_clears() {
        let mut bus = EventBus::new();
        bus.push(CardEvent::Reset);

        let _ = bus.drain();
        assert!(bus.drain().is_empty());
    }
}
