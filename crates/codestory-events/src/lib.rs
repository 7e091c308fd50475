use codestory_core::{NodeId, SourceReference};
use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // Edge interaction
    EdgeHovered {
        source: NodeId,
        target: NodeId,
    },
    EdgeSelected {
        source: NodeId,
        target: NodeId,
    },
    EdgeSelectionCleared,

    // Code View
    /// Open the referenced location in the code view / external editor.
    ShowReference {
        location: SourceReference,
    },
    /// A "show in editor" request for an edge that carries no reference.
    ShowReferenceMissing,

    // Graph
    GraphNodeMove {
        id: NodeId,
        x: f32,
        y: f32,
    },

    // UI
    StatusUpdate {
        message: String,
    },
}

#[derive(Clone)]
pub struct EventBus {
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    pub fn receiver(&self) -> Receiver<Event> {
        self.rx.clone()
    }

    pub fn publish(&self, event: Event) {
        if self.tx.send(event).is_err() {
            tracing::warn!("Event bus has no receivers, event dropped");
        }
    }

    /// Dispatch all pending events to a listener.
    /// This is useful for processing events in the UI loop.
    pub fn dispatch_to<L: EventListener>(&self, listener: &mut L) {
        while let Ok(event) = self.rx.try_recv() {
            listener.handle_event(&event);
        }
    }
}

/// Trait for components that respond to events.
/// Implement this to receive events from the EventBus.
pub trait EventListener {
    fn handle_event(&mut self, event: &Event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_bus_publish_receive() {
        let bus = EventBus::new();
        let sender = bus.sender();
        let receiver = bus.receiver();

        let event = Event::ShowReference {
            location: SourceReference::new("src/lib.rs", 10, 4),
        };

        sender.send(event.clone()).unwrap();

        match receiver.recv().unwrap() {
            Event::ShowReference { location } => {
                assert_eq!(location.file, "src/lib.rs");
                assert_eq!(location.line, 10);
                assert_eq!(location.column, 4);
            }
            other => panic!("Expected ShowReference event, got {:?}", other),
        }
    }

    #[derive(Default)]
    struct Collector {
        seen: Vec<Event>,
    }

    impl EventListener for Collector {
        fn handle_event(&mut self, event: &Event) {
            self.seen.push(event.clone());
        }
    }

    #[test]
    fn test_dispatch_drains_in_order() {
        let bus = EventBus::new();
        bus.publish(Event::EdgeHovered {
            source: NodeId(1),
            target: NodeId(2),
        });
        bus.publish(Event::EdgeSelectionCleared);

        let mut collector = Collector::default();
        bus.dispatch_to(&mut collector);

        assert_eq!(
            collector.seen,
            vec![
                Event::EdgeHovered {
                    source: NodeId(1),
                    target: NodeId(2),
                },
                Event::EdgeSelectionCleared,
            ]
        );

        // Queue is empty afterwards
        let mut again = Collector::default();
        bus.dispatch_to(&mut again);
        assert!(again.seen.is_empty());
    }

    #[test]
    fn test_event_serde() {
        let event = Event::GraphNodeMove {
            id: NodeId(7),
            x: 1.5,
            y: -2.0,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
