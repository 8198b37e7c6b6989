//! Selection state broadcasting

use machina_core::NodeId;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Broadcast to subscribers whenever the selection changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    Selected(NodeId),
    Cleared,
}

/// The single source of truth for "the currently selected node".
///
/// The viewport writes it, panels subscribe to it. A new subscriber
/// immediately receives the current state, so late subscribers never
/// start out of sync.
#[derive(Default)]
pub struct SelectionHub {
    current: Option<NodeId>,
    subscribers: Vec<Sender<SelectionEvent>>,
}

impl SelectionHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Subscribe to selection changes. The latest state is replayed
    /// into the returned channel before any new events arrive.
    pub fn subscribe(&mut self) -> Receiver<SelectionEvent> {
        let (tx, rx) = channel();
        let _ = tx.send(match self.current {
            Some(id) => SelectionEvent::Selected(id),
            None => SelectionEvent::Cleared,
        });
        self.subscribers.push(tx);
        rx
    }

    pub fn select(&mut self, id: NodeId) {
        self.set(Some(id));
    }

    pub fn clear(&mut self) {
        self.set(None);
    }

    /// Update the selection; no-op (and no broadcast) when unchanged
    pub fn set(&mut self, selection: Option<NodeId>) {
        if self.current == selection {
            return;
        }
        self.current = selection;
        let event = match selection {
            Some(id) => SelectionEvent::Selected(id),
            None => SelectionEvent::Cleared,
        };
        // Drop subscribers whose receiving end is gone
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_then_clear_observed_by_all_subscribers() {
        let mut hub = SelectionHub::new();
        let rx_a = hub.subscribe();
        let rx_b = hub.subscribe();

        // Both replay the initial empty state
        assert_eq!(rx_a.try_recv().unwrap(), SelectionEvent::Cleared);
        assert_eq!(rx_b.try_recv().unwrap(), SelectionEvent::Cleared);

        let id = NodeId::from_raw(7);
        hub.select(id);
        hub.clear();

        for rx in [&rx_a, &rx_b] {
            assert_eq!(rx.try_recv().unwrap(), SelectionEvent::Selected(id));
            assert_eq!(rx.try_recv().unwrap(), SelectionEvent::Cleared);
        }
        assert_eq!(hub.current(), None);
    }

    #[test]
    fn test_late_subscriber_receives_current_state() {
        let mut hub = SelectionHub::new();
        let id = NodeId::from_raw(3);
        hub.select(id);

        let rx = hub.subscribe();
        assert_eq!(rx.try_recv().unwrap(), SelectionEvent::Selected(id));
    }

    #[test]
    fn test_unchanged_selection_does_not_rebroadcast() {
        let mut hub = SelectionHub::new();
        let rx = hub.subscribe();
        let _ = rx.try_recv();

        hub.clear();
        hub.clear();
        assert!(rx.try_recv().is_err());

        let id = NodeId::from_raw(1);
        hub.select(id);
        hub.select(id);
        assert_eq!(rx.try_recv().unwrap(), SelectionEvent::Selected(id));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dead_subscribers_are_dropped() {
        let mut hub = SelectionHub::new();
        drop(hub.subscribe());
        hub.select(NodeId::from_raw(1));

        let rx = hub.subscribe();
        assert_eq!(
            rx.try_recv().unwrap(),
            SelectionEvent::Selected(NodeId::from_raw(1))
        );
    }
}
