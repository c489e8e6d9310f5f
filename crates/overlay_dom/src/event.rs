//! Targeted input events
//!
//! [`DomEvent`] pairs the platform-agnostic payload from `overlay_core` with
//! the node it was dispatched at, a host timestamp and the two flags a
//! handler can raise while the event travels.

use std::time::Duration;

use overlay_core::events::{event_types, EventData, EventType, KeyCode, Modifiers, PRIMARY_BUTTON};

use crate::tree::NodeId;

#[derive(Clone, Debug, PartialEq)]
pub struct DomEvent {
    pub event_type: EventType,
    pub target: NodeId,
    pub data: EventData,
    /// Monotonic host time the event was produced at
    pub timestamp: Duration,
    pub propagation_stopped: bool,
    pub default_prevented: bool,
}

impl DomEvent {
    pub fn new(event_type: EventType, target: NodeId, data: EventData, timestamp: Duration) -> Self {
        Self {
            event_type,
            target,
            data,
            timestamp,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// Pointer event with the primary button
    pub fn pointer(event_type: EventType, target: NodeId, x: f32, y: f32, timestamp: Duration) -> Self {
        Self::pointer_with_button(event_type, target, x, y, PRIMARY_BUTTON, timestamp)
    }

    pub fn pointer_with_button(
        event_type: EventType,
        target: NodeId,
        x: f32,
        y: f32,
        button: u8,
        timestamp: Duration,
    ) -> Self {
        Self::new(event_type, target, EventData::Pointer { x, y, button }, timestamp)
    }

    pub fn key_down(target: NodeId, key: KeyCode, timestamp: Duration) -> Self {
        Self::new(
            event_types::KEY_DOWN,
            target,
            EventData::Key {
                key,
                modifiers: Modifiers::none(),
                repeat: false,
            },
            timestamp,
        )
    }

    pub fn wheel(target: NodeId, delta_y: f32, timestamp: Duration) -> Self {
        Self::new(
            event_types::WHEEL,
            target,
            EventData::Wheel {
                delta_x: 0.0,
                delta_y,
            },
            timestamp,
        )
    }

    pub fn scroll(target: NodeId, timestamp: Duration) -> Self {
        Self::new(event_types::SCROLL, target, EventData::None, timestamp)
    }

    /// Event without payload (enter/leave, window lifecycle)
    pub fn simple(event_type: EventType, target: NodeId, timestamp: Duration) -> Self {
        Self::new(event_type, target, EventData::None, timestamp)
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn position(&self) -> Option<(f32, f32)> {
        self.data.position()
    }

    /// Events listened for on the document or window rather than on an element
    pub fn is_document_level(&self) -> bool {
        matches!(
            self.event_type,
            event_types::POINTER_MOVE
                | event_types::POINTER_UP
                | event_types::SCROLL
                | event_types::WINDOW_FOCUS
                | event_types::WINDOW_BLUR
                | event_types::VISIBILITY_HIDDEN
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Document;

    #[test]
    fn test_flags() {
        let doc = Document::new();
        let mut event = DomEvent::pointer(event_types::POINTER_DOWN, doc.body(), 1.0, 2.0, Duration::ZERO);
        assert_eq!(event.position(), Some((1.0, 2.0)));
        assert!(!event.is_document_level());

        event.prevent_default();
        event.stop_propagation();
        assert!(event.default_prevented);
        assert!(event.propagation_stopped);
    }

    #[test]
    fn test_document_level_events() {
        let doc = Document::new();
        let up = DomEvent::pointer(event_types::POINTER_UP, doc.root(), 0.0, 0.0, Duration::ZERO);
        assert!(up.is_document_level());
        let key = DomEvent::key_down(doc.body(), KeyCode::DOWN, Duration::ZERO);
        assert!(!key.is_document_level());
    }
}
