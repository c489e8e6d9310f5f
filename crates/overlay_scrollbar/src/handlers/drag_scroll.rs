//! Free drag-scroll
//!
//! Press anywhere in the content and drag to scroll. A press only arms the
//! session; nothing visible happens until the pointer travels
//! [`DRAG_THRESHOLD`] from where it went down, so plain clicks stay clicks.

use overlay_core::events::event_types::*;
use overlay_core::{EventType, StateTransitions, PRIMARY_BUTTON};
use overlay_dom::{Document, DomEvent};
use tracing::debug;

use crate::engine::ScrollbarCore;
use crate::focus::maintain_focus;

/// Pointer travel that turns an armed press into a drag
pub const DRAG_THRESHOLD: f32 = 5.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragScrollState {
    #[default]
    Idle,
    /// Pressed, still below the movement threshold
    Armed,
    Dragging,
}

impl StateTransitions for DragScrollState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use DragScrollState::*;
        match (self, event) {
            (Idle, POINTER_DOWN) => Some(Armed),
            (Armed, DRAG) => Some(Dragging),
            (Armed | Dragging, POINTER_UP | WINDOW_BLUR | VISIBILITY_HIDDEN) => Some(Idle),
            _ => None,
        }
    }
}

/// Free drag-scroll session
#[derive(Clone, Copy, Debug, Default)]
pub struct DragScroll {
    state: DragScrollState,
    start_x: f32,
    start_y: f32,
    start_scroll_top: f32,
}

impl DragScroll {
    pub fn state(&self) -> DragScrollState {
        self.state
    }

    /// Pressed or dragging; text selection stays off for the whole session
    pub fn is_active(&self) -> bool {
        self.state != DragScrollState::Idle
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragScrollState::Dragging
    }

    /// Press inside the container
    ///
    /// Rejected when drag-scroll is off, a thumb drag owns the pointer, the
    /// target is excluded, the button is not primary or nothing scrolls.
    pub fn press(
        &mut self,
        core: &mut ScrollbarCore,
        doc: &mut Document,
        event: &mut DomEvent,
        thumb_dragging: bool,
    ) -> bool {
        let drag_scroll = &core.config.drag_scroll;
        if !drag_scroll.enabled || thumb_dragging || self.is_active() {
            return false;
        }
        if drag_scroll.filter.excludes(doc, event.target) {
            return false;
        }
        if event.data.button() != Some(PRIMARY_BUTTON) {
            return false;
        }
        let Some((x, y)) = event.position() else {
            return false;
        };
        let Some(target) = core.resolve_target(doc) else {
            return false;
        };
        let metrics = doc.metrics(target);
        if metrics.scroll_height <= metrics.client_height {
            return false;
        }

        event.prevent_default();
        event.stop_propagation();
        self.state.apply(POINTER_DOWN);
        self.start_x = x;
        self.start_y = y;
        self.start_scroll_top = metrics.scroll_top;
        core.visibility.cancel_hide();
        maintain_focus(doc, core.parts.container);
        true
    }

    /// Pointer moved anywhere during the session
    pub fn drag(&mut self, core: &mut ScrollbarCore, doc: &mut Document, event: &DomEvent) -> bool {
        let Some((x, y)) = event.position() else {
            return false;
        };
        match self.state {
            DragScrollState::Idle => return false,
            DragScrollState::Armed => {
                let distance = (x - self.start_x).hypot(y - self.start_y);
                if distance < DRAG_THRESHOLD {
                    return false;
                }
                self.state.apply(DRAG);
                debug!(distance, "drag-scroll started");
            }
            DragScrollState::Dragging => {}
        }

        let Some(target) = core.resolve_target(doc) else {
            return false;
        };
        core.visibility.cancel_hide();
        core.visibility.show();
        let offset = self.start_scroll_top + (self.start_y - y);
        core.scroll_target_to(doc, target, offset);
        true
    }

    /// Pointer released, window blurred or page hidden
    pub fn release(&mut self, core: &mut ScrollbarCore, doc: &mut Document, event: &DomEvent) -> bool {
        let was_dragging = self.is_dragging();
        if !self.state.apply(event.event_type) {
            return false;
        }
        if core.is_scrollable(doc) {
            core.visibility.arm_default_hide(event.timestamp);
        }
        if was_dragging {
            debug!(event = event.event_type, "drag-scroll ended");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let mut state = DragScrollState::default();
        assert!(!state.apply(DRAG));
        assert!(state.apply(POINTER_DOWN));
        assert_eq!(state, DragScrollState::Armed);
        assert!(state.apply(DRAG));
        assert_eq!(state, DragScrollState::Dragging);
        assert!(!state.apply(POINTER_DOWN));
        assert!(state.apply(POINTER_UP));
        assert_eq!(state, DragScrollState::Idle);
    }

    #[test]
    fn test_armed_release_returns_idle() {
        let mut state = DragScrollState::Armed;
        assert!(state.apply(WINDOW_BLUR));
        assert_eq!(state, DragScrollState::Idle);
    }
}
