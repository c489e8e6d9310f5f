//! Thumb drag

use overlay_core::events::event_types::*;
use overlay_core::{EventType, StateTransitions};
use overlay_dom::{Document, DomEvent};
use tracing::debug;

use crate::engine::{extent_of, ScrollbarCore};
use crate::focus::maintain_focus;
use crate::geometry::thumb_drag_offset;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThumbDragState {
    #[default]
    Idle,
    Dragging,
}

impl StateTransitions for ThumbDragState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        match (self, event) {
            (ThumbDragState::Idle, POINTER_DOWN) => Some(ThumbDragState::Dragging),
            (ThumbDragState::Dragging, POINTER_UP | WINDOW_BLUR | VISIBILITY_HIDDEN) => {
                Some(ThumbDragState::Idle)
            }
            _ => None,
        }
    }
}

/// Thumb drag session
#[derive(Clone, Copy, Debug, Default)]
pub struct ThumbDrag {
    state: ThumbDragState,
    start_y: f32,
    start_scroll_top: f32,
}

impl ThumbDrag {
    pub fn state(&self) -> ThumbDragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == ThumbDragState::Dragging
    }

    /// Press on the thumb. Always swallows the event so nothing underneath reacts.
    pub fn press(&mut self, core: &mut ScrollbarCore, doc: &mut Document, event: &mut DomEvent) -> bool {
        event.prevent_default();
        event.stop_propagation();

        let Some((_, y)) = event.position() else {
            return false;
        };
        let Some(target) = core.resolve_target(doc) else {
            return false;
        };
        if !self.state.apply(POINTER_DOWN) {
            return false;
        }

        self.start_y = y;
        self.start_scroll_top = doc.scroll_top(target);
        core.visibility.cancel_hide();
        core.visibility.show();
        maintain_focus(doc, core.parts.container);
        debug!(start_y = y, start_scroll_top = self.start_scroll_top, "thumb drag started");
        true
    }

    /// Pointer moved anywhere while dragging
    pub fn drag(&mut self, core: &mut ScrollbarCore, doc: &mut Document, event: &DomEvent) -> bool {
        if !self.is_dragging() {
            return false;
        }
        let Some((_, y)) = event.position() else {
            return false;
        };
        let Some(target) = core.resolve_target(doc) else {
            return false;
        };

        let extent = extent_of(doc, target);
        let offset = thumb_drag_offset(&extent, self.start_scroll_top, y - self.start_y, core.thumb().height);
        core.scroll_target_to(doc, target, offset);
        true
    }

    /// Pointer released, window blurred or page hidden
    pub fn release(&mut self, core: &mut ScrollbarCore, doc: &mut Document, event: &DomEvent) -> bool {
        if !self.state.apply(event.event_type) {
            return false;
        }
        if core.is_scrollable(doc) {
            core.visibility.arm_default_hide(event.timestamp);
        }
        debug!(event = event.event_type, "thumb drag ended");
        true
    }
}
