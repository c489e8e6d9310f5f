//! Keyboard navigation

use overlay_core::KeyCode;
use overlay_dom::{Document, DomEvent};
use tracing::trace;

use crate::engine::{extent_of, ScrollbarCore};
use crate::exclusion::is_text_editing_target;
use crate::geometry::ScrollExtent;

/// Arrow keys move by this much
pub const LINE_SCROLL_STEP: f32 = 50.0;

/// Unclamped offset a navigation key asks for, or None for other keys
pub fn key_offset(key: KeyCode, extent: &ScrollExtent) -> Option<f32> {
    if !key.is_navigation() {
        return None;
    }
    let top = extent.scroll_top;
    match key {
        KeyCode::UP => Some(top - LINE_SCROLL_STEP),
        KeyCode::DOWN => Some(top + LINE_SCROLL_STEP),
        KeyCode::PAGE_UP => Some(top - extent.viewport_height),
        KeyCode::PAGE_DOWN => Some(top + extent.viewport_height),
        KeyCode::HOME => Some(0.0),
        KeyCode::END => Some(extent.max_scroll_top()),
        _ => None,
    }
}

/// Key pressed with focus inside the container
pub fn key_down(core: &mut ScrollbarCore, doc: &mut Document, event: &mut DomEvent) -> bool {
    let Some(key) = event.data.key() else {
        return false;
    };
    if is_text_editing_target(doc, event.target) {
        return false;
    }
    let Some(target) = core.resolve_target(doc) else {
        return false;
    };
    let Some(offset) = key_offset(key, &extent_of(doc, target)) else {
        return false;
    };

    event.prevent_default();
    event.stop_propagation();
    let applied = core.scroll_target_to(doc, target, offset);
    trace!(?key, applied, "keyboard scroll");

    core.visibility.cancel_hide();
    core.visibility.show();
    core.visibility.arm_default_hide(event.timestamp);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_offsets() {
        let extent = ScrollExtent::new(400.0, 1000.0, 300.0);
        assert_eq!(key_offset(KeyCode::UP, &extent), Some(250.0));
        assert_eq!(key_offset(KeyCode::DOWN, &extent), Some(350.0));
        assert_eq!(key_offset(KeyCode::PAGE_UP, &extent), Some(-100.0));
        assert_eq!(key_offset(KeyCode::PAGE_DOWN, &extent), Some(700.0));
        assert_eq!(key_offset(KeyCode::HOME, &extent), Some(0.0));
        assert_eq!(key_offset(KeyCode::END, &extent), Some(600.0));
        assert_eq!(key_offset(KeyCode::SPACE, &extent), None);
        // Horizontal navigation has nothing to move on a vertical bar
        assert_eq!(key_offset(KeyCode::LEFT, &extent), None);
        assert_eq!(key_offset(KeyCode::RIGHT, &extent), None);
        assert_eq!(key_offset(KeyCode::A, &extent), None);
    }
}
