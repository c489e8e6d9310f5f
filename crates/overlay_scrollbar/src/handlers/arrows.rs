//! Arrow step buttons

use overlay_dom::{Document, DomEvent};

use crate::engine::{extent_of, ScrollbarCore};
use crate::focus::maintain_focus;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArrowDirection {
    Up,
    Down,
}

impl ArrowDirection {
    fn sign(self) -> f32 {
        match self {
            ArrowDirection::Up => -1.0,
            ArrowDirection::Down => 1.0,
        }
    }
}

/// Move one configured step. Does nothing when arrows are hidden.
pub fn arrow_step(
    core: &mut ScrollbarCore,
    doc: &mut Document,
    event: &mut DomEvent,
    direction: ArrowDirection,
) -> bool {
    if !core.config.arrows.visible {
        return false;
    }
    event.prevent_default();
    event.stop_propagation();

    let Some(target) = core.resolve_target(doc) else {
        return false;
    };

    let offset = extent_of(doc, target).scroll_top + direction.sign() * core.config.arrows.step;
    core.scroll_target_to(doc, target, offset);

    core.visibility.show();
    core.visibility.arm_default_hide(event.timestamp);
    maintain_focus(doc, core.parts.container);
    true
}
