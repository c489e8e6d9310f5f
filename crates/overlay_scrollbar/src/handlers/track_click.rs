//! Track click

use overlay_dom::{Document, DomEvent};
use tracing::trace;

use crate::engine::{extent_of, ScrollbarCore};
use crate::focus::maintain_focus;
use crate::geometry::track_click_offset;

/// Jump to the offset matching a click on the track background
///
/// The click is measured from the top of the track region, which spans the
/// wrapper's full height.
pub fn track_click(core: &mut ScrollbarCore, doc: &mut Document, event: &mut DomEvent) -> bool {
    event.prevent_default();
    event.stop_propagation();

    let Some((_, y)) = event.position() else {
        return false;
    };
    let Some(target) = core.resolve_target(doc) else {
        return false;
    };

    let click_y = y - doc.rect(core.wrapper).top();
    let offset = track_click_offset(&extent_of(doc, target), click_y);
    let applied = core.scroll_target_to(doc, target, offset);
    trace!(click_y, applied, "track click");

    core.visibility.show();
    core.visibility.arm_default_hide(event.timestamp);
    maintain_focus(doc, core.parts.container);
    true
}
