//! Event routing across mounted instances
//!
//! Nested instances see an event in the order the DOM would bubble it:
//! innermost wrapper first, outward until a handler stops propagation.
//! Document-level events (pointer move and up, scroll, window blur, page
//! hidden) go to every instance, since each listens on the document.

use overlay_dom::{Document, DomEvent};
use smallvec::SmallVec;

use crate::scrollbar::OverlayScrollbar;

/// Dispatch one event. Returns how many instances acted on it.
pub fn dispatch_bubbling(doc: &mut Document, instances: &mut [OverlayScrollbar], event: &mut DomEvent) -> usize {
    for instance in instances.iter_mut() {
        instance.tick(doc, event.timestamp);
    }

    let mut handled = 0;
    if event.is_document_level() {
        for instance in instances.iter_mut() {
            if instance.dispatch(doc, event) {
                handled += 1;
            }
        }
        return handled;
    }

    let mut path: SmallVec<[(usize, usize); 8]> = instances
        .iter()
        .enumerate()
        .filter(|(_, instance)| doc.contains(instance.wrapper(), event.target))
        .map(|(index, instance)| (doc.depth(instance.wrapper()), index))
        .collect();
    path.sort_by(|a, b| b.0.cmp(&a.0));

    for (_, index) in path {
        if instances[index].dispatch(doc, event) {
            handled += 1;
        }
        if event.propagation_stopped {
            break;
        }
    }
    handled
}
