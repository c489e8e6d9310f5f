//! Focus retention after pointer interactions

use overlay_dom::{Document, NodeId};
use tracing::trace;

/// Keep keyboard focus within the scroll container
///
/// Focus already resting on a descendant stays where it is. Anything else,
/// including focus on the container itself, ends up on the container.
pub fn maintain_focus(doc: &mut Document, container: NodeId) {
    if let Some(active) = doc.active_element() {
        if active != container && doc.contains(container, active) {
            return;
        }
    }
    if doc.focus(container) {
        trace!(?container, "focus moved to scroll container");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(doc: &mut Document) -> NodeId {
        let container = doc.create_child(doc.body(), "div", &[]).unwrap();
        doc.set_attribute(container, "tabindex", "-1").unwrap();
        container
    }

    #[test]
    fn test_focus_moves_to_container() {
        let mut doc = Document::new();
        let container = container(&mut doc);
        let outside = doc.create_child(doc.body(), "input", &[]).unwrap();
        doc.focus(outside);

        maintain_focus(&mut doc, container);
        assert_eq!(doc.active_element(), Some(container));
    }

    #[test]
    fn test_focused_descendant_keeps_focus() {
        let mut doc = Document::new();
        let container = container(&mut doc);
        let field = doc.create_child(container, "input", &[]).unwrap();
        doc.focus(field);

        maintain_focus(&mut doc, container);
        assert_eq!(doc.active_element(), Some(field));
    }

    #[test]
    fn test_nothing_focused() {
        let mut doc = Document::new();
        let container = container(&mut doc);
        maintain_focus(&mut doc, container);
        assert_eq!(doc.active_element(), Some(container));
    }
}
