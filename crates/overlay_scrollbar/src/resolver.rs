//! Scroll target resolution
//!
//! Finds the element that actually scrolls for an instance: the container
//! itself when its content overflows, otherwise (when inner detection is on)
//! the first scrollable descendant that looks like a scroll surface, such as
//! a virtualized list. Results are cached until the cache stops being
//! scrollable or is invalidated by a structural change.

use std::sync::OnceLock;

use overlay_dom::{Document, NodeId, SelectorList};
use tracing::{debug, trace, warn};

use crate::geometry::SCROLL_EPSILON;

/// Class every mounted instance puts on its container
pub const SCROLL_CONTAINER_CLASS: &str = "overlay-scrollbar-container";

/// Elements that may be an inner scroll surface
pub const INNER_SCROLL_SELECTOR: &str = "[data-virtuoso-scroller], [style*=\"overflow\"], .virtuoso-scroller, [style*=\"overflow: auto\"], [style*=\"overflow:auto\"]";

fn inner_scroll_selector() -> &'static SelectorList {
    static SELECTOR: OnceLock<SelectorList> = OnceLock::new();
    SELECTOR.get_or_init(|| {
        SelectorList::parse(INNER_SCROLL_SELECTOR).unwrap_or_else(|err| {
            warn!(%err, "inner scroll selector failed to parse");
            SelectorList::default()
        })
    })
}

/// The two nodes an instance owns around the host's content
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollParts {
    /// Viewport with overflow and focus
    pub container: NodeId,
    /// Host content lives under this node
    pub content: NodeId,
}

/// Whether `node`'s content exceeds its viewport by more than the epsilon
pub fn is_scrollable(doc: &Document, node: NodeId) -> bool {
    let metrics = doc.metrics(node);
    metrics.scroll_height > metrics.client_height + SCROLL_EPSILON
}

/// Whether `node` sits inside another instance's container, walking up to `own_container`
pub fn in_foreign_instance(doc: &Document, node: NodeId, own_container: NodeId) -> bool {
    for id in doc.inclusive_ancestors(node) {
        if id == own_container {
            return false;
        }
        if doc.has_class(id, SCROLL_CONTAINER_CLASS) || doc.scope_of(id).is_some() {
            return true;
        }
    }
    false
}

/// Cached scroll target lookup for one instance
#[derive(Debug, Default)]
pub struct ScrollTargetResolver {
    cached: Option<NodeId>,
    detect_inner_scroll: bool,
}

impl ScrollTargetResolver {
    pub fn new(detect_inner_scroll: bool) -> Self {
        Self {
            cached: None,
            detect_inner_scroll,
        }
    }

    pub fn detect_inner_scroll(&self) -> bool {
        self.detect_inner_scroll
    }

    pub fn set_detect_inner_scroll(&mut self, detect: bool) {
        if self.detect_inner_scroll != detect {
            self.detect_inner_scroll = detect;
            self.invalidate();
        }
    }

    pub fn cached(&self) -> Option<NodeId> {
        self.cached
    }

    /// Drop the cached target; the next resolve searches again
    pub fn invalidate(&mut self) {
        if self.cached.take().is_some() {
            trace!("scroll target cache invalidated");
        }
    }

    /// Resolve the scroll target, or None when nothing scrolls
    pub fn resolve(&mut self, doc: &Document, parts: ScrollParts) -> Option<NodeId> {
        if let Some(cached) = self.cached {
            if doc.is_connected(cached) && is_scrollable(doc, cached) {
                return Some(cached);
            }
            self.invalidate();
        }

        let viewport = doc.metrics(parts.container).client_height;
        let content = doc.metrics(parts.content).scroll_height;
        if content > viewport + SCROLL_EPSILON {
            return Some(self.remember(parts.container));
        }

        if !self.detect_inner_scroll {
            return None;
        }

        doc.query_selector_all(parts.content, inner_scroll_selector())
            .into_iter()
            .find(|candidate| {
                !in_foreign_instance(doc, *candidate, parts.container)
                    && is_scrollable(doc, *candidate)
            })
            .map(|target| self.remember(target))
    }

    fn remember(&mut self, target: NodeId) -> NodeId {
        if self.cached != Some(target) {
            debug!(?target, "scroll target resolved");
        }
        self.cached = Some(target);
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        doc: Document,
        parts: ScrollParts,
    }

    fn fixture() -> Fixture {
        let mut doc = Document::new();
        let container = doc
            .create_child(doc.body(), "div", &[SCROLL_CONTAINER_CLASS])
            .unwrap();
        let content = doc.create_child(container, "div", &[]).unwrap();
        doc.set_scroll_extent(container, 400.0, 400.0).unwrap();
        doc.set_scroll_extent(content, 400.0, 400.0).unwrap();
        Fixture {
            doc,
            parts: ScrollParts { container, content },
        }
    }

    fn inner_list(doc: &mut Document, parent: NodeId, scroll_height: f32) -> NodeId {
        let list = doc.create_child(parent, "div", &[]).unwrap();
        doc.set_style(list, "height: 300px; overflow: auto").unwrap();
        doc.set_scroll_extent(list, 300.0, scroll_height).unwrap();
        list
    }

    #[test]
    fn test_container_when_content_overflows() {
        let mut f = fixture();
        f.doc.set_scroll_extent(f.parts.container, 400.0, 1000.0).unwrap();
        f.doc.set_scroll_extent(f.parts.content, 1000.0, 1000.0).unwrap();

        let mut resolver = ScrollTargetResolver::new(false);
        assert_eq!(resolver.resolve(&f.doc, f.parts), Some(f.parts.container));
        assert_eq!(resolver.cached(), Some(f.parts.container));
    }

    #[test]
    fn test_epsilon_blocks_near_equal_content() {
        let mut f = fixture();
        f.doc.set_scroll_extent(f.parts.content, 402.0, 402.0).unwrap();
        let mut resolver = ScrollTargetResolver::new(true);
        assert_eq!(resolver.resolve(&f.doc, f.parts), None);
    }

    #[test]
    fn test_inner_scroll_needs_detection() {
        let mut f = fixture();
        let list = inner_list(&mut f.doc, f.parts.content, 2000.0);

        let mut off = ScrollTargetResolver::new(false);
        assert_eq!(off.resolve(&f.doc, f.parts), None);

        let mut on = ScrollTargetResolver::new(true);
        assert_eq!(on.resolve(&f.doc, f.parts), Some(list));
    }

    #[test]
    fn test_inner_scroll_skips_non_scrollable_candidates() {
        let mut f = fixture();
        let short = inner_list(&mut f.doc, f.parts.content, 300.0);
        let long = inner_list(&mut f.doc, f.parts.content, 900.0);
        let mut resolver = ScrollTargetResolver::new(true);

        assert_eq!(resolver.resolve(&f.doc, f.parts), Some(long));
        assert_ne!(resolver.cached(), Some(short));
    }

    #[test]
    fn test_nested_instance_isolation() {
        let mut f = fixture();
        let nested_container = f
            .doc
            .create_child(f.parts.content, "div", &[SCROLL_CONTAINER_CLASS])
            .unwrap();
        inner_list(&mut f.doc, nested_container, 2000.0);

        let mut resolver = ScrollTargetResolver::new(true);
        assert_eq!(resolver.resolve(&f.doc, f.parts), None);
    }

    #[test]
    fn test_registered_scope_isolation() {
        let mut f = fixture();
        let nested = f.doc.create_child(f.parts.content, "div", &[]).unwrap();
        f.doc.register_scope(nested, 42);
        inner_list(&mut f.doc, nested, 2000.0);

        let mut resolver = ScrollTargetResolver::new(true);
        assert_eq!(resolver.resolve(&f.doc, f.parts), None);
    }

    #[test]
    fn test_cache_dropped_when_no_longer_scrollable() {
        let mut f = fixture();
        let list = inner_list(&mut f.doc, f.parts.content, 2000.0);
        let mut resolver = ScrollTargetResolver::new(true);
        assert_eq!(resolver.resolve(&f.doc, f.parts), Some(list));

        f.doc.set_scroll_extent(list, 300.0, 300.0).unwrap();
        assert_eq!(resolver.resolve(&f.doc, f.parts), None);
        assert_eq!(resolver.cached(), None);
    }

    #[test]
    fn test_detached_cached_target_is_dropped() {
        let mut f = fixture();
        let list = inner_list(&mut f.doc, f.parts.content, 2000.0);
        let mut resolver = ScrollTargetResolver::new(true);
        assert_eq!(resolver.resolve(&f.doc, f.parts), Some(list));

        f.doc.detach(list).unwrap();
        assert!(f.doc.exists(list));
        assert_eq!(resolver.resolve(&f.doc, f.parts), None);
        assert_eq!(resolver.cached(), None);
    }

    #[test]
    fn test_cached_target_survives_until_invalidated() {
        let mut f = fixture();
        let first = inner_list(&mut f.doc, f.parts.content, 2000.0);
        let mut resolver = ScrollTargetResolver::new(true);
        assert_eq!(resolver.resolve(&f.doc, f.parts), Some(first));

        // Container starts overflowing, but the cache still wins
        f.doc.set_scroll_extent(f.parts.content, 3000.0, 3000.0).unwrap();
        assert_eq!(resolver.resolve(&f.doc, f.parts), Some(first));

        resolver.invalidate();
        assert_eq!(resolver.resolve(&f.doc, f.parts), Some(f.parts.container));
    }

    #[test]
    fn test_toggling_detection_invalidates() {
        let mut f = fixture();
        let list = inner_list(&mut f.doc, f.parts.content, 2000.0);
        let mut resolver = ScrollTargetResolver::new(true);
        assert_eq!(resolver.resolve(&f.doc, f.parts), Some(list));

        resolver.set_detect_inner_scroll(false);
        assert_eq!(resolver.cached(), None);
        assert_eq!(resolver.resolve(&f.doc, f.parts), None);
    }
}
