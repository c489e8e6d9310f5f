//! Change detection
//!
//! One mutation observer over the container subtree and one resize observer
//! over the container, the content node and the resolved scroll target.
//! Records are drained by [`ChangeWatchers::pump`]; the owner decides what a
//! change means.

use overlay_dom::{Document, MutationObserverInit, NodeId, ObserverId};
use tracing::trace;

use crate::resolver::ScrollParts;

/// What the observers reported since the last pump
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Child list or inline style changed inside the container
    pub mutated: bool,
    /// An observed box changed size
    pub resized: bool,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        !self.mutated && !self.resized
    }
}

#[derive(Debug)]
pub struct ChangeWatchers {
    parts: ScrollParts,
    mutations: ObserverId,
    resizes: ObserverId,
    /// Scroll target observed in addition to container and content
    target: Option<NodeId>,
}

impl ChangeWatchers {
    pub fn connect(doc: &mut Document, parts: ScrollParts) -> Self {
        let mutations = doc.observe_mutations(
            parts.container,
            MutationObserverInit {
                child_list: true,
                attributes: true,
                attribute_filter: Some(vec!["style".to_string()]),
                subtree: true,
            },
        );
        let resizes = doc.create_resize_observer();
        doc.observe_resize(resizes, parts.container);
        doc.observe_resize(resizes, parts.content);

        Self {
            parts,
            mutations,
            resizes,
            target: None,
        }
    }

    pub fn observed_target(&self) -> Option<NodeId> {
        self.target
    }

    /// Follow the resolved scroll target with the resize observer
    pub fn sync_target(&mut self, doc: &mut Document, target: Option<NodeId>) {
        if self.target == target {
            return;
        }
        if let Some(old) = self.target.take() {
            if !self.is_part(old) {
                doc.unobserve_resize(self.resizes, old);
            }
        }
        if let Some(new) = target {
            if !self.is_part(new) {
                doc.observe_resize(self.resizes, new);
            }
            trace!(target = ?new, "observing scroll target size");
        }
        self.target = target;
    }

    fn is_part(&self, node: NodeId) -> bool {
        node == self.parts.container || node == self.parts.content
    }

    /// Drain both observers
    pub fn pump(&mut self, doc: &mut Document) -> ChangeSet {
        ChangeSet {
            mutated: !doc.take_mutation_records(self.mutations).is_empty(),
            resized: !doc.take_resize_records(self.resizes).is_empty(),
        }
    }

    pub fn disconnect(self, doc: &mut Document) {
        doc.disconnect(self.mutations);
        doc.disconnect(self.resizes);
    }
}
