//! Mutation and resize observers
//!
//! Records are buffered per observer and drained by the owner, the way a
//! page drains observer callbacks on its next microtask.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::tree::NodeId;

new_key_type! {
    pub struct ObserverId;
}

/// What a mutation observer listens to
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MutationObserverInit {
    pub child_list: bool,
    pub attributes: bool,
    /// Restrict attribute records to these names. Implies `attributes`.
    pub attribute_filter: Option<Vec<String>>,
    /// Also observe every descendant of the target
    pub subtree: bool,
}

impl MutationObserverInit {
    fn wants(&self, kind: &MutationKind) -> bool {
        match kind {
            MutationKind::ChildList { .. } => self.child_list,
            MutationKind::Attributes { name } => match &self.attribute_filter {
                Some(filter) => filter.iter().any(|f| f == name),
                None => self.attributes,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MutationKind {
    ChildList {
        added: SmallVec<[NodeId; 2]>,
        removed: SmallVec<[NodeId; 2]>,
    },
    Attributes {
        name: String,
    },
}

impl MutationKind {
    pub fn attribute(name: &str) -> Self {
        MutationKind::Attributes {
            name: name.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MutationRecord {
    pub target: NodeId,
    pub kind: MutationKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizeRecord {
    pub target: NodeId,
}

#[derive(Debug)]
enum Observer {
    Mutation {
        target: NodeId,
        init: MutationObserverInit,
        records: Vec<MutationRecord>,
    },
    Resize {
        targets: SmallVec<[NodeId; 4]>,
        records: Vec<ResizeRecord>,
    },
}

/// All live observers of a document
#[derive(Debug, Default)]
pub struct ObserverRegistry {
    observers: SlotMap<ObserverId, Observer>,
}

impl ObserverRegistry {
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub(crate) fn add_mutation(&mut self, target: NodeId, init: MutationObserverInit) -> ObserverId {
        self.observers.insert(Observer::Mutation {
            target,
            init,
            records: Vec::new(),
        })
    }

    pub(crate) fn add_resize(&mut self) -> ObserverId {
        self.observers.insert(Observer::Resize {
            targets: SmallVec::new(),
            records: Vec::new(),
        })
    }

    pub(crate) fn observe_resize(&mut self, id: ObserverId, node: NodeId) -> bool {
        match self.observers.get_mut(id) {
            Some(Observer::Resize { targets, .. }) => {
                if !targets.contains(&node) {
                    targets.push(node);
                }
                true
            }
            _ => false,
        }
    }

    pub(crate) fn unobserve_resize(&mut self, id: ObserverId, node: NodeId) {
        if let Some(Observer::Resize { targets, .. }) = self.observers.get_mut(id) {
            targets.retain(|t| *t != node);
        }
    }

    pub(crate) fn remove(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id).is_some()
    }

    /// Drop a freed node from every resize target list
    pub(crate) fn forget_node(&mut self, node: NodeId) {
        for observer in self.observers.values_mut() {
            if let Observer::Resize { targets, .. } = observer {
                targets.retain(|t| *t != node);
            }
        }
    }

    /// `path` is the mutated node followed by its ancestors
    pub(crate) fn record_mutation(&mut self, target: NodeId, path: &[NodeId], kind: MutationKind) {
        for observer in self.observers.values_mut() {
            if let Observer::Mutation {
                target: observed,
                init,
                records,
            } = observer
            {
                let in_scope = target == *observed || (init.subtree && path.contains(observed));
                if in_scope && init.wants(&kind) {
                    records.push(MutationRecord {
                        target,
                        kind: kind.clone(),
                    });
                }
            }
        }
    }

    pub(crate) fn record_resize(&mut self, node: NodeId) {
        for observer in self.observers.values_mut() {
            if let Observer::Resize { targets, records } = observer {
                if targets.contains(&node) && !records.iter().any(|r| r.target == node) {
                    records.push(ResizeRecord { target: node });
                }
            }
        }
    }

    pub(crate) fn take_mutations(&mut self, id: ObserverId) -> Vec<MutationRecord> {
        match self.observers.get_mut(id) {
            Some(Observer::Mutation { records, .. }) => std::mem::take(records),
            _ => Vec::new(),
        }
    }

    pub(crate) fn take_resizes(&mut self, id: ObserverId) -> Vec<ResizeRecord> {
        match self.observers.get_mut(id) {
            Some(Observer::Resize { records, .. }) => std::mem::take(records),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::{Document, Rect};

    use super::*;

    fn subtree_init() -> MutationObserverInit {
        MutationObserverInit {
            child_list: true,
            attribute_filter: Some(vec!["style".to_string()]),
            subtree: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_subtree_child_list_records() {
        let mut doc = Document::new();
        let container = doc.create_child(doc.body(), "div", &[]).unwrap();
        let content = doc.create_child(container, "div", &[]).unwrap();
        let observer = doc.observe_mutations(container, subtree_init());

        let item = doc.create_child(content, "div", &[]).unwrap();
        let records = doc.take_mutation_records(observer);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].target, content);
        assert!(matches!(&records[0].kind, MutationKind::ChildList { added, .. } if added[0] == item));

        assert!(doc.take_mutation_records(observer).is_empty());
    }

    #[test]
    fn test_attribute_filter() {
        let mut doc = Document::new();
        let container = doc.create_child(doc.body(), "div", &[]).unwrap();
        let child = doc.create_child(container, "div", &[]).unwrap();
        let observer = doc.observe_mutations(container, subtree_init());

        doc.add_class(child, "active").unwrap();
        doc.set_attribute(child, "data-index", "1").unwrap();
        assert!(doc.take_mutation_records(observer).is_empty());

        doc.set_style(child, "height: 20px").unwrap();
        assert_eq!(doc.take_mutation_records(observer).len(), 1);
    }

    #[test]
    fn test_mutations_outside_target_ignored() {
        let mut doc = Document::new();
        let container = doc.create_child(doc.body(), "div", &[]).unwrap();
        let sibling = doc.create_child(doc.body(), "div", &[]).unwrap();
        let observer = doc.observe_mutations(container, subtree_init());

        doc.create_child(sibling, "div", &[]).unwrap();
        assert!(doc.take_mutation_records(observer).is_empty());
    }

    #[test]
    fn test_resize_records_deduplicated() {
        let mut doc = Document::new();
        let node = doc.create_child(doc.body(), "div", &[]).unwrap();
        let observer = doc.create_resize_observer();
        assert!(doc.observe_resize(observer, node));

        doc.set_rect(node, Rect::new(0.0, 0.0, 100.0, 200.0)).unwrap();
        doc.set_rect(node, Rect::new(0.0, 0.0, 100.0, 300.0)).unwrap();
        doc.set_rect(node, Rect::new(5.0, 5.0, 100.0, 300.0)).unwrap();
        assert_eq!(doc.take_resize_records(observer), vec![ResizeRecord { target: node }]);

        doc.set_scroll_extent(node, 300.0, 900.0).unwrap();
        assert_eq!(doc.take_resize_records(observer).len(), 1);
        doc.set_scroll_extent(node, 300.0, 1200.0).unwrap();
        assert!(doc.take_resize_records(observer).is_empty());
    }

    #[test]
    fn test_disconnect() {
        let mut doc = Document::new();
        let container = doc.create_child(doc.body(), "div", &[]).unwrap();
        let observer = doc.observe_mutations(container, subtree_init());
        assert!(doc.disconnect(observer));
        doc.create_child(container, "div", &[]).unwrap();
        assert!(doc.take_mutation_records(observer).is_empty());
        assert_eq!(doc.observer_count(), 0);
    }
}
