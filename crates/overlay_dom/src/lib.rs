//! Overlay Scrollbar Document Model
//!
//! The host surface a scrollbar widget drives. A [`Document`] is an arena of
//! element nodes carrying what the widget reads and writes on a real page:
//!
//! - tag, classes and attributes (including inline `style`)
//! - client rectangle, padding and vertical scroll metrics
//! - focus and the active element
//! - pending scroll notifications
//! - mutation and resize observers
//! - the shared stylesheet registry and component scopes
//!
//! Layout is the host's job: it writes rects and scroll extents, the widget
//! reacts.

pub mod error;
pub mod event;
pub mod observer;
pub mod selector;
pub mod style_registry;
pub mod tree;

pub use error::{DomError, Result, SelectorError};
pub use event::DomEvent;
pub use observer::{MutationKind, MutationObserverInit, MutationRecord, ObserverId, ResizeRecord};
pub use selector::{
    AttrOperator, Combinator, ComplexSelector, CompoundSelector, SelectorList, SelectorPart,
};
pub use style_registry::StyleRegistry;
pub use tree::{Document, Insets, Node, NodeId, Rect, ScrollMetrics};
