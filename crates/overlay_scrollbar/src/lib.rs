//! Overlay Scrollbar
//!
//! A replacement scrollbar drawn over a native scroll container. The widget
//! keeps the platform scrollbar hidden and drives the container's scroll
//! offset itself:
//!
//! - **Resolver**: finds the element that actually scrolls, optionally deep
//!   inside the content, without crossing into nested instances
//! - **Geometry**: thumb size and position from viewport, content and offset
//! - **Visibility**: one auto-hide timer plus hover, wheel and initial-delay
//!   debounces
//! - **Handlers**: thumb drag, track click, arrow steps, free drag-scroll
//!   and keyboard navigation
//! - **Watchers**: mutation and resize observers that keep geometry live
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use overlay_dom::{Document, DomEvent, Rect};
//! use overlay_scrollbar::{OverlayScrollbar, OverlayScrollbarProps};
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let mut scrollbar =
//!     OverlayScrollbar::mount(&mut doc, body, OverlayScrollbarProps::default(), Duration::ZERO)
//!         .unwrap();
//!
//! // Host layout: a 400px viewport over 1000px of content
//! doc.set_rect(scrollbar.wrapper(), Rect::new(0.0, 0.0, 300.0, 400.0)).unwrap();
//! doc.set_scroll_extent(scrollbar.scroll_container(), 400.0, 1000.0).unwrap();
//! doc.set_scroll_extent(scrollbar.content(), 1000.0, 1000.0).unwrap();
//! scrollbar.tick(&mut doc, Duration::from_millis(250));
//! assert!(scrollbar.has_scrollable_content());
//!
//! let container = scrollbar.scroll_container();
//! doc.set_scroll_top(container, 300.0);
//! let mut scroll = DomEvent::scroll(container, Duration::from_millis(300));
//! scrollbar.dispatch(&mut doc, &mut scroll);
//! assert!(scrollbar.is_visible());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod exclusion;
pub mod focus;
pub mod geometry;
pub mod handlers;
pub mod resolver;
pub mod router;
pub mod scrollbar;
pub mod stylesheet;
pub mod view;
pub mod visibility;
pub mod watchers;

pub use config::{
    ArrowsConfig, AutoHideConfig, ConfigResolver, DragScrollConfig, OverlayScrollbarProps,
    ResolvedConfig, ThumbConfig, TrackAlignment, TrackConfig,
};
pub use engine::{OverlayNodes, ScrollbarCore};
pub use error::{ConfigError, Result};
pub use exclusion::{is_text_editing_target, DragScrollFilter};
pub use geometry::{ScrollExtent, ThumbGeometry, TrackLayout};
pub use handlers::{ArrowDirection, DragScrollState, ThumbDragState};
pub use resolver::{ScrollParts, ScrollTargetResolver, SCROLL_CONTAINER_CLASS};
pub use router::dispatch_bubbling;
pub use scrollbar::{
    InstanceId, OverlayScrollbar, ScrollBehavior, ScrollCallback, ScrollNotice, ScrollToOptions,
};
pub use view::{OverlayLayout, ScrollbarView};
pub use visibility::{TimerKind, Visibility};
