//! Overlay scrollbar component
//!
//! [`OverlayScrollbar`] owns one mounted instance: the three nodes it builds
//! around the host's content, the shared [`ScrollbarCore`] and the session
//! state of each handler. The host feeds it events and ticks; everything
//! else happens inside.
//!
//! ```text
//! wrapper  .overlay-scrollbar-wrapper
//! ├── container  .overlay-scrollbar-container  (tabindex -1, scope)
//! │   └── content  .overlay-scrollbar-content  <- host children
//! ├── track region  .overlay-scrollbar-track
//! │   ├── .overlay-scrollbar-track-background
//! │   └── .overlay-scrollbar-thumb
//! ├── .overlay-scrollbar-up-arrow
//! └── .overlay-scrollbar-down-arrow
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use overlay_core::events::event_types::*;
use overlay_dom::{Document, DomError, DomEvent, NodeId};
use tracing::{debug, trace};

use crate::config::{ConfigResolver, OverlayScrollbarProps, ResolvedConfig};
use crate::engine::{OverlayNodes, ScrollbarCore, CONTENT_CLASS, WRAPPER_CLASS};
use crate::geometry::ThumbGeometry;
use crate::handlers::{self, ArrowDirection, DragScroll, DragScrollState, ThumbDrag};
use crate::resolver::{in_foreign_instance, ScrollParts, SCROLL_CONTAINER_CLASS};
use crate::stylesheet;
use crate::view::{ScrollbarView, ViewState};
use crate::visibility::{TimerKind, Visibility};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Process-unique id of a mounted instance, registered as the container's scope
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    fn next() -> Self {
        Self(NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// What the scroll callback receives
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollNotice {
    /// The element that scrolled
    pub target: NodeId,
    pub scroll_top: f32,
    pub scroll_height: f32,
    pub client_height: f32,
    pub timestamp: Duration,
}

pub type ScrollCallback = Box<dyn FnMut(&ScrollNotice)>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Instant,
    /// Applied instantly; there is no animation clock
    Smooth,
}

/// Arguments of [`OverlayScrollbar::scroll_to`]
///
/// The container scrolls vertically only; `left` is accepted and ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollToOptions {
    pub top: Option<f32>,
    pub left: Option<f32>,
    pub behavior: ScrollBehavior,
}

impl ScrollToOptions {
    pub fn top(top: f32) -> Self {
        Self {
            top: Some(top),
            ..Default::default()
        }
    }
}

pub struct OverlayScrollbar {
    id: InstanceId,
    props: OverlayScrollbarProps,
    config_resolver: ConfigResolver,
    core: ScrollbarCore,
    thumb_drag: ThumbDrag,
    drag_scroll: DragScroll,
    thumb_hovered: bool,
    hovered_arrow: Option<ArrowDirection>,
    on_scroll: Option<ScrollCallback>,
    now: Duration,
}

impl fmt::Debug for OverlayScrollbar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayScrollbar")
            .field("id", &self.id)
            .field("core", &self.core)
            .field("thumb_drag", &self.thumb_drag)
            .field("drag_scroll", &self.drag_scroll)
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

impl OverlayScrollbar {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Build the instance under `parent` and run the first refresh
    pub fn mount(
        doc: &mut Document,
        parent: NodeId,
        props: OverlayScrollbarProps,
        now: Duration,
    ) -> Result<Self, DomError> {
        let wrapper = doc.create_child(parent, "div", &[WRAPPER_CLASS])?;
        for class in extra_classes(&props) {
            doc.add_class(wrapper, class)?;
        }
        let container = doc.create_child(wrapper, "div", &[SCROLL_CONTAINER_CLASS])?;
        doc.set_attribute(container, "tabindex", "-1")?;
        let content = doc.create_child(container, "div", &[CONTENT_CLASS])?;

        let id = InstanceId::next();
        doc.register_scope(container, id.get());
        stylesheet::acquire(doc);

        let mut config_resolver = ConfigResolver::new();
        let config = config_resolver.resolve(&props);
        let parts = ScrollParts { container, content };
        let core = ScrollbarCore::new(doc, config, wrapper, parts, now);

        let mut scrollbar = Self {
            id,
            props,
            config_resolver,
            core,
            thumb_drag: ThumbDrag::default(),
            drag_scroll: DragScroll::default(),
            thumb_hovered: false,
            hovered_arrow: None,
            on_scroll: None,
            now,
        };
        scrollbar.core.update(doc);
        debug!(id = id.get(), ?wrapper, ?container, "overlay scrollbar mounted");
        Ok(scrollbar)
    }

    /// Tear the instance down and remove its nodes, host content included
    pub fn unmount(self, doc: &mut Document) -> Result<(), DomError> {
        let id = self.id;
        let wrapper = self.core.wrapper;
        let container = self.core.parts.container;

        self.core.teardown(doc);
        doc.unregister_scope(container);
        stylesheet::release(doc);
        if doc.exists(wrapper) {
            doc.remove_subtree(wrapper)?;
        }
        debug!(id = id.get(), "overlay scrollbar unmounted");
        Ok(())
    }

    /// Re-render with new props
    pub fn set_props(&mut self, doc: &mut Document, props: OverlayScrollbarProps) -> Result<(), DomError> {
        if props.class_name != self.props.class_name {
            let wrapper = self.core.wrapper;
            for class in extra_classes(&self.props) {
                doc.remove_class(wrapper, class)?;
            }
            for class in extra_classes(&props) {
                doc.add_class(wrapper, class)?;
            }
        }
        let config = self.config_resolver.resolve(&props);
        self.props = props;
        self.core.set_config(doc, config, self.now);
        Ok(())
    }

    pub fn set_on_scroll(&mut self, callback: impl FnMut(&ScrollNotice) + 'static) {
        self.on_scroll = Some(Box::new(callback));
    }

    pub fn clear_on_scroll(&mut self) {
        self.on_scroll = None;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn props(&self) -> &OverlayScrollbarProps {
        &self.props
    }

    pub fn config(&self) -> &ResolvedConfig {
        self.core.config()
    }

    pub fn wrapper(&self) -> NodeId {
        self.core.wrapper
    }

    /// Where the host attaches its children
    pub fn content(&self) -> NodeId {
        self.core.parts.content
    }

    pub fn overlay(&self) -> Option<&OverlayNodes> {
        self.core.overlay()
    }

    pub fn thumb(&self) -> ThumbGeometry {
        self.core.thumb()
    }

    pub fn has_scrollable_content(&self) -> bool {
        self.core.has_scrollable_content()
    }

    pub fn is_visible(&self) -> bool {
        self.core.visibility().is_visible()
    }

    pub fn visibility(&self) -> &Visibility {
        self.core.visibility()
    }

    pub fn is_thumb_dragging(&self) -> bool {
        self.thumb_drag.is_dragging()
    }

    pub fn drag_scroll_state(&self) -> DragScrollState {
        self.drag_scroll.state()
    }

    /// The cached scroll target, resolving it if needed
    pub fn scroll_target(&mut self, doc: &Document) -> Option<NodeId> {
        self.core.resolve_target(doc)
    }

    /// Earliest pending timer; tick at or after it to let it fire
    pub fn next_deadline(&self) -> Option<Duration> {
        self.core.visibility().next_deadline()
    }

    pub fn view(&self, doc: &Document) -> ScrollbarView {
        let layout = self.core.overlay_layout(doc);
        let state = ViewState {
            visible: self.is_visible(),
            thumb_hovered: self.thumb_hovered,
            thumb_dragging: self.thumb_drag.is_dragging(),
            hovered_arrow: self.hovered_arrow,
            drag_scrolling: self.drag_scroll.is_active(),
        };
        ScrollbarView::build(self.core.config(), &layout, state, self.core.overlay().is_some())
    }

    // ========================================================================
    // Imperative handle
    // ========================================================================

    pub fn scroll_container(&self) -> NodeId {
        self.core.parts.container
    }

    pub fn scroll_to(&mut self, doc: &mut Document, options: ScrollToOptions) {
        if let Some(top) = options.top {
            doc.set_scroll_top(self.core.parts.container, top);
        }
        self.core.update(doc);
    }

    pub fn scroll_top(&self, doc: &Document) -> f32 {
        doc.scroll_top(self.core.parts.container)
    }

    pub fn scroll_height(&self, doc: &Document) -> f32 {
        doc.metrics(self.core.parts.container).scroll_height
    }

    pub fn client_height(&self, doc: &Document) -> f32 {
        doc.metrics(self.core.parts.container).client_height
    }

    // ========================================================================
    // Pumping
    // ========================================================================

    /// Drain observer records and refresh if anything changed
    pub fn process_changes(&mut self, doc: &mut Document) -> bool {
        !self.core.process_changes(doc).is_empty()
    }

    /// Advance the clock: drain observers, then fire due timers in order
    pub fn tick(&mut self, doc: &mut Document, now: Duration) {
        self.now = self.now.max(now);
        self.core.process_changes(doc);

        while let Some(fired) = self.core.visibility.pop_due(self.now) {
            match fired.kind {
                TimerKind::WheelShow => {
                    if !self.core.visibility.initial_delay_active() && self.core.is_scrollable(doc) {
                        self.core.visibility.show_for_wheel(fired.deadline);
                    }
                }
                TimerKind::InitialDelay | TimerKind::SettleRefresh => self.core.update(doc),
                TimerKind::Hide | TimerKind::HoverShow | TimerKind::WheelDecay => {}
            }
        }
    }

    /// Feed one event. Returns true if this instance acted on it.
    pub fn dispatch(&mut self, doc: &mut Document, event: &mut DomEvent) -> bool {
        self.tick(doc, event.timestamp);

        let handled = match event.event_type {
            POINTER_DOWN => self.on_pointer_down(doc, event),
            POINTER_MOVE => self.on_pointer_move(doc, event),
            POINTER_UP | WINDOW_BLUR | VISIBILITY_HIDDEN => self.on_release(doc, event),
            POINTER_ENTER => self.on_pointer_enter(event),
            POINTER_LEAVE => self.on_pointer_leave(event),
            CLICK => self.on_click(doc, event),
            KEY_DOWN => self.on_key_down(doc, event),
            SCROLL => self.on_scroll(doc, event),
            WHEEL => self.on_wheel(doc, event),
            _ => false,
        };
        if handled {
            trace!(id = self.id.get(), event = event.event_type, "event handled");
        }
        handled
    }

    // ========================================================================
    // Event routing
    // ========================================================================

    fn on_pointer_down(&mut self, doc: &mut Document, event: &mut DomEvent) -> bool {
        let on_thumb = self
            .core
            .overlay()
            .is_some_and(|nodes| nodes.is_thumb(event.target));
        if on_thumb {
            return self.thumb_drag.press(&mut self.core, doc, event);
        }
        if doc.contains(self.core.parts.container, event.target) {
            let thumb_dragging = self.thumb_drag.is_dragging();
            return self
                .drag_scroll
                .press(&mut self.core, doc, event, thumb_dragging);
        }
        false
    }

    fn on_pointer_move(&mut self, doc: &mut Document, event: &DomEvent) -> bool {
        let thumb = self.thumb_drag.drag(&mut self.core, doc, event);
        let content = self.drag_scroll.drag(&mut self.core, doc, event);
        thumb || content
    }

    fn on_release(&mut self, doc: &mut Document, event: &DomEvent) -> bool {
        let thumb = self.thumb_drag.release(&mut self.core, doc, event);
        let content = self.drag_scroll.release(&mut self.core, doc, event);
        thumb || content
    }

    fn on_pointer_enter(&mut self, event: &DomEvent) -> bool {
        let Some(nodes) = self.core.overlay().copied() else {
            return false;
        };
        if event.target == nodes.region {
            self.core.visibility.pointer_entered(event.timestamp);
        } else if event.target == nodes.thumb {
            self.thumb_hovered = true;
        } else if let Some(direction) = arrow_at(&nodes, event.target) {
            self.hovered_arrow = Some(direction);
        } else {
            return false;
        }
        true
    }

    fn on_pointer_leave(&mut self, event: &DomEvent) -> bool {
        let Some(nodes) = self.core.overlay().copied() else {
            return false;
        };
        if event.target == nodes.region {
            let dragging = self.thumb_drag.is_dragging();
            self.core.visibility.pointer_left(event.timestamp, dragging);
        } else if event.target == nodes.thumb {
            self.thumb_hovered = false;
        } else if let Some(direction) = arrow_at(&nodes, event.target) {
            if self.hovered_arrow == Some(direction) {
                self.hovered_arrow = None;
            }
        } else {
            return false;
        }
        true
    }

    fn on_click(&mut self, doc: &mut Document, event: &mut DomEvent) -> bool {
        let Some(nodes) = self.core.overlay().copied() else {
            return false;
        };
        if doc.contains(nodes.track_background, event.target) {
            handlers::track_click(&mut self.core, doc, event)
        } else if let Some(direction) = arrow_at(&nodes, event.target) {
            handlers::arrow_step(&mut self.core, doc, event, direction)
        } else {
            false
        }
    }

    fn on_key_down(&mut self, doc: &mut Document, event: &mut DomEvent) -> bool {
        if !doc.contains(self.core.parts.container, event.target) {
            return false;
        }
        handlers::key_down(&mut self.core, doc, event)
    }

    fn on_scroll(&mut self, doc: &mut Document, event: &DomEvent) -> bool {
        match self.core.resolve_target(doc) {
            Some(target) if target == event.target => {}
            _ => return false,
        }
        self.core.update(doc);
        let arm_hide = !self.thumb_drag.is_dragging();
        self.core.visibility.scrolled(event.timestamp, arm_hide);
        self.notify_scroll(doc, event.target, event.timestamp);
        true
    }

    fn on_wheel(&mut self, doc: &mut Document, event: &DomEvent) -> bool {
        let container = self.core.parts.container;
        if !doc.contains(container, event.target) || in_foreign_instance(doc, event.target, container) {
            return false;
        }
        self.core.visibility.wheel(event.timestamp);
        true
    }

    fn notify_scroll(&mut self, doc: &Document, target: NodeId, timestamp: Duration) {
        if let Some(callback) = self.on_scroll.as_mut() {
            let metrics = doc.metrics(target);
            callback(&ScrollNotice {
                target,
                scroll_top: metrics.scroll_top,
                scroll_height: metrics.scroll_height,
                client_height: metrics.client_height,
                timestamp,
            });
        }
    }
}

fn extra_classes(props: &OverlayScrollbarProps) -> impl Iterator<Item = &str> {
    props
        .class_name
        .as_deref()
        .unwrap_or_default()
        .split_whitespace()
        .filter(|class| *class != WRAPPER_CLASS)
}

fn arrow_at(nodes: &OverlayNodes, target: NodeId) -> Option<ArrowDirection> {
    if nodes.up_arrow == Some(target) {
        Some(ArrowDirection::Up)
    } else if nodes.down_arrow == Some(target) {
        Some(ArrowDirection::Down)
    } else {
        None
    }
}
