//! Shared scrollbar state
//!
//! [`ScrollbarCore`] is the single state object every handler receives: the
//! resolved configuration, the target cache, the thumb geometry, the
//! visibility timers, the change watchers and the overlay nodes. Handlers
//! hold only their own session state and call back into the core.

use std::time::Duration;

use overlay_dom::{Document, DomError, NodeId};
use tracing::{debug, warn};

use crate::config::ResolvedConfig;
use crate::geometry::{ScrollExtent, ThumbGeometry, TrackLayout};
use crate::resolver::{ScrollParts, ScrollTargetResolver};
use crate::view::OverlayLayout;
use crate::visibility::Visibility;
use crate::watchers::{ChangeSet, ChangeWatchers};

pub const WRAPPER_CLASS: &str = "overlay-scrollbar-wrapper";
pub const CONTENT_CLASS: &str = "overlay-scrollbar-content";
pub const TRACK_CLASS: &str = "overlay-scrollbar-track";
pub const TRACK_BACKGROUND_CLASS: &str = "overlay-scrollbar-track-background";
pub const THUMB_CLASS: &str = "overlay-scrollbar-thumb";
pub const UP_ARROW_CLASS: &str = "overlay-scrollbar-up-arrow";
pub const DOWN_ARROW_CLASS: &str = "overlay-scrollbar-down-arrow";

/// Vertical extent of `node` as the geometry engine sees it
pub fn extent_of(doc: &Document, node: NodeId) -> ScrollExtent {
    let metrics = doc.metrics(node);
    ScrollExtent::new(metrics.client_height, metrics.scroll_height, metrics.scroll_top)
}

/// Overlay parts rendered as wrapper children
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayNodes {
    pub region: NodeId,
    pub track_background: NodeId,
    pub thumb: NodeId,
    pub up_arrow: Option<NodeId>,
    pub down_arrow: Option<NodeId>,
}

impl OverlayNodes {
    fn create(doc: &mut Document, wrapper: NodeId, arrows: bool) -> Result<Self, DomError> {
        let region = doc.create_child(wrapper, "div", &[TRACK_CLASS])?;
        let track_background = doc.create_child(region, "div", &[TRACK_BACKGROUND_CLASS])?;
        let thumb = doc.create_child(region, "div", &[THUMB_CLASS])?;
        let (up_arrow, down_arrow) = if arrows {
            (
                Some(doc.create_child(wrapper, "div", &[UP_ARROW_CLASS])?),
                Some(doc.create_child(wrapper, "div", &[DOWN_ARROW_CLASS])?),
            )
        } else {
            (None, None)
        };
        Ok(Self {
            region,
            track_background,
            thumb,
            up_arrow,
            down_arrow,
        })
    }

    fn place(&self, doc: &mut Document, layout: &OverlayLayout) -> Result<(), DomError> {
        doc.set_rect(self.region, layout.region)?;
        doc.set_rect(self.track_background, layout.track_background)?;
        doc.set_rect(self.thumb, layout.thumb)?;
        if let (Some(node), Some(rect)) = (self.up_arrow, layout.up_arrow) {
            doc.set_rect(node, rect)?;
        }
        if let (Some(node), Some(rect)) = (self.down_arrow, layout.down_arrow) {
            doc.set_rect(node, rect)?;
        }
        Ok(())
    }

    fn remove(self, doc: &mut Document) {
        for node in [Some(self.region), self.up_arrow, self.down_arrow]
            .into_iter()
            .flatten()
        {
            if doc.exists(node) {
                if let Err(err) = doc.remove_subtree(node) {
                    warn!(%err, "failed to remove overlay node");
                }
            }
        }
    }

    /// Whether `node` is the thumb
    pub fn is_thumb(&self, node: NodeId) -> bool {
        node == self.thumb
    }
}

#[derive(Debug)]
pub struct ScrollbarCore {
    pub(crate) config: ResolvedConfig,
    pub(crate) wrapper: NodeId,
    pub(crate) parts: ScrollParts,
    pub(crate) resolver: ScrollTargetResolver,
    pub(crate) visibility: Visibility,
    watchers: ChangeWatchers,
    thumb: ThumbGeometry,
    has_scrollable_content: bool,
    overlay: Option<OverlayNodes>,
}

impl ScrollbarCore {
    pub fn new(doc: &mut Document, config: ResolvedConfig, wrapper: NodeId, parts: ScrollParts, now: Duration) -> Self {
        Self {
            resolver: ScrollTargetResolver::new(config.detect_inner_scroll),
            visibility: Visibility::new(config.auto_hide.clone(), now),
            watchers: ChangeWatchers::connect(doc, parts),
            config,
            wrapper,
            parts,
            thumb: ThumbGeometry::default(),
            has_scrollable_content: false,
            overlay: None,
        }
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn thumb(&self) -> ThumbGeometry {
        self.thumb
    }

    pub fn has_scrollable_content(&self) -> bool {
        self.has_scrollable_content
    }

    pub fn overlay(&self) -> Option<&OverlayNodes> {
        self.overlay.as_ref()
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn layout(&self) -> TrackLayout {
        TrackLayout::from_config(&self.config)
    }

    /// Layout of the overlay parts relative to the wrapper
    pub fn overlay_layout(&self, doc: &Document) -> OverlayLayout {
        let wrapper = doc.rect(self.wrapper);
        OverlayLayout::compute(&self.config, &self.thumb, wrapper.width, wrapper.height)
    }

    /// Swap in a new configuration and refresh
    pub fn set_config(&mut self, doc: &mut Document, config: ResolvedConfig, now: Duration) {
        self.resolver.set_detect_inner_scroll(config.detect_inner_scroll);
        self.visibility.set_policy(config.auto_hide.clone(), now);
        self.config = config;
        self.update(doc);
    }

    pub fn resolve_target(&mut self, doc: &Document) -> Option<NodeId> {
        self.resolver.resolve(doc, self.parts)
    }

    pub fn is_scrollable(&mut self, doc: &Document) -> bool {
        self.resolve_target(doc).is_some()
    }

    /// Recompute geometry and visibility from the live document
    pub fn update(&mut self, doc: &mut Document) {
        let target = self.resolver.resolve(doc, self.parts);
        self.watchers.sync_target(doc, target);

        match target {
            None => {
                self.has_scrollable_content = false;
                self.visibility.hide();
                self.visibility.cancel_hide();
            }
            Some(target) => {
                self.has_scrollable_content = true;
                if !self.visibility.auto_hide_enabled() && !self.visibility.initial_delay_active() {
                    self.visibility.show();
                    self.visibility.cancel_hide();
                }
                let extent = extent_of(doc, target);
                let padding = doc.padding(self.wrapper).vertical_sum();
                self.thumb = ThumbGeometry::compute(&extent, &self.layout(), padding);
            }
        }

        self.sync_overlay(doc);
    }

    /// Write a clamped offset to `target` and refresh. Returns the applied offset.
    pub fn scroll_target_to(&mut self, doc: &mut Document, target: NodeId, offset: f32) -> f32 {
        let clamped = extent_of(doc, target).clamp(offset);
        let applied = doc.set_scroll_top(target, clamped).unwrap_or(0.0);
        self.update(doc);
        applied
    }

    /// Drain the watchers; a mutation drops the cached target
    pub fn process_changes(&mut self, doc: &mut Document) -> ChangeSet {
        let changes = self.watchers.pump(doc);
        if changes.mutated {
            self.resolver.invalidate();
        }
        if !changes.is_empty() {
            self.update(doc);
        }
        changes
    }

    fn sync_overlay(&mut self, doc: &mut Document) {
        let wanted = self.config.show_scrollbar && self.has_scrollable_content;
        let arrows = self.config.arrows.visible;

        if let Some(nodes) = self.overlay {
            if !wanted || nodes.up_arrow.is_some() != arrows {
                self.overlay = None;
                nodes.remove(doc);
                debug!("scrollbar overlay removed");
            }
        }
        if !wanted {
            return;
        }

        if self.overlay.is_none() {
            match OverlayNodes::create(doc, self.wrapper, arrows) {
                Ok(nodes) => {
                    debug!(region = ?nodes.region, arrows, "scrollbar overlay created");
                    self.overlay = Some(nodes);
                }
                Err(err) => {
                    warn!(%err, "failed to create scrollbar overlay");
                    return;
                }
            }
        }

        let wrapper = doc.rect(self.wrapper);
        let layout = self.overlay_layout(doc).translated(wrapper.x, wrapper.y);
        if let Some(nodes) = self.overlay {
            if let Err(err) = nodes.place(doc, &layout) {
                warn!(%err, "failed to place scrollbar overlay");
            }
        }
    }

    /// Drop timers, observers and overlay nodes
    pub fn teardown(self, doc: &mut Document) {
        let Self {
            mut visibility,
            watchers,
            overlay,
            ..
        } = self;
        visibility.cancel_all();
        watchers.disconnect(doc);
        if let Some(nodes) = overlay {
            nodes.remove(doc);
        }
    }
}
