//! Overlay render model
//!
//! Rectangles are relative to the wrapper's top-left corner. The track
//! region spans the wrapper's full height along its right edge; the thumb
//! lane, the background and the arrows share one horizontal lane inside it.

use overlay_dom::Rect;

use crate::config::{ResolvedConfig, TrackAlignment};
use crate::geometry::{ThumbGeometry, TrackLayout};
use crate::handlers::ArrowDirection;

/// Placement of every overlay part
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OverlayLayout {
    /// Hover region holding the background and the thumb
    pub region: Rect,
    pub track_background: Rect,
    pub thumb: Rect,
    pub up_arrow: Option<Rect>,
    pub down_arrow: Option<Rect>,
}

impl OverlayLayout {
    pub fn compute(config: &ResolvedConfig, thumb: &ThumbGeometry, wrapper_width: f32, wrapper_height: f32) -> Self {
        let layout = TrackLayout::from_config(config);
        let track_width = config.adjusted_track_width();
        let thumb_width = config.thumb.width;
        let margin = config.track.margin;

        let region_x = match config.track.alignment {
            TrackAlignment::Outside => wrapper_width,
            TrackAlignment::Center | TrackAlignment::Right => wrapper_width - track_width,
        };
        let region = Rect::new(region_x, 0.0, track_width, wrapper_height);
        let lane_x = region.right() - lane_right_offset(config) - thumb_width;

        let lane_top = layout.lane_top();
        let track_background = Rect::new(
            lane_x,
            lane_top,
            thumb_width,
            (wrapper_height - layout.arrow_space()).max(0.0),
        );
        let thumb = Rect::new(
            lane_x,
            lane_top + thumb.top,
            thumb_width,
            thumb.height.max(config.thumb.min_height),
        );

        let (up_arrow, down_arrow) = if layout.show_arrows {
            (
                Some(Rect::new(lane_x, margin, thumb_width, thumb_width)),
                Some(Rect::new(
                    lane_x,
                    wrapper_height - margin - thumb_width,
                    thumb_width,
                    thumb_width,
                )),
            )
        } else {
            (None, None)
        };

        Self {
            region,
            track_background,
            thumb,
            up_arrow,
            down_arrow,
        }
    }

    /// Same layout moved by the wrapper's page position
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        let shift = |r: Rect| Rect::new(r.x + dx, r.y + dy, r.width, r.height);
        Self {
            region: shift(self.region),
            track_background: shift(self.track_background),
            thumb: shift(self.thumb),
            up_arrow: self.up_arrow.map(shift),
            down_arrow: self.down_arrow.map(shift),
        }
    }
}

/// Distance between the lane and the region's right edge
pub fn lane_right_offset(config: &ResolvedConfig) -> f32 {
    match config.track.alignment {
        TrackAlignment::Right | TrackAlignment::Outside => 0.0,
        TrackAlignment::Center => (config.adjusted_track_width() - config.thumb.width) / 2.0,
    }
}

/// Interaction flags that pick colors and opacities
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub visible: bool,
    pub thumb_hovered: bool,
    pub thumb_dragging: bool,
    pub hovered_arrow: Option<ArrowDirection>,
    pub drag_scrolling: bool,
}

/// A painted part
#[derive(Clone, Debug, PartialEq)]
pub struct PartStyle {
    pub rect: Rect,
    pub color: String,
    pub opacity: f32,
    pub radius: f32,
}

/// Everything a renderer needs to draw the overlay
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollbarView {
    /// Overlay nodes exist: scrollbar enabled and content scrollable
    pub rendered: bool,
    pub visible: bool,
    /// Region opacity: 1 when visible, 0 otherwise
    pub opacity: f32,
    pub region: Rect,
    pub track: PartStyle,
    /// The background is painted only when the track is configured visible
    pub track_painted: bool,
    pub thumb: PartStyle,
    /// Arrows sit outside the region, so their opacity already folds in visibility
    pub up_arrow: Option<PartStyle>,
    pub down_arrow: Option<PartStyle>,
    /// Text selection is suppressed on the container during free drag-scroll
    pub user_select_disabled: bool,
}

impl ScrollbarView {
    pub fn build(config: &ResolvedConfig, layout: &OverlayLayout, state: ViewState, rendered: bool) -> Self {
        let thumb_active = state.thumb_hovered || state.thumb_dragging;
        let thumb = PartStyle {
            rect: layout.thumb,
            color: if thumb_active {
                config.thumb.hover_color.clone()
            } else {
                config.thumb.color.clone()
            },
            opacity: if thumb_active {
                config.thumb.hover_opacity
            } else {
                config.thumb.opacity
            },
            radius: config.thumb.radius,
        };

        let track = PartStyle {
            rect: layout.track_background,
            color: config.track.color.clone(),
            opacity: 1.0,
            radius: config.track.radius,
        };

        let arrow = |rect: Option<Rect>, direction: ArrowDirection| {
            rect.map(|rect| {
                let hovered = state.hovered_arrow == Some(direction);
                let opacity = match (state.visible, hovered) {
                    (false, _) => 0.0,
                    (true, true) => config.arrows.hover_opacity,
                    (true, false) => config.arrows.opacity,
                };
                PartStyle {
                    rect,
                    color: if hovered {
                        config.arrows.hover_color.clone()
                    } else {
                        config.arrows.color.clone()
                    },
                    opacity,
                    radius: 0.0,
                }
            })
        };

        Self {
            rendered,
            visible: state.visible,
            opacity: if state.visible { 1.0 } else { 0.0 },
            region: layout.region,
            track,
            track_painted: config.track.visible,
            thumb,
            up_arrow: arrow(layout.up_arrow, ArrowDirection::Up),
            down_arrow: arrow(layout.down_arrow, ArrowDirection::Down),
            user_select_disabled: state.drag_scrolling,
        }
    }
}
