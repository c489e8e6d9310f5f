//! Thumb geometry
//!
//! Pure functions mapping scroll metrics to thumb size and position, and
//! pointer positions back to scroll offsets. Every ratio guards its
//! denominator; a degenerate input yields 0, never NaN.

use crate::config::ResolvedConfig;

/// Content must exceed the viewport by more than this to count as scrollable
pub const SCROLL_EPSILON: f32 = 2.0;

/// Vertical extent of a scroll surface
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollExtent {
    pub viewport_height: f32,
    pub content_height: f32,
    pub scroll_top: f32,
}

impl ScrollExtent {
    pub fn new(viewport_height: f32, content_height: f32, scroll_top: f32) -> Self {
        Self {
            viewport_height,
            content_height,
            scroll_top,
        }
    }

    /// Largest valid offset
    pub fn max_scroll_top(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Clamp an offset into `[0, max_scroll_top]`
    pub fn clamp(&self, offset: f32) -> f32 {
        if offset.is_finite() {
            offset.clamp(0.0, self.max_scroll_top())
        } else {
            0.0
        }
    }

    pub fn is_scrollable(&self) -> bool {
        self.content_height > self.viewport_height + SCROLL_EPSILON
    }
}

/// Track layout inputs taken from configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackLayout {
    pub show_arrows: bool,
    pub thumb_width: f32,
    pub margin: f32,
    pub min_thumb_height: f32,
}

impl TrackLayout {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            show_arrows: config.arrows.visible,
            thumb_width: config.thumb.width,
            margin: config.track.margin,
            min_thumb_height: config.thumb.min_height,
        }
    }

    /// Vertical space taken by arrows (or plain margins) at both track ends
    pub fn arrow_space(&self) -> f32 {
        if self.show_arrows {
            self.thumb_width * 2.0 + self.margin * 4.0
        } else {
            self.margin * 2.0
        }
    }

    /// Offset of the thumb lane from the top of the track area
    pub fn lane_top(&self) -> f32 {
        if self.show_arrows {
            self.thumb_width + self.margin * 2.0
        } else {
            self.margin
        }
    }

    /// Usable lane length for a viewport and the wrapper's vertical padding
    pub fn available_track(&self, viewport_height: f32, vertical_padding: f32) -> f32 {
        viewport_height - self.arrow_space() + vertical_padding
    }
}

/// Thumb size and offset within the lane
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ThumbGeometry {
    pub height: f32,
    pub top: f32,
}

impl ThumbGeometry {
    pub fn compute(extent: &ScrollExtent, layout: &TrackLayout, vertical_padding: f32) -> Self {
        let available = layout.available_track(extent.viewport_height, vertical_padding);
        let visible_ratio = ratio(extent.viewport_height, extent.content_height);
        let height = finite_or_zero(available * visible_ratio).max(layout.min_thumb_height);

        let travel = (available - height).max(0.0);
        let range = extent.content_height - extent.viewport_height;
        let top = if range > 0.0 {
            finite_or_zero(extent.scroll_top / range * travel).clamp(0.0, travel)
        } else {
            0.0
        };

        Self { height, top }
    }
}

/// Offset for a thumb dragged `delta_y` from where the drag started
///
/// Thumb travel is measured against the full viewport, so one pixel of
/// thumb movement scrolls `(content - viewport) / (viewport - thumb)`.
pub fn thumb_drag_offset(extent: &ScrollExtent, start_scroll_top: f32, delta_y: f32, thumb_height: f32) -> f32 {
    let scrollable = extent.content_height - extent.viewport_height;
    let travel = extent.viewport_height - thumb_height;
    let scroll_delta = if travel > 0.0 && scrollable > 0.0 {
        delta_y * scrollable / travel
    } else {
        0.0
    };
    extent.clamp(start_scroll_top + scroll_delta)
}

/// Offset for a click `click_y` below the top of the track area
pub fn track_click_offset(extent: &ScrollExtent, click_y: f32) -> f32 {
    let click_ratio = ratio(click_y, extent.viewport_height);
    extent.clamp(click_ratio * (extent.content_height - extent.viewport_height))
}

/// `numerator / denominator`, or 0 for a non-positive denominator
fn ratio(numerator: f32, denominator: f32) -> f32 {
    if denominator > 0.0 {
        finite_or_zero(numerator / denominator)
    } else {
        0.0
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
