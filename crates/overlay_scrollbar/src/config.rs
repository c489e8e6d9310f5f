//! Scrollbar configuration
//!
//! Props arrive as partially filled groups (every field optional) and are
//! resolved into complete groups with defaults applied. Resolution is
//! memoized per group: resolving equal input again hands back the same
//! `Arc`, so consumers can compare groups by pointer.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::exclusion::DragScrollFilter;

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_THUMB_WIDTH: f32 = 8.0;
pub const DEFAULT_THUMB_MIN_HEIGHT: f32 = 50.0;
pub const DEFAULT_THUMB_COLOR: &str = "#606060";
pub const DEFAULT_THUMB_OPACITY: f32 = 0.6;
pub const DEFAULT_HOVER_OPACITY: f32 = 1.0;

pub const DEFAULT_TRACK_WIDTH: f32 = 16.0;
pub const DEFAULT_TRACK_COLOR: &str = "rgba(128, 128, 128, 0.1)";
pub const DEFAULT_TRACK_MARGIN: f32 = 4.0;

pub const DEFAULT_ARROW_STEP: f32 = 50.0;
pub const DEFAULT_ARROW_COLOR: &str = "#808080";
pub const DEFAULT_ARROW_OPACITY: f32 = 0.6;

pub const DEFAULT_HIDE_DELAY_MS: u64 = 1500;
pub const DEFAULT_WHEEL_HIDE_DELAY_MS: u64 = 700;
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 200;

// ============================================================================
// Props (partial input)
// ============================================================================

/// Thumb appearance
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThumbConfig {
    pub width: Option<f32>,
    pub min_height: Option<f32>,
    pub radius: Option<f32>,
    pub color: Option<String>,
    pub opacity: Option<f32>,
    pub hover_color: Option<String>,
    pub hover_opacity: Option<f32>,
}

/// Horizontal placement of the thumb lane inside the track area
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackAlignment {
    /// Lane centered in the track width
    #[default]
    Center,
    /// Lane flush with the wrapper's right edge
    Right,
    /// Track area placed just outside the wrapper's right edge
    Outside,
}

/// Track appearance
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackConfig {
    pub width: Option<f32>,
    pub color: Option<String>,
    pub visible: Option<bool>,
    pub alignment: Option<TrackAlignment>,
    pub radius: Option<f32>,
    pub margin: Option<f32>,
}

/// Step arrows above and below the track
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArrowsConfig {
    pub visible: Option<bool>,
    pub step: Option<f32>,
    pub color: Option<String>,
    pub opacity: Option<f32>,
    pub hover_color: Option<String>,
    pub hover_opacity: Option<f32>,
}

/// Free drag-to-scroll on content
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DragScrollConfig {
    pub enabled: Option<bool>,
    /// Extra classes that block drag-scroll on an element or its near ancestors
    pub exclude_classes: Option<Vec<String>>,
    /// Selectors that block drag-scroll on a matching press target
    pub exclude_selectors: Option<Vec<String>>,
}

/// Auto-hide timing, in milliseconds
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoHideConfig {
    pub enabled: Option<bool>,
    pub delay: Option<u64>,
    pub delay_on_wheel: Option<u64>,
    pub initial_delay: Option<u64>,
}

/// Everything a host passes when mounting or re-rendering a scrollbar
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlayScrollbarProps {
    /// Extra classes for the wrapper node
    pub class_name: Option<String>,
    pub thumb: ThumbConfig,
    pub track: TrackConfig,
    pub arrows: ArrowsConfig,
    pub drag_scroll: DragScrollConfig,
    pub auto_hide: AutoHideConfig,
    pub show_scrollbar: bool,
    /// Search the content subtree for an inner scroll surface
    pub detect_inner_scroll: bool,
}

impl Default for OverlayScrollbarProps {
    fn default() -> Self {
        Self {
            class_name: None,
            thumb: ThumbConfig::default(),
            track: TrackConfig::default(),
            arrows: ArrowsConfig::default(),
            drag_scroll: DragScrollConfig::default(),
            auto_hide: AutoHideConfig::default(),
            show_scrollbar: true,
            detect_inner_scroll: false,
        }
    }
}

impl OverlayScrollbarProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load props from a JSON document using the camelCase field names
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load props from a TOML document using the camelCase field names
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn thumb(mut self, thumb: ThumbConfig) -> Self {
        self.thumb = thumb;
        self
    }

    pub fn track(mut self, track: TrackConfig) -> Self {
        self.track = track;
        self
    }

    pub fn arrows(mut self, arrows: ArrowsConfig) -> Self {
        self.arrows = arrows;
        self
    }

    pub fn drag_scroll(mut self, drag_scroll: DragScrollConfig) -> Self {
        self.drag_scroll = drag_scroll;
        self
    }

    pub fn auto_hide(mut self, auto_hide: AutoHideConfig) -> Self {
        self.auto_hide = auto_hide;
        self
    }

    pub fn show_scrollbar(mut self, show: bool) -> Self {
        self.show_scrollbar = show;
        self
    }

    pub fn detect_inner_scroll(mut self, detect: bool) -> Self {
        self.detect_inner_scroll = detect;
        self
    }
}

// ============================================================================
// Resolved configuration
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedThumb {
    pub width: f32,
    pub min_height: f32,
    pub radius: f32,
    pub color: String,
    pub opacity: f32,
    pub hover_color: String,
    pub hover_opacity: f32,
}

impl ResolvedThumb {
    fn resolve(config: &ThumbConfig) -> Self {
        let width = config.width.unwrap_or(DEFAULT_THUMB_WIDTH);
        let color = config
            .color
            .clone()
            .unwrap_or_else(|| DEFAULT_THUMB_COLOR.to_string());
        Self {
            width,
            min_height: config.min_height.unwrap_or(DEFAULT_THUMB_MIN_HEIGHT),
            radius: config.radius.unwrap_or(width / 2.0),
            hover_color: config.hover_color.clone().unwrap_or_else(|| color.clone()),
            color,
            opacity: config.opacity.unwrap_or(DEFAULT_THUMB_OPACITY),
            hover_opacity: config.hover_opacity.unwrap_or(DEFAULT_HOVER_OPACITY),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedTrack {
    pub width: f32,
    pub color: String,
    /// Paint the background lane. The lane stays clickable either way.
    pub visible: bool,
    pub alignment: TrackAlignment,
    pub radius: f32,
    pub margin: f32,
}

impl ResolvedTrack {
    fn resolve(config: &TrackConfig, thumb_radius: f32) -> Self {
        Self {
            width: config.width.unwrap_or(DEFAULT_TRACK_WIDTH),
            color: config
                .color
                .clone()
                .unwrap_or_else(|| DEFAULT_TRACK_COLOR.to_string()),
            visible: config.visible.unwrap_or(true),
            alignment: config.alignment.unwrap_or_default(),
            radius: config.radius.unwrap_or(thumb_radius),
            margin: config.margin.unwrap_or(DEFAULT_TRACK_MARGIN),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedArrows {
    pub visible: bool,
    pub step: f32,
    pub color: String,
    pub opacity: f32,
    pub hover_color: String,
    pub hover_opacity: f32,
}

impl ResolvedArrows {
    fn resolve(config: &ArrowsConfig) -> Self {
        let color = config
            .color
            .clone()
            .unwrap_or_else(|| DEFAULT_ARROW_COLOR.to_string());
        Self {
            visible: config.visible.unwrap_or(false),
            step: config.step.unwrap_or(DEFAULT_ARROW_STEP),
            hover_color: config.hover_color.clone().unwrap_or_else(|| color.clone()),
            color,
            opacity: config.opacity.unwrap_or(DEFAULT_ARROW_OPACITY),
            hover_opacity: config.hover_opacity.unwrap_or(DEFAULT_HOVER_OPACITY),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedDragScroll {
    pub enabled: bool,
    pub exclude_classes: Vec<String>,
    pub exclude_selectors: Vec<String>,
    /// Compiled form of the two exclusion lists plus the built-in classes
    pub filter: DragScrollFilter,
}

impl ResolvedDragScroll {
    fn resolve(config: &DragScrollConfig) -> Self {
        let exclude_classes = config.exclude_classes.clone().unwrap_or_default();
        let exclude_selectors = config.exclude_selectors.clone().unwrap_or_default();
        Self {
            enabled: config.enabled.unwrap_or(true),
            filter: DragScrollFilter::new(&exclude_classes, &exclude_selectors),
            exclude_classes,
            exclude_selectors,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAutoHide {
    pub enabled: bool,
    pub delay: Duration,
    pub delay_on_wheel: Duration,
    pub initial_delay: Duration,
}

impl ResolvedAutoHide {
    fn resolve(config: &AutoHideConfig) -> Self {
        Self {
            enabled: config.enabled.unwrap_or(true),
            delay: Duration::from_millis(config.delay.unwrap_or(DEFAULT_HIDE_DELAY_MS)),
            delay_on_wheel: Duration::from_millis(
                config.delay_on_wheel.unwrap_or(DEFAULT_WHEEL_HIDE_DELAY_MS),
            ),
            initial_delay: Duration::from_millis(
                config.initial_delay.unwrap_or(DEFAULT_INITIAL_DELAY_MS),
            ),
        }
    }
}

impl Default for ResolvedAutoHide {
    fn default() -> Self {
        Self::resolve(&AutoHideConfig::default())
    }
}

/// Fully resolved configuration, cheap to clone
#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub thumb: Arc<ResolvedThumb>,
    pub track: Arc<ResolvedTrack>,
    pub arrows: Arc<ResolvedArrows>,
    pub drag_scroll: Arc<ResolvedDragScroll>,
    pub auto_hide: Arc<ResolvedAutoHide>,
    pub show_scrollbar: bool,
    pub detect_inner_scroll: bool,
}

impl ResolvedConfig {
    /// Width reserved for the track area: never narrower than the thumb
    pub fn adjusted_track_width(&self) -> f32 {
        self.track.width.max(self.thumb.width)
    }

    pub fn arrows_visible(&self) -> bool {
        self.arrows.visible
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        ConfigResolver::new().resolve(&OverlayScrollbarProps::default())
    }
}

// ============================================================================
// Memoized resolution
// ============================================================================

/// Last input and its resolved output
#[derive(Debug)]
struct Memo<I, O> {
    entry: Option<(I, Arc<O>)>,
}

impl<I: PartialEq + Clone, O> Memo<I, O> {
    fn new() -> Self {
        Self { entry: None }
    }

    fn get(&mut self, input: &I, resolve: impl FnOnce(&I) -> O) -> Arc<O> {
        if let Some((last, output)) = &self.entry {
            if last == input {
                return Arc::clone(output);
            }
        }
        let output = Arc::new(resolve(input));
        self.entry = Some((input.clone(), Arc::clone(&output)));
        output
    }
}

/// Resolves props into [`ResolvedConfig`], once per group change
#[derive(Debug)]
pub struct ConfigResolver {
    thumb: Memo<ThumbConfig, ResolvedThumb>,
    track: Memo<(TrackConfig, f32), ResolvedTrack>,
    arrows: Memo<ArrowsConfig, ResolvedArrows>,
    drag_scroll: Memo<DragScrollConfig, ResolvedDragScroll>,
    auto_hide: Memo<AutoHideConfig, ResolvedAutoHide>,
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self {
            thumb: Memo::new(),
            track: Memo::new(),
            arrows: Memo::new(),
            drag_scroll: Memo::new(),
            auto_hide: Memo::new(),
        }
    }

    pub fn resolve(&mut self, props: &OverlayScrollbarProps) -> ResolvedConfig {
        let thumb = self.thumb.get(&props.thumb, ResolvedThumb::resolve);
        let track = self
            .track
            .get(&(props.track.clone(), thumb.radius), |(track, radius)| {
                ResolvedTrack::resolve(track, *radius)
            });
        ResolvedConfig {
            thumb,
            track,
            arrows: self.arrows.get(&props.arrows, ResolvedArrows::resolve),
            drag_scroll: self
                .drag_scroll
                .get(&props.drag_scroll, ResolvedDragScroll::resolve),
            auto_hide: self.auto_hide.get(&props.auto_hide, ResolvedAutoHide::resolve),
            show_scrollbar: props.show_scrollbar,
            detect_inner_scroll: props.detect_inner_scroll,
        }
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}
