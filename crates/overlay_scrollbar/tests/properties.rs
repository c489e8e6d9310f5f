//! Property tests for geometry bounds and timer invariants

mod common;

use std::time::Duration;

use common::{Harness, CONTENT, VIEWPORT};
use overlay_scrollbar::geometry::{thumb_drag_offset, track_click_offset};
use overlay_scrollbar::{
    OverlayScrollbarProps, ResolvedConfig, ScrollExtent, ScrollToOptions, ThumbGeometry, TrackLayout, Visibility,
};
use proptest::prelude::*;

#[derive(Clone, Copy, Debug)]
enum Trigger {
    Scroll { arm: bool },
    Wheel,
    Enter,
    Leave { dragging: bool },
    ArmDefault,
    Cancel,
    Advance(u64),
}

fn trigger() -> impl Strategy<Value = Trigger> {
    prop_oneof![
        any::<bool>().prop_map(|arm| Trigger::Scroll { arm }),
        Just(Trigger::Wheel),
        Just(Trigger::Enter),
        any::<bool>().prop_map(|dragging| Trigger::Leave { dragging }),
        Just(Trigger::ArmDefault),
        Just(Trigger::Cancel),
        (0u64..2_000).prop_map(Trigger::Advance),
    ]
}

fn extent() -> impl Strategy<Value = ScrollExtent> {
    (10.0f32..2_000.0, 0.0f32..20_000.0, 0.0f32..=1.0).prop_map(|(viewport, content, position)| {
        let max = (content - viewport).max(0.0);
        ScrollExtent::new(viewport, content, max * position)
    })
}

proptest! {
    #[test]
    fn prop_thumb_stays_inside_lane(extent in extent(), arrows in any::<bool>(), padding in 0.0f32..40.0) {
        let mut layout = TrackLayout::from_config(&ResolvedConfig::default());
        layout.show_arrows = arrows;
        let thumb = ThumbGeometry::compute(&extent, &layout, padding);

        prop_assert!(thumb.height.is_finite() && thumb.top.is_finite());
        prop_assert!(thumb.height >= layout.min_thumb_height);
        prop_assert!(thumb.top >= 0.0);

        let available = layout.available_track(extent.viewport_height, padding);
        let travel = (available - thumb.height).max(0.0);
        prop_assert!(thumb.top <= travel + 1e-3);
    }

    #[test]
    fn prop_thumb_top_follows_scroll_order(
        viewport in 50.0f32..1_000.0,
        extra in 10.0f32..10_000.0,
        a in 0.0f32..=1.0,
        b in 0.0f32..=1.0,
    ) {
        let layout = TrackLayout::from_config(&ResolvedConfig::default());
        let content = viewport + extra;
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let at = |position: f32| {
            let extent = ScrollExtent::new(viewport, content, extra * position);
            ThumbGeometry::compute(&extent, &layout, 0.0).top
        };
        prop_assert!(at(low) <= at(high) + 1e-3);
    }

    #[test]
    fn prop_pointer_offsets_are_clamped(
        extent in extent(),
        delta in -50_000.0f32..50_000.0,
        click in -5_000.0f32..5_000.0,
        thumb_height in 0.0f32..3_000.0,
    ) {
        let max = extent.max_scroll_top();
        let dragged = thumb_drag_offset(&extent, extent.scroll_top, delta, thumb_height);
        prop_assert!((0.0..=max).contains(&dragged));
        let clicked = track_click_offset(&extent, click);
        prop_assert!((0.0..=max).contains(&clicked));
    }

    #[test]
    fn prop_never_more_than_one_hide_timer(triggers in prop::collection::vec(trigger(), 1..60)) {
        let mut visibility = Visibility::new(ResolvedConfig::default().auto_hide.clone(), Duration::ZERO);
        let mut now = Duration::ZERO;

        for trigger in triggers {
            match trigger {
                Trigger::Scroll { arm } => {
                    visibility.scrolled(now, arm);
                }
                Trigger::Wheel => visibility.wheel(now),
                Trigger::Enter => visibility.pointer_entered(now),
                Trigger::Leave { dragging } => visibility.pointer_left(now, dragging),
                Trigger::ArmDefault => visibility.arm_default_hide(now),
                Trigger::Cancel => visibility.cancel_hide(),
                Trigger::Advance(millis) => {
                    now += Duration::from_millis(millis);
                    while visibility.pop_due(now).is_some() {}
                }
            }
            prop_assert!(visibility.pending_hide_timers() <= 1);
            if let Some(deadline) = visibility.hide_deadline() {
                prop_assert!(deadline >= now);
            }
        }
    }

    #[test]
    fn prop_refresh_is_idempotent(top in 0.0f32..1_000.0) {
        let mut h = Harness::settled(OverlayScrollbarProps::default());
        h.scrollbar.scroll_to(&mut h.doc, ScrollToOptions::top(top));
        let first = h.scrollbar.thumb();
        let applied = h.scroll_top();

        h.scrollbar.scroll_to(&mut h.doc, ScrollToOptions::default());
        prop_assert_eq!(h.scrollbar.thumb(), first);
        prop_assert!(!h.scrollbar.process_changes(&mut h.doc));
        prop_assert_eq!(h.scrollbar.thumb(), first);
        prop_assert_eq!(h.scroll_top(), applied);
        prop_assert!(applied <= CONTENT - VIEWPORT);
    }
}
