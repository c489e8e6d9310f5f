//! Show/hide timing driven through the public component

mod common;

use common::{ms, Harness};
use overlay_core::events::event_types::*;
use overlay_dom::DomEvent;
use overlay_scrollbar::{AutoHideConfig, OverlayScrollbarProps};

fn auto_hide(config: AutoHideConfig) -> OverlayScrollbarProps {
    OverlayScrollbarProps::new().auto_hide(config)
}

#[test]
fn test_scroll_hides_after_default_delay() {
    let mut h = Harness::settled(OverlayScrollbarProps::default());
    h.advance_to(ms(300));
    h.scroll_container_to(100.0);
    assert!(h.scrollbar.is_visible());

    h.advance_to(ms(1799));
    assert!(h.scrollbar.is_visible());
    h.advance_to(ms(1800));
    assert!(!h.scrollbar.is_visible());
}

#[test]
fn test_wheel_scroll_hides_after_wheel_delay() {
    let mut h = Harness::settled(OverlayScrollbarProps::default());
    let container = h.container();
    h.advance_to(ms(300));

    h.send(DomEvent::wheel(container, 100.0, h.now));
    assert!(h.scrollbar.visibility().wheel_active());
    h.scroll_container_to(100.0);
    assert!(h.scrollbar.is_visible());

    // Wheel flag decays at 600 without touching the pending hide
    h.advance_to(ms(650));
    assert!(!h.scrollbar.visibility().wheel_active());
    assert!(h.scrollbar.is_visible());

    h.advance_to(ms(999));
    assert!(h.scrollbar.is_visible());
    h.advance_to(ms(1000));
    assert!(!h.scrollbar.is_visible());
}

#[test]
fn test_wheel_without_scroll_shows_after_debounce() {
    let mut h = Harness::settled(OverlayScrollbarProps::default());
    let container = h.container();
    h.advance_to(ms(300));

    // Wheel at the boundary: nothing scrolls, the debounce shows the bar anyway
    h.send(DomEvent::wheel(container, -100.0, h.now));
    h.advance_to(ms(349));
    assert!(!h.scrollbar.is_visible());
    h.advance_to(ms(350));
    assert!(h.scrollbar.is_visible());

    h.advance_to(ms(1049));
    assert!(h.scrollbar.is_visible());
    h.advance_to(ms(1050));
    assert!(!h.scrollbar.is_visible());
}

#[test]
fn test_wheel_outside_container_is_ignored() {
    let mut h = Harness::settled(OverlayScrollbarProps::default());
    let body = h.doc.body();
    h.send(DomEvent::wheel(body, 100.0, h.now));
    assert!(!h.scrollbar.visibility().wheel_active());
}

#[test]
fn test_initial_delay_suppresses_showing() {
    let mut h = Harness::mounted(OverlayScrollbarProps::default());
    let container = h.container();

    // Restoring a saved position right after mount
    h.scroll_container_to(300.0);
    assert_eq!(h.scroll_top(), 300.0);
    assert!(!h.scrollbar.is_visible());
    assert!(h.scrollbar.has_scrollable_content());

    h.advance_to(ms(50));
    h.send(DomEvent::wheel(container, 100.0, h.now));
    h.advance_to(ms(150));
    assert!(!h.scrollbar.is_visible());

    h.advance_to(ms(200));
    assert!(!h.scrollbar.visibility().initial_delay_active());
    assert!(!h.scrollbar.is_visible());

    h.advance_to(ms(250));
    h.scroll_container_to(350.0);
    assert!(h.scrollbar.is_visible());
}

#[test]
fn test_disabled_auto_hide_stays_visible() {
    let mut h = Harness::mounted(auto_hide(AutoHideConfig {
        enabled: Some(false),
        ..Default::default()
    }));

    h.advance_to(ms(100));
    assert!(!h.scrollbar.is_visible());
    h.advance_to(ms(200));
    assert!(h.scrollbar.is_visible());

    h.scroll_container_to(200.0);
    h.advance_to(ms(10_000));
    assert!(h.scrollbar.is_visible());
    assert_eq!(h.scrollbar.visibility().pending_hide_timers(), 0);

    let region = h.scrollbar.overlay().unwrap().region;
    h.send(DomEvent::simple(POINTER_ENTER, region, h.now));
    h.send(DomEvent::simple(POINTER_LEAVE, region, h.now));
    h.advance(ms(5_000));
    assert!(h.scrollbar.is_visible());
}

#[test]
fn test_disabled_auto_hide_without_initial_delay() {
    let mut h = Harness::mounted(auto_hide(AutoHideConfig {
        enabled: Some(false),
        initial_delay: Some(0),
        ..Default::default()
    }));
    h.advance_to(ms(1));
    assert!(h.scrollbar.is_visible());
}

#[test]
fn test_disabling_auto_hide_at_runtime_cancels_pending_hide() {
    let mut h = Harness::settled(OverlayScrollbarProps::default());
    h.scroll_container_to(100.0);
    assert!(h.scrollbar.visibility().hide_deadline().is_some());

    let props = auto_hide(AutoHideConfig {
        enabled: Some(false),
        ..Default::default()
    });
    h.scrollbar.set_props(&mut h.doc, props).unwrap();
    assert_eq!(h.scrollbar.visibility().hide_deadline(), None);
    assert!(h.scrollbar.is_visible());

    h.advance(ms(5_000));
    assert!(h.scrollbar.is_visible());
}

#[test]
fn test_re_enabling_auto_hide_at_runtime_arms_hide() {
    let mut h = Harness::settled(auto_hide(AutoHideConfig {
        enabled: Some(false),
        ..Default::default()
    }));
    assert!(h.scrollbar.is_visible());
    assert_eq!(h.scrollbar.visibility().hide_deadline(), None);

    h.scrollbar.set_props(&mut h.doc, OverlayScrollbarProps::default()).unwrap();
    assert_eq!(h.scrollbar.visibility().hide_deadline(), Some(h.now + ms(1500)));

    h.advance(ms(1500));
    assert!(!h.scrollbar.is_visible());
}

#[test]
fn test_custom_delays() {
    let mut h = Harness::settled(auto_hide(AutoHideConfig {
        delay: Some(400),
        delay_on_wheel: Some(100),
        ..Default::default()
    }));
    let container = h.container();

    h.scroll_container_to(100.0);
    assert_eq!(h.scrollbar.visibility().hide_deadline(), Some(h.now + ms(400)));

    h.advance(ms(500));
    h.send(DomEvent::wheel(container, 100.0, h.now));
    h.scroll_container_to(200.0);
    assert_eq!(h.scrollbar.visibility().hide_deadline(), Some(h.now + ms(100)));
}

#[test]
fn test_hover_shows_after_debounce() {
    let mut h = Harness::settled(OverlayScrollbarProps::default());
    let region = h.scrollbar.overlay().unwrap().region;

    h.send(DomEvent::simple(POINTER_ENTER, region, h.now));
    h.advance(ms(99));
    assert!(!h.scrollbar.is_visible());
    h.advance(ms(1));
    assert!(h.scrollbar.is_visible());

    // Hovering holds the bar up
    h.advance(ms(10_000));
    assert!(h.scrollbar.is_visible());

    h.send(DomEvent::simple(POINTER_LEAVE, region, h.now));
    assert_eq!(h.scrollbar.visibility().hide_deadline(), Some(h.now + ms(1500)));
    h.advance(ms(1500));
    assert!(!h.scrollbar.is_visible());
}

#[test]
fn test_brief_hover_never_shows() {
    let mut h = Harness::settled(OverlayScrollbarProps::default());
    let region = h.scrollbar.overlay().unwrap().region;

    h.send(DomEvent::simple(POINTER_ENTER, region, h.now));
    h.advance(ms(50));
    h.send(DomEvent::simple(POINTER_LEAVE, region, h.now));
    h.advance(ms(200));
    assert!(!h.scrollbar.is_visible());
}

#[test]
fn test_hover_cancels_pending_hide() {
    let mut h = Harness::settled(OverlayScrollbarProps::default());
    let region = h.scrollbar.overlay().unwrap().region;
    h.scroll_container_to(100.0);

    h.advance(ms(1000));
    h.send(DomEvent::simple(POINTER_ENTER, region, h.now));
    assert_eq!(h.scrollbar.visibility().hide_deadline(), None);
    h.advance(ms(3000));
    assert!(h.scrollbar.is_visible());
}

#[test]
fn test_leaving_during_thumb_drag_keeps_bar_up() {
    let mut h = Harness::settled(OverlayScrollbarProps::default());
    let nodes = *h.scrollbar.overlay().unwrap();

    h.send(DomEvent::simple(POINTER_ENTER, nodes.region, h.now));
    h.send(DomEvent::pointer(POINTER_DOWN, nodes.thumb, 292.0, 50.0, h.now));
    h.send(DomEvent::simple(POINTER_LEAVE, nodes.region, h.now));
    assert_eq!(h.scrollbar.visibility().hide_deadline(), None);

    h.advance(ms(5_000));
    assert!(h.scrollbar.is_visible());
}

#[test]
fn test_repeated_scrolls_keep_one_hide_timer() {
    let mut h = Harness::settled(OverlayScrollbarProps::default());
    for step in 1..=20 {
        h.advance(ms(30));
        h.scroll_container_to(step as f32 * 10.0);
        assert_eq!(h.scrollbar.visibility().pending_hide_timers(), 1);
    }
    assert_eq!(h.scrollbar.visibility().hide_deadline(), Some(h.now + ms(1500)));
}

#[test]
fn test_content_shrinking_hides_and_removes_overlay() {
    let mut h = Harness::settled(OverlayScrollbarProps::default());
    h.scroll_container_to(100.0);
    assert!(h.scrollbar.is_visible());

    let (container, content) = (h.container(), h.scrollbar.content());
    h.doc.set_scroll_extent(container, 400.0, 300.0).unwrap();
    h.doc.set_scroll_extent(content, 300.0, 300.0).unwrap();
    h.advance(ms(16));

    assert!(!h.scrollbar.has_scrollable_content());
    assert!(!h.scrollbar.is_visible());
    assert!(h.scrollbar.overlay().is_none());
    assert_eq!(h.scrollbar.visibility().hide_deadline(), None);
    assert!(!h.scrollbar.view(&h.doc).rendered);
}

#[test]
fn test_content_growing_renders_overlay() {
    let mut h = Harness::with_content(OverlayScrollbarProps::default(), 300.0);
    h.advance_to(ms(250));
    assert!(h.scrollbar.overlay().is_none());

    let (container, content) = (h.container(), h.scrollbar.content());
    h.doc.set_scroll_extent(container, 400.0, 1000.0).unwrap();
    h.doc.set_scroll_extent(content, 1000.0, 1000.0).unwrap();
    h.advance(ms(16));

    assert!(h.scrollbar.has_scrollable_content());
    assert!(h.scrollbar.overlay().is_some());
    assert!((h.scrollbar.thumb().height - 156.8).abs() < 0.01);
}
