//! Shared harness for the integration tests
//!
//! Mounts one instance into a fresh document with a 300x400 wrapper whose
//! content is 1000 tall, and drives time and scroll notifications the way a
//! host event loop would.

#![allow(dead_code)]

use std::time::Duration;

use overlay_dom::{Document, DomEvent, NodeId, Rect};
use overlay_scrollbar::{OverlayScrollbar, OverlayScrollbarProps};
use tracing_subscriber::EnvFilter;

pub const WRAPPER_WIDTH: f32 = 300.0;
pub const VIEWPORT: f32 = 400.0;
pub const CONTENT: f32 = 1000.0;

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Route `RUST_LOG` output through the test writer
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Give a mounted instance a layout: wrapper rect plus container and content extents
pub fn lay_out(doc: &mut Document, scrollbar: &OverlayScrollbar, rect: Rect, content_height: f32) {
    doc.set_rect(scrollbar.wrapper(), rect).unwrap();
    doc.set_scroll_extent(scrollbar.scroll_container(), rect.height, content_height)
        .unwrap();
    doc.set_scroll_extent(scrollbar.content(), content_height, content_height)
        .unwrap();
}

pub struct Harness {
    pub doc: Document,
    pub scrollbar: OverlayScrollbar,
    pub now: Duration,
}

impl Harness {
    /// Mounted and laid out, still inside the initial delay
    pub fn mounted(props: OverlayScrollbarProps) -> Self {
        Self::with_content(props, CONTENT)
    }

    pub fn with_content(props: OverlayScrollbarProps, content_height: f32) -> Self {
        init_tracing();
        let mut doc = Document::new();
        let body = doc.body();
        let scrollbar = OverlayScrollbar::mount(&mut doc, body, props, Duration::ZERO).unwrap();
        lay_out(
            &mut doc,
            &scrollbar,
            Rect::new(0.0, 0.0, WRAPPER_WIDTH, VIEWPORT),
            content_height,
        );
        Self {
            doc,
            scrollbar,
            now: Duration::ZERO,
        }
    }

    /// Mounted, laid out and past the initial delay
    pub fn settled(props: OverlayScrollbarProps) -> Self {
        let mut harness = Self::mounted(props);
        harness.advance_to(ms(250));
        harness
    }

    pub fn container(&self) -> NodeId {
        self.scrollbar.scroll_container()
    }

    pub fn thumb_node(&self) -> NodeId {
        self.scrollbar.overlay().expect("overlay rendered").thumb
    }

    pub fn scroll_top(&self) -> f32 {
        self.scrollbar.scroll_top(&self.doc)
    }

    pub fn advance_to(&mut self, now: Duration) {
        self.now = now;
        self.scrollbar.tick(&mut self.doc, now);
    }

    pub fn advance(&mut self, by: Duration) {
        let now = self.now + by;
        self.advance_to(now);
    }

    /// Dispatch at the harness clock, then deliver the scroll notifications it caused
    pub fn send(&mut self, mut event: DomEvent) -> DomEvent {
        event.timestamp = self.now;
        self.scrollbar.dispatch(&mut self.doc, &mut event);
        self.pump_scrolls();
        event
    }

    /// Deliver queued scroll notifications as scroll events
    pub fn pump_scrolls(&mut self) -> usize {
        let targets = self.doc.take_scroll_events();
        for &target in &targets {
            let mut event = DomEvent::scroll(target, self.now);
            self.scrollbar.dispatch(&mut self.doc, &mut event);
        }
        targets.len()
    }

    /// Host-initiated scroll of the container, as a wheel or script would do it
    pub fn scroll_container_to(&mut self, top: f32) {
        let container = self.container();
        self.doc.set_scroll_top(container, top);
        self.pump_scrolls();
    }
}
