//! Global stylesheet that hides the native scrollbar
//!
//! Every mounted instance holds one reference to the same sheet in the
//! document's [`StyleRegistry`](overlay_dom::StyleRegistry). The sheet goes
//! in with the first mount and comes out with the last unmount.

use overlay_dom::Document;
use tracing::trace;

pub const STYLE_ID: &str = "overlay-scrollbar-webkit-hide";

pub const STYLESHEET: &str = r#"
.overlay-scrollbar-container::-webkit-scrollbar {
    display: none !important;
    width: 0 !important;
    height: 0 !important;
}
.overlay-scrollbar-container::-webkit-scrollbar-track {
    display: none !important;
}
.overlay-scrollbar-container::-webkit-scrollbar-thumb {
    display: none !important;
}
.overlay-scrollbar-container:focus {
    outline: 2px solid rgba(0, 123, 255, 0.3);
    outline-offset: -2px;
}
.overlay-scrollbar-container:focus-visible {
    outline: 2px solid rgba(0, 123, 255, 0.5);
    outline-offset: -2px;
}
"#;

/// Take a reference on the sheet, inserting it for the first holder
pub fn acquire(doc: &mut Document) {
    let holders = doc.styles_mut().acquire(STYLE_ID, STYLESHEET);
    trace!(holders, "native scrollbar stylesheet acquired");
}

/// Drop a reference. Returns true if this was the last holder.
pub fn release(doc: &mut Document) -> bool {
    doc.styles_mut().release(STYLE_ID)
}
