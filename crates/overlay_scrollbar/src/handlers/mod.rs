//! Interaction handlers
//!
//! Five input sources that move the scroll offset. Each one resolves the
//! scroll target through the shared [`ScrollbarCore`](crate::engine::ScrollbarCore),
//! writes a clamped offset, refreshes geometry and drives visibility. A
//! handler that finds no target does nothing.

mod arrows;
mod drag_scroll;
mod keyboard;
mod thumb_drag;
mod track_click;

pub use arrows::{arrow_step, ArrowDirection};
pub use drag_scroll::{DragScroll, DragScrollState, DRAG_THRESHOLD};
pub use keyboard::{key_down, key_offset, LINE_SCROLL_STEP};
pub use thumb_drag::{ThumbDrag, ThumbDragState};
pub use track_click::track_click;
