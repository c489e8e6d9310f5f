//! Overlay Scrollbar Core
//!
//! Platform-agnostic building blocks shared by the document model and the
//! scrollbar widget:
//!
//! - **Events**: event type ids, key codes, modifiers and event payloads
//! - **Timers**: a deadline-ordered timer queue driven by a host clock
//! - **Transitions**: the trait enum state machines implement

pub mod events;
pub mod timer;
pub mod transitions;

pub use events::{event_types, EventData, EventType, KeyCode, Modifiers, PRIMARY_BUTTON};
pub use timer::{Fired, TimerId, TimerQueue, TimerSlot};
pub use transitions::StateTransitions;
