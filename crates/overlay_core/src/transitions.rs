//! State machine transitions
//!
//! Interaction sessions (drags, hover debounces) are small enums that react
//! to event type ids. Keeping the transition table in one `on_event` match
//! makes every legal move visible in a single place.

use crate::events::EventType;
use std::hash::Hash;

/// Trait for enum states that transition on event ids
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + std::fmt::Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;

    /// Apply an event in place. Returns true if the state changed.
    fn apply(&mut self, event: EventType) -> bool {
        match self.on_event(event) {
            Some(next) if next != *self => {
                tracing::trace!(from = ?*self, to = ?next, event, "state transition");
                *self = next;
                true
            }
            _ => false,
        }
    }
}
