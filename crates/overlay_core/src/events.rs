//! Input event vocabulary
//!
//! Event ids and payloads the host feeds into widgets. Targets are attached
//! by the document layer, so nothing here knows about nodes.

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    /// Pointer moved past the drag threshold while pressed
    pub const DRAG: EventType = 6;
    /// Press and release on the same element
    pub const CLICK: EventType = 8;
    pub const KEY_DOWN: EventType = 20;
    /// Scroll offset of an element changed
    pub const SCROLL: EventType = 30;
    /// Mouse wheel / trackpad delta, delivered before any resulting scroll
    pub const WHEEL: EventType = 33;

    // Window lifecycle events
    pub const WINDOW_FOCUS: EventType = 50;
    pub const WINDOW_BLUR: EventType = 51;
    /// Page or window became hidden (tab switch, minimize)
    pub const VISIBILITY_HIDDEN: EventType = 52;
}

/// Button index of the primary (usually left) pointer button
pub const PRIMARY_BUTTON: u8 = 0;

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
        button: u8,
    },
    Key {
        /// Virtual key code (use KeyCode constants)
        key: KeyCode,
        /// Keyboard modifier flags
        modifiers: Modifiers,
        /// Whether this is a repeat event
        repeat: bool,
    },
    Wheel {
        delta_x: f32,
        delta_y: f32,
    },
    None,
}

impl EventData {
    /// Pointer position, if this is a pointer payload
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            EventData::Pointer { x, y, .. } => Some((*x, *y)),
            _ => None,
        }
    }

    /// Pointer button, if this is a pointer payload
    pub fn button(&self) -> Option<u8> {
        match self {
            EventData::Pointer { button, .. } => Some(*button),
            _ => None,
        }
    }

    /// Key code, if this is a key payload
    pub fn key(&self) -> Option<KeyCode> {
        match self {
            EventData::Key { key, .. } => Some(*key),
            _ => None,
        }
    }
}

/// Virtual key codes (platform-agnostic)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const SPACE: KeyCode = KeyCode(0x20);

    // Navigation keys
    pub const PAGE_UP: KeyCode = KeyCode(0x21);
    pub const PAGE_DOWN: KeyCode = KeyCode(0x22);
    pub const END: KeyCode = KeyCode(0x23);
    pub const HOME: KeyCode = KeyCode(0x24);
    pub const LEFT: KeyCode = KeyCode(0x25);
    pub const UP: KeyCode = KeyCode(0x26);
    pub const RIGHT: KeyCode = KeyCode(0x27);
    pub const DOWN: KeyCode = KeyCode(0x28);

    pub const A: KeyCode = KeyCode(0x41);

    /// Whether this key moves a scroll position when a scroll surface has focus
    pub fn is_navigation(&self) -> bool {
        matches!(
            *self,
            KeyCode::PAGE_UP
                | KeyCode::PAGE_DOWN
                | KeyCode::END
                | KeyCode::HOME
                | KeyCode::LEFT
                | KeyCode::UP
                | KeyCode::RIGHT
                | KeyCode::DOWN
        )
    }
}

/// Keyboard modifier flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    const SHIFT: u8 = 0b0001;
    const CTRL: u8 = 0b0010;
    const ALT: u8 = 0b0100;
    const META: u8 = 0b1000;

    pub fn none() -> Self {
        Self { bits: 0 }
    }

    pub fn new(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0;
        if shift {
            bits |= Self::SHIFT;
        }
        if ctrl {
            bits |= Self::CTRL;
        }
        if alt {
            bits |= Self::ALT;
        }
        if meta {
            bits |= Self::META;
        }
        Self { bits }
    }

    pub fn shift(&self) -> bool {
        self.bits & Self::SHIFT != 0
    }

    pub fn ctrl(&self) -> bool {
        self.bits & Self::CTRL != 0
    }

    pub fn alt(&self) -> bool {
        self.bits & Self::ALT != 0
    }

    pub fn meta(&self) -> bool {
        self.bits & Self::META != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}
