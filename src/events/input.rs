//! Decoded window input messages.
//!
//! [`poll_window_input`](crate::systems::input::poll_window_input) translates
//! raylib's per-frame input state into [`GremlinInput`] messages, and
//! [`handle_gremlin_input`](crate::systems::input::handle_gremlin_input)
//! routes them to the keyboard, mouse, hotspot and hover adapters.
//!
//! Keys are reported as uppercase ASCII characters. Only `A`-`Z` and `0`-`9`
//! are forwarded; nothing else is bound to a gremlin action.

use bevy_ecs::message::Message;

/// Integer pixel position. Pointer positions are relative to the window's
/// top-left corner unless noted; window positions are in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Mouse button that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
}

/// One decoded input event.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum GremlinInput {
    KeyPressed {
        key: char,
        /// Produced by the OS key auto-repeat rather than a physical press.
        repeat: bool,
    },
    KeyReleased {
        key: char,
        repeat: bool,
    },
    MousePressed {
        button: PointerButton,
        pos: Point,
    },
    MouseMoved {
        /// Pointer position in screen coordinates.
        screen_pos: Point,
        left_held: bool,
        right_held: bool,
    },
    MouseReleased {
        button: PointerButton,
        pos: Point,
    },
    PointerEntered,
    PointerLeft,
    /// The user asked the window to close.
    CloseRequested,
}
