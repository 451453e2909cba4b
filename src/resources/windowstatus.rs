//! Window placement and input focus as the core sees them.
//!
//! The core only records where the window should be and when it wants the
//! keyboard; the raylib side applies both in
//! [`apply_window_state`](crate::systems::window::apply_window_state).

use bevy_ecs::prelude::Resource;

use crate::events::input::Point;

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct WindowStatus {
    /// Top-left corner in screen coordinates.
    pub position: Point,
    pub focused: bool,
    /// Pointer position inside the window when a grab started.
    pub drag_offset: Point,
    /// Cleared during the outro; only a close request is honored then.
    pub inputs_enabled: bool,
    moved: bool,
    focus_requested: bool,
}

impl Default for WindowStatus {
    fn default() -> Self {
        Self {
            position: Point::default(),
            focused: false,
            drag_offset: Point::default(),
            inputs_enabled: true,
            moved: false,
            focus_requested: false,
        }
    }
}

impl WindowStatus {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        if dx == 0 && dy == 0 {
            return;
        }
        self.position.x += dx;
        self.position.y += dy;
        self.moved = true;
    }

    pub fn move_to(&mut self, position: Point) {
        if self.position != position {
            self.position = position;
            self.moved = true;
        }
    }

    /// Whether the position changed since the last call.
    pub fn take_moved(&mut self) -> bool {
        std::mem::take(&mut self.moved)
    }

    /// Ask for keyboard focus on the next frame.
    pub fn request_focus(&mut self) {
        self.focused = true;
        self.focus_requested = true;
    }

    /// Whether focus was requested since the last call.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }
}
