//! Walk key tracking and velocity resolution.
//!
//! Four booleans record which of W/A/S/D are held. Opposing keys cancel: the
//! vertical axis only moves when exactly one of up/down is held, and likewise
//! for left/right.

use bevy_ecs::prelude::Resource;

use crate::resources::gremlinstate::Direction;

#[derive(Resource, Debug, Clone, Default)]
pub struct WalkResolver {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    /// Pixels moved per master tick on each active axis.
    speed: i32,
}

impl WalkResolver {
    pub fn new(speed: i32) -> Self {
        Self {
            speed,
            ..Default::default()
        }
    }

    /// Signed vertical axis: -1 up, +1 down, 0 when neither or both are held.
    fn vertical(&self) -> i32 {
        match (self.up, self.down) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }

    fn horizontal(&self) -> i32 {
        match (self.left, self.right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }

    /// Window displacement for one master tick, `(dx, dy)`.
    pub fn get_velocity(&self) -> (i32, i32) {
        (self.horizontal() * self.speed, self.vertical() * self.speed)
    }

    pub fn is_moving(&self) -> bool {
        (self.up ^ self.down) || (self.left ^ self.right)
    }

    pub fn get_direction(&self) -> Direction {
        Direction::from_axes(self.vertical(), self.horizontal())
    }

    /// Mark a walk key as held. Returns false for keys that are not walk keys.
    pub fn record_key_press(&mut self, key: char) -> bool {
        self.set_key(key, true)
    }

    /// Mark a walk key as released. Returns false for keys that are not walk keys.
    pub fn record_key_release(&mut self, key: char) -> bool {
        self.set_key(key, false)
    }

    /// Drop every held key. The pointer left the window, so key-up events may
    /// never arrive.
    pub fn record_mouse_leave(&mut self) {
        self.up = false;
        self.down = false;
        self.left = false;
        self.right = false;
    }

    fn set_key(&mut self, key: char, held: bool) -> bool {
        let slot = match key.to_ascii_uppercase() {
            'W' => &mut self.up,
            'S' => &mut self.down,
            'A' => &mut self.left,
            'D' => &mut self.right,
            _ => return false,
        };
        *slot = held;
        true
    }
}
