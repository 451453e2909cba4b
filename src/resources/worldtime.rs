use std::time::Duration;

use bevy_ecs::prelude::Resource;

/// Simulation clock, updated once per frame by
/// [`update_world_time`](crate::systems::time::update_world_time).
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Seconds since startup, scaled.
    pub elapsed: f32,
    /// Seconds covered by the current frame, scaled.
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    /// The frame delta as a [`Duration`] for the gremlin clocks.
    pub fn delta_duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.delta).unwrap_or(Duration::ZERO)
    }
}
