//! Frame clock.
//!
//! The binary feeds raylib's frame time into [`update_world_time`]; tests feed
//! a fixed step so timers fire deterministically.
use bevy_ecs::prelude::*;
use log::debug;

use crate::resources::worldtime::WorldTime;

/// Deltas above this are logged as hitches.
const HITCH_SECS: f32 = 1.0;

/// Store this frame's scaled delta on [`WorldTime`] and count the frame.
///
/// Negative or non-finite deltas count as zero. Long hitches are only logged;
/// the timers cap their own catch-up.
pub fn update_world_time(world: &mut World, dt: f32) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    if dt > HITCH_SECS {
        debug!("frame hitch of {:.2}s", dt);
    }

    let mut time = world.resource_mut::<WorldTime>();
    time.delta = dt * time.time_scale;
    time.elapsed += time.delta;
    time.frame_count += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_delta_is_scaled_and_counted() {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            time_scale: 2.0,
            ..Default::default()
        });
        update_world_time(&mut world, 0.25);
        update_world_time(&mut world, 0.25);

        let time = world.resource::<WorldTime>();
        assert_eq!(time.delta, 0.5);
        assert_eq!(time.elapsed, 1.0);
        assert_eq!(time.frame_count, 2);
        assert_eq!(time.delta_duration(), Duration::from_millis(500));
    }

    #[test]
    fn test_bad_delta_counts_as_zero() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        update_world_time(&mut world, f32::NAN);
        update_world_time(&mut world, -1.0);

        let time = world.resource::<WorldTime>();
        assert_eq!(time.elapsed, 0.0);
        assert_eq!(time.delta_duration(), Duration::ZERO);
    }
}
