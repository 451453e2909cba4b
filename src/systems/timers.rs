//! Timer systems.
//!
//! - [`tick_gremlin_timers`] advances the countdowns by the frame delta and
//!   writes a [`TimerFired`] per expiration.
//! - [`handle_timer_fired`] runs the master animation tick or the matching
//!   [`TimerManager`](crate::resources::timers::TimerManager) handler.
use bevy_ecs::prelude::*;

use crate::events::timer::TimerFired;
use crate::resources::frameengine::FrameEngine;
use crate::resources::timers::{TimerKind, TimerManager};
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation_tick;
use crate::systems::gremlin::GremlinParams;

/// Advance the ECS message queue for [`TimerFired`].
pub fn update_timer_messages(mut msgs: ResMut<Messages<TimerFired>>) {
    msgs.update();
}

pub fn tick_gremlin_timers(
    time: Res<WorldTime>,
    mut timers: ResMut<TimerManager>,
    mut writer: MessageWriter<TimerFired>,
) {
    let fired = timers.advance(time.delta_duration());
    writer.write_batch(fired.into_iter().map(|kind| TimerFired { kind }));
}

pub fn handle_timer_fired(
    mut reader: MessageReader<TimerFired>,
    mut params: GremlinParams,
    mut frames: ResMut<FrameEngine>,
) {
    let mut g = params.gremlin();
    for fired in reader.read() {
        if g.states.exit_requested() {
            break;
        }
        match fired.kind {
            TimerKind::Master => animation_tick(&mut g, &mut frames),
            kind => g.timers.on_fired(kind, g.states, g.registry),
        }
        g.follow_state_changes();
    }
}
