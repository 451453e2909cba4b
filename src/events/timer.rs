//! Timer expiration messages.
//!
//! [`tick_gremlin_timers`](crate::systems::timers::tick_gremlin_timers)
//! advances the six countdowns of the
//! [`TimerManager`](crate::resources::timers::TimerManager) and writes one
//! [`TimerFired`] per expiration. The state machine consumes them in
//! [`handle_timer_fired`](crate::systems::timers::handle_timer_fired).

use bevy_ecs::message::Message;

use crate::resources::timers::TimerKind;

/// A timer reached its period.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub kind: TimerKind,
}
