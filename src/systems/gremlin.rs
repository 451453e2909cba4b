//! Mutable view of the gremlin shared by the input adapters and timer
//! handlers.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;

use crate::resources::registry::ResourceRegistry;
use crate::resources::statemanager::StateManager;
use crate::resources::timers::TimerManager;
use crate::resources::walkresolver::WalkResolver;
use crate::resources::windowstatus::WindowStatus;

/// Borrowed gremlin parts an event handler may touch.
///
/// Handlers take this instead of the ECS types so they can be driven directly
/// in unit tests.
pub struct Gremlin<'a> {
    pub states: &'a mut StateManager,
    pub registry: &'a mut ResourceRegistry,
    pub timers: &'a mut TimerManager,
    pub walk: &'a mut WalkResolver,
    pub window: &'a mut WindowStatus,
}

impl Gremlin<'_> {
    /// Start or stop the timers tied to the states entered and left since the
    /// last call.
    pub fn follow_state_changes(&mut self) {
        self.timers.follow_state_changes(self.states);
    }
}

/// Bundled resources behind a [`Gremlin`].
#[derive(SystemParam)]
pub struct GremlinParams<'w> {
    pub states: ResMut<'w, StateManager>,
    pub registry: ResMut<'w, ResourceRegistry>,
    pub timers: ResMut<'w, TimerManager>,
    pub walk: ResMut<'w, WalkResolver>,
    pub window: ResMut<'w, WindowStatus>,
}

impl GremlinParams<'_> {
    pub fn gremlin(&mut self) -> Gremlin<'_> {
        Gremlin {
            states: &mut self.states,
            registry: &mut self.registry,
            timers: &mut self.timers,
            walk: &mut self.walk,
            window: &mut self.window,
        }
    }
}
