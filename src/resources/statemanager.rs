//! The gremlin's state machine.
//!
//! [`StateManager`] is the only owner of the current state, the walking
//! direction and the ammo counter. Every other part of the crate asks it for a
//! transition; it validates the request, runs the entry effects of the new
//! state and commits.
//!
//! # Transition rules
//!
//! 1. A direction change rewinds the target animation, even when the state
//!    itself does not change. This lets a walk turn mid-stride.
//! 2. Re-entering the current state is ignored unless it is *spammable*: a
//!    shooting action on a reload-capable character, with ammo left, that has
//!    already played more than a quarter of its frames.
//! 3. Entry effects: play the state's sound, spend one round on
//!    `LeftAction`/`RightAction` (never below zero), refill on `Reload`.
//! 4. The new state's animation restarts at frame 0.
//!
//! Accepted state changes are journaled as [`StateChange`] records so the
//! [`TimerManager`](crate::resources::timers::TimerManager) can start and stop
//! the timers tied to state entry and exit.

use bevy_ecs::prelude::Resource;
use log::{debug, info};

use crate::resources::gremlinstate::{Direction, GremlinState};
use crate::resources::registry::ResourceRegistry;
use crate::resources::soundengine::SoundEngine;

/// Rounds in a full magazine.
pub const MAX_AMMO: u8 = 6;

/// An accepted change of state, oldest first in the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub from: GremlinState,
    pub to: GremlinState,
}

#[derive(Resource, Debug)]
pub struct StateManager {
    current_state: GremlinState,
    current_direction: Direction,
    /// `None` for characters without a reload animation (unlimited).
    ammo: Option<u8>,
    /// Whether the pointer is over the window, as last reported by the window.
    pointer_over: bool,
    exit_requested: bool,
    sound: SoundEngine,
    changes: Vec<StateChange>,
}

impl StateManager {
    /// Create the state machine in its initial `Intro` state.
    ///
    /// Call [`StateManager::start`] once the registry is ready to play the
    /// intro's entry effects.
    pub fn new(has_reload: bool, sound: SoundEngine) -> Self {
        Self {
            current_state: GremlinState::Intro,
            current_direction: Direction::None,
            ammo: has_reload.then_some(MAX_AMMO),
            pointer_over: false,
            exit_requested: false,
            sound,
            changes: Vec::new(),
        }
    }

    /// Run the entry effects of the initial state.
    pub fn start(&mut self, registry: &mut ResourceRegistry) {
        let state = self.current_state;
        self.handle_entry_effect(registry, state, true);
        registry.reset_frame(state, self.current_direction);
        info!("gremlin starts in {:?}", state);
    }

    pub fn current_state(&self) -> GremlinState {
        self.current_state
    }

    pub fn current_direction(&self) -> Direction {
        self.current_direction
    }

    pub fn ammo(&self) -> Option<u8> {
        self.ammo
    }

    pub fn has_reload(&self) -> bool {
        self.ammo.is_some()
    }

    pub fn pointer_over(&self) -> bool {
        self.pointer_over
    }

    pub fn set_pointer_over(&mut self, over: bool) {
        self.pointer_over = over;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Ask the process to terminate after the current frame.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn sound(&self) -> &SoundEngine {
        &self.sound
    }

    pub fn sound_mut(&mut self) -> &mut SoundEngine {
        &mut self.sound
    }

    /// Take the journal of accepted state changes.
    pub fn drain_changes(&mut self) -> Vec<StateChange> {
        std::mem::take(&mut self.changes)
    }

    /// Enter `new_state` facing no direction, with its sound.
    pub fn enter(&mut self, registry: &mut ResourceRegistry, new_state: GremlinState) {
        self.transition_to(registry, new_state, Direction::None, true);
    }

    /// Register a state transition.
    pub fn transition_to(
        &mut self,
        registry: &mut ResourceRegistry,
        new_state: GremlinState,
        new_direction: Direction,
        playsound: bool,
    ) {
        // direction has priority over state
        if self.current_direction != new_direction {
            registry.reset_frame(new_state, new_direction);
            self.current_direction = new_direction;
        }

        if self.current_state == new_state && !self.is_spammable(registry, new_state) {
            return;
        }

        self.handle_entry_effect(registry, new_state, playsound);
        registry.reset_frame(new_state, new_direction);

        let from = self.current_state;
        self.current_state = new_state;
        if from != new_state {
            debug!("state {:?} -> {:?} ({:?})", from, new_state, new_direction);
            self.changes.push(StateChange { from, to: new_state });
        } else {
            debug!("state {:?} restarted", new_state);
        }
    }

    /// Settle into `Hover` when the pointer is over the window, else `Idle`.
    ///
    /// Hover only plays its sound when waking from `Idle` or `Sleep`.
    pub fn to_idle_or_hover(&mut self, registry: &mut ResourceRegistry) {
        if self.pointer_over {
            let playsound = matches!(
                self.current_state,
                GremlinState::Idle | GremlinState::Sleep
            );
            self.transition_to(registry, GremlinState::Hover, Direction::None, playsound);
        } else {
            self.enter(registry, GremlinState::Idle);
        }
    }

    /// Choose a successor after a frame-terminated animation played its last
    /// frame.
    pub fn on_completion(&mut self, registry: &mut ResourceRegistry) {
        match self.current_state {
            GremlinState::Intro | GremlinState::Pat | GremlinState::Poke | GremlinState::Reload => {
                self.to_idle_or_hover(registry)
            }
            GremlinState::LeftAction | GremlinState::RightAction => {
                if self.ammo == Some(0) {
                    self.enter(registry, GremlinState::Reload);
                } else {
                    self.to_idle_or_hover(registry);
                }
            }
            GremlinState::Outro => {
                info!("outro finished");
                self.request_exit();
            }
            // timeout-bound states are moved on by their timers, loops loop
            _ => {}
        }
    }

    fn handle_entry_effect(
        &mut self,
        registry: &mut ResourceRegistry,
        new_state: GremlinState,
        playsound: bool,
    ) {
        if playsound {
            self.sound.play(registry, new_state, 0.0);
        }

        match new_state {
            GremlinState::LeftAction | GremlinState::RightAction => {
                if let Some(ammo) = self.ammo.as_mut() {
                    *ammo = ammo.saturating_sub(1);
                }
            }
            GremlinState::Reload => {
                if let Some(ammo) = self.ammo.as_mut() {
                    *ammo = MAX_AMMO;
                }
            }
            _ => {}
        }
    }

    fn is_spammable(&self, registry: &ResourceRegistry, state: GremlinState) -> bool {
        let loaded = state.is_action() && matches!(self.ammo, Some(rounds) if rounds > 0);
        if !loaded {
            return false;
        }

        // past the first quarter of the animation
        match registry.get_animation(state, Direction::None) {
            Ok(data) => data.frame_count / 4 < data.current_frame,
            Err(_) => false,
        }
    }
}
