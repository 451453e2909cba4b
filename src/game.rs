//! World assembly and the gremlin's frame schedule.
//!
//! [`build_world`] turns the preferences and a loaded character into a ready
//! ECS world: the state machine has played its intro entry effects and the
//! passive timers are running. [`core_schedule`] holds every system that does
//! not touch raylib, so tests can drive a gremlin without a window.
//!
//! # Frame order
//!
//! 1. advance message queues and the sound clock
//! 2. handle input (`handle_gremlin_input`)
//! 3. advance timers and handle their fires, including the master tick
//! 4. publish sound requests
//!
//! The binary adds raylib input polling before step 2 and audio forwarding,
//! window placement and rendering after step 4.

use std::time::Duration;

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use log::info;

use crate::events::audio::AudioCmd;
use crate::events::input::GremlinInput;
use crate::events::timer::TimerFired;
use crate::resources::charconfig::CharacterBundle;
use crate::resources::frameengine::FrameEngine;
use crate::resources::gremlinstate::{Direction, GremlinState};
use crate::resources::hotspots::Hotspots;
use crate::resources::inputsettings::{InputSettings, resolve_emote_key};
use crate::resources::preferences::Preferences;
use crate::resources::soundengine::SoundEngine;
use crate::resources::statemanager::StateManager;
use crate::resources::timers::{TimerManager, TimerSettings};
use crate::resources::walkresolver::WalkResolver;
use crate::resources::windowstatus::WindowStatus;
use crate::resources::worldtime::WorldTime;
use crate::systems::audio::{advance_sound_clock, drain_sound_requests, update_bevy_audio_cmds};
use crate::systems::gremlin::Gremlin;
use crate::systems::input::{handle_gremlin_input, update_input_messages};
use crate::systems::timers::{handle_timer_fired, tick_gremlin_timers, update_timer_messages};

fn minutes(m: u32) -> Duration {
    Duration::from_secs(u64::from(m) * 60)
}

/// Build the timer settings from the preferences and the character's emote
/// config.
pub fn timer_settings(prefs: &Preferences, bundle: &CharacterBundle) -> TimerSettings {
    TimerSettings {
        frame_rate: bundle.sprite.frame_rate,
        idle: minutes(prefs.idle_minutes),
        sleep: minutes(prefs.sleep_minutes),
        emote_min_minutes: bundle.emote.min_emote_trigger_minutes,
        emote_max_minutes: bundle.emote.max_emote_trigger_minutes,
        emote_duration: Duration::from_millis(bundle.emote.emote_duration),
        annoy_emote: bundle.emote.annoy_emote,
    }
}

/// Assemble a world for `bundle` and start the gremlin.
///
/// `rng` drives the random emote schedule; tests pass a seeded one.
pub fn build_world(prefs: &Preferences, bundle: CharacterBundle, rng: fastrand::Rng) -> World {
    let settings = timer_settings(prefs, &bundle);
    let CharacterBundle {
        name,
        sprite,
        hotspots,
        mut registry,
        ..
    } = bundle;

    let mut states = StateManager::new(sprite.has_reload_animation, SoundEngine::new());
    states.start(&mut registry);

    let mut timers = TimerManager::new(settings, rng);
    timers.start_passive_timers();

    let input = InputSettings {
        emote_key: resolve_emote_key(prefs.emote_key_enabled, &prefs.emote_key),
        hotspots: Hotspots::layout(&hotspots, sprite.frame_width, sprite.frame_height),
        hover_sound_cooldown: prefs.hover_sound_cooldown,
        hotspot_allows_actions: sprite.has_reload_animation,
    };

    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(FrameEngine::new(&sprite));
    world.insert_resource(WalkResolver::new(prefs.move_speed));
    world.insert_resource(WindowStatus::default());
    world.insert_resource(input);
    world.insert_resource(states);
    world.insert_resource(timers);
    world.insert_resource(registry);
    world.insert_resource(sprite);
    world.insert_resource(prefs.clone());
    world.insert_resource(Messages::<GremlinInput>::default());
    world.insert_resource(Messages::<TimerFired>::default());
    world.insert_resource(Messages::<AudioCmd>::default());

    info!("{} is awake", name);
    world
}

/// Every per-frame system that runs without a window, in order.
pub fn core_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems(
        (
            update_input_messages,
            update_timer_messages,
            update_bevy_audio_cmds,
            advance_sound_clock,
            handle_gremlin_input,
            tick_gremlin_timers,
            handle_timer_fired,
            drain_sound_requests,
        )
            .chain(),
    );
    schedule
}

/// Play the outro and stop listening to input.
///
/// The process exits once the outro completes, or right away when the
/// character has no outro frames. Repeated close requests are ignored.
pub fn begin_outro(g: &mut Gremlin) {
    if !g.window.inputs_enabled {
        return;
    }
    info!("close requested, playing outro");

    g.window.inputs_enabled = false;
    g.walk.record_mouse_leave();
    g.timers.stop_all();
    g.states.enter(g.registry, GremlinState::Outro);

    if g.registry.frame_count(GremlinState::Outro, Direction::None) == 0 {
        g.states.request_exit();
    }
}
