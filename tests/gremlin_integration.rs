//! Gremlin integration tests.
//!
//! These drive a complete world through [`core_schedule`], the same systems
//! the binary runs minus raylib. The character ticks at 4 fps and every frame
//! advances time by 0.25 s, so each frame runs exactly one master tick.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;

use deskgremlin::events::audio::AudioCmd;
use deskgremlin::events::input::{GremlinInput, Point, PointerButton};
use deskgremlin::game::{build_world, core_schedule};
use deskgremlin::resources::charconfig::{CharacterBundle, EmoteConfig};
use deskgremlin::resources::gremlinstate::{Direction, GremlinState};
use deskgremlin::resources::hotspots::HotspotSettings;
use deskgremlin::resources::preferences::Preferences;
use deskgremlin::resources::registry::{ResourceRegistry, SpriteProperties};
use deskgremlin::resources::statemanager::StateManager;
use deskgremlin::resources::windowstatus::WindowStatus;
use deskgremlin::systems::time::update_world_time;

const DT: f32 = 0.25;
const INTRO_FRAMES: usize = 4;
const OUTRO_FRAMES: usize = 3;
const ACTION_FRAMES: usize = 8;
/// Frames of 0.25 s in the 2 s walk-idle timeout.
const WALK_IDLE_FRAMES: usize = 8;

fn character(has_reload: bool, outro_frames: usize) -> CharacterBundle {
    let mut registry = ResourceRegistry::new();
    for state in GremlinState::ALL {
        let sheet = format!("{}.png", state.key());
        match state {
            GremlinState::Walk => {
                for direction in Direction::WALKING {
                    registry.register_animation(
                        state,
                        direction,
                        format!("walk-{}.png", direction.key()),
                        4,
                    );
                }
            }
            GremlinState::Intro => {
                registry.register_animation(state, Direction::None, sheet, INTRO_FRAMES)
            }
            GremlinState::Outro => {
                registry.register_animation(state, Direction::None, sheet, outro_frames)
            }
            GremlinState::LeftAction | GremlinState::RightAction => {
                registry.register_animation(state, Direction::None, sheet, ACTION_FRAMES)
            }
            _ => registry.register_animation(state, Direction::None, sheet, 4),
        }
    }
    registry.register_sound(GremlinState::Hover, "hover.wav");
    registry.register_sound(GremlinState::LeftAction, "shoot.wav");

    CharacterBundle {
        name: "Testgremlin".to_string(),
        sprite: SpriteProperties {
            frame_rate: 4,
            sprite_column: 2,
            frame_width: 100,
            frame_height: 120,
            has_reload_animation: has_reload,
        },
        hotspots: HotspotSettings {
            top_hotspot_width: 40,
            top_hotspot_height: 20,
            side_hotspot_width: 30,
            side_hotspot_height: 60,
        },
        emote: EmoteConfig {
            annoy_emote: true,
            min_emote_trigger_minutes: 1,
            max_emote_trigger_minutes: 2,
            emote_duration: 3000,
        },
        registry,
    }
}

fn make_world(has_reload: bool) -> World {
    make_world_with(&Preferences::default(), has_reload)
}

fn make_world_with(prefs: &Preferences, has_reload: bool) -> World {
    build_world(
        prefs,
        character(has_reload, OUTRO_FRAMES),
        fastrand::Rng::with_seed(42),
    )
}

fn send(world: &mut World, input: GremlinInput) {
    let mut state = SystemState::<MessageWriter<GremlinInput>>::new(world);
    let mut writer = state.get_mut(world);
    writer.write(input);
}

fn step(world: &mut World, schedule: &mut Schedule, frames: usize) {
    for _ in 0..frames {
        update_world_time(world, DT);
        schedule.run(world);
    }
}

fn current(world: &World) -> GremlinState {
    world.resource::<StateManager>().current_state()
}

fn audio_cmds(world: &mut World) -> Vec<AudioCmd> {
    let mut state = SystemState::<MessageReader<AudioCmd>>::new(world);
    let mut reader = state.get_mut(world);
    reader.read().cloned().collect()
}

fn finish_intro(world: &mut World, schedule: &mut Schedule) {
    step(world, schedule, INTRO_FRAMES);
    assert_eq!(current(world), GremlinState::Idle);
}

#[test]
fn intro_plays_once_then_idles() {
    let mut world = make_world(false);
    let mut schedule = core_schedule();

    assert_eq!(current(&world), GremlinState::Intro);
    step(&mut world, &mut schedule, INTRO_FRAMES - 1);
    assert_eq!(current(&world), GremlinState::Intro);
    step(&mut world, &mut schedule, 1);
    assert_eq!(current(&world), GremlinState::Idle);
}

#[test]
fn walk_then_walk_idle_then_idle() {
    let mut world = make_world(false);
    let mut schedule = core_schedule();
    finish_intro(&mut world, &mut schedule);

    send(&mut world, GremlinInput::KeyPressed { key: 'W', repeat: false });
    step(&mut world, &mut schedule, 1);
    {
        let states = world.resource::<StateManager>();
        assert_eq!(states.current_state(), GremlinState::Walk);
        assert_eq!(states.current_direction(), Direction::Up);
    }
    // one master tick of walking moved the window up by move_speed
    assert_eq!(world.resource::<WindowStatus>().position, Point::new(0, -5));

    send(&mut world, GremlinInput::KeyReleased { key: 'W', repeat: false });
    step(&mut world, &mut schedule, 1);
    assert_eq!(current(&world), GremlinState::WalkIdle);

    step(&mut world, &mut schedule, WALK_IDLE_FRAMES - 2);
    assert_eq!(current(&world), GremlinState::WalkIdle);
    step(&mut world, &mut schedule, 1);
    assert_eq!(current(&world), GremlinState::Idle);
}

#[test]
fn walk_idle_settles_into_hover_when_pointer_is_over() {
    let mut world = make_world(false);
    let mut schedule = core_schedule();
    finish_intro(&mut world, &mut schedule);

    send(&mut world, GremlinInput::PointerEntered);
    step(&mut world, &mut schedule, 1);
    assert_eq!(current(&world), GremlinState::Hover);

    send(&mut world, GremlinInput::KeyPressed { key: 'd', repeat: false });
    send(&mut world, GremlinInput::KeyPressed { key: 'S', repeat: false });
    step(&mut world, &mut schedule, 1);
    assert_eq!(
        world.resource::<StateManager>().current_direction(),
        Direction::DownRight
    );

    send(&mut world, GremlinInput::KeyReleased { key: 'S', repeat: false });
    step(&mut world, &mut schedule, 1);
    assert_eq!(current(&world), GremlinState::Walk);
    assert_eq!(
        world.resource::<StateManager>().current_direction(),
        Direction::Right
    );

    send(&mut world, GremlinInput::KeyReleased { key: 'D', repeat: false });
    step(&mut world, &mut schedule, WALK_IDLE_FRAMES);
    assert_eq!(current(&world), GremlinState::Hover);
}

#[test]
fn pointer_leave_stops_walking() {
    let mut world = make_world(false);
    let mut schedule = core_schedule();
    finish_intro(&mut world, &mut schedule);

    send(&mut world, GremlinInput::KeyPressed { key: 'A', repeat: false });
    step(&mut world, &mut schedule, 1);
    assert_eq!(current(&world), GremlinState::Walk);

    send(&mut world, GremlinInput::PointerLeft);
    step(&mut world, &mut schedule, 1);
    assert_eq!(current(&world), GremlinState::WalkIdle);
    let before = world.resource::<WindowStatus>().position;
    step(&mut world, &mut schedule, 2);
    assert_eq!(world.resource::<WindowStatus>().position, before);
}

#[test]
fn auto_repeat_keys_are_ignored() {
    let mut world = make_world(false);
    let mut schedule = core_schedule();
    finish_intro(&mut world, &mut schedule);

    send(&mut world, GremlinInput::KeyPressed { key: 'W', repeat: true });
    step(&mut world, &mut schedule, 1);
    assert_eq!(current(&world), GremlinState::Idle);
}

#[test]
fn emote_key_forces_emote_until_duration_ends() {
    let mut world = make_world(false);
    let mut schedule = core_schedule();
    finish_intro(&mut world, &mut schedule);

    send(&mut world, GremlinInput::KeyPressed { key: 'p', repeat: false });
    step(&mut world, &mut schedule, 1);
    assert_eq!(current(&world), GremlinState::Emote);

    // 3 s of emote, the first 0.25 s already elapsed
    step(&mut world, &mut schedule, 10);
    assert_eq!(current(&world), GremlinState::Emote);
    step(&mut world, &mut schedule, 1);
    assert_eq!(current(&world), GremlinState::Idle);
}

#[test]
fn grab_drags_window_and_release_settles() {
    let mut world = make_world(false);
    let mut schedule = core_schedule();
    finish_intro(&mut world, &mut schedule);

    send(
        &mut world,
        GremlinInput::MousePressed {
            button: PointerButton::Left,
            pos: Point::new(50, 60),
        },
    );
    step(&mut world, &mut schedule, 1);
    assert_eq!(current(&world), GremlinState::Grab);

    send(
        &mut world,
        GremlinInput::MouseMoved {
            screen_pos: Point::new(60, 70),
            left_held: true,
            right_held: false,
        },
    );
    step(&mut world, &mut schedule, 1);
    assert_eq!(world.resource::<WindowStatus>().position, Point::new(10, 10));

    // the target comes from the screen position, not from the last move
    send(
        &mut world,
        GremlinInput::MouseMoved {
            screen_pos: Point::new(80, 75),
            left_held: true,
            right_held: false,
        },
    );
    send(
        &mut world,
        GremlinInput::MouseMoved {
            screen_pos: Point::new(80, 75),
            left_held: true,
            right_held: false,
        },
    );
    step(&mut world, &mut schedule, 1);
    assert_eq!(world.resource::<WindowStatus>().position, Point::new(30, 15));

    send(
        &mut world,
        GremlinInput::MouseReleased {
            button: PointerButton::Left,
            pos: Point::new(50, 60),
        },
    );
    step(&mut world, &mut schedule, 1);
    assert_eq!(current(&world), GremlinState::Idle);
}

#[test]
fn right_click_outside_hotspots_pokes() {
    let mut world = make_world(false);
    let mut schedule = core_schedule();
    finish_intro(&mut world, &mut schedule);

    send(
        &mut world,
        GremlinInput::MousePressed {
            button: PointerButton::Right,
            pos: Point::new(50, 60),
        },
    );
    step(&mut world, &mut schedule, 1);
    assert_eq!(current(&world), GremlinState::Poke);

    step(&mut world, &mut schedule, 3);
    assert_eq!(current(&world), GremlinState::Idle);
}

#[test]
fn hotspot_right_clicks_pat_and_shoot() {
    let mut world = make_world(true);
    let mut schedule = core_schedule();
    finish_intro(&mut world, &mut schedule);

    send(
        &mut world,
        GremlinInput::MousePressed {
            button: PointerButton::Right,
            pos: Point::new(50, 5),
        },
    );
    step(&mut world, &mut schedule, 1);
    assert_eq!(current(&world), GremlinState::Pat);
    step(&mut world, &mut schedule, 3);
    assert_eq!(current(&world), GremlinState::Idle);

    send(
        &mut world,
        GremlinInput::MousePressed {
            button: PointerButton::Right,
            pos: Point::new(5, 60),
        },
    );
    step(&mut world, &mut schedule, 1);
    assert_eq!(current(&world), GremlinState::LeftAction);
    assert_eq!(world.resource::<StateManager>().ammo(), Some(5));
    assert!(audio_cmds(&mut world).contains(&AudioCmd::Play {
        path: "shoot.wav".to_string()
    }));
}

#[test]
fn hotspot_left_click_grabs() {
    let mut world = make_world(false);
    let mut schedule = core_schedule();
    finish_intro(&mut world, &mut schedule);

    send(
        &mut world,
        GremlinInput::MousePressed {
            button: PointerButton::Left,
            pos: Point::new(95, 60),
        },
    );
    step(&mut world, &mut schedule, 1);
    assert_eq!(current(&world), GremlinState::Grab);
}

#[test]
fn six_shots_then_reload() {
    let mut world = make_world(true);
    let mut schedule = core_schedule();
    finish_intro(&mut world, &mut schedule);

    let shoot = GremlinInput::MousePressed {
        button: PointerButton::Right,
        pos: Point::new(95, 60),
    };
    for _ in 0..6 {
        send(&mut world, shoot);
        // entry frame plus enough ticks to pass the first quarter
        step(&mut world, &mut schedule, 4);
        assert_eq!(current(&world), GremlinState::RightAction);
    }
    assert_eq!(world.resource::<StateManager>().ammo(), Some(0));

    // the empty magazine finishes its animation, then reloads
    step(&mut world, &mut schedule, ACTION_FRAMES - 4);
    assert_eq!(current(&world), GremlinState::Reload);
    assert_eq!(world.resource::<StateManager>().ammo(), Some(6));
}

#[test]
fn hover_sound_plays_on_enter() {
    let mut world = make_world(false);
    let mut schedule = core_schedule();
    finish_intro(&mut world, &mut schedule);

    send(&mut world, GremlinInput::PointerEntered);
    step(&mut world, &mut schedule, 1);
    assert_eq!(
        audio_cmds(&mut world),
        vec![AudioCmd::Play {
            path: "hover.wav".to_string()
        }]
    );
}

#[test]
fn hover_sound_respects_cooldown() {
    let prefs = Preferences {
        hover_sound_cooldown: 3.0,
        ..Default::default()
    };
    let mut world = make_world_with(&prefs, false);
    let mut schedule = core_schedule();
    finish_intro(&mut world, &mut schedule);

    let mut audio = SystemState::<MessageReader<AudioCmd>>::new(&mut world);
    let hover = AudioCmd::Play {
        path: "hover.wav".to_string(),
    };
    let mut hover_plays = |world: &mut World| {
        let mut reader = audio.get_mut(world);
        reader.read().filter(|cmd| **cmd == hover).count()
    };

    // clock at 1.25 s
    send(&mut world, GremlinInput::PointerEntered);
    step(&mut world, &mut schedule, 1);
    assert_eq!(current(&world), GremlinState::Hover);
    assert_eq!(hover_plays(&mut world), 1);

    send(&mut world, GremlinInput::PointerLeft);
    step(&mut world, &mut schedule, 1);
    assert_eq!(current(&world), GremlinState::Idle);

    // 0.5 s later: hover again, but silent
    send(&mut world, GremlinInput::PointerEntered);
    step(&mut world, &mut schedule, 1);
    assert_eq!(current(&world), GremlinState::Hover);
    assert_eq!(hover_plays(&mut world), 0);

    send(&mut world, GremlinInput::PointerLeft);
    step(&mut world, &mut schedule, 1);
    assert_eq!(hover_plays(&mut world), 0);

    // clock at 4.75 s, 3.5 s after the first play
    step(&mut world, &mut schedule, 10);
    send(&mut world, GremlinInput::PointerEntered);
    step(&mut world, &mut schedule, 1);
    assert_eq!(current(&world), GremlinState::Hover);
    assert_eq!(hover_plays(&mut world), 1);
}

#[test]
fn pointer_enter_requests_focus() {
    let mut world = make_world(false);
    let mut schedule = core_schedule();
    finish_intro(&mut world, &mut schedule);
    assert!(!world.resource_mut::<WindowStatus>().take_focus_request());

    send(&mut world, GremlinInput::PointerEntered);
    step(&mut world, &mut schedule, 1);
    let mut window = world.resource_mut::<WindowStatus>();
    assert!(window.focused);
    assert!(window.take_focus_request());
    assert!(!window.take_focus_request());
}

#[test]
fn close_plays_outro_then_exits() {
    let mut world = make_world(false);
    let mut schedule = core_schedule();
    finish_intro(&mut world, &mut schedule);

    send(&mut world, GremlinInput::CloseRequested);
    step(&mut world, &mut schedule, 1);
    assert_eq!(current(&world), GremlinState::Outro);
    assert!(!world.resource::<WindowStatus>().inputs_enabled);

    // inputs are unplugged during the outro
    send(&mut world, GremlinInput::KeyPressed { key: 'W', repeat: false });
    step(&mut world, &mut schedule, OUTRO_FRAMES - 2);
    assert_eq!(current(&world), GremlinState::Outro);
    assert!(!world.resource::<StateManager>().exit_requested());

    step(&mut world, &mut schedule, 1);
    assert!(world.resource::<StateManager>().exit_requested());
}

#[test]
fn close_without_outro_frames_exits_immediately() {
    let mut world = build_world(
        &Preferences::default(),
        character(false, 0),
        fastrand::Rng::with_seed(42),
    );
    let mut schedule = core_schedule();
    finish_intro(&mut world, &mut schedule);

    send(&mut world, GremlinInput::CloseRequested);
    step(&mut world, &mut schedule, 1);
    assert!(world.resource::<StateManager>().exit_requested());
}
