//! Desktop gremlin entry point.
//!
//! A borderless, always-on-top, transparent window showing an animated
//! character, built with:
//! - **raylib** for the window, sprite drawing and audio
//! - **bevy_ecs** for the per-frame schedule and message passing
//!
//! # Main Loop
//!
//! 1. Load preferences (`config.ini`) and the character bundle; a broken
//!    bundle is fatal.
//! 2. Open a window the size of one frame and preload the sprite sheets.
//! 3. Run the schedule every frame until the outro has finished.
//! 4. Stop the audio thread.

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info};
use raylib::prelude::*;

use deskgremlin::events::input::Point;
use deskgremlin::game::{build_world, core_schedule};
use deskgremlin::resources::audio::{setup_audio, shutdown_audio};
use deskgremlin::resources::charconfig::load_character;
use deskgremlin::resources::preferences::{DEFAULT_CONFIG_PATH, Preferences};
use deskgremlin::resources::statemanager::StateManager;
use deskgremlin::resources::texturestore::TextureStore;
use deskgremlin::resources::windowstatus::WindowStatus;
use deskgremlin::systems::audio::{drain_sound_requests, forward_audio_cmds};
use deskgremlin::systems::input::{handle_gremlin_input, poll_window_input, update_input_messages};
use deskgremlin::systems::render::render_gremlin;
use deskgremlin::systems::time::update_world_time;
use deskgremlin::systems::window::apply_window_state;

/// A desktop gremlin that lives on top of your windows.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Character to load instead of the configured `starting_char`.
    #[arg(long = "char", value_name = "NAME")]
    character: Option<String>,

    /// Preferences file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // --------------- Preferences & character ---------------
    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let mut prefs = match Preferences::load_or_default(&config_path) {
        Ok(prefs) => prefs,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    if let Some(name) = cli.character {
        prefs.starting_char = name;
    }

    let bundle = match load_character(&prefs.assets_dir, &prefs.starting_char) {
        Ok(bundle) => bundle,
        Err(e) => {
            error!("Failed to load character {}: {}", prefs.starting_char, e);
            std::process::exit(1);
        }
    };
    let sheets = bundle.registry.sprite_paths();
    let (frame_width, frame_height) = (bundle.sprite.frame_width, bundle.sprite.frame_height);

    // --------------- Raylib window & assets ---------------
    let (mut rl, thread) = raylib::init()
        .size(frame_width, frame_height)
        .title("deskgremlin")
        .undecorated()
        .transparent()
        .build();
    let topmost = rl.get_window_state().set_window_topmost(true);
    rl.set_window_state(topmost);
    rl.set_target_fps(60);
    // Disable ESC to exit
    rl.set_exit_key(None);

    let mut textures = TextureStore::new();
    if let Err(e) = textures.preload(&mut rl, &thread, &sheets) {
        error!("{}", e);
        std::process::exit(1);
    }
    let start = rl.get_window_position();

    // --------------- ECS world + resources ---------------
    let mut world = build_world(&prefs, bundle, fastrand::Rng::new());
    world.insert_resource(WindowStatus::new(Point::new(start.x as i32, start.y as i32)));
    setup_audio(&mut world, prefs.volume);
    world.insert_non_send_resource(textures);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    let mut update = core_schedule();
    update.add_systems(
        poll_window_input
            .after(update_input_messages)
            .before(handle_gremlin_input),
    );
    update.add_systems(
        (forward_audio_cmds, apply_window_state, render_gremlin)
            .chain()
            .after(drain_sound_requests),
    );

    // --------------- Main loop ---------------
    while !world.resource::<StateManager>().exit_requested() {
        let dt = world.non_send_resource::<RaylibHandle>().get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);
    }

    info!("bye");
    shutdown_audio(&mut world);
}
