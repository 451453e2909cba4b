//! ECS resource that bridges the main thread with the background audio thread.
//!
//! Use [`setup_audio`] once during initialization to spawn the audio thread
//! and insert the [`AudioBridge`] resource. Call [`shutdown_audio`] during
//! teardown to stop the thread and free the loaded sounds.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Sender, unbounded};

use crate::events::audio::AudioCmd;
use crate::systems::audio::audio_thread;

/// Shared bridge between the ECS world and the audio thread.
#[derive(Resource)]
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (ECS -> audio thread).
    pub tx_cmd: Sender<AudioCmd>,
    /// Join handle for the background audio thread.
    pub handle: std::thread::JoinHandle<()>,
}

/// Spawn the audio thread, register the bridge and set the master volume.
pub fn setup_audio(world: &mut World, volume: f32) {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();

    let handle = std::thread::spawn(move || audio_thread(rx_cmd));
    let _ = tx_cmd.send(AudioCmd::SetVolume { vol: volume });

    world.insert_resource(AudioBridge { tx_cmd, handle });
    if !world.contains_resource::<Messages<AudioCmd>>() {
        world.insert_resource(Messages::<AudioCmd>::default());
    }
}

/// Request shutdown of the audio thread and join it.
pub fn shutdown_audio(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AudioBridge>() {
        let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}
