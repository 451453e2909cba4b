//! Audio playback on a dedicated thread.
//!
//! - [`audio_thread`] owns the raylib audio device and every loaded sound.
//! - [`drain_sound_requests`] moves the requests queued by the
//!   [`SoundEngine`](crate::resources::soundengine::SoundEngine) into
//!   `Messages<AudioCmd>`.
//! - [`forward_audio_cmds`] sends those messages to the audio thread.
//!
//! Only one sound plays at a time: starting a new one stops the previous.

use bevy_ecs::prelude::*;
use crossbeam_channel::Receiver;
use log::{debug, error, info, warn};
use raylib::core::audio::{RaylibAudio, Sound};
use rustc_hash::FxHashMap;

use crate::events::audio::AudioCmd;
use crate::resources::audio::AudioBridge;
use crate::resources::statemanager::StateManager;
use crate::resources::worldtime::WorldTime;

/// Advance the sound engine's clock used for cooldowns.
pub fn advance_sound_clock(time: Res<WorldTime>, mut states: ResMut<StateManager>) {
    states.sound_mut().advance_clock(time.delta_duration());
}

/// Publish the sound requests made by this frame's transitions.
pub fn drain_sound_requests(mut states: ResMut<StateManager>, mut writer: MessageWriter<AudioCmd>) {
    writer.write_batch(states.sound_mut().drain());
}

/// Advance the ECS message queue for AudioCmd.
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Forward ECS AudioCmd messages to the audio thread via the AudioBridge sender.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        // ignore send errors during shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Entry point of the audio thread.
///
/// Sounds are loaded lazily on first play and cached by path. Returns when
/// [`AudioCmd::Shutdown`] arrives or the sender is dropped. Without an audio
/// device the thread drains commands silently.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            error!("audio device unavailable, running muted: {}", e);
            while let Ok(cmd) = rx_cmd.recv() {
                if cmd == AudioCmd::Shutdown {
                    break;
                }
            }
            return;
        }
    };
    info!("audio thread starting (id={:?})", std::thread::current().id());

    let mut sounds: FxHashMap<String, Sound> = FxHashMap::default();
    let mut current: Option<String> = None;

    // blocks until a command arrives; a dropped sender ends the loop
    for cmd in rx_cmd.iter() {
        match cmd {
            AudioCmd::Play { path } => {
                if let Some(previous) = current.take().and_then(|p| sounds.get(&p)) {
                    previous.stop();
                }
                if !sounds.contains_key(&path) {
                    match audio.new_sound(&path) {
                        Ok(sound) => {
                            sounds.insert(path.clone(), sound);
                        }
                        Err(e) => {
                            warn!("cannot load sound {}: {}", path, e);
                            continue;
                        }
                    }
                }
                if let Some(sound) = sounds.get(&path) {
                    debug!("play {}", path);
                    sound.play();
                    current = Some(path);
                }
            }
            AudioCmd::SetVolume { vol } => {
                audio.set_master_volume(vol.clamp(0.0, 1.0));
            }
            AudioCmd::Shutdown => {
                info!("audio shutdown requested");
                break;
            }
        }
    }

    // sounds drop before `audio`
    sounds.clear();
    info!("audio thread exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::gremlinstate::GremlinState;
    use crate::resources::registry::ResourceRegistry;
    use crate::resources::soundengine::SoundEngine;
    use bevy_ecs::system::SystemState;

    #[test]
    fn test_drain_sound_requests_writes_messages() {
        let mut world = World::new();
        world.insert_resource(Messages::<AudioCmd>::default());
        let mut registry = ResourceRegistry::new();
        registry.register_sound(GremlinState::Poke, "poke.wav");
        let mut states = StateManager::new(false, SoundEngine::new());
        states.enter(&mut registry, GremlinState::Poke);
        world.insert_resource(states);

        let mut schedule = Schedule::default();
        schedule.add_systems((update_bevy_audio_cmds, drain_sound_requests).chain());
        schedule.run(&mut world);

        let mut state: SystemState<MessageReader<AudioCmd>> = SystemState::new(&mut world);
        let mut reader = state.get_mut(&mut world);
        let cmds: Vec<AudioCmd> = reader.read().cloned().collect();
        assert_eq!(
            cmds,
            vec![AudioCmd::Play {
                path: "poke.wav".to_string()
            }]
        );
        assert!(world.resource::<StateManager>().sound().pending().is_empty());
    }
}
