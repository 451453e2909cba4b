//! Audio command messages.
//!
//! The [`SoundEngine`](crate::resources::soundengine::SoundEngine) queues
//! [`AudioCmd`] values; a system moves them into `Messages<AudioCmd>` and
//! another forwards them to the audio thread.

use bevy_ecs::message::Message;

/// Commands sent *to* the audio thread.
///
/// There is exactly one playback channel: `Play` interrupts whatever sound is
/// still running.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    Play { path: String },
    SetVolume { vol: f32 },
    Shutdown,
}
