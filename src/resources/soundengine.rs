//! Sound effect requests with per-sound cooldown.
//!
//! The engine does not touch the audio device. It resolves a state's sound in
//! the [`ResourceRegistry`], applies the cooldown, stamps
//! [`SoundData::last_played`](crate::resources::registry::SoundData) and
//! queues an [`AudioCmd::Play`]. The queue is drained every frame by
//! [`drain_sound_requests`](crate::systems::audio::drain_sound_requests).

use std::time::Duration;

use log::trace;

use crate::events::audio::AudioCmd;
use crate::resources::gremlinstate::GremlinState;
use crate::resources::registry::ResourceRegistry;

#[derive(Debug, Default)]
pub struct SoundEngine {
    /// Time since startup, advanced by the frame loop.
    clock: Duration,
    pending: Vec<AudioCmd>,
}

impl SoundEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_clock(&mut self, dt: Duration) {
        self.clock += dt;
    }

    /// Request the sound bound to `state`.
    ///
    /// States without a sound are skipped silently. With a positive
    /// `cooldown_secs`, a sound started less than that long ago is skipped.
    /// Returns whether playback was requested.
    pub fn play(
        &mut self,
        registry: &mut ResourceRegistry,
        state: GremlinState,
        cooldown_secs: f32,
    ) -> bool {
        let Ok(data) = registry.get_sound_mut(state) else {
            return false;
        };

        if cooldown_secs > 0.0 {
            let cooldown = Duration::try_from_secs_f32(cooldown_secs).unwrap_or(Duration::MAX);
            if let Some(last) = data.last_played {
                if self.clock.saturating_sub(last) < cooldown {
                    trace!("sound for {:?} still cooling down", state);
                    return false;
                }
            }
        }

        data.last_played = Some(self.clock);
        self.pending.push(AudioCmd::Play {
            path: data.sound_path.to_string(),
        });
        true
    }

    /// Requests queued since the last drain, oldest first.
    pub fn drain(&mut self) -> std::vec::Drain<'_, AudioCmd> {
        self.pending.drain(..)
    }

    pub fn pending(&self) -> &[AudioCmd] {
        &self.pending
    }
}
