//! Animation and sound resource registry.
//!
//! The registry maps every `(state, direction)` pair to its sprite sheet and
//! frame counter, and every state to its optional sound effect. It is filled
//! once by the character loader before the state machine is built; at runtime
//! only [`AnimationData::current_frame`] and [`SoundData::last_played`] change.

use std::sync::Arc;
use std::time::Duration;

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::resources::gremlinstate::{Direction, GremlinState};

/// Sprite sheet geometry shared by every animation of a character.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SpriteProperties {
    /// Master animation ticks per second.
    pub frame_rate: u32,
    /// Number of frame columns per sheet row.
    pub sprite_column: u32,
    /// Width of one frame in pixels.
    pub frame_width: i32,
    /// Height of one frame in pixels.
    pub frame_height: i32,
    /// Character ships LeftAction/RightAction/Reload and uses ammo.
    pub has_reload_animation: bool,
}

impl Default for SpriteProperties {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            sprite_column: 5,
            frame_width: 0,
            frame_height: 0,
            has_reload_animation: false,
        }
    }
}

/// One animation: sheet path, fixed frame count, and the mutable playhead.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationData {
    pub sprite_path: Arc<str>,
    pub frame_count: usize,
    /// Always in `[0, frame_count)`, or 0 for an empty animation.
    pub current_frame: usize,
}

impl AnimationData {
    pub fn new(sprite_path: impl Into<Arc<str>>, frame_count: usize) -> Self {
        Self {
            sprite_path: sprite_path.into(),
            frame_count,
            current_frame: 0,
        }
    }
}

/// One sound effect and when it was last started.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundData {
    pub sound_path: Arc<str>,
    /// Sound-engine clock reading of the last playback, if any.
    pub last_played: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("no animation registered for {state:?} facing {direction:?}")]
    Animation {
        state: GremlinState,
        direction: Direction,
    },
    #[error("no sound registered for {0:?}")]
    Sound(GremlinState),
}

/// Central registry of animations and sounds for the loaded character.
#[derive(Resource, Debug, Default)]
pub struct ResourceRegistry {
    animations: FxHashMap<(GremlinState, Direction), AnimationData>,
    sounds: FxHashMap<GremlinState, SoundData>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_animation(
        &mut self,
        state: GremlinState,
        direction: Direction,
        sprite_path: impl Into<Arc<str>>,
        frame_count: usize,
    ) {
        self.animations
            .insert((state, direction), AnimationData::new(sprite_path, frame_count));
    }

    pub fn register_sound(&mut self, state: GremlinState, sound_path: impl Into<Arc<str>>) {
        self.sounds.insert(
            state,
            SoundData {
                sound_path: sound_path.into(),
                last_played: None,
            },
        );
    }

    pub fn get_animation(
        &self,
        state: GremlinState,
        direction: Direction,
    ) -> Result<&AnimationData, LookupError> {
        self.animations
            .get(&(state, direction))
            .ok_or(LookupError::Animation { state, direction })
    }

    pub fn get_animation_mut(
        &mut self,
        state: GremlinState,
        direction: Direction,
    ) -> Result<&mut AnimationData, LookupError> {
        self.animations
            .get_mut(&(state, direction))
            .ok_or(LookupError::Animation { state, direction })
    }

    pub fn get_sound(&self, state: GremlinState) -> Result<&SoundData, LookupError> {
        self.sounds.get(&state).ok_or(LookupError::Sound(state))
    }

    pub fn get_sound_mut(&mut self, state: GremlinState) -> Result<&mut SoundData, LookupError> {
        self.sounds.get_mut(&state).ok_or(LookupError::Sound(state))
    }

    pub fn has_animation(&self, state: GremlinState, direction: Direction) -> bool {
        self.animations.contains_key(&(state, direction))
    }

    /// Frame count of an animation, 0 when it is not registered.
    pub fn frame_count(&self, state: GremlinState, direction: Direction) -> usize {
        self.get_animation(state, direction)
            .map(|data| data.frame_count)
            .unwrap_or(0)
    }

    /// Playhead of an animation, 0 when it is not registered.
    pub fn current_frame(&self, state: GremlinState, direction: Direction) -> usize {
        self.get_animation(state, direction)
            .map(|data| data.current_frame)
            .unwrap_or(0)
    }

    /// Rewind an animation to its first frame. Unregistered keys are ignored.
    pub fn reset_frame(&mut self, state: GremlinState, direction: Direction) {
        if let Ok(data) = self.get_animation_mut(state, direction) {
            data.current_frame = 0;
        }
    }

    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    pub fn sound_count(&self) -> usize {
        self.sounds.len()
    }

    /// All distinct sprite sheet paths, for preloading textures.
    pub fn sprite_paths(&self) -> Vec<Arc<str>> {
        let mut paths: Vec<Arc<str>> = self
            .animations
            .values()
            .map(|data| data.sprite_path.clone())
            .collect();
        paths.sort();
        paths.dedup();
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_animation_is_lookup_error() {
        let registry = ResourceRegistry::new();
        assert_eq!(
            registry.get_animation(GremlinState::Walk, Direction::Up),
            Err(LookupError::Animation {
                state: GremlinState::Walk,
                direction: Direction::Up
            })
        );
    }

    #[test]
    fn test_missing_sound_is_lookup_error() {
        let registry = ResourceRegistry::new();
        assert_eq!(
            registry.get_sound(GremlinState::Poke),
            Err(LookupError::Sound(GremlinState::Poke))
        );
    }

    #[test]
    fn test_walk_is_keyed_by_direction() {
        let mut registry = ResourceRegistry::new();
        registry.register_animation(GremlinState::Walk, Direction::Left, "walk-left.png", 8);
        assert!(registry.has_animation(GremlinState::Walk, Direction::Left));
        assert!(!registry.has_animation(GremlinState::Walk, Direction::None));
        assert_eq!(registry.frame_count(GremlinState::Walk, Direction::Left), 8);
    }

    #[test]
    fn test_reset_frame_rewinds_playhead() {
        let mut registry = ResourceRegistry::new();
        registry.register_animation(GremlinState::Idle, Direction::None, "idle.png", 4);
        registry
            .get_animation_mut(GremlinState::Idle, Direction::None)
            .unwrap()
            .current_frame = 3;
        registry.reset_frame(GremlinState::Idle, Direction::None);
        assert_eq!(registry.current_frame(GremlinState::Idle, Direction::None), 0);
        // unknown keys are a no-op
        registry.reset_frame(GremlinState::Pat, Direction::None);
    }

    #[test]
    fn test_sprite_paths_are_deduplicated() {
        let mut registry = ResourceRegistry::new();
        registry.register_animation(GremlinState::Idle, Direction::None, "shared.png", 4);
        registry.register_animation(GremlinState::Hover, Direction::None, "shared.png", 4);
        registry.register_animation(GremlinState::Sleep, Direction::None, "sleep.png", 4);
        assert_eq!(registry.sprite_paths().len(), 2);
    }
}
