//! Static input configuration resolved once at startup.

use bevy_ecs::prelude::Resource;
use log::warn;

use crate::resources::hotspots::Hotspots;

#[derive(Resource, Debug, Clone, Default)]
pub struct InputSettings {
    /// Uppercase `A`-`Z` or `0`-`9`; `None` disables the key trigger.
    pub emote_key: Option<char>,
    pub hotspots: Hotspots,
    /// Seconds before the hover sound may play again.
    pub hover_sound_cooldown: f32,
    /// Side actions may restart themselves (reload-capable characters).
    pub hotspot_allows_actions: bool,
}

/// Validate the configured emote key.
///
/// The key must be a single ASCII letter or digit after trimming; letters are
/// matched case-insensitively. Anything else disables the key trigger.
pub fn resolve_emote_key(enabled: bool, raw: &str) -> Option<char> {
    if !enabled {
        return None;
    }

    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() => Some(c.to_ascii_uppercase()),
        _ => {
            warn!("emote key {:?} not allowed (allowed: A-Z, 0-9); key trigger disabled", raw);
            None
        }
    }
}
