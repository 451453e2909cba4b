//! Application preferences.
//!
//! Loaded from an INI file. Missing keys keep their defaults; values that do
//! not parse are reported and ignored.
//!
//! # Configuration File Format
//!
//! ```ini
//! [gremlin]
//! starting_char = Matikanetannhauser
//! assets_dir = .
//! move_speed = 5
//! volume = 0.8
//! emote_key_enabled = true
//! emote_key = P
//! idle_minutes = 5
//! sleep_minutes = 5
//! hover_sound_cooldown = 0
//! ```

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};

const SECTION: &str = "gremlin";

const DEFAULT_STARTING_CHAR: &str = "Matikanetannhauser";
const DEFAULT_MOVE_SPEED: i32 = 5;
const DEFAULT_VOLUME: f32 = 0.8;
const DEFAULT_EMOTE_KEY: &str = "P";
const DEFAULT_IDLE_MINUTES: u32 = 5;
const DEFAULT_SLEEP_MINUTES: u32 = 5;
pub const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Preferences {
    /// Character folder name under `spritesheet/` and `sounds/`.
    pub starting_char: String,
    /// Root holding the `spritesheet/` and `sounds/` folders.
    pub assets_dir: PathBuf,
    /// Pixels per master tick while walking.
    pub move_speed: i32,
    /// Master volume in `[0, 1]`.
    pub volume: f32,
    pub emote_key_enabled: bool,
    /// Raw emote key, validated by
    /// [`resolve_emote_key`](crate::resources::inputsettings::resolve_emote_key).
    pub emote_key: String,
    pub idle_minutes: u32,
    pub sleep_minutes: u32,
    /// Seconds before the hover sound may play again.
    pub hover_sound_cooldown: f32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            starting_char: DEFAULT_STARTING_CHAR.to_string(),
            assets_dir: PathBuf::from("."),
            move_speed: DEFAULT_MOVE_SPEED,
            volume: DEFAULT_VOLUME,
            emote_key_enabled: true,
            emote_key: DEFAULT_EMOTE_KEY.to_string(),
            idle_minutes: DEFAULT_IDLE_MINUTES,
            sleep_minutes: DEFAULT_SLEEP_MINUTES,
            hover_sound_cooldown: 0.0,
        }
    }
}

impl Preferences {
    /// Load preferences from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, String> {
        let mut prefs = Self::default();
        if path.exists() {
            prefs.load_from_file(path)?;
        } else {
            info!("{} not found, using default preferences", path.display());
        }
        Ok(prefs)
    }

    /// Overwrite fields with the values found in the INI file at `path`.
    pub fn load_from_file(&mut self, path: &Path) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|e| format!("Failed to load config file {}: {}", path.display(), e))?;
        self.apply(&config);
        info!("Loaded preferences from {}", path.display());
        Ok(())
    }

    /// Overwrite fields with the values found in INI `text`.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config.read(text.to_string())?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        if let Some(name) = config.get(SECTION, "starting_char") {
            let name = name.trim();
            if name.is_empty() {
                warn!("starting_char is empty, keeping {}", self.starting_char);
            } else {
                self.starting_char = name.to_string();
            }
        }
        if let Some(dir) = config.get(SECTION, "assets_dir") {
            self.assets_dir = PathBuf::from(dir.trim());
        }
        if let Some(speed) = value(config.getint(SECTION, "move_speed"), "move_speed") {
            self.move_speed = speed.clamp(0, i64::from(i32::MAX)) as i32;
        }
        if let Some(volume) = value(config.getfloat(SECTION, "volume"), "volume") {
            self.volume = (volume as f32).clamp(0.0, 1.0);
        }
        if let Some(enabled) = value(config.getbool(SECTION, "emote_key_enabled"), "emote_key_enabled")
        {
            self.emote_key_enabled = enabled;
        }
        if let Some(key) = config.get(SECTION, "emote_key") {
            self.emote_key = key;
        }
        if let Some(minutes) = value(config.getuint(SECTION, "idle_minutes"), "idle_minutes") {
            self.idle_minutes = minutes_at_least_one(minutes, "idle_minutes");
        }
        if let Some(minutes) = value(config.getuint(SECTION, "sleep_minutes"), "sleep_minutes") {
            self.sleep_minutes = minutes_at_least_one(minutes, "sleep_minutes");
        }
        if let Some(cooldown) = value(
            config.getfloat(SECTION, "hover_sound_cooldown"),
            "hover_sound_cooldown",
        ) {
            self.hover_sound_cooldown = (cooldown as f32).max(0.0);
        }

        info!(
            "Preferences: char={}, speed={}, volume={}, emote_key={:?} (enabled={}), idle={}m, sleep={}m",
            self.starting_char,
            self.move_speed,
            self.volume,
            self.emote_key,
            self.emote_key_enabled,
            self.idle_minutes,
            self.sleep_minutes
        );
    }
}

/// Unwrap a configparser lookup, reporting values that failed to parse.
fn value<T>(lookup: Result<Option<T>, String>, key: &str) -> Option<T> {
    match lookup {
        Ok(found) => found,
        Err(e) => {
            warn!("ignoring [{}] {}: {}", SECTION, key, e);
            None
        }
    }
}

fn minutes_at_least_one(minutes: u64, key: &str) -> u32 {
    if minutes == 0 {
        warn!("{} must be at least 1, using 1", key);
        return 1;
    }
    u32::try_from(minutes).unwrap_or(u32::MAX)
}
