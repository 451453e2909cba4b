//! Character bundle loader.
//!
//! A character lives in two folders under the assets root:
//!
//! ```text
//! spritesheet/<char>/sprite-map.json    sheet file per state, geometry, hotspots
//! spritesheet/<char>/frame-count.json   frame count per state
//! spritesheet/<char>/emote-config.json  random emote settings
//! spritesheet/<char>/*.png
//! sounds/<char>/sfx-map.json            sound file per state, all optional
//! sounds/<char>/*.wav
//! ```
//!
//! Walk sheets are keyed by direction (`Up`, `UpLeft`, ...) instead of by
//! state. Folder names are the lowercased character name.
//!
//! Everything is validated here so the state machine never sees a broken
//! registry: a failure is reported as a [`ConfigError`] before any window
//! opens.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::resources::gremlinstate::{Direction, GremlinState};
use crate::resources::hotspots::HotspotSettings;
use crate::resources::registry::{ResourceRegistry, SpriteProperties};

const SPRITESHEET_DIR: &str = "spritesheet";
const SOUNDS_DIR: &str = "sounds";
const SPRITE_MAP: &str = "sprite-map.json";
const FRAME_COUNT: &str = "frame-count.json";
const EMOTE_CONFIG: &str = "emote-config.json";
const SFX_MAP: &str = "sfx-map.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{file} has no entry for {key}")]
    MissingKey { file: PathBuf, key: String },
    #[error("missing required file: {0}")]
    MissingFile(PathBuf),
    #[error("invalid character config: {0}")]
    Invalid(String),
}

/// Random emote settings from `emote-config.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmoteConfig {
    pub annoy_emote: bool,
    pub min_emote_trigger_minutes: i64,
    pub max_emote_trigger_minutes: i64,
    /// Milliseconds.
    pub emote_duration: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SpriteMapFile {
    frame_rate: u32,
    sprite_column: u32,
    frame_width: i32,
    frame_height: i32,
    #[serde(default)]
    has_reload_animation: bool,
    #[serde(flatten)]
    hotspots: HotspotSettings,
    /// Sheet file names keyed by state or walk direction.
    #[serde(flatten)]
    sheets: FxHashMap<String, serde_json::Value>,
}

/// Everything the gremlin needs from one character.
#[derive(Debug)]
pub struct CharacterBundle {
    pub name: String,
    pub sprite: SpriteProperties,
    pub hotspots: HotspotSettings,
    pub emote: EmoteConfig,
    pub registry: ResourceRegistry,
}

/// Load and validate the character `name` from `assets_dir`.
pub fn load_character(assets_dir: &Path, name: &str) -> Result<CharacterBundle, ConfigError> {
    let folder = name.to_lowercase();
    let sheet_dir = assets_dir.join(SPRITESHEET_DIR).join(&folder);
    let sound_dir = assets_dir.join(SOUNDS_DIR).join(&folder);

    let sprite_map: SpriteMapFile = read_json(&sheet_dir.join(SPRITE_MAP))?;
    let frame_counts: FxHashMap<String, usize> = read_json(&sheet_dir.join(FRAME_COUNT))?;
    let emote: EmoteConfig = read_json(&sheet_dir.join(EMOTE_CONFIG))?;

    let sprite = sprite_properties(&sprite_map)?;

    let mut registry = ResourceRegistry::new();
    let sheets = SheetIndex {
        dir: &sheet_dir,
        sprite_map: &sprite_map,
        frame_counts: &frame_counts,
    };
    register_animations(&mut registry, &sheets)?;
    register_sounds(&mut registry, &sound_dir)?;

    info!(
        "Loaded character {}: {} animations, {} sounds, {} fps, {}x{} frames, reload={}",
        name,
        registry.animation_count(),
        registry.sound_count(),
        sprite.frame_rate,
        sprite.frame_width,
        sprite.frame_height,
        sprite.has_reload_animation
    );

    Ok(CharacterBundle {
        name: name.to_string(),
        sprite,
        hotspots: sprite_map.hotspots,
        emote,
        registry,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::MissingFile(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn sprite_properties(map: &SpriteMapFile) -> Result<SpriteProperties, ConfigError> {
    if map.frame_rate == 0 {
        return Err(ConfigError::Invalid("FrameRate must be positive".into()));
    }
    if map.sprite_column == 0 {
        return Err(ConfigError::Invalid("SpriteColumn must be positive".into()));
    }
    if map.frame_width <= 0 || map.frame_height <= 0 {
        return Err(ConfigError::Invalid(format!(
            "frame size {}x{} must be positive",
            map.frame_width, map.frame_height
        )));
    }
    Ok(SpriteProperties {
        frame_rate: map.frame_rate,
        sprite_column: map.sprite_column,
        frame_width: map.frame_width,
        frame_height: map.frame_height,
        has_reload_animation: map.has_reload_animation,
    })
}

struct SheetIndex<'a> {
    dir: &'a Path,
    sprite_map: &'a SpriteMapFile,
    frame_counts: &'a FxHashMap<String, usize>,
}

impl SheetIndex<'_> {
    /// Sheet path and frame count for `key`, `None` when the sheet name is
    /// empty or null.
    fn lookup(&self, key: &str) -> Result<Option<(String, usize)>, ConfigError> {
        let sheet = match self.sprite_map.sheets.get(key) {
            None => {
                return Err(ConfigError::MissingKey {
                    file: self.dir.join(SPRITE_MAP),
                    key: key.to_string(),
                });
            }
            Some(serde_json::Value::Null) => return Ok(None),
            Some(serde_json::Value::String(name)) if name.is_empty() => return Ok(None),
            Some(serde_json::Value::String(name)) => name,
            Some(other) => {
                return Err(ConfigError::Invalid(format!(
                    "sheet for {} must be a file name, found {}",
                    key, other
                )));
            }
        };

        let path = self.dir.join(sheet);
        if !path.is_file() {
            return Err(ConfigError::MissingFile(path));
        }
        let frames = *self
            .frame_counts
            .get(key)
            .ok_or_else(|| ConfigError::MissingKey {
                file: self.dir.join(FRAME_COUNT),
                key: key.to_string(),
            })?;
        Ok(Some((path.to_string_lossy().into_owned(), frames)))
    }
}

fn register_animations(
    registry: &mut ResourceRegistry,
    sheets: &SheetIndex<'_>,
) -> Result<(), ConfigError> {
    let has_reload = sheets.sprite_map.has_reload_animation;

    for state in GremlinState::ALL {
        if state == GremlinState::Walk {
            for direction in Direction::WALKING {
                match sheets.lookup(direction.key())? {
                    Some((path, frames)) => {
                        registry.register_animation(state, direction, path, frames)
                    }
                    None => debug!("no walk sheet for {:?}", direction),
                }
            }
            continue;
        }

        let optional = !has_reload
            && matches!(
                state,
                GremlinState::LeftAction | GremlinState::RightAction | GremlinState::Reload
            );
        match sheets.lookup(state.key()) {
            Ok(Some((path, frames))) => {
                registry.register_animation(state, Direction::None, path, frames)
            }
            Ok(None) => debug!("no sheet for {:?}", state),
            Err(e) if optional => debug!("skipping optional {:?}: {}", state, e),
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn register_sounds(registry: &mut ResourceRegistry, sound_dir: &Path) -> Result<(), ConfigError> {
    let sfx_path = sound_dir.join(SFX_MAP);
    let sfx_map: FxHashMap<String, Option<String>> = match read_json(&sfx_path) {
        Ok(map) => map,
        Err(ConfigError::MissingFile(path)) => {
            warn!("{} not found, character has no sounds", path.display());
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    for state in GremlinState::ALL {
        let Some(Some(name)) = sfx_map.get(state.key()) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        let path = sound_dir.join(name);
        if path.is_file() {
            registry.register_sound(state, path.to_string_lossy().into_owned());
        } else {
            warn!("sound for {:?} not found: {}", state, path.display());
        }
    }
    Ok(())
}
