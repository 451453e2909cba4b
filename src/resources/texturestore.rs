//! Sprite sheet textures, loaded once per path.
use std::sync::Arc;

use raylib::prelude::{RaylibHandle, RaylibThread, Texture2D};
use rustc_hash::FxHashMap;

/// Non-send store: textures belong to the thread that owns the GL context.
#[derive(Default)]
pub struct TextureStore {
    map: FxHashMap<Arc<str>, Texture2D>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every sheet in `paths` that is not cached yet.
    pub fn preload(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        paths: &[Arc<str>],
    ) -> Result<(), String> {
        for path in paths {
            if self.map.contains_key(path) {
                continue;
            }
            let texture = rl
                .load_texture(thread, path)
                .map_err(|e| format!("Failed to load sprite sheet {}: {}", path, e))?;
            self.map.insert(path.clone(), texture);
        }
        log::info!("Loaded {} sprite sheets", self.map.len());
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&Texture2D> {
        self.map.get(path)
    }
}
