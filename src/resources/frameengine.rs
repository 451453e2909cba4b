//! Frame advancement and sprite sheet cell selection.
//!
//! [`FrameEngine::advance`] is the only code that moves an animation's
//! playhead. It publishes the cell to draw as a [`FrameView`]; the renderer
//! reads the view and never touches the registry.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::trace;

use crate::resources::gremlinstate::{Direction, GremlinState};
use crate::resources::registry::{ResourceRegistry, SpriteProperties};

/// Source rectangle of one frame inside a sprite sheet, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// What the renderer should show: a cell of a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameView {
    pub sheet: Arc<str>,
    pub rect: FrameRect,
}

#[derive(Resource, Debug, Clone)]
pub struct FrameEngine {
    columns: usize,
    frame_width: i32,
    frame_height: i32,
    view: Option<FrameView>,
    /// How many times the view actually changed.
    redraws: u64,
}

impl FrameEngine {
    pub fn new(sprite: &SpriteProperties) -> Self {
        Self {
            columns: (sprite.sprite_column as usize).max(1),
            frame_width: sprite.frame_width,
            frame_height: sprite.frame_height,
            view: None,
            redraws: 0,
        }
    }

    pub fn view(&self) -> Option<&FrameView> {
        self.view.as_ref()
    }

    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    /// Source rectangle of `frame` in a sheet laid out row by row.
    pub fn frame_rect(&self, frame: usize) -> FrameRect {
        let col = (frame % self.columns) as i32;
        let row = (frame / self.columns) as i32;
        FrameRect {
            x: col * self.frame_width,
            y: row * self.frame_height,
            w: self.frame_width,
            h: self.frame_height,
        }
    }

    /// Show the current frame of `(state, direction)` and step its playhead.
    ///
    /// Returns true when the animation just wrapped back to frame 0. Missing
    /// or empty animations draw nothing and never complete.
    pub fn advance(
        &mut self,
        registry: &mut ResourceRegistry,
        state: GremlinState,
        direction: Direction,
    ) -> bool {
        let Ok(anim) = registry.get_animation_mut(state, direction) else {
            trace!("no animation for {:?} facing {:?}", state, direction);
            return false;
        };
        if anim.frame_count == 0 {
            return false;
        }

        let view = FrameView {
            sheet: anim.sprite_path.clone(),
            rect: self.frame_rect(anim.current_frame),
        };
        if self.view.as_ref() != Some(&view) {
            self.view = Some(view);
            self.redraws += 1;
        }

        anim.current_frame += 1;
        if anim.current_frame >= anim.frame_count {
            anim.current_frame = 0;
            return true;
        }
        false
    }
}
