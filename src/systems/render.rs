//! Draw the current frame on a transparent background.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::resources::frameengine::FrameEngine;
use crate::resources::texturestore::TextureStore;

pub fn render_gremlin(
    mut rl: NonSendMut<RaylibHandle>,
    thread: NonSend<RaylibThread>,
    frames: Res<FrameEngine>,
    textures: NonSend<TextureStore>,
) {
    let mut d = rl.begin_drawing(&thread);
    d.clear_background(Color::BLANK);

    let Some(view) = frames.view() else {
        return;
    };
    if let Some(texture) = textures.get(&view.sheet) {
        let src = Rectangle {
            x: view.rect.x as f32,
            y: view.rect.y as f32,
            width: view.rect.w as f32,
            height: view.rect.h as f32,
        };
        d.draw_texture_rec(texture, src, Vector2 { x: 0.0, y: 0.0 }, Color::WHITE);
    }
}
