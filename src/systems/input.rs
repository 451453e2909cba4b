//! Input systems.
//!
//! - [`poll_window_input`] reads raylib's input state each frame and writes
//!   [`GremlinInput`] messages.
//! - [`handle_gremlin_input`] routes each message to the keyboard, mouse,
//!   hotspot or hover adapter, then lets the timers follow the resulting
//!   state changes.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::events::input::{GremlinInput, Point, PointerButton};
use crate::game::begin_outro;
use crate::resources::inputsettings::InputSettings;
use crate::systems::gremlin::{Gremlin, GremlinParams};
use crate::systems::{hotspot, hover, keyboard, mouse};

/// Keys forwarded to the adapters.
const KEY_TABLE: [(KeyboardKey, char); 36] = [
    (KeyboardKey::KEY_A, 'A'),
    (KeyboardKey::KEY_B, 'B'),
    (KeyboardKey::KEY_C, 'C'),
    (KeyboardKey::KEY_D, 'D'),
    (KeyboardKey::KEY_E, 'E'),
    (KeyboardKey::KEY_F, 'F'),
    (KeyboardKey::KEY_G, 'G'),
    (KeyboardKey::KEY_H, 'H'),
    (KeyboardKey::KEY_I, 'I'),
    (KeyboardKey::KEY_J, 'J'),
    (KeyboardKey::KEY_K, 'K'),
    (KeyboardKey::KEY_L, 'L'),
    (KeyboardKey::KEY_M, 'M'),
    (KeyboardKey::KEY_N, 'N'),
    (KeyboardKey::KEY_O, 'O'),
    (KeyboardKey::KEY_P, 'P'),
    (KeyboardKey::KEY_Q, 'Q'),
    (KeyboardKey::KEY_R, 'R'),
    (KeyboardKey::KEY_S, 'S'),
    (KeyboardKey::KEY_T, 'T'),
    (KeyboardKey::KEY_U, 'U'),
    (KeyboardKey::KEY_V, 'V'),
    (KeyboardKey::KEY_W, 'W'),
    (KeyboardKey::KEY_X, 'X'),
    (KeyboardKey::KEY_Y, 'Y'),
    (KeyboardKey::KEY_Z, 'Z'),
    (KeyboardKey::KEY_ZERO, '0'),
    (KeyboardKey::KEY_ONE, '1'),
    (KeyboardKey::KEY_TWO, '2'),
    (KeyboardKey::KEY_THREE, '3'),
    (KeyboardKey::KEY_FOUR, '4'),
    (KeyboardKey::KEY_FIVE, '5'),
    (KeyboardKey::KEY_SIX, '6'),
    (KeyboardKey::KEY_SEVEN, '7'),
    (KeyboardKey::KEY_EIGHT, '8'),
    (KeyboardKey::KEY_NINE, '9'),
];

const MOUSE_BUTTONS: [(MouseButton, PointerButton); 2] = [
    (MouseButton::MOUSE_BUTTON_LEFT, PointerButton::Left),
    (MouseButton::MOUSE_BUTTON_RIGHT, PointerButton::Right),
];

/// Pointer tracking kept between frames by [`poll_window_input`].
#[derive(Default)]
pub struct PointerTracker {
    inside: bool,
    last_screen_pos: Option<Point>,
    close_sent: bool,
}

/// Advance the ECS message queue for [`GremlinInput`].
pub fn update_input_messages(mut msgs: ResMut<Messages<GremlinInput>>) {
    msgs.update();
}

/// Poll raylib for this frame's input and translate it into messages.
///
/// Enter comes first and leave last, so a press in the same frame as an
/// enter sees the pointer inside.
pub fn poll_window_input(
    rl: NonSendMut<RaylibHandle>,
    mut writer: MessageWriter<GremlinInput>,
    mut tracker: Local<PointerTracker>,
) {
    if rl.window_should_close() && !tracker.close_sent {
        tracker.close_sent = true;
        writer.write(GremlinInput::CloseRequested);
    }

    let inside = rl.is_cursor_on_screen();
    if inside && !tracker.inside {
        writer.write(GremlinInput::PointerEntered);
    }

    for (key, ch) in KEY_TABLE {
        if rl.is_key_pressed(key) {
            writer.write(GremlinInput::KeyPressed {
                key: ch,
                repeat: false,
            });
        } else if rl.is_key_pressed_repeat(key) {
            writer.write(GremlinInput::KeyPressed {
                key: ch,
                repeat: true,
            });
        }
        if rl.is_key_released(key) {
            writer.write(GremlinInput::KeyReleased {
                key: ch,
                repeat: false,
            });
        }
    }

    let mouse = rl.get_mouse_position();
    let pos = Point::new(mouse.x as i32, mouse.y as i32);
    for (raw, button) in MOUSE_BUTTONS {
        if rl.is_mouse_button_pressed(raw) {
            writer.write(GremlinInput::MousePressed { button, pos });
        }
    }
    let origin = rl.get_window_position();
    let screen_pos = Point::new(origin.x as i32 + pos.x, origin.y as i32 + pos.y);
    if tracker.last_screen_pos != Some(screen_pos) {
        tracker.last_screen_pos = Some(screen_pos);
        writer.write(GremlinInput::MouseMoved {
            screen_pos,
            left_held: rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT),
            right_held: rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_RIGHT),
        });
    }
    for (raw, button) in MOUSE_BUTTONS {
        if rl.is_mouse_button_released(raw) {
            writer.write(GremlinInput::MouseReleased { button, pos });
        }
    }

    if !inside && tracker.inside {
        writer.write(GremlinInput::PointerLeft);
    }
    tracker.inside = inside;
}

pub fn handle_gremlin_input(
    mut reader: MessageReader<GremlinInput>,
    mut params: GremlinParams,
    settings: Res<InputSettings>,
) {
    let mut g = params.gremlin();
    for input in reader.read() {
        dispatch_input(&mut g, &settings, *input);
        g.follow_state_changes();
    }
}

/// Route one input to its adapter.
///
/// During the outro only a close request is honored.
pub fn dispatch_input(g: &mut Gremlin, settings: &InputSettings, input: GremlinInput) {
    if !g.window.inputs_enabled && input != GremlinInput::CloseRequested {
        return;
    }

    match input {
        GremlinInput::KeyPressed { key, repeat } => {
            keyboard::on_key_press(g, settings, key, repeat)
        }
        GremlinInput::KeyReleased { key, repeat } => keyboard::on_key_release(g, key, repeat),
        GremlinInput::MousePressed { button, pos } => match settings.hotspots.hit(pos) {
            Some(kind) => hotspot::on_hotspot_press(g, settings, kind, button, pos),
            None => mouse::on_mouse_press(g, button, pos),
        },
        GremlinInput::MouseMoved {
            screen_pos,
            left_held,
            right_held,
        } => mouse::on_mouse_move(g, screen_pos, left_held, right_held),
        GremlinInput::MouseReleased { button, .. } => mouse::on_mouse_release(g, button),
        GremlinInput::PointerEntered => hover::on_mouse_enter(g, settings),
        GremlinInput::PointerLeft => hover::on_mouse_leave(g),
        GremlinInput::CloseRequested => begin_outro(g),
    }
}
