//! Apply the core's window placement and focus requests to the raylib window.
use bevy_ecs::prelude::*;
use log::trace;
use raylib::ffi;
use raylib::prelude::RaylibHandle;

use crate::resources::windowstatus::WindowStatus;

pub fn apply_window_state(mut rl: NonSendMut<RaylibHandle>, mut window: ResMut<WindowStatus>) {
    if window.take_moved() {
        rl.set_window_position(window.position.x, window.position.y);
    }
    if window.take_focus_request() && !rl.is_window_focused() {
        trace!("taking keyboard focus");
        // the undecorated window gets no key events until it is focused
        unsafe {
            ffi::SetWindowFocused();
        }
    }
}
