//! Mouse adapter: grab, drag, release and poke.

use crate::events::input::{Point, PointerButton};
use crate::resources::gremlinstate::GremlinState;
use crate::systems::gremlin::Gremlin;

pub fn on_mouse_press(g: &mut Gremlin, button: PointerButton, pos: Point) {
    if !g.states.current_state().is_idle_family() {
        return;
    }

    match button {
        PointerButton::Left => {
            g.timers.reset_passive_timers();
            g.states.enter(g.registry, GremlinState::Grab);
            g.window.drag_offset = pos;
        }
        PointerButton::Right => {
            g.timers.reset_passive_timers();
            g.states.enter(g.registry, GremlinState::Poke);
        }
    }
}

/// Drag the window while grabbed with only the left button held.
///
/// The window's top-left corner goes to the pointer's screen position minus
/// the grab offset, so a window move the OS has not applied yet cannot make
/// the drag overshoot.
pub fn on_mouse_move(g: &mut Gremlin, screen_pos: Point, left_held: bool, right_held: bool) {
    if g.states.current_state() == GremlinState::Grab && left_held && !right_held {
        let offset = g.window.drag_offset;
        g.window
            .move_to(Point::new(screen_pos.x - offset.x, screen_pos.y - offset.y));
    }
}

pub fn on_mouse_release(g: &mut Gremlin, button: PointerButton) {
    if button == PointerButton::Left && g.states.current_state() == GremlinState::Grab {
        g.states.to_idle_or_hover(g.registry);
    }
}
