//! Hover adapter: pointer entering and leaving the window.

use crate::resources::gremlinstate::{Direction, GremlinState};
use crate::resources::inputsettings::InputSettings;
use crate::systems::gremlin::Gremlin;

pub fn on_mouse_enter(g: &mut Gremlin, settings: &InputSettings) {
    g.window.request_focus();
    g.states.set_pointer_over(true);
    g.timers.reset_idle_timer();

    // a sleeping gremlin keeps sleeping
    if g.states.current_state() == GremlinState::Idle {
        g.states
            .transition_to(g.registry, GremlinState::Hover, Direction::None, false);
        let cooldown = settings.hover_sound_cooldown;
        g.states
            .sound_mut()
            .play(g.registry, GremlinState::Hover, cooldown);
    }
}

pub fn on_mouse_leave(g: &mut Gremlin) {
    g.window.focused = false;
    g.states.set_pointer_over(false);
    g.walk.record_mouse_leave();

    match g.states.current_state() {
        GremlinState::Walk => g.states.enter(g.registry, GremlinState::WalkIdle),
        GremlinState::Hover => g.states.enter(g.registry, GremlinState::Idle),
        // WalkIdle settles through its timer
        _ => {}
    }
}
