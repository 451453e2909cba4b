//! Keyboard adapter: walking and the manual emote key.

use crate::resources::gremlinstate::GremlinState;
use crate::resources::inputsettings::InputSettings;
use crate::systems::gremlin::Gremlin;

/// Handle a key going down.
///
/// Walk keys start or redirect a walk from the idle family. The emote key
/// forces an emote from the idle family. Auto-repeat is ignored.
pub fn on_key_press(g: &mut Gremlin, settings: &InputSettings, key: char, repeat: bool) {
    if repeat {
        return;
    }

    g.walk.record_key_press(key);
    if g.walk.is_moving() && g.states.current_state().can_walk_from() {
        let direction = g.walk.get_direction();
        g.states
            .transition_to(g.registry, GremlinState::Walk, direction, true);
        g.timers.reset_passive_timers();
    }

    let is_emote_key = settings
        .emote_key
        .is_some_and(|emote| emote == key.to_ascii_uppercase());
    if is_emote_key && g.states.current_state().is_idle_family() {
        g.states.enter(g.registry, GremlinState::Emote);
        g.timers.reset_emote_duration_timer();
        g.timers.reset_passive_timers();
    }
}

/// Handle a key going up: turn while other walk keys are held, otherwise
/// stop and stand in `WalkIdle`.
pub fn on_key_release(g: &mut Gremlin, key: char, repeat: bool) {
    if repeat {
        return;
    }

    g.walk.record_key_release(key);
    if g.states.current_state() != GremlinState::Walk {
        return;
    }
    if g.walk.is_moving() {
        let direction = g.walk.get_direction();
        g.states
            .transition_to(g.registry, GremlinState::Walk, direction, true);
    } else {
        g.states.enter(g.registry, GremlinState::WalkIdle);
    }
}
