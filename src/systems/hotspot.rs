//! Hotspot adapter: right-clicks on the top and side regions.

use crate::events::input::{Point, PointerButton};
use crate::resources::hotspots::HotspotKind;
use crate::resources::inputsettings::InputSettings;
use crate::systems::gremlin::Gremlin;
use crate::systems::mouse::on_mouse_press;

/// Whether a hotspot action may start from the current state.
///
/// Reload-capable characters may also restart a side action while it plays;
/// the state machine's spam gate decides whether the restart is accepted.
fn hotspot_allowed(g: &Gremlin, settings: &InputSettings) -> bool {
    let current = g.states.current_state();
    current.is_idle_family() || (settings.hotspot_allows_actions && current.is_action())
}

/// Handle a press that landed inside `kind`.
///
/// Right-clicks trigger the hotspot's action; left-clicks fall through to the
/// window's grab handling.
pub fn on_hotspot_press(
    g: &mut Gremlin,
    settings: &InputSettings,
    kind: HotspotKind,
    button: PointerButton,
    pos: Point,
) {
    match button {
        PointerButton::Right => {
            if hotspot_allowed(g, settings) {
                g.states.enter(g.registry, kind.target_state());
                g.timers.reset_passive_timers();
            }
        }
        PointerButton::Left => on_mouse_press(g, button, pos),
    }
}
