//! Master animation tick.

use crate::resources::frameengine::FrameEngine;
use crate::resources::gremlinstate::GremlinState;
use crate::systems::gremlin::Gremlin;

/// Advance the active animation by one frame.
///
/// A frame-bound animation that just wrapped completes its state. While
/// walking, the window also moves by the walk velocity.
pub fn animation_tick(g: &mut Gremlin, frames: &mut FrameEngine) {
    let state = g.states.current_state();
    let direction = g.states.current_direction();

    let wrapped = frames.advance(g.registry, state, direction);
    if wrapped && state.ends_by_frame() {
        g.states.on_completion(g.registry);
    }

    if state == GremlinState::Walk {
        let (dx, dy) = g.walk.get_velocity();
        g.window.move_by(dx, dy);
    }
}
