//! Ghost behavior
//!
//! Two independent pieces: a periodic velocity re-draw driven by the session's
//! hazard timer, and a per-frame toroidal wrap driven by the physics step.

use super::state::{SessionContext, random_hazard_velocity};
use crate::wrap_to_world;

/// Periodic callback: pick a fresh random velocity
///
/// No-op once the session has ended or the ghost has been shot.
pub fn retick_hazard(state: &mut SessionContext) {
    if state.state.is_terminal() || !state.hazard.body.active {
        return;
    }
    let max_speed = state.tuning.hazard_max_speed;
    state.hazard.body.vel = random_hazard_velocity(&mut state.rng, max_speed);
    log::debug!("Hazard retick: vel={:?}", state.hazard.body.vel);
}

/// Reappear on the opposite edge instead of colliding with the world bounds
pub fn wrap_hazard(state: &mut SessionContext) {
    let body = &mut state.hazard.body;
    if !body.active {
        return;
    }
    body.pos = wrap_to_world(body.pos);
}
