//! Input controller and demo autopilot
//!
//! The controller only writes the player's velocity and animation intent.

use super::state::{PlayerAnim, SessionContext};
use super::tick::FrameInput;

/// Translate the sampled digital input into player velocity/animation
pub fn apply_input(state: &mut SessionContext, input: &FrameInput) {
    let speed = state.tuning.player_speed;
    let player = &mut state.player;

    match (input.left, input.right) {
        (true, false) => {
            player.body.vel.x = -speed;
            player.anim = PlayerAnim::Left;
        }
        (false, true) => {
            player.body.vel.x = speed;
            player.anim = PlayerAnim::Right;
        }
        _ => {
            player.body.vel.x = 0.0;
            player.anim = PlayerAnim::Idle;
        }
    }

    // Grounded flag comes from the previous physics step: no double jump
    if input.up && player.touching_ground {
        player.body.vel.y = -state.tuning.jump_speed;
    }
}

/// Horizontal distance within which the autopilot stops steering
const ARRIVE_DISTANCE: f32 = 6.0;
/// Target must be at least this far above the player before jumping
const JUMP_HEIGHT: f32 = 40.0;
/// Vertical window in which the hazard is considered level with the player
const FIRE_WINDOW: f32 = 24.0;

/// Idle/demo mode: head for the nearest collectible, shoot the ghost when level
pub fn autopilot(state: &SessionContext) -> FrameInput {
    let mut input = FrameInput::default();
    let player = &state.player.body;

    let target = state
        .collectibles
        .iter()
        .filter(|c| c.body.active)
        .min_by(|a, b| {
            let da = a.body.pos.distance_squared(player.pos);
            let db = b.body.pos.distance_squared(player.pos);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(target) = target {
        let dx = target.body.pos.x - player.pos.x;
        if dx < -ARRIVE_DISTANCE {
            input.left = true;
        } else if dx > ARRIVE_DISTANCE {
            input.right = true;
        }
        input.up = player.pos.y - target.body.pos.y > JUMP_HEIGHT;
    }

    let hazard = &state.hazard.body;
    if hazard.active && (hazard.pos.y - player.pos.y).abs() < FIRE_WINDOW {
        input.primary = true;
        input.secondary = true;
    }

    input
}
