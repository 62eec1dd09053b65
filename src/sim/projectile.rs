//! Bullet spawning and the legacy last-pair velocity correction
//!
//! Bullets are fired in pairs from the player's position and fly horizontally.
//! Nothing removes them by default; the pool only grows.

use glam::Vec2;

use super::body::KinematicBody;
use super::state::{Bullet, SessionContext};
use super::tick::FrameInput;
use crate::consts::*;

/// Legacy behavior: the most recently fired pair gets its horizontal velocity
/// (re)assigned after the spawn step, every frame, until a newer pair replaces it.
///
/// Pairs fired without the secondary button rely on this for their velocity.
/// Older pairs are never touched again.
#[derive(Debug, Clone, Default)]
pub struct LegacyPairCorrection {
    last_pair: Option<(u32, u32)>,
}

impl LegacyPairCorrection {
    pub fn remember(&mut self, left_id: u32, right_id: u32) {
        self.last_pair = Some((left_id, right_id));
    }

    pub fn last_pair(&self) -> Option<(u32, u32)> {
        self.last_pair
    }

    /// Apply -speed / +speed to the remembered pair if its bullets are still active
    pub fn apply(&self, bullets: &mut [Bullet], speed: f32) {
        let Some((left_id, right_id)) = self.last_pair else {
            return;
        };
        for bullet in bullets.iter_mut().filter(|b| b.body.active) {
            if bullet.id == left_id {
                bullet.body.vel.x = -speed;
            } else if bullet.id == right_id {
                bullet.body.vel.x = speed;
            }
        }
    }
}

/// Spawn a pair at the player when the primary pointer is held, then run the
/// last-pair correction
pub fn fire_bullets(state: &mut SessionContext, input: &FrameInput) {
    let speed = state.tuning.bullet_speed;

    if input.primary {
        let origin = state.player.body.pos;
        let left_id = state.next_entity_id();
        let right_id = state.next_entity_id();

        let mut left = KinematicBody::new(origin, BULLET_SIZE).without_gravity();
        let mut right = KinematicBody::new(origin, BULLET_SIZE).without_gravity();
        if input.secondary {
            left.vel.x = -speed;
            right.vel.x = speed;
        }

        state.bullets.push(Bullet {
            id: left_id,
            body: left,
        });
        state.bullets.push(Bullet {
            id: right_id,
            body: right,
        });
        state.legacy_pair.remember(left_id, right_id);
        log::trace!("Fired bullet pair {}/{} at {:?}", left_id, right_id, origin);
    }

    state.legacy_pair.apply(&mut state.bullets, speed);
}

/// Drop bullets that left the world (only when the tuning opts in)
pub fn cull_offscreen_bullets(state: &mut SessionContext) {
    if !state.tuning.cull_offscreen_bullets {
        return;
    }
    let min = Vec2::splat(-BULLET_CULL_MARGIN);
    let max = Vec2::new(
        WORLD_WIDTH + BULLET_CULL_MARGIN,
        WORLD_HEIGHT + BULLET_CULL_MARGIN,
    );
    let before = state.bullets.len();
    state.bullets.retain(|b| {
        let aabb = b.body.aabb();
        b.body.active
            && aabb.max.x >= min.x
            && aabb.min.x <= max.x
            && aabb.max.y >= min.y
            && aabb.min.y <= max.y
    });
    let culled = before - state.bullets.len();
    if culled > 0 {
        log::trace!("Culled {} bullets", culled);
    }
}
