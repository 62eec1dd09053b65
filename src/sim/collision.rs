//! Collision detection and response for axis-aligned boxes
//!
//! Bodies move, platforms don't. The side a body hit is decided from where
//! it was before the step, so a fast fall onto a thin platform still lands
//! on top instead of being pushed out sideways.

use glam::Vec2;

use super::body::{Aabb, KinematicBody};

/// Slack when comparing a previous edge against a surface
const CONTACT_EPSILON: f32 = 0.01;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal at collision (pointing from the solid toward the body)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }

    fn hit(normal: Vec2, penetration: f32) -> Self {
        Self {
            hit: true,
            normal,
            penetration,
        }
    }

    /// Body is resting on top of the solid
    #[inline]
    pub fn is_floor(&self) -> bool {
        self.hit && self.normal.y < 0.0
    }
}

/// Check a moving body against a static box
pub fn body_solid_collision(body: &KinematicBody, solid: &Aabb) -> CollisionResult {
    let current = body.aabb();
    if !current.overlaps(solid) {
        return CollisionResult::miss();
    }

    let prev = body.prev_aabb();
    if prev.max.y <= solid.min.y + CONTACT_EPSILON {
        return CollisionResult::hit(Vec2::NEG_Y, current.max.y - solid.min.y);
    }
    if prev.min.y >= solid.max.y - CONTACT_EPSILON {
        return CollisionResult::hit(Vec2::Y, solid.max.y - current.min.y);
    }
    if prev.max.x <= solid.min.x + CONTACT_EPSILON {
        return CollisionResult::hit(Vec2::NEG_X, current.max.x - solid.min.x);
    }
    if prev.min.x >= solid.max.x - CONTACT_EPSILON {
        return CollisionResult::hit(Vec2::X, solid.max.x - current.min.x);
    }

    // Already overlapping before the step: push out along the shallow axis
    minimum_separation(&current, solid)
}

/// Separation of `a` out of `b` along the axis of least overlap
pub fn minimum_separation(a: &Aabb, b: &Aabb) -> CollisionResult {
    if !a.overlaps(b) {
        return CollisionResult::miss();
    }
    let depth = a.overlap_depth(b);
    let delta = a.center() - b.center();
    if depth.x < depth.y {
        let normal = if delta.x < 0.0 { Vec2::NEG_X } else { Vec2::X };
        CollisionResult::hit(normal, depth.x)
    } else {
        let normal = if delta.y < 0.0 { Vec2::NEG_Y } else { Vec2::Y };
        CollisionResult::hit(normal, depth.y)
    }
}

/// Push the body out and reflect the approaching velocity component
///
/// v' = v - (1 + bounce)(v·n)n, applied only when moving into the surface
pub fn resolve_blocking(body: &mut KinematicBody, result: &CollisionResult) {
    if !result.hit {
        return;
    }
    body.pos += result.normal * result.penetration;
    let approach = body.vel.dot(result.normal);
    if approach < 0.0 {
        body.vel -= result.normal * approach * (1.0 + body.bounce);
    }
}

/// Separate two moving bodies, each taking half of the correction
pub fn separate_bodies(a: &mut KinematicBody, b: &mut KinematicBody) {
    let result = minimum_separation(&a.aabb(), &b.aabb());
    if !result.hit {
        return;
    }
    let half = result.normal * (result.penetration * 0.5);
    a.pos += half;
    b.pos -= half;
}

/// Keep a body's box inside the world rectangle, bouncing off the edges
pub fn clamp_to_bounds(body: &mut KinematicBody, width: f32, height: f32) {
    let half = body.size * 0.5;
    let bounce = body.bounce;

    if body.pos.x - half.x < 0.0 {
        body.pos.x = half.x;
        if body.vel.x < 0.0 {
            body.vel.x = -body.vel.x * bounce;
        }
    } else if body.pos.x + half.x > width {
        body.pos.x = width - half.x;
        if body.vel.x > 0.0 {
            body.vel.x = -body.vel.x * bounce;
        }
    }

    if body.pos.y - half.y < 0.0 {
        body.pos.y = half.y;
        if body.vel.y < 0.0 {
            body.vel.y = -body.vel.y * bounce;
        }
    } else if body.pos.y + half.y > height {
        body.pos.y = height - half.y;
        if body.vel.y > 0.0 {
            body.vel.y = -body.vel.y * bounce;
        }
    }
}
