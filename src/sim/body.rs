//! Kinematic bodies and axis-aligned boxes
//!
//! Positions are box centers, matching how sprites are placed in the layout.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap: boxes that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Overlap extent on each axis (only meaningful when `overlaps` is true)
    #[inline]
    pub fn overlap_depth(&self, other: &Aabb) -> Vec2 {
        Vec2::new(
            self.max.x.min(other.max.x) - self.min.x.max(other.min.x),
            self.max.y.min(other.max.y) - self.min.y.max(other.min.y),
        )
    }
}

/// Position, velocity and response flags shared by every moving entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinematicBody {
    pub pos: Vec2,
    /// Position before the last integration step (for contact side detection)
    pub prev_pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Fraction of the normal velocity kept (and reversed) on a blocking contact
    pub bounce: f32,
    pub gravity: bool,
    pub active: bool,
}

impl KinematicBody {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            prev_pos: pos,
            vel: Vec2::ZERO,
            size,
            bounce: 0.0,
            gravity: true,
            active: true,
        }
    }

    pub fn with_bounce(mut self, bounce: f32) -> Self {
        self.bounce = bounce;
        self
    }

    pub fn without_gravity(mut self) -> Self {
        self.gravity = false;
        self
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    #[inline]
    pub fn prev_aabb(&self) -> Aabb {
        Aabb::from_center(self.prev_pos, self.size)
    }

    /// Advance one fixed step: gravity into velocity, then velocity into position
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        if !self.active {
            return;
        }
        self.prev_pos = self.pos;
        if self.gravity {
            self.vel.y += gravity * dt;
        }
        self.pos += self.vel * dt;
    }

    /// Take the body out of the simulation (consumed, shot, ...)
    pub fn disable(&mut self) {
        self.active = false;
        self.vel = Vec2::ZERO;
    }

    /// Both bodies active and their boxes overlap
    pub fn touches(&self, other: &KinematicBody) -> bool {
        self.active && other.active && self.aabb().overlaps(&other.aabb())
    }
}
