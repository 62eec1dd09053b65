//! Ghost Hunt - a small platformer arcade session
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, session state)
//! - `session`: Frame clock + hazard timer driving the simulation
//! - `tuning`: Data-driven game balance
//! - `web`: wasm-bindgen bridge (wasm32 only)

pub mod error;
pub mod session;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::SessionError;
pub use session::Session;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Player spawn point and body size
    pub const PLAYER_START: Vec2 = Vec2::new(100.0, 450.0);
    pub const PLAYER_SIZE: Vec2 = Vec2::new(32.0, 48.0);

    /// Collectible row: one of each kind every COLLECTIBLE_STEP_X units
    pub const COLLECTIBLES_PER_KIND: usize = 6;
    pub const STAR_START_X: f32 = 12.0;
    pub const COIN_START_X: f32 = 70.0;
    pub const COLLECTIBLE_STEP_X: f32 = 140.0;
    pub const STAR_SIZE: Vec2 = Vec2::new(24.0, 22.0);
    pub const COIN_SIZE: Vec2 = Vec2::new(16.0, 16.0); // half-scale sprite

    pub const HAZARD_SIZE: Vec2 = Vec2::new(32.0, 32.0); // half-scale sprite
    pub const BULLET_SIZE: Vec2 = Vec2::new(8.0, 8.0);

    /// Margin past the world edge before an off-screen bullet may be culled
    pub const BULLET_CULL_MARGIN: f32 = 64.0;

    /// Static platform layout: (center, size)
    pub const PLATFORMS: [(Vec2, Vec2); 4] = [
        (Vec2::new(400.0, 568.0), Vec2::new(800.0, 64.0)), // ground, double scale
        (Vec2::new(600.0, 400.0), Vec2::new(400.0, 32.0)),
        (Vec2::new(50.0, 250.0), Vec2::new(400.0, 32.0)),
        (Vec2::new(750.0, 220.0), Vec2::new(400.0, 32.0)),
    ];
}

/// Wrap a coordinate into [0, extent)
#[inline]
pub fn wrap_coordinate(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to exactly `extent` for tiny negative inputs
    if wrapped >= extent { 0.0 } else { wrapped }
}

/// Wrap a point onto the world torus
#[inline]
pub fn wrap_to_world(pos: Vec2) -> Vec2 {
    Vec2::new(
        wrap_coordinate(pos.x, consts::WORLD_WIDTH),
        wrap_coordinate(pos.y, consts::WORLD_HEIGHT),
    )
}
