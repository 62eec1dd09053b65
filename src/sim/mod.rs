//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod hazard;
pub mod input;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use body::{Aabb, KinematicBody};
pub use collision::{CollisionResult, body_solid_collision};
pub use hazard::{retick_hazard, wrap_hazard};
pub use input::{apply_input, autopilot};
pub use projectile::LegacyPairCorrection;
pub use snapshot::Snapshot;
pub use state::{
    Bullet, Collectible, CollectibleKind, GameEvent, Hazard, Outcome, Platform, Player,
    PlayerAnim, SessionContext, SessionState, Tint,
};
pub use tick::{FrameInput, tick};
