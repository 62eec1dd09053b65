//! Data-driven game balance
//!
//! Every gameplay number that is not part of the fixed level layout lives here.
//! Loaded from JSON; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Downward acceleration for gravity-affected bodies (units/s²)
    pub gravity: f32,
    /// Fixed frame timestep (seconds)
    pub frame_dt: f32,
    /// Maximum frames run per `Session::advance` call (prevents spiral of death)
    pub max_substeps: u32,

    // === Player ===
    /// Horizontal run speed
    pub player_speed: f32,
    /// Upward jump impulse (applied as negative vy)
    pub jump_speed: f32,
    pub player_bounce: f32,

    // === Hazard ===
    /// Velocity components are re-drawn from [-hazard_max_speed, hazard_max_speed]
    pub hazard_max_speed: i32,
    pub hazard_bounce: f32,
    /// Interval between hazard velocity re-draws (milliseconds)
    pub hazard_retick_ms: u32,

    // === Projectiles ===
    pub bullet_speed: f32,
    /// Remove bullets that leave the world (off by default: the pool grows unbounded)
    pub cull_offscreen_bullets: bool,

    // === Collectibles ===
    pub star_points: u32,
    pub coin_points: u32,
    /// Vertical bounce for each collectible is drawn from this range
    pub collectible_bounce_min: f32,
    pub collectible_bounce_max: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 300.0,
            frame_dt: 1.0 / 60.0,
            max_substeps: 8,

            player_speed: 160.0,
            jump_speed: 330.0,
            player_bounce: 0.2,

            hazard_max_speed: 200,
            hazard_bounce: 2.0,
            hazard_retick_ms: 600,

            bullet_speed: 400.0,
            cull_offscreen_bullets: false,

            star_points: 10,
            coin_points: 20,
            collectible_bounce_min: 0.4,
            collectible_bounce_max: 0.8,
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON document (partial documents are fine)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Hazard retick interval in seconds
    pub fn hazard_retick_secs(&self) -> f32 {
        self.hazard_retick_ms as f32 / 1000.0
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.frame_dt.is_nan() || self.frame_dt <= 0.0 {
            return Err(SessionError::InvalidTuning("frame_dt must be positive"));
        }
        if self.max_substeps == 0 {
            return Err(SessionError::InvalidTuning("max_substeps must be at least 1"));
        }
        if self.hazard_retick_ms == 0 {
            return Err(SessionError::InvalidTuning("hazard_retick_ms must be positive"));
        }
        if self.hazard_max_speed < 0 {
            return Err(SessionError::InvalidTuning("hazard_max_speed must not be negative"));
        }
        if self.collectible_bounce_min > self.collectible_bounce_max {
            return Err(SessionError::InvalidTuning(
                "collectible bounce range is inverted",
            ));
        }
        Ok(())
    }
}
