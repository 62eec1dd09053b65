//! Session state and core simulation types
//!
//! Everything the frame loop and the hazard timer mutate lives in `SessionContext`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Aabb, KinematicBody};
use super::projectile::LegacyPairCorrection;
use crate::consts::*;
use crate::tuning::Tuning;

/// Session outcome state machine: Playing is the only non-terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Playing,
    Won,
    Lost,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        self != SessionState::Playing
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    /// End-of-session text shown over the frozen play area
    pub fn banner(self, player_name: &str, score: u32) -> String {
        match self {
            Outcome::Won => format!(
                "{}'s Score: {}\nCongratulations, you won!",
                player_name, score
            ),
            Outcome::Lost => format!("{}'s Score: {}\nGOTCHA, you lost!", player_name, score),
        }
    }

    /// Player tint applied when the session freezes
    pub fn tint(self) -> Tint {
        match self {
            Outcome::Won => Tint::Green,
            Outcome::Lost => Tint::Red,
        }
    }
}

impl From<Outcome> for SessionState {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Won => SessionState::Won,
            Outcome::Lost => SessionState::Lost,
        }
    }
}

/// Player animation intent (frame selection is up to the renderer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerAnim {
    Left,
    Right,
    #[default]
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    Red,
    Green,
}

/// Discrete events for the presentation/audio sinks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged {
        score: u32,
    },
    /// Audio cue: something was picked up
    Pickup {
        kind: CollectibleKind,
    },
    /// A bullet neutralized the hazard
    HazardDestroyed,
    SessionEnded {
        outcome: Outcome,
        final_score: u32,
        player_name: String,
    },
}

/// The player-controlled character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: KinematicBody,
    /// Resting on a platform after the last physics step; gates jumping
    pub touching_ground: bool,
    pub anim: PlayerAnim,
    pub tint: Option<Tint>,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            body: KinematicBody::new(PLAYER_START, PLAYER_SIZE).with_bounce(tuning.player_bounce),
            touching_ground: false,
            anim: PlayerAnim::Idle,
            tint: None,
        }
    }
}

/// The wandering ghost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub body: KinematicBody,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Star,
    Coin,
}

impl CollectibleKind {
    pub fn size(self) -> Vec2 {
        match self {
            CollectibleKind::Star => STAR_SIZE,
            CollectibleKind::Coin => COIN_SIZE,
        }
    }

    pub fn points(self, tuning: &Tuning) -> u32 {
        match self {
            CollectibleKind::Star => tuning.star_points,
            CollectibleKind::Coin => tuning.coin_points,
        }
    }

    fn start_x(self) -> f32 {
        match self {
            CollectibleKind::Star => STAR_START_X,
            CollectibleKind::Coin => COIN_START_X,
        }
    }
}

/// A star or coin waiting to be picked up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    pub points: u32,
    pub body: KinematicBody,
}

/// A projectile fired by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub body: KinematicBody,
}

/// Immovable level geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub bounds: Aabb,
}

/// Complete session state, owned by the update loop
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Display-only name captured before the session started
    pub player_name: String,
    pub seed: u64,
    pub tuning: Tuning,
    pub state: SessionState,
    pub score: u32,
    /// Frames simulated while Playing
    pub frame: u64,
    pub player: Player,
    pub hazard: Hazard,
    pub platforms: Vec<Platform>,
    /// Stars then coins, sorted by id
    pub collectibles: Vec<Collectible>,
    pub bullets: Vec<Bullet>,
    pub(crate) legacy_pair: LegacyPairCorrection,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl SessionContext {
    /// Build the fixed layout and place the randomized entities from `seed`
    pub fn new(player_name: impl Into<String>, tuning: Tuning, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let platforms = PLATFORMS
            .iter()
            .map(|&(center, size)| Platform {
                bounds: Aabb::from_center(center, size),
            })
            .collect();

        let spawn = Vec2::new(
            rng.random_range(0..WORLD_WIDTH as i32) as f32,
            rng.random_range(0..WORLD_HEIGHT as i32) as f32,
        );
        let mut hazard_body = KinematicBody::new(spawn, HAZARD_SIZE)
            .with_bounce(tuning.hazard_bounce)
            .without_gravity();
        hazard_body.vel = random_hazard_velocity(&mut rng, tuning.hazard_max_speed);

        let mut state = Self {
            player_name: player_name.into(),
            seed,
            state: SessionState::Playing,
            score: 0,
            frame: 0,
            player: Player::new(&tuning),
            hazard: Hazard { body: hazard_body },
            platforms,
            collectibles: Vec::with_capacity(COLLECTIBLES_PER_KIND * 2),
            bullets: Vec::new(),
            legacy_pair: LegacyPairCorrection::default(),
            events: Vec::new(),
            rng,
            tuning,
            next_id: 1,
        };

        state.spawn_collectible_row(CollectibleKind::Star);
        state.spawn_collectible_row(CollectibleKind::Coin);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn spawn_collectible_row(&mut self, kind: CollectibleKind) {
        for i in 0..COLLECTIBLES_PER_KIND {
            let id = self.next_entity_id();
            let x = kind.start_x() + i as f32 * COLLECTIBLE_STEP_X;
            let bounce = self.rng.random_range(
                self.tuning.collectible_bounce_min..=self.tuning.collectible_bounce_max,
            );
            self.collectibles.push(Collectible {
                id,
                kind,
                points: kind.points(&self.tuning),
                body: KinematicBody::new(Vec2::new(x, 0.0), kind.size()).with_bounce(bounce),
            });
        }
    }

    /// Number of collectibles of `kind` still in play
    pub fn count_active(&self, kind: CollectibleKind) -> usize {
        self.collectibles
            .iter()
            .filter(|c| c.kind == kind && c.body.active)
            .count()
    }

    pub fn active_bullets(&self) -> usize {
        self.bullets.iter().filter(|b| b.body.active).count()
    }

    /// HUD score text
    pub fn score_line(&self) -> String {
        format!("{}'s score: {}", self.player_name, self.score)
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Add points and announce the new total
    pub(crate) fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.events.push(GameEvent::ScoreChanged { score: self.score });
    }

    /// Enter a terminal state; ignored once the session has already ended
    pub(crate) fn end_session(&mut self, outcome: Outcome) {
        if self.state.is_terminal() {
            return;
        }
        self.state = outcome.into();
        self.player.tint = Some(outcome.tint());
        if outcome == Outcome::Lost {
            self.player.anim = PlayerAnim::Idle;
        }
        log::info!(
            "Session ended: {}",
            outcome.banner(&self.player_name, self.score).replace('\n', " - ")
        );
        self.events.push(GameEvent::SessionEnded {
            outcome,
            final_score: self.score,
            player_name: self.player_name.clone(),
        });
    }
}

/// Uniform integer velocity in [-max_speed, max_speed] on each axis
pub fn random_hazard_velocity(rng: &mut impl Rng, max_speed: i32) -> Vec2 {
    Vec2::new(
        rng.random_range(-max_speed..=max_speed) as f32,
        rng.random_range(-max_speed..=max_speed) as f32,
    )
}
