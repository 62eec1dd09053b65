//! Fixed timestep frame update
//!
//! One frame, strictly in order: input, projectiles, physics, interaction
//! rules, win check. Nothing runs once the session has reached a terminal state.

use super::collision::{body_solid_collision, clamp_to_bounds, resolve_blocking, separate_bodies};
use super::hazard::wrap_hazard;
use super::input::apply_input;
use super::projectile::{cull_offscreen_bullets, fire_bullets};
use super::state::{CollectibleKind, GameEvent, Outcome, SessionContext};
use crate::consts::*;

/// Digital input sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    /// Primary pointer button (fire)
    pub primary: bool,
    /// Secondary pointer button (spread the pair at spawn)
    pub secondary: bool,
}

/// Advance the session by one frame
pub fn tick(state: &mut SessionContext, input: &FrameInput, dt: f32) {
    // Frozen once won or lost
    if state.state.is_terminal() {
        return;
    }

    state.frame += 1;

    apply_input(state, input);
    fire_bullets(state, input);
    step_physics(state, dt);
    resolve_interactions(state);
    check_win(state);
}

/// Integrate every active body and resolve blocking contacts with the level
pub fn step_physics(state: &mut SessionContext, dt: f32) {
    let gravity = state.tuning.gravity;

    // Player x Platform
    let player = &mut state.player;
    player.body.integrate(gravity, dt);
    player.touching_ground = false;
    for platform in &state.platforms {
        let result = body_solid_collision(&player.body, &platform.bounds);
        if result.hit {
            resolve_blocking(&mut player.body, &result);
            player.touching_ground |= result.is_floor();
        }
    }
    clamp_to_bounds(&mut player.body, WORLD_WIDTH, WORLD_HEIGHT);

    // Collectible x Platform
    for collectible in state.collectibles.iter_mut().filter(|c| c.body.active) {
        collectible.body.integrate(gravity, dt);
        for platform in &state.platforms {
            let result = body_solid_collision(&collectible.body, &platform.bounds);
            resolve_blocking(&mut collectible.body, &result);
        }
    }

    state.hazard.body.integrate(gravity, dt);
    wrap_hazard(state);

    for bullet in &mut state.bullets {
        bullet.body.integrate(gravity, dt);
    }
    cull_offscreen_bullets(state);
}

/// Interaction rules in priority order. Every callback checks that its
/// entities are still active, so running this twice on the same state is a no-op.
pub fn resolve_interactions(state: &mut SessionContext) {
    if state.state.is_terminal() {
        return;
    }

    // Bullet x Hazard
    for bullet in &mut state.bullets {
        if bullet.body.touches(&state.hazard.body) {
            bullet.body.disable();
            state.hazard.body.disable();
            state.events.push(GameEvent::HazardDestroyed);
            log::debug!("Bullet {} destroyed the hazard", bullet.id);
            break;
        }
    }

    // Player x Hazard
    if state.player.body.touches(&state.hazard.body) {
        separate_bodies(&mut state.player.body, &mut state.hazard.body);
        clamp_to_bounds(&mut state.player.body, WORLD_WIDTH, WORLD_HEIGHT);
        wrap_hazard(state);
        state.end_session(Outcome::Lost);
        return;
    }

    // Player x Collectible
    let mut picked = Vec::new();
    for collectible in &mut state.collectibles {
        if state.player.body.touches(&collectible.body) {
            collectible.body.disable();
            picked.push((collectible.kind, collectible.points));
        }
    }
    for (kind, points) in picked {
        log::debug!("Picked up {:?} (+{})", kind, points);
        state.award(points);
        state.events.push(GameEvent::Pickup { kind });
    }
}

/// Won once no star and no coin is left in play
pub fn check_win(state: &mut SessionContext) {
    if state.state.is_terminal() {
        return;
    }
    if state.count_active(CollectibleKind::Star) == 0
        && state.count_active(CollectibleKind::Coin) == 0
    {
        state.end_session(Outcome::Won);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::hazard::retick_hazard;
    use crate::sim::state::SessionState;
    use crate::tuning::Tuning;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    /// Session with the ghost parked far from the player
    fn quiet_session() -> SessionContext {
        let mut state = SessionContext::new("Ada", Tuning::default(), 12345);
        park_hazard(&mut state);
        state
    }

    fn park_hazard(state: &mut SessionContext) {
        state.hazard.body.pos = Vec2::new(700.0, 100.0);
        state.hazard.body.vel = Vec2::ZERO;
    }

    /// Put a collectible right on top of the player
    fn place_on_player(state: &mut SessionContext, index: usize) {
        state.collectibles[index].body.pos = state.player.body.pos;
        state.collectibles[index].body.vel = state.player.body.vel;
    }

    fn ended_events(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::SessionEnded { .. }))
            .count()
    }

    #[test]
    fn test_player_lands_and_can_jump() {
        let mut state = quiet_session();
        let idle = FrameInput::default();
        for _ in 0..180 {
            tick(&mut state, &idle, DT);
            park_hazard(&mut state);
        }
        assert!(state.player.touching_ground);
        // Ground top at 536, player half height 24
        assert!((state.player.body.pos.y - 512.0).abs() < 0.5);

        let up = FrameInput {
            up: true,
            ..Default::default()
        };
        tick(&mut state, &up, DT);
        assert!(state.player.body.vel.y < -300.0);
        assert!(!state.player.touching_ground);

        // Airborne: holding up again adds nothing
        let vy = state.player.body.vel.y;
        tick(&mut state, &up, DT);
        assert!((state.player.body.vel.y - (vy + 300.0 * DT)).abs() < 0.001);
    }

    #[test]
    fn test_collectibles_fall_and_rest_on_platforms() {
        let mut state = quiet_session();
        state.player.body.pos = Vec2::new(400.0, 100.0);
        // Bounciest collectibles need a while to settle
        for _ in 0..1800 {
            tick(&mut state, &FrameInput::default(), DT);
            park_hazard(&mut state);
            state.player.body.pos = Vec2::new(400.0, 100.0);
            state.player.body.vel = Vec2::ZERO;
        }
        for c in &state.collectibles {
            let bottom = c.body.aabb().max.y;
            let on_some_platform = state
                .platforms
                .iter()
                .any(|p| (bottom - p.bounds.min.y).abs() < 2.0);
            assert!(on_some_platform, "collectible {} resting at {}", c.id, bottom);
        }
    }

    #[test]
    fn test_pickup_awards_points_once() {
        let mut state = quiet_session();
        let star = 0;
        let coin = 6;
        assert_eq!(state.collectibles[coin].kind, CollectibleKind::Coin);

        place_on_player(&mut state, star);
        tick(&mut state, &FrameInput::default(), DT);
        assert_eq!(state.score, 10);
        assert!(!state.collectibles[star].body.active);

        place_on_player(&mut state, coin);
        tick(&mut state, &FrameInput::default(), DT);
        assert_eq!(state.score, 30);

        // Inactive collectibles never re-collect, even when overlapping
        state.collectibles[star].body.pos = state.player.body.pos;
        resolve_interactions(&mut state);
        resolve_interactions(&mut state);
        assert_eq!(state.score, 30);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::ScoreChanged { score: 10 }));
        assert!(events.contains(&GameEvent::ScoreChanged { score: 30 }));
        assert!(events.contains(&GameEvent::Pickup {
            kind: CollectibleKind::Coin
        }));
    }

    #[test]
    fn test_full_clear_wins_on_last_pickup() {
        let mut state = quiet_session();
        let idle = FrameInput::default();

        for i in 0..12 {
            assert_eq!(state.state, SessionState::Playing, "won early at pickup {}", i);
            place_on_player(&mut state, i);
            tick(&mut state, &idle, DT);
            park_hazard(&mut state);
        }

        assert_eq!(state.score, 180);
        assert_eq!(state.state, SessionState::Won);
        assert_eq!(state.player.tint, Some(crate::sim::state::Tint::Green));

        let events = state.drain_events();
        assert_eq!(ended_events(&events), 1);
        assert!(events.contains(&GameEvent::SessionEnded {
            outcome: Outcome::Won,
            final_score: 180,
            player_name: "Ada".to_string(),
        }));
    }

    #[test]
    fn test_hazard_contact_loses_immediately() {
        let mut state = quiet_session();
        state.hazard.body.pos = state.player.body.pos + Vec2::new(10.0, 0.0);
        tick(&mut state, &FrameInput::default(), DT);

        assert_eq!(state.state, SessionState::Lost);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.tint, Some(crate::sim::state::Tint::Red));
        assert!(state.collectibles.iter().all(|c| c.body.active));
    }

    #[test]
    fn test_terminal_state_is_frozen() {
        let mut state = quiet_session();
        state.hazard.body.pos = state.player.body.pos;
        tick(&mut state, &FrameInput::default(), DT);
        assert_eq!(state.state, SessionState::Lost);
        state.drain_events();

        let frozen_pos = state.player.body.pos;
        let frozen_frame = state.frame;
        place_on_player(&mut state, 0);
        let input = FrameInput {
            right: true,
            primary: true,
            ..Default::default()
        };
        for _ in 0..30 {
            tick(&mut state, &input, DT);
            retick_hazard(&mut state);
        }

        assert_eq!(state.score, 0);
        assert_eq!(state.player.body.pos, frozen_pos);
        assert_eq!(state.frame, frozen_frame);
        assert!(state.bullets.is_empty());
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_bullet_neutralizes_hazard_without_scoring() {
        let mut state = quiet_session();
        state.hazard.body.pos = state.player.body.pos + Vec2::new(40.0, 0.0);
        let fire = FrameInput {
            primary: true,
            secondary: true,
            ..Default::default()
        };
        tick(&mut state, &fire, DT);
        // The right-hand bullet has not reached the ghost yet
        assert!(state.hazard.body.active);

        let idle = FrameInput::default();
        for _ in 0..10 {
            tick(&mut state, &idle, DT);
        }

        assert!(!state.hazard.body.active);
        assert_eq!(state.active_bullets(), 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.state, SessionState::Playing);
        assert!(state.drain_events().contains(&GameEvent::HazardDestroyed));

        // A neutralized ghost can no longer end the session
        state.hazard.body.pos = state.player.body.pos;
        tick(&mut state, &idle, DT);
        assert_eq!(state.state, SessionState::Playing);
    }

    #[test]
    fn test_lost_takes_precedence_over_won_in_same_frame() {
        let mut state = quiet_session();
        for c in state.collectibles.iter_mut().skip(1) {
            c.body.disable();
        }
        place_on_player(&mut state, 0);
        state.hazard.body.pos = state.player.body.pos;

        tick(&mut state, &FrameInput::default(), DT);

        assert_eq!(state.state, SessionState::Lost);
        assert_eq!(state.score, 0);
        assert_eq!(ended_events(&state.drain_events()), 1);
    }

    #[test]
    fn test_player_clamped_to_world() {
        let mut state = quiet_session();
        let left = FrameInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..240 {
            tick(&mut state, &left, DT);
            park_hazard(&mut state);
        }
        let aabb = state.player.body.aabb();
        assert!(aabb.min.x >= 0.0);
        assert!(state.player.body.pos.x <= WORLD_WIDTH);
    }

    #[test]
    fn test_determinism() {
        let mut a = SessionContext::new("Ada", Tuning::default(), 99999);
        let mut b = SessionContext::new("Ada", Tuning::default(), 99999);
        let inputs = [
            FrameInput {
                right: true,
                ..Default::default()
            },
            FrameInput {
                up: true,
                primary: true,
                ..Default::default()
            },
            FrameInput::default(),
        ];
        for round in 0..60 {
            for input in &inputs {
                tick(&mut a, input, DT);
                tick(&mut b, input, DT);
            }
            if round % 10 == 0 {
                retick_hazard(&mut a);
                retick_hazard(&mut b);
            }
        }
        assert_eq!(a.frame, b.frame);
        assert_eq!(a.state, b.state);
        assert_eq!(a.score, b.score);
        assert_eq!(a.bullets.len(), b.bullets.len());
        assert_eq!(a.player.body.pos, b.player.body.pos);
        assert_eq!(a.hazard.body.pos, b.hazard.body.pos);
    }
}
