//! Session driver
//!
//! Owns the simulation state plus two independent clocks: the fixed-step frame
//! clock and the hazard's periodic timer. Both are fed the same wall-clock
//! deltas; neither is derived from the other.

use crate::error::SessionError;
use crate::sim::snapshot::Snapshot;
use crate::sim::{FrameInput, GameEvent, SessionContext, SessionState, retick_hazard, tick};
use crate::tuning::Tuning;

/// Fixed timestep accumulator
#[derive(Debug, Clone)]
pub struct FrameClock {
    dt: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl FrameClock {
    pub fn new(dt: f32, max_substeps: u32) -> Self {
        Self {
            dt,
            max_substeps,
            accumulator: 0.0,
        }
    }

    /// Add elapsed time; returns how many fixed frames are due
    pub fn accumulate(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.max(0.0);
        // Cap to prevent spiral of death
        self.accumulator = self.accumulator.min(self.dt * self.max_substeps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Repeating timer that fires every `interval` seconds
#[derive(Debug, Clone)]
pub struct PeriodicTimer {
    interval: f32,
    elapsed: f32,
}

impl PeriodicTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Add elapsed time; returns how many times the timer fired
    pub fn accumulate(&mut self, elapsed: f32) -> u32 {
        self.elapsed += elapsed.max(0.0);
        let fires = (self.elapsed / self.interval) as u32;
        self.elapsed -= fires as f32 * self.interval;
        fires
    }
}

/// A running game session
#[derive(Debug, Clone)]
pub struct Session {
    context: SessionContext,
    frames: FrameClock,
    hazard_timer: PeriodicTimer,
}

impl Session {
    /// Bootstrap a session for `player_name`; the core is inert until this succeeds
    pub fn start(player_name: &str, tuning: Tuning, seed: u64) -> Result<Self, SessionError> {
        let name = player_name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyPlayerName);
        }
        tuning.validate()?;

        log::info!("Starting session for {} (seed {})", name, seed);
        let frames = FrameClock::new(tuning.frame_dt, tuning.max_substeps);
        let hazard_timer = PeriodicTimer::new(tuning.hazard_retick_secs());
        Ok(Self {
            context: SessionContext::new(name, tuning, seed),
            frames,
            hazard_timer,
        })
    }

    /// Feed wall-clock time: run every due frame, then every due hazard retick
    pub fn advance(&mut self, elapsed_secs: f32, input: &FrameInput) {
        let steps = self.frames.accumulate(elapsed_secs);
        let fires = self.hazard_timer.accumulate(elapsed_secs);

        for _ in 0..steps {
            tick(&mut self.context, input, self.frames.dt());
        }
        for _ in 0..fires {
            retick_hazard(&mut self.context);
        }
    }

    /// Run exactly one frame, ignoring the wall clock
    pub fn step_frame(&mut self, input: &FrameInput) {
        tick(&mut self.context, input, self.frames.dt());
    }

    pub fn state(&self) -> SessionState {
        self.context.state
    }

    pub fn score(&self) -> u32 {
        self.context.score
    }

    pub fn is_over(&self) -> bool {
        self.context.state.is_terminal()
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut SessionContext {
        &mut self.context
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.context)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.context.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_clock_accumulates_partial() {
        let mut clock = FrameClock::new(1.0 / 60.0, 8);
        assert_eq!(clock.accumulate(0.008), 0);
        assert_eq!(clock.accumulate(0.010), 1);
    }

    #[test]
    fn test_frame_clock_caps_substeps() {
        let mut clock = FrameClock::new(1.0 / 60.0, 8);
        assert_eq!(clock.accumulate(1.0), 8);
    }

    #[test]
    fn test_periodic_timer_fires_every_interval() {
        let mut timer = PeriodicTimer::new(0.6);
        assert_eq!(timer.accumulate(0.5), 0);
        assert_eq!(timer.accumulate(0.2), 1);
        assert_eq!(timer.accumulate(1.25), 2);
    }

    #[test]
    fn test_start_rejects_empty_name() {
        assert_eq!(
            Session::start("   ", Tuning::default(), 1).unwrap_err(),
            SessionError::EmptyPlayerName
        );
        let session = Session::start(" Ada ", Tuning::default(), 1).unwrap();
        assert_eq!(session.context().player_name, "Ada");
    }

    #[test]
    fn test_hazard_retick_follows_its_own_timer() {
        let mut session = Session::start("Ada", Tuning::default(), 8).unwrap();
        session.context_mut().hazard.body.pos = glam::Vec2::new(700.0, 100.0);
        session.context_mut().hazard.body.vel = glam::Vec2::ZERO;

        // 0.5s of frames: no retick yet, the ghost stays still
        for _ in 0..30 {
            session.advance(1.0 / 60.0, &FrameInput::default());
        }
        assert_eq!(session.context().hazard.body.vel, glam::Vec2::ZERO);

        // Crossing 0.6s fires the retick
        for _ in 0..12 {
            session.advance(1.0 / 60.0, &FrameInput::default());
        }
        let frame = session.context().frame;
        assert!((40..=42).contains(&frame), "frame {}", frame);
        let v = session.context().hazard.body.vel;
        assert!(v.x.abs() <= 200.0 && v.y.abs() <= 200.0);
    }
}
