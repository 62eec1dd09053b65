//! Browser bridge
//!
//! The start screen, rendering and audio live in JS. JS samples input each
//! animation frame, calls `advance`, then reads the snapshot and event list.

use wasm_bindgen::prelude::*;

use crate::sim::{FrameInput, GameEvent};
use crate::{Session, Tuning};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed (hot reload)
    }
}

#[wasm_bindgen]
pub struct WebSession {
    session: Session,
    events: Vec<GameEvent>,
}

#[wasm_bindgen]
impl WebSession {
    /// Start a session; fails on an empty player name
    #[wasm_bindgen(constructor)]
    pub fn new(player_name: &str, seed: u64) -> Result<WebSession, JsValue> {
        let session = Session::start(player_name, Tuning::default(), seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            session,
            events: Vec::new(),
        })
    }

    /// Advance by `elapsed_ms` of wall-clock time with the sampled input
    pub fn advance(
        &mut self,
        elapsed_ms: f64,
        left: bool,
        right: bool,
        up: bool,
        primary: bool,
        secondary: bool,
    ) {
        let input = FrameInput {
            left,
            right,
            up,
            primary,
            secondary,
        };
        self.session.advance((elapsed_ms / 1000.0) as f32, &input);
        self.events.extend(self.session.drain_events());
    }

    pub fn is_over(&self) -> bool {
        self.session.is_over()
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    /// Active entities as JSON
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.session.snapshot()).unwrap_or_default()
    }

    /// Events since the last call, as a JSON array
    pub fn events_json(&mut self) -> String {
        let events = std::mem::take(&mut self.events);
        serde_json::to_string(&events).unwrap_or_default()
    }
}
