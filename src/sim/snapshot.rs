//! Render-ready view of the session for the presentation layer

use glam::Vec2;
use serde::Serialize;

use super::state::{CollectibleKind, PlayerAnim, SessionContext, SessionState, Tint};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub anim: PlayerAnim,
    pub tint: Option<Tint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectibleView {
    pub id: u32,
    pub kind: CollectibleKind,
    pub pos: Vec2,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulletView {
    pub id: u32,
    pub pos: Vec2,
}

/// Active entities only; inactive ones are simply not drawn
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub frame: u64,
    pub state: SessionState,
    pub score: u32,
    pub score_line: String,
    pub player: PlayerView,
    /// None once the ghost has been shot
    pub hazard: Option<Vec2>,
    pub collectibles: Vec<CollectibleView>,
    pub bullets: Vec<BulletView>,
}

impl Snapshot {
    pub fn capture(state: &SessionContext) -> Self {
        Self {
            frame: state.frame,
            state: state.state,
            score: state.score,
            score_line: state.score_line(),
            player: PlayerView {
                pos: state.player.body.pos,
                anim: state.player.anim,
                tint: state.player.tint,
            },
            hazard: state
                .hazard
                .body
                .active
                .then_some(state.hazard.body.pos),
            collectibles: state
                .collectibles
                .iter()
                .filter(|c| c.body.active)
                .map(|c| CollectibleView {
                    id: c.id,
                    kind: c.kind,
                    pos: c.body.pos,
                })
                .collect(),
            bullets: state
                .bullets
                .iter()
                .filter(|b| b.body.active)
                .map(|b| BulletView {
                    id: b.id,
                    pos: b.body.pos,
                })
                .collect(),
        }
    }
}
