//! # Actor Sprites Module
//!
//! Bookkeeping for the per-state, direction-indexed sprite sets. Frame
//! pixel data and decoding live in the external asset layer; the engine only
//! tracks which sheet is active and where its frame counter stands, so state
//! transitions can restart animations and report completed cycles.

use crate::actor::machine::ActorState;
use serde::{Deserialize, Serialize};

/// One state's sprite sheet: the same frame count for each of the 16 facing
/// directions, plus the asset key the renderer resolves to actual frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSheet {
    /// Opaque asset identifier understood by the renderer.
    pub asset: u32,
    /// Frames per direction; the cycle completes when the counter wraps.
    pub frame_count: usize,
}

impl SpriteSheet {
    pub fn new(asset: u32, frame_count: usize) -> Self {
        Self { asset, frame_count }
    }
}

/// The full sprite assignment for an actor: one optional sheet per state,
/// indexed by the state's integer value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorSprites {
    sheets: [Option<SpriteSheet>; 7],
}

impl ActorSprites {
    /// An empty assignment; actors render nothing until the asset layer
    /// delivers sheets.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, state: ActorState, sheet: SpriteSheet) {
        self.sheets[state.index()] = Some(sheet);
    }

    pub fn get(&self, state: ActorState) -> Option<SpriteSheet> {
        self.sheets[state.index()]
    }
}
