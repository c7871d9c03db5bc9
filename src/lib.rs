//! # Duskhold
//!
//! Core engine for an isometric action-RPG client: click-to-path translation
//! over a diamond-tessellated grid, and the actor behavior machine that walks
//! the resulting paths.
//!
//! ## Architecture Overview
//!
//! The crate is built around two subsystems:
//!
//! - **Grid engine**: [`Grid`] owns an arena of diamond-shaped
//!   [`GridElement`] cells, maps terrain pillars onto them, spatially indexes
//!   them for point lookup, and answers [`Grid::construct_path`] queries with
//!   an ordered sequence of (direction, distance) steps clipped to the exact
//!   click/feet coordinates.
//! - **Actor engine**: [`BasicActor`] carries the hierarchical behavior
//!   machine and the direction-indexed sprite bookkeeping; [`Actor`] adds the
//!   RPG stat block and consumes travel paths tick by tick.
//!
//! Rendering, asset decoding, dialogue, and file-format parsing are external
//! collaborators reached through the narrow traits in [`scene`].
//!
//! Everything runs single-threaded and synchronously: a click fully resolves
//! to a path (or an empty path) before control returns, and per-tick
//! advancement happens in one `update_time_dependent_states` call per actor.

pub mod actor;
pub mod direction;
pub mod geometry;
pub mod grid;
pub mod scene;

pub use actor::{
    Actor, ActorEvent, ActorId, ActorSprites, ActorState, BasicActor, SpriteSheet, StatBlock,
    StatNotification, WalkOutcome,
};
pub use direction::{Compass8, Direction, DirectionMode};
pub use geometry::{Point, Rect};
pub use grid::{ElementId, Grid, GridConfig, GridElement, PathEndpoint, PathStep, TravelPath};
pub use scene::{LevelObject, NoopSceneHooks, PillarId, PillarSeed, SceneHooks};

/// Core error type for the Duskhold engine.
#[derive(thiserror::Error, Debug)]
pub enum DuskholdError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A raw value did not name a discrete direction
    #[error("Invalid direction value: {0}")]
    InvalidDirection(u8),

    /// Grid construction input was inconsistent
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Path reconstruction reached a node with no way forward
    #[error("Path reconstruction stalled at element {0:?}")]
    PathStalled(grid::ElementId),

    /// Actor state is invalid for the requested operation
    #[error("Invalid actor state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Duskhold codebase.
pub type DuskholdResult<T> = Result<T, DuskholdError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine configuration constants.
pub mod config {
    /// Default grid cell width in world pixels (twice the height; the
    /// isometric cell is a diamond inscribed in a 2:1 rectangle)
    pub const DEFAULT_CELL_WIDTH: f64 = 64.0;

    /// Default grid cell height in world pixels
    pub const DEFAULT_CELL_HEIGHT: f64 = 32.0;

    /// Vertical offset above an object's bounding-rect bottom used as its
    /// approximate foot position
    pub const FEET_OFFSET: f64 = 20.0;

    /// Default actor walk speed in world pixels per tick
    pub const DEFAULT_WALK_SPEED: f64 = 4.0;

    /// Geometric tolerance for containment and intersection tests
    pub const GEOMETRY_EPSILON: f64 = 1e-9;
}
