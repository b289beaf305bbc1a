//! Commonly used types and utilities for ease of import.

pub use crate::{
    Board, Coord, GameEngine, GameMode, GameStatus, Orientation, ShotMap, ShotOutcome,
    TargetingAi, FLEET, GRID_SIZE,
};

#[cfg(feature = "std")]
pub use crate::{init_logging, RecordBook};
