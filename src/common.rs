//! Common types for the grid: coordinates, cell and shot results, board errors.

use crate::bitboard::BitBoardError;
use crate::config::GRID_SIZE;

/// A cell on the grid: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns `true` when the cell lies inside the grid.
    pub fn in_bounds(&self) -> bool {
        self.x < GRID_SIZE && self.y < GRID_SIZE
    }

    /// In-bounds cells sharing an edge with this one (right, down, left, up).
    pub fn orthogonal_neighbours(self) -> impl Iterator<Item = Coord> {
        const STEPS: [(isize, isize); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
        STEPS.into_iter().filter_map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// Cell shifted by `(dx, dy)`, or `None` if that leaves the grid.
    pub fn offset(self, dx: isize, dy: isize) -> Option<Coord> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        let c = Coord::new(x, y);
        c.in_bounds().then_some(c)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Coord::new(x, y)
    }
}

/// Shot layer value of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Not fired at yet.
    Unshot,
    /// Fired at; hit or miss depends on occupancy.
    Shot,
    /// Proven empty after a neighbouring ship sank. Never fired at.
    Excluded,
}

/// Result of a valid shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// Shot landed on open water.
    Miss,
    /// Shot hit a ship that still has unshot cells.
    Hit,
    /// Shot hit the last unshot cell of a ship.
    Sunk { length: usize },
}

impl ShotOutcome {
    /// `true` for `Hit` and `Sunk`.
    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotOutcome::Miss)
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error (index out of range).
    BitBoardError(BitBoardError),
    /// Ship length is zero or longer than the grid.
    InvalidLength(usize),
    /// Ship would leave the grid.
    ShipOutOfBounds,
    /// Ship footprint overlaps or touches another ship.
    ShipOverlaps,
    /// Shot coordinate is outside the grid.
    ShotOutOfBounds { x: usize, y: usize },
    /// Cell was already shot or excluded.
    AlreadyShot { x: usize, y: usize },
    /// Occupied cell with no owning ship in the registry.
    UnknownShipHit,
    /// Random placement gave up on a ship of this length.
    UnableToPlaceShip { length: usize },
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoardError(err)
    }
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            BoardError::InvalidLength(len) => write!(f, "Invalid ship length {}", len),
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipOverlaps => {
                write!(f, "Ship placement overlaps or touches another ship")
            }
            BoardError::ShotOutOfBounds { x, y } => {
                write!(f, "Shot at ({}, {}) is outside the grid", x, y)
            }
            BoardError::AlreadyShot { x, y } => {
                write!(f, "Cell ({}, {}) was already resolved", x, y)
            }
            BoardError::UnknownShipHit => write!(f, "Occupied cell has no owning ship"),
            BoardError::UnableToPlaceShip { length } => {
                write!(f, "Unable to place ship of length {}", length)
            }
        }
    }
}
