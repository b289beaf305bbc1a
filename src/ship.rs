//! Placed ships and their footprints.

use core::fmt;

use crate::common::{BoardError, Coord};
use crate::config::{Layer, GRID_SIZE};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// `Horizontal` for `true`, `Vertical` otherwise.
    pub fn from_horizontal(horizontal: bool) -> Self {
        if horizontal {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    /// The other orientation.
    pub fn rotated(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// A ship occupying a straight run of cells starting at `origin`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    length: usize,
    orientation: Orientation,
    origin: Coord,
    mask: Layer,
}

impl Ship {
    /// Build a ship of `length` cells at `origin`, extending right
    /// (horizontal) or down (vertical).
    pub fn new(length: usize, origin: Coord, orientation: Orientation) -> Result<Self, BoardError> {
        if length == 0 || length > GRID_SIZE {
            return Err(BoardError::InvalidLength(length));
        }
        if !origin.in_bounds() {
            return Err(BoardError::ShipOutOfBounds);
        }
        let end = match orientation {
            Orientation::Horizontal => origin.x + length,
            Orientation::Vertical => origin.y + length,
        };
        if end > GRID_SIZE {
            return Err(BoardError::ShipOutOfBounds);
        }

        let mut mask = Layer::new();
        for i in 0..length {
            mask.set(Self::cell_at(origin, orientation, i))?;
        }
        Ok(Ship {
            length,
            orientation,
            origin,
            mask,
        })
    }

    fn cell_at(origin: Coord, orientation: Orientation, i: usize) -> Coord {
        match orientation {
            Orientation::Horizontal => Coord::new(origin.x + i, origin.y),
            Orientation::Vertical => Coord::new(origin.x, origin.y + i),
        }
    }

    /// Footprint cells, starting at the origin.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.length).map(move |i| Self::cell_at(self.origin, self.orientation, i))
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.mask.contains(c)
    }

    /// Every footprint cell has been shot.
    pub fn is_sunk(&self, shots: &Layer) -> bool {
        (self.mask & *shots) == self.mask
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Occupancy mask of the ship.
    pub fn mask(&self) -> Layer {
        self.mask
    }

    /// Footprint plus its one-cell border, clipped to the grid.
    pub fn halo(&self) -> Layer {
        self.mask.halo()
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ length: {}, origin: ({}, {}), orientation: {:?} }}",
            self.length, self.origin.x, self.origin.y, self.orientation,
        )
    }
}
