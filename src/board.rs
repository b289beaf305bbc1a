//! One player's grid: ship placement, shots and sinking.

use alloc::vec::Vec;
use core::fmt;

use log::{debug, warn};
use rand::Rng;

use crate::common::{BoardError, CellState, Coord, ShotOutcome};
use crate::config::{Layer, FLEET_CELLS, FLEET_PLACEMENT_RESETS, GRID_SIZE, PLACEMENT_ATTEMPTS};
use crate::ship::{Orientation, Ship};

/// Shot history of a board without its occupancy layer.
///
/// This is all the targeting AI gets to see.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShotMap {
    shots: Layer,
    excluded: Layer,
}

impl ShotMap {
    pub fn new(shots: Layer, excluded: Layer) -> Self {
        Self {
            shots,
            excluded: excluded & !shots,
        }
    }

    pub fn state(&self, c: Coord) -> CellState {
        if self.shots.contains(c) {
            CellState::Shot
        } else if self.excluded.contains(c) {
            CellState::Excluded
        } else {
            CellState::Unshot
        }
    }

    /// In bounds and neither shot nor excluded.
    pub fn is_unshot(&self, c: Coord) -> bool {
        c.in_bounds() && self.state(c) == CellState::Unshot
    }

    /// All cells still open to a shot.
    pub fn unshot(&self) -> Layer {
        !(self.shots | self.excluded)
    }

    pub fn shots(&self) -> Layer {
        self.shots
    }

    pub fn excluded(&self) -> Layer {
        self.excluded
    }
}

pub struct Board {
    occupancy: Layer,
    shots: Layer,
    excluded: Layer,
    ships: Vec<Ship>,
}

impl Board {
    /// Create an empty board (no ships, no shots).
    pub fn new() -> Self {
        Board {
            occupancy: Layer::new(),
            shots: Layer::new(),
            excluded: Layer::new(),
            ships: Vec::new(),
        }
    }

    /// Remove every ship and shot.
    pub fn clear(&mut self) {
        self.occupancy.clear_all();
        self.shots.clear_all();
        self.excluded.clear_all();
        self.ships.clear();
    }

    /// Placed ships in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Board occupancy mask of all ships.
    pub fn occupancy(&self) -> Layer {
        self.occupancy
    }

    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.occupancy.contains(Coord::new(x, y))
    }

    /// The ship covering `(x, y)`, if any.
    pub fn ship_at(&self, x: usize, y: usize) -> Option<&Ship> {
        let c = Coord::new(x, y);
        self.ships.iter().find(|s| s.contains(c))
    }

    /// Shot layer value at `(x, y)`. Out-of-bounds cells read as `Unshot`.
    pub fn cell_state(&self, x: usize, y: usize) -> CellState {
        self.shot_map().state(Coord::new(x, y))
    }

    /// Read-only shot history for the opponent's targeting.
    pub fn shot_map(&self) -> ShotMap {
        ShotMap {
            shots: self.shots,
            excluded: self.excluded,
        }
    }

    /// Placed ship cells add up to the whole fleet.
    pub fn is_fleet_complete(&self) -> bool {
        self.occupancy.count_ones() == FLEET_CELLS
    }

    /// Number of ships not yet sunk.
    pub fn ships_afloat(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk(&self.shots)).count()
    }

    fn check_placement(
        &self,
        length: usize,
        x: usize,
        y: usize,
        orientation: Orientation,
    ) -> Result<Ship, BoardError> {
        let ship = Ship::new(length, Coord::new(x, y), orientation)?;
        // ships may not touch, diagonals included
        if !(ship.halo() & self.occupancy).is_empty() {
            return Err(BoardError::ShipOverlaps);
        }
        Ok(ship)
    }

    /// Whether a ship fits at `(x, y)` without leaving the grid or touching
    /// another ship.
    pub fn can_place(&self, length: usize, x: usize, y: usize, orientation: Orientation) -> bool {
        self.check_placement(length, x, y, orientation).is_ok()
    }

    /// Place a ship. Nothing changes on error.
    pub fn place(
        &mut self,
        length: usize,
        x: usize,
        y: usize,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        let ship = self.check_placement(length, x, y, orientation)?;
        self.occupancy |= ship.mask();
        self.ships.push(ship);
        debug!("placed {:?}", ship);
        Ok(())
    }

    /// Lift the ship covering `(x, y)` off the board, returning its length.
    pub fn remove_ship_at(&mut self, x: usize, y: usize) -> Option<usize> {
        let c = Coord::new(x, y);
        if !self.occupancy.contains(c) {
            return None;
        }
        let idx = self.ships.iter().position(|s| s.contains(c))?;
        let ship = self.ships.remove(idx);
        self.occupancy &= !ship.mask();
        debug!("removed {:?}", ship);
        Some(ship.length())
    }

    /// Try up to `PLACEMENT_ATTEMPTS` random spots for one ship.
    fn place_at_random<R: Rng + ?Sized>(&mut self, rng: &mut R, length: usize) -> bool {
        if length == 0 || length > GRID_SIZE {
            return false;
        }
        for _ in 0..PLACEMENT_ATTEMPTS {
            let orientation = Orientation::from_horizontal(rng.random());
            let (max_x, max_y) = match orientation {
                Orientation::Horizontal => (GRID_SIZE - length, GRID_SIZE - 1),
                Orientation::Vertical => (GRID_SIZE - 1, GRID_SIZE - length),
            };
            let x = rng.random_range(0..=max_x);
            let y = rng.random_range(0..=max_y);
            if self.place(length, x, y, orientation).is_ok() {
                return true;
            }
        }
        false
    }

    /// Clear the board and place `fleet` at random spots.
    ///
    /// When a ship cannot be fitted the board is wiped and the whole fleet is
    /// retried, up to `FLEET_PLACEMENT_RESETS` times. On error the board is
    /// left empty.
    pub fn place_randomly<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        fleet: &[usize],
    ) -> Result<(), BoardError> {
        let mut failed = 0;
        for round in 0..FLEET_PLACEMENT_RESETS {
            self.clear();
            match fleet.iter().find(|&&len| !self.place_at_random(&mut *rng, len)) {
                None => return Ok(()),
                Some(&len) => {
                    failed = len;
                    warn!(
                        "could not fit a ship of length {} (round {}), restarting placement",
                        len,
                        round + 1
                    );
                }
            }
        }
        self.clear();
        Err(BoardError::UnableToPlaceShip { length: failed })
    }

    /// Fire at `(x, y)`.
    ///
    /// Out-of-bounds and already resolved cells are rejected without touching
    /// the board. Sinking a ship marks every unshot cell around it as
    /// excluded.
    pub fn shoot(&mut self, x: usize, y: usize) -> Result<ShotOutcome, BoardError> {
        let c = Coord::new(x, y);
        if !c.in_bounds() {
            return Err(BoardError::ShotOutOfBounds { x, y });
        }
        if self.shots.contains(c) || self.excluded.contains(c) {
            return Err(BoardError::AlreadyShot { x, y });
        }
        if !self.occupancy.contains(c) {
            self.shots.set(c)?;
            return Ok(ShotOutcome::Miss);
        }

        let ship = *self
            .ships
            .iter()
            .find(|s| s.contains(c))
            .ok_or(BoardError::UnknownShipHit)?;
        self.shots.set(c)?;
        if ship.is_sunk(&self.shots) {
            self.excluded |= ship.halo() & !self.shots;
            debug!("sunk {:?}", ship);
            Ok(ShotOutcome::Sunk {
                length: ship.length(),
            })
        } else {
            Ok(ShotOutcome::Hit)
        }
    }

    /// Returns `true` when every placed ship is sunk.
    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(|s| s.is_sunk(&self.shots))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  occupancy: {:?},\n  shots: {:?},\n  excluded: {:?},\n  ships: {:?}\n}}",
            self.occupancy, self.shots, self.excluded, self.ships
        )
    }
}
